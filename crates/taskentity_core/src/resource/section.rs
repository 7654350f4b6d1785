//! Section entity.
//!
//! # Invariants
//! - `archive(date_archived)` forwards the date but stores only the flag.
//! - Order lives in `section_order`, not `child_order`.

use crate::dispatch::{CommandDispatch, ResourceCommands};
use crate::model::entity::{Entity, EntityKind, EntityResult};
use crate::model::value::AttrValue;
use crate::resource::router::{dispatch_then_apply, reorder_payload, Editable, EntityHandle};

#[derive(Debug, Clone)]
pub struct Section {
    entity: Entity,
}

impl Section {
    pub fn new(entity: Entity) -> Self {
        Self { entity }
    }

    pub fn into_entity(self) -> Entity {
        self.entity
    }

    /// Moves the section into another project.
    pub fn move_to(&mut self, project_id: impl Into<AttrValue>) -> EntityResult<()> {
        let project_id = project_id.into();
        dispatch_then_apply(
            &mut self.entity,
            EntityKind::Section,
            "move",
            |dispatch, id| dispatch.sections().move_section(id, &project_id),
            |entity| entity.set("project_id", project_id.clone()),
        )
    }

    pub fn reorder(&mut self, section_order: impl Into<AttrValue>) -> EntityResult<()> {
        let section_order = section_order.into();
        dispatch_then_apply(
            &mut self.entity,
            EntityKind::Section,
            "reorder",
            |dispatch, id| {
                dispatch
                    .sections()
                    .reorder(&reorder_payload(id, "section_order", &section_order))
            },
            |entity| entity.set("section_order", section_order.clone()),
        )
    }

    pub fn archive(&mut self, date_archived: Option<AttrValue>) -> EntityResult<()> {
        dispatch_then_apply(
            &mut self.entity,
            EntityKind::Section,
            "archive",
            |dispatch, id| dispatch.sections().archive(id, date_archived.as_ref()),
            |entity| entity.set("is_archived", AttrValue::flag(true)),
        )
    }

    pub fn unarchive(&mut self) -> EntityResult<()> {
        dispatch_then_apply(
            &mut self.entity,
            EntityKind::Section,
            "unarchive",
            |dispatch, id| dispatch.sections().unarchive(id),
            |entity| entity.set("is_archived", AttrValue::flag(false)),
        )
    }
}

impl EntityHandle for Section {
    fn kind(&self) -> EntityKind {
        EntityKind::Section
    }

    fn entity(&self) -> &Entity {
        &self.entity
    }

    fn entity_mut(&mut self) -> &mut Entity {
        &mut self.entity
    }
}

impl Editable for Section {
    fn route<'a>(&self, dispatch: &'a dyn CommandDispatch) -> &'a dyn ResourceCommands {
        dispatch.sections()
    }
}
