//! Project entity.
//!
//! # Invariants
//! - `share` and `take_ownership` are pure dispatch; nothing changes locally.
//! - `is_archived` flips only after the command was accepted.

use crate::dispatch::{CommandDispatch, ResourceCommands};
use crate::model::entity::{Entity, EntityKind, EntityResult};
use crate::model::value::AttrValue;
use crate::resource::router::{dispatch_then_apply, reorder_payload, Editable, EntityHandle};

#[derive(Debug, Clone)]
pub struct Project {
    entity: Entity,
}

impl Project {
    pub fn new(entity: Entity) -> Self {
        Self { entity }
    }

    pub fn into_entity(self) -> Entity {
        self.entity
    }

    /// Moves the project under another project (`Null` for top level).
    pub fn move_to(&mut self, parent_id: impl Into<AttrValue>) -> EntityResult<()> {
        let parent_id = parent_id.into();
        dispatch_then_apply(
            &mut self.entity,
            EntityKind::Project,
            "move",
            |dispatch, id| dispatch.projects().move_project(id, &parent_id),
            |entity| entity.set("parent_id", parent_id.clone()),
        )
    }

    /// Sets `child_order`; dispatched as a one-element batch.
    pub fn reorder(&mut self, child_order: impl Into<AttrValue>) -> EntityResult<()> {
        let child_order = child_order.into();
        dispatch_then_apply(
            &mut self.entity,
            EntityKind::Project,
            "reorder",
            |dispatch, id| {
                dispatch
                    .projects()
                    .reorder(&reorder_payload(id, "child_order", &child_order))
            },
            |entity| entity.set("child_order", child_order.clone()),
        )
    }

    pub fn archive(&mut self) -> EntityResult<()> {
        dispatch_then_apply(
            &mut self.entity,
            EntityKind::Project,
            "archive",
            |dispatch, id| dispatch.projects().archive(id),
            |entity| entity.set("is_archived", AttrValue::flag(true)),
        )
    }

    pub fn unarchive(&mut self) -> EntityResult<()> {
        dispatch_then_apply(
            &mut self.entity,
            EntityKind::Project,
            "unarchive",
            |dispatch, id| dispatch.projects().unarchive(id),
            |entity| entity.set("is_archived", AttrValue::flag(false)),
        )
    }

    /// Invites `email` to collaborate on this project.
    pub fn share(&mut self, email: &str) -> EntityResult<()> {
        dispatch_then_apply(
            &mut self.entity,
            EntityKind::Project,
            "share",
            |dispatch, id| dispatch.projects().share(id, email),
            |_| {},
        )
    }

    pub fn take_ownership(&mut self) -> EntityResult<()> {
        dispatch_then_apply(
            &mut self.entity,
            EntityKind::Project,
            "take_ownership",
            |dispatch, id| dispatch.projects().take_ownership(id),
            |_| {},
        )
    }
}

impl EntityHandle for Project {
    fn kind(&self) -> EntityKind {
        EntityKind::Project
    }

    fn entity(&self) -> &Entity {
        &self.entity
    }

    fn entity_mut(&mut self) -> &mut Entity {
        &mut self.entity
    }
}

impl Editable for Project {
    fn route<'a>(&self, dispatch: &'a dyn CommandDispatch) -> &'a dyn ResourceCommands {
        dispatch.projects()
    }
}
