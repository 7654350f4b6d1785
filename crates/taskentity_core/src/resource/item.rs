//! Item (task) entity.
//!
//! # Responsibility
//! - Expose the item operation set: update/delete, move, reorder, close,
//!   complete/uncomplete, archive/unarchive, recurring completion.
//!
//! # Invariants
//! - `move_to` requires exactly one relationship target and writes only that
//!   field; sibling relationship fields are left as they were.
//! - `checked` and `in_history` flip only after the command was accepted.
//! - `update_date_complete` never clears the local `due` value; `None` or
//!   `Some(Null)` leaves it as it was.

use crate::dispatch::{CommandDispatch, MoveTarget, ResourceCommands};
use crate::model::entity::{Entity, EntityError, EntityKind, EntityResult};
use crate::model::value::AttrValue;
use crate::resource::router::{dispatch_then_apply, reorder_payload, Editable, EntityHandle};

const MOVE_ARGUMENT_ERROR: &str =
    "move requires exactly one of parent_id, project_id, or section_id";

/// Caller-facing move arguments; exactly one field must be set.
///
/// `Some(AttrValue::Null)` is a valid target (e.g. move to the root level).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MoveArgs {
    pub parent_id: Option<AttrValue>,
    pub project_id: Option<AttrValue>,
    pub section_id: Option<AttrValue>,
}

impl MoveArgs {
    pub fn parent(parent_id: impl Into<AttrValue>) -> Self {
        Self {
            parent_id: Some(parent_id.into()),
            ..Self::default()
        }
    }

    pub fn project(project_id: impl Into<AttrValue>) -> Self {
        Self {
            project_id: Some(project_id.into()),
            ..Self::default()
        }
    }

    pub fn section(section_id: impl Into<AttrValue>) -> Self {
        Self {
            section_id: Some(section_id.into()),
            ..Self::default()
        }
    }

    /// Validates that exactly one target is present.
    ///
    /// # Errors
    /// - `EntityError::InvalidArgument` when zero or several targets are set.
    pub fn into_target(self) -> EntityResult<MoveTarget> {
        match (self.parent_id, self.project_id, self.section_id) {
            (Some(value), None, None) => Ok(MoveTarget::Parent(value)),
            (None, Some(value), None) => Ok(MoveTarget::Project(value)),
            (None, None, Some(value)) => Ok(MoveTarget::Section(value)),
            _ => Err(EntityError::InvalidArgument(MOVE_ARGUMENT_ERROR.to_string())),
        }
    }
}

/// Task entity.
#[derive(Debug, Clone)]
pub struct Item {
    entity: Entity,
}

impl Item {
    pub fn new(entity: Entity) -> Self {
        Self { entity }
    }

    pub fn into_entity(self) -> Entity {
        self.entity
    }

    /// Moves the item under a parent item, into a project, or into a section.
    pub fn move_to(&mut self, args: MoveArgs) -> EntityResult<()> {
        let target = args.into_target()?;
        dispatch_then_apply(
            &mut self.entity,
            EntityKind::Item,
            "move",
            |dispatch, id| dispatch.items().move_item(id, &target),
            |entity| entity.set(target.field(), target.value().clone()),
        )
    }

    /// Sets `child_order`; dispatched as a one-element batch.
    pub fn reorder(&mut self, child_order: impl Into<AttrValue>) -> EntityResult<()> {
        let child_order = child_order.into();
        dispatch_then_apply(
            &mut self.entity,
            EntityKind::Item,
            "reorder",
            |dispatch, id| {
                dispatch
                    .items()
                    .reorder(&reorder_payload(id, "child_order", &child_order))
            },
            |entity| entity.set("child_order", child_order.clone()),
        )
    }

    /// Closes the item; the resulting state arrives with the next sync.
    pub fn close(&mut self) -> EntityResult<()> {
        dispatch_then_apply(
            &mut self.entity,
            EntityKind::Item,
            "close",
            |dispatch, id| dispatch.items().close(id),
            |_| {},
        )
    }

    pub fn complete(&mut self, date_completed: Option<AttrValue>) -> EntityResult<()> {
        dispatch_then_apply(
            &mut self.entity,
            EntityKind::Item,
            "complete",
            |dispatch, id| dispatch.items().complete(id, date_completed.as_ref()),
            |entity| entity.set("checked", AttrValue::flag(true)),
        )
    }

    pub fn uncomplete(&mut self) -> EntityResult<()> {
        dispatch_then_apply(
            &mut self.entity,
            EntityKind::Item,
            "uncomplete",
            |dispatch, id| dispatch.items().uncomplete(id),
            |entity| entity.set("checked", AttrValue::flag(false)),
        )
    }

    /// Moves the item to history (`in_history = 1`).
    pub fn archive(&mut self) -> EntityResult<()> {
        dispatch_then_apply(
            &mut self.entity,
            EntityKind::Item,
            "archive",
            |dispatch, id| dispatch.items().archive(id),
            |entity| entity.set("in_history", AttrValue::flag(true)),
        )
    }

    pub fn unarchive(&mut self) -> EntityResult<()> {
        dispatch_then_apply(
            &mut self.entity,
            EntityKind::Item,
            "unarchive",
            |dispatch, id| dispatch.items().unarchive(id),
            |entity| entity.set("in_history", AttrValue::flag(false)),
        )
    }

    /// Completes one occurrence of a recurring item.
    ///
    /// `due` is forwarded as given; the local `due` is replaced only by a
    /// truthy value, so `None` or `Some(Null)` never clears it.
    pub fn update_date_complete(&mut self, due: Option<AttrValue>) -> EntityResult<()> {
        dispatch_then_apply(
            &mut self.entity,
            EntityKind::Item,
            "update_date_complete",
            |dispatch, id| dispatch.items().update_date_complete(id, due.as_ref()),
            |entity| {
                if let Some(due) = due.clone().filter(AttrValue::is_truthy) {
                    entity.set("due", due);
                }
            },
        )
    }
}

impl EntityHandle for Item {
    fn kind(&self) -> EntityKind {
        EntityKind::Item
    }

    fn entity(&self) -> &Entity {
        &self.entity
    }

    fn entity_mut(&mut self) -> &mut Entity {
        &mut self.entity
    }
}

impl Editable for Item {
    fn route<'a>(&self, dispatch: &'a dyn CommandDispatch) -> &'a dyn ResourceCommands {
        dispatch.items()
    }
}
