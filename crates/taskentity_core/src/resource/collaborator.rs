//! Collaborator entities.
//!
//! # Invariants
//! - Collaborators are addressed by `(project_id, email)`, never by `id`.
//! - Removing a collaborator leaves the local map untouched; the cache owner
//!   decides what to drop.
//! - `CollaboratorState` and `LiveNotification` are read-only projections.

use crate::model::entity::{Entity, EntityKind, EntityResult};
use crate::model::value::AttrValue;
use crate::resource::router::{dispatch_keyed_then_apply, EntityHandle};

/// Person sharing one or more projects with the user.
#[derive(Debug, Clone)]
pub struct Collaborator {
    entity: Entity,
}

impl Collaborator {
    pub fn new(entity: Entity) -> Self {
        Self { entity }
    }

    pub fn into_entity(self) -> Entity {
        self.entity
    }

    /// Removes this collaborator from `project_id`.
    ///
    /// # Errors
    /// - `KeyNotFound("email")` when the entity has no email; nothing is sent.
    pub fn delete(&mut self, project_id: impl Into<AttrValue>) -> EntityResult<()> {
        let project_id = project_id.into();
        dispatch_keyed_then_apply(
            &mut self.entity,
            EntityKind::Collaborator,
            "delete",
            "email",
            |dispatch, email| {
                // Why: non-string emails are forwarded in their rendered form.
                let email = match email.as_str() {
                    Some(value) => value.to_string(),
                    None => email.to_string(),
                };
                dispatch.collaborators().delete(&project_id, &email)
            },
            |_| {},
        )
    }
}

impl EntityHandle for Collaborator {
    fn kind(&self) -> EntityKind {
        EntityKind::Collaborator
    }

    fn entity(&self) -> &Entity {
        &self.entity
    }

    fn entity_mut(&mut self) -> &mut Entity {
        &mut self.entity
    }
}

/// Membership state of a collaborator in one project.
#[derive(Debug, Clone)]
pub struct CollaboratorState {
    entity: Entity,
}

impl CollaboratorState {
    pub fn new(entity: Entity) -> Self {
        Self { entity }
    }

    pub fn into_entity(self) -> Entity {
        self.entity
    }
}

impl EntityHandle for CollaboratorState {
    fn kind(&self) -> EntityKind {
        EntityKind::CollaboratorState
    }

    fn entity(&self) -> &Entity {
        &self.entity
    }

    fn entity_mut(&mut self) -> &mut Entity {
        &mut self.entity
    }
}

/// Server-pushed notification record.
#[derive(Debug, Clone)]
pub struct LiveNotification {
    entity: Entity,
}

impl LiveNotification {
    pub fn new(entity: Entity) -> Self {
        Self { entity }
    }

    pub fn into_entity(self) -> Entity {
        self.entity
    }
}

impl EntityHandle for LiveNotification {
    fn kind(&self) -> EntityKind {
        EntityKind::LiveNotification
    }

    fn entity(&self) -> &Entity {
        &self.entity
    }

    fn entity_mut(&mut self) -> &mut Entity {
        &mut self.entity
    }
}
