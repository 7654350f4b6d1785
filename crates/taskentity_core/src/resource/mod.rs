//! Entity kind specializations and the tagged union over them.
//!
//! # Responsibility
//! - Give every remote resource kind its own type with only the operations
//!   valid for it.
//! - Resolve a kind tag into the matching specialization at construction.
//!
//! # Invariants
//! - Every mutating operation is dispatch-then-apply (see `router`).
//! - Soft delete keeps the full attribute map and sets `is_deleted = 1`.

pub mod collaborator;
pub mod item;
pub mod note;
pub mod project;
pub mod router;
pub mod section;
pub mod simple;

use crate::dispatch::CommandDispatch;
use crate::model::entity::{Entity, EntityError, EntityKind, EntityResult};
use crate::model::value::AttrMap;
use collaborator::{Collaborator, CollaboratorState, LiveNotification};
use item::Item;
use note::Note;
use project::Project;
use router::{Editable, EntityHandle};
use section::Section;
use simple::{Filter, Label, Reminder};
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// One variant per entity kind.
#[derive(Debug, Clone)]
pub enum AnyEntity {
    Item(Item),
    Project(Project),
    Section(Section),
    Label(Label),
    Filter(Filter),
    Reminder(Reminder),
    /// Item note or project note, bound at construction.
    Note(Note),
    Collaborator(Collaborator),
    CollaboratorState(CollaboratorState),
    LiveNotification(LiveNotification),
}

impl AnyEntity {
    /// Builds the specialization requested by `kind`.
    ///
    /// `EntityKind::Note` binds to item notes and `EntityKind::ProjectNote`
    /// to project notes; the binding is fixed for the entity lifetime.
    pub fn from_kind(
        kind: EntityKind,
        attributes: AttrMap,
        dispatch: Arc<dyn CommandDispatch>,
    ) -> Self {
        Self::wrap(kind, Entity::new(attributes, dispatch))
    }

    /// Wraps an already-built entity (e.g. one created with `Entity::new_local`).
    pub fn wrap(kind: EntityKind, entity: Entity) -> Self {
        match kind {
            EntityKind::Item => Self::Item(Item::new(entity)),
            EntityKind::Project => Self::Project(Project::new(entity)),
            EntityKind::Section => Self::Section(Section::new(entity)),
            EntityKind::Label => Self::Label(Label::new(entity)),
            EntityKind::Filter => Self::Filter(Filter::new(entity)),
            EntityKind::Reminder => Self::Reminder(Reminder::new(entity)),
            EntityKind::Note => Self::Note(Note::item_note(entity)),
            EntityKind::ProjectNote => Self::Note(Note::project_note(entity)),
            EntityKind::Collaborator => Self::Collaborator(Collaborator::new(entity)),
            EntityKind::CollaboratorState => {
                Self::CollaboratorState(CollaboratorState::new(entity))
            }
            EntityKind::LiveNotification => Self::LiveNotification(LiveNotification::new(entity)),
        }
    }

    fn handle(&self) -> &dyn EntityHandle {
        match self {
            Self::Item(inner) => inner,
            Self::Project(inner) => inner,
            Self::Section(inner) => inner,
            Self::Label(inner) => inner,
            Self::Filter(inner) => inner,
            Self::Reminder(inner) => inner,
            Self::Note(inner) => inner,
            Self::Collaborator(inner) => inner,
            Self::CollaboratorState(inner) => inner,
            Self::LiveNotification(inner) => inner,
        }
    }

    fn editable(&mut self) -> Option<&mut dyn Editable> {
        match self {
            Self::Item(inner) => Some(inner),
            Self::Project(inner) => Some(inner),
            Self::Section(inner) => Some(inner),
            Self::Label(inner) => Some(inner),
            Self::Filter(inner) => Some(inner),
            Self::Reminder(inner) => Some(inner),
            Self::Note(inner) => Some(inner),
            Self::Collaborator(_) | Self::CollaboratorState(_) | Self::LiveNotification(_) => None,
        }
    }

    pub fn kind(&self) -> EntityKind {
        self.handle().kind()
    }

    pub fn entity(&self) -> &Entity {
        self.handle().entity()
    }

    pub fn describe(&self) -> String {
        self.handle().describe()
    }

    /// Routes `update` to the variant's resource group.
    ///
    /// # Errors
    /// - `Unsupported` for collaborator and read-only variants.
    pub fn update(&mut self, attrs: AttrMap) -> EntityResult<()> {
        let kind = self.kind();
        match self.editable() {
            Some(inner) => inner.update(attrs),
            None => Err(EntityError::Unsupported {
                kind,
                operation: "update",
            }),
        }
    }

    /// Routes `delete` to the variant's resource group.
    ///
    /// # Errors
    /// - `Unsupported` for collaborator (use `Collaborator::delete`) and
    ///   read-only variants.
    pub fn delete(&mut self) -> EntityResult<()> {
        let kind = self.kind();
        match self.editable() {
            Some(inner) => inner.delete(),
            None => Err(EntityError::Unsupported {
                kind,
                operation: "delete",
            }),
        }
    }
}

impl Display for AnyEntity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.describe())
    }
}

#[cfg(test)]
mod tests {
    use super::AnyEntity;
    use crate::dispatch::recording::RecordingDispatch;
    use crate::model::entity::{EntityError, EntityKind};
    use crate::model::value::attrs;
    use std::sync::Arc;

    #[test]
    fn from_kind_selects_matching_variant() {
        let dispatch = Arc::new(RecordingDispatch::new());
        for kind in EntityKind::all() {
            let entity = AnyEntity::from_kind(*kind, attrs([("id", 1)]), dispatch.clone());
            assert_eq!(entity.kind(), *kind);
            assert!(entity.describe().starts_with(kind.class_name()));
        }
    }

    #[test]
    fn passive_variants_reject_mutation_without_dispatch() {
        let dispatch = Arc::new(RecordingDispatch::new());
        let mut state = AnyEntity::from_kind(
            EntityKind::CollaboratorState,
            attrs([("id", 1)]),
            dispatch.clone(),
        );

        let err = state.delete().unwrap_err();
        assert_eq!(
            err,
            EntityError::Unsupported {
                kind: EntityKind::CollaboratorState,
                operation: "delete",
            }
        );
        assert!(dispatch.calls().is_empty());
    }
}
