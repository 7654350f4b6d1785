//! Note entity and its resource resolution.
//!
//! # Responsibility
//! - Share one update/delete contract between item notes and project notes.
//! - Bind each note to its remote resource group once, at construction.
//!
//! # Invariants
//! - `NoteKind` never changes after construction.
//! - Item notes route to `notes`, project notes to `project_notes`.

use crate::dispatch::{CommandDispatch, ResourceCommands};
use crate::model::entity::{Entity, EntityKind};
use crate::resource::router::{Editable, EntityHandle};

/// Remote resource a note is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoteKind {
    ItemNote,
    ProjectNote,
}

impl NoteKind {
    /// Resolves the dispatch sub-interface for this binding.
    pub fn resolve(self, dispatch: &dyn CommandDispatch) -> &dyn ResourceCommands {
        match self {
            Self::ItemNote => dispatch.notes(),
            Self::ProjectNote => dispatch.project_notes(),
        }
    }

    pub fn entity_kind(self) -> EntityKind {
        match self {
            Self::ItemNote => EntityKind::Note,
            Self::ProjectNote => EntityKind::ProjectNote,
        }
    }
}

/// Comment attached to an item or a project.
#[derive(Debug, Clone)]
pub struct Note {
    entity: Entity,
    binding: NoteKind,
}

impl Note {
    pub fn new(entity: Entity, binding: NoteKind) -> Self {
        Self { entity, binding }
    }

    pub fn item_note(entity: Entity) -> Self {
        Self::new(entity, NoteKind::ItemNote)
    }

    pub fn project_note(entity: Entity) -> Self {
        Self::new(entity, NoteKind::ProjectNote)
    }

    pub fn binding(&self) -> NoteKind {
        self.binding
    }

    pub fn into_entity(self) -> Entity {
        self.entity
    }
}

impl EntityHandle for Note {
    fn kind(&self) -> EntityKind {
        self.binding.entity_kind()
    }

    fn entity(&self) -> &Entity {
        &self.entity
    }

    fn entity_mut(&mut self) -> &mut Entity {
        &mut self.entity
    }
}

impl Editable for Note {
    fn route<'a>(&self, dispatch: &'a dyn CommandDispatch) -> &'a dyn ResourceCommands {
        self.binding.resolve(dispatch)
    }
}
