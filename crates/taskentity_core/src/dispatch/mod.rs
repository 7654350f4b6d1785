//! Command-dispatch contracts consumed by the entity layer.
//!
//! # Responsibility
//! - Describe the remote command surface, grouped by resource.
//! - Carry dispatch failures back to entity callers unchanged.
//!
//! # Invariants
//! - The entity layer never retries a failed call.
//! - Implementations are shared read-only across every entity of a session.
//!
//! # See also
//! - `resource::router` for how entities pick a sub-interface.

pub mod recording;

use crate::model::value::{AttrMap, AttrValue};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type DispatchResult<T> = Result<T, DispatchError>;

/// Failure envelope returned by a command-dispatch implementation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchError {
    /// Resource group, e.g. `items`.
    pub resource: String,
    /// Command name inside the group, e.g. `complete`.
    pub command: String,
    /// Stable machine-readable code.
    pub code: String,
    pub message: String,
}

impl DispatchError {
    pub fn new(
        resource: impl Into<String>,
        command: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            resource: resource.into(),
            command: command.into(),
            code: code.into(),
            message: message.into(),
        }
    }
}

impl Display for DispatchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}.{} failed [{}]: {}",
            self.resource, self.command, self.code, self.message
        )
    }
}

impl Error for DispatchError {}

/// Relationship an item is moved along.
///
/// Exactly one target per move; see `resource::item::MoveArgs` for the
/// caller-facing shape.
#[derive(Debug, Clone, PartialEq)]
pub enum MoveTarget {
    Parent(AttrValue),
    Project(AttrValue),
    Section(AttrValue),
}

impl MoveTarget {
    /// Attribute name written locally after a successful move.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Parent(_) => "parent_id",
            Self::Project(_) => "project_id",
            Self::Section(_) => "section_id",
        }
    }

    pub fn value(&self) -> &AttrValue {
        match self {
            Self::Parent(value) | Self::Project(value) | Self::Section(value) => value,
        }
    }
}

/// Commands every addressable resource group accepts.
///
/// Labels, filters, reminders, item notes and project notes expose nothing
/// beyond this.
pub trait ResourceCommands {
    fn update(&self, id: &AttrValue, attrs: &AttrMap) -> DispatchResult<()>;
    fn delete(&self, id: &AttrValue) -> DispatchResult<()>;
}

/// Item command group.
pub trait ItemCommands: ResourceCommands {
    fn move_item(&self, id: &AttrValue, target: &MoveTarget) -> DispatchResult<()>;
    /// Batch-shaped: each entry is `{id, child_order}`.
    fn reorder(&self, items: &[AttrMap]) -> DispatchResult<()>;
    fn close(&self, id: &AttrValue) -> DispatchResult<()>;
    fn complete(&self, id: &AttrValue, date_completed: Option<&AttrValue>) -> DispatchResult<()>;
    fn uncomplete(&self, id: &AttrValue) -> DispatchResult<()>;
    fn archive(&self, id: &AttrValue) -> DispatchResult<()>;
    fn unarchive(&self, id: &AttrValue) -> DispatchResult<()>;
    /// Completes one occurrence of a recurring item.
    fn update_date_complete(&self, id: &AttrValue, due: Option<&AttrValue>)
        -> DispatchResult<()>;
}

/// Project command group.
pub trait ProjectCommands: ResourceCommands {
    fn move_project(&self, id: &AttrValue, parent_id: &AttrValue) -> DispatchResult<()>;
    /// Batch-shaped: each entry is `{id, child_order}`.
    fn reorder(&self, projects: &[AttrMap]) -> DispatchResult<()>;
    fn archive(&self, id: &AttrValue) -> DispatchResult<()>;
    fn unarchive(&self, id: &AttrValue) -> DispatchResult<()>;
    fn share(&self, id: &AttrValue, email: &str) -> DispatchResult<()>;
    fn take_ownership(&self, id: &AttrValue) -> DispatchResult<()>;
}

/// Section command group.
pub trait SectionCommands: ResourceCommands {
    fn move_section(&self, id: &AttrValue, project_id: &AttrValue) -> DispatchResult<()>;
    /// Batch-shaped: each entry is `{id, section_order}`.
    fn reorder(&self, sections: &[AttrMap]) -> DispatchResult<()>;
    fn archive(&self, id: &AttrValue, date_archived: Option<&AttrValue>) -> DispatchResult<()>;
    fn unarchive(&self, id: &AttrValue) -> DispatchResult<()>;
}

/// Collaborators are scoped to a project and addressed by email.
pub trait CollaboratorCommands {
    fn delete(&self, project_id: &AttrValue, email: &str) -> DispatchResult<()>;
}

/// Session-wide command surface injected into every entity.
pub trait CommandDispatch: Send + Sync {
    fn items(&self) -> &dyn ItemCommands;
    fn projects(&self) -> &dyn ProjectCommands;
    fn sections(&self) -> &dyn SectionCommands;
    fn labels(&self) -> &dyn ResourceCommands;
    fn filters(&self) -> &dyn ResourceCommands;
    fn reminders(&self) -> &dyn ResourceCommands;
    /// Item notes.
    fn notes(&self) -> &dyn ResourceCommands;
    fn project_notes(&self) -> &dyn ResourceCommands;
    fn collaborators(&self) -> &dyn CollaboratorCommands;
}
