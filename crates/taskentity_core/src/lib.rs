//! Optimistic entity layer for a remote task-management service.
//! Mutations dispatch a command first and update the local copy on success.

pub mod dispatch;
pub mod logging;
pub mod model;
pub mod resource;

pub use dispatch::recording::{DispatchCall, RecordingDispatch};
pub use dispatch::{
    CollaboratorCommands, CommandDispatch, DispatchError, DispatchResult, ItemCommands,
    MoveTarget, ProjectCommands, ResourceCommands, SectionCommands,
};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::entity::{Entity, EntityError, EntityKind, EntityResult};
pub use model::value::{attrs, AttrMap, AttrValue};
pub use resource::collaborator::{Collaborator, CollaboratorState, LiveNotification};
pub use resource::item::{Item, MoveArgs};
pub use resource::note::{Note, NoteKind};
pub use resource::project::Project;
pub use resource::router::{Editable, EntityHandle};
pub use resource::section::Section;
pub use resource::simple::{Filter, Label, Reminder};
pub use resource::AnyEntity;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
