//! Entity base model.
//!
//! # Responsibility
//! - Hold the attribute map, temp id and dispatch reference of one entity.
//! - Provide the kind-independent base contract (`get`/`set`/`contains`).
//!
//! # Invariants
//! - `set` never dispatches; it exists for (de)serialization paths.
//! - Mutating operations read `id` before dispatching and fail with
//!   `KeyNotFound("id")` when it is missing.
//! - The dispatch reference is shared, never owned exclusively.

use crate::dispatch::{CommandDispatch, DispatchError};
use crate::model::value::{render_map, AttrMap, AttrValue};
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::sync::Arc;
use uuid::Uuid;

pub type EntityResult<T> = Result<T, EntityError>;

/// Errors surfaced by entity operations.
#[derive(Debug, Clone, PartialEq)]
pub enum EntityError {
    /// Attribute lookup by a key the map does not hold.
    KeyNotFound(String),
    /// Operation arguments are malformed (e.g. ambiguous move target).
    InvalidArgument(String),
    /// Dispatch call failed; local state was left untouched.
    Dispatch(DispatchError),
    /// Operation is not part of this kind's operation set.
    Unsupported {
        kind: EntityKind,
        operation: &'static str,
    },
}

impl Display for EntityError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::KeyNotFound(key) => write!(f, "attribute not found: `{key}`"),
            Self::InvalidArgument(message) => write!(f, "invalid argument: {message}"),
            Self::Dispatch(err) => write!(f, "{err}"),
            Self::Unsupported { kind, operation } => {
                write!(f, "{} does not support `{operation}`", kind.class_name())
            }
        }
    }
}

impl Error for EntityError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Dispatch(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DispatchError> for EntityError {
    fn from(value: DispatchError) -> Self {
        Self::Dispatch(value)
    }
}

/// Kind tag for every entity the layer models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EntityKind {
    Item,
    Project,
    Section,
    Label,
    Filter,
    Reminder,
    /// Note attached to an item.
    Note,
    ProjectNote,
    Collaborator,
    CollaboratorState,
    LiveNotification,
}

const ALL_KINDS: &[EntityKind] = &[
    EntityKind::Item,
    EntityKind::Project,
    EntityKind::Section,
    EntityKind::Label,
    EntityKind::Filter,
    EntityKind::Reminder,
    EntityKind::Note,
    EntityKind::ProjectNote,
    EntityKind::Collaborator,
    EntityKind::CollaboratorState,
    EntityKind::LiveNotification,
];

impl EntityKind {
    pub fn all() -> &'static [EntityKind] {
        ALL_KINDS
    }

    /// Stable snake_case name used in log lines and wire metadata.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Item => "item",
            Self::Project => "project",
            Self::Section => "section",
            Self::Label => "label",
            Self::Filter => "filter",
            Self::Reminder => "reminder",
            Self::Note => "note",
            Self::ProjectNote => "project_note",
            Self::Collaborator => "collaborator",
            Self::CollaboratorState => "collaborator_state",
            Self::LiveNotification => "live_notification",
        }
    }

    /// Name used by `describe()`.
    pub fn class_name(self) -> &'static str {
        match self {
            Self::Item => "Item",
            Self::Project => "Project",
            Self::Section => "Section",
            Self::Label => "Label",
            Self::Filter => "Filter",
            Self::Reminder => "Reminder",
            Self::Note => "Note",
            Self::ProjectNote => "ProjectNote",
            Self::Collaborator => "Collaborator",
            Self::CollaboratorState => "CollaboratorState",
            Self::LiveNotification => "LiveNotification",
        }
    }

    /// Parses a snake_case kind name; surrounding whitespace is ignored.
    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim();
        ALL_KINDS
            .iter()
            .copied()
            .find(|kind| kind.as_str() == normalized)
    }
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Attribute map plus identity metadata and the session dispatch handle.
#[derive(Clone)]
pub struct Entity {
    temp_id: String,
    attributes: AttrMap,
    dispatch: Arc<dyn CommandDispatch>,
}

impl Entity {
    /// Wraps server-known or factory-built attribute data.
    pub fn new(attributes: AttrMap, dispatch: Arc<dyn CommandDispatch>) -> Self {
        Self {
            temp_id: String::new(),
            attributes,
            dispatch,
        }
    }

    /// Creates a locally-born entity with a fresh temp id.
    ///
    /// # Invariants
    /// - `temp_id` is a UUID v4 string and `id` is seeded with the same value
    ///   until sync assigns a permanent identifier.
    pub fn new_local(mut attributes: AttrMap, dispatch: Arc<dyn CommandDispatch>) -> Self {
        let temp_id = Uuid::new_v4().to_string();
        attributes.insert("id".to_string(), AttrValue::String(temp_id.clone()));
        Self {
            temp_id,
            attributes,
            dispatch,
        }
    }

    pub fn temp_id(&self) -> &str {
        &self.temp_id
    }

    pub fn set_temp_id(&mut self, temp_id: impl Into<String>) {
        self.temp_id = temp_id.into();
    }

    pub fn clear_temp_id(&mut self) {
        self.temp_id.clear();
    }

    /// Returns the value stored under `key`.
    pub fn get(&self, key: &str) -> EntityResult<&AttrValue> {
        self.attributes
            .get(key)
            .ok_or_else(|| EntityError::KeyNotFound(key.to_string()))
    }

    /// Overwrites `key` without dispatching anything.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<AttrValue>) {
        self.attributes.insert(key.into(), value.into());
    }

    pub fn contains(&self, key: &str) -> bool {
        self.attributes.contains_key(key)
    }

    /// Returns the identifier mutating operations address the remote with.
    pub fn id(&self) -> EntityResult<AttrValue> {
        self.get("id").cloned()
    }

    pub fn attributes(&self) -> &AttrMap {
        &self.attributes
    }

    pub fn dispatch(&self) -> &Arc<dyn CommandDispatch> {
        &self.dispatch
    }

    /// Stable debug string: `Kind({'key': value, ...})`.
    pub fn describe_as(&self, kind: EntityKind) -> String {
        format!("{}({})", kind.class_name(), RenderedAttrs(&self.attributes))
    }

    /// Merges `attrs` into the map; incoming values win on collision.
    pub(crate) fn merge(&mut self, attrs: &AttrMap) {
        for (key, value) in attrs {
            self.attributes.insert(key.clone(), value.clone());
        }
    }
}

impl Debug for Entity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Entity")
            .field("temp_id", &self.temp_id)
            .field("attributes", &self.attributes)
            .finish_non_exhaustive()
    }
}

struct RenderedAttrs<'a>(&'a AttrMap);

impl Display for RenderedAttrs<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        render_map(self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::{Entity, EntityError, EntityKind};
    use crate::dispatch::recording::RecordingDispatch;
    use crate::model::value::{attrs, AttrValue};
    use std::sync::Arc;

    fn entity(pairs: Vec<(&str, AttrValue)>) -> Entity {
        Entity::new(attrs(pairs), Arc::new(RecordingDispatch::new()))
    }

    #[test]
    fn get_reports_missing_key() {
        let entity = entity(vec![("id", AttrValue::Int(1))]);
        assert_eq!(entity.get("id").unwrap(), &AttrValue::Int(1));
        assert_eq!(
            entity.get("content").unwrap_err(),
            EntityError::KeyNotFound("content".to_string())
        );
    }

    #[test]
    fn set_overwrites_and_contains_tracks_membership() {
        let mut entity = entity(vec![("id", AttrValue::Int(1))]);
        assert!(!entity.contains("content"));
        entity.set("content", "draft");
        entity.set("content", "final");
        assert!(entity.contains("content"));
        assert_eq!(entity.get("content").unwrap(), &AttrValue::from("final"));
    }

    #[test]
    fn describe_prefixes_class_name() {
        let entity = entity(vec![
            ("id", AttrValue::Int(1)),
            ("content", AttrValue::from("milk")),
        ]);
        assert_eq!(
            entity.describe_as(EntityKind::ProjectNote),
            "ProjectNote({'content': 'milk', 'id': 1})"
        );
    }

    #[test]
    fn new_local_seeds_id_with_temp_id() {
        let mut entity = Entity::new_local(
            attrs([("content", "new")]),
            Arc::new(RecordingDispatch::new()),
        );
        assert!(!entity.temp_id().is_empty());
        assert_eq!(entity.id().unwrap(), AttrValue::from(entity.temp_id()));

        entity.clear_temp_id();
        assert!(entity.temp_id().is_empty());
    }

    #[test]
    fn kind_names_round_trip_through_parse() {
        for kind in EntityKind::all() {
            assert_eq!(EntityKind::parse(kind.as_str()), Some(*kind));
        }
        assert_eq!(EntityKind::parse(" project_note "), Some(EntityKind::ProjectNote));
        assert_eq!(EntityKind::parse("workspace"), None);
    }
}
