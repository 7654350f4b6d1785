//! In-process dispatcher that records accepted commands.
//!
//! # Responsibility
//! - Provide a `CommandDispatch` implementation with no transport.
//! - Let callers arm failures per `(resource, command)` pair.
//!
//! # Invariants
//! - Only accepted calls are recorded; a failed call leaves no trace.
//! - Armed failures stay active until `clear_failures`.

use crate::dispatch::{
    CollaboratorCommands, CommandDispatch, DispatchError, DispatchResult, ItemCommands,
    MoveTarget, ProjectCommands, ResourceCommands, SectionCommands,
};
use crate::model::value::{AttrMap, AttrValue};
use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, MutexGuard};

/// One accepted command as seen by the dispatcher.
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchCall {
    pub resource: &'static str,
    pub command: &'static str,
    /// Named arguments, e.g. `{id, date_completed}`.
    pub args: AttrMap,
}

#[derive(Debug, Default)]
struct CallLog {
    calls: Mutex<Vec<DispatchCall>>,
    failures: Mutex<BTreeSet<(String, String)>>,
}

impl CallLog {
    fn calls(&self) -> MutexGuard<'_, Vec<DispatchCall>> {
        self.calls.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn failures(&self) -> MutexGuard<'_, BTreeSet<(String, String)>> {
        self.failures
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Command group handle bound to one resource name.
#[derive(Debug)]
pub struct RecordingGroup {
    resource: &'static str,
    log: Arc<CallLog>,
}

impl RecordingGroup {
    fn record(
        &self,
        command: &'static str,
        args: Vec<(&'static str, AttrValue)>,
    ) -> DispatchResult<()> {
        let armed = self
            .log
            .failures()
            .contains(&(self.resource.to_string(), command.to_string()));
        if armed {
            return Err(DispatchError::new(
                self.resource,
                command,
                "armed_failure",
                "recording dispatcher rejected the command",
            ));
        }

        let args = args
            .into_iter()
            .map(|(name, value)| (name.to_string(), value))
            .collect();
        self.log.calls().push(DispatchCall {
            resource: self.resource,
            command,
            args,
        });
        Ok(())
    }
}

fn optional(value: Option<&AttrValue>) -> AttrValue {
    value.cloned().unwrap_or(AttrValue::Null)
}

fn batch(entries: &[AttrMap]) -> AttrValue {
    AttrValue::List(entries.iter().cloned().map(AttrValue::Map).collect())
}

impl ResourceCommands for RecordingGroup {
    fn update(&self, id: &AttrValue, attrs: &AttrMap) -> DispatchResult<()> {
        self.record(
            "update",
            vec![("id", id.clone()), ("attrs", AttrValue::Map(attrs.clone()))],
        )
    }

    fn delete(&self, id: &AttrValue) -> DispatchResult<()> {
        self.record("delete", vec![("id", id.clone())])
    }
}

impl ItemCommands for RecordingGroup {
    fn move_item(&self, id: &AttrValue, target: &MoveTarget) -> DispatchResult<()> {
        self.record(
            "move",
            vec![("id", id.clone()), (target.field(), target.value().clone())],
        )
    }

    fn reorder(&self, items: &[AttrMap]) -> DispatchResult<()> {
        self.record("reorder", vec![("items", batch(items))])
    }

    fn close(&self, id: &AttrValue) -> DispatchResult<()> {
        self.record("close", vec![("id", id.clone())])
    }

    fn complete(&self, id: &AttrValue, date_completed: Option<&AttrValue>) -> DispatchResult<()> {
        self.record(
            "complete",
            vec![
                ("id", id.clone()),
                ("date_completed", optional(date_completed)),
            ],
        )
    }

    fn uncomplete(&self, id: &AttrValue) -> DispatchResult<()> {
        self.record("uncomplete", vec![("id", id.clone())])
    }

    fn archive(&self, id: &AttrValue) -> DispatchResult<()> {
        self.record("archive", vec![("id", id.clone())])
    }

    fn unarchive(&self, id: &AttrValue) -> DispatchResult<()> {
        self.record("unarchive", vec![("id", id.clone())])
    }

    fn update_date_complete(
        &self,
        id: &AttrValue,
        due: Option<&AttrValue>,
    ) -> DispatchResult<()> {
        self.record(
            "update_date_complete",
            vec![("id", id.clone()), ("due", optional(due))],
        )
    }
}

impl ProjectCommands for RecordingGroup {
    fn move_project(&self, id: &AttrValue, parent_id: &AttrValue) -> DispatchResult<()> {
        self.record(
            "move",
            vec![("id", id.clone()), ("parent_id", parent_id.clone())],
        )
    }

    fn reorder(&self, projects: &[AttrMap]) -> DispatchResult<()> {
        self.record("reorder", vec![("projects", batch(projects))])
    }

    fn archive(&self, id: &AttrValue) -> DispatchResult<()> {
        self.record("archive", vec![("id", id.clone())])
    }

    fn unarchive(&self, id: &AttrValue) -> DispatchResult<()> {
        self.record("unarchive", vec![("id", id.clone())])
    }

    fn share(&self, id: &AttrValue, email: &str) -> DispatchResult<()> {
        self.record("share", vec![("id", id.clone()), ("email", email.into())])
    }

    fn take_ownership(&self, id: &AttrValue) -> DispatchResult<()> {
        self.record("take_ownership", vec![("id", id.clone())])
    }
}

impl SectionCommands for RecordingGroup {
    fn move_section(&self, id: &AttrValue, project_id: &AttrValue) -> DispatchResult<()> {
        self.record(
            "move",
            vec![("id", id.clone()), ("project_id", project_id.clone())],
        )
    }

    fn reorder(&self, sections: &[AttrMap]) -> DispatchResult<()> {
        self.record("reorder", vec![("sections", batch(sections))])
    }

    fn archive(&self, id: &AttrValue, date_archived: Option<&AttrValue>) -> DispatchResult<()> {
        self.record(
            "archive",
            vec![("id", id.clone()), ("date_archived", optional(date_archived))],
        )
    }

    fn unarchive(&self, id: &AttrValue) -> DispatchResult<()> {
        self.record("unarchive", vec![("id", id.clone())])
    }
}

impl CollaboratorCommands for RecordingGroup {
    fn delete(&self, project_id: &AttrValue, email: &str) -> DispatchResult<()> {
        self.record(
            "delete",
            vec![("project_id", project_id.clone()), ("email", email.into())],
        )
    }
}

/// Recording `CommandDispatch` with one group per resource.
#[derive(Debug)]
pub struct RecordingDispatch {
    log: Arc<CallLog>,
    items: RecordingGroup,
    projects: RecordingGroup,
    sections: RecordingGroup,
    labels: RecordingGroup,
    filters: RecordingGroup,
    reminders: RecordingGroup,
    notes: RecordingGroup,
    project_notes: RecordingGroup,
    collaborators: RecordingGroup,
}

impl Default for RecordingDispatch {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingDispatch {
    pub fn new() -> Self {
        let log = Arc::new(CallLog::default());
        let group = |resource: &'static str| RecordingGroup {
            resource,
            log: Arc::clone(&log),
        };
        Self {
            items: group("items"),
            projects: group("projects"),
            sections: group("sections"),
            labels: group("labels"),
            filters: group("filters"),
            reminders: group("reminders"),
            notes: group("notes"),
            project_notes: group("project_notes"),
            collaborators: group("collaborators"),
            log,
        }
    }

    /// Returns accepted calls in dispatch order.
    pub fn calls(&self) -> Vec<DispatchCall> {
        self.log.calls().clone()
    }

    /// Returns the most recent accepted call.
    pub fn last_call(&self) -> Option<DispatchCall> {
        self.log.calls().last().cloned()
    }

    pub fn clear_calls(&self) {
        self.log.calls().clear();
    }

    /// Makes every later `resource.command` call fail.
    pub fn fail_on(&self, resource: &str, command: &str) {
        self.log
            .failures()
            .insert((resource.to_string(), command.to_string()));
    }

    pub fn clear_failures(&self) {
        self.log.failures().clear();
    }
}

impl CommandDispatch for RecordingDispatch {
    fn items(&self) -> &dyn ItemCommands {
        &self.items
    }

    fn projects(&self) -> &dyn ProjectCommands {
        &self.projects
    }

    fn sections(&self) -> &dyn SectionCommands {
        &self.sections
    }

    fn labels(&self) -> &dyn ResourceCommands {
        &self.labels
    }

    fn filters(&self) -> &dyn ResourceCommands {
        &self.filters
    }

    fn reminders(&self) -> &dyn ResourceCommands {
        &self.reminders
    }

    fn notes(&self) -> &dyn ResourceCommands {
        &self.notes
    }

    fn project_notes(&self) -> &dyn ResourceCommands {
        &self.project_notes
    }

    fn collaborators(&self) -> &dyn CollaboratorCommands {
        &self.collaborators
    }
}
