//! Command routing and the shared dispatch-then-apply protocol.
//!
//! # Responsibility
//! - Resolve the dispatch sub-interface for one entity kind.
//! - Run every mutating operation as dispatch first, local apply second.
//!
//! # Invariants
//! - The local attribute map is touched only after dispatch returned `Ok`.
//! - Dispatch failures propagate unchanged (wrapped in `EntityError::Dispatch`).
//! - Log lines carry kind/command metadata only, never attribute values.

use crate::dispatch::{CommandDispatch, DispatchResult, ResourceCommands};
use crate::model::entity::{Entity, EntityKind, EntityResult};
use crate::model::value::{AttrMap, AttrValue};
use log::{debug, warn};
use std::sync::Arc;

/// Kind-independent access shared by every specialization.
pub trait EntityHandle {
    fn kind(&self) -> EntityKind;
    fn entity(&self) -> &Entity;
    fn entity_mut(&mut self) -> &mut Entity;

    fn get(&self, key: &str) -> EntityResult<&AttrValue> {
        self.entity().get(key)
    }

    /// Overwrites `key` locally; no command is dispatched.
    fn set(&mut self, key: &str, value: AttrValue) {
        self.entity_mut().set(key, value);
    }

    fn contains(&self, key: &str) -> bool {
        self.entity().contains(key)
    }

    fn attributes(&self) -> &AttrMap {
        self.entity().attributes()
    }

    fn describe(&self) -> String {
        self.entity().describe_as(self.kind())
    }
}

/// Kinds addressable by id that accept `update` and `delete`.
pub trait Editable: EntityHandle {
    /// Sub-interface commands for this entity are routed to.
    fn route<'a>(&self, dispatch: &'a dyn CommandDispatch) -> &'a dyn ResourceCommands;

    /// Sends `attrs` in one update command, then merges them locally.
    fn update(&mut self, attrs: AttrMap) -> EntityResult<()> {
        let kind = self.kind();
        let target = Arc::clone(self.entity().dispatch());
        let commands = self.route(target.as_ref());
        dispatch_then_apply(
            self.entity_mut(),
            kind,
            "update",
            |_, id| commands.update(id, &attrs),
            |entity| entity.merge(&attrs),
        )
    }

    /// Sends a delete command, then soft-deletes locally (`is_deleted = 1`).
    fn delete(&mut self) -> EntityResult<()> {
        let kind = self.kind();
        let target = Arc::clone(self.entity().dispatch());
        let commands = self.route(target.as_ref());
        dispatch_then_apply(
            self.entity_mut(),
            kind,
            "delete",
            |_, id| commands.delete(id),
            |entity| entity.set("is_deleted", AttrValue::flag(true)),
        )
    }
}

/// Runs one mutating operation addressed by the entity `id`.
pub(crate) fn dispatch_then_apply<D, A>(
    entity: &mut Entity,
    kind: EntityKind,
    command: &'static str,
    send: D,
    apply: A,
) -> EntityResult<()>
where
    D: FnOnce(&dyn CommandDispatch, &AttrValue) -> DispatchResult<()>,
    A: FnOnce(&mut Entity),
{
    dispatch_keyed_then_apply(entity, kind, command, "id", send, apply)
}

/// Runs one mutating operation addressed by the attribute under `key`.
///
/// Reads `key` before dispatching; a missing key fails without any call.
pub(crate) fn dispatch_keyed_then_apply<D, A>(
    entity: &mut Entity,
    kind: EntityKind,
    command: &'static str,
    key: &str,
    send: D,
    apply: A,
) -> EntityResult<()>
where
    D: FnOnce(&dyn CommandDispatch, &AttrValue) -> DispatchResult<()>,
    A: FnOnce(&mut Entity),
{
    let address = entity.get(key)?.clone();
    let dispatch = Arc::clone(entity.dispatch());

    if let Err(err) = send(dispatch.as_ref(), &address) {
        warn!(
            "event=entity_dispatch module=resource status=error kind={} command={} code={}",
            kind, command, err.code
        );
        return Err(err.into());
    }

    debug!(
        "event=entity_dispatch module=resource status=ok kind={} command={}",
        kind, command
    );
    apply(entity);
    Ok(())
}

/// Builds the single-element batch payload reorder commands require.
pub(crate) fn reorder_payload(
    id: &AttrValue,
    order_field: &str,
    order: &AttrValue,
) -> Vec<AttrMap> {
    let mut entry = AttrMap::new();
    entry.insert("id".to_string(), id.clone());
    entry.insert(order_field.to_string(), order.clone());
    vec![entry]
}

#[cfg(test)]
mod tests {
    use super::{dispatch_then_apply, reorder_payload};
    use crate::dispatch::recording::RecordingDispatch;
    use crate::dispatch::DispatchError;
    use crate::model::entity::{Entity, EntityError, EntityKind};
    use crate::model::value::{attrs, AttrValue};
    use std::sync::Arc;

    #[test]
    fn apply_is_skipped_when_dispatch_fails() {
        let mut entity = Entity::new(
            attrs([("id", 3)]),
            Arc::new(RecordingDispatch::new()),
        );
        let before = entity.attributes().clone();

        let err = dispatch_then_apply(
            &mut entity,
            EntityKind::Label,
            "update",
            |_, _| Err(DispatchError::new("labels", "update", "offline", "no route")),
            |entity| entity.set("name", "changed"),
        )
        .unwrap_err();

        assert!(matches!(err, EntityError::Dispatch(ref inner) if inner.code == "offline"));
        assert_eq!(entity.attributes(), &before);
    }

    #[test]
    fn missing_id_fails_before_dispatch() {
        let mut entity = Entity::new(attrs([("name", "x")]), Arc::new(RecordingDispatch::new()));
        let mut called = false;

        let err = dispatch_then_apply(
            &mut entity,
            EntityKind::Filter,
            "delete",
            |_, _| {
                called = true;
                Ok(())
            },
            |_| {},
        )
        .unwrap_err();

        assert_eq!(err, EntityError::KeyNotFound("id".to_string()));
        assert!(!called);
    }

    #[test]
    fn reorder_payload_is_a_single_element_batch() {
        let payload = reorder_payload(&AttrValue::Int(5), "section_order", &AttrValue::Int(2));
        assert_eq!(payload.len(), 1);
        assert_eq!(payload[0]["id"], AttrValue::Int(5));
        assert_eq!(payload[0]["section_order"], AttrValue::Int(2));
    }
}
