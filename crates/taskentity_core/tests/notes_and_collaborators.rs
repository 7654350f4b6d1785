use std::sync::Arc;
use taskentity_core::{
    attrs, AnyEntity, AttrValue, Collaborator, Editable, Entity, EntityError, EntityHandle,
    EntityKind, Note, NoteKind, RecordingDispatch,
};

#[test]
fn project_note_delete_routes_to_project_notes() {
    let dispatch = Arc::new(RecordingDispatch::new());
    let mut note = Note::project_note(Entity::new(attrs([("id", 50)]), dispatch.clone()));

    note.delete().unwrap();

    let calls = dispatch.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!((calls[0].resource, calls[0].command), ("project_notes", "delete"));
    assert_eq!(note.get("is_deleted").unwrap(), &AttrValue::Int(1));
}

#[test]
fn item_note_update_routes_to_notes() {
    let dispatch = Arc::new(RecordingDispatch::new());
    let mut note = Note::item_note(Entity::new(
        attrs([("id", AttrValue::Int(51)), ("content", AttrValue::from("draft"))]),
        dispatch.clone(),
    ));

    note.update(attrs([("content", "final")])).unwrap();

    let call = dispatch.last_call().unwrap();
    assert_eq!((call.resource, call.command), ("notes", "update"));
    assert_eq!(note.get("content").unwrap(), &AttrValue::from("final"));
    assert_eq!(note.kind(), EntityKind::Note);
}

#[test]
fn note_binding_follows_construction_kind() {
    let dispatch = Arc::new(RecordingDispatch::new());
    let item_note = AnyEntity::from_kind(EntityKind::Note, attrs([("id", 1)]), dispatch.clone());
    let project_note =
        AnyEntity::from_kind(EntityKind::ProjectNote, attrs([("id", 2)]), dispatch.clone());

    let AnyEntity::Note(item_note) = item_note else {
        panic!("note kind should build a note variant");
    };
    let AnyEntity::Note(project_note) = project_note else {
        panic!("project note kind should build a note variant");
    };
    assert_eq!(item_note.binding(), NoteKind::ItemNote);
    assert_eq!(project_note.binding(), NoteKind::ProjectNote);
    assert!(project_note.describe().starts_with("ProjectNote("));
}

#[test]
fn tagged_union_delete_reaches_the_bound_note_group() {
    let dispatch = Arc::new(RecordingDispatch::new());
    let mut note =
        AnyEntity::from_kind(EntityKind::ProjectNote, attrs([("id", 3)]), dispatch.clone());

    note.delete().unwrap();

    assert_eq!(dispatch.last_call().unwrap().resource, "project_notes");
    assert_eq!(note.entity().get("is_deleted").unwrap(), &AttrValue::Int(1));
}

#[test]
fn collaborator_delete_is_keyed_by_project_and_email() {
    let dispatch = Arc::new(RecordingDispatch::new());
    let mut collaborator = Collaborator::new(Entity::new(
        attrs([
            ("id", AttrValue::Int(60)),
            ("email", AttrValue::from("ada@example.com")),
        ]),
        dispatch.clone(),
    ));
    let before = collaborator.attributes().clone();

    collaborator.delete(AttrValue::Int(70)).unwrap();

    let call = dispatch.last_call().unwrap();
    assert_eq!((call.resource, call.command), ("collaborators", "delete"));
    assert_eq!(
        call.args,
        attrs([
            ("email", AttrValue::from("ada@example.com")),
            ("project_id", AttrValue::Int(70)),
        ])
    );
    assert_eq!(collaborator.attributes(), &before);
}

#[test]
fn collaborator_without_email_fails_before_dispatch() {
    let dispatch = Arc::new(RecordingDispatch::new());
    let mut collaborator = Collaborator::new(Entity::new(attrs([("id", 61)]), dispatch.clone()));

    let err = collaborator.delete(AttrValue::Int(70)).unwrap_err();

    assert_eq!(err, EntityError::KeyNotFound("email".to_string()));
    assert!(dispatch.calls().is_empty());
}

#[test]
fn tagged_union_rejects_id_based_collaborator_delete() {
    let dispatch = Arc::new(RecordingDispatch::new());
    let mut collaborator = AnyEntity::from_kind(
        EntityKind::Collaborator,
        attrs([("email", "ada@example.com")]),
        dispatch.clone(),
    );

    let err = collaborator.delete().unwrap_err();

    assert!(matches!(
        err,
        EntityError::Unsupported {
            kind: EntityKind::Collaborator,
            operation: "delete"
        }
    ));
    assert!(dispatch.calls().is_empty());
}
