use std::sync::Arc;
use taskentity_core::{
    attrs, AttrMap, AttrValue, Editable, Entity, EntityHandle, Project, RecordingDispatch,
    Section,
};

fn new_project(dispatch: &Arc<RecordingDispatch>, data: AttrMap) -> Project {
    Project::new(Entity::new(data, dispatch.clone()))
}

fn new_section(dispatch: &Arc<RecordingDispatch>, data: AttrMap) -> Section {
    Section::new(Entity::new(data, dispatch.clone()))
}

#[test]
fn project_archive_round_trip_toggles_flag() {
    let dispatch = Arc::new(RecordingDispatch::new());
    let mut project = new_project(&dispatch, attrs([("id", 20), ("is_archived", 0)]));

    project.archive().unwrap();
    assert_eq!(project.get("is_archived").unwrap(), &AttrValue::Int(1));
    project.unarchive().unwrap();
    assert_eq!(project.get("is_archived").unwrap(), &AttrValue::Int(0));

    let calls = dispatch.calls();
    assert!(calls.iter().all(|call| call.resource == "projects"));
    assert_eq!(calls.len(), 2);
}

#[test]
fn project_move_sends_parent_and_writes_it_locally() {
    let dispatch = Arc::new(RecordingDispatch::new());
    let mut project = new_project(&dispatch, attrs([("id", 21), ("parent_id", 1)]));

    project.move_to(30).unwrap();

    let call = dispatch.last_call().unwrap();
    assert_eq!(call.command, "move");
    assert_eq!(call.args, attrs([("id", 21), ("parent_id", 30)]));
    assert_eq!(project.get("parent_id").unwrap(), &AttrValue::Int(30));
}

#[test]
fn project_reorder_uses_child_order_batch() {
    let dispatch = Arc::new(RecordingDispatch::new());
    let mut project = new_project(&dispatch, attrs([("id", 22)]));

    project.reorder(7).unwrap();

    assert_eq!(
        dispatch.last_call().unwrap().args["projects"],
        AttrValue::List(vec![AttrValue::Map(attrs([("id", 22), ("child_order", 7)]))])
    );
    assert_eq!(project.get("child_order").unwrap(), &AttrValue::Int(7));
}

#[test]
fn project_share_and_take_ownership_are_dispatch_only() {
    let dispatch = Arc::new(RecordingDispatch::new());
    let mut project = new_project(&dispatch, attrs([("id", AttrValue::from(23)), ("name", AttrValue::from("Home"))]));
    let before = project.attributes().clone();

    project.share("ada@example.com").unwrap();
    let share = dispatch.last_call().unwrap();
    assert_eq!(share.command, "share");
    assert_eq!(share.args["email"], AttrValue::from("ada@example.com"));

    project.take_ownership().unwrap();
    assert_eq!(dispatch.last_call().unwrap().command, "take_ownership");
    assert_eq!(project.attributes(), &before);
}

#[test]
fn project_update_and_delete_follow_shared_contract() {
    let dispatch = Arc::new(RecordingDispatch::new());
    let mut project = new_project(&dispatch, attrs([("id", AttrValue::from(24)), ("name", AttrValue::from("Old"))]));

    project.update(attrs([("name", "New"), ("color", "red")])).unwrap();
    project.delete().unwrap();

    assert_eq!(
        project.attributes(),
        &attrs([
            ("color", AttrValue::from("red")),
            ("id", AttrValue::Int(24)),
            ("is_deleted", AttrValue::Int(1)),
            ("name", AttrValue::from("New")),
        ])
    );
}

#[test]
fn section_move_to_project_updates_project_id() {
    let dispatch = Arc::new(RecordingDispatch::new());
    let mut section = new_section(&dispatch, attrs([("id", 40), ("project_id", 2)]));

    section.move_to(9).unwrap();

    let call = dispatch.last_call().unwrap();
    assert_eq!((call.resource, call.command), ("sections", "move"));
    assert_eq!(call.args, attrs([("id", 40), ("project_id", 9)]));
    assert_eq!(section.get("project_id").unwrap(), &AttrValue::Int(9));
}

#[test]
fn section_reorder_uses_section_order_field() {
    let dispatch = Arc::new(RecordingDispatch::new());
    let mut section = new_section(&dispatch, attrs([("id", 41), ("section_order", 1)]));

    section.reorder(3).unwrap();

    assert_eq!(
        dispatch.last_call().unwrap().args["sections"],
        AttrValue::List(vec![AttrValue::Map(attrs([("id", 41), ("section_order", 3)]))])
    );
    assert_eq!(section.get("section_order").unwrap(), &AttrValue::Int(3));
    assert!(!section.contains("child_order"));
}

#[test]
fn section_archive_forwards_date_but_stores_only_flag() {
    let dispatch = Arc::new(RecordingDispatch::new());
    let mut section = new_section(&dispatch, attrs([("id", 42)]));

    section
        .archive(Some(AttrValue::from("2026-10-18T12:00:00Z")))
        .unwrap();

    assert_eq!(
        dispatch.last_call().unwrap().args["date_archived"],
        AttrValue::from("2026-10-18T12:00:00Z")
    );
    assert_eq!(
        section.attributes(),
        &attrs([("id", 42), ("is_archived", 1)])
    );

    section.unarchive().unwrap();
    assert_eq!(section.get("is_archived").unwrap(), &AttrValue::Int(0));
}
