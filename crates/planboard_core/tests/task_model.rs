use planboard_core::{CoreError, NewTask, TaskId, TaskStatus, ValidationError, Workspace};

#[test]
fn task_ids_are_distinct_and_increase_in_creation_order() {
    let mut ws = Workspace::default();
    let ids: Vec<TaskId> = (0..10)
        .map(|i| ws.create_task(NewTask::named(format!("t{i}"))).unwrap())
        .collect();

    for pair in ids.windows(2) {
        assert!(pair[0] < pair[1], "ids must increase: {pair:?}");
    }
    assert_eq!(ws.live_task_ids(), ids);
}

#[test]
fn deleted_ids_are_not_handed_out_again() {
    let mut ws = Workspace::default();
    let first = ws.create_task(NewTask::named("a")).unwrap();
    ws.delete_task(first).unwrap();

    let second = ws.create_task(NewTask::named("b")).unwrap();
    assert!(second > first);
    assert!(!ws.is_task_id_live(first));
    assert!(ws.is_task_id_live(second));
}

#[test]
fn create_rejects_each_invalid_field() {
    let mut ws = Workspace::default();

    let cases = [
        NewTask::named("n".repeat(31)),
        NewTask::named("ok").description("d".repeat(151)),
        NewTask::named("ok").status("blocked"),
        NewTask::named("ok").due_date("31-12-2025"),
    ];
    for input in cases {
        let err = ws.create_task(input).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)), "got {err:?}");
    }
    assert!(ws.live_task_ids().is_empty());
}

#[test]
fn valid_status_round_trips_and_invalid_keeps_previous() {
    let mut ws = Workspace::default();
    let id = ws.create_task(NewTask::named("t")).unwrap();

    ws.task_mut(id).unwrap().set_status("doing").unwrap();
    assert_eq!(ws.task(id).unwrap().status(), TaskStatus::Doing);

    let err = ws.task_mut(id).unwrap().set_status("blocked").unwrap_err();
    assert_eq!(err, ValidationError::InvalidStatus("blocked".to_string()));
    assert_eq!(ws.task(id).unwrap().status(), TaskStatus::Doing);
}

#[test]
fn failed_setters_do_not_partially_mutate() {
    let mut ws = Workspace::default();
    let id = ws
        .create_task(
            NewTask::named("keep")
                .description("kept")
                .due_date("2025-06-01"),
        )
        .unwrap();
    let before = ws.task(id).unwrap().clone();

    let task = ws.task_mut(id).unwrap();
    task.set_name("x".repeat(31)).unwrap_err();
    task.set_description("y".repeat(151)).unwrap_err();
    task.set_due_date(Some("2025-02-30")).unwrap_err();

    assert_eq!(ws.task(id).unwrap(), &before);
}

#[test]
fn due_date_can_be_cleared() {
    let mut ws = Workspace::default();
    let id = ws
        .create_task(NewTask::named("t").due_date("2030-01-01"))
        .unwrap();

    ws.task_mut(id).unwrap().set_due_date(None).unwrap();
    assert_eq!(ws.task(id).unwrap().due_date(), None);
}

#[test]
fn empty_due_date_field_clears_date() {
    let mut ws = Workspace::default();
    let id = ws
        .create_task(NewTask::named("t").due_date("2030-01-01"))
        .unwrap();

    ws.task_mut(id).unwrap().set_field("due_date", "").unwrap();
    assert_eq!(ws.task(id).unwrap().due_date(), None);
    assert_eq!(ws.task(id).unwrap().due_date_text(), None);
}

#[test]
fn unpadded_due_date_is_accepted_and_normalized() {
    let mut ws = Workspace::default();
    let id = ws
        .create_task(NewTask::named("t").due_date("2024-1-5"))
        .unwrap();

    assert_eq!(
        ws.task(id).unwrap().due_date_text().as_deref(),
        Some("2024-01-05")
    );
    assert_eq!(
        ws.task(id).unwrap().to_string(),
        "Task: t -  | Status: todo | Due: 2024-01-05"
    );
}

#[test]
fn id_field_is_immutable() {
    let mut ws = Workspace::default();
    let id = ws.create_task(NewTask::named("t")).unwrap();

    let err = ws.task_mut(id).unwrap().set_field("id", "42").unwrap_err();
    assert_eq!(err, CoreError::ImmutableField("id"));
    assert_eq!(ws.task(id).unwrap().id(), id);
}

#[test]
fn task_serializes_with_expected_wire_fields() {
    let mut ws = Workspace::default();
    let id = ws
        .create_task(
            NewTask::named("ship")
                .description("release notes")
                .status("done")
                .due_date("2026-03-15"),
        )
        .unwrap();

    let json = serde_json::to_value(ws.task(id).unwrap()).unwrap();
    assert_eq!(json["id"], id.get());
    assert_eq!(json["name"], "ship");
    assert_eq!(json["status"], "done");
    assert_eq!(json["due_date"], "2026-03-15");
    assert!(json["project"].is_null());
}
