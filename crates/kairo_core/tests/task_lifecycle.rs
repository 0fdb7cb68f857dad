use chrono::{TimeZone, Utc};
use kairo_core::query::{board_columns, client_task_list, TaskFilter};
use kairo_core::{
    Action, Clock, FixedClock, KeyValueStore, MemoryKvStore, Store, Task, TaskDraft, TaskKind,
    TaskService, TaskServiceError, TaskStatus,
};
use std::collections::HashSet;

fn clock() -> FixedClock {
    FixedClock::new(Utc.with_ymd_and_hms(2025, 6, 15, 10, 0, 0).unwrap())
}

#[test]
fn creating_many_tasks_in_one_millisecond_yields_distinct_ids() {
    let mut store = Store::new(MemoryKvStore::new(), clock().today());
    let mut service = TaskService::new(&mut store, clock());

    let ids: Vec<i64> = (0..25)
        .map(|n| {
            let kind = if n % 2 == 0 { TaskKind::Client } else { TaskKind::Personal };
            service.create_task(kind, TaskDraft::new(format!("task {n}"))).unwrap()
        })
        .collect();

    let unique: HashSet<i64> = ids.iter().copied().collect();
    assert_eq!(unique.len(), ids.len());
    assert_eq!(ids[0], clock().now().timestamp_millis());
    assert_eq!(service.state().client_tasks.len(), 13);
    assert_eq!(service.state().personal_tasks.len(), 12);
}

#[test]
fn deleting_the_edited_client_task_clears_the_edit_target() {
    let storage = MemoryKvStore::new();
    let mut store = Store::new(&storage, clock().today());
    let mut service = TaskService::new(&mut store, clock());

    let keep = service.create_task(TaskKind::Client, TaskDraft::new("Keep")).unwrap();
    let doomed = service.create_task(TaskKind::Client, TaskDraft::new("Doomed")).unwrap();
    let personal = service.create_task(TaskKind::Personal, TaskDraft::new("Walk")).unwrap();
    service.open_edit_form(doomed).unwrap();
    assert_eq!(service.state().editing_task, Some(doomed));

    service.delete_task(doomed).unwrap();
    let state = service.state();
    assert_eq!(state.editing_task, None);
    assert!(state.find_task(doomed).is_none());
    assert!(state.find_task(keep).is_some());
    assert!(state.find_task(personal).is_some());
    assert_eq!(
        service.delete_task(doomed),
        Err(TaskServiceError::TaskNotFound(doomed))
    );

    let stored: Vec<Task> =
        serde_json::from_str(&storage.get_item("clientTasks").unwrap().unwrap()).unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id, keep);
}

#[test]
fn editing_through_the_form_updates_in_place() {
    let mut store = Store::new(MemoryKvStore::new(), clock().today());
    let mut service = TaskService::new(&mut store, clock());
    let id = service.create_task(TaskKind::Client, TaskDraft::new("Draft")).unwrap();

    service.open_edit_form(id).unwrap();
    let mut draft = TaskDraft::from_task(service.state().editing_task().unwrap());
    draft.project_name = "Final".into();
    draft.client_name = Some("Acme".into());
    service.submit_form(draft).unwrap();

    let state = service.state();
    assert_eq!(state.client_tasks.len(), 1);
    assert_eq!(state.client_tasks[0].project_name, "Final");
    assert!(!state.ui.show_task_modal);

    let filter = TaskFilter {
        search: "acme".into(),
        ..TaskFilter::default()
    };
    assert_eq!(client_task_list(state, &filter).len(), 1);
}

#[test]
fn board_drop_moves_task_between_columns() {
    let mut store = Store::new(MemoryKvStore::new(), clock().today());
    let mut service = TaskService::new(&mut store, clock());
    let id = service.create_task(TaskKind::Personal, TaskDraft::new("Read")).unwrap();

    service.move_to_status(id, TaskStatus::Review).unwrap();
    let columns = board_columns(service.state());
    let review = columns
        .iter()
        .find(|column| column.status == TaskStatus::Review)
        .unwrap();
    assert_eq!(review.tasks[0].id, id);
    assert!(columns[0].tasks.is_empty());
}

#[test]
fn invalid_drafts_are_rejected_before_reaching_state() {
    let storage = MemoryKvStore::new();
    let mut store = Store::new(&storage, clock().today());
    let mut service = TaskService::new(&mut store, clock());

    assert!(matches!(
        service.create_task(TaskKind::Personal, TaskDraft::new("   ")),
        Err(TaskServiceError::Validation(_))
    ));
    assert!(storage.keys().unwrap().is_empty());

    let mut draft = TaskDraft::new("Trip");
    draft.start_date = chrono::NaiveDate::from_ymd_opt(2025, 7, 10);
    draft.due_date = chrono::NaiveDate::from_ymd_opt(2025, 7, 1);
    let id = service.create_task(TaskKind::Personal, draft).unwrap();
    assert!(service.state().find_task(id).is_some());
}

#[test]
fn a_stored_max_id_does_not_block_new_tasks() {
    let mut store = Store::new(MemoryKvStore::new(), clock().today());
    store.dispatch(Action::SetClientTasks(vec![Task::new(i64::MAX, TaskKind::Client, "Legacy")]));
    let mut service = TaskService::new(&mut store, clock());

    let first = service.create_task(TaskKind::Client, TaskDraft::new("Fresh")).unwrap();
    let second = service.create_task(TaskKind::Personal, TaskDraft::new("Fresher")).unwrap();
    assert_eq!(first, clock().now().timestamp_millis());
    assert_eq!(second, first + 1);
    assert_eq!(service.state().client_tasks.len(), 2);
}
