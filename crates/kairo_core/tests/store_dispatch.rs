use chrono::NaiveDate;
use kairo_core::{Action, KeyValueStore, MemoryKvStore, Page, Store, Task, TaskKind};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
}

#[test]
fn only_touched_slices_are_written() {
    let storage = MemoryKvStore::new();
    let mut store = Store::open(&storage, today());

    store.dispatch(Action::SetCurrentPage(Page::Calendar));
    store.dispatch(Action::SetShowInboxModal(true));
    assert!(storage.keys().unwrap().is_empty());

    store.dispatch(Action::SetClientTasks(vec![Task::new(1, TaskKind::Client, "Site")]));
    assert_eq!(storage.keys().unwrap(), vec!["clientTasks"]);
}

#[test]
fn writing_an_equal_value_persists_nothing() {
    let storage = MemoryKvStore::new();
    let mut store = Store::open(&storage, today());
    store.dispatch(Action::SetClientTasks(vec![Task::new(1, TaskKind::Client, "Site")]));

    storage.remove_item("clientTasks").unwrap();
    let current = store.state().client_tasks.as_ref().clone();
    store.dispatch(Action::SetClientTasks(current));
    assert_eq!(storage.get_item("clientTasks").unwrap(), None);
}

#[test]
fn listeners_run_on_change_only_and_can_unsubscribe() {
    let mut store = Store::new(MemoryKvStore::new(), today());
    let calls = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&calls);
    let id = store.subscribe(move |_| {
        seen.fetch_add(1, Ordering::SeqCst);
    });

    store.dispatch(Action::SetShowTaskModal(true));
    store.dispatch(Action::SetShowTaskModal(true));
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    assert!(store.unsubscribe(id));
    assert!(!store.unsubscribe(id));
    store.dispatch(Action::SetShowTaskModal(false));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn unknown_json_envelope_is_a_no_op() {
    let storage = MemoryKvStore::new();
    let mut store = Store::open(&storage, today());
    let before = store.state().clone();

    assert!(!store.dispatch_json(r#"{"type":"DELETE_EVERYTHING","payload":null}"#));
    assert!(!store.dispatch_json(r#"{"type":"SET_CLIENT_TASKS","payload":"oops"}"#));
    assert_eq!(store.state(), &before);
    assert!(storage.keys().unwrap().is_empty());

    assert!(store.dispatch_json(r#"{"type":"SET_SORT_CLIENT_TASKS_BY_DUE_DATE","payload":true}"#));
    assert!(store.state().sort_client_tasks_by_due_date);
}
