use kairo_core::{KeyValueStore, KvError, SqliteKvStore};

#[test]
fn sqlite_store_upserts_and_lists_keys_in_order() {
    let store = SqliteKvStore::open_in_memory().unwrap();
    store.set_item("settings", "{}").unwrap();
    store.set_item("clientTasks", "[]").unwrap();
    store.set_item("settings", r#"{"darkMode":true}"#).unwrap();

    assert_eq!(
        store.get_item("settings").unwrap().as_deref(),
        Some(r#"{"darkMode":true}"#)
    );
    assert_eq!(store.keys().unwrap(), vec!["clientTasks", "settings"]);
}

#[test]
fn removing_missing_key_is_not_an_error() {
    let store = SqliteKvStore::open_in_memory().unwrap();
    store.remove_item("firstTimeUser").unwrap();
    assert_eq!(store.get_item("firstTimeUser").unwrap(), None);
    assert!(!store.contains_key("firstTimeUser").unwrap());
}

#[test]
fn values_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("kairo.sqlite3");

    let store = SqliteKvStore::open(&path).unwrap();
    store.set_item("firstTimeUser", "false").unwrap();
    drop(store);

    let reopened = SqliteKvStore::open(&path).unwrap();
    assert_eq!(
        reopened.get_item("firstTimeUser").unwrap().as_deref(),
        Some("false")
    );
}

#[test]
fn blank_key_is_rejected() {
    let store = SqliteKvStore::open_in_memory().unwrap();
    assert!(matches!(store.get_item(""), Err(KvError::InvalidKey)));
}
