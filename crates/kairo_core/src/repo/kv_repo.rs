//! Flat key-value storage contracts and implementations.
//!
//! # Responsibility
//! - Provide a browser-`localStorage`-like namespace: text values under text keys.
//! - Keep SQL details inside the storage boundary.
//!
//! # Invariants
//! - Keys are non-empty after trimming.
//! - `set_item` replaces any existing value; `remove_item` is idempotent.

use crate::db::{open_db, open_db_in_memory, DbError};
use rusqlite::{params, Connection, OptionalExtension};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

pub type KvResult<T> = Result<T, KvError>;

/// Storage-level failure.
#[derive(Debug)]
pub enum KvError {
    /// Key is empty after trimming.
    InvalidKey,
    Db(DbError),
}

impl Display for KvError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidKey => write!(f, "storage key cannot be empty"),
            Self::Db(err) => write!(f, "{err}"),
        }
    }
}

impl Error for KvError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidKey => None,
            Self::Db(err) => Some(err),
        }
    }
}

impl From<DbError> for KvError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for KvError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Durable text storage scoped to one profile.
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> KvResult<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> KvResult<()>;
    fn remove_item(&self, key: &str) -> KvResult<()>;
    /// All keys in ascending order.
    fn keys(&self) -> KvResult<Vec<String>>;

    fn contains_key(&self, key: &str) -> KvResult<bool> {
        Ok(self.get_item(key)?.is_some())
    }
}

fn checked_key(key: &str) -> KvResult<&str> {
    if key.trim().is_empty() {
        return Err(KvError::InvalidKey);
    }
    Ok(key)
}

/// SQLite-backed store over the `kv_store` table.
pub struct SqliteKvStore {
    conn: Connection,
}

impl SqliteKvStore {
    /// Wraps a connection that already has migrations applied.
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    /// Opens the storage file at `path`, creating it when missing.
    pub fn open(path: impl AsRef<Path>) -> KvResult<Self> {
        Ok(Self::new(open_db(path)?))
    }

    pub fn open_in_memory() -> KvResult<Self> {
        Ok(Self::new(open_db_in_memory()?))
    }
}

impl KeyValueStore for SqliteKvStore {
    fn get_item(&self, key: &str) -> KvResult<Option<String>> {
        let key = checked_key(key)?;
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set_item(&self, key: &str, value: &str) -> KvResult<()> {
        let key = checked_key(key)?;
        self.conn.execute(
            "INSERT INTO kv_store (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> KvResult<()> {
        let key = checked_key(key)?;
        self.conn
            .execute("DELETE FROM kv_store WHERE key = ?1;", [key])?;
        Ok(())
    }

    fn keys(&self) -> KvResult<Vec<String>> {
        let mut stmt = self.conn.prepare("SELECT key FROM kv_store ORDER BY key ASC;")?;
        let keys = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(keys)
    }
}

/// Process-local store; contents vanish with the value.
#[derive(Debug, Default)]
pub struct MemoryKvStore {
    items: RefCell<BTreeMap<String, String>>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryKvStore {
    fn get_item(&self, key: &str) -> KvResult<Option<String>> {
        let key = checked_key(key)?;
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> KvResult<()> {
        let key = checked_key(key)?;
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> KvResult<()> {
        let key = checked_key(key)?;
        self.items.borrow_mut().remove(key);
        Ok(())
    }

    fn keys(&self) -> KvResult<Vec<String>> {
        Ok(self.items.borrow().keys().cloned().collect())
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get_item(&self, key: &str) -> KvResult<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> KvResult<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> KvResult<()> {
        (**self).remove_item(key)
    }

    fn keys(&self) -> KvResult<Vec<String>> {
        (**self).keys()
    }
}

#[cfg(test)]
mod tests {
    use super::{KeyValueStore, KvError, MemoryKvStore};

    #[test]
    fn memory_store_replaces_and_removes_values() {
        let store = MemoryKvStore::new();
        store.set_item("settings", "{}").unwrap();
        store.set_item("settings", "{\"darkMode\":true}").unwrap();
        assert_eq!(
            store.get_item("settings").unwrap().as_deref(),
            Some("{\"darkMode\":true}")
        );

        store.remove_item("settings").unwrap();
        store.remove_item("settings").unwrap();
        assert!(!store.contains_key("settings").unwrap());
    }

    #[test]
    fn blank_keys_are_rejected() {
        let store = MemoryKvStore::new();
        let err = store.set_item("  ", "x").unwrap_err();
        assert!(matches!(err, KvError::InvalidKey));
    }
}
