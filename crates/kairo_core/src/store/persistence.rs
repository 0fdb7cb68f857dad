//! Persistence adapter between the state tree and key-value storage.
//!
//! # Responsibility
//! - Rehydrate persisted slices at startup, one key at a time.
//! - Serialize one slice per call after a reduce touched it.
//!
//! # Invariants
//! - A missing or corrupt key falls back to its default without affecting
//!   other keys.
//! - First use is detected by marker presence, never by marker value.
//! - There is no transaction across keys.

use crate::model::inbox::{Message, Notification};
use crate::model::settings::Settings;
use crate::model::state::AppState;
use crate::model::task::Task;
use crate::repo::kv_repo::{KeyValueStore, KvError};
use crate::store::slice::Slice;
use log::{info, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

const FIRST_TIME_MARKER_VALUE: &str = "false";

/// Slices read back from storage.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistedState {
    pub client_tasks: Vec<Task>,
    pub personal_tasks: Vec<Task>,
    pub settings: Settings,
    pub notifications: Vec<Notification>,
    pub messages: Vec<Message>,
    pub task_templates: Vec<Value>,
    pub is_first_time_user: bool,
    /// Keys that were present but unreadable and fell back to defaults.
    pub fallbacks: Vec<Slice>,
}

impl Default for PersistedState {
    fn default() -> Self {
        Self {
            client_tasks: Vec::new(),
            personal_tasks: Vec::new(),
            settings: Settings::default(),
            notifications: Vec::new(),
            messages: Vec::new(),
            task_templates: Vec::new(),
            is_first_time_user: true,
            fallbacks: Vec::new(),
        }
    }
}

/// Failure to mirror one slice.
#[derive(Debug)]
pub enum PersistError {
    Encode {
        slice: Slice,
        source: serde_json::Error,
    },
    Storage {
        slice: Slice,
        source: KvError,
    },
}

impl Display for PersistError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Encode { slice, source } => {
                write!(f, "failed to encode `{}`: {source}", slice.storage_key())
            }
            Self::Storage { slice, source } => {
                write!(f, "failed to write `{}`: {source}", slice.storage_key())
            }
        }
    }
}

impl Error for PersistError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Encode { source, .. } => Some(source),
            Self::Storage { source, .. } => Some(source),
        }
    }
}

/// Reads and writes state slices through a [`KeyValueStore`].
pub struct PersistenceAdapter<S> {
    storage: S,
}

impl<S: KeyValueStore> PersistenceAdapter<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Reads every persisted key independently.
    ///
    /// Never fails: absent keys yield defaults silently, unreadable keys yield
    /// defaults and are listed in [`PersistedState::fallbacks`].
    pub fn rehydrate(&self) -> PersistedState {
        let mut fallbacks = Vec::new();
        let mut persisted = PersistedState::default();

        if let Some(tasks) = self.load(Slice::ClientTasks, &mut fallbacks) {
            persisted.client_tasks = tasks;
        }
        if let Some(tasks) = self.load(Slice::PersonalTasks, &mut fallbacks) {
            persisted.personal_tasks = tasks;
        }
        if let Some(settings) = self.load(Slice::Settings, &mut fallbacks) {
            persisted.settings = settings;
        }
        if let Some(items) = self.load(Slice::Notifications, &mut fallbacks) {
            persisted.notifications = items;
        }
        if let Some(items) = self.load(Slice::Messages, &mut fallbacks) {
            persisted.messages = items;
        }
        if let Some(templates) = self.load(Slice::TaskTemplates, &mut fallbacks) {
            persisted.task_templates = templates;
        }

        let marker_key = Slice::FirstTimeUser.storage_key();
        persisted.is_first_time_user = match self.storage.contains_key(marker_key) {
            Ok(present) => !present,
            Err(err) => {
                warn!("event=rehydrate_slice module=store status=fallback key={marker_key} error={err}");
                fallbacks.push(Slice::FirstTimeUser);
                true
            }
        };

        info!(
            "event=rehydrate module=store status=ok client_tasks={} personal_tasks={} notifications={} messages={} first_time_user={} fallbacks={}",
            persisted.client_tasks.len(),
            persisted.personal_tasks.len(),
            persisted.notifications.len(),
            persisted.messages.len(),
            persisted.is_first_time_user,
            fallbacks.len()
        );
        persisted.fallbacks = fallbacks;
        persisted
    }

    /// Writes the current value of `slice` from `state`.
    pub fn persist(&self, slice: Slice, state: &AppState) -> Result<(), PersistError> {
        match slice {
            Slice::ClientTasks => self.write(slice, state.client_tasks.as_ref()),
            Slice::PersonalTasks => self.write(slice, state.personal_tasks.as_ref()),
            Slice::Settings => self.write(slice, state.settings.as_ref()),
            Slice::Notifications => self.write(slice, state.notifications.as_ref()),
            Slice::Messages => self.write(slice, state.messages.as_ref()),
            Slice::TaskTemplates => self.write(slice, state.task_templates.as_ref()),
            Slice::FirstTimeUser => {
                let key = slice.storage_key();
                let result = if state.is_first_time_user {
                    self.storage.remove_item(key)
                } else {
                    self.storage.set_item(key, FIRST_TIME_MARKER_VALUE)
                };
                result.map_err(|source| PersistError::Storage { slice, source })
            }
        }
    }

    fn write<T: Serialize + ?Sized>(&self, slice: Slice, value: &T) -> Result<(), PersistError> {
        let encoded = serde_json::to_string(value)
            .map_err(|source| PersistError::Encode { slice, source })?;
        self.storage
            .set_item(slice.storage_key(), &encoded)
            .map_err(|source| PersistError::Storage { slice, source })
    }

    fn load<T: DeserializeOwned>(&self, slice: Slice, fallbacks: &mut Vec<Slice>) -> Option<T> {
        let key = slice.storage_key();
        let raw = match self.storage.get_item(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(err) => {
                warn!("event=rehydrate_slice module=store status=fallback key={key} error_code=read_failed error={err}");
                fallbacks.push(slice);
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(
                    "event=rehydrate_slice module=store status=fallback key={key} error_code=parse_failed value_len={} error={err}",
                    raw.len()
                );
                fallbacks.push(slice);
                None
            }
        }
    }
}
