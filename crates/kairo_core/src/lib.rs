//! Core domain logic for Kairo.
//! This crate is the single source of truth for business invariants.

pub mod clock;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod query;
pub mod repo;
pub mod service;
pub mod store;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::CoreConfig;
pub use logging::{init_logging, logging_status, LogLevel, LoggingError};
pub use model::inbox::{Message, Notification, NotificationKind};
pub use model::settings::{NotificationPrefs, Settings, Theme};
pub use model::state::{AppState, Page, UiFlags};
pub use model::task::{Priority, Task, TaskId, TaskKind, TaskStatus, TaskValidationError};
pub use repo::kv_repo::{KeyValueStore, KvError, KvResult, MemoryKvStore, SqliteKvStore};
pub use service::inbox_service::InboxService;
pub use service::onboarding_service::{OnboardingError, OnboardingForm, OnboardingService};
pub use service::settings_service::{SettingsError, SettingsService};
pub use service::task_service::{TaskDraft, TaskService, TaskServiceError};
pub use service::ui_service::UiService;
pub use store::{Action, PersistError, PersistedState, Slice, Store};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
