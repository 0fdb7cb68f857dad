//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose the store, its services and read models to Dart via FRB.
//! - Exchange state and read models as JSON strings.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - One store per process; `app_open` replaces it.
//! - Every state-changing call goes through the store's dispatch.

use kairo_core::query::{analytics, dashboard, due_soon_tasks, overdue_tasks};
use kairo_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, logging_status,
    ping as ping_inner, Clock, CoreConfig, OnboardingForm, OnboardingService, SqliteKvStore,
    Store, SystemClock, TaskDraft, TaskService,
};
use log::{error, info};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Mutex;

static APP: Mutex<Option<Store<SqliteKvStore>>> = Mutex::new(None);

/// Minimal health-check API for FRB smoke integration.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// # FFI contract
/// - `level`: `trace|debug|info|warn|error`, case-insensitive.
/// - `log_dir`: absolute directory for rolling log files.
/// - Returns an empty string on success and the error message otherwise.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Response envelope for every store call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppResponse {
    pub ok: bool,
    /// Human-readable diagnostics; empty when there is nothing to report.
    pub message: String,
    /// JSON payload (state snapshot or read model); empty on failure.
    pub json: String,
}

impl AppResponse {
    fn success(json: String) -> Self {
        Self {
            ok: true,
            message: String::new(),
            json,
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
            json: String::new(),
        }
    }
}

/// Opens (or reopens) the store and rehydrates it.
///
/// `db_path` falls back to `KAIRO_DB_PATH`, then to the temp directory.
/// When [`init_logging`] has not run yet, logging starts from
/// `KAIRO_LOG_LEVEL` and `KAIRO_LOG_DIR`; a failure there is reported in
/// `message` without failing the open.
#[flutter_rust_bridge::frb(sync)]
pub fn app_open(db_path: Option<String>) -> AppResponse {
    let config = CoreConfig::from_env();
    let logging_note = match logging_status() {
        Some(_) => String::new(),
        None => match config.init_logging() {
            Ok(()) => String::new(),
            Err(err) => format!("logging disabled: {err}"),
        },
    };

    let path = db_path
        .map(|raw| raw.trim().to_string())
        .filter(|raw| !raw.is_empty())
        .map(PathBuf::from)
        .unwrap_or(config.db_path);

    let storage = match SqliteKvStore::open(&path) {
        Ok(storage) => storage,
        Err(err) => {
            error!("event=app_open module=ffi status=error error={err}");
            return AppResponse::failure(format!("app_open failed: {err}"));
        }
    };
    let store = Store::open(storage, SystemClock.today());
    let snapshot = to_json(store.state());

    match APP.lock() {
        Ok(mut slot) => {
            *slot = Some(store);
            info!("event=app_open module=ffi status=ok path={}", path.display());
            AppResponse {
                message: logging_note,
                ..snapshot
            }
        }
        Err(_) => AppResponse::failure("app_open failed: store lock poisoned"),
    }
}

/// Dispatches a `{"type": ..., "payload": ...}` envelope and returns the
/// resulting state. Unknown or malformed envelopes leave state unchanged and
/// report `ok = false`.
#[flutter_rust_bridge::frb(sync)]
pub fn app_dispatch(action_json: String) -> AppResponse {
    with_store(|store| {
        if store.dispatch_json(&action_json) {
            to_json(store.state())
        } else {
            AppResponse::failure("unrecognized action")
        }
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn app_state() -> AppResponse {
    with_store(|store| to_json(store.state()))
}

#[flutter_rust_bridge::frb(sync)]
pub fn app_dashboard() -> AppResponse {
    with_store(|store| to_json(&dashboard(store.state(), SystemClock.today())))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DueSoonView<'a> {
    overdue: Vec<&'a kairo_core::Task>,
    due_soon: Vec<&'a kairo_core::Task>,
}

#[flutter_rust_bridge::frb(sync)]
pub fn app_due_soon() -> AppResponse {
    with_store(|store| {
        let today = SystemClock.today();
        let state = store.state();
        to_json(&DueSoonView {
            overdue: overdue_tasks(state.all_tasks(), today),
            due_soon: due_soon_tasks(state.all_tasks(), today),
        })
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn app_analytics() -> AppResponse {
    with_store(|store| to_json(&analytics(store.state(), SystemClock.today())))
}

/// Saves the task form (create or edit, per current state).
#[flutter_rust_bridge::frb(sync)]
pub fn app_submit_task(draft_json: String) -> AppResponse {
    let draft: TaskDraft = match serde_json::from_str(&draft_json) {
        Ok(draft) => draft,
        Err(err) => return AppResponse::failure(format!("invalid task draft: {err}")),
    };
    with_store(|store| {
        let mut service = TaskService::new(store, SystemClock);
        match service.submit_form(draft) {
            Ok(_) => to_json(service.state()),
            Err(err) => AppResponse::failure(err.to_string()),
        }
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn app_delete_task(task_id: i64) -> AppResponse {
    with_store(|store| {
        let mut service = TaskService::new(store, SystemClock);
        match service.delete_task(task_id) {
            Ok(()) => to_json(service.state()),
            Err(err) => AppResponse::failure(err.to_string()),
        }
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn app_complete_onboarding(form_json: String) -> AppResponse {
    let form: OnboardingForm = match serde_json::from_str(&form_json) {
        Ok(form) => form,
        Err(err) => return AppResponse::failure(format!("invalid onboarding form: {err}")),
    };
    with_store(|store| {
        let result = OnboardingService::new(store, SystemClock).complete(&form);
        match result {
            Ok(_) => to_json(store.state()),
            Err(err) => AppResponse::failure(err.to_string()),
        }
    })
}

fn with_store(f: impl FnOnce(&mut Store<SqliteKvStore>) -> AppResponse) -> AppResponse {
    let mut slot = match APP.lock() {
        Ok(slot) => slot,
        Err(_) => return AppResponse::failure("store lock poisoned"),
    };
    match slot.as_mut() {
        Some(store) => f(store),
        None => AppResponse::failure("store is not open; call app_open first"),
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> AppResponse {
    match serde_json::to_string(value) {
        Ok(json) => AppResponse::success(json),
        Err(err) => AppResponse::failure(format!("serialization failed: {err}")),
    }
}

#[cfg(test)]
mod tests {
    use super::{
        app_analytics, app_complete_onboarding, app_delete_task, app_dispatch, app_open,
        app_state, app_submit_task, core_version, init_logging, ping,
    };
    use serde_json::Value;

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_bad_input() {
        assert!(!init_logging("info".to_string(), String::new()).is_empty());
        assert!(!init_logging("verbose".to_string(), "/tmp/kairo-logs".to_string()).is_empty());
    }

    // Single test: the store is process-wide.
    #[test]
    fn store_round_trip_through_json_api() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("kairo.sqlite3");
        let opened = app_open(Some(db_path.to_string_lossy().into_owned()));
        assert!(opened.ok, "{}", opened.message);
        assert_eq!(kairo_core::logging_status().is_some(), opened.message.is_empty());

        let onboarded = app_complete_onboarding(r#"{"fullName":"Ada Lovelace"}"#.to_string());
        assert!(onboarded.ok, "{}", onboarded.message);

        let page = app_dispatch(r#"{"type":"SET_CURRENT_PAGE","payload":"analytics"}"#.to_string());
        assert!(page.ok, "{}", page.message);
        let unknown = app_dispatch(r#"{"type":"EXPLODE","payload":1}"#.to_string());
        assert!(!unknown.ok);

        let submitted = app_submit_task(
            r#"{"projectName":"Brand kit","totalAmount":"$1,000.00","amountPaid":"$250"}"#
                .to_string(),
        );
        assert!(submitted.ok, "{}", submitted.message);
        let state: Value = serde_json::from_str(&submitted.json).unwrap();
        let id = state["clientTasks"][0]["id"].as_i64().unwrap();

        let report: Value = serde_json::from_str(&app_analytics().json).unwrap();
        assert_eq!(report["revenue"]["outstanding"], "$750.00");

        let reopened = app_open(Some(db_path.to_string_lossy().into_owned()));
        let state: Value = serde_json::from_str(&reopened.json).unwrap();
        assert_eq!(state["isFirstTimeUser"], false);
        assert_eq!(state["settings"]["userName"], "Ada Lovelace");
        assert_eq!(state["currentPage"], "dashboard");

        assert!(app_delete_task(id).ok);
        let state: Value = serde_json::from_str(&app_state().json).unwrap();
        assert_eq!(state["clientTasks"], Value::Array(Vec::new()));
    }
}
