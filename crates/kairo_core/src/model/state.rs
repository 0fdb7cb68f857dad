//! Root application state tree.
//!
//! # Responsibility
//! - Aggregate every slice the views read into one value.
//! - Share unchanged slices between successive states through `Arc`.
//!
//! # Invariants
//! - Exactly one `AppState` is live per store.
//! - `editing_task`, when set, names a task present in one of the collections.
//! - UI flags are independent; several overlays may be open at once.

use crate::model::inbox::{Message, Notification};
use crate::model::settings::Settings;
use crate::model::task::{Task, TaskId, TaskKind};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// Top-level view identifiers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Page {
    #[default]
    Dashboard,
    Client,
    Personal,
    DueSoon,
    KairoBoard,
    Calendar,
    Analytics,
    About,
}

impl Page {
    pub const ALL: [Page; 8] = [
        Self::Dashboard,
        Self::Client,
        Self::Personal,
        Self::DueSoon,
        Self::KairoBoard,
        Self::Calendar,
        Self::Analytics,
        Self::About,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Client => "client",
            Self::Personal => "personal",
            Self::DueSoon => "due-soon",
            Self::KairoBoard => "kairo-board",
            Self::Calendar => "calendar",
            Self::Analytics => "analytics",
            Self::About => "about",
        }
    }
}

/// Visibility of modals and panels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UiFlags {
    pub show_task_modal: bool,
    pub show_settings_modal: bool,
    pub show_inbox_modal: bool,
    pub show_notifications_panel: bool,
    pub show_task_type_selector: bool,
}

/// The whole application state.
///
/// Cloning is cheap: collections are reference counted and only replaced
/// slices get new allocations.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    pub current_page: Page,
    pub client_tasks: Arc<Vec<Task>>,
    pub personal_tasks: Arc<Vec<Task>>,
    pub task_templates: Arc<Vec<Value>>,
    pub settings: Arc<Settings>,
    pub editing_task: Option<TaskId>,
    /// Kind preselected for the task form.
    pub task_type: TaskKind,
    pub tags: Arc<Vec<String>>,
    pub notifications: Arc<Vec<Notification>>,
    pub messages: Arc<Vec<Message>>,
    pub calendar_date: NaiveDate,
    pub sort_client_tasks_by_due_date: bool,
    pub selected_calendar_date: Option<NaiveDate>,
    pub is_first_time_user: bool,
    #[serde(flatten)]
    pub ui: UiFlags,
}

impl AppState {
    /// Hard-coded startup defaults, before rehydration.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            current_page: Page::Dashboard,
            client_tasks: Arc::new(Vec::new()),
            personal_tasks: Arc::new(Vec::new()),
            task_templates: Arc::new(Vec::new()),
            settings: Arc::new(Settings::default()),
            editing_task: None,
            task_type: TaskKind::Client,
            tags: Arc::new(Vec::new()),
            notifications: Arc::new(Vec::new()),
            messages: Arc::new(Vec::new()),
            calendar_date: today,
            sort_client_tasks_by_due_date: false,
            selected_calendar_date: None,
            is_first_time_user: true,
            ui: UiFlags::default(),
        }
    }

    /// Collection holding tasks of `kind`.
    pub fn tasks(&self, kind: TaskKind) -> &Arc<Vec<Task>> {
        match kind {
            TaskKind::Client => &self.client_tasks,
            TaskKind::Personal => &self.personal_tasks,
        }
    }

    /// Client tasks followed by personal tasks.
    pub fn all_tasks(&self) -> impl Iterator<Item = &Task> {
        self.client_tasks.iter().chain(self.personal_tasks.iter())
    }

    pub fn find_task(&self, id: TaskId) -> Option<&Task> {
        self.all_tasks().find(|task| task.id == id)
    }

    pub fn contains_task(&self, id: TaskId) -> bool {
        self.find_task(id).is_some()
    }

    /// Task currently open in the edit form.
    pub fn editing_task(&self) -> Option<&Task> {
        self.editing_task.and_then(|id| self.find_task(id))
    }
}
