//! Action vocabulary.
//!
//! Every action replaces exactly one slice of [`AppState`](crate::AppState)
//! with a caller-computed value. JSON envelopes use the shape
//! `{"type": "SET_CLIENT_TASKS", "payload": [...]}`.

use crate::model::inbox::{Message, Notification};
use crate::model::lenient::{optional_date, required_date};
use crate::model::settings::Settings;
use crate::model::state::Page;
use crate::model::task::{Task, TaskId, TaskKind};
use crate::store::persistence::PersistedState;
use chrono::NaiveDate;
use log::debug;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    SetCurrentPage(Page),
    SetClientTasks(Vec<Task>),
    SetPersonalTasks(Vec<Task>),
    SetTaskTemplates(Vec<Value>),
    SetSettings(Settings),
    /// Reference by id; `None` closes the edit target.
    SetEditingTask(Option<TaskId>),
    SetTaskType(TaskKind),
    SetTags(Vec<String>),
    SetNotifications(Vec<Notification>),
    SetMessages(Vec<Message>),
    SetCalendarDate(#[serde(deserialize_with = "required_date")] NaiveDate),
    SetSelectedCalendarDate(#[serde(deserialize_with = "optional_date")] Option<NaiveDate>),
    SetSortClientTasksByDueDate(bool),
    SetFirstTimeUser(bool),
    SetShowTaskModal(bool),
    SetShowSettingsModal(bool),
    SetShowInboxModal(bool),
    SetShowNotificationsPanel(bool),
    SetShowTaskTypeSelector(bool),
    /// Replaces persisted slices with what storage holds. Built by the store,
    /// never decoded from JSON.
    #[serde(skip)]
    Rehydrate(PersistedState),
}

impl Action {
    /// Decodes a JSON envelope.
    ///
    /// Unknown action types and undecodable payloads yield `None`; callers
    /// treat that as a no-op.
    pub fn decode(raw: &str) -> Option<Self> {
        match serde_json::from_str::<Self>(raw) {
            Ok(action) => Some(action),
            Err(err) => {
                debug!("event=action_decode module=store status=ignored error={err}");
                None
            }
        }
    }

    /// Wire name, used in log events.
    pub fn name(&self) -> &'static str {
        match self {
            Self::SetCurrentPage(_) => "SET_CURRENT_PAGE",
            Self::SetClientTasks(_) => "SET_CLIENT_TASKS",
            Self::SetPersonalTasks(_) => "SET_PERSONAL_TASKS",
            Self::SetTaskTemplates(_) => "SET_TASK_TEMPLATES",
            Self::SetSettings(_) => "SET_SETTINGS",
            Self::SetEditingTask(_) => "SET_EDITING_TASK",
            Self::SetTaskType(_) => "SET_TASK_TYPE",
            Self::SetTags(_) => "SET_TAGS",
            Self::SetNotifications(_) => "SET_NOTIFICATIONS",
            Self::SetMessages(_) => "SET_MESSAGES",
            Self::SetCalendarDate(_) => "SET_CALENDAR_DATE",
            Self::SetSelectedCalendarDate(_) => "SET_SELECTED_CALENDAR_DATE",
            Self::SetSortClientTasksByDueDate(_) => "SET_SORT_CLIENT_TASKS_BY_DUE_DATE",
            Self::SetFirstTimeUser(_) => "SET_FIRST_TIME_USER",
            Self::SetShowTaskModal(_) => "SET_SHOW_TASK_MODAL",
            Self::SetShowSettingsModal(_) => "SET_SHOW_SETTINGS_MODAL",
            Self::SetShowInboxModal(_) => "SET_SHOW_INBOX_MODAL",
            Self::SetShowNotificationsPanel(_) => "SET_SHOW_NOTIFICATIONS_PANEL",
            Self::SetShowTaskTypeSelector(_) => "SET_SHOW_TASK_TYPE_SELECTOR",
            Self::Rehydrate(_) => "LOAD_DATA",
        }
    }
}
