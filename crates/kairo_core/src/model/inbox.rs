//! Notification and inbox message records.

use crate::model::lenient::lenient_timestamp;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Notification severity. Unknown names decode as `Info`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum NotificationKind {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

impl From<String> for NotificationKind {
    fn from(value: String) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "success" => Self::Success,
            "warning" => Self::Warning,
            "error" => Self::Error,
            _ => Self::Info,
        }
    }
}

/// Dismissible alert shown in the notifications panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: i64,
    pub title: String,
    pub message: String,
    #[serde(rename = "type", default)]
    pub kind: NotificationKind,
    #[serde(default)]
    pub read: bool,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub date: DateTime<Utc>,
}

/// Inbox message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: i64,
    pub from: String,
    pub subject: String,
    pub body: String,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub read: bool,
}

/// Number of unread notifications, shown as the header badge.
pub fn unread_notifications(notifications: &[Notification]) -> usize {
    notifications.iter().filter(|item| !item.read).count()
}

/// Number of unread messages, shown as the sidebar inbox badge.
pub fn unread_messages(messages: &[Message]) -> usize {
    messages.iter().filter(|item| !item.read).count()
}
