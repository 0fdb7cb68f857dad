//! Persisted slices and their storage keys.

use crate::model::state::AppState;
use std::sync::Arc;

/// A top-level part of [`AppState`] mirrored to storage under its own key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slice {
    ClientTasks,
    PersonalTasks,
    Settings,
    Notifications,
    Messages,
    TaskTemplates,
    /// Presence-tested onboarding marker.
    FirstTimeUser,
}

impl Slice {
    pub const ALL: [Slice; 7] = [
        Self::ClientTasks,
        Self::PersonalTasks,
        Self::Settings,
        Self::Notifications,
        Self::Messages,
        Self::TaskTemplates,
        Self::FirstTimeUser,
    ];

    pub fn storage_key(self) -> &'static str {
        match self {
            Self::ClientTasks => "clientTasks",
            Self::PersonalTasks => "personalTasks",
            Self::Settings => "settings",
            Self::Notifications => "notifications",
            Self::Messages => "messages",
            Self::TaskTemplates => "taskTemplates",
            Self::FirstTimeUser => "firstTimeUser",
        }
    }
}

/// Slices whose value differs between `before` and `after`.
///
/// Collections are compared by pointer: the reducer keeps the old `Arc`
/// whenever a replacement equals the current value.
pub fn changed_slices(before: &AppState, after: &AppState) -> Vec<Slice> {
    Slice::ALL
        .into_iter()
        .filter(|slice| match slice {
            Slice::ClientTasks => !Arc::ptr_eq(&before.client_tasks, &after.client_tasks),
            Slice::PersonalTasks => !Arc::ptr_eq(&before.personal_tasks, &after.personal_tasks),
            Slice::Settings => !Arc::ptr_eq(&before.settings, &after.settings),
            Slice::Notifications => !Arc::ptr_eq(&before.notifications, &after.notifications),
            Slice::Messages => !Arc::ptr_eq(&before.messages, &after.messages),
            Slice::TaskTemplates => !Arc::ptr_eq(&before.task_templates, &after.task_templates),
            Slice::FirstTimeUser => before.is_first_time_user != after.is_first_time_user,
        })
        .collect()
}
