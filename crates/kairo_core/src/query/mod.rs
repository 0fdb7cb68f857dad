//! Pure read models derived from `AppState`.
//!
//! Every view that shows counts or due badges goes through these functions so
//! the dashboard, due-soon list and analytics never disagree.

pub mod analytics;
pub mod board;
pub mod calendar;
pub mod dashboard;
pub mod due;
pub mod filter;

use crate::model::state::AppState;
use serde::Serialize;

pub use analytics::{analytics, format_currency, parse_amount_cents, AnalyticsReport};
pub use board::{board_columns, BoardColumn};
pub use calendar::{calendar_month, month_grid, shift_month, upcoming_tasks, CalendarMonth};
pub use dashboard::{dashboard, recent_tasks, Dashboard, DashboardStats};
pub use due::{classify_due, due_label, due_soon_tasks, overdue_tasks, DueStatus};
pub use filter::{client_task_list, personal_task_list, task_span, TaskFilter, TaskSpan};

/// Unread counters for the header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Badges {
    pub unread_notifications: usize,
    pub unread_messages: usize,
}

pub fn badges(state: &AppState) -> Badges {
    Badges {
        unread_notifications: crate::model::inbox::unread_notifications(&state.notifications),
        unread_messages: crate::model::inbox::unread_messages(&state.messages),
    }
}
