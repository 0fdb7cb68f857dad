//! Client and personal task list filtering.

use crate::model::state::AppState;
use crate::model::task::{Priority, Task, TaskKind, TaskStatus};
use crate::query::due::days_until_due;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// List filter; empty search and `None` fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaskFilter {
    pub search: String,
    pub status: Option<TaskStatus>,
    pub priority: Option<Priority>,
}

impl TaskFilter {
    /// Case-insensitive substring match on project or client name.
    pub fn matches(&self, task: &Task) -> bool {
        let needle = self.search.trim().to_lowercase();
        let matches_search = needle.is_empty()
            || task.project_name.to_lowercase().contains(&needle)
            || task
                .client_name
                .as_deref()
                .is_some_and(|client| client.to_lowercase().contains(&needle));
        matches_search
            && self.status.map_or(true, |status| task.status == status)
            && self.priority.map_or(true, |priority| task.priority == priority)
    }

    pub fn apply<'a>(&self, tasks: impl IntoIterator<Item = &'a Task>) -> Vec<&'a Task> {
        tasks.into_iter().filter(|task| self.matches(task)).collect()
    }
}

/// Filtered client tasks; sorted by due date (undated last) when the
/// state's sort flag is on, otherwise in stored order.
pub fn client_task_list<'a>(state: &'a AppState, filter: &TaskFilter) -> Vec<&'a Task> {
    let mut tasks = filter.apply(state.tasks(TaskKind::Client).iter());
    if state.sort_client_tasks_by_due_date {
        tasks.sort_by_key(|task| (task.due_date.is_none(), task.due_date));
    }
    tasks
}

pub fn personal_task_list<'a>(state: &'a AppState, filter: &TaskFilter) -> Vec<&'a Task> {
    filter.apply(state.tasks(TaskKind::Personal).iter())
}

/// Duration figures shown on a task card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskSpan {
    /// Start through due, both days included.
    pub total_days: i64,
    /// Negative once the due date has passed.
    pub remaining_days: i64,
}

/// `None` unless both start and due dates are set.
pub fn task_span(task: &Task, today: NaiveDate) -> Option<TaskSpan> {
    let (start, due) = (task.start_date?, task.due_date?);
    Some(TaskSpan {
        total_days: (due - start).num_days() + 1,
        remaining_days: days_until_due(due, today),
    })
}
