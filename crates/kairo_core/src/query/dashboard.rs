//! Dashboard summary cards and recent-task lists.

use crate::model::state::AppState;
use crate::model::task::{Task, TaskKind};
use crate::query::due::{is_due_soon, is_overdue};
use chrono::NaiveDate;
use serde::Serialize;

/// Recent tasks shown per collection.
pub const RECENT_TASKS_LIMIT: usize = 3;

/// Counts over both collections.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total: usize,
    pub completed: usize,
    pub overdue: usize,
    /// Not completed, overdue or not.
    pub pending: usize,
    pub due_soon: usize,
}

impl DashboardStats {
    pub fn from_tasks<'a>(tasks: impl IntoIterator<Item = &'a Task>, today: NaiveDate) -> Self {
        let mut stats = Self::default();
        for task in tasks {
            stats.total += 1;
            if task.is_completed() {
                stats.completed += 1;
                continue;
            }
            stats.pending += 1;
            if is_overdue(task, today) {
                stats.overdue += 1;
            } else if is_due_soon(task, today) {
                stats.due_soon += 1;
            }
        }
        stats
    }
}

/// Everything the dashboard page renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub user_name: String,
    pub stats: DashboardStats,
    pub recent_client_tasks: Vec<Task>,
    pub recent_personal_tasks: Vec<Task>,
}

pub fn dashboard(state: &AppState, today: NaiveDate) -> Dashboard {
    Dashboard {
        user_name: state.settings.user_name.clone(),
        stats: DashboardStats::from_tasks(state.all_tasks(), today),
        recent_client_tasks: recent_kind(state, TaskKind::Client),
        recent_personal_tasks: recent_kind(state, TaskKind::Personal),
    }
}

fn recent_kind(state: &AppState, kind: TaskKind) -> Vec<Task> {
    recent_tasks(state.tasks(kind).iter(), RECENT_TASKS_LIMIT)
        .into_iter()
        .cloned()
        .collect()
}

/// Newest first by creation time, ties broken by higher id.
pub fn recent_tasks<'a>(tasks: impl IntoIterator<Item = &'a Task>, limit: usize) -> Vec<&'a Task> {
    let mut tasks: Vec<&Task> = tasks.into_iter().collect();
    tasks.sort_by(|a, b| {
        b.recency_key()
            .cmp(&a.recency_key())
            .then_with(|| b.id.cmp(&a.id))
    });
    tasks.truncate(limit);
    tasks
}

#[cfg(test)]
mod tests {
    use super::{recent_tasks, DashboardStats};
    use crate::model::task::{Task, TaskKind, TaskStatus};
    use chrono::NaiveDate;

    fn task(id: i64, due: Option<(u32, u32)>, status: TaskStatus) -> Task {
        let mut task = Task::new(id, TaskKind::Client, format!("task {id}"));
        task.due_date = due.and_then(|(m, d)| NaiveDate::from_ymd_opt(2025, m, d));
        task.status = status;
        task
    }

    #[test]
    fn stats_split_completed_overdue_and_due_soon() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let tasks = vec![
            task(1, Some((3, 9)), TaskStatus::Started),
            task(2, Some((3, 10)), TaskStatus::Review),
            task(3, Some((3, 1)), TaskStatus::Completed),
            task(4, None, TaskStatus::NotStarted),
        ];
        let stats = DashboardStats::from_tasks(&tasks, today);
        assert_eq!(stats.total, 4);
        assert_eq!(stats.completed, 1);
        assert_eq!(stats.pending, 3);
        assert_eq!(stats.overdue, 1);
        assert_eq!(stats.due_soon, 1);
    }

    #[test]
    fn recent_tasks_prefers_newest_ids_without_timestamps() {
        let tasks: Vec<Task> = (1..=5).map(|id| task(id, None, TaskStatus::Started)).collect();
        let ids: Vec<i64> = recent_tasks(&tasks, 3).iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![5, 4, 3]);
    }
}
