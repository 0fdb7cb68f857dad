//! Kanban columns.

use crate::model::state::AppState;
use crate::model::task::{Task, TaskStatus};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardColumn {
    pub status: TaskStatus,
    pub tasks: Vec<Task>,
}

/// One column per status in workflow order, client tasks before personal.
pub fn board_columns(state: &AppState) -> Vec<BoardColumn> {
    TaskStatus::ALL
        .iter()
        .map(|&status| BoardColumn {
            status,
            tasks: state
                .all_tasks()
                .filter(|task| task.status == status)
                .cloned()
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::board_columns;
    use crate::model::state::AppState;
    use crate::model::task::{Task, TaskKind, TaskStatus};
    use chrono::NaiveDate;
    use std::sync::Arc;

    #[test]
    fn every_status_gets_a_column() {
        let mut state = AppState::new(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        let mut review = Task::new(1, TaskKind::Client, "Site");
        review.status = TaskStatus::Review;
        state.client_tasks = Arc::new(vec![review]);
        state.personal_tasks = Arc::new(vec![Task::new(2, TaskKind::Personal, "Gym")]);

        let columns = board_columns(&state);
        assert_eq!(columns.len(), TaskStatus::ALL.len());
        assert_eq!(columns[0].status, TaskStatus::NotStarted);
        assert_eq!(columns[0].tasks[0].id, 2);
        assert_eq!(columns[3].tasks[0].id, 1);
        assert!(columns[5].tasks.is_empty());
    }
}
