//! Due-date classification shared by dashboard, due-soon and analytics.
//!
//! # Invariants
//! - Comparisons are by calendar day; a task due today is never overdue.
//! - Completed tasks are never overdue or due soon.

use crate::model::task::Task;
use chrono::NaiveDate;
use serde::Serialize;

/// Inclusive look-ahead window for "due soon", in days.
pub const DUE_SOON_WINDOW_DAYS: i64 = 7;

/// Where a task stands relative to `today`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum DueStatus {
    Completed,
    NoDueDate,
    /// `days` late, always >= 1.
    Overdue { days: i64 },
    DueToday,
    /// Due in 1..=7 days.
    DueSoon { days: i64 },
    Later { days: i64 },
}

/// Signed calendar-day distance from `today` to `due`.
pub fn days_until_due(due: NaiveDate, today: NaiveDate) -> i64 {
    (due - today).num_days()
}

pub fn classify_due(task: &Task, today: NaiveDate) -> DueStatus {
    if task.is_completed() {
        return DueStatus::Completed;
    }
    let Some(due) = task.due_date else {
        return DueStatus::NoDueDate;
    };
    match days_until_due(due, today) {
        days if days < 0 => DueStatus::Overdue { days: -days },
        0 => DueStatus::DueToday,
        days if days <= DUE_SOON_WINDOW_DAYS => DueStatus::DueSoon { days },
        days => DueStatus::Later { days },
    }
}

pub fn is_overdue(task: &Task, today: NaiveDate) -> bool {
    matches!(classify_due(task, today), DueStatus::Overdue { .. })
}

/// Due today or within the window.
pub fn is_due_soon(task: &Task, today: NaiveDate) -> bool {
    matches!(
        classify_due(task, today),
        DueStatus::DueToday | DueStatus::DueSoon { .. }
    )
}

/// Overdue tasks, most overdue first.
pub fn overdue_tasks<'a>(tasks: impl IntoIterator<Item = &'a Task>, today: NaiveDate) -> Vec<&'a Task> {
    sorted_by_due(tasks.into_iter().filter(|task| is_overdue(task, today)))
}

/// Tasks due between today and the end of the window, soonest first.
pub fn due_soon_tasks<'a>(tasks: impl IntoIterator<Item = &'a Task>, today: NaiveDate) -> Vec<&'a Task> {
    sorted_by_due(tasks.into_iter().filter(|task| is_due_soon(task, today)))
}

fn sorted_by_due<'a>(tasks: impl Iterator<Item = &'a Task>) -> Vec<&'a Task> {
    let mut tasks: Vec<&Task> = tasks.collect();
    tasks.sort_by_key(|task| (task.due_date, task.id));
    tasks
}

/// Human label for a signed day distance.
pub fn due_label(days: i64) -> String {
    match days {
        d if d < 0 => {
            let late = -d;
            let unit = if late == 1 { "day" } else { "days" };
            format!("Overdue by {late} {unit}")
        }
        0 => "Due today".to_string(),
        1 => "Due tomorrow".to_string(),
        d => format!("Due in {d} days"),
    }
}

#[cfg(test)]
mod tests {
    use super::{classify_due, due_label, DueStatus};
    use crate::model::task::{Task, TaskKind, TaskStatus};
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 7, d).unwrap()
    }

    fn due_on(date: NaiveDate) -> Task {
        let mut task = Task::new(1, TaskKind::Client, "Audit");
        task.due_date = Some(date);
        task
    }

    #[test]
    fn classification_boundaries() {
        let today = day(10);
        assert_eq!(classify_due(&due_on(day(9)), today), DueStatus::Overdue { days: 1 });
        assert_eq!(classify_due(&due_on(day(10)), today), DueStatus::DueToday);
        assert_eq!(classify_due(&due_on(day(17)), today), DueStatus::DueSoon { days: 7 });
        assert_eq!(classify_due(&due_on(day(18)), today), DueStatus::Later { days: 8 });
    }

    #[test]
    fn completed_and_undated_tasks_are_never_late() {
        let today = day(10);
        let mut done = due_on(day(1));
        done.status = TaskStatus::Completed;
        assert_eq!(classify_due(&done, today), DueStatus::Completed);
        assert_eq!(
            classify_due(&Task::new(2, TaskKind::Personal, "Read"), today),
            DueStatus::NoDueDate
        );
    }

    #[test]
    fn labels_match_distance() {
        assert_eq!(due_label(-1), "Overdue by 1 day");
        assert_eq!(due_label(-3), "Overdue by 3 days");
        assert_eq!(due_label(0), "Due today");
        assert_eq!(due_label(1), "Due tomorrow");
        assert_eq!(due_label(5), "Due in 5 days");
    }
}
