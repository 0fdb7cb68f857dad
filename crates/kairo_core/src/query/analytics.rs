//! Analytics page figures.
//!
//! # Invariants
//! - Overdue uses the same classification as the dashboard and due-soon view.
//! - Money is summed in integer cents; unparsable amounts count as zero.
//! - Sums saturate at the `i64` bounds instead of overflowing.

use crate::model::state::AppState;
use crate::model::task::{Priority, Task, TaskKind, TaskStatus};
use crate::query::dashboard::recent_tasks;
use crate::query::due::is_overdue;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// Entries in the recent-activity list.
pub const RECENT_ACTIVITY_LIMIT: usize = 5;

static NON_NUMERIC_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^0-9.\-]").expect("valid amount regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCount {
    pub status: TaskStatus,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriorityCount {
    pub priority: Priority,
    pub count: usize,
}

/// Billing totals over client tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Revenue {
    pub total_cents: i64,
    pub paid_cents: i64,
    pub outstanding_cents: i64,
    pub total: String,
    pub paid: String,
    pub outstanding: String,
}

impl Revenue {
    fn from_cents(total_cents: i64, paid_cents: i64) -> Self {
        let outstanding_cents = total_cents.saturating_sub(paid_cents);
        Self {
            total_cents,
            paid_cents,
            outstanding_cents,
            total: format_currency(total_cents),
            paid: format_currency(paid_cents),
            outstanding: format_currency(outstanding_cents),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsReport {
    pub total_tasks: usize,
    pub completed_tasks: usize,
    pub in_progress_tasks: usize,
    pub overdue_tasks: usize,
    /// Rounded percentage, 0 when there are no tasks.
    pub completion_rate: u32,
    pub client_task_count: usize,
    pub personal_task_count: usize,
    pub revenue: Revenue,
    pub by_status: Vec<StatusCount>,
    pub by_priority: Vec<PriorityCount>,
    pub recent_activity: Vec<Task>,
}

pub fn analytics(state: &AppState, today: NaiveDate) -> AnalyticsReport {
    let tasks: Vec<&Task> = state.all_tasks().collect();
    let total_tasks = tasks.len();
    let completed_tasks = tasks.iter().filter(|task| task.is_completed()).count();

    let by_status = TaskStatus::ALL
        .iter()
        .map(|&status| StatusCount {
            status,
            count: tasks.iter().filter(|task| task.status == status).count(),
        })
        .collect();
    let by_priority = Priority::ALL
        .iter()
        .map(|&priority| PriorityCount {
            priority,
            count: tasks.iter().filter(|task| task.priority == priority).count(),
        })
        .collect();

    let client_tasks = state.tasks(TaskKind::Client);
    let total_cents = sum_cents(client_tasks.iter().map(|task| task.total_amount.as_deref()));
    let paid_cents = sum_cents(client_tasks.iter().map(|task| task.amount_paid.as_deref()));

    AnalyticsReport {
        total_tasks,
        completed_tasks,
        in_progress_tasks: tasks
            .iter()
            .filter(|task| task.status == TaskStatus::Processing)
            .count(),
        overdue_tasks: tasks.iter().filter(|task| is_overdue(task, today)).count(),
        completion_rate: completion_rate(completed_tasks, total_tasks),
        client_task_count: client_tasks.len(),
        personal_task_count: state.tasks(TaskKind::Personal).len(),
        revenue: Revenue::from_cents(total_cents, paid_cents),
        by_status,
        by_priority,
        recent_activity: recent_tasks(tasks.iter().copied(), RECENT_ACTIVITY_LIMIT)
            .into_iter()
            .cloned()
            .collect(),
    }
}

pub fn completion_rate(completed: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((completed as f64 / total as f64) * 100.0).round() as u32
}

/// Parses a currency-formatted amount into cents.
///
/// Everything except digits, `.` and `-` is stripped first, so `$1,250.50`
/// reads as 125050. Unparsable input yields 0.
pub fn parse_amount_cents(raw: &str) -> i64 {
    let cleaned = NON_NUMERIC_RE.replace_all(raw, "");
    match cleaned.parse::<f64>() {
        Ok(value) if value.is_finite() => (value * 100.0).round() as i64,
        _ => 0,
    }
}

fn sum_cents<'a>(amounts: impl Iterator<Item = Option<&'a str>>) -> i64 {
    amounts
        .map(|amount| amount.map_or(0, parse_amount_cents))
        .fold(0i64, i64::saturating_add)
}

/// Renders cents as `$1,234.50`; negatives as `-$12.00`.
pub fn format_currency(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    let dollars = (abs / 100).to_string();
    let mut grouped = String::with_capacity(dollars.len() + dollars.len() / 3);
    for (index, digit) in dollars.chars().enumerate() {
        if index > 0 && (dollars.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    format!("{sign}${grouped}.{:02}", abs % 100)
}

#[cfg(test)]
mod tests {
    use super::{analytics, completion_rate, format_currency, parse_amount_cents};
    use crate::model::state::AppState;
    use crate::model::task::{Task, TaskKind};
    use crate::store::{reduce, Action};
    use chrono::NaiveDate;

    fn billed(id: i64, total: &str, paid: &str) -> Task {
        let mut task = Task::new(id, TaskKind::Client, format!("job {id}"));
        task.total_amount = Some(total.to_string());
        task.amount_paid = Some(paid.to_string());
        task
    }

    fn report_for(tasks: Vec<Task>) -> super::AnalyticsReport {
        let today = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        let state = reduce(&AppState::new(today), Action::SetClientTasks(tasks));
        analytics(&state, today)
    }

    #[test]
    fn parses_formatted_amounts() {
        assert_eq!(parse_amount_cents("$1,250.50"), 125_050);
        assert_eq!(parse_amount_cents("300"), 30_000);
        assert_eq!(parse_amount_cents("-$12"), -1_200);
        assert_eq!(parse_amount_cents("n/a"), 0);
        assert_eq!(parse_amount_cents(""), 0);
    }

    #[test]
    fn formats_with_grouping() {
        assert_eq!(format_currency(0), "$0.00");
        assert_eq!(format_currency(123_450), "$1,234.50");
        assert_eq!(format_currency(100_000_000), "$1,000,000.00");
        assert_eq!(format_currency(-1_205), "-$12.05");
    }

    #[test]
    fn huge_amounts_saturate_instead_of_overflowing() {
        let report = report_for(vec![
            billed(1, "$99,999,999,999,999,999", "0"),
            billed(2, "$99,999,999,999,999,999", "0"),
        ]);
        assert_eq!(report.revenue.total_cents, i64::MAX);
        assert_eq!(report.revenue.outstanding_cents, i64::MAX);
    }

    #[test]
    fn negative_paid_amount_saturates_outstanding() {
        let report = report_for(vec![billed(1, "99999999999999999", "-5")]);
        assert_eq!(report.revenue.paid_cents, -500);
        assert_eq!(report.revenue.outstanding_cents, i64::MAX);
        assert!(report.revenue.outstanding.starts_with('$'));
    }

    #[test]
    fn completion_rate_rounds() {
        assert_eq!(completion_rate(0, 0), 0);
        assert_eq!(completion_rate(1, 3), 33);
        assert_eq!(completion_rate(2, 3), 67);
    }
}
