//! Month grid and per-day task lookups for the calendar page.

use crate::model::state::AppState;
use crate::model::task::{Task, TaskId};
use chrono::{Datelike, Months, NaiveDate};
use serde::Serialize;

/// Entries in the upcoming list under the grid.
pub const UPCOMING_TASKS_LIMIT: usize = 5;

/// Tasks whose due date is exactly `date`.
pub fn tasks_due_on<'a>(tasks: impl IntoIterator<Item = &'a Task>, date: NaiveDate) -> Vec<&'a Task> {
    tasks
        .into_iter()
        .filter(|task| task.due_date == Some(date))
        .collect()
}

/// Sunday-first grid for the month containing `anchor`.
///
/// Leading `None` cells pad the first week; there is no trailing padding.
pub fn month_grid(anchor: NaiveDate) -> Vec<Option<NaiveDate>> {
    let Some(first) = anchor.with_day(1) else {
        return Vec::new();
    };
    let leading = first.weekday().num_days_from_sunday() as usize;
    let mut cells: Vec<Option<NaiveDate>> = vec![None; leading];
    cells.extend(
        first
            .iter_days()
            .take_while(|day| day.month() == first.month())
            .map(Some),
    );
    cells
}

/// Moves `date` by `delta` months, clamping the day to the target month's
/// length (Jan 31 + 1 month = Feb 28/29).
pub fn shift_month(date: NaiveDate, delta: i32) -> NaiveDate {
    let months = Months::new(delta.unsigned_abs());
    let shifted = if delta >= 0 {
        date.checked_add_months(months)
    } else {
        date.checked_sub_months(months)
    };
    shifted.unwrap_or(date)
}

/// Tasks due today or later, soonest first, capped at `limit`.
pub fn upcoming_tasks<'a>(
    tasks: impl IntoIterator<Item = &'a Task>,
    today: NaiveDate,
    limit: usize,
) -> Vec<&'a Task> {
    let mut upcoming: Vec<&Task> = tasks
        .into_iter()
        .filter(|task| task.due_date.is_some_and(|due| due >= today))
        .collect();
    upcoming.sort_by_key(|task| (task.due_date, task.id));
    upcoming.truncate(limit);
    upcoming
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarCell {
    pub date: NaiveDate,
    pub is_today: bool,
    pub is_selected: bool,
    pub task_ids: Vec<TaskId>,
}

/// Calendar page model built from `calendar_date` and `selected_calendar_date`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarMonth {
    pub year: i32,
    pub month: u32,
    pub cells: Vec<Option<CalendarCell>>,
    pub upcoming: Vec<Task>,
}

pub fn calendar_month(state: &AppState, today: NaiveDate) -> CalendarMonth {
    let anchor = state.calendar_date;
    let cells = month_grid(anchor)
        .into_iter()
        .map(|cell| {
            cell.map(|date| CalendarCell {
                date,
                is_today: date == today,
                is_selected: state.selected_calendar_date == Some(date),
                task_ids: tasks_due_on(state.all_tasks(), date)
                    .iter()
                    .map(|task| task.id)
                    .collect(),
            })
        })
        .collect();

    CalendarMonth {
        year: anchor.year(),
        month: anchor.month(),
        cells,
        upcoming: upcoming_tasks(state.all_tasks(), today, UPCOMING_TASKS_LIMIT)
            .into_iter()
            .cloned()
            .collect(),
    }
}
