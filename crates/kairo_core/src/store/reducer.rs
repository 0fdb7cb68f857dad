//! Pure state transition function.
//!
//! # Invariants
//! - `reduce` never mutates its input and never reads the clock or storage.
//! - A replacement equal to the current slice keeps the current `Arc`.
//! - Task ids stay unique across both collections.
//! - `editing_task` never dangles after a reduce.

use crate::model::state::AppState;
use crate::model::task::{normalize_tags, Task, TaskKind};
use crate::store::action::Action;
use log::warn;
use std::collections::HashSet;
use std::sync::Arc;

/// Applies `action` to `state`, returning the next state.
pub fn reduce(state: &AppState, action: Action) -> AppState {
    let mut next = state.clone();
    match action {
        Action::SetCurrentPage(page) => next.current_page = page,
        Action::SetClientTasks(tasks) => {
            let tasks = normalize_collection(tasks, TaskKind::Client, &state.personal_tasks);
            next.client_tasks = share_if_equal(&state.client_tasks, tasks);
        }
        Action::SetPersonalTasks(tasks) => {
            let tasks = normalize_collection(tasks, TaskKind::Personal, &state.client_tasks);
            next.personal_tasks = share_if_equal(&state.personal_tasks, tasks);
        }
        Action::SetTaskTemplates(templates) => {
            next.task_templates = share_if_equal(&state.task_templates, templates);
        }
        Action::SetSettings(settings) => {
            next.settings = share_if_equal(&state.settings, settings);
        }
        Action::SetEditingTask(target) => {
            next.editing_task = target.filter(|id| {
                let known = state.contains_task(*id);
                if !known {
                    warn!("event=reduce module=store status=normalized action=SET_EDITING_TASK reason=unknown_task task_id={id}");
                }
                known
            });
        }
        Action::SetTaskType(kind) => next.task_type = kind,
        Action::SetTags(tags) => next.tags = share_if_equal(&state.tags, normalize_tags(tags)),
        Action::SetNotifications(items) => {
            next.notifications = share_if_equal(&state.notifications, items);
        }
        Action::SetMessages(items) => next.messages = share_if_equal(&state.messages, items),
        Action::SetCalendarDate(date) => next.calendar_date = date,
        Action::SetSelectedCalendarDate(date) => next.selected_calendar_date = date,
        Action::SetSortClientTasksByDueDate(enabled) => {
            next.sort_client_tasks_by_due_date = enabled;
        }
        Action::SetFirstTimeUser(flag) => next.is_first_time_user = flag,
        Action::SetShowTaskModal(flag) => next.ui.show_task_modal = flag,
        Action::SetShowSettingsModal(flag) => next.ui.show_settings_modal = flag,
        Action::SetShowInboxModal(flag) => next.ui.show_inbox_modal = flag,
        Action::SetShowNotificationsPanel(flag) => next.ui.show_notifications_panel = flag,
        Action::SetShowTaskTypeSelector(flag) => next.ui.show_task_type_selector = flag,
        Action::Rehydrate(persisted) => {
            let client = normalize_collection(persisted.client_tasks, TaskKind::Client, &[]);
            let personal = normalize_collection(persisted.personal_tasks, TaskKind::Personal, &client);
            next.client_tasks = share_if_equal(&state.client_tasks, client);
            next.personal_tasks = share_if_equal(&state.personal_tasks, personal);
            next.settings = share_if_equal(&state.settings, persisted.settings);
            next.notifications = share_if_equal(&state.notifications, persisted.notifications);
            next.messages = share_if_equal(&state.messages, persisted.messages);
            next.task_templates = share_if_equal(&state.task_templates, persisted.task_templates);
            next.is_first_time_user = persisted.is_first_time_user;
        }
    }

    if let Some(id) = next.editing_task {
        if !next.contains_task(id) {
            next.editing_task = None;
        }
    }
    next
}

/// Keeps `current` when `candidate` holds the same value.
fn share_if_equal<T: PartialEq>(current: &Arc<T>, candidate: T) -> Arc<T> {
    if **current == candidate {
        Arc::clone(current)
    } else {
        Arc::new(candidate)
    }
}

/// Stamps `kind`, canonicalizes fields and drops id collisions.
///
/// Within `tasks` the first occurrence of an id wins; ids already owned by
/// `other` are dropped.
fn normalize_collection(tasks: Vec<Task>, kind: TaskKind, other: &[Task]) -> Vec<Task> {
    let taken: HashSet<_> = other.iter().map(|task| task.id).collect();
    let mut seen = HashSet::with_capacity(tasks.len());
    let mut normalized = Vec::with_capacity(tasks.len());

    for mut task in tasks {
        if taken.contains(&task.id) || !seen.insert(task.id) {
            warn!(
                "event=reduce module=store status=normalized reason=duplicate_task_id kind={} task_id={}",
                kind.as_str(),
                task.id
            );
            continue;
        }
        task.kind = kind;
        task.canonicalize();
        normalized.push(task);
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::{reduce, share_if_equal};
    use crate::model::state::{AppState, Page};
    use crate::model::task::{Task, TaskKind};
    use crate::store::action::Action;
    use chrono::NaiveDate;
    use std::sync::Arc;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, 1).unwrap()
    }

    #[test]
    fn share_if_equal_reuses_pointer_for_equal_values() {
        let current = Arc::new(vec![1, 2, 3]);
        assert!(Arc::ptr_eq(&current, &share_if_equal(&current, vec![1, 2, 3])));
        assert!(!Arc::ptr_eq(&current, &share_if_equal(&current, vec![1, 2])));
    }

    #[test]
    fn input_state_is_left_untouched() {
        let state = AppState::new(today());
        let snapshot = state.clone();
        let next = reduce(&state, Action::SetCurrentPage(Page::Analytics));
        assert_eq!(state, snapshot);
        assert_eq!(next.current_page, Page::Analytics);
        assert!(Arc::ptr_eq(&state.client_tasks, &next.client_tasks));
    }

    #[test]
    fn collection_write_stamps_kind_and_cleans_tags() {
        let state = AppState::new(today());
        let mut task = Task::new(7, TaskKind::Client, "Errands");
        task.tags = vec!["home".into(), " home ".into(), "".into()];
        let next = reduce(&state, Action::SetPersonalTasks(vec![task]));
        assert_eq!(next.personal_tasks[0].kind, TaskKind::Personal);
        assert_eq!(next.personal_tasks[0].tags, vec!["home".to_string()]);
    }

    #[test]
    fn ids_owned_by_other_collection_are_dropped() {
        let state = AppState::new(today());
        let state = reduce(
            &state,
            Action::SetClientTasks(vec![Task::new(1, TaskKind::Client, "Site")]),
        );
        let next = reduce(
            &state,
            Action::SetPersonalTasks(vec![
                Task::new(1, TaskKind::Personal, "Clash"),
                Task::new(2, TaskKind::Personal, "Gym"),
                Task::new(2, TaskKind::Personal, "Gym again"),
            ]),
        );
        let ids: Vec<_> = next.personal_tasks.iter().map(|task| task.id).collect();
        assert_eq!(ids, vec![2]);
        assert_eq!(next.personal_tasks[0].project_name, "Gym");
    }
}
