//! Navigation, task type selector and calendar controls.

use crate::clock::Clock;
use crate::model::state::{AppState, Page};
use crate::model::task::TaskKind;
use crate::query::calendar::shift_month;
use crate::repo::kv_repo::KeyValueStore;
use crate::store::{Action, Store};
use chrono::NaiveDate;

pub struct UiService<'a, S: KeyValueStore, C: Clock> {
    store: &'a mut Store<S>,
    clock: C,
}

impl<'a, S: KeyValueStore, C: Clock> UiService<'a, S, C> {
    pub fn new(store: &'a mut Store<S>, clock: C) -> Self {
        Self { store, clock }
    }

    pub fn state(&self) -> &AppState {
        self.store.state()
    }

    pub fn go_to(&mut self, page: Page) {
        self.store.dispatch(Action::SetCurrentPage(page));
    }

    /// Quick-add button.
    pub fn show_task_type_selector(&mut self) {
        self.store.dispatch(Action::SetShowTaskTypeSelector(true));
    }

    pub fn hide_task_type_selector(&mut self) {
        self.store.dispatch(Action::SetShowTaskTypeSelector(false));
    }

    /// Picks a kind in the selector and opens an empty task form.
    pub fn choose_task_type(&mut self, kind: TaskKind) {
        self.store.dispatch(Action::SetTaskType(kind));
        self.store.dispatch(Action::SetEditingTask(None));
        self.store.dispatch(Action::SetShowTaskModal(true));
        self.store.dispatch(Action::SetShowTaskTypeSelector(false));
    }

    /// Selecting the same date again clears the selection.
    pub fn select_calendar_date(&mut self, date: NaiveDate) {
        let next = match self.store.state().selected_calendar_date {
            Some(current) if current == date => None,
            _ => Some(date),
        };
        self.store.dispatch(Action::SetSelectedCalendarDate(next));
    }

    /// Moves the calendar by `delta` months.
    pub fn navigate_month(&mut self, delta: i32) {
        let date = shift_month(self.store.state().calendar_date, delta);
        self.store.dispatch(Action::SetCalendarDate(date));
    }

    pub fn go_to_today(&mut self) {
        self.store.dispatch(Action::SetCalendarDate(self.clock.today()));
    }

    pub fn toggle_client_sort_by_due_date(&mut self) -> bool {
        let enabled = !self.store.state().sort_client_tasks_by_due_date;
        self.store.dispatch(Action::SetSortClientTasksByDueDate(enabled));
        enabled
    }
}

#[cfg(test)]
mod tests {
    use super::UiService;
    use crate::clock::{Clock, FixedClock};
    use crate::model::state::Page;
    use crate::model::task::TaskKind;
    use crate::repo::kv_repo::MemoryKvStore;
    use crate::store::Store;
    use chrono::{NaiveDate, TimeZone, Utc};

    fn clock() -> FixedClock {
        FixedClock::new(Utc.with_ymd_and_hms(2025, 1, 31, 8, 0, 0).unwrap())
    }

    #[test]
    fn month_navigation_clamps_and_returns_to_today() {
        let mut store = Store::new(MemoryKvStore::new(), clock().today());
        let mut ui = UiService::new(&mut store, clock());
        ui.navigate_month(1);
        assert_eq!(ui.state().calendar_date, NaiveDate::from_ymd_opt(2025, 2, 28).unwrap());
        ui.navigate_month(-2);
        assert_eq!(ui.state().calendar_date, NaiveDate::from_ymd_opt(2024, 12, 28).unwrap());
        ui.go_to_today();
        assert_eq!(ui.state().calendar_date, clock().today());
    }

    #[test]
    fn selector_opens_form_for_chosen_kind() {
        let mut store = Store::new(MemoryKvStore::new(), clock().today());
        let mut ui = UiService::new(&mut store, clock());
        ui.go_to(Page::KairoBoard);
        ui.show_task_type_selector();
        ui.choose_task_type(TaskKind::Personal);
        let state = ui.state();
        assert_eq!(state.current_page, Page::KairoBoard);
        assert_eq!(state.task_type, TaskKind::Personal);
        assert!(state.ui.show_task_modal);
        assert!(!state.ui.show_task_type_selector);
    }

    #[test]
    fn reselecting_a_date_clears_it() {
        let mut store = Store::new(MemoryKvStore::new(), clock().today());
        let mut ui = UiService::new(&mut store, clock());
        let day = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        ui.select_calendar_date(day);
        assert_eq!(ui.state().selected_calendar_date, Some(day));
        ui.select_calendar_date(day);
        assert_eq!(ui.state().selected_calendar_date, None);
    }
}
