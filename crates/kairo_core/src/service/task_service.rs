//! Task use-case service.
//!
//! # Responsibility
//! - Turn form submissions, board drops and checkbox toggles into full
//!   collection replacements dispatched through the store.
//! - Validate drafts before anything reaches state.
//!
//! # Invariants
//! - Ids are strictly increasing per store, even within one millisecond.
//! - Updates never change a task's id, kind or creation time.

use crate::clock::Clock;
use crate::model::lenient::{optional_date, optional_text};
use crate::model::state::AppState;
use crate::model::task::{
    normalize_tags, Priority, Task, TaskId, TaskKind, TaskStatus, TaskValidationError,
};
use crate::repo::kv_repo::KeyValueStore;
use crate::service::next_id;
use crate::store::{Action, Store};
use chrono::NaiveDate;
use log::info;
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskServiceError {
    Validation(TaskValidationError),
    TaskNotFound(TaskId),
    /// No unused id is left at or after the current time.
    IdsExhausted,
}

impl Display for TaskServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "invalid task: {err}"),
            Self::TaskNotFound(id) => write!(f, "task not found: {id}"),
            Self::IdsExhausted => write!(f, "no free task id"),
        }
    }
}

impl Error for TaskServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::TaskNotFound(_) | Self::IdsExhausted => None,
        }
    }
}

impl From<TaskValidationError> for TaskServiceError {
    fn from(value: TaskValidationError) -> Self {
        Self::Validation(value)
    }
}

pub type TaskServiceResult<T> = Result<T, TaskServiceError>;

/// Editable task fields as submitted by the task form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaskDraft {
    pub project_name: String,
    pub description: String,
    #[serde(deserialize_with = "optional_text")]
    pub client_name: Option<String>,
    #[serde(deserialize_with = "optional_date")]
    pub start_date: Option<NaiveDate>,
    #[serde(deserialize_with = "optional_date")]
    pub due_date: Option<NaiveDate>,
    pub status: TaskStatus,
    pub priority: Priority,
    #[serde(deserialize_with = "optional_text")]
    pub category: Option<String>,
    #[serde(deserialize_with = "optional_text")]
    pub total_amount: Option<String>,
    #[serde(deserialize_with = "optional_text")]
    pub amount_paid: Option<String>,
    #[serde(deserialize_with = "optional_text")]
    pub outstanding_amount: Option<String>,
    pub files: Vec<String>,
    pub tags: Vec<String>,
}

impl TaskDraft {
    pub fn new(project_name: impl Into<String>) -> Self {
        Self {
            project_name: project_name.into(),
            ..Self::default()
        }
    }

    /// Prefills a draft from an existing task, as the edit form does.
    pub fn from_task(task: &Task) -> Self {
        Self {
            project_name: task.project_name.clone(),
            description: task.description.clone(),
            client_name: task.client_name.clone(),
            start_date: task.start_date,
            due_date: task.due_date,
            status: task.status,
            priority: task.priority,
            category: task.category.clone(),
            total_amount: task.total_amount.clone(),
            amount_paid: task.amount_paid.clone(),
            outstanding_amount: task.outstanding_amount.clone(),
            files: task.files.clone(),
            tags: task.tags.clone(),
        }
    }

    /// Copies draft fields onto `task`, leaving identity fields alone.
    fn apply_to(self, task: &mut Task) {
        task.project_name = self.project_name.trim().to_string();
        task.description = self.description;
        task.client_name = self.client_name;
        task.start_date = self.start_date;
        task.due_date = self.due_date;
        task.status = self.status;
        task.priority = self.priority;
        task.category = self.category;
        task.total_amount = self.total_amount;
        task.amount_paid = self.amount_paid;
        task.outstanding_amount = self.outstanding_amount;
        task.files = self.files;
        task.tags = normalize_tags(self.tags);
    }
}

/// Next free task id across both collections.
pub fn next_task_id(state: &AppState, now_ms: i64) -> TaskServiceResult<TaskId> {
    next_id(state.all_tasks().map(|task| task.id), now_ms).ok_or(TaskServiceError::IdsExhausted)
}

/// Use-case service for task CRUD and the task form.
pub struct TaskService<'a, S: KeyValueStore, C: Clock> {
    store: &'a mut Store<S>,
    clock: C,
}

impl<'a, S: KeyValueStore, C: Clock> TaskService<'a, S, C> {
    pub fn new(store: &'a mut Store<S>, clock: C) -> Self {
        Self { store, clock }
    }

    pub fn state(&self) -> &AppState {
        self.store.state()
    }

    /// Opens an empty form for a new task of `kind`.
    pub fn open_create_form(&mut self, kind: TaskKind) {
        self.store.dispatch(Action::SetEditingTask(None));
        self.store.dispatch(Action::SetTaskType(kind));
        self.store.dispatch(Action::SetShowTaskTypeSelector(false));
        self.store.dispatch(Action::SetShowTaskModal(true));
    }

    /// Opens the form on an existing task.
    pub fn open_edit_form(&mut self, id: TaskId) -> TaskServiceResult<()> {
        let kind = self
            .store
            .state()
            .find_task(id)
            .map(|task| task.kind)
            .ok_or(TaskServiceError::TaskNotFound(id))?;
        self.store.dispatch(Action::SetEditingTask(Some(id)));
        self.store.dispatch(Action::SetTaskType(kind));
        self.store.dispatch(Action::SetShowTaskModal(true));
        Ok(())
    }

    pub fn close_form(&mut self) {
        self.store.dispatch(Action::SetShowTaskModal(false));
        self.store.dispatch(Action::SetEditingTask(None));
    }

    /// Saves the open form: updates the task being edited, or creates one of
    /// the selected task type. Tags are merged into the global tag list and
    /// the form closes on success.
    pub fn submit_form(&mut self, draft: TaskDraft) -> TaskServiceResult<TaskId> {
        let tags = draft.tags.clone();
        let id = match self.store.state().editing_task {
            Some(id) => {
                self.update_task(id, draft)?;
                id
            }
            None => {
                let kind = self.store.state().task_type;
                self.create_task(kind, draft)?
            }
        };
        self.merge_global_tags(tags);
        self.close_form();
        Ok(id)
    }

    /// Appends a new task to the collection for `kind`.
    pub fn create_task(&mut self, kind: TaskKind, draft: TaskDraft) -> TaskServiceResult<TaskId> {
        let now = self.clock.now();
        let id = next_task_id(self.store.state(), now.timestamp_millis())?;
        let mut task = Task::new(id, kind, String::new());
        task.created_at = Some(now);
        draft.apply_to(&mut task);
        task.validate()?;

        let mut tasks = self.store.state().tasks(kind).as_ref().clone();
        tasks.push(task);
        self.replace(kind, tasks);
        info!(
            "event=task_create module=service status=ok kind={} task_id={id}",
            kind.as_str()
        );
        Ok(id)
    }

    /// Replaces the editable fields of task `id`.
    pub fn update_task(&mut self, id: TaskId, draft: TaskDraft) -> TaskServiceResult<()> {
        self.modify(id, |task| {
            draft.apply_to(task);
            task.validate()
        })?;
        info!("event=task_update module=service status=ok task_id={id}");
        Ok(())
    }

    /// Removes task `id` from its collection.
    pub fn delete_task(&mut self, id: TaskId) -> TaskServiceResult<()> {
        let kind = self.kind_of(id)?;
        let tasks: Vec<Task> = self
            .store
            .state()
            .tasks(kind)
            .iter()
            .filter(|task| task.id != id)
            .cloned()
            .collect();
        self.replace(kind, tasks);
        info!("event=task_delete module=service status=ok task_id={id}");
        Ok(())
    }

    /// Flips the checkbox flag; returns the new value. Status is untouched.
    pub fn toggle_completed(&mut self, id: TaskId) -> TaskServiceResult<bool> {
        let mut completed = false;
        self.modify(id, |task| {
            task.completed = !task.completed;
            completed = task.completed;
            Ok(())
        })?;
        Ok(completed)
    }

    /// Moves task `id` to a board column.
    pub fn move_to_status(&mut self, id: TaskId, status: TaskStatus) -> TaskServiceResult<()> {
        self.modify(id, |task| {
            task.status = status;
            Ok(())
        })
    }

    fn kind_of(&self, id: TaskId) -> TaskServiceResult<TaskKind> {
        self.store
            .state()
            .find_task(id)
            .map(|task| task.kind)
            .ok_or(TaskServiceError::TaskNotFound(id))
    }

    fn modify(
        &mut self,
        id: TaskId,
        edit: impl FnOnce(&mut Task) -> Result<(), TaskValidationError>,
    ) -> TaskServiceResult<()> {
        let kind = self.kind_of(id)?;
        let mut tasks = self.store.state().tasks(kind).as_ref().clone();
        let task = tasks
            .iter_mut()
            .find(|task| task.id == id)
            .ok_or(TaskServiceError::TaskNotFound(id))?;
        edit(task)?;
        self.replace(kind, tasks);
        Ok(())
    }

    fn replace(&mut self, kind: TaskKind, tasks: Vec<Task>) {
        let action = match kind {
            TaskKind::Client => Action::SetClientTasks(tasks),
            TaskKind::Personal => Action::SetPersonalTasks(tasks),
        };
        self.store.dispatch(action);
    }

    fn merge_global_tags(&mut self, tags: Vec<String>) {
        let merged = self.store.state().tags.iter().cloned().chain(tags);
        self.store.dispatch(Action::SetTags(normalize_tags(merged)));
    }
}
