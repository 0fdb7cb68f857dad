//! Task domain model.
//!
//! # Responsibility
//! - Define the task record shared by list, board, calendar and analytics
//!   projections.
//! - Normalize tags and validate required fields before tasks enter state.
//!
//! # Invariants
//! - `id` is unique across client and personal collections.
//! - `kind` is authoritative for client/personal classification.
//! - `tags` hold no blanks and no duplicates (case-sensitive), order preserved.
//! - Optional text fields are trimmed and never hold blank text.

use crate::model::lenient::{normalize_text, optional_date, optional_text, optional_timestamp};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Task identifier, derived from the creation timestamp in milliseconds.
pub type TaskId = i64;

/// Which collection a task belongs to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskKind {
    /// Work done for a client; carries billing fields.
    #[default]
    Client,
    /// Personal to-do.
    Personal,
}

impl TaskKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Client => "client",
            Self::Personal => "personal",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "client" => Some(Self::Client),
            "personal" => Some(Self::Personal),
            _ => None,
        }
    }
}

/// Workflow status; also the kanban column a task sits in.
///
/// Decoding is lenient: unknown names fall back to `NotStarted`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum TaskStatus {
    #[default]
    #[serde(rename = "Not Started")]
    NotStarted,
    Started,
    Processing,
    Review,
    #[serde(rename = "Review Correction")]
    ReviewCorrection,
    Completed,
}

impl TaskStatus {
    /// Board column order.
    pub const ALL: [TaskStatus; 6] = [
        Self::NotStarted,
        Self::Started,
        Self::Processing,
        Self::Review,
        Self::ReviewCorrection,
        Self::Completed,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotStarted => "Not Started",
            Self::Started => "Started",
            Self::Processing => "Processing",
            Self::Review => "Review",
            Self::ReviewCorrection => "Review Correction",
            Self::Completed => "Completed",
        }
    }

    /// Strict parse used at input boundaries.
    ///
    /// Case-insensitive; the legacy `In Progress` label maps to `Processing`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "not started" => Some(Self::NotStarted),
            "started" => Some(Self::Started),
            "processing" | "in progress" => Some(Self::Processing),
            "review" => Some(Self::Review),
            "review correction" => Some(Self::ReviewCorrection),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }

    pub fn is_completed(self) -> bool {
        self == Self::Completed
    }
}

impl From<String> for TaskStatus {
    fn from(value: String) -> Self {
        Self::parse(&value).unwrap_or_default()
    }
}

/// Task priority. Decoding is lenient: unknown names fall back to `Medium`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl Priority {
    pub const ALL: [Priority; 4] = [Self::Low, Self::Medium, Self::High, Self::Urgent];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Urgent => "Urgent",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            "urgent" => Some(Self::Urgent),
            _ => None,
        }
    }
}

impl From<String> for Priority {
    fn from(value: String) -> Self {
        Self::parse(&value).unwrap_or_default()
    }
}

/// Validation failures for task writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    /// `project_name` is empty after trimming.
    EmptyProjectName,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyProjectName => write!(f, "project name is required"),
        }
    }
}

impl Error for TaskValidationError {}

/// One client or personal task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    /// Missing in records written by older builds; stamped from the
    /// collection the record was loaded from.
    #[serde(default)]
    pub kind: TaskKind,
    pub project_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "optional_text"
    )]
    pub client_name: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "optional_date"
    )]
    pub start_date: Option<NaiveDate>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "optional_date"
    )]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub priority: Priority,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "optional_text"
    )]
    pub category: Option<String>,
    /// Currency-formatted decimal, e.g. `$1,250.00`.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "optional_text"
    )]
    pub total_amount: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "optional_text"
    )]
    pub amount_paid: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "optional_text"
    )]
    pub outstanding_amount: Option<String>,
    #[serde(default)]
    pub files: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "optional_timestamp"
    )]
    pub created_at: Option<DateTime<Utc>>,
    /// Checkbox state shown on personal tasks.
    #[serde(default)]
    pub completed: bool,
}

impl Task {
    /// Creates a task with defaults for every optional field.
    pub fn new(id: TaskId, kind: TaskKind, project_name: impl Into<String>) -> Self {
        Self {
            id,
            kind,
            project_name: project_name.into(),
            description: String::new(),
            client_name: None,
            start_date: None,
            due_date: None,
            status: TaskStatus::NotStarted,
            priority: Priority::Medium,
            category: None,
            total_amount: None,
            amount_paid: None,
            outstanding_amount: None,
            files: Vec::new(),
            tags: Vec::new(),
            created_at: None,
            completed: false,
        }
    }

    /// Checks required fields. A due date before the start date is allowed.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.project_name.trim().is_empty() {
            return Err(TaskValidationError::EmptyProjectName);
        }
        Ok(())
    }

    /// Brings optional text and tags into the shape decoding produces, so a
    /// stored task reads back equal to the one that was written.
    pub fn canonicalize(&mut self) {
        for field in [
            &mut self.client_name,
            &mut self.category,
            &mut self.total_amount,
            &mut self.amount_paid,
            &mut self.outstanding_amount,
        ] {
            *field = normalize_text(field.take());
        }
        self.tags = normalize_tags(&self.tags);
    }

    pub fn is_completed(&self) -> bool {
        self.status.is_completed()
    }

    /// Timestamp used for "most recent" ordering.
    ///
    /// Falls back to the id, which is itself a millisecond timestamp.
    pub fn recency_key(&self) -> i64 {
        self.created_at
            .map(|created| created.timestamp_millis())
            .unwrap_or(self.id)
    }
}

/// Trims tags, drops blanks and removes case-sensitive duplicates.
///
/// The first occurrence of each tag keeps its position.
pub fn normalize_tags<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut normalized = Vec::new();
    for tag in tags {
        let trimmed = tag.as_ref().trim();
        if trimmed.is_empty() {
            continue;
        }
        if seen.insert(trimmed.to_string()) {
            normalized.push(trimmed.to_string());
        }
    }
    normalized
}
