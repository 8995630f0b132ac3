//! Task model
//!
//! A task is a unit of work record with a status enum. Tasks form a single
//! shared list; they are not owned by users.
//!
//! # Schema
//!
//! ```sql
//! CREATE TYPE task_status AS ENUM ('todo', 'in-progress', 'done');
//!
//! CREATE TABLE tasks (
//!     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
//!     title TEXT NOT NULL CHECK (char_length(title) > 0),
//!     description TEXT NOT NULL DEFAULT '',
//!     status task_status NOT NULL DEFAULT 'todo',
//!     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
//!     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
//! );
//! ```
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Task status
///
/// The status set is closed; values outside it are rejected at both the
/// request layer and the database (enum column type), never coerced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "task_status", rename_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    /// Not started yet (default)
    Todo,

    /// Currently being worked on
    InProgress,

    /// Finished
    Done,
}

impl Default for TaskStatus {
    fn default() -> Self {
        TaskStatus::Todo
    }
}

impl TaskStatus {
    /// Converts status to its wire/database string
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "in-progress",
            TaskStatus::Done => "done",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = InvalidStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "todo" => Ok(TaskStatus::Todo),
            "in-progress" => Ok(TaskStatus::InProgress),
            "done" => Ok(TaskStatus::Done),
            other => Err(InvalidStatus(other.to_string())),
        }
    }
}

/// Error returned when a status string is outside the enum
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid task status: {0:?} (expected one of: todo, in-progress, done)")]
pub struct InvalidStatus(pub String);

/// Task record
///
/// Serialized with camelCase field names so the JSON shape matches the
/// public API contract (`createdAt`, `updatedAt`).
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique task ID, assigned at creation, immutable
    pub id: Uuid,

    /// Required non-empty title
    pub title: String,

    /// Free-form description, empty when not provided
    pub description: String,

    /// Current status
    pub status: TaskStatus,

    /// When the task was created (set once)
    pub created_at: DateTime<Utc>,

    /// When the task was last updated (refreshed on every update)
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new task
#[derive(Debug, Clone)]
pub struct NewTask {
    /// Task title (already validated non-empty)
    pub title: String,

    /// Description, defaults to empty
    pub description: String,

    /// Initial status, defaults to `todo`
    pub status: TaskStatus,
}

/// Input for updating an existing task
///
/// `None` fields are left unchanged; `updated_at` is always refreshed.
#[derive(Debug, Clone, Default)]
pub struct TaskChanges {
    /// New title
    pub title: Option<String>,

    /// New description
    pub description: Option<String>,

    /// New status
    pub status: Option<TaskStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trips_through_strings() {
        for status in [TaskStatus::Todo, TaskStatus::InProgress, TaskStatus::Done] {
            assert_eq!(status.as_str().parse::<TaskStatus>().unwrap(), status);
        }
    }

    #[test]
    fn test_status_rejects_values_outside_the_enum() {
        let err = "bogus".parse::<TaskStatus>().unwrap_err();
        assert_eq!(err, InvalidStatus("bogus".to_string()));

        // Casing matters; only the exact wire strings are accepted
        assert!("Todo".parse::<TaskStatus>().is_err());
        assert!("".parse::<TaskStatus>().is_err());
    }

    #[test]
    fn test_status_serde_uses_kebab_case() {
        let json = serde_json::to_string(&TaskStatus::InProgress).unwrap();
        assert_eq!(json, "\"in-progress\"");

        let status: TaskStatus = serde_json::from_str("\"done\"").unwrap();
        assert_eq!(status, TaskStatus::Done);

        assert!(serde_json::from_str::<TaskStatus>("\"bogus\"").is_err());
    }

    #[test]
    fn test_task_serializes_camel_case_timestamps() {
        let task = Task {
            id: Uuid::new_v4(),
            title: "Buy milk".to_string(),
            description: String::new(),
            status: TaskStatus::Todo,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_value(&task).unwrap();
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());
        assert_eq!(json["status"], "todo");
    }
}
