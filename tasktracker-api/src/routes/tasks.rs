//! Task CRUD endpoints
//!
//! - `GET    /api/tasks`     - List all tasks, newest first
//! - `POST   /api/tasks`     - Create a task
//! - `PUT    /api/tasks/:id` - Update a task's mutable fields
//! - `DELETE /api/tasks/:id` - Delete a task
//!
//! These endpoints are deliberately not session-gated: the task list is a
//! single shared collection and the historical contract leaves it open.
//!
//! Each operation touches exactly one record. Validation happens here:
//! `title` must be non-empty and `status` must be one of the three enum
//! values; anything else is rejected with a validation error rather than
//! silently coerced.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tasktracker_shared::models::task::{NewTask, Task, TaskChanges, TaskStatus};
use uuid::Uuid;
use validator::Validate;

use crate::{
    app::AppState,
    error::{ApiError, ApiResult, ValidationErrorDetail},
};

/// Request body for creating or updating a task
#[derive(Debug, Deserialize, Validate)]
pub struct TaskPayload {
    /// Required non-empty title
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,

    /// Optional description
    pub description: Option<String>,

    /// Optional status; must be one of todo, in-progress, done
    pub status: Option<String>,
}

impl TaskPayload {
    /// Validates the payload and parses the status string
    ///
    /// Status arrives as a plain string so an out-of-range value surfaces as
    /// a field-level validation error instead of a body-parse failure.
    fn validated_status(&self) -> ApiResult<Option<TaskStatus>> {
        self.validate()?;

        self.status
            .as_deref()
            .map(|s| {
                s.parse::<TaskStatus>().map_err(|err| {
                    ApiError::ValidationError(vec![ValidationErrorDetail {
                        field: "status".to_string(),
                        message: err.to_string(),
                    }])
                })
            })
            .transpose()
    }
}

/// Confirmation body for deletes
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Human-readable confirmation
    pub message: String,
}

/// Lists all tasks sorted by creation time, newest first
pub async fn list_tasks(State(state): State<AppState>) -> ApiResult<Json<Vec<Task>>> {
    let tasks = state.tasks.list().await?;
    Ok(Json(tasks))
}

/// Creates a task, assigning its id and timestamps
pub async fn create_task(
    State(state): State<AppState>,
    Json(req): Json<TaskPayload>,
) -> ApiResult<(StatusCode, Json<Task>)> {
    let status = req.validated_status()?;

    let task = state
        .tasks
        .create(NewTask {
            title: req.title,
            description: req.description.unwrap_or_default(),
            status: status.unwrap_or_default(),
        })
        .await?;

    tracing::info!(task = %task.id, "Task created");
    Ok((StatusCode::CREATED, Json(task)))
}

/// Updates a task's mutable fields and refreshes `updated_at`
///
/// Absent optional fields are left unchanged.
pub async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<TaskPayload>,
) -> ApiResult<Json<Task>> {
    let status = req.validated_status()?;

    let updated = state
        .tasks
        .update(
            id,
            TaskChanges {
                title: Some(req.title),
                description: req.description,
                status,
            },
        )
        .await?;

    match updated {
        Some(task) => {
            tracing::info!(task = %task.id, "Task updated");
            Ok(Json(task))
        }
        None => Err(ApiError::NotFound("Task not found".to_string())),
    }
}

/// Deletes a task by id
pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<MessageResponse>> {
    if state.tasks.delete(id).await? {
        tracing::info!(task = %id, "Task deleted");
        Ok(Json(MessageResponse {
            message: "Task deleted successfully".to_string(),
        }))
    } else {
        Err(ApiError::NotFound("Task not found".to_string()))
    }
}
