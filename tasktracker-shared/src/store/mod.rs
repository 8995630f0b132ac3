//! Persistence traits for tasks and sessions
//!
//! The HTTP layer only ever sees these traits. Two backends exist:
//!
//! - `postgres`: the production backend, one table per store
//! - `memory`: an in-process backend used by the API test suites
//!
//! Each operation touches exactly one record; there are no cross-operation
//! transactions and single-record writes are atomic at the database.
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::session::SessionRecord;
use crate::models::task::{NewTask, Task, TaskChanges};

pub mod memory;
pub mod postgres;

pub use memory::{MemorySessionStore, MemoryTaskStore};
pub use postgres::{PgSessionStore, PgTaskStore};

/// Store error type
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Database operation failed or the database is unavailable
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A stored record could not be decoded
    #[error("corrupt stored record: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Store result type alias
pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence for task records
///
/// The task store exclusively owns task records; nothing else writes them.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Returns all tasks sorted by `created_at` descending (newest first)
    async fn list(&self) -> StoreResult<Vec<Task>>;

    /// Persists a new task, assigning its id and timestamps
    async fn create(&self, data: NewTask) -> StoreResult<Task>;

    /// Applies `changes` to the task with the given id and refreshes
    /// `updated_at`
    ///
    /// Returns `None` when no task has that id.
    async fn update(&self, id: Uuid, changes: TaskChanges) -> StoreResult<Option<Task>>;

    /// Removes the task with the given id
    ///
    /// Returns `false` when no task has that id.
    async fn delete(&self, id: Uuid) -> StoreResult<bool>;
}

/// Persistence for session records
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Loads a session by token
    async fn get(&self, id: &str) -> StoreResult<Option<SessionRecord>>;

    /// Persists a freshly issued session
    async fn insert(&self, record: &SessionRecord) -> StoreResult<()>;

    /// Persists a refreshed expiry for an existing session
    ///
    /// Callers throttle this via `SessionRecord::needs_touch`; the store
    /// just writes what it is given.
    async fn touch(&self, record: &SessionRecord) -> StoreResult<()>;

    /// Destroys a session record entirely
    ///
    /// Destroying an unknown token is not an error (logout is idempotent).
    async fn destroy(&self, id: &str) -> StoreResult<()>;

    /// Removes every session whose expiry has passed, returning the count
    async fn delete_expired(&self, now: DateTime<Utc>) -> StoreResult<u64>;
}
