//! PostgreSQL-backed stores
//!
//! Queries are runtime-checked (`sqlx::query_as`) against the schema in
//! `migrations/`. The `tasks.status` column is the `task_status` enum type,
//! so out-of-range values are rejected by the database itself; the API layer
//! validates first and never relies on silent coercion.
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::session::{SessionRecord, SessionUser};
use crate::models::task::{NewTask, Task, TaskChanges};
use crate::store::{SessionStore, StoreResult, TaskStore};

/// Task store backed by the `tasks` table
#[derive(Debug, Clone)]
pub struct PgTaskStore {
    pool: PgPool,
}

impl PgTaskStore {
    /// Creates a task store over an existing pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskStore for PgTaskStore {
    async fn list(&self) -> StoreResult<Vec<Task>> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, title, description, status, created_at, updated_at
            FROM tasks
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(tasks)
    }

    async fn create(&self, data: NewTask) -> StoreResult<Task> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (title, description, status)
            VALUES ($1, $2, $3)
            RETURNING id, title, description, status, created_at, updated_at
            "#,
        )
        .bind(data.title)
        .bind(data.description)
        .bind(data.status)
        .fetch_one(&self.pool)
        .await?;

        Ok(task)
    }

    async fn update(&self, id: Uuid, changes: TaskChanges) -> StoreResult<Option<Task>> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET title = COALESCE($2, title),
                description = COALESCE($3, description),
                status = COALESCE($4, status),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, title, description, status, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(changes.title)
        .bind(changes.description)
        .bind(changes.status)
        .fetch_optional(&self.pool)
        .await?;

        Ok(task)
    }

    async fn delete(&self, id: Uuid) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

/// Session store backed by the `sessions` table
#[derive(Debug, Clone)]
pub struct PgSessionStore {
    pool: PgPool,
}

impl PgSessionStore {
    /// Creates a session store over an existing pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Raw row shape for the `sessions` table
#[derive(sqlx::FromRow)]
struct SessionRow {
    id: String,
    user_data: Option<JsonValue>,
    expires_at: DateTime<Utc>,
    touched_at: DateTime<Utc>,
}

impl SessionRow {
    fn into_record(self) -> StoreResult<SessionRecord> {
        let user = self
            .user_data
            .map(serde_json::from_value::<SessionUser>)
            .transpose()?;

        Ok(SessionRecord {
            id: self.id,
            user,
            expires_at: self.expires_at,
            touched_at: self.touched_at,
        })
    }
}

#[async_trait]
impl SessionStore for PgSessionStore {
    async fn get(&self, id: &str) -> StoreResult<Option<SessionRecord>> {
        let row = sqlx::query_as::<_, SessionRow>(
            r#"
            SELECT id, user_data, expires_at, touched_at
            FROM sessions
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(SessionRow::into_record).transpose()
    }

    async fn insert(&self, record: &SessionRecord) -> StoreResult<()> {
        let user_data = record
            .user
            .as_ref()
            .map(serde_json::to_value)
            .transpose()?;

        sqlx::query(
            r#"
            INSERT INTO sessions (id, user_data, expires_at, touched_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(&record.id)
        .bind(user_data)
        .bind(record.expires_at)
        .bind(record.touched_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn touch(&self, record: &SessionRecord) -> StoreResult<()> {
        sqlx::query(
            r#"
            UPDATE sessions
            SET expires_at = $2, touched_at = $3
            WHERE id = $1
            "#,
        )
        .bind(&record.id)
        .bind(record.expires_at)
        .bind(record.touched_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn destroy(&self, id: &str) -> StoreResult<()> {
        sqlx::query("DELETE FROM sessions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> StoreResult<u64> {
        let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= $1")
            .bind(now)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

// Integration tests require a running database; the API test suites use the
// in-memory stores instead.
