//! In-memory stores
//!
//! Process-local backends implementing the same contracts as the Postgres
//! stores, used by the API test suites so the full HTTP surface can be
//! exercised without a database.
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::session::SessionRecord;
use crate::models::task::{NewTask, Task, TaskChanges};
use crate::store::{SessionStore, StoreResult, TaskStore};

/// In-memory task store
#[derive(Debug, Default)]
pub struct MemoryTaskStore {
    // Insertion order preserved so ties on created_at still list newest first
    tasks: RwLock<Vec<Task>>,
}

impl MemoryTaskStore {
    /// Creates an empty task store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskStore for MemoryTaskStore {
    async fn list(&self) -> StoreResult<Vec<Task>> {
        let tasks = self.tasks.read().await;

        // Reverse first so the stable sort keeps later insertions ahead of
        // earlier ones when created_at collides
        let mut sorted: Vec<Task> = tasks.iter().rev().cloned().collect();
        sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(sorted)
    }

    async fn create(&self, data: NewTask) -> StoreResult<Task> {
        let now = Utc::now();
        let task = Task {
            id: Uuid::new_v4(),
            title: data.title,
            description: data.description,
            status: data.status,
            created_at: now,
            updated_at: now,
        };

        self.tasks.write().await.push(task.clone());
        Ok(task)
    }

    async fn update(&self, id: Uuid, changes: TaskChanges) -> StoreResult<Option<Task>> {
        let mut tasks = self.tasks.write().await;

        let Some(task) = tasks.iter_mut().find(|t| t.id == id) else {
            return Ok(None);
        };

        if let Some(title) = changes.title {
            task.title = title;
        }
        if let Some(description) = changes.description {
            task.description = description;
        }
        if let Some(status) = changes.status {
            task.status = status;
        }
        task.updated_at = Utc::now();

        Ok(Some(task.clone()))
    }

    async fn delete(&self, id: Uuid) -> StoreResult<bool> {
        let mut tasks = self.tasks.write().await;
        let before = tasks.len();
        tasks.retain(|t| t.id != id);

        Ok(tasks.len() < before)
    }
}

/// In-memory session store
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    sessions: RwLock<HashMap<String, SessionRecord>>,
}

impl MemorySessionStore {
    /// Creates an empty session store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn get(&self, id: &str) -> StoreResult<Option<SessionRecord>> {
        Ok(self.sessions.read().await.get(id).cloned())
    }

    async fn insert(&self, record: &SessionRecord) -> StoreResult<()> {
        self.sessions
            .write()
            .await
            .insert(record.id.clone(), record.clone());
        Ok(())
    }

    async fn touch(&self, record: &SessionRecord) -> StoreResult<()> {
        if let Some(stored) = self.sessions.write().await.get_mut(&record.id) {
            stored.expires_at = record.expires_at;
            stored.touched_at = record.touched_at;
        }
        Ok(())
    }

    async fn destroy(&self, id: &str) -> StoreResult<()> {
        self.sessions.write().await.remove(id);
        Ok(())
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> StoreResult<u64> {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, record| !record.is_expired(now));

        Ok((before - sessions.len()) as u64)
    }
}
