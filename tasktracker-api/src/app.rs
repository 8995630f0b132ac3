//! Application state and router builder
//!
//! # Router layout
//!
//! ```text
//! /
//! ├── /health            # Diagnostics (public)
//! ├── /login             # Issue a session (public)
//! ├── /logout            # Destroy the session (public, idempotent)
//! ├── /dashboard         # Session-gated
//! ├── /api/
//! │   ├── GET    /tasks
//! │   ├── POST   /tasks
//! │   ├── PUT    /tasks/:id
//! │   └── DELETE /tasks/:id
//! └── (fallback)         # Static client pages from STATIC_DIR
//! ```
//!
//! # Middleware stack
//!
//! Applied outermost first: request tracing (tower-http TraceLayer), then
//! the session-loading middleware. The task endpoints sit behind no
//! authentication gate; only the dashboard checks the session.

use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use std::time::Instant;
use tasktracker_shared::store::{SessionStore, TaskStore};
use tower_http::{
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::{auth::CredentialVerifier, config::Config, middleware, routes};

/// Shared application state
///
/// Cloned per request via Axum's `State` extractor; all fields are cheap
/// Arc handles. Stores and the credential verifier are trait objects so the
/// test suites can swap in in-memory backends.
#[derive(Clone)]
pub struct AppState {
    /// Task persistence
    pub tasks: Arc<dyn TaskStore>,

    /// Session persistence
    pub sessions: Arc<dyn SessionStore>,

    /// Login credential check
    pub credentials: Arc<dyn CredentialVerifier>,

    /// Application configuration
    pub config: Arc<Config>,

    /// Process start, for the uptime report
    started_at: Instant,
}

impl AppState {
    /// Creates new application state
    pub fn new(
        tasks: Arc<dyn TaskStore>,
        sessions: Arc<dyn SessionStore>,
        credentials: Arc<dyn CredentialVerifier>,
        config: Config,
    ) -> Self {
        Self {
            tasks,
            sessions,
            credentials,
            config: Arc::new(config),
            started_at: Instant::now(),
        }
    }

    /// Seconds since the state was created (process start)
    pub fn uptime_seconds(&self) -> f64 {
        self.started_at.elapsed().as_secs_f64()
    }
}

/// Builds the complete Axum router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let task_routes = Router::new()
        .route(
            "/tasks",
            get(routes::tasks::list_tasks).post(routes::tasks::create_task),
        )
        .route(
            "/tasks/:id",
            put(routes::tasks::update_task).delete(routes::tasks::delete_task),
        );

    Router::new()
        .route("/health", get(routes::health::health))
        .route("/login", post(routes::auth::login))
        .route("/logout", post(routes::auth::logout))
        .route("/dashboard", get(routes::auth::dashboard))
        .nest("/api", task_routes)
        .fallback_service(ServeDir::new(&state.config.api.static_dir))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::session::session_context,
        ))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}
