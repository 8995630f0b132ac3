//! Common test utilities for the API integration tests
//!
//! Builds the full router over the in-memory stores so the complete HTTP
//! surface can be exercised without a database, plus small helpers for
//! issuing requests and reading JSON bodies.

use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use std::sync::Arc;
use tasktracker_api::app::{build_router, AppState};
use tasktracker_api::auth::FixedCredentials;
use tasktracker_api::config::{
    ApiConfig, AuthConfig, Config, DatabaseSettings, DiagnosticsConfig, SessionConfig,
};
use tasktracker_shared::store::{MemorySessionStore, MemoryTaskStore, SessionStore, TaskStore};
use tower::ServiceExt;

/// Test context holding the router and direct handles to the stores
pub struct TestContext {
    pub app: axum::Router,
    pub tasks: Arc<MemoryTaskStore>,
    pub sessions: Arc<MemorySessionStore>,
    pub config: Config,
}

impl TestContext {
    /// Creates a fresh application over empty in-memory stores
    pub fn new() -> Self {
        let config = test_config();
        let tasks = Arc::new(MemoryTaskStore::new());
        let sessions = Arc::new(MemorySessionStore::new());

        let state = AppState::new(
            tasks.clone() as Arc<dyn TaskStore>,
            sessions.clone() as Arc<dyn SessionStore>,
            Arc::new(FixedCredentials::new("admin", "password")),
            config.clone(),
        );

        TestContext {
            app: build_router(state),
            tasks,
            sessions,
            config,
        }
    }

    /// Issues a request and returns the raw response
    pub async fn send(
        &self,
        method: &str,
        uri: &str,
        body: Option<serde_json::Value>,
        cookie: Option<&str>,
    ) -> Response<Body> {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        self.app.clone().oneshot(request).await.unwrap()
    }

    /// Issues a request and returns status plus parsed JSON body
    pub async fn send_json(
        &self,
        method: &str,
        uri: &str,
        body: Option<serde_json::Value>,
        cookie: Option<&str>,
    ) -> (StatusCode, serde_json::Value) {
        let response = self.send(method, uri, body, cookie).await;
        let status = response.status();
        let json = read_json(response).await;
        (status, json)
    }

    /// Logs in with the fixed credentials and returns the session cookie
    /// as a `Cookie` header value
    pub async fn login(&self) -> String {
        let response = self
            .send(
                "POST",
                "/login",
                Some(serde_json::json!({"username": "admin", "password": "password"})),
                None,
            )
            .await;

        assert_eq!(response.status(), StatusCode::OK);

        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .expect("login response must set the session cookie")
            .to_str()
            .unwrap();

        // Keep only the name=value pair
        set_cookie
            .split(';')
            .next()
            .unwrap()
            .trim()
            .to_string()
    }
}

/// Reads and parses a JSON response body (null for empty bodies)
pub async fn read_json(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    }
}

fn test_config() -> Config {
    Config {
        api: ApiConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            production: false,
            static_dir: "public".to_string(),
        },
        database: DatabaseSettings {
            url: "postgres://localhost:5432/tasktracker".to_string(),
            max_connections: 10,
        },
        auth: AuthConfig {
            admin_username: "admin".to_string(),
            admin_password: "password".to_string(),
        },
        session: SessionConfig {
            cookie_name: "tasktracker_sid".to_string(),
            ttl_seconds: 14 * 24 * 60 * 60,
            touch_after_seconds: 24 * 60 * 60,
            sweep_interval_seconds: 3600,
        },
        diagnostics: DiagnosticsConfig {
            memory_log_interval_seconds: 300,
        },
    }
}
