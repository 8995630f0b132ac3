//! Authentication endpoints
//!
//! - `POST /login` - Validate the fixed credential pair and issue a session
//! - `POST /logout` - Destroy the current session (idempotent)
//! - `GET /dashboard` - Session-gated landing data
//!
//! Login and logout intentionally mirror the historical wire shape:
//! `{success, message}` bodies, with 401 on bad credentials.

use axum::{
    extract::{Extension, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use tasktracker_shared::models::session::{SessionRecord, SessionUser};

use crate::{
    app::AppState,
    config::SessionConfig,
    error::{ApiError, ApiResult},
    middleware::session::CurrentUser,
};

/// Login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Username
    pub username: String,

    /// Password
    pub password: String,
}

/// Login / logout response
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    /// Whether the operation succeeded
    pub success: bool,

    /// Human-readable outcome
    pub message: String,
}

/// Dashboard response
#[derive(Debug, Serialize, Deserialize)]
pub struct DashboardResponse {
    /// Greeting line
    pub message: String,

    /// The authenticated user
    pub user: SessionUser,
}

/// Login handler
///
/// On a credential match, persists an authenticated session and hands the
/// token to the client in an http-only cookie. On mismatch, responds 401 and
/// leaves the client anonymous; no session record is written.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Response> {
    if !state.credentials.verify(&req.username, &req.password) {
        tracing::warn!(username = %req.username, "Login rejected: invalid credentials");
        let body = Json(AuthResponse {
            success: false,
            message: "Invalid credentials".to_string(),
        });
        return Ok((StatusCode::UNAUTHORIZED, body).into_response());
    }

    let record = SessionRecord::authenticated(
        SessionUser::admin(req.username),
        state.config.session.ttl(),
    );
    state.sessions.insert(&record).await?;

    tracing::info!(session = %record.id, "Login successful");

    let jar = jar.add(session_cookie(
        &state.config.session,
        state.config.api.production,
        record.id,
    ));
    let body = Json(AuthResponse {
        success: true,
        message: "Login successful".to_string(),
    });

    Ok((jar, body).into_response())
}

/// Logout handler
///
/// Destroys the session record entirely rather than just clearing its user.
/// Idempotent: logging out without a session still succeeds.
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> ApiResult<(CookieJar, Json<AuthResponse>)> {
    if let Some(cookie) = jar.get(&state.config.session.cookie_name) {
        state.sessions.destroy(cookie.value()).await.map_err(|err| {
            ApiError::InternalError(format!("Failed to destroy session: {}", err))
        })?;
    }

    let jar = jar.remove(
        Cookie::build((state.config.session.cookie_name.clone(), ""))
            .path("/")
            .build(),
    );

    Ok((
        jar,
        Json(AuthResponse {
            success: true,
            message: "Logged out successfully".to_string(),
        }),
    ))
}

/// Dashboard handler
///
/// The session gate: anonymous and expired sessions are rejected with 401.
pub async fn dashboard(
    current_user: Option<Extension<CurrentUser>>,
) -> ApiResult<Json<DashboardResponse>> {
    let Some(Extension(CurrentUser(user))) = current_user else {
        return Err(ApiError::Unauthorized("Not authenticated".to_string()));
    };

    Ok(Json(DashboardResponse {
        message: "Dashboard access granted".to_string(),
        user,
    }))
}

/// Builds the session cookie: http-only, secure in production, max-age
/// matching the record time-to-live
fn session_cookie(config: &SessionConfig, production: bool, token: String) -> Cookie<'static> {
    Cookie::build((config.cookie_name.clone(), token))
        .http_only(true)
        .secure(production)
        .same_site(SameSite::Lax)
        .max_age(config.cookie_max_age())
        .path("/")
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_cookie_attributes() {
        let config = crate::config::tests::test_config();
        let cookie = session_cookie(&config.session, true, "token123".to_string());

        assert_eq!(cookie.name(), "tasktracker_sid");
        assert_eq!(cookie.value(), "token123");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.max_age(), Some(time::Duration::days(14)));
        assert_eq!(cookie.path(), Some("/"));
    }

    #[test]
    fn test_secure_flag_follows_environment() {
        let config = crate::config::tests::test_config();
        let cookie = session_cookie(&config.session, false, "token123".to_string());
        assert_eq!(cookie.secure(), Some(false));
    }
}
