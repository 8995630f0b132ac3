//! Session-loading middleware
//!
//! Runs on every request. Resolves the cookie token to a stored session and,
//! when that session is live and authenticated, inserts `CurrentUser` into
//! the request extensions for handlers to consume. Requests without a valid
//! authenticated session simply pass through anonymous; gating happens at
//! the handlers that require authentication.
//!
//! The state machine is Anonymous → Authenticated → Destroyed. An expired
//! record is treated as destroyed here and left for the sweep to remove.
//! Live sessions get their expiry extended opportunistically, throttled to
//! one write per refresh window; that write is best-effort and never fails
//! the request.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::CookieJar;
use chrono::Utc;
use tasktracker_shared::models::session::SessionUser;

use crate::app::AppState;

/// Authenticated user attached to the request by the session middleware
#[derive(Debug, Clone)]
pub struct CurrentUser(pub SessionUser);

/// Loads the session for the request cookie, if any
pub async fn session_context(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    if let Some(cookie) = jar.get(&state.config.session.cookie_name) {
        match state.sessions.get(cookie.value()).await {
            Ok(Some(mut record)) => {
                let now = Utc::now();
                if record.is_expired(now) {
                    // Terminal: the sweep removes the row, the client gets a
                    // fresh session on its next login
                    tracing::debug!(session = %record.id, "Ignoring expired session");
                } else {
                    if record.needs_touch(now, state.config.session.touch_throttle()) {
                        record.touch(now, state.config.session.ttl());
                        if let Err(err) = state.sessions.touch(&record).await {
                            tracing::warn!("Failed to refresh session expiry: {}", err);
                        }
                    }

                    // A session without a user is anonymous and grants nothing
                    if let Some(user) = record.user.clone() {
                        request.extensions_mut().insert(CurrentUser(user));
                    }
                }
            }
            Ok(None) => {
                tracing::debug!("Session cookie references no stored session");
            }
            Err(err) => {
                // Treat the request as anonymous rather than failing it
                tracing::warn!("Failed to load session: {}", err);
            }
        }
    }

    next.run(request).await
}
