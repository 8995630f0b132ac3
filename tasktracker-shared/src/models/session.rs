//! Session model
//!
//! A session is the server-side record of a client's authentication state,
//! referenced by an opaque token held in an http-only cookie.
//!
//! # State Machine
//!
//! ```text
//! Anonymous → Authenticated (successful login)
//! Authenticated → Destroyed (logout, or passive expiry sweep)
//! ```
//!
//! Destroyed is terminal for a token; a later login mints a fresh one.
//!
//! # Schema
//!
//! ```sql
//! CREATE TABLE sessions (
//!     id TEXT PRIMARY KEY,
//!     user_data JSONB,
//!     expires_at TIMESTAMPTZ NOT NULL,
//!     touched_at TIMESTAMPTZ NOT NULL,
//!     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
//! );
//! ```
use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Length of a session token (characters)
const TOKEN_LENGTH: usize = 32;

/// Authenticated principal stored inside a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    /// Username the session was issued to
    pub username: String,

    /// Role granted at login
    pub role: String,
}

impl SessionUser {
    /// Creates an admin principal for the given username
    pub fn admin(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            role: "admin".to_string(),
        }
    }
}

/// Server-side session record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Opaque session token (cookie value)
    pub id: String,

    /// Authenticated user, `None` while the session is anonymous
    pub user: Option<SessionUser>,

    /// When the session expires; extended on activity, at most once per
    /// touch window
    pub expires_at: DateTime<Utc>,

    /// When `expires_at` was last refreshed
    pub touched_at: DateTime<Utc>,
}

impl SessionRecord {
    /// Creates an authenticated session with a fresh token and the given
    /// time-to-live
    pub fn authenticated(user: SessionUser, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            id: generate_token(),
            user: Some(user),
            expires_at: now + ttl,
            touched_at: now,
        }
    }

    /// True if the session has passed its expiry
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }

    /// True if the session carries an authenticated user
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// True if enough time has passed since the last refresh that the
    /// expiry may be written again
    ///
    /// The throttle bounds write amplification: a busy session is persisted
    /// at most once per window regardless of request volume.
    pub fn needs_touch(&self, now: DateTime<Utc>, throttle: Duration) -> bool {
        self.touched_at + throttle <= now
    }

    /// Extends the expiry to `now + ttl` and records the refresh time
    pub fn touch(&mut self, now: DateTime<Utc>, ttl: Duration) {
        self.expires_at = now + ttl;
        self.touched_at = now;
    }
}

/// Generates a random alphanumeric session token
///
/// Uses base62 encoding (A-Z, a-z, 0-9) so tokens are cookie-safe.
pub fn generate_token() -> String {
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
    let mut rng = rand::thread_rng();

    (0..TOKEN_LENGTH)
        .map(|_| {
            let idx = rng.gen_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_tokens_are_unique_and_cookie_safe() {
        let a = generate_token();
        let b = generate_token();

        assert_eq!(a.len(), TOKEN_LENGTH);
        assert_ne!(a, b);
        assert!(a.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_authenticated_session_carries_user_and_future_expiry() {
        let session =
            SessionRecord::authenticated(SessionUser::admin("admin"), Duration::days(14));

        assert!(session.is_authenticated());
        assert_eq!(session.user.as_ref().unwrap().role, "admin");
        assert!(!session.is_expired(Utc::now()));
    }

    #[test]
    fn test_expiry_check() {
        let mut session =
            SessionRecord::authenticated(SessionUser::admin("admin"), Duration::seconds(10));
        let now = Utc::now();

        assert!(!session.is_expired(now));
        assert!(session.is_expired(now + Duration::seconds(11)));

        session.touch(now + Duration::seconds(11), Duration::seconds(10));
        assert!(!session.is_expired(now + Duration::seconds(20)));
    }

    #[test]
    fn test_touch_is_throttled_to_the_refresh_window() {
        let session =
            SessionRecord::authenticated(SessionUser::admin("admin"), Duration::days(14));
        let throttle = Duration::hours(24);

        // Fresh session was just touched; no refresh within the window
        assert!(!session.needs_touch(session.touched_at + Duration::hours(1), throttle));
        assert!(!session.needs_touch(session.touched_at + Duration::hours(23), throttle));

        // Once the window elapses a single refresh is due again
        assert!(session.needs_touch(session.touched_at + Duration::hours(24), throttle));
    }

    #[test]
    fn test_touch_updates_both_expiry_and_refresh_time() {
        let mut session =
            SessionRecord::authenticated(SessionUser::admin("admin"), Duration::days(14));
        let later = session.touched_at + Duration::hours(30);

        session.touch(later, Duration::days(14));

        assert_eq!(session.touched_at, later);
        assert_eq!(session.expires_at, later + Duration::days(14));
    }
}
