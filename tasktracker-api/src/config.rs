//! Configuration management for the task tracker server
//!
//! Loads configuration from environment variables into a typed struct that
//! is passed to the HTTP layer at startup. Nothing here is a module-level
//! singleton; every consumer receives the config explicitly.
//!
//! # Environment Variables
//!
//! - `HOST`: Host to bind to (default: 0.0.0.0)
//! - `PORT`: Port to bind to (default: 3000)
//! - `APP_ENV`: "production" enables the secure cookie flag
//! - `DATABASE_URL`: PostgreSQL connection string
//!   (default: postgres://localhost:5432/tasktracker)
//! - `DATABASE_MAX_CONNECTIONS`: Pool size (default: 10)
//! - `ADMIN_USERNAME` / `ADMIN_PASSWORD`: Fixed credential pair
//! - `SESSION_TTL_SECONDS`: Session time-to-live (default: 14 days)
//! - `SESSION_TOUCH_SECONDS`: Expiry write-refresh throttle (default: 24h)
//! - `SESSION_SWEEP_INTERVAL_SECONDS`: Expired-session sweep period
//!   (default: 1h)
//! - `MEMORY_LOG_INTERVAL_SECONDS`: Memory snapshot log period (default: 5m)
//! - `STATIC_DIR`: Directory with the client pages (default: public)
//! - `RUST_LOG`: Log filter (default: info)

use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration as StdDuration;

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server configuration
    pub api: ApiConfig,

    /// Database configuration
    pub database: DatabaseSettings,

    /// Fixed credential pair for the login endpoint
    pub auth: AuthConfig,

    /// Session store tuning
    pub session: SessionConfig,

    /// Diagnostics tuning
    pub diagnostics: DiagnosticsConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,

    /// Production mode (enables the secure cookie attribute)
    pub production: bool,

    /// Directory holding the static client pages
    pub static_dir: String,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseSettings {
    /// PostgreSQL connection URL
    pub url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,
}

/// Fixed credential pair, configured out of band
///
/// The credential check itself sits behind the `CredentialVerifier` trait so
/// a real user store can be swapped in without touching the session machine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Admin username
    pub admin_username: String,

    /// Admin password
    pub admin_password: String,
}

/// Session store tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Name of the session cookie
    pub cookie_name: String,

    /// Session time-to-live in seconds
    pub ttl_seconds: i64,

    /// Minimum interval between expiry refreshes, in seconds
    ///
    /// Bounds write amplification: a busy session writes its expiry at most
    /// once per window.
    pub touch_after_seconds: i64,

    /// How often the expired-session sweep runs, in seconds
    pub sweep_interval_seconds: u64,
}

/// Diagnostics tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosticsConfig {
    /// How often the memory snapshot is logged, in seconds
    pub memory_log_interval_seconds: u64,
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error when a variable is present but unparsable.
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present (for development)
        dotenvy::dotenv().ok();

        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()?;
        let production = env::var("APP_ENV")
            .map(|v| v == "production")
            .unwrap_or(false);
        let static_dir = env::var("STATIC_DIR").unwrap_or_else(|_| "public".to_string());

        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "postgres://localhost:5432/tasktracker".to_string());
        let max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "10".to_string())
            .parse::<u32>()?;

        let admin_username = env::var("ADMIN_USERNAME").unwrap_or_else(|_| "admin".to_string());
        let admin_password = env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "password".to_string());

        let ttl_seconds = env::var("SESSION_TTL_SECONDS")
            .unwrap_or_else(|_| (14 * 24 * 60 * 60).to_string())
            .parse::<i64>()?;
        let touch_after_seconds = env::var("SESSION_TOUCH_SECONDS")
            .unwrap_or_else(|_| (24 * 60 * 60).to_string())
            .parse::<i64>()?;
        let sweep_interval_seconds = env::var("SESSION_SWEEP_INTERVAL_SECONDS")
            .unwrap_or_else(|_| 3600.to_string())
            .parse::<u64>()?;

        let memory_log_interval_seconds = env::var("MEMORY_LOG_INTERVAL_SECONDS")
            .unwrap_or_else(|_| 300.to_string())
            .parse::<u64>()?;

        Ok(Self {
            api: ApiConfig {
                host,
                port,
                production,
                static_dir,
            },
            database: DatabaseSettings {
                url: database_url,
                max_connections,
            },
            auth: AuthConfig {
                admin_username,
                admin_password,
            },
            session: SessionConfig {
                cookie_name: "tasktracker_sid".to_string(),
                ttl_seconds,
                touch_after_seconds,
                sweep_interval_seconds,
            },
            diagnostics: DiagnosticsConfig {
                memory_log_interval_seconds,
            },
        })
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }
}

impl SessionConfig {
    /// Session time-to-live
    pub fn ttl(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.ttl_seconds)
    }

    /// Expiry write-refresh throttle
    pub fn touch_throttle(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.touch_after_seconds)
    }

    /// Cookie max-age, mirroring the record time-to-live
    pub fn cookie_max_age(&self) -> time::Duration {
        time::Duration::seconds(self.ttl_seconds)
    }

    /// Sweep period
    pub fn sweep_interval(&self) -> StdDuration {
        StdDuration::from_secs(self.sweep_interval_seconds)
    }
}

impl DiagnosticsConfig {
    /// Memory snapshot log period
    pub fn memory_log_interval(&self) -> StdDuration {
        StdDuration::from_secs(self.memory_log_interval_seconds)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Config with the same values the env defaults produce
    pub(crate) fn test_config() -> Config {
        Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 3000,
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

    #[test]
    fn test_bind_address() {
        let config = test_config();
        assert_eq!(config.bind_address(), "127.0.0.1:3000");
    }

    #[test]
    fn test_session_durations() {
        let config = test_config();
        assert_eq!(config.session.ttl(), chrono::Duration::days(14));
        assert_eq!(config.session.touch_throttle(), chrono::Duration::hours(24));
        assert_eq!(config.session.cookie_max_age(), time::Duration::days(14));
        assert_eq!(
            config.session.sweep_interval(),
            StdDuration::from_secs(3600)
        );
    }
}
