//! Credential verification
//!
//! The login endpoint checks credentials through the `CredentialVerifier`
//! trait so the fixed admin pair can later be replaced by a real user store
//! without touching the session state machine.

use crate::config::AuthConfig;

/// Verifies a username/password pair
pub trait CredentialVerifier: Send + Sync {
    /// Returns true when the pair is valid
    fn verify(&self, username: &str, password: &str) -> bool;
}

/// Fixed credential pair, configured out of band
#[derive(Debug, Clone)]
pub struct FixedCredentials {
    username: String,
    password: String,
}

impl FixedCredentials {
    /// Creates a verifier for the given pair
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Creates a verifier from the application config
    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(&config.admin_username, &config.admin_password)
    }
}

impl CredentialVerifier for FixedCredentials {
    fn verify(&self, username: &str, password: &str) -> bool {
        username == self.username && password == self.password
    }
}
