//! API route handlers
//!
//! Organized by resource:
//!
//! - `health`: Health and diagnostics endpoint
//! - `auth`: Login, logout, and the session-gated dashboard
//! - `tasks`: Task CRUD endpoints

pub mod auth;
pub mod health;
pub mod tasks;
