//! Data models for the task tracker
//!
//! # Models
//!
//! - `task`: Task records with a three-state status enum
//! - `session`: Server-side session records referenced by a cookie token
pub mod session;
pub mod task;
