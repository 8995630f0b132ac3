//! Middleware for the task tracker server
//!
//! - `session`: loads the session referenced by the request cookie and
//!   exposes the authenticated user to handlers

pub mod session;
