//! # Task Tracker API Server Library
//!
//! Core functionality for the task tracker HTTP server.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `auth`: Credential verification behind a pluggable trait
//! - `background`: Memory monitor and session sweep loops
//! - `config`: Configuration management
//! - `diagnostics`: Process memory counters
//! - `error`: Error handling and HTTP response mapping
//! - `middleware`: Session-loading middleware
//! - `routes`: Route handlers

pub mod app;
pub mod auth;
pub mod background;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod middleware;
pub mod routes;
