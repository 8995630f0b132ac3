//! # Task Tracker Shared Library
//!
//! This crate contains the types and persistence layer shared by the
//! task tracker service binaries.
//!
//! ## Module Organization
//!
//! - `models`: Task and session data structures
//! - `store`: Persistence traits with Postgres and in-memory backends
//! - `db`: Database pool management and migrations

pub mod db;
pub mod models;
pub mod store;

/// Current version of the task tracker shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
