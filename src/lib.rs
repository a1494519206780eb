//! # Taskdesk Core Library
//!
//! Authentication, group membership, and task authorization core for the
//! taskdesk backend. The HTTP layer lives elsewhere and calls into the
//! services exposed here.
//!
//! ## Module Organization
//!
//! - `models`: Database models and CRUD operations
//! - `auth`: Password hashing, JWT codec, and the authentication service
//! - `redis`: Redis client and the token revocation store
//! - `services`: Group membership authority, task assignment, user management
//! - `db`: Connection pool and migrations
//! - `config`: Configuration management
//! - `observability`: Tracing subscriber setup for embedding binaries
//! - `error`: Domain error taxonomy

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod observability;
pub mod redis;
pub mod services;

/// Current version of the taskdesk core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
