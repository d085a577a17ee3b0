//! Infrastructure layer for external integrations.
//!
//! - [`persistence`] - SQLite connection pool, migrations and repository

pub mod persistence;
