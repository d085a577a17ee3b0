//! SQLite repository implementations.
//!
//! Queries go through SQLx prepared statements; the schema is managed by the
//! migrations in `./migrations`.
//!
//! - [`SqliteUrlRepository`] - URL record storage and retrieval
//! - [`pool`] - Connection pool setup and migrations

mod db_error;
pub mod pool;
pub mod sqlite_url_repository;

pub use pool::{StorageConfig, connect, migrate};
pub use sqlite_url_repository::SqliteUrlRepository;
