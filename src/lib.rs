//! # URL Shortener
//!
//! A small URL shortening service built with Axum and SQLite.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - URL record model, error taxonomy and repository trait
//! - **Application Layer** ([`application`]) - Alias allocation and URL service
//! - **Infrastructure Layer** ([`infrastructure`]) - SQLite pool, migrations and repository
//! - **API Layer** ([`api`]) - REST handlers, DTOs, and middleware
//!
//! ## Alias Allocation
//!
//! Uniqueness of aliases is enforced by a `UNIQUE` constraint in the database.
//! Generated aliases are inserted directly; a constraint violation triggers a
//! new candidate, up to a configurable number of attempts.
//!
//! ## Quick Start
//!
//! ```bash
//! export HTTP_SERVER_USER="admin"
//! export HTTP_SERVER_PASSWORD="secret"
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{AllocationPolicy, UrlService};
    pub use crate::domain::entities::SavedUrl;
    pub use crate::domain::error::{StorageError, UrlError};
    pub use crate::domain::repositories::UrlRepository;
    pub use crate::error::AppError;
    pub use crate::infrastructure::persistence::SqliteUrlRepository;
    pub use crate::state::AppState;
    pub use crate::utils::alias_generator::{AliasGenerator, RandomAliasGenerator};
}
