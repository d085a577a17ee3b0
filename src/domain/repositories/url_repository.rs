//! Repository trait for URL record data access.

use crate::domain::error::StorageError;
use async_trait::async_trait;

/// Storage contract for alias → URL mappings.
///
/// Implementations must enforce alias uniqueness in the storage itself
/// (a UNIQUE constraint or equivalent), never through a lookup followed by an
/// insert. A violated constraint is reported as [`StorageError::AliasConflict`]
/// so callers can retry with a different alias.
///
/// Implementations are shared across request tasks and must be safe for
/// concurrent use.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::SqliteUrlRepository`] - SQLite implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlRepository: Send + Sync {
    /// Inserts a new record and returns its assigned id.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::AliasConflict`] if `alias` is already stored.
    /// Returns [`StorageError::Unavailable`] or [`StorageError::Timeout`] on
    /// database failures.
    async fn save(&self, url: &str, alias: &str) -> Result<i64, StorageError>;

    /// Returns the target URL stored under `alias`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::NotFound`] if no record has that alias.
    async fn get(&self, alias: &str) -> Result<String, StorageError>;

    /// Removes the record stored under `alias`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::NotFound`] if no record has that alias, so a
    /// second delete of the same alias fails the same way a get would.
    async fn delete(&self, alias: &str) -> Result<(), StorageError>;

    /// Counts stored records.
    async fn count(&self) -> Result<i64, StorageError>;

    /// Checks that the database answers a trivial query.
    async fn ping(&self) -> Result<(), StorageError>;
}
