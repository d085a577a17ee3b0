//! Error types for the storage contract and alias allocation.
//!
//! Both enums are plain data: they never carry user-facing text. Mapping to
//! the HTTP response envelope happens in [`crate::error::AppError`].

use thiserror::Error;

/// Errors returned by a [`crate::domain::repositories::UrlRepository`].
#[derive(Debug, Error)]
pub enum StorageError {
    /// No record has the requested alias.
    #[error("alias not found")]
    NotFound,

    /// The alias is already taken (UNIQUE constraint violation).
    #[error("alias already exists")]
    AliasConflict,

    /// Connection or I/O failure in the underlying database.
    #[error("storage unavailable: {0}")]
    Unavailable(#[from] sqlx::Error),

    /// The operation did not finish before its deadline.
    #[error("storage operation timed out")]
    Timeout,
}

/// Errors returned by [`crate::application::services::UrlService`].
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("url not found")]
    NotFound,

    #[error("url already exists")]
    AliasConflict,

    /// Every generated candidate collided with an existing alias.
    #[error("no free alias after {attempts} attempts")]
    AllocationExhausted { attempts: usize },

    #[error(transparent)]
    StorageUnavailable(StorageError),

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl From<StorageError> for UrlError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound => UrlError::NotFound,
            StorageError::AliasConflict => UrlError::AliasConflict,
            other => UrlError::StorageUnavailable(other),
        }
    }
}
