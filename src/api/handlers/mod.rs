//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod health;
pub mod redirect;
pub mod url;

pub use health::{health_handler, ping_handler};
pub use redirect::redirect_handler;
pub use url::{delete_url_handler, save_url_handler};

use crate::domain::error::UrlError;
use crate::error::AppError;

/// Logs a service failure for `op` and converts it into the HTTP error.
///
/// Expected outcomes (missing alias, taken alias, bad input) are logged at
/// `INFO`; storage failures and exhaustion at `ERROR`.
pub(crate) fn service_error(op: &str, err: UrlError) -> AppError {
    match &err {
        UrlError::NotFound | UrlError::AliasConflict | UrlError::InvalidInput(_) => {
            tracing::info!(op, error = %err, "Request rejected");
        }
        UrlError::StorageUnavailable(_) | UrlError::AllocationExhausted { .. } => {
            tracing::error!(op, error = %err, "Url operation failed");
        }
    }

    AppError::from_url_error(&err, op)
}
