//! DTOs for URL management endpoints.

use serde::Deserialize;
use validator::Validate;

/// Request to save a URL under an optional alias.
///
/// An absent or empty `alias` asks the service to generate one.
#[derive(Debug, Deserialize, Validate)]
pub struct SaveUrlRequest {
    /// The URL to shorten (must be an absolute URL).
    #[validate(url)]
    pub url: String,

    /// Optional custom alias; character rules are checked by the service.
    #[serde(default)]
    #[validate(length(max = 32))]
    pub alias: Option<String>,
}
