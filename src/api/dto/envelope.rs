//! Response envelope shared by every JSON endpoint.

use serde::{Deserialize, Serialize};

/// Outcome marker of an [`Envelope`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    #[serde(rename = "OK")]
    Ok,
    Error,
}

/// `{"status": "OK"|"Error", "alias": ..., "error": ...}`
///
/// `alias` and `error` are omitted when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    pub status: Status,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Envelope {
    pub fn ok(alias: impl Into<String>) -> Self {
        Self {
            status: Status::Ok,
            alias: Some(alias.into()),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: Status::Error,
            alias: None,
            error: Some(message.into()),
        }
    }
}
