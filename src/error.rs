//! HTTP-facing error type.
//!
//! Every failure is rendered as the response envelope
//! `{"status": "Error", "error": "<message>"}` with a matching status code.

use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use thiserror::Error;
use validator::{ValidationErrors, ValidationErrorsKind};

use crate::api::dto::envelope::Envelope;
use crate::domain::error::UrlError;

/// Realm announced in `WWW-Authenticate` on 401 responses.
pub const AUTH_REALM: &str = "url-shortener";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{message}")]
    Validation { message: String },
    #[error("{message}")]
    Unauthorized { message: String },
    #[error("{message}")]
    NotFound { message: String },
    #[error("{message}")]
    Conflict { message: String },
    #[error("{message}")]
    Unavailable { message: String },
    #[error("{message}")]
    Internal { message: String },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Maps a service error for operation `op` (`add`, `get` or `delete`).
    ///
    /// Not-found and conflict keep their specific messages; every other
    /// failure collapses to `failed to <op> url`.
    pub fn from_url_error(err: &UrlError, op: &str) -> Self {
        match err {
            UrlError::NotFound => Self::not_found("url not found"),
            UrlError::AliasConflict => Self::conflict("url already exists"),
            UrlError::InvalidInput(reason) => Self::bad_request(format!("invalid data: {reason}")),
            UrlError::StorageUnavailable(_) => Self::unavailable(format!("failed to {op} url")),
            UrlError::AllocationExhausted { .. } => Self::internal(format!("failed to {op} url")),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::Unavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Envelope::error(self.to_string());

        let mut response = (status, Json(body)).into_response();

        if status == StatusCode::UNAUTHORIZED {
            let challenge = format!("Basic realm=\"{AUTH_REALM}\"");
            if let Ok(value) = HeaderValue::from_str(&challenge) {
                response
                    .headers_mut()
                    .insert(header::WWW_AUTHENTICATE, value);
            }
        }

        response
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .errors()
            .iter()
            .filter_map(|(field, kind)| match kind {
                ValidationErrorsKind::Field(field_errors) => {
                    field_errors.first().map(|e| describe_field_error(field, &e.code))
                }
                _ => None,
            })
            .collect();
        messages.sort();

        if messages.is_empty() {
            return Self::bad_request("invalid request");
        }

        Self::bad_request(messages.join(", "))
    }
}

fn describe_field_error(field: &str, code: &str) -> String {
    match code {
        "required" => format!("field {field} is a required field"),
        "url" => format!("field {field} is not a valid URL"),
        "length" => format!("field {field} has an invalid length"),
        _ => format!("field {field} is not valid"),
    }
}
