//! Handlers for URL management endpoints (create, delete).

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};
use validator::Validate;

use super::service_error;
use crate::api::dto::envelope::Envelope;
use crate::api::dto::url::SaveUrlRequest;
use crate::error::AppError;
use crate::state::AppState;

/// Saves a URL under a custom or generated alias.
///
/// # Endpoint
///
/// `POST /url` (Basic auth)
///
/// # Request Body
///
/// ```json
/// {
///   "url": "https://example.com",
///   "alias": "mysite"   // optional, generated when absent or empty
/// }
/// ```
///
/// # Response
///
/// ```json
/// { "status": "OK", "alias": "mysite" }
/// ```
///
/// # Errors
///
/// - 400 `failed to decode request` if the body is not valid JSON
/// - 400 `field url is not a valid URL` if validation fails
/// - 409 `url already exists` if the custom alias is taken
/// - 500/503 `failed to add url` on allocation or storage failure
pub async fn save_url_handler(
    State(state): State<AppState>,
    payload: Result<Json<SaveUrlRequest>, JsonRejection>,
) -> Result<Json<Envelope>, AppError> {
    let Json(payload) = payload.map_err(|e| {
        tracing::warn!(error = %e, "Failed to decode request body");
        AppError::bad_request("failed to decode request")
    })?;

    tracing::debug!(url = %payload.url, alias = ?payload.alias, "Request body decoded");

    payload.validate()?;

    let saved = state
        .url_service
        .save_url(&payload.url, payload.alias.as_deref())
        .await
        .map_err(|e| service_error("add", e))?;

    tracing::info!(id = saved.id, alias = %saved.alias, "Url added");

    Ok(Json(Envelope::ok(saved.alias)))
}

/// Deletes the URL stored under an alias.
///
/// # Endpoint
///
/// `DELETE /url/{alias}` (Basic auth)
///
/// # Response
///
/// ```json
/// { "status": "OK", "alias": "mysite" }
/// ```
///
/// # Errors
///
/// - 404 `url not found` if the alias does not exist (including a repeated delete)
/// - 503 `failed to delete url` on storage failure
pub async fn delete_url_handler(
    Path(alias): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Envelope>, AppError> {
    if alias.is_empty() {
        return Err(AppError::bad_request("invalid data: alias is empty"));
    }

    state
        .url_service
        .delete_url(&alias)
        .await
        .map_err(|e| service_error("delete", e))?;

    tracing::info!(alias = %alias, "Url deleted");

    Ok(Json(Envelope::ok(alias)))
}
