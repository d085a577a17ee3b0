//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};

use super::service_error;
use crate::error::AppError;
use crate::state::AppState;

/// Redirects an alias to its stored URL.
///
/// # Endpoint
///
/// `GET /{alias}`
///
/// # Response
///
/// `302 Found` with the target in `Location`.
///
/// # Errors
///
/// Returns 404 `url not found` if the alias doesn't exist.
/// Returns 500 `failed to get url` if the stored target is not a valid
/// `Location` value.
pub async fn redirect_handler(
    Path(alias): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    if alias.is_empty() {
        return Err(AppError::bad_request("invalid data: alias is empty"));
    }

    let target = state
        .url_service
        .resolve(&alias)
        .await
        .map_err(|e| service_error("get", e))?;

    let location = HeaderValue::try_from(target.as_str()).map_err(|e| {
        tracing::error!(alias = %alias, error = %e, "Stored url is not a valid Location");
        AppError::internal("failed to get url")
    })?;

    tracing::debug!(alias = %alias, url = %target, "Redirecting");

    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}
