//! API route configuration.
//!
//! All routes here require HTTP Basic authentication via
//! [`crate::api::middleware::auth`].

use crate::api::handlers::{delete_url_handler, save_url_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, post},
};

/// URL management routes, protected by Basic authentication.
///
/// # Endpoints
///
/// - `POST   /url`          - Save a URL under a custom or generated alias
/// - `DELETE /url/{alias}`  - Delete a saved URL
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/url", post(save_url_handler))
        .route("/url/{alias}", delete(delete_url_handler))
}
