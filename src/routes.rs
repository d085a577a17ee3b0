//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET    /{alias}`      - Redirect to the stored URL (public)
//! - `GET    /ping`         - Liveness probe (public)
//! - `GET    /health`       - Health check with database status (public)
//! - `POST   /url`          - Save a URL (Basic auth)
//! - `DELETE /url/{alias}`  - Delete a URL (Basic auth)
//!
//! # Middleware
//!
//! - **Request id** - `x-request-id` assigned and echoed back
//! - **Tracing** - Structured request/response logging
//! - **Timeout** - Requests exceeding the configured limit get `408`
//! - **Authentication** - Basic auth on the URL management routes

use std::time::Duration;

use crate::api;
use crate::api::handlers::{health_handler, ping_handler, redirect_handler};
use crate::api::middleware::{auth, tracing as trace};
use crate::state::AppState;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Router, middleware};
use tower_http::timeout::TimeoutLayer;

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `request_timeout` - upper bound on the time spent handling one request
pub fn app_router(state: AppState, request_timeout: Duration) -> Router {
    let api_router = api::routes::protected_routes()
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));

    Router::new()
        .route("/ping", get(ping_handler))
        .route("/health", get(health_handler))
        .route("/{alias}", get(redirect_handler))
        .merge(api_router)
        .with_state(state)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .layer(trace::propagate_request_id_layer())
        .layer(trace::layer())
        .layer(trace::set_request_id_layer())
}
