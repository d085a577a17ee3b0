//! HTTP Basic authentication middleware.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBasic;
use sha2::{Digest, Sha256};

use crate::{error::AppError, state::AppState};

/// The single user allowed to manage URLs.
///
/// Only SHA-256 digests of the configured user and password are kept, so
/// comparisons always run over fixed-size values.
pub struct Credentials {
    user_digest: [u8; 32],
    password_digest: [u8; 32],
}

impl Credentials {
    pub fn new(user: &str, password: &str) -> Self {
        Self {
            user_digest: digest(user),
            password_digest: digest(password),
        }
    }

    /// Returns true if `user` and `password` match the configured pair.
    pub fn verify(&self, user: &str, password: &str) -> bool {
        let user_ok = digest(user) == self.user_digest;
        let password_ok = digest(password) == self.password_digest;
        user_ok & password_ok
    }
}

fn digest(value: &str) -> [u8; 32] {
    Sha256::digest(value.as_bytes()).into()
}

/// Authenticates requests using HTTP Basic credentials.
///
/// # Header Format
///
/// ```text
/// Authorization: Basic <base64(user:password)>
/// ```
///
/// # Errors
///
/// Returns `401 Unauthorized` with `WWW-Authenticate: Basic` if the header is
/// missing, malformed, or carries the wrong credentials.
///
/// # Example
///
/// ```rust,ignore
/// let protected = Router::new()
///     .route("/url", post(save_url_handler))
///     .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));
/// ```
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let AuthBasic((user, password)) = AuthBasic::from_request_parts(&mut parts, &())
        .await
        .map_err(|_| AppError::unauthorized("unauthorized"))?;

    if !st
        .credentials
        .verify(&user, password.as_deref().unwrap_or_default())
    {
        tracing::warn!(user = %user, "Rejected invalid credentials");
        return Err(AppError::unauthorized("unauthorized"));
    }

    let req = Request::from_parts(parts, body);

    Ok(next.run(req).await)
}
