//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::api::middleware::auth::Credentials;
use crate::application::services::UrlService;
use crate::infrastructure::persistence::SqliteUrlRepository;
use crate::utils::alias_generator::RandomAliasGenerator;

/// The service wiring used by the running server.
pub type AppUrlService = UrlService<SqliteUrlRepository, RandomAliasGenerator>;

#[derive(Clone)]
pub struct AppState {
    pub url_service: Arc<AppUrlService>,
    pub credentials: Arc<Credentials>,
}

impl AppState {
    pub fn new(url_service: Arc<AppUrlService>, credentials: Credentials) -> Self {
        Self {
            url_service,
            credentials: Arc::new(credentials),
        }
    }
}
