#![allow(dead_code)]

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use sqlx::SqlitePool;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use url_shortener::api::middleware::auth::Credentials;
use url_shortener::application::services::{AllocationPolicy, UrlService};
use url_shortener::infrastructure::persistence::{
    SqliteUrlRepository, StorageConfig, connect, migrate,
};
use url_shortener::state::AppState;
use url_shortener::utils::alias_generator::{AliasGenerator, RandomAliasGenerator};

pub const TEST_USER: &str = "admin";
pub const TEST_PASSWORD: &str = "secret";

/// A migrated database living in a temporary directory.
///
/// The directory is removed when the value is dropped.
pub struct TestDb {
    pub pool: Arc<SqlitePool>,
    _dir: TempDir,
}

pub async fn setup_db() -> TestDb {
    setup_db_with_busy_timeout(StorageConfig::default().busy_timeout_secs).await
}

/// Like [`setup_db`], with writers giving up on a locked database after
/// `busy_timeout_secs`.
pub async fn setup_db_with_busy_timeout(busy_timeout_secs: u64) -> TestDb {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.db");
    let config = StorageConfig {
        busy_timeout_secs,
        ..StorageConfig::for_path(path.to_string_lossy().into_owned())
    };

    let pool = connect(&config).await.unwrap();
    migrate(&pool).await.unwrap();

    TestDb {
        pool: Arc::new(pool),
        _dir: dir,
    }
}

pub async fn insert_url(pool: &SqlitePool, alias: &str, url: &str) {
    sqlx::query("INSERT INTO url (url, alias) VALUES (?, ?)")
        .bind(url)
        .bind(alias)
        .execute(pool)
        .await
        .unwrap();
}

pub fn create_test_state(pool: Arc<SqlitePool>) -> AppState {
    let repo = Arc::new(SqliteUrlRepository::new(pool));
    let service = Arc::new(UrlService::new(
        repo,
        Arc::new(RandomAliasGenerator),
        AllocationPolicy::default(),
    ));

    AppState::new(service, Credentials::new(TEST_USER, TEST_PASSWORD))
}

pub fn basic_auth_header() -> String {
    basic_auth(TEST_USER, TEST_PASSWORD)
}

pub fn basic_auth(user: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{user}:{password}")))
}

/// Always proposes the same alias.
pub struct FixedAliasGenerator(pub String);

impl AliasGenerator for FixedAliasGenerator {
    fn generate(&self, _length: usize) -> String {
        self.0.clone()
    }
}

/// Proposes the given aliases in order, then falls back to random ones.
pub struct SequenceAliasGenerator {
    queue: Mutex<VecDeque<String>>,
}

impl SequenceAliasGenerator {
    pub fn new(aliases: &[&str]) -> Self {
        Self {
            queue: Mutex::new(aliases.iter().map(|a| a.to_string()).collect()),
        }
    }
}

impl AliasGenerator for SequenceAliasGenerator {
    fn generate(&self, length: usize) -> String {
        self.queue
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| RandomAliasGenerator.generate(length))
    }
}
