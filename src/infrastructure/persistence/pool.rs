//! SQLite connection pool setup.

use anyhow::{Context, Result};
use sqlx::SqlitePool;
use sqlx::migrate::MigrateError;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use std::env;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

/// Storage settings loaded from environment variables.
///
/// - `STORAGE_PATH` - SQLite file path or `sqlite:` DSN (default: `./storage/storage.db`)
/// - `DB_MAX_CONNECTIONS` - Pool size (default: 10)
/// - `DB_BUSY_TIMEOUT` - Seconds a writer waits on a locked database (default: 5)
/// - `STORAGE_OP_TIMEOUT` - Deadline in seconds for a single store operation (default: 3)
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub path: String,
    pub max_connections: u32,
    pub busy_timeout_secs: u64,
    pub op_timeout_secs: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: "./storage/storage.db".to_string(),
            max_connections: 10,
            busy_timeout_secs: 5,
            op_timeout_secs: 3,
        }
    }
}

impl StorageConfig {
    /// Loads storage settings, falling back to defaults for unset variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            path: env::var("STORAGE_PATH").unwrap_or(defaults.path),
            max_connections: env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_connections),
            busy_timeout_secs: env::var("DB_BUSY_TIMEOUT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.busy_timeout_secs),
            op_timeout_secs: env::var("STORAGE_OP_TIMEOUT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.op_timeout_secs),
        }
    }

    /// Creates settings for a database file with default pool tuning.
    pub fn for_path(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn op_timeout(&self) -> Duration {
        Duration::from_secs(self.op_timeout_secs)
    }

    /// Validates the storage settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is empty or a limit is zero.
    pub fn validate(&self) -> Result<()> {
        if self.path.trim().is_empty() {
            anyhow::bail!("STORAGE_PATH must not be empty");
        }
        if self.max_connections == 0 {
            anyhow::bail!("DB_MAX_CONNECTIONS must be at least 1");
        }
        if self.op_timeout_secs == 0 {
            anyhow::bail!("STORAGE_OP_TIMEOUT must be greater than 0");
        }
        Ok(())
    }
}

/// Opens a connection pool for the configured database.
///
/// A plain path is treated as a file and created (with its parent directory)
/// if missing. Connections use WAL journaling and a busy timeout so concurrent
/// writers queue inside SQLite instead of failing immediately.
///
/// # Errors
///
/// Returns an error if the DSN is malformed, the directory cannot be created
/// or the database cannot be opened.
pub async fn connect(config: &StorageConfig) -> Result<SqlitePool> {
    let options = if config.path.starts_with("sqlite:") {
        SqliteConnectOptions::from_str(&config.path)
            .with_context(|| format!("Invalid storage DSN '{}'", config.path))?
    } else {
        if let Some(parent) = Path::new(&config.path).parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create storage directory {}", parent.display())
            })?;
        }
        SqliteConnectOptions::new().filename(&config.path)
    };

    let options = options
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(config.busy_timeout_secs));

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.busy_timeout_secs.max(1)))
        .connect_with(options)
        .await
        .with_context(|| format!("Failed to open storage at '{}'", config.path))?;

    Ok(pool)
}

/// Applies the embedded migrations from `./migrations`.
pub async fn migrate(pool: &SqlitePool) -> Result<(), MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_config_defaults() {
        let config = StorageConfig::default();

        assert_eq!(config.path, "./storage/storage.db");
        assert_eq!(config.max_connections, 10);
        assert_eq!(config.op_timeout(), Duration::from_secs(3));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_storage_config_validation() {
        let mut config = StorageConfig::for_path("");
        assert!(config.validate().is_err());

        config.path = "data.db".to_string();
        assert!(config.validate().is_ok());

        config.max_connections = 0;
        assert!(config.validate().is_err());

        config.max_connections = 1;
        config.op_timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[tokio::test]
    async fn test_connect_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("urls.db");
        let config = StorageConfig::for_path(path.to_string_lossy());

        let pool = connect(&config).await.unwrap();
        migrate(&pool).await.unwrap();

        assert!(path.exists());
    }
}
