//! SQLite implementation of the URL repository.

use async_trait::async_trait;
use sqlx::SqlitePool;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use super::db_error::map_insert_error;
use crate::domain::error::StorageError;
use crate::domain::repositories::UrlRepository;

/// Deadline applied to each operation when none is configured.
const DEFAULT_OP_TIMEOUT: Duration = Duration::from_secs(3);

/// SQLite repository for URL record storage and retrieval.
///
/// Alias uniqueness is enforced by the `UNIQUE` constraint on `url.alias`;
/// a save is a single `INSERT`, so two racing writers of the same alias end
/// with one row and one [`StorageError::AliasConflict`].
///
/// Every operation runs under a deadline. When it elapses the query future is
/// dropped and [`StorageError::Timeout`] is returned.
pub struct SqliteUrlRepository {
    pool: Arc<SqlitePool>,
    op_timeout: Duration,
}

impl SqliteUrlRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self::with_timeout(pool, DEFAULT_OP_TIMEOUT)
    }

    /// Creates a repository whose operations are bounded by `op_timeout`.
    pub fn with_timeout(pool: Arc<SqlitePool>, op_timeout: Duration) -> Self {
        Self { pool, op_timeout }
    }

    async fn bounded<T, F>(&self, op: F) -> Result<T, StorageError>
    where
        F: Future<Output = Result<T, StorageError>>,
    {
        tokio::time::timeout(self.op_timeout, op)
            .await
            .map_err(|_| StorageError::Timeout)?
    }
}

#[async_trait]
impl UrlRepository for SqliteUrlRepository {
    async fn save(&self, url: &str, alias: &str) -> Result<i64, StorageError> {
        self.bounded(async {
            let result = sqlx::query("INSERT INTO url (alias, url) VALUES (?, ?)")
                .bind(alias)
                .bind(url)
                .execute(self.pool.as_ref())
                .await
                .map_err(map_insert_error)?;

            Ok::<_, StorageError>(result.last_insert_rowid())
        })
        .await
    }

    async fn get(&self, alias: &str) -> Result<String, StorageError> {
        self.bounded(async {
            sqlx::query_scalar::<_, String>("SELECT url FROM url WHERE alias = ?")
                .bind(alias)
                .fetch_optional(self.pool.as_ref())
                .await?
                .ok_or(StorageError::NotFound)
        })
        .await
    }

    async fn delete(&self, alias: &str) -> Result<(), StorageError> {
        self.bounded(async {
            let result = sqlx::query("DELETE FROM url WHERE alias = ?")
                .bind(alias)
                .execute(self.pool.as_ref())
                .await?;

            if result.rows_affected() == 0 {
                return Err(StorageError::NotFound);
            }

            Ok::<_, StorageError>(())
        })
        .await
    }

    async fn count(&self) -> Result<i64, StorageError> {
        self.bounded(async {
            let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM url")
                .fetch_one(self.pool.as_ref())
                .await?;

            Ok::<_, StorageError>(count)
        })
        .await
    }

    async fn ping(&self) -> Result<(), StorageError> {
        self.bounded(async {
            sqlx::query("SELECT 1").execute(self.pool.as_ref()).await?;
            Ok::<_, StorageError>(())
        })
        .await
    }
}
