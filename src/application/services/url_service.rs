//! URL creation, lookup and removal service.

use std::sync::Arc;

use tracing::{debug, warn};
use url::Url;

use crate::domain::entities::SavedUrl;
use crate::domain::error::UrlError;
use crate::domain::repositories::UrlRepository;
use crate::utils::alias_generator::{
    AliasGenerator, DEFAULT_ALIAS_LENGTH, MAX_ALIAS_LENGTH, is_reserved_alias, is_valid_alias,
};

/// Default number of generated candidates tried before giving up.
pub const DEFAULT_MAX_ATTEMPTS: usize = 10;

/// Tuning for alias allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocationPolicy {
    /// Length of generated aliases.
    pub alias_length: usize,
    /// Maximum number of generated candidates per save.
    pub max_attempts: usize,
}

impl Default for AllocationPolicy {
    fn default() -> Self {
        Self {
            alias_length: DEFAULT_ALIAS_LENGTH,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

/// Service for saving, resolving and deleting shortened URLs.
///
/// Uniqueness is delegated entirely to the repository: a save is one insert,
/// and a conflicting insert is the signal to try another candidate. No lookup
/// precedes the insert, so concurrent callers drawing the same candidate are
/// resolved by the storage constraint rather than by a race.
pub struct UrlService<R: UrlRepository, G: AliasGenerator> {
    repository: Arc<R>,
    generator: Arc<G>,
    policy: AllocationPolicy,
}

impl<R: UrlRepository, G: AliasGenerator> UrlService<R, G> {
    /// Creates a new URL service.
    ///
    /// `policy.alias_length` is clamped to 1..=[`MAX_ALIAS_LENGTH`] and
    /// `policy.max_attempts` to at least 1.
    pub fn new(repository: Arc<R>, generator: Arc<G>, policy: AllocationPolicy) -> Self {
        let policy = AllocationPolicy {
            alias_length: policy.alias_length.clamp(1, MAX_ALIAS_LENGTH),
            max_attempts: policy.max_attempts.max(1),
        };

        Self {
            repository,
            generator,
            policy,
        }
    }

    pub fn policy(&self) -> AllocationPolicy {
        self.policy
    }

    /// Saves `url` under `alias`, or under a generated alias when `alias` is
    /// `None` or empty.
    ///
    /// # Code Generation
    ///
    /// - A caller-supplied alias is attempted once; a conflict is returned as
    ///   is and the alias is never replaced
    /// - Otherwise candidates are generated until an insert succeeds, up to
    ///   `max_attempts` times
    ///
    /// # Errors
    ///
    /// Returns [`UrlError::InvalidInput`] if `url` is not an absolute URL,
    /// contains control characters, or the supplied alias is not 1..=32 ASCII
    /// alphanumerics or collides with a fixed route.
    ///
    /// Returns [`UrlError::AliasConflict`] if the supplied alias is taken.
    ///
    /// Returns [`UrlError::AllocationExhausted`] if every generated candidate
    /// collided.
    ///
    /// Returns [`UrlError::StorageUnavailable`] on database failures, without
    /// retrying.
    pub async fn save_url(&self, url: &str, alias: Option<&str>) -> Result<SavedUrl, UrlError> {
        // The URL parser silently strips tabs and newlines, but the raw string
        // is what gets stored and later sent back in `Location`.
        if url.chars().any(char::is_control) {
            return Err(UrlError::InvalidInput(
                "url must not contain control characters".to_string(),
            ));
        }
        Url::parse(url).map_err(|e| UrlError::InvalidInput(format!("invalid url: {e}")))?;

        match alias.filter(|a| !a.is_empty()) {
            Some(alias) => self.save_with_alias(url, alias).await,
            None => self.save_with_generated_alias(url).await,
        }
    }

    async fn save_with_alias(&self, url: &str, alias: &str) -> Result<SavedUrl, UrlError> {
        if !is_valid_alias(alias) {
            return Err(UrlError::InvalidInput(format!(
                "alias must be 1-{MAX_ALIAS_LENGTH} alphanumeric characters"
            )));
        }
        if is_reserved_alias(alias) {
            return Err(UrlError::InvalidInput(format!("alias '{alias}' is reserved")));
        }

        let id = self.repository.save(url, alias).await?;

        Ok(SavedUrl {
            id,
            alias: alias.to_string(),
        })
    }

    async fn save_with_generated_alias(&self, url: &str) -> Result<SavedUrl, UrlError> {
        let AllocationPolicy {
            alias_length,
            max_attempts,
        } = self.policy;

        for attempt in 1..=max_attempts {
            let candidate = self.generator.generate(alias_length);

            if is_reserved_alias(&candidate) {
                debug!(attempt, alias = %candidate, "Generated alias is reserved");
                continue;
            }

            match self.repository.save(url, &candidate).await {
                Ok(id) => {
                    return Ok(SavedUrl {
                        id,
                        alias: candidate,
                    });
                }
                Err(err) => match UrlError::from(err) {
                    UrlError::AliasConflict => {
                        debug!(attempt, alias = %candidate, "Generated alias collided");
                    }
                    other => return Err(other),
                },
            }
        }

        warn!(attempts = max_attempts, "Alias allocation exhausted");

        Err(UrlError::AllocationExhausted {
            attempts: max_attempts,
        })
    }

    /// Returns the target URL stored under `alias`.
    ///
    /// # Errors
    ///
    /// Returns [`UrlError::NotFound`] if no record has that alias.
    /// Returns [`UrlError::StorageUnavailable`] on database errors.
    pub async fn resolve(&self, alias: &str) -> Result<String, UrlError> {
        Ok(self.repository.get(alias).await?)
    }

    /// Deletes the record stored under `alias`.
    ///
    /// # Errors
    ///
    /// Returns [`UrlError::NotFound`] if no record has that alias, including
    /// a second delete of the same alias.
    pub async fn delete_url(&self, alias: &str) -> Result<(), UrlError> {
        Ok(self.repository.delete(alias).await?)
    }

    /// Returns the number of stored records.
    pub async fn count(&self) -> Result<i64, UrlError> {
        Ok(self.repository.count().await?)
    }

    /// Checks that the store is reachable.
    pub async fn ping(&self) -> Result<(), UrlError> {
        Ok(self.repository.ping().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::StorageError;
    use crate::domain::repositories::MockUrlRepository;
    use crate::utils::alias_generator::MockAliasGenerator;
    use mockall::Sequence;

    fn service(
        repository: MockUrlRepository,
        generator: MockAliasGenerator,
    ) -> UrlService<MockUrlRepository, MockAliasGenerator> {
        UrlService::new(
            Arc::new(repository),
            Arc::new(generator),
            AllocationPolicy::default(),
        )
    }

    #[tokio::test]
    async fn test_save_with_generated_alias() {
        let mut mock_repo = MockUrlRepository::new();
        let mut mock_generator = MockAliasGenerator::new();

        mock_generator
            .expect_generate()
            .withf(|length| *length == 6)
            .times(1)
            .returning(|_| "abc123".to_string());

        mock_repo
            .expect_save()
            .withf(|url, alias| url == "https://example.com" && alias == "abc123")
            .times(1)
            .returning(|_, _| Ok(1));

        let result = service(mock_repo, mock_generator)
            .save_url("https://example.com", None)
            .await
            .unwrap();

        assert_eq!(result.id, 1);
        assert_eq!(result.alias, "abc123");
    }

    #[tokio::test]
    async fn test_empty_alias_is_generated() {
        let mut mock_repo = MockUrlRepository::new();
        let mut mock_generator = MockAliasGenerator::new();

        mock_generator
            .expect_generate()
            .times(1)
            .returning(|_| "gen001".to_string());

        mock_repo
            .expect_save()
            .withf(|_, alias| alias == "gen001")
            .times(1)
            .returning(|_, _| Ok(7));

        let result = service(mock_repo, mock_generator)
            .save_url("https://example.com", Some(""))
            .await
            .unwrap();

        assert_eq!(result.alias, "gen001");
    }

    #[tokio::test]
    async fn test_collision_retries_with_new_candidate() {
        let mut mock_repo = MockUrlRepository::new();
        let mut mock_generator = MockAliasGenerator::new();
        let mut seq = Sequence::new();

        mock_generator
            .expect_generate()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| "taken1".to_string());
        mock_repo
            .expect_save()
            .withf(|_, alias| alias == "taken1")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Err(StorageError::AliasConflict));

        mock_generator
            .expect_generate()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| "fresh1".to_string());
        mock_repo
            .expect_save()
            .withf(|_, alias| alias == "fresh1")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(2));

        let result = service(mock_repo, mock_generator)
            .save_url("https://example.com", None)
            .await
            .unwrap();

        assert_eq!(result.alias, "fresh1");
        assert_eq!(result.id, 2);
    }

    #[tokio::test]
    async fn test_fixed_candidate_exhausts_attempts() {
        let mut mock_repo = MockUrlRepository::new();
        let mut mock_generator = MockAliasGenerator::new();

        mock_generator
            .expect_generate()
            .times(DEFAULT_MAX_ATTEMPTS)
            .returning(|_| "same00".to_string());

        mock_repo
            .expect_save()
            .times(DEFAULT_MAX_ATTEMPTS)
            .returning(|_, _| Err(StorageError::AliasConflict));

        let result = service(mock_repo, mock_generator)
            .save_url("https://example.com", None)
            .await;

        assert!(matches!(
            result,
            Err(UrlError::AllocationExhausted { attempts: 10 })
        ));
    }

    #[tokio::test]
    async fn test_custom_attempt_bound_is_respected() {
        let mut mock_repo = MockUrlRepository::new();
        let mut mock_generator = MockAliasGenerator::new();

        mock_generator
            .expect_generate()
            .times(3)
            .returning(|_| "same00".to_string());
        mock_repo
            .expect_save()
            .times(3)
            .returning(|_, _| Err(StorageError::AliasConflict));

        let service = UrlService::new(
            Arc::new(mock_repo),
            Arc::new(mock_generator),
            AllocationPolicy {
                alias_length: 6,
                max_attempts: 3,
            },
        );

        let result = service.save_url("https://example.com", None).await;

        assert!(matches!(
            result,
            Err(UrlError::AllocationExhausted { attempts: 3 })
        ));
    }

    #[tokio::test]
    async fn test_storage_failure_is_not_retried() {
        let mut mock_repo = MockUrlRepository::new();
        let mut mock_generator = MockAliasGenerator::new();

        mock_generator
            .expect_generate()
            .times(1)
            .returning(|_| "abc123".to_string());
        mock_repo
            .expect_save()
            .times(1)
            .returning(|_, _| Err(StorageError::Timeout));

        let result = service(mock_repo, mock_generator)
            .save_url("https://example.com", None)
            .await;

        assert!(matches!(
            result,
            Err(UrlError::StorageUnavailable(StorageError::Timeout))
        ));
    }

    #[tokio::test]
    async fn test_custom_alias_is_used_once() {
        let mut mock_repo = MockUrlRepository::new();
        let mut mock_generator = MockAliasGenerator::new();

        mock_generator.expect_generate().times(0);
        mock_repo
            .expect_save()
            .withf(|_, alias| alias == "mysite")
            .times(1)
            .returning(|_, _| Ok(5));

        let result = service(mock_repo, mock_generator)
            .save_url("https://example.com", Some("mysite"))
            .await
            .unwrap();

        assert_eq!(result.alias, "mysite");
        assert_eq!(result.id, 5);
    }

    #[tokio::test]
    async fn test_custom_alias_conflict_is_not_replaced() {
        let mut mock_repo = MockUrlRepository::new();
        let mut mock_generator = MockAliasGenerator::new();

        mock_generator.expect_generate().times(0);
        mock_repo
            .expect_save()
            .times(1)
            .returning(|_, _| Err(StorageError::AliasConflict));

        let result = service(mock_repo, mock_generator)
            .save_url("https://other.com", Some("mysite"))
            .await;

        assert!(matches!(result, Err(UrlError::AliasConflict)));
    }

    #[tokio::test]
    async fn test_invalid_custom_alias() {
        let mut mock_repo = MockUrlRepository::new();
        mock_repo.expect_save().times(0);

        let result = service(mock_repo, MockAliasGenerator::new())
            .save_url("https://example.com", Some("bad-alias"))
            .await;

        assert!(matches!(result, Err(UrlError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_invalid_url() {
        let mut mock_repo = MockUrlRepository::new();
        mock_repo.expect_save().times(0);

        let result = service(mock_repo, MockAliasGenerator::new())
            .save_url("not-a-url", None)
            .await;

        assert!(matches!(result, Err(UrlError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_url_with_control_characters_is_rejected() {
        let mut mock_repo = MockUrlRepository::new();
        mock_repo.expect_save().times(0);

        let service = service(mock_repo, MockAliasGenerator::new());

        for url in ["https://example.com/a\nb", "https://example.com/\tx"] {
            let result = service.save_url(url, Some("mysite")).await;
            assert!(matches!(result, Err(UrlError::InvalidInput(_))));
        }
    }

    #[tokio::test]
    async fn test_reserved_custom_alias_is_rejected() {
        let mut mock_repo = MockUrlRepository::new();
        mock_repo.expect_save().times(0);

        let service = service(mock_repo, MockAliasGenerator::new());

        for alias in ["ping", "health", "url"] {
            let result = service.save_url("https://example.com", Some(alias)).await;
            assert!(matches!(result, Err(UrlError::InvalidInput(_))));
        }
    }

    #[tokio::test]
    async fn test_reserved_candidate_costs_an_attempt() {
        let mut mock_repo = MockUrlRepository::new();
        let mut mock_generator = MockAliasGenerator::new();
        let mut seq = Sequence::new();

        mock_generator
            .expect_generate()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| "health".to_string());
        mock_generator
            .expect_generate()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| "abc123".to_string());
        mock_repo
            .expect_save()
            .withf(|_, alias| alias == "abc123")
            .times(1)
            .returning(|_, _| Ok(1));

        let result = service(mock_repo, mock_generator)
            .save_url("https://example.com", None)
            .await
            .unwrap();

        assert_eq!(result.alias, "abc123");
    }

    #[tokio::test]
    async fn test_only_reserved_candidates_exhaust_attempts() {
        let mut mock_repo = MockUrlRepository::new();
        let mut mock_generator = MockAliasGenerator::new();

        mock_generator
            .expect_generate()
            .times(DEFAULT_MAX_ATTEMPTS)
            .returning(|_| "ping".to_string());
        mock_repo.expect_save().times(0);

        let result = service(mock_repo, mock_generator)
            .save_url("https://example.com", None)
            .await;

        assert!(matches!(
            result,
            Err(UrlError::AllocationExhausted { attempts: 10 })
        ));
    }

    #[tokio::test]
    async fn test_resolve_not_found() {
        let mut mock_repo = MockUrlRepository::new();
        mock_repo
            .expect_get()
            .withf(|alias| alias == "missing")
            .times(1)
            .returning(|_| Err(StorageError::NotFound));

        let result = service(mock_repo, MockAliasGenerator::new())
            .resolve("missing")
            .await;

        assert!(matches!(result, Err(UrlError::NotFound)));
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let mut mock_repo = MockUrlRepository::new();
        mock_repo
            .expect_delete()
            .times(1)
            .returning(|_| Err(StorageError::NotFound));

        let result = service(mock_repo, MockAliasGenerator::new())
            .delete_url("missing")
            .await;

        assert!(matches!(result, Err(UrlError::NotFound)));
    }

    #[test]
    fn test_policy_is_clamped() {
        let service = UrlService::new(
            Arc::new(MockUrlRepository::new()),
            Arc::new(MockAliasGenerator::new()),
            AllocationPolicy {
                alias_length: 0,
                max_attempts: 0,
            },
        );

        assert_eq!(
            service.policy(),
            AllocationPolicy {
                alias_length: 1,
                max_attempts: 1,
            }
        );
    }
}
