//! Short alias generation and validation utilities.
//!
//! Aliases are drawn uniformly from the 62 ASCII alphanumerics using the
//! thread-local, OS-seeded RNG, so concurrent tasks never share a seed.

use rand::Rng;
use rand::distr::Alphanumeric;

/// Length of generated aliases unless configured otherwise.
pub const DEFAULT_ALIAS_LENGTH: usize = 6;

/// Longest alias accepted from callers or produced by the generator.
pub const MAX_ALIAS_LENGTH: usize = 32;

/// Aliases shadowed by fixed routes (`GET /ping`, `GET /health`, `/url`).
///
/// Routes are matched case-sensitively, so only these exact spellings are
/// unreachable through `GET /{alias}`.
pub const RESERVED_ALIASES: &[&str] = &["ping", "health", "url"];

/// Source of candidate aliases for allocation.
///
/// Production code uses [`RandomAliasGenerator`]; tests substitute
/// deterministic generators to force collisions.
#[cfg_attr(test, mockall::automock)]
pub trait AliasGenerator: Send + Sync {
    /// Returns a candidate alias of exactly `length` characters.
    fn generate(&self, length: usize) -> String;
}

/// [`AliasGenerator`] backed by [`generate_alias`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomAliasGenerator;

impl AliasGenerator for RandomAliasGenerator {
    fn generate(&self, length: usize) -> String {
        generate_alias(length)
    }
}

/// Generates a random alias of `length` characters from `[A-Za-z0-9]`.
///
/// A `length` of zero is treated as one, so the result is never empty.
///
/// # Examples
///
/// ```ignore
/// let alias = generate_alias(6);
/// assert_eq!(alias.len(), 6);
/// assert!(alias.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_alias(length: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(length.max(1))
        .map(char::from)
        .collect()
}

/// Returns true if `alias` is 1..=[`MAX_ALIAS_LENGTH`] ASCII alphanumerics.
pub fn is_valid_alias(alias: &str) -> bool {
    !alias.is_empty()
        && alias.len() <= MAX_ALIAS_LENGTH
        && alias.bytes().all(|b| b.is_ascii_alphanumeric())
}

/// Returns true if `alias` would be shadowed by a fixed route.
pub fn is_reserved_alias(alias: &str) -> bool {
    RESERVED_ALIASES.contains(&alias)
}
