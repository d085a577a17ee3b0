//! Outcome of storing an alias → URL mapping.

/// Result of a successful save: the alias that was actually stored and the
/// row id the store assigned to it.
///
/// Ids increase strictly and are never reused, even after a delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedUrl {
    pub id: i64,
    pub alias: String,
}
