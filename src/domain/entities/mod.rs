//! Core domain entities.
//!
//! - [`SavedUrl`] - The outcome of a successful allocation

pub mod url;

pub use url::SavedUrl;
