//! Domain layer containing the URL record model, its error taxonomy and
//! the storage contract.
//!
//! # Architecture
//!
//! - [`entities`] - Core data structures
//! - [`repositories`] - Data access trait definitions
//! - [`error`] - Typed errors returned by the store and the allocation service
//!
//! The domain layer has no knowledge of HTTP. Concrete storage lives in
//! [`crate::infrastructure::persistence`], orchestration in
//! [`crate::application::services`].

pub mod entities;
pub mod error;
pub mod repositories;
