//! Domain layer containing business entities and repository contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures and input validation
//! - [`repositories`] - Data access trait definitions
//!
//! The domain layer has no dependency on the database driver or HTTP stack.
//! Implementations of the repository traits live in
//! [`crate::infrastructure::persistence`].

pub mod entities;
pub mod repositories;
