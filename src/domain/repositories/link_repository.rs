//! Repository trait for short link data access.

use crate::domain::entities::{LinkFields, ShortLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for managing short links.
///
/// Ids are never supplied by callers on creation: the storage layer generates
/// them while inserting.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::MariaDbLinkRepository`] - MariaDB implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_link.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Returns every stored link, in no particular order.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Connection`] or [`AppError::TransientDisconnect`]
    /// when the database is not usable, [`AppError::Internal`] otherwise.
    async fn list_all(&self) -> Result<Vec<ShortLink>, AppError>;

    /// Finds a link by its id.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(ShortLink))` if found
    /// - `Ok(None)` if not found
    async fn find_by_id(&self, id: &str) -> Result<Option<ShortLink>, AppError>;

    /// Inserts a new link with a database-generated id.
    async fn create(&self, fields: LinkFields) -> Result<(), AppError>;

    /// Overwrites url and window flag of the link with the given id.
    ///
    /// Returns the number of rows that matched; `0` means no such id.
    async fn update(&self, id: &str, fields: LinkFields) -> Result<u64, AppError>;

    /// Deletes the link with the given id.
    ///
    /// Returns the number of rows removed; `0` means no such id.
    async fn delete(&self, id: &str) -> Result<u64, AppError>;
}
