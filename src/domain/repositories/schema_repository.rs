//! Repository trait for schema inspection and creation.

use crate::error::AppError;
use async_trait::async_trait;

/// Catalog access needed to bootstrap the link table and the id function.
///
/// Creation methods must be idempotent: calling them when the object already
/// exists is not an error.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SchemaRepository: Send + Sync {
    /// Returns true if a database connection is (or can now be) established.
    ///
    /// Never fails; a failed connection attempt is reported as `false`.
    async fn is_reachable(&self) -> bool;

    /// Returns true if the link table exists.
    async fn table_exists(&self) -> Result<bool, AppError>;

    /// Returns true if the id-generation function exists.
    async fn function_exists(&self) -> Result<bool, AppError>;

    /// Creates the link table if it is missing.
    async fn create_table(&self) -> Result<(), AppError>;

    /// Creates the id-generation function if it is missing.
    async fn create_function(&self) -> Result<(), AppError>;
}
