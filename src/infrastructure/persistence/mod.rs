//! MariaDB repository implementations.
//!
//! Concrete implementations of domain repository traits. Statements are plain
//! SQL strings rendered once by [`Statements`] and executed through the
//! [`crate::infrastructure::database::QueryExecutor`].
//!
//! # Repositories
//!
//! - [`MariaDbLinkRepository`] - Link storage and retrieval
//! - [`MariaDbSchemaRepository`] - Catalog lookups and schema creation

pub mod mariadb_link_repository;
pub mod mariadb_schema_repository;
pub mod statements;

pub use mariadb_link_repository::MariaDbLinkRepository;
pub use mariadb_schema_repository::MariaDbSchemaRepository;
pub use statements::{DEFAULT_FUNCTION_NAME, DEFAULT_TABLE_NAME, SchemaNames, Statements};
