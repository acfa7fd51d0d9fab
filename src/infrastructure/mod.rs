//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer.
//!
//! # Modules
//!
//! - [`database`] - Connection state machine and statement execution
//! - [`persistence`] - MariaDB repository implementations

pub mod database;
pub mod persistence;
