//! Helpers shared by the database layer and configuration.
//!
//! - [`db_error`] - Classification of driver errors as transient disconnects
//! - [`sql_identifier`] - Validation of table and function names

pub mod db_error;
pub mod sql_identifier;
