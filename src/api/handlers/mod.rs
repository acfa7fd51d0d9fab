//! HTTP request handlers for API endpoints.

pub mod config;

pub use config::config_handler;
