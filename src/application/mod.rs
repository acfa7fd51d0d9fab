//! Application layer services implementing business logic.
//!
//! Services consume repository traits and provide a clean API for HTTP
//! handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Link CRUD and redirect resolution
//! - [`services::schema_service::SchemaService`] - Schema bootstrap and setup status
//! - [`services::auth_service::AuthService`] - Basic auth credential check

pub mod services;
