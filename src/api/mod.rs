//! JSON management API.
//!
//! # Modules
//!
//! - [`dto`] - request/response bodies of `POST /config`
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Basic authentication and request tracing
//! - [`routes`] - route configuration

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
