//! Page route configuration.

use axum::{Router, routing::get};

use crate::state::AppState;
use crate::web::handlers::{index_handler, redirect_handler};

/// Pages requiring Basic authentication.
///
/// # Endpoints
///
/// - `GET /` - database error, schema init or link management page
pub fn protected_routes() -> Router<AppState> {
    Router::new().route("/", get(index_handler))
}

/// Public pages.
///
/// # Endpoints
///
/// - `GET /l/{id}` - redirect page for a short link
pub fn public_routes() -> Router<AppState> {
    Router::new().route("/l/{*id}", get(redirect_handler))
}
