//! API route configuration.
//!
//! Every API endpoint requires Basic authentication via
//! [`crate::api::middleware::auth`], applied by [`crate::routes::router`].

use axum::{Router, routing::post};

use crate::api::handlers::config_handler;
use crate::state::AppState;

/// Management routes.
///
/// # Endpoints
///
/// - `POST /config` - action dispatcher (`init`, `data`, `new`, `edit`, `delete`)
pub fn protected_routes() -> Router<AppState> {
    Router::new().route("/config", post(config_handler))
}
