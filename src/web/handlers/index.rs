//! Index page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::State,
    response::{IntoResponse, Response},
};

use crate::application::services::SetupStatus;
use crate::state::AppState;

/// Shown when no database connection can be made.
#[derive(Template, WebTemplate)]
#[template(path = "db_error.html")]
pub struct DbErrorTemplate {}

/// Shown when the link table or id function is missing. Offers the `init` action.
#[derive(Template, WebTemplate)]
#[template(path = "db_init.html")]
pub struct DbInitTemplate {}

/// Link management client for `POST /config`.
#[derive(Template, WebTemplate)]
#[template(path = "config.html")]
pub struct ConfigTemplate {}

/// Renders the page matching the current setup state.
///
/// # Endpoint
///
/// `GET /` (Basic auth)
///
/// | state | page |
/// |---|---|
/// | database unreachable | `db_error.html` |
/// | schema incomplete | `db_init.html` |
/// | ready | `config.html` |
pub async fn index_handler(State(state): State<AppState>) -> Response {
    match state.schema_service.status().await {
        SetupStatus::DatabaseUnavailable => DbErrorTemplate {}.into_response(),
        SetupStatus::NeedsInit => DbInitTemplate {}.into_response(),
        SetupStatus::Ready => ConfigTemplate {}.into_response(),
    }
}
