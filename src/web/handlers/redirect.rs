//! Handler for short link resolution.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use tracing::debug;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Template, WebTemplate)]
#[template(path = "link_new_win.html")]
pub struct LinkNewWindowTemplate {
    pub link: String,
}

#[derive(Template, WebTemplate)]
#[template(path = "link_same_win.html")]
pub struct LinkSameWindowTemplate {
    pub link: String,
}

/// Resolves a short id and renders the redirect page.
///
/// # Endpoint
///
/// `GET /l/{id}`
///
/// The id is the whole remainder of the path. The page either opens the
/// target in a new window or navigates in place, per the link's flag.
///
/// # Errors
///
/// Returns 404 Not Found if no link has this id, 503 if the database is
/// unavailable.
pub async fn redirect_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let link = state.link_service.resolve(&id).await.inspect_err(|e| {
        e.log("Redirect failed");
    })?;

    debug!(id = %link.id, new_window = link.new_window, "Resolved short link");

    let response = if link.new_window {
        LinkNewWindowTemplate { link: link.url }.into_response()
    } else {
        LinkSameWindowTemplate { link: link.url }.into_response()
    };
    Ok(response)
}
