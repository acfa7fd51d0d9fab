//! Handler for the management endpoint.

use axum::{Json, body::Bytes, extract::State};
use tracing::debug;

use crate::api::dto::config::{ConfigRequest, ConfigResponse, LinkDto};
use crate::application::services::InitOutcome;
use crate::domain::entities::LinkInput;
use crate::error::AppError;
use crate::state::AppState;

/// Dispatches one management action.
///
/// # Endpoint
///
/// `POST /config` (Basic auth)
///
/// # Actions
///
/// - `init` - provision the link table and id function
/// - `data` - list every link
/// - `new` - create a link from `url` and `new_win`
/// - `edit` - replace `url` and `new_win` of link `id`
/// - `delete` - remove link `id`
///
/// The body is parsed by hand rather than through the `Json` extractor so that
/// malformed JSON, a missing or unknown `action` and missing fields all get
/// the same `{"response": "error"}` answer with status 200.
pub async fn config_handler(State(state): State<AppState>, body: Bytes) -> Json<ConfigResponse> {
    let request = match serde_json::from_slice::<ConfigRequest>(&body) {
        Ok(request) => request,
        Err(e) => {
            debug!(error = %e, "Rejected config request body");
            return Json(ConfigResponse::error());
        }
    };

    let action = request.action();
    match dispatch(&state, request).await {
        Ok(response) => Json(response),
        Err(e) => {
            e.log(&format!("Config action '{action}' failed"));
            Json(ConfigResponse::error())
        }
    }
}

async fn dispatch(state: &AppState, request: ConfigRequest) -> Result<ConfigResponse, AppError> {
    match request {
        ConfigRequest::Init => {
            if state.schema_service.initialize().await? == InitOutcome::AlreadyProvisioned {
                debug!("Init requested on provisioned schema");
            }
            Ok(ConfigResponse::success())
        }
        ConfigRequest::Data => {
            let links = state.link_service.list_links().await?;
            Ok(ConfigResponse::with_data(
                links.into_iter().map(LinkDto::from).collect(),
            ))
        }
        ConfigRequest::New { url, new_win } => {
            state
                .link_service
                .create_link(LinkInput::new(url, new_win))
                .await?;
            Ok(ConfigResponse::success())
        }
        ConfigRequest::Edit { id, url, new_win } => {
            state
                .link_service
                .update_link(&id, LinkInput::new(url, new_win))
                .await?;
            Ok(ConfigResponse::success())
        }
        ConfigRequest::Delete { id } => {
            state.link_service.delete_link(&id).await?;
            Ok(ConfigResponse::success())
        }
    }
}
