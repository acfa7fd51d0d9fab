//! DTOs for the management endpoint.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::entities::ShortLink;

/// Request body for `POST /config`, discriminated by its `action` field.
///
/// Field presence is checked here, during deserialization; value checks
/// (URL length, window flag literal) happen in
/// [`crate::application::services::LinkService`]. Unknown fields are ignored.
///
/// ```json
/// { "action": "edit", "id": "…", "url": "https://example.com", "new_win": "false" }
/// ```
#[derive(Debug, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum ConfigRequest {
    Init,
    Data,
    New { url: String, new_win: Value },
    Edit { id: String, url: String, new_win: Value },
    Delete { id: String },
}

impl ConfigRequest {
    /// Name of the action, for logging.
    pub fn action(&self) -> &'static str {
        match self {
            ConfigRequest::Init => "init",
            ConfigRequest::Data => "data",
            ConfigRequest::New { .. } => "new",
            ConfigRequest::Edit { .. } => "edit",
            ConfigRequest::Delete { .. } => "delete",
        }
    }
}

/// The two-shape response envelope.
///
/// ```json
/// { "response": "success", "data": [ … ] }
/// { "response": "error" }
/// ```
#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(tag = "response", rename_all = "lowercase")]
pub enum ConfigResponse {
    Success {
        #[serde(skip_serializing_if = "Option::is_none")]
        data: Option<Vec<LinkDto>>,
    },
    Error,
}

impl ConfigResponse {
    pub fn success() -> Self {
        ConfigResponse::Success { data: None }
    }

    pub fn with_data(data: Vec<LinkDto>) -> Self {
        ConfigResponse::Success { data: Some(data) }
    }

    pub fn error() -> Self {
        ConfigResponse::Error
    }
}

/// One entry of the `data` listing.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct LinkDto {
    pub id: String,
    pub url: String,
    pub new_win: bool,
}

impl From<ShortLink> for LinkDto {
    fn from(link: ShortLink) -> Self {
        Self {
            id: link.id,
            url: link.url,
            new_win: link.new_window,
        }
    }
}
