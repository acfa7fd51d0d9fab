//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{AuthService, LinkService, SchemaService};
use crate::domain::repositories::{LinkRepository, SchemaRepository};

#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService>,
    pub schema_service: Arc<SchemaService>,
    pub auth_service: Arc<AuthService>,
}

impl AppState {
    pub fn new(
        link_repository: Arc<dyn LinkRepository>,
        schema_repository: Arc<dyn SchemaRepository>,
        auth_service: AuthService,
    ) -> Self {
        Self {
            link_service: Arc::new(LinkService::new(link_repository)),
            schema_service: Arc::new(SchemaService::new(schema_repository)),
            auth_service: Arc::new(auth_service),
        }
    }
}
