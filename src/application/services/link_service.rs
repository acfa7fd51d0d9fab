//! Short link management and redirect resolution.

use std::sync::Arc;

use serde_json::json;
use tracing::debug;

use crate::domain::entities::{LinkInput, ShortLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// Service for creating, editing, deleting and resolving short links.
///
/// Input is validated before the repository is called; a rejected request
/// never reaches storage.
pub struct LinkService {
    link_repository: Arc<dyn LinkRepository>,
}

impl LinkService {
    /// Creates a new link service.
    pub fn new(link_repository: Arc<dyn LinkRepository>) -> Self {
        Self { link_repository }
    }

    /// Returns every stored link.
    pub async fn list_links(&self) -> Result<Vec<ShortLink>, AppError> {
        self.link_repository.list_all().await
    }

    /// Creates a link; the id is generated by the storage layer.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL is too long or the window
    /// flag is not an accepted literal.
    pub async fn create_link(&self, input: LinkInput) -> Result<(), AppError> {
        let fields = input.into_fields()?;
        self.link_repository.create(fields).await
    }

    /// Replaces url and window flag of an existing link.
    ///
    /// Editing an id that does not exist is not an error; nothing changes.
    ///
    /// # Errors
    ///
    /// Same validation errors as [`Self::create_link`].
    pub async fn update_link(&self, id: &str, input: LinkInput) -> Result<(), AppError> {
        let fields = input.into_fields()?;
        let affected = self.link_repository.update(id, fields).await?;
        if affected == 0 {
            debug!(id, "Edit matched no link");
        }
        Ok(())
    }

    /// Deletes a link. Deleting an unknown id is not an error.
    pub async fn delete_link(&self, id: &str) -> Result<(), AppError> {
        let affected = self.link_repository.delete(id).await?;
        if affected == 0 {
            debug!(id, "Delete matched no link");
        }
        Ok(())
    }

    /// Resolves a short id to its link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this id.
    pub async fn resolve(&self, id: &str) -> Result<ShortLink, AppError> {
        self.link_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Short link not found", json!({ "id": id })))
    }
}
