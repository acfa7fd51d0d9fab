//! Schema bootstrap and setup-state reporting.

use std::sync::Arc;

use serde_json::json;
use tracing::{info, warn};

use crate::domain::repositories::SchemaRepository;
use crate::error::AppError;

/// Where the installation stands, as shown on the index page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupStatus {
    /// No connection to the database could be made.
    DatabaseUnavailable,
    /// Connected, but the table or the id function is missing.
    NeedsInit,
    /// Connected and provisioned.
    Ready,
}

/// Result of an `init` request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    /// Both schema objects already existed; nothing was executed.
    AlreadyProvisioned,
    /// Missing objects were created.
    Provisioned,
}

/// Service owning the link table and id function lifecycle.
///
/// Provisioning only happens on explicit request, never as a side effect of
/// another operation.
pub struct SchemaService {
    schema_repository: Arc<dyn SchemaRepository>,
}

impl SchemaService {
    pub fn new(schema_repository: Arc<dyn SchemaRepository>) -> Self {
        Self { schema_repository }
    }

    /// Returns true iff both the link table and the id function exist.
    pub async fn is_provisioned(&self) -> Result<bool, AppError> {
        if !self.schema_repository.table_exists().await? {
            return Ok(false);
        }
        self.schema_repository.function_exists().await
    }

    /// Creates whichever schema objects are missing, then re-checks.
    ///
    /// Safe to call repeatedly.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the objects still do not exist
    /// afterwards, or the underlying database error.
    pub async fn provision(&self) -> Result<(), AppError> {
        if !self.schema_repository.table_exists().await? {
            self.schema_repository.create_table().await?;
        }
        if !self.schema_repository.function_exists().await? {
            self.schema_repository.create_function().await?;
        }

        if self.is_provisioned().await? {
            info!("Schema provisioned");
            Ok(())
        } else {
            Err(AppError::internal(
                "Schema still incomplete after provisioning",
                json!({}),
            ))
        }
    }

    /// Handles the `init` action.
    ///
    /// An already provisioned schema is reported as success without running
    /// any DDL.
    pub async fn initialize(&self) -> Result<InitOutcome, AppError> {
        if self.is_provisioned().await? {
            return Ok(InitOutcome::AlreadyProvisioned);
        }
        self.provision().await?;
        Ok(InitOutcome::Provisioned)
    }

    /// Determines which index page applies.
    pub async fn status(&self) -> SetupStatus {
        if !self.schema_repository.is_reachable().await {
            return SetupStatus::DatabaseUnavailable;
        }

        match self.is_provisioned().await {
            Ok(true) => SetupStatus::Ready,
            Ok(false) => SetupStatus::NeedsInit,
            Err(e) => {
                warn!(code = e.code(), error = %e, "Failed to inspect schema");
                SetupStatus::DatabaseUnavailable
            }
        }
    }
}
