//! MariaDB implementation of schema repository.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

use crate::domain::repositories::SchemaRepository;
use crate::error::AppError;
use crate::infrastructure::database::QueryExecutor;
use crate::infrastructure::persistence::Statements;

/// Looks up and creates the link table and the id function through the
/// `information_schema` catalog.
pub struct MariaDbSchemaRepository {
    executor: Arc<QueryExecutor>,
    statements: Arc<Statements>,
}

impl MariaDbSchemaRepository {
    pub fn new(executor: Arc<QueryExecutor>, statements: Arc<Statements>) -> Self {
        Self {
            executor,
            statements,
        }
    }
}

#[async_trait]
impl SchemaRepository for MariaDbSchemaRepository {
    async fn is_reachable(&self) -> bool {
        self.executor.connection().ensure_connected().await.is_some()
    }

    async fn table_exists(&self) -> Result<bool, AppError> {
        let count = self
            .executor
            .fetch_count(
                &self.statements.table_exists,
                &[self.statements.names.table().into()],
            )
            .await?;

        Ok(count > 0)
    }

    async fn function_exists(&self) -> Result<bool, AppError> {
        let count = self
            .executor
            .fetch_count(
                &self.statements.function_exists,
                &[self.statements.names.function().into()],
            )
            .await?;

        Ok(count > 0)
    }

    async fn create_table(&self) -> Result<(), AppError> {
        self.executor
            .execute_unprepared(&self.statements.create_table)
            .await?;

        info!(table = self.statements.names.table(), "Link table ensured");
        Ok(())
    }

    async fn create_function(&self) -> Result<(), AppError> {
        self.executor
            .execute_unprepared(&self.statements.create_function)
            .await?;

        info!(
            function = self.statements.names.function(),
            "Id function ensured"
        );
        Ok(())
    }
}
