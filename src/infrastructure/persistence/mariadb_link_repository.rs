//! MariaDB implementation of link repository.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

use crate::domain::entities::{LinkFields, ShortLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::infrastructure::database::{QueryExecutor, SqlParam};
use crate::infrastructure::persistence::Statements;

/// Row shape of the link table.
#[derive(Debug, sqlx::FromRow)]
struct LinkRow {
    id: String,
    url: String,
    new_win: bool,
}

impl From<LinkRow> for ShortLink {
    fn from(row: LinkRow) -> Self {
        ShortLink::new(row.id, row.url, row.new_win)
    }
}

/// MariaDB repository for link storage and retrieval.
///
/// All statements go through the [`QueryExecutor`] with bound parameters.
pub struct MariaDbLinkRepository {
    executor: Arc<QueryExecutor>,
    statements: Arc<Statements>,
}

impl MariaDbLinkRepository {
    /// Creates a new repository on top of a shared executor.
    pub fn new(executor: Arc<QueryExecutor>, statements: Arc<Statements>) -> Self {
        Self {
            executor,
            statements,
        }
    }
}

#[async_trait]
impl LinkRepository for MariaDbLinkRepository {
    async fn list_all(&self) -> Result<Vec<ShortLink>, AppError> {
        let rows: Vec<LinkRow> = self
            .executor
            .fetch_all(&self.statements.select_all, &[])
            .await?;

        Ok(rows.into_iter().map(ShortLink::from).collect())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<ShortLink>, AppError> {
        let row: Option<LinkRow> = self
            .executor
            .fetch_optional(&self.statements.select_by_id, &[id.into()])
            .await?;

        Ok(row.map(ShortLink::from))
    }

    async fn create(&self, fields: LinkFields) -> Result<(), AppError> {
        let params = [SqlParam::Text(fields.url), SqlParam::Bool(fields.new_window)];
        self.executor
            .execute(&self.statements.insert, &params)
            .await?;

        Ok(())
    }

    async fn update(&self, id: &str, fields: LinkFields) -> Result<u64, AppError> {
        let params = [
            SqlParam::Text(fields.url),
            SqlParam::Bool(fields.new_window),
            id.into(),
        ];
        let affected = self
            .executor
            .execute(&self.statements.update, &params)
            .await?;

        debug!(id, affected, "Updated link");
        Ok(affected)
    }

    async fn delete(&self, id: &str) -> Result<u64, AppError> {
        let affected = self
            .executor
            .execute(&self.statements.delete, &[id.into()])
            .await?;

        debug!(id, affected, "Deleted link");
        Ok(affected)
    }
}
