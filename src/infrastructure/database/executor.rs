//! Single chokepoint for running statements against the database.

use sqlx::mysql::{MySqlArguments, MySqlRow};
use sqlx::{Arguments, FromRow, MySqlPool};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, warn};

use super::{ConnectionManager, DbError};
use crate::utils::db_error::is_transient_disconnect;

/// A value bound to a statement placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlParam {
    Text(String),
    Bool(bool),
}

impl From<&str> for SqlParam {
    fn from(value: &str) -> Self {
        SqlParam::Text(value.to_string())
    }
}

impl From<String> for SqlParam {
    fn from(value: String) -> Self {
        SqlParam::Text(value)
    }
}

impl From<bool> for SqlParam {
    fn from(value: bool) -> Self {
        SqlParam::Bool(value)
    }
}

/// Runs parameterized statements on the current connection.
///
/// Every call:
///
/// 1. asks the [`ConnectionManager`] for a pool, connecting lazily
/// 2. fails with [`DbError::Unavailable`] without running anything if that
///    attempt failed
/// 3. runs the statement with bound parameters, bounded by the query timeout
/// 4. on a server-gone-away class error, marks the connection disconnected and
///    fails with [`DbError::Disconnected`]; the next call reconnects
///
/// Statements without a result set (DDL, DML) succeed with no rows.
pub struct QueryExecutor {
    connection: Arc<ConnectionManager>,
    query_timeout: Duration,
}

impl QueryExecutor {
    pub fn new(connection: Arc<ConnectionManager>, query_timeout: Duration) -> Self {
        Self {
            connection,
            query_timeout,
        }
    }

    pub fn connection(&self) -> &Arc<ConnectionManager> {
        &self.connection
    }

    /// Runs a query and maps every returned row to `T`.
    pub async fn fetch_all<T>(&self, statement: &str, params: &[SqlParam]) -> Result<Vec<T>, DbError>
    where
        T: for<'r> FromRow<'r, MySqlRow> + Send + Unpin,
    {
        self.run(statement, |pool| async move {
            sqlx::query_as_with::<_, T, _>(statement, bind_all(params)?)
                .fetch_all(&pool)
                .await
        })
        .await
    }

    /// Runs a query expected to return at most one row.
    pub async fn fetch_optional<T>(
        &self,
        statement: &str,
        params: &[SqlParam],
    ) -> Result<Option<T>, DbError>
    where
        T: for<'r> FromRow<'r, MySqlRow> + Send + Unpin,
    {
        self.run(statement, |pool| async move {
            sqlx::query_as_with::<_, T, _>(statement, bind_all(params)?)
                .fetch_optional(&pool)
                .await
        })
        .await
    }

    /// Runs a query returning a single integer, such as `COUNT(*)`.
    pub async fn fetch_count(&self, statement: &str, params: &[SqlParam]) -> Result<i64, DbError> {
        self.run(statement, |pool| async move {
            sqlx::query_scalar_with::<_, i64, _>(statement, bind_all(params)?)
                .fetch_one(&pool)
                .await
        })
        .await
    }

    /// Runs a statement without a result set and returns the affected row count.
    pub async fn execute(&self, statement: &str, params: &[SqlParam]) -> Result<u64, DbError> {
        self.run(statement, |pool| async move {
            sqlx::query_with(statement, bind_all(params)?)
                .execute(&pool)
                .await
                .map(|result| result.rows_affected())
        })
        .await
    }

    /// Runs a statement over the text protocol.
    ///
    /// Needed for DDL the server refuses to prepare, e.g. `CREATE FUNCTION`.
    /// Takes no parameters; only use it with statements built from constants
    /// and validated identifiers.
    pub async fn execute_unprepared(&self, statement: &str) -> Result<(), DbError> {
        self.run(statement, |pool| async move {
            sqlx::raw_sql(statement).execute(&pool).await.map(|_| ())
        })
        .await
    }

    async fn run<R, F, Fut>(&self, statement: &str, op: F) -> Result<R, DbError>
    where
        F: FnOnce(MySqlPool) -> Fut,
        Fut: Future<Output = Result<R, sqlx::Error>>,
    {
        let Some(live) = self.connection.ensure_connected().await else {
            return Err(DbError::Unavailable);
        };

        match tokio::time::timeout(self.query_timeout, op(live.pool)).await {
            Ok(Ok(result)) => Ok(result),
            Ok(Err(e)) if is_transient_disconnect(&e) => {
                warn!(error = %e, statement, "Database went away during statement");
                self.connection.mark_disconnected(live.generation).await;
                Err(DbError::Disconnected)
            }
            Ok(Err(e)) => {
                error!(error = %e, statement, "Error while executing SQL statement");
                Err(DbError::Query(e))
            }
            Err(_) => {
                warn!(
                    timeout_ms = self.query_timeout.as_millis() as u64,
                    statement, "SQL statement timed out"
                );
                Err(DbError::Timeout(self.query_timeout))
            }
        }
    }
}

fn bind_all(params: &[SqlParam]) -> Result<MySqlArguments, sqlx::Error> {
    let mut arguments = MySqlArguments::default();
    for param in params {
        let added = match param {
            SqlParam::Text(value) => arguments.add(value.clone()),
            SqlParam::Bool(value) => arguments.add(*value),
        };
        added.map_err(sqlx::Error::Encode)?;
    }
    Ok(arguments)
}
