//! Database connectivity: connection state machine and statement execution.
//!
//! - [`ConnectionManager`] - Lazily connects and tracks `Connected` / `Disconnected`
//! - [`QueryExecutor`] - Runs bound statements and classifies their outcome
//! - [`DatabaseContext`] - Wires both together with the MariaDB repositories

mod connection;
mod executor;

pub use connection::{ConnectionManager, ConnectionState, LivePool, PoolSettings};
pub use executor::{QueryExecutor, SqlParam};

use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::infrastructure::persistence::{
    MariaDbLinkRepository, MariaDbSchemaRepository, SchemaNames, Statements,
};

/// Failure of a single database interaction.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// No connection could be established for this call.
    #[error("database unavailable")]
    Unavailable,
    /// The server went away mid-statement; the connection was dropped.
    #[error("database connection lost")]
    Disconnected,
    #[error("statement timed out after {0:?}")]
    Timeout(Duration),
    #[error(transparent)]
    Query(#[from] sqlx::Error),
}

/// Connection manager and repositories sharing one executor.
pub struct DatabaseContext {
    pub connection: Arc<ConnectionManager>,
    pub executor: Arc<QueryExecutor>,
    pub link_repository: Arc<MariaDbLinkRepository>,
    pub schema_repository: Arc<MariaDbSchemaRepository>,
}

impl DatabaseContext {
    /// Builds the context without touching the network.
    ///
    /// # Errors
    ///
    /// Returns an error if `DATABASE_URL` cannot be parsed or the configured
    /// table or function name is not a plain identifier.
    pub fn from_config(config: &Config) -> Result<Self> {
        let options = config.connect_options()?;

        let settings = PoolSettings {
            max_connections: config.db_max_connections,
            acquire_timeout: Duration::from_secs(config.db_connect_timeout),
            idle_timeout: Duration::from_secs(config.db_idle_timeout),
        };

        let names = SchemaNames::new(&config.link_table, &config.id_function)?;
        let statements = Arc::new(Statements::new(&names));

        let connection = Arc::new(ConnectionManager::new(options, settings));
        let executor = Arc::new(QueryExecutor::new(
            connection.clone(),
            Duration::from_secs(config.db_query_timeout),
        ));

        Ok(Self {
            connection,
            link_repository: Arc::new(MariaDbLinkRepository::new(
                executor.clone(),
                statements.clone(),
            )),
            schema_repository: Arc::new(MariaDbSchemaRepository::new(
                executor.clone(),
                statements,
            )),
            executor,
        })
    }
}
