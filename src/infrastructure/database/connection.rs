//! Lazily established database connection with an explicit connectivity state.

use sqlx::MySqlPool;
use sqlx::mysql::{MySqlConnectOptions, MySqlPoolOptions};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, error, info, warn};

/// Pool sizing and timeouts applied whenever a connection is (re)established.
#[derive(Debug, Clone)]
pub struct PoolSettings {
    pub max_connections: u32,
    /// Upper bound for opening a connection or acquiring one from the pool.
    pub acquire_timeout: Duration,
    pub idle_timeout: Duration,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: 5,
            acquire_timeout: Duration::from_secs(10),
            idle_timeout: Duration::from_secs(600),
        }
    }
}

/// A pool handed out by [`ConnectionManager::ensure_connected`].
///
/// `generation` identifies the connect attempt that produced the pool, so a
/// failure seen on an old pool cannot tear down a newer one.
#[derive(Debug, Clone)]
pub struct LivePool {
    pub pool: MySqlPool,
    pub generation: u64,
}

/// Connectivity of the process to the database.
///
/// While `Connected`, the state owns the pool every statement is run on.
#[derive(Debug, Default)]
pub enum ConnectionState {
    #[default]
    Disconnected,
    Connected(LivePool),
}

impl ConnectionState {
    pub fn is_connected(&self) -> bool {
        matches!(self, ConnectionState::Connected(_))
    }
}

/// Owns the database handle and moves it between [`ConnectionState`]s.
///
/// Transitions:
///
/// - `Disconnected -> Connected` in [`Self::ensure_connected`] when a connect
///   attempt succeeds
/// - `Connected -> Disconnected` in [`Self::mark_disconnected`] after the
///   server went away, and in [`Self::disconnect`] on shutdown
///
/// There is no retry loop: a failed attempt leaves the state `Disconnected`
/// and the next caller tries again. Callers that queued behind a failing
/// attempt share its result instead of starting another one.
pub struct ConnectionManager {
    options: MySqlConnectOptions,
    settings: PoolSettings,
    state: RwLock<ConnectionState>,
    /// Held for the duration of one connect attempt.
    connecting: Mutex<()>,
    /// Number of finished connect attempts.
    attempts: AtomicU64,
}

impl ConnectionManager {
    /// Creates a manager in the `Disconnected` state. No I/O happens here.
    pub fn new(options: MySqlConnectOptions, settings: PoolSettings) -> Self {
        Self {
            options,
            settings,
            state: RwLock::new(ConnectionState::Disconnected),
            connecting: Mutex::new(()),
            attempts: AtomicU64::new(0),
        }
    }

    /// Returns the live pool, connecting first if currently disconnected.
    ///
    /// A failed attempt is logged and reported as `None`; it never surfaces as
    /// an error. At most one attempt is in flight, bounded by the acquire
    /// timeout, and callers that waited on it get its outcome.
    pub async fn ensure_connected(&self) -> Option<LivePool> {
        if let ConnectionState::Connected(live) = &*self.state.read().await {
            return Some(live.clone());
        }

        let seen = self.attempts.load(Ordering::Acquire);
        let _connecting = self.connecting.lock().await;

        if let ConnectionState::Connected(live) = &*self.state.read().await {
            return Some(live.clone());
        }
        if self.attempts.load(Ordering::Acquire) != seen {
            debug!("Skipping connect, the attempt this call waited on failed");
            return None;
        }

        let attempt = tokio::time::timeout(
            self.settings.acquire_timeout,
            self.pool_options().connect_with(self.options.clone()),
        )
        .await;
        let generation = self.attempts.fetch_add(1, Ordering::AcqRel) + 1;

        match attempt {
            Ok(Ok(pool)) => {
                info!(
                    host = self.options.get_host(),
                    port = self.options.get_port(),
                    generation,
                    "Connected to database"
                );
                let live = LivePool { pool, generation };
                *self.state.write().await = ConnectionState::Connected(live.clone());
                Some(live)
            }
            Ok(Err(e)) => {
                error!(error = %e, "Error connecting to database");
                None
            }
            Err(_) => {
                error!(
                    timeout_ms = self.settings.acquire_timeout.as_millis() as u64,
                    "Timed out connecting to database"
                );
                None
            }
        }
    }

    /// Drops the pool of `generation` after a transient disconnect.
    ///
    /// Does nothing if the current pool is a different one, i.e. the failure
    /// came from a pool that was already replaced. The next
    /// [`Self::ensure_connected`] call opens a fresh pool. Connections still
    /// checked out by other requests are closed in the background.
    pub async fn mark_disconnected(&self, generation: u64) {
        let mut state = self.state.write().await;
        match &*state {
            ConnectionState::Connected(live) if live.generation == generation => {}
            _ => return,
        }

        if let ConnectionState::Connected(live) = std::mem::take(&mut *state) {
            warn!(generation, "Database connection lost, will reconnect on next use");
            tokio::spawn(async move { live.pool.close().await });
        }
    }

    /// Closes the pool for a controlled teardown.
    pub async fn disconnect(&self) {
        let previous = std::mem::take(&mut *self.state.write().await);
        if let ConnectionState::Connected(live) = previous {
            live.pool.close().await;
            info!("Database connection closed");
        }
    }

    pub async fn is_connected(&self) -> bool {
        self.state.read().await.is_connected()
    }

    fn pool_options(&self) -> MySqlPoolOptions {
        MySqlPoolOptions::new()
            .max_connections(self.settings.max_connections)
            .acquire_timeout(self.settings.acquire_timeout)
            .idle_timeout(self.settings.idle_timeout)
    }
}
