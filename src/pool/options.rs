use std::time::Duration;

use super::ConnectionProvider;
use crate::error::SqlGatewayError;

/// Default number of pooled connections.
pub const DEFAULT_MAX_CONNECTIONS: usize = 8;
/// Default wait for a pool checkout before reporting `connection-unavailable`.
pub const DEFAULT_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);
/// Default engine busy-handler timeout.
pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Options for configuring the SQLite connection provider.
#[derive(Debug, Clone)]
pub struct SqliteOptions {
    /// Path to the database file, or a `file:...?mode=memory&cache=shared`
    /// URI for injected in-memory instances in tests.
    pub db_path: String,
    pub max_connections: usize,
    pub acquire_timeout: Duration,
    pub busy_timeout: Duration,
}

impl SqliteOptions {
    #[must_use]
    pub fn new(db_path: String) -> Self {
        Self {
            db_path,
            max_connections: DEFAULT_MAX_CONNECTIONS,
            acquire_timeout: DEFAULT_ACQUIRE_TIMEOUT,
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
        }
    }
}

/// Fluent builder for [`SqliteOptions`].
#[derive(Debug, Clone)]
pub struct SqliteOptionsBuilder {
    opts: SqliteOptions,
}

impl SqliteOptionsBuilder {
    #[must_use]
    pub fn new(db_path: String) -> Self {
        Self {
            opts: SqliteOptions::new(db_path),
        }
    }

    #[must_use]
    pub fn max_connections(mut self, max_connections: usize) -> Self {
        self.opts.max_connections = max_connections;
        self
    }

    #[must_use]
    pub fn acquire_timeout(mut self, acquire_timeout: Duration) -> Self {
        self.opts.acquire_timeout = acquire_timeout;
        self
    }

    #[must_use]
    pub fn busy_timeout(mut self, busy_timeout: Duration) -> Self {
        self.opts.busy_timeout = busy_timeout;
        self
    }

    #[must_use]
    pub fn finish(self) -> SqliteOptions {
        self.opts
    }

    /// Build a [`ConnectionProvider`] from these options.
    ///
    /// # Errors
    ///
    /// Returns `SqlGatewayError` if pool creation or the initial smoke test
    /// fails.
    pub async fn build(self) -> Result<ConnectionProvider, SqlGatewayError> {
        ConnectionProvider::new_sqlite(self.finish()).await
    }
}
