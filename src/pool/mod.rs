use std::time::Duration;

use deadpool::managed::PoolConfig;
use deadpool_sqlite::{Config as DeadpoolSqliteConfig, InteractError, Object, Pool, Runtime};
use tracing::debug;

use crate::error::SqlGatewayError;

mod options;

pub use options::{
    DEFAULT_ACQUIRE_TIMEOUT, DEFAULT_BUSY_TIMEOUT, DEFAULT_MAX_CONNECTIONS, SqliteOptions,
    SqliteOptionsBuilder,
};

/// Pooled access to a single SQLite database file.
///
/// One provider is constructed at startup and handed to the gateway; it is
/// the only process-wide shared resource. All pool bookkeeping lives inside
/// `deadpool`, so concurrent callers only ever share the pool handle itself.
#[derive(Clone, Debug)]
pub struct ConnectionProvider {
    pool: Pool,
    busy_timeout: Duration,
}

impl ConnectionProvider {
    /// Fluent entry point mirroring [`SqliteOptionsBuilder`].
    #[must_use]
    pub fn sqlite_builder(db_path: impl Into<String>) -> SqliteOptionsBuilder {
        SqliteOptionsBuilder::new(db_path.into())
    }

    /// Asynchronous initializer backed by `deadpool_sqlite`.
    ///
    /// Creates the pool, checks one connection out as a smoke test, and
    /// switches the database to WAL so concurrent readers do not block each
    /// other.
    ///
    /// # Errors
    /// Returns `SqlGatewayError::ConnectionError` if pool creation fails and
    /// `SqlGatewayError::PoolError`/`SqliteError` if the smoke test fails.
    pub async fn new_sqlite(opts: SqliteOptions) -> Result<Self, SqlGatewayError> {
        if opts.max_connections == 0 {
            return Err(SqlGatewayError::ConfigError(
                "max_connections must be at least 1".into(),
            ));
        }

        let mut cfg = DeadpoolSqliteConfig::new(opts.db_path.clone());
        let mut pool_cfg = PoolConfig::new(opts.max_connections);
        pool_cfg.timeouts.wait = Some(opts.acquire_timeout);
        cfg.pool = Some(pool_cfg);

        let pool = cfg.create_pool(Runtime::Tokio1).map_err(|e| {
            SqlGatewayError::ConnectionError(format!("failed to create SQLite pool: {e}"))
        })?;

        // Smoke-test one connection and make the journal mode stick.
        {
            let conn = pool.get().await.map_err(SqlGatewayError::PoolError)?;
            conn.interact(|conn| {
                conn.execute_batch("PRAGMA journal_mode = WAL;")
                    .map_err(SqlGatewayError::SqliteError)
            })
            .await??;
        }

        debug!(db_path = %opts.db_path, max_connections = opts.max_connections, "sqlite pool ready");

        Ok(Self {
            pool,
            busy_timeout: opts.busy_timeout,
        })
    }

    /// Check a connection out of the pool.
    ///
    /// The returned object puts the connection back on every exit path,
    /// including panics inside `interact` closures. Checkout waits at most
    /// the configured acquire timeout; an exhausted pool surfaces as the
    /// retryable `connection-unavailable` kind.
    ///
    /// # Errors
    /// Returns `SqlGatewayError::PoolError` if the pool cannot provide a
    /// connection in time.
    pub async fn get_connection(&self) -> Result<Object, SqlGatewayError> {
        self.pool
            .get()
            .await
            .map_err(SqlGatewayError::PoolError)
    }

    /// Engine-level busy handler timeout applied before each bounded query.
    #[must_use]
    pub fn busy_timeout(&self) -> Duration {
        self.busy_timeout
    }

    /// Run a raw statement batch on a pooled connection.
    ///
    /// This is the seam used by the schema-owning data loader and by test
    /// setup. It is not reachable from untrusted query text, which only
    /// ever flows through the gateway.
    ///
    /// # Errors
    /// Returns `SqlGatewayError::SqliteError` if any statement in the batch
    /// fails; earlier statements are not rolled back.
    pub async fn execute_batch(&self, sql: &str) -> Result<(), SqlGatewayError> {
        let conn = self.get_connection().await?;
        let sql = sql.to_owned();
        conn.interact(move |conn| {
            conn.execute_batch(&sql)
                .map_err(SqlGatewayError::SqliteError)
        })
        .await??;
        Ok(())
    }
}

impl From<InteractError> for SqlGatewayError {
    fn from(err: InteractError) -> Self {
        SqlGatewayError::ConnectionError(format!("SQLite interact error: {err}"))
    }
}
