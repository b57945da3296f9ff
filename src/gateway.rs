use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::error::SqlGatewayError;
use crate::gate::{SelectPrefixGate, StatementGate};
use crate::materialize::build_result_set;
use crate::pool::ConnectionProvider;
use crate::results::ResultSet;

/// Default cap on returned rows when the caller does not supply one.
pub const DEFAULT_ROW_LIMIT: usize = 200;
/// Default wall-clock bound on a single bounded query.
pub const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(30);

// How long to wait for the worker to acknowledge an interrupt before
// reporting the timeout anyway.
const INTERRUPT_GRACE: Duration = Duration::from_secs(2);

/// Read-side execution seam for callers that want to mock the gateway.
#[async_trait]
pub trait ReadQueryExecutor: Send + Sync {
    /// Execute untrusted query text with an explicit row cap.
    async fn execute(
        &self,
        query_text: &str,
        row_limit: usize,
    ) -> Result<ResultSet, SqlGatewayError>;

    /// Execute untrusted query text with the configured default row cap.
    async fn execute_default(&self, query_text: &str) -> Result<ResultSet, SqlGatewayError>;
}

/// The safety and execution boundary between untrusted SQL text and the
/// shared database.
///
/// Every accepted statement is executed as
/// `SELECT * FROM (<text>) LIMIT <row_limit>`: the outer bound always wins
/// over any `LIMIT` embedded in the text, and a write statement smuggled
/// into the subquery position fails at parse time instead of executing.
#[derive(Clone)]
pub struct QueryGateway {
    provider: ConnectionProvider,
    gate: Arc<dyn StatementGate>,
    default_row_limit: usize,
    query_timeout: Duration,
}

impl QueryGateway {
    /// Wrap a connection provider with the default prefix gate, row limit,
    /// and query timeout.
    #[must_use]
    pub fn new(provider: ConnectionProvider) -> Self {
        Self {
            provider,
            gate: Arc::new(SelectPrefixGate::new()),
            default_row_limit: DEFAULT_ROW_LIMIT,
            query_timeout: DEFAULT_QUERY_TIMEOUT,
        }
    }

    /// Substitute a different statement gate.
    #[must_use]
    pub fn with_gate(mut self, gate: Arc<dyn StatementGate>) -> Self {
        self.gate = gate;
        self
    }

    #[must_use]
    pub fn with_default_row_limit(mut self, default_row_limit: usize) -> Self {
        self.default_row_limit = default_row_limit;
        self
    }

    #[must_use]
    pub fn with_query_timeout(mut self, query_timeout: Duration) -> Self {
        self.query_timeout = query_timeout;
        self
    }

    #[must_use]
    pub fn default_row_limit(&self) -> usize {
        self.default_row_limit
    }

    /// Execute untrusted query text, returning at most `row_limit` rows.
    ///
    /// Gate rejection happens before any connection is acquired. Engine
    /// failures come back as `ExecutionError` with the engine diagnostic;
    /// a query that outlives the wall-clock limit is interrupted and
    /// reported as `QueryTimeout`, with its connection scope released on
    /// every path.
    ///
    /// # Errors
    /// `NotAReadStatement`, `ExecutionError`, `QueryTimeout`, or the
    /// retryable pool kinds; never a raw engine fault.
    pub async fn execute(
        &self,
        query_text: &str,
        row_limit: usize,
    ) -> Result<ResultSet, SqlGatewayError> {
        if !self.gate.is_read_only(query_text) {
            debug!("statement gate rejected non-SELECT text");
            return Err(SqlGatewayError::NotAReadStatement);
        }

        let bounded = bound_statement(query_text, row_limit);
        let conn = self.provider.get_connection().await?;

        // The handle lets us abort the engine from outside the worker
        // thread if the wall-clock limit expires.
        let interrupt = conn.interact(|conn| conn.get_interrupt_handle()).await?;

        let busy_timeout = self.provider.busy_timeout();
        let fut = conn.interact(move |conn| -> Result<ResultSet, SqlGatewayError> {
            conn.busy_timeout(busy_timeout)?;
            let mut stmt = conn.prepare(&bounded)?;
            build_result_set(&mut stmt)
        });
        tokio::pin!(fut);

        let joined = match tokio::time::timeout(self.query_timeout, &mut fut).await {
            Ok(joined) => joined,
            Err(_) => {
                interrupt.interrupt();
                // Drain the in-flight call so the connection scope is
                // released before we report the timeout.
                if tokio::time::timeout(INTERRUPT_GRACE, &mut fut).await.is_err() {
                    warn!("worker did not acknowledge interrupt within the grace period");
                }
                warn!(limit = ?self.query_timeout, "query interrupted after exceeding wall-clock limit");
                return Err(SqlGatewayError::QueryTimeout(self.query_timeout));
            }
        };

        let result = joined?.map_err(SqlGatewayError::into_execution_failure)?;
        debug!(rows = result.row_count(), "bounded query executed");
        Ok(result)
    }

    /// [`Self::execute`] with the configured default row limit.
    ///
    /// # Errors
    /// Same as [`Self::execute`].
    pub async fn execute_default(&self, query_text: &str) -> Result<ResultSet, SqlGatewayError> {
        self.execute(query_text, self.default_row_limit).await
    }
}

#[async_trait]
impl ReadQueryExecutor for QueryGateway {
    async fn execute(
        &self,
        query_text: &str,
        row_limit: usize,
    ) -> Result<ResultSet, SqlGatewayError> {
        QueryGateway::execute(self, query_text, row_limit).await
    }

    async fn execute_default(&self, query_text: &str) -> Result<ResultSet, SqlGatewayError> {
        QueryGateway::execute_default(self, query_text).await
    }
}

/// Wrap query text in the row-bounding outer statement.
///
/// Trailing semicolons are stripped first: LLM output routinely ends with
/// `;`, which is invalid inside a subquery. SQLite accepts an unaliased
/// derived table, so no alias is appended.
fn bound_statement(query_text: &str, row_limit: usize) -> String {
    let mut inner = query_text.trim();
    while let Some(stripped) = inner.strip_suffix(';') {
        inner = stripped.trim_end();
    }
    format!("SELECT * FROM ({inner}) LIMIT {row_limit}")
}
