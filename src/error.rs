use thiserror::Error;

use deadpool_sqlite::rusqlite;

/// Every failure the gateway can surface to a caller.
///
/// Raw engine faults never cross the crate boundary: the gateway converts
/// them into `ExecutionError` (with the engine diagnostic preserved) before
/// returning. The remaining variants cover pool and configuration failures.
#[derive(Debug, Error)]
pub enum SqlGatewayError {
    /// The statement gate refused the submitted text.
    #[error("only SELECT statements are allowed")]
    NotAReadStatement,

    /// The engine rejected the bounded statement (syntax error, unknown
    /// table or column, or a write smuggled into a subquery position).
    #[error("SQL execution error: {0}")]
    ExecutionError(String),

    /// The query was interrupted after exceeding the wall-clock limit.
    #[error("query exceeded the {0:?} wall-clock limit")]
    QueryTimeout(std::time::Duration),

    #[error(transparent)]
    SqliteError(#[from] rusqlite::Error),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error(transparent)]
    PoolError(#[from] deadpool::managed::PoolError<rusqlite::Error>),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl SqlGatewayError {
    /// Stable reason code for transport to API callers.
    #[must_use]
    pub fn reason_code(&self) -> &'static str {
        match self {
            Self::NotAReadStatement => "not-a-read-statement",
            Self::ExecutionError(_) | Self::QueryTimeout(_) | Self::SqliteError(_) => {
                "execution-failure"
            }
            Self::ConnectionError(_) | Self::PoolError(_) | Self::ConfigError(_) => {
                "connection-unavailable"
            }
        }
    }

    /// Whether a caller retry (with backoff) can plausibly succeed.
    ///
    /// Statement errors are not retryable: resubmitting the same malformed
    /// text cannot produce a different outcome. Pool exhaustion can.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::ConnectionError(_) | Self::PoolError(_))
    }

    /// Collapse a raw engine error into the `execution-failure` kind,
    /// keeping the engine's message as the diagnostic.
    pub(crate) fn into_execution_failure(self) -> Self {
        match self {
            Self::SqliteError(err) => Self::ExecutionError(err.to_string()),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reason_codes_are_stable() {
        assert_eq!(
            SqlGatewayError::NotAReadStatement.reason_code(),
            "not-a-read-statement"
        );
        assert_eq!(
            SqlGatewayError::ExecutionError("boom".into()).reason_code(),
            "execution-failure"
        );
        assert_eq!(
            SqlGatewayError::ConnectionError("pool dry".into()).reason_code(),
            "connection-unavailable"
        );
    }

    #[test]
    fn only_pool_failures_are_retryable() {
        assert!(SqlGatewayError::ConnectionError("pool dry".into()).is_retryable());
        assert!(!SqlGatewayError::NotAReadStatement.is_retryable());
        assert!(!SqlGatewayError::ExecutionError("syntax".into()).is_retryable());
    }

    #[test]
    fn engine_errors_collapse_to_execution_failure() {
        let err = SqlGatewayError::SqliteError(rusqlite::Error::ExecuteReturnedResults);
        match err.into_execution_failure() {
            SqlGatewayError::ExecutionError(detail) => assert!(!detail.is_empty()),
            other => panic!("expected ExecutionError, got {other:?}"),
        }
    }
}
