//! Convenient imports for common functionality.
//!
//! This module re-exports the most commonly used types and functions
//! to make it easier to get started with the library.

pub use crate::catalog::DEFAULT_TABLE_PAGE_LIMIT;
pub use crate::error::SqlGatewayError;
pub use crate::gate::{SelectPrefixGate, StatementGate};
pub use crate::gateway::{
    DEFAULT_QUERY_TIMEOUT, DEFAULT_ROW_LIMIT, QueryGateway, ReadQueryExecutor,
};
pub use crate::pool::{ConnectionProvider, SqliteOptions, SqliteOptionsBuilder};
pub use crate::results::{ResultSet, Row};
pub use crate::types::ScalarValue;
