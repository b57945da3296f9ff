//! Read-only query gateway over pooled SQLite.
//!
//! Untrusted SQL text (end-user input or LLM output) flows through a
//! SELECT-prefix gate, gets wrapped in a row-bounding outer statement, runs
//! on a pooled connection, and comes back as a typed tabular result or a
//! typed rejection. No raw engine fault crosses the crate boundary.

mod catalog;

pub mod error;
pub mod gate;
pub mod gateway;
pub mod materialize;
pub mod pool;
pub mod prelude;
pub mod results;
pub mod types;

pub use catalog::DEFAULT_TABLE_PAGE_LIMIT;
pub use error::SqlGatewayError;
pub use gate::{SelectPrefixGate, StatementGate};
pub use gateway::{DEFAULT_QUERY_TIMEOUT, DEFAULT_ROW_LIMIT, QueryGateway, ReadQueryExecutor};
pub use materialize::build_result_set;
pub use pool::{ConnectionProvider, SqliteOptions, SqliteOptionsBuilder};
pub use results::{ResultSet, Row};
pub use types::ScalarValue;
