use std::collections::HashMap;
use std::sync::Arc;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use super::row::Row;
use crate::types::ScalarValue;

/// The tabular outcome of a bounded query.
///
/// Column names are ordered as the engine reported them and are shared by
/// every row. A zero-row result is valid and keeps its column list, so a
/// caller can still render an empty table with headers.
///
/// Serializes to the transport shape the dashboard consumes:
/// `{"columns": [...], "rows": [[...], ...]}`.
#[derive(Debug, Clone, Default)]
pub struct ResultSet {
    columns: Arc<Vec<String>>,
    column_index: Arc<HashMap<String, usize>>,
    rows: Vec<Row>,
}

impl ResultSet {
    /// Create an empty result set with the given column names.
    #[must_use]
    pub fn new(columns: Vec<String>) -> Self {
        Self::with_capacity(columns, 0)
    }

    /// Create a result set with preallocated row capacity.
    #[must_use]
    pub fn with_capacity(columns: Vec<String>, capacity: usize) -> Self {
        let column_index = Arc::new(
            columns
                .iter()
                .enumerate()
                .map(|(i, name)| (name.clone(), i))
                .collect::<HashMap<_, _>>(),
        );
        Self {
            columns: Arc::new(columns),
            column_index,
            rows: Vec::with_capacity(capacity),
        }
    }

    /// Append a row of positional values.
    ///
    /// The values must align with this result set's column list; the
    /// materializer guarantees that by construction.
    pub fn push_row(&mut self, values: Vec<ScalarValue>) {
        self.rows.push(Row {
            column_names: self.columns.clone(),
            values,
            column_index_cache: self.column_index.clone(),
        });
    }

    /// Engine-reported column names, in engine order.
    #[must_use]
    pub fn column_names(&self) -> &[String] {
        &self.columns
    }

    /// The rows of this result set.
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl PartialEq for ResultSet {
    fn eq(&self, other: &Self) -> bool {
        self.columns == other.columns && self.rows == other.rows
    }
}

impl Serialize for ResultSet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("ResultSet", 2)?;
        state.serialize_field("columns", self.columns.as_ref())?;
        state.serialize_field("rows", &self.rows)?;
        state.end()
    }
}
