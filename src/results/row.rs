use std::collections::HashMap;
use std::sync::Arc;

use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};

use crate::types::ScalarValue;

/// A single row from a query result.
///
/// Column names are shared across all rows of a result set, and a shared
/// name-to-index cache avoids repeated string comparisons on lookups.
#[derive(Debug, Clone)]
pub struct Row {
    pub(crate) column_names: Arc<Vec<String>>,
    pub(crate) values: Vec<ScalarValue>,
    pub(crate) column_index_cache: Arc<HashMap<String, usize>>,
}

impl Row {
    /// Get the index of a column by name.
    ///
    /// When column names collide, the cache resolves to the last column
    /// with that name; positional access is unaffected.
    #[must_use]
    pub fn get_column_index(&self, column_name: &str) -> Option<usize> {
        if let Some(&idx) = self.column_index_cache.get(column_name) {
            return Some(idx);
        }
        self.column_names.iter().position(|col| col == column_name)
    }

    /// Get a value from the row by column name.
    #[must_use]
    pub fn get(&self, column_name: &str) -> Option<&ScalarValue> {
        self.get_column_index(column_name)
            .and_then(|idx| self.values.get(idx))
    }

    /// Get a value from the row by column index.
    #[must_use]
    pub fn get_by_index(&self, index: usize) -> Option<&ScalarValue> {
        self.values.get(index)
    }

    /// The positional values of this row.
    #[must_use]
    pub fn values(&self) -> &[ScalarValue] {
        &self.values
    }

    /// The column names shared by the result set this row belongs to.
    #[must_use]
    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }
}

// Rows compare by value; the shared column metadata is compared once at the
// result-set level.
impl PartialEq for Row {
    fn eq(&self, other: &Self) -> bool {
        self.values == other.values
    }
}

impl Serialize for Row {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.values.len()))?;
        for value in &self.values {
            seq.serialize_element(value)?;
        }
        seq.end()
    }
}
