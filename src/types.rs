use chrono::NaiveDateTime;
use serde::{Serialize, Serializer};

/// A single cell in a tabular result.
///
/// SQLite is dynamically typed, so a column can carry a different kind in
/// every row; modeling cells as a tagged union gives callers a static
/// guarantee about what a cell can contain:
/// ```rust
/// use sql_gateway::ScalarValue;
///
/// let cell = ScalarValue::Int(42);
/// assert_eq!(cell.as_int(), Some(&42));
/// assert!(cell.as_text().is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarValue {
    /// Integer value (64-bit)
    Int(i64),
    /// Floating point value (64-bit)
    Float(f64),
    /// Text/string value
    Text(String),
    /// Boolean value
    Bool(bool),
    /// Binary data
    Blob(Vec<u8>),
    /// NULL value
    Null,
}

impl ScalarValue {
    /// Check if this value is NULL
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub fn as_int(&self) -> Option<&i64> {
        if let ScalarValue::Int(value) = self {
            Some(value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        if let ScalarValue::Text(value) = self {
            Some(value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<&bool> {
        if let ScalarValue::Bool(value) = self {
            return Some(value);
        } else if let Some(i) = self.as_int() {
            if *i == 1 {
                return Some(&true);
            } else if *i == 0 {
                return Some(&false);
            }
        }
        None
    }

    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        if let ScalarValue::Float(value) = self {
            Some(*value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_blob(&self) -> Option<&[u8]> {
        if let ScalarValue::Blob(bytes) = self {
            Some(bytes)
        } else {
            None
        }
    }

    /// SQLite stores datetimes as text; parse the two common formats.
    #[must_use]
    pub fn as_timestamp(&self) -> Option<NaiveDateTime> {
        if let Some(s) = self.as_text() {
            // Try "YYYY-MM-DD HH:MM:SS"
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
                return Some(dt);
            }
            // Try "YYYY-MM-DD HH:MM:SS.SSS"
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S.%3f") {
                return Some(dt);
            }
        }
        None
    }
}

impl Serialize for ScalarValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Int(i) => serializer.serialize_i64(*i),
            Self::Float(f) => serializer.serialize_f64(*f),
            Self::Text(s) => serializer.serialize_str(s),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Blob(bytes) => serializer.serialize_bytes(bytes),
            Self::Null => serializer.serialize_unit(),
        }
    }
}
