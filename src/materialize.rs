use deadpool_sqlite::rusqlite::types::Value;
use deadpool_sqlite::rusqlite::{self, Statement};

use crate::error::SqlGatewayError;
use crate::results::ResultSet;
use crate::types::ScalarValue;

/// Extract one cell from a SQLite row as a transport-safe scalar.
///
/// # Errors
///
/// Returns `SqlGatewayError::SqliteError` if the value cannot be read.
pub fn scalar_from_sqlite(
    row: &rusqlite::Row,
    idx: usize,
) -> Result<ScalarValue, SqlGatewayError> {
    let value: Value = row.get(idx).map_err(SqlGatewayError::SqliteError)?;
    Ok(match value {
        Value::Null => ScalarValue::Null,
        Value::Integer(i) => ScalarValue::Int(i),
        Value::Real(f) => ScalarValue::Float(f),
        Value::Text(s) => ScalarValue::Text(s),
        Value::Blob(b) => ScalarValue::Blob(b),
    })
}

/// Run a prepared statement and shape its cursor into a [`ResultSet`].
///
/// Column names are captured before stepping so a zero-row result still
/// carries the engine-reported column list, in engine order.
///
/// # Errors
/// Returns `SqlGatewayError::SqliteError` if stepping the cursor or reading
/// a value fails; the gateway converts this to `execution-failure` at its
/// boundary.
pub fn build_result_set(stmt: &mut Statement) -> Result<ResultSet, SqlGatewayError> {
    let column_names: Vec<String> = stmt
        .column_names()
        .iter()
        .map(|name| (*name).to_string())
        .collect();
    let column_count = column_names.len();

    let mut result_set = ResultSet::with_capacity(column_names, 10);
    let mut rows_iter = stmt.query([])?;

    while let Some(row) = rows_iter.next()? {
        let mut values = Vec::with_capacity(column_count);
        for i in 0..column_count {
            values.push(scalar_from_sqlite(row, i)?);
        }
        result_set.push_row(values);
    }

    Ok(result_set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use deadpool_sqlite::rusqlite::Connection;

    fn memory_db() -> Connection {
        let conn = Connection::open_in_memory().expect("open in-memory db");
        conn.execute_batch(
            "CREATE TABLE t (a INTEGER, b TEXT, c REAL, d BLOB);
             INSERT INTO t VALUES (1, 'one', 1.5, x'0102');
             INSERT INTO t VALUES (NULL, NULL, NULL, NULL);",
        )
        .expect("seed");
        conn
    }

    #[test]
    fn preserves_column_order_and_kinds() {
        let conn = memory_db();
        let mut stmt = conn.prepare("SELECT a, b, c, d FROM t ORDER BY a").unwrap();
        let rs = build_result_set(&mut stmt).unwrap();

        assert_eq!(rs.column_names(), ["a", "b", "c", "d"]);
        assert_eq!(rs.row_count(), 2);

        // NULL row sorts first
        assert!(rs.rows()[0].get("a").unwrap().is_null());
        let row = &rs.rows()[1];
        assert_eq!(row.get("a").unwrap().as_int(), Some(&1));
        assert_eq!(row.get("b").unwrap().as_text(), Some("one"));
        assert_eq!(row.get("c").unwrap().as_float(), Some(1.5));
        assert_eq!(row.get("d").unwrap().as_blob(), Some(&[1u8, 2u8][..]));
    }

    #[test]
    fn zero_row_cursor_reports_columns() {
        let conn = memory_db();
        let mut stmt = conn.prepare("SELECT a, b FROM t WHERE a = 999").unwrap();
        let rs = build_result_set(&mut stmt).unwrap();
        assert!(rs.is_empty());
        assert_eq!(rs.column_names(), ["a", "b"]);
    }

    #[test]
    fn expression_columns_use_engine_names() {
        let conn = memory_db();
        let mut stmt = conn.prepare("SELECT count(*) FROM t").unwrap();
        let rs = build_result_set(&mut stmt).unwrap();
        assert_eq!(rs.column_names(), ["count(*)"]);
        assert_eq!(rs.rows()[0].get_by_index(0).unwrap().as_int(), Some(&2));
    }
}
