use crate::error::SqlGatewayError;
use crate::gateway::QueryGateway;
use crate::results::ResultSet;
use crate::types::ScalarValue;

/// Default cap for a single page of table rows.
pub const DEFAULT_TABLE_PAGE_LIMIT: usize = 500;

// Generous bound for schema listings; a database with more tables than this
// is outside this crate's use case.
const TABLE_LIST_LIMIT: usize = 10_000;

impl QueryGateway {
    /// List the user tables in the backing database, sorted by name.
    ///
    /// Runs through the normal gated path, so it carries the same bounding
    /// and error conversion as any other read.
    ///
    /// # Errors
    /// Same as [`QueryGateway::execute`].
    pub async fn list_tables(&self) -> Result<Vec<String>, SqlGatewayError> {
        let result = self
            .execute(
                "SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name",
                TABLE_LIST_LIMIT,
            )
            .await?;
        Ok(result
            .rows()
            .iter()
            .filter_map(|row| row.get("name").and_then(ScalarValue::as_text))
            .map(str::to_string)
            .collect())
    }

    /// Fetch a bounded page of a named table's rows.
    ///
    /// The synthesized statement quotes the identifier, so a hostile table
    /// name cannot break out of the `FROM` clause; a name that matches no
    /// table surfaces as the usual `execution-failure`.
    ///
    /// # Errors
    /// Same as [`QueryGateway::execute`].
    pub async fn table_page(
        &self,
        table: &str,
        row_limit: usize,
    ) -> Result<ResultSet, SqlGatewayError> {
        let query = format!("SELECT * FROM {}", quote_identifier(table));
        self.execute(&query, row_limit).await
    }
}

fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quotes_plain_identifiers() {
        assert_eq!(quote_identifier("customers"), "\"customers\"");
    }

    #[test]
    fn escapes_embedded_quotes() {
        assert_eq!(quote_identifier("we\"ird"), "\"we\"\"ird\"");
    }

    #[test]
    fn hostile_names_stay_inside_the_quotes() {
        assert_eq!(
            quote_identifier("t; DROP TABLE t"),
            "\"t; DROP TABLE t\""
        );
    }
}
