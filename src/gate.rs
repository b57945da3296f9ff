use std::sync::LazyLock;

use regex::Regex;

static SELECT_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*SELECT\s").expect("SELECT prefix pattern is valid"));

/// Decides whether submitted text may reach the database at all.
///
/// The gate sits behind a trait so a stricter, parser-based validator can
/// replace the prefix check without changing the gateway contract.
pub trait StatementGate: Send + Sync {
    fn is_read_only(&self, sql: &str) -> bool;
}

/// Accepts text that starts (after leading whitespace) with the
/// case-insensitive keyword `SELECT` followed by whitespace.
///
/// This is a syntactic prefix check, not a parser. It does not catch
/// statement chaining behind semicolons, comments hiding a second
/// statement, or `WITH ... SELECT` (rejected despite being read-only). The
/// real safety net is the gateway's subquery wrapping: a write statement
/// smuggled past this check into a subquery position is invalid SQL and
/// fails at parse time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectPrefixGate;

impl SelectPrefixGate {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl StatementGate for SelectPrefixGate {
    fn is_read_only(&self, sql: &str) -> bool {
        SELECT_PREFIX.is_match(sql)
    }
}
