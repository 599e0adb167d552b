//! SQLite SQL dialect.
//!
//! SQLite uses ANSI double-quote identifier quoting; the remaining
//! rendering rules are the shared defaults.

use super::SqlDialect;

/// SQLite SQL dialect.
#[derive(Debug, Clone, Copy)]
pub struct Sqlite;

impl SqlDialect for Sqlite {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn quote_identifier(&self, ident: &str) -> String {
        format!("\"{}\"", ident.replace('"', "\"\""))
    }

    // Uses default quote_string and emit_limit
}
