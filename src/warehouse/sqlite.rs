//! SQLite-backed warehouse.
//!
//! Suits both the embedded deployment (a warehouse file shipped alongside
//! the binary) and tests, which run against an in-memory database seeded
//! with the star schema.

use std::path::Path;

use rusqlite::types::ValueRef;
use rusqlite::Connection;
use tracing::debug;

use crate::sql::Dialect;
use crate::table::{TableResult, Value};
use crate::warehouse::{Warehouse, WarehouseError, WarehouseResult};

/// A warehouse over a SQLite database.
pub struct SqliteWarehouse {
    conn: Connection,
}

impl SqliteWarehouse {
    /// Open a warehouse database file.
    pub fn open<P: AsRef<Path>>(path: P) -> WarehouseResult<Self> {
        let conn = Connection::open(path)?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (for testing and seeding).
    pub fn open_in_memory() -> WarehouseResult<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn })
    }

    /// Run DDL/DML against the underlying database (schema setup, seeding).
    pub fn execute_batch(&self, sql: &str) -> WarehouseResult<()> {
        self.conn.execute_batch(sql)?;
        Ok(())
    }
}

impl Warehouse for SqliteWarehouse {
    fn dialect(&self) -> Dialect {
        Dialect::Sqlite
    }

    fn fetch_sql(&self, sql: &str) -> WarehouseResult<TableResult> {
        let mut stmt = self.conn.prepare(sql)?;
        if stmt.column_count() == 0 {
            return Err(WarehouseError::NoColumns);
        }
        let names: Vec<String> = stmt
            .column_names()
            .into_iter()
            .map(String::from)
            .collect();

        let mut rows = Vec::new();
        let mut raw = stmt.query([])?;
        while let Some(row) = raw.next()? {
            let mut values = Vec::with_capacity(names.len());
            for idx in 0..names.len() {
                values.push(match row.get_ref(idx)? {
                    ValueRef::Null => Value::Null,
                    ValueRef::Integer(n) => Value::Int(n),
                    ValueRef::Real(f) => Value::Float(f),
                    ValueRef::Text(s) => Value::Text(String::from_utf8_lossy(s).into_owned()),
                    ValueRef::Blob(b) => Value::Text(String::from_utf8_lossy(b).into_owned()),
                });
            }
            rows.push(values);
        }

        debug!(rows = rows.len(), columns = names.len(), "fetched result set");
        Ok(TableResult::new(names, rows))
    }
}
