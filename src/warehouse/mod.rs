//! Warehouse access.
//!
//! A [`Warehouse`] executes composed queries and returns typed
//! [`TableResult`]s. The trait is the seam between query composition and
//! query execution: the composer, KPI definitions, and pivot engine never
//! see a connection handle, which keeps them testable against stub
//! warehouses.

mod sqlite;

pub use sqlite::SqliteWarehouse;

use thiserror::Error;

use crate::sql::{Dialect, Query};
use crate::table::TableResult;

/// Errors that can occur while executing a warehouse query.
#[derive(Debug, Error)]
pub enum WarehouseError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Query returned no columns")]
    NoColumns,
}

pub type WarehouseResult<T> = Result<T, WarehouseError>;

/// A read-only analytical store.
pub trait Warehouse {
    /// The dialect queries are rendered in before execution.
    fn dialect(&self) -> Dialect;

    /// Render and execute a composed query.
    fn fetch(&self, query: &Query) -> WarehouseResult<TableResult> {
        self.fetch_sql(&query.to_sql(self.dialect()))
    }

    /// Execute already-rendered SQL.
    fn fetch_sql(&self, sql: &str) -> WarehouseResult<TableResult>;
}
