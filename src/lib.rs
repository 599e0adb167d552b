//! # Vigil
//!
//! Warehouse analytics core for AML transaction monitoring.
//!
//! ## Architecture
//!
//! Vigil composes read-only queries over a star-schema warehouse, executes
//! them, and reduces the results in memory:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │        StarSchema (fact + dimension registry)            │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [explorer / kpi]
//! ┌─────────────────────────────────────────────────────────┐
//! │            Query (closed SQL builder AST)                │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [dialect serializer]
//! ┌─────────────────────────────────────────────────────────┐
//! │              Warehouse (MySQL / SQLite)                  │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [typed result set]
//! ┌─────────────────────────────────────────────────────────┐
//! │       TableResult → pivot engine → CSV export            │
//! └─────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod explorer;
pub mod export;
pub mod kpi;
pub mod pivot;
pub mod schema;
pub mod sql;
pub mod table;
pub mod warehouse;

// Re-export SQL submodules at crate level for ergonomic paths
pub use sql::dialect;
pub use sql::expr;
pub use sql::query;
pub use sql::token;

/// Re-exports for convenient usage.
pub mod prelude {
    pub use crate::dialect::{Dialect, SqlDialect};
    pub use crate::explorer::{compose, ROW_CAP};
    pub use crate::expr::{
        // Constructors
        case_when,
        col,
        count_star,
        func,
        lit_int,
        lit_str,
        star,
        sum,
        table_col,
        table_star,
        // Types
        BinaryOperator,
        Expr,
        ExprExt,
        Literal,
    };
    pub use crate::export::{pivot_to_csv, table_to_csv};
    pub use crate::kpi::KpiReport;
    pub use crate::pivot::{pivot, Aggregation, PivotResult, PivotSpec};
    pub use crate::query::{OrderByExpr, Query, SelectExpr, SortDir, TableRef};
    pub use crate::schema::{StarSchema, AML_FRAUD};
    pub use crate::table::{ColumnType, TableResult, Value};
    pub use crate::warehouse::{SqliteWarehouse, Warehouse};
}
