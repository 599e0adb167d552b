//! SQL generation module.
//!
//! A type-safe builder for the read-only queries this crate issues against
//! the warehouse. It includes:
//!
//! - [`query`] - SELECT query builder
//! - [`expr`] - Expression AST and builder DSL
//! - [`token`] - Token types for SQL generation
//! - [`dialect`] - SQL dialect implementations (MySQL, SQLite)
//!
//! The grammar is closed: there is no raw-SQL escape hatch, so the query
//! surface stays auditable and injection-safe.

pub mod dialect;
pub mod expr;
pub mod query;
pub mod token;

// Re-export commonly used types at the sql module level
pub use dialect::{Dialect, SqlDialect};
pub use expr::{
    case_when, col, count_star, func, lit_int, lit_str, star, sum, table_col, table_star,
    BinaryOperator, Expr, ExprExt, Literal,
};
pub use query::{Join, JoinType, OrderByExpr, Query, SelectExpr, SortDir, TableRef};
pub use token::{Token, TokenStream};
