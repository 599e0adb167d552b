//! Dimension join composer for the ad-hoc explorer.
//!
//! Translates a user-selected set of dimension names into a single read
//! query: the fact's row identifier and amount, plus every column of each
//! selected dimension table, LEFT JOINed on the registered keys and capped
//! at [`ROW_CAP`] rows.

use thiserror::Error;
use tracing::debug;

use crate::schema::StarSchema;
use crate::sql::{table_col, table_star, ExprExt, Query, SelectExpr, TableRef};
use crate::table::TableResult;
use crate::warehouse::{Warehouse, WarehouseError};

/// Maximum number of fact rows an explorer query may return.
///
/// Bounds the memory and latency of the in-memory pivot that follows.
pub const ROW_CAP: u64 = 5000;

/// Errors raised while composing or running an explorer query.
#[derive(Debug, Error)]
pub enum ExplorerError {
    /// The requested dimension is not in the registered set.
    #[error("Unknown dimension: '{0}'")]
    UnknownDimension(String),

    /// The explorer requires at least one dimension.
    #[error("Select at least one dimension to explore")]
    NoDimensions,

    /// The warehouse collaborator failed.
    #[error(transparent)]
    Warehouse(#[from] WarehouseError),
}

/// Compose the explorer query for a set of dimension names.
///
/// Joins are emitted in schema registration order regardless of the order
/// the caller lists the names, so a fixed dimension set always composes a
/// byte-identical query. Duplicate names are tolerated and joined once.
pub fn compose<S: AsRef<str>>(schema: &StarSchema, dims: &[S]) -> Result<Query, ExplorerError> {
    if dims.is_empty() {
        return Err(ExplorerError::NoDimensions);
    }
    for name in dims {
        if schema.dimension(name.as_ref()).is_none() {
            return Err(ExplorerError::UnknownDimension(name.as_ref().to_string()));
        }
    }

    let fact = schema.fact();
    let mut query = Query::new()
        .select(vec![
            SelectExpr::new(table_col(&fact.alias, &fact.row_id)),
            SelectExpr::new(table_col(&fact.alias, &fact.amount)),
        ])
        .from(TableRef::new(&fact.table).with_alias(&fact.alias));

    // Registry order, not caller order.
    for dim in schema.dimensions() {
        if !dims.iter().any(|n| n.as_ref() == dim.name) {
            continue;
        }
        query = query
            .select_item(SelectExpr::new(table_star(&dim.alias)))
            .left_join(
                TableRef::new(&dim.table).with_alias(&dim.alias),
                table_col(&fact.alias, &dim.key).eq(table_col(&dim.alias, &dim.key)),
            );
    }

    let query = query.limit(ROW_CAP);
    debug!(dimensions = dims.len(), "composed explorer query");
    Ok(query)
}

/// Compose, execute, and tag the result with the fact's row-id column.
pub fn fetch<S: AsRef<str>>(
    warehouse: &dyn Warehouse,
    schema: &StarSchema,
    dims: &[S],
) -> Result<TableResult, ExplorerError> {
    let query = compose(schema, dims)?;
    let table = warehouse.fetch(&query)?;
    Ok(table.with_row_id(&schema.fact().row_id))
}
