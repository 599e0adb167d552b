//! Star-schema registry: the fact table and its dimensions.
//!
//! The warehouse vocabulary is fixed and closed. Queries are composed from
//! these descriptors, never from caller-supplied table or column strings,
//! which keeps the emitted SQL auditable.

use once_cell::sync::Lazy;
use thiserror::Error;

/// Errors raised while building a schema registry.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("Dimension '{0}' is already registered")]
    DuplicateDimension(String),
}

/// The fact table descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct FactTable {
    /// Physical table name.
    pub table: String,
    /// Alias used in composed queries.
    pub alias: String,
    /// Unique row-identifier column (never a valid grouping column).
    pub row_id: String,
    /// The numeric measure column.
    pub amount: String,
}

/// A registered dimension: a named relation between the fact table and a
/// dimension table, joined on a shared key column.
#[derive(Debug, Clone, PartialEq)]
pub struct Dimension {
    /// Display name ("Date", "Customer", ...).
    pub name: String,
    /// Physical table name.
    pub table: String,
    /// Alias used in composed queries.
    pub alias: String,
    /// Key column, present on both the fact and the dimension table.
    pub key: String,
}

/// The star schema: one fact table plus a registry of dimensions.
///
/// Dimension names are unique; iteration order is registration order and is
/// the order joins are emitted in, independent of how a caller lists them.
#[derive(Debug, Clone)]
pub struct StarSchema {
    fact: FactTable,
    dimensions: Vec<Dimension>,
}

impl StarSchema {
    pub fn new(fact: FactTable) -> Self {
        Self {
            fact,
            dimensions: Vec::new(),
        }
    }

    /// Register a dimension. Names must be unique.
    pub fn register(&mut self, dimension: Dimension) -> Result<(), SchemaError> {
        if self.dimensions.iter().any(|d| d.name == dimension.name) {
            return Err(SchemaError::DuplicateDimension(dimension.name));
        }
        self.dimensions.push(dimension);
        Ok(())
    }

    pub fn fact(&self) -> &FactTable {
        &self.fact
    }

    /// Registered dimensions, in registration order.
    pub fn dimensions(&self) -> &[Dimension] {
        &self.dimensions
    }

    /// Look up a dimension by name.
    pub fn dimension(&self, name: &str) -> Option<&Dimension> {
        self.dimensions.iter().find(|d| d.name == name)
    }

    /// The AML fraud warehouse schema (`aml_fraud_dw`).
    pub fn aml_fraud() -> StarSchema {
        let mut schema = StarSchema::new(FactTable {
            table: "transaction_fact".into(),
            alias: "t".into(),
            row_id: "transaction_id".into(),
            amount: "amount".into(),
        });

        let dims = [
            ("Date", "date_dim", "d", "date_id"),
            ("Customer", "customer_dim", "c", "customer_id"),
            ("Account", "account_dim", "a", "account_id"),
            ("Channel", "channel_dim", "ch", "channel_id"),
            ("Product", "product_dim", "p", "product_id"),
        ];
        for (name, table, alias, key) in dims {
            schema
                .register(Dimension {
                    name: name.into(),
                    table: table.into(),
                    alias: alias.into(),
                    key: key.into(),
                })
                .expect("default dimension names are unique");
        }

        schema
    }
}

/// Shared default schema for the AML fraud warehouse.
pub static AML_FRAUD: Lazy<StarSchema> = Lazy::new(StarSchema::aml_fraud);
