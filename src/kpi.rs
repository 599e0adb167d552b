//! Fixed KPI report definitions.
//!
//! Each report is a parameterless, read-only aggregate over the star schema
//! with a stable output shape. Reports are data, not strings: they build
//! [`Query`] values and render through the dialect layer like every other
//! query in the crate.

use serde::Serialize;
use thiserror::Error;

use crate::schema::StarSchema;
use crate::sql::{
    case_when, count_star, lit_int, lit_str, sum, table_col, ExprExt, OrderByExpr, Query,
    SelectExpr, TableRef,
};
use crate::table::TableResult;
use crate::warehouse::{Warehouse, WarehouseError};

/// A transaction above this amount counts as high-value.
pub const HIGH_VALUE_THRESHOLD: i64 = 10_000;

/// A transaction above this amount by a KYC-incomplete customer counts as
/// suspicious.
pub const SUSPICIOUS_AMOUNT_THRESHOLD: i64 = 5_000;

/// Row cap for the top-N reports.
pub const TOP_N: u64 = 10;

/// Errors raised while resolving or running a KPI report.
#[derive(Debug, Error)]
pub enum KpiError {
    #[error("Unknown report: '{0}'")]
    UnknownReport(String),

    #[error(transparent)]
    Warehouse(#[from] WarehouseError),
}

/// The fixed KPI report catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum KpiReport {
    /// Portfolio-wide counts and amounts, with high-value and suspicious
    /// breakdowns.
    Summary,
    /// Transaction count and amount per calendar month.
    MonthlyTrends,
    /// Transaction count and amount per customer risk level.
    RiskDistribution,
    /// Transaction count and amount per channel type.
    ChannelDistribution,
    /// The ten customers with the most transactions.
    TopCustomers,
    /// The ten largest cross-border transactions.
    ForeignTransactions,
}

impl KpiReport {
    pub const ALL: [KpiReport; 6] = [
        KpiReport::Summary,
        KpiReport::MonthlyTrends,
        KpiReport::RiskDistribution,
        KpiReport::ChannelDistribution,
        KpiReport::TopCustomers,
        KpiReport::ForeignTransactions,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            KpiReport::Summary => "summary",
            KpiReport::MonthlyTrends => "monthly-trends",
            KpiReport::RiskDistribution => "risk-distribution",
            KpiReport::ChannelDistribution => "channel-distribution",
            KpiReport::TopCustomers => "top-customers",
            KpiReport::ForeignTransactions => "foreign-transactions",
        }
    }

    /// Build this report's query against the given schema.
    pub fn query(&self, schema: &StarSchema) -> Query {
        match self {
            KpiReport::Summary => summary(schema),
            KpiReport::MonthlyTrends => monthly_trends(schema),
            KpiReport::RiskDistribution => distribution(schema, "Customer", "risk_level"),
            KpiReport::ChannelDistribution => distribution(schema, "Channel", "channel_type"),
            KpiReport::TopCustomers => top_customers(schema),
            KpiReport::ForeignTransactions => foreign_transactions(schema),
        }
    }

    /// Build and execute this report.
    pub fn fetch(
        &self,
        warehouse: &dyn Warehouse,
        schema: &StarSchema,
    ) -> Result<TableResult, KpiError> {
        Ok(warehouse.fetch(&self.query(schema))?)
    }
}

impl std::str::FromStr for KpiReport {
    type Err = KpiError;

    fn from_str(s: &str) -> Result<Self, KpiError> {
        KpiReport::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| KpiError::UnknownReport(s.to_string()))
    }
}

impl std::fmt::Display for KpiReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn fact_from(schema: &StarSchema) -> Query {
    let fact = schema.fact();
    Query::new().from(TableRef::new(&fact.table).with_alias(&fact.alias))
}

/// INNER JOIN one dimension onto the fact table.
fn join_dimension(query: Query, schema: &StarSchema, name: &str) -> Query {
    let fact = schema.fact();
    let dim = schema
        .dimension(name)
        .expect("report dimensions are registered");
    query.inner_join(
        TableRef::new(&dim.table).with_alias(&dim.alias),
        table_col(&fact.alias, &dim.key).eq(table_col(&dim.alias, &dim.key)),
    )
}

fn summary(schema: &StarSchema) -> Query {
    let fact = schema.fact();
    let customer = schema
        .dimension("Customer")
        .expect("Customer dimension is registered");
    let amount = || table_col(&fact.alias, &fact.amount);

    let high_value = amount().gt(lit_int(HIGH_VALUE_THRESHOLD));
    let suspicious = table_col(&customer.alias, "kyc_status")
        .eq(lit_str("Incomplete"))
        .and(amount().gt(lit_int(SUSPICIOUS_AMOUNT_THRESHOLD)));

    fact_from(schema)
        .left_join(
            TableRef::new(&customer.table).with_alias(&customer.alias),
            table_col(&fact.alias, &customer.key).eq(table_col(&customer.alias, &customer.key)),
        )
        .select(vec![
            SelectExpr::new(count_star()).with_alias("total_txn_count"),
            SelectExpr::new(sum(amount())).with_alias("total_txn_amount"),
            SelectExpr::new(sum(case_when(high_value.clone(), lit_int(1), lit_int(0))))
                .with_alias("high_value_count"),
            SelectExpr::new(sum(case_when(high_value, amount(), lit_int(0))))
                .with_alias("high_value_amount"),
            SelectExpr::new(sum(case_when(suspicious.clone(), lit_int(1), lit_int(0))))
                .with_alias("suspicious_count"),
            SelectExpr::new(sum(case_when(suspicious, amount(), lit_int(0))))
                .with_alias("suspicious_amount"),
        ])
}

fn monthly_trends(schema: &StarSchema) -> Query {
    let fact = schema.fact();
    let date = schema
        .dimension("Date")
        .expect("Date dimension is registered");
    let year = || table_col(&date.alias, "year");
    let month = || table_col(&date.alias, "month");

    join_dimension(fact_from(schema), schema, "Date")
        .select(vec![
            SelectExpr::new(year()),
            SelectExpr::new(month()),
            SelectExpr::new(count_star()).with_alias("txn_count"),
            SelectExpr::new(sum(table_col(&fact.alias, &fact.amount))).with_alias("total_amount"),
        ])
        .group_by(vec![year(), month()])
        .order_by(vec![OrderByExpr::asc(year()), OrderByExpr::asc(month())])
}

/// Count/amount per category, most active category first.
fn distribution(schema: &StarSchema, dimension: &str, category: &str) -> Query {
    let fact = schema.fact();
    let dim = schema
        .dimension(dimension)
        .expect("report dimensions are registered");

    join_dimension(fact_from(schema), schema, dimension)
        .select(vec![
            SelectExpr::new(table_col(&dim.alias, category)),
            SelectExpr::new(count_star()).with_alias("txn_count"),
            SelectExpr::new(sum(table_col(&fact.alias, &fact.amount))).with_alias("total_amount"),
        ])
        .group_by(vec![table_col(&dim.alias, category)])
        .order_by(vec![OrderByExpr::desc(count_star())])
}

fn top_customers(schema: &StarSchema) -> Query {
    let fact = schema.fact();
    let customer = schema
        .dimension("Customer")
        .expect("Customer dimension is registered");
    let c = |column: &str| table_col(&customer.alias, column);

    join_dimension(fact_from(schema), schema, "Customer")
        .select(vec![
            SelectExpr::new(c("name")),
            SelectExpr::new(c("risk_level")),
            SelectExpr::new(count_star()).with_alias("txn_count"),
            SelectExpr::new(sum(table_col(&fact.alias, &fact.amount))).with_alias("total_amount"),
        ])
        .group_by(vec![c("customer_id"), c("name"), c("risk_level")])
        .order_by(vec![OrderByExpr::desc(count_star())])
        .limit(TOP_N)
}

fn foreign_transactions(schema: &StarSchema) -> Query {
    let fact = schema.fact();
    let customer = schema
        .dimension("Customer")
        .expect("Customer dimension is registered");
    let t = |column: &str| table_col(&fact.alias, column);

    join_dimension(fact_from(schema), schema, "Customer")
        .select(vec![
            SelectExpr::new(t(&fact.row_id)),
            SelectExpr::new(t(&fact.amount)),
            SelectExpr::new(t("origin_country")),
            SelectExpr::new(t("destination_country")),
            SelectExpr::new(table_col(&customer.alias, "name")).with_alias("customer_name"),
        ])
        .filter(t("origin_country").ne(t("destination_country")))
        .order_by(vec![OrderByExpr::desc(t(&fact.amount))])
        .limit(TOP_N)
}
