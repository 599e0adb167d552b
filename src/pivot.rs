//! Pivot/aggregation engine.
//!
//! A pure, stateless transform: given a [`TableResult`], a grouping column,
//! a numeric metric column, and an aggregation kind, produce one row per
//! distinct group value with the aggregate applied within the group.
//!
//! Contract notes:
//! - groups appear in first-appearance order of the input;
//! - a null grouping value forms its own group (it is not dropped);
//! - `count` counts non-null metric values, not rows, consistent with how
//!   `sum` and `mean` skip nulls;
//! - a partition whose metric values are all null aggregates to null
//!   (`count` yields 0).
//!
//! Validation happens before any computation; a failed pivot returns no
//! partial result.

use std::collections::HashMap;

use serde::Serialize;
use thiserror::Error;

use crate::table::{ColumnType, TableResult, Value};

/// Supported aggregation kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Aggregation {
    Sum,
    Mean,
    /// Count of non-null metric values in the partition.
    Count,
    Min,
    Max,
}

impl Aggregation {
    pub const ALL: [Aggregation; 5] = [
        Aggregation::Sum,
        Aggregation::Mean,
        Aggregation::Count,
        Aggregation::Min,
        Aggregation::Max,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Aggregation::Sum => "sum",
            Aggregation::Mean => "mean",
            Aggregation::Count => "count",
            Aggregation::Min => "min",
            Aggregation::Max => "max",
        }
    }
}

impl std::str::FromStr for Aggregation {
    type Err = PivotError;

    fn from_str(s: &str) -> Result<Self, PivotError> {
        match s {
            "sum" => Ok(Aggregation::Sum),
            "mean" => Ok(Aggregation::Mean),
            "count" => Ok(Aggregation::Count),
            "min" => Ok(Aggregation::Min),
            "max" => Ok(Aggregation::Max),
            other => Err(PivotError::UnsupportedAggregation(other.to_string())),
        }
    }
}

impl std::fmt::Display for Aggregation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What to group, what to measure, and how to reduce it.
#[derive(Debug, Clone, PartialEq)]
pub struct PivotSpec {
    pub group_column: String,
    pub metric_column: String,
    pub aggregation: Aggregation,
}

/// Errors raised by pivot validation.
///
/// All of these indicate a malformed request detected before computation;
/// none are transient and none are retried.
#[derive(Debug, Error, PartialEq)]
pub enum PivotError {
    /// The grouping column does not exist, or is the fact's unique row
    /// identifier (grouping by a unique key carries no aggregate meaning).
    #[error("Invalid grouping column: '{0}'")]
    InvalidGroupColumn(String),

    /// The metric column does not exist or is not classified numeric.
    #[error("Metric column '{0}' is not numeric")]
    NonNumericMetric(String),

    /// The aggregation kind is not one of sum, mean, count, min, max.
    #[error("Unsupported aggregation: '{0}'")]
    UnsupportedAggregation(String),
}

/// One output row: a distinct group value and its aggregate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PivotRow {
    pub group: Value,
    pub value: Value,
}

/// The result of a pivot, in first-appearance group order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PivotResult {
    /// Name of the grouping column.
    pub group_column: String,
    /// Name of the aggregate column: `<aggregation>_<metric>`.
    pub value_column: String,
    pub rows: Vec<PivotRow>,
}

impl PivotResult {
    /// Convert to a two-column [`TableResult`].
    pub fn to_table(&self) -> TableResult {
        TableResult::new(
            vec![self.group_column.clone(), self.value_column.clone()],
            self.rows
                .iter()
                .map(|r| vec![r.group.clone(), r.value.clone()])
                .collect(),
        )
    }
}

/// Reduce a table to a pivot result.
///
/// Single O(n) pass: rows are partitioned by the canonical key of their
/// grouping value (first-seen slot order) while the aggregate accumulates,
/// then each accumulator is finalized.
pub fn pivot(table: &TableResult, spec: &PivotSpec) -> Result<PivotResult, PivotError> {
    let group_idx = table
        .column_index(&spec.group_column)
        .ok_or_else(|| PivotError::InvalidGroupColumn(spec.group_column.clone()))?;
    if table.row_id() == Some(spec.group_column.as_str()) {
        return Err(PivotError::InvalidGroupColumn(spec.group_column.clone()));
    }

    let metric_idx = table
        .column_index(&spec.metric_column)
        .ok_or_else(|| PivotError::NonNumericMetric(spec.metric_column.clone()))?;
    if table.column_type(&spec.metric_column) != Some(ColumnType::Numeric) {
        return Err(PivotError::NonNumericMetric(spec.metric_column.clone()));
    }

    let mut slots: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<(Value, Accumulator)> = Vec::new();

    for row in table.rows() {
        let group_value = &row[group_idx];
        let slot = *slots.entry(group_value.group_key()).or_insert_with(|| {
            groups.push((group_value.clone(), Accumulator::new(spec.aggregation)));
            groups.len() - 1
        });
        groups[slot].1.push(&row[metric_idx]);
    }

    let rows = groups
        .into_iter()
        .map(|(group, acc)| PivotRow {
            group,
            value: acc.finish(),
        })
        .collect();

    Ok(PivotResult {
        group_column: spec.group_column.clone(),
        value_column: format!("{}_{}", spec.aggregation, spec.metric_column),
        rows,
    })
}

// =============================================================================
// Accumulators
// =============================================================================

/// Running sum that stays integral until a float (or overflow) appears.
#[derive(Debug, Clone, Copy)]
enum SumState {
    Empty,
    Int(i64),
    Float(f64),
}

impl SumState {
    fn add(&mut self, value: &Value) {
        match (*self, value) {
            (SumState::Empty, Value::Int(n)) => *self = SumState::Int(*n),
            (SumState::Int(acc), Value::Int(n)) => {
                *self = match acc.checked_add(*n) {
                    Some(total) => SumState::Int(total),
                    None => SumState::Float(acc as f64 + *n as f64),
                };
            }
            (SumState::Empty, v) => {
                if let Some(f) = v.as_f64() {
                    *self = SumState::Float(f);
                }
            }
            (SumState::Int(acc), v) => {
                if let Some(f) = v.as_f64() {
                    *self = SumState::Float(acc as f64 + f);
                }
            }
            (SumState::Float(acc), v) => {
                if let Some(f) = v.as_f64() {
                    *self = SumState::Float(acc + f);
                }
            }
        }
    }

    fn finish(self) -> Value {
        match self {
            SumState::Empty => Value::Null,
            SumState::Int(n) => Value::Int(n),
            SumState::Float(f) => Value::Float(f),
        }
    }
}

#[derive(Debug, Clone)]
enum Accumulator {
    Sum(SumState),
    Mean { sum: f64, count: u64 },
    Count(u64),
    Min(Option<(f64, Value)>),
    Max(Option<(f64, Value)>),
}

impl Accumulator {
    fn new(aggregation: Aggregation) -> Self {
        match aggregation {
            Aggregation::Sum => Accumulator::Sum(SumState::Empty),
            Aggregation::Mean => Accumulator::Mean { sum: 0.0, count: 0 },
            Aggregation::Count => Accumulator::Count(0),
            Aggregation::Min => Accumulator::Min(None),
            Aggregation::Max => Accumulator::Max(None),
        }
    }

    /// Fold one metric value in. Nulls are skipped by every kind.
    fn push(&mut self, value: &Value) {
        if value.is_null() {
            return;
        }
        match self {
            Accumulator::Sum(state) => state.add(value),
            Accumulator::Mean { sum, count } => {
                if let Some(f) = value.as_f64() {
                    *sum += f;
                    *count += 1;
                }
            }
            Accumulator::Count(n) => *n += 1,
            Accumulator::Min(best) => {
                if let Some(f) = value.as_f64() {
                    if best.as_ref().map_or(true, |(b, _)| f < *b) {
                        *best = Some((f, value.clone()));
                    }
                }
            }
            Accumulator::Max(best) => {
                if let Some(f) = value.as_f64() {
                    if best.as_ref().map_or(true, |(b, _)| f > *b) {
                        *best = Some((f, value.clone()));
                    }
                }
            }
        }
    }

    fn finish(self) -> Value {
        match self {
            Accumulator::Sum(state) => state.finish(),
            Accumulator::Mean { sum, count } => {
                if count == 0 {
                    Value::Null
                } else {
                    Value::Float(sum / count as f64)
                }
            }
            Accumulator::Count(n) => Value::Int(n as i64),
            Accumulator::Min(best) | Accumulator::Max(best) => {
                best.map_or(Value::Null, |(_, v)| v)
            }
        }
    }
}
