//! Tabular result sets returned by the warehouse.
//!
//! A [`TableResult`] is an ordered set of named columns over ordered rows of
//! scalar [`Value`]s. Column types are inferred once, at construction, and
//! carried with the table - operations downstream (notably the pivot engine)
//! consult the stored classification instead of re-sniffing values.

use serde::{Serialize, Serializer};

/// A scalar cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Int(i64),
    Float(f64),
    Text(String),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Numeric view of this value, if it has one.
    ///
    /// Ints and floats are numeric; text is numeric when it parses as a
    /// number (a warehouse that returns DECIMAL columns as strings still
    /// yields a usable metric).
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Null => None,
            Value::Int(n) => Some(*n as f64),
            Value::Float(f) => Some(*f),
            Value::Text(s) => s.trim().parse::<f64>().ok(),
        }
    }

    /// Render for display/CSV: nulls are empty, floats keep full precision.
    pub fn render(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Int(n) => n.to_string(),
            Value::Float(f) => {
                if f.is_nan() || f.is_infinite() {
                    f.to_string()
                } else {
                    let mut buffer = ryu::Buffer::new();
                    buffer.format(*f).to_string()
                }
            }
            Value::Text(s) => s.clone(),
        }
    }

    /// Canonical grouping key.
    ///
    /// Distinct from `render()`: the type tag keeps `Int(1)` and `Text("1")`
    /// in separate groups, and Null gets its own key.
    pub(crate) fn group_key(&self) -> String {
        match self {
            Value::Null => "n:".into(),
            Value::Int(n) => format!("i:{}", n),
            Value::Float(f) => {
                let mut buffer = ryu::Buffer::new();
                format!("f:{}", buffer.format_finite(*f))
            }
            Value::Text(s) => format!("s:{}", s),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Int(n) => serializer.serialize_i64(*n),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::Text(s) => serializer.serialize_str(s),
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Int(b as i64),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else {
                    Value::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => Value::Text(s),
            other => Value::Text(other.to_string()),
        }
    }
}

/// Inferred column classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// Every non-null value is (or parses as) a number.
    Numeric,
    /// Anything else: categorical/text.
    Text,
}

/// A named, typed column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: ColumnType,
}

/// An in-memory result set with a typed schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableResult {
    columns: Vec<Column>,
    rows: Vec<Vec<Value>>,
    /// Name of the fact's unique row-identifier column, when known.
    /// Grouping by this column is rejected by the pivot engine.
    #[serde(skip_serializing_if = "Option::is_none")]
    row_id: Option<String>,
}

impl TableResult {
    /// Build a table from column names and rows, inferring column types once.
    ///
    /// Every row must have exactly one value per column. An all-null column
    /// classifies as Numeric (the "every non-null value is a number" rule
    /// holds vacuously), matching the aggregate contract that an all-null
    /// metric yields null rather than an error.
    pub fn new(names: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        debug_assert!(rows.iter().all(|r| r.len() == names.len()));

        let columns = names
            .into_iter()
            .enumerate()
            .map(|(idx, name)| {
                let numeric = rows
                    .iter()
                    .map(|r| &r[idx])
                    .filter(|v| !v.is_null())
                    .all(|v| v.as_f64().is_some());
                Column {
                    name,
                    ty: if numeric {
                        ColumnType::Numeric
                    } else {
                        ColumnType::Text
                    },
                }
            })
            .collect();

        Self {
            columns,
            rows,
            row_id: None,
        }
    }

    /// Build from the JSON row shape the warehouse collaborator returns.
    pub fn from_json_rows(names: Vec<String>, rows: Vec<Vec<serde_json::Value>>) -> Self {
        let rows = rows
            .into_iter()
            .map(|r| r.into_iter().map(Value::from).collect())
            .collect();
        Self::new(names, rows)
    }

    /// Mark a column as the fact's unique row identifier.
    pub fn with_row_id(mut self, column: &str) -> Self {
        self.row_id = Some(column.into());
        self
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Column names in declaration order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row_id(&self) -> Option<&str> {
        self.row_id.as_deref()
    }

    /// Position of a column by name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Inferred type of a column by name.
    pub fn column_type(&self, name: &str) -> Option<ColumnType> {
        self.columns.iter().find(|c| c.name == name).map(|c| c.ty)
    }
}
