//! CSV export.
//!
//! Renders tables and pivot results as RFC 4180 CSV: header row first,
//! fields quoted only when they contain a comma, quote, or line break,
//! embedded quotes doubled. Nulls render as empty fields and floats keep
//! full round-trip precision, so an export re-imported into another tool
//! aggregates to the same numbers.

use crate::pivot::PivotResult;
use crate::table::{TableResult, Value};

/// Quote a field if the delimiter, a quote, or a line break appears in it.
fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn write_row(out: &mut String, cells: impl Iterator<Item = String>) {
    let mut first = true;
    for cell in cells {
        if !first {
            out.push(',');
        }
        out.push_str(&escape_field(&cell));
        first = false;
    }
    out.push('\n');
}

/// Serialize a table as CSV, header included.
pub fn table_to_csv(table: &TableResult) -> String {
    let mut out = String::new();
    write_row(&mut out, table.column_names().iter().map(|n| n.to_string()));
    for row in table.rows() {
        write_row(&mut out, row.iter().map(Value::render));
    }
    out
}

/// Serialize a pivot result as two-column CSV.
pub fn pivot_to_csv(pivot: &PivotResult) -> String {
    table_to_csv(&pivot.to_table())
}
