use std::fs::File;
use std::path::Path;

use arrow::array::{Array, ArrayRef, AsArray};
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int32Type, Int64Type};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::columns::{INDUSTRY, SECTOR, SECTOR_SEPARATOR, SEGMENT};
use super::model::{Record, Table, Value};
use crate::error::{DashboardError, Result};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a startup table from a file and derive `Industry` / `Segment` from `Sector`.
/// Dispatch by extension.
///
/// Supported formats:
/// * `.json`    – `[{ "Company": "...", "Sector": "...", ... }, ...]`
/// * `.parquet` – one column per field
/// * `.tsv`     – tab-delimited text with a header row
/// * anything else is read as comma-delimited text with a header row
pub fn load_file(path: &Path) -> Result<Table> {
    if !path.exists() {
        return Err(DashboardError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let table = match ext.as_str() {
        "json" => load_json(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        "tsv" => load_delimited(path, b'\t')?,
        _ => load_delimited(path, b',')?,
    };

    let table = derive_sector_fields(table)?;
    log::info!(
        "Loaded {} rows with {} columns from {}",
        table.len(),
        table.columns.len(),
        path.display()
    );
    Ok(table)
}

// ---------------------------------------------------------------------------
// Sector split
// ---------------------------------------------------------------------------

/// Split a sector label into `(industry, segment)` on the first separator.
/// `"FinTech"` has no segment; `"A - B - C"` keeps `"B - C"` as the segment.
pub fn split_sector(sector: &str) -> (&str, Option<&str>) {
    match sector.split_once(SECTOR_SEPARATOR) {
        Some((industry, segment)) => (industry, Some(segment)),
        None => (sector, None),
    }
}

/// Append `Industry` and `Segment` columns derived from `Sector`.
/// Columns of the same name already in the source are replaced.
fn derive_sector_fields(table: Table) -> Result<Table> {
    let sector_idx = table.column_index(SECTOR)?;

    let keep: Vec<usize> = (0..table.columns.len())
        .filter(|&i| table.columns[i] != INDUSTRY && table.columns[i] != SEGMENT)
        .collect();

    let mut columns: Vec<String> = keep.iter().map(|&i| table.columns[i].clone()).collect();
    columns.push(INDUSTRY.to_string());
    columns.push(SEGMENT.to_string());

    let rows = table
        .rows
        .iter()
        .map(|rec| {
            let (industry, segment) = match rec.get(sector_idx) {
                Value::Null => (Value::Null, Value::Null),
                Value::String(s) => {
                    let (ind, seg) = split_sector(s);
                    (Value::from(ind), seg.map(Value::from).unwrap_or(Value::Null))
                }
                other => (Value::String(other.to_string()), Value::Null),
            };
            let mut values: Vec<Value> = keep.iter().map(|&i| rec.get(i).clone()).collect();
            values.push(industry);
            values.push(segment);
            Record::new(values)
        })
        .collect();

    Ok(Table::new(columns, rows))
}

// ---------------------------------------------------------------------------
// Delimited text loader
// ---------------------------------------------------------------------------

/// Header row with column names, one record per line.
/// Column types are inferred from the whole column, not per cell.
fn load_delimited(path: &Path, delimiter: u8) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| DashboardError::malformed(path, e))?;

    let columns: Vec<String> = reader
        .headers()
        .map_err(|e| DashboardError::malformed(path, format!("reading header: {e}")))?
        .iter()
        .map(|h| h.to_string())
        .collect();
    if columns.iter().all(|c| c.is_empty()) {
        return Err(DashboardError::malformed(path, "missing header row"));
    }

    let mut raw: Vec<csv::StringRecord> = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record =
            result.map_err(|e| DashboardError::malformed(path, format!("row {row_no}: {e}")))?;
        raw.push(record);
    }

    let kinds: Vec<CellKind> = (0..columns.len())
        .map(|col| {
            let cells: Vec<&str> = raw.iter().map(|r| r.get(col).unwrap_or("")).collect();
            infer_kind(&cells)
        })
        .collect();

    let rows = raw
        .iter()
        .map(|r| {
            Record::new(
                kinds
                    .iter()
                    .enumerate()
                    .map(|(col, kind)| kind.parse(r.get(col).unwrap_or("")))
                    .collect(),
            )
        })
        .collect();

    Ok(Table::new(columns, rows))
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum CellKind {
    Integer,
    Float,
    Bool,
    Text,
}

/// Narrowest type every non-empty cell of a column fits.
fn infer_kind(cells: &[&str]) -> CellKind {
    let all = |fits: fn(&str) -> bool| cells.iter().filter(|c| !c.is_empty()).all(|c| fits(c));

    if all(|c| c.parse::<i64>().is_ok()) {
        CellKind::Integer
    } else if all(|c| c.parse::<f64>().is_ok()) {
        CellKind::Float
    } else if all(|c| c == "true" || c == "false") {
        CellKind::Bool
    } else {
        CellKind::Text
    }
}

impl CellKind {
    fn parse(self, s: &str) -> Value {
        if s.is_empty() {
            return Value::Null;
        }
        match self {
            CellKind::Integer => s.parse().map(Value::Integer).unwrap_or(Value::Null),
            CellKind::Float => s.parse().map(Value::Float).unwrap_or(Value::Null),
            CellKind::Bool => Value::Bool(s == "true"),
            CellKind::Text => Value::String(s.to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "Rank": 1, "Company": "Acme", "Sector": "FinTech - Payments", ... },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<Table> {
    let text = std::fs::read_to_string(path).map_err(|e| DashboardError::malformed(path, e))?;
    let root: JsonValue =
        serde_json::from_str(&text).map_err(|e| DashboardError::malformed(path, e))?;

    let records = root
        .as_array()
        .ok_or_else(|| DashboardError::malformed(path, "expected top-level JSON array"))?;

    let mut columns: Vec<String> = Vec::new();
    let mut objects = Vec::with_capacity(records.len());
    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .ok_or_else(|| DashboardError::malformed(path, format!("row {i} is not a JSON object")))?;
        for key in obj.keys() {
            if !columns.contains(key) {
                columns.push(key.clone());
            }
        }
        objects.push(obj);
    }

    let rows = objects
        .iter()
        .map(|obj| {
            Record::new(
                columns
                    .iter()
                    .map(|c| obj.get(c).map(json_to_value).unwrap_or(Value::Null))
                    .collect(),
            )
        })
        .collect();

    Ok(Table::new(columns, rows))
}

fn json_to_value(val: &JsonValue) -> Value {
    match val {
        JsonValue::String(s) => Value::String(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Integer(i)
            } else if let Some(f) = n.as_f64() {
                Value::Float(f)
            } else {
                Value::String(n.to_string())
            }
        }
        JsonValue::Bool(b) => Value::Bool(*b),
        JsonValue::Null => Value::Null,
        other => Value::String(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file, one table column per schema field.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<Table> {
    let file = File::open(path).map_err(|e| DashboardError::malformed(path, e))?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .map_err(|e| DashboardError::malformed(path, format!("reading parquet metadata: {e}")))?;

    let columns: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();

    let reader = builder
        .build()
        .map_err(|e| DashboardError::malformed(path, format!("building parquet reader: {e}")))?;

    let mut rows = Vec::new();
    for batch_result in reader {
        let batch = batch_result
            .map_err(|e| DashboardError::malformed(path, format!("reading record batch: {e}")))?;
        for row in 0..batch.num_rows() {
            let values = batch
                .columns()
                .iter()
                .map(|col| arrow_cell(col, row))
                .collect();
            rows.push(Record::new(values));
        }
    }

    Ok(Table::new(columns, rows))
}

/// Extract a single value from an Arrow column at a given row.
fn arrow_cell(col: &ArrayRef, row: usize) -> Value {
    if col.is_null(row) {
        return Value::Null;
    }
    match col.data_type() {
        DataType::Utf8 => Value::String(col.as_string::<i32>().value(row).to_string()),
        DataType::LargeUtf8 => Value::String(col.as_string::<i64>().value(row).to_string()),
        DataType::Int32 => Value::Integer(col.as_primitive::<Int32Type>().value(row) as i64),
        DataType::Int64 => Value::Integer(col.as_primitive::<Int64Type>().value(row)),
        DataType::Float32 => Value::Float(col.as_primitive::<Float32Type>().value(row) as f64),
        DataType::Float64 => Value::Float(col.as_primitive::<Float64Type>().value(row)),
        DataType::Boolean => Value::Bool(col.as_boolean().value(row)),
        other => arrow::util::display::array_value_to_string(col, row)
            .map(Value::String)
            .unwrap_or_else(|_| Value::String(format!("{other:?}"))),
    }
}
