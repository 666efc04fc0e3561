use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use arrow::array::{Array, Float64Array};
use arrow::datatypes::DataType;
use arrow::util::display::{ArrayFormatter, FormatOptions};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::Table;

/// Record keys accepted as the row label in JSON input.
const JSON_INDEX_KEYS: [&str; 2] = ["date", "index"];

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a table from a file. Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row; first column is the row label, the rest numeric
/// * `.json`    – `[{ "date": "2021-01-01", "17_oil_true": 12.5, ... }, ...]`
/// * `.parquet` – first text/date column is the row label, numeric columns are data
///
/// Empty cells and nulls become NaN.
pub fn load_table(path: &Path) -> Result<Table> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let table = match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
    .with_context(|| format!("loading {}", path.display()))?;

    log::info!(
        "Loaded {} rows x {} columns from {}",
        table.len(),
        table.width(),
        path.display()
    );
    Ok(table)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row, row label in the first column.
///
/// ```text
/// date,17_oil_true,17_oil_pred
/// 2021-01-01,12.5,13.1
/// 2021-02-01,,12.9
/// ```
fn load_csv(path: &Path) -> Result<Table> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    if headers.is_empty() {
        bail!("CSV has no header row");
    }

    let mut index = Vec::new();
    let mut columns: Vec<Vec<f64>> = vec![Vec::new(); headers.len() - 1];

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        if record.len() != headers.len() {
            bail!(
                "CSV row {row_no}: expected {} fields, found {}",
                headers.len(),
                record.len()
            );
        }

        index.push(record.get(0).unwrap_or("").trim().to_string());
        for (col, cell) in record.iter().skip(1).enumerate() {
            let value = parse_cell(cell)
                .with_context(|| format!("Row {row_no}, {}: '{cell}' is not a number", headers[col + 1]))?;
            columns[col].push(value);
        }
    }

    let mut table = Table::new(index);
    for (name, values) in headers.into_iter().skip(1).zip(columns) {
        table.insert_column(name, values)?;
    }
    Ok(table)
}

fn parse_cell(cell: &str) -> Result<f64> {
    let cell = cell.trim();
    if cell.is_empty() || cell.eq_ignore_ascii_case("nan") {
        return Ok(f64::NAN);
    }
    Ok(cell.parse::<f64>()?)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON (the default `df.reset_index().to_json(orient='records')`).
///
/// Data columns are the keys of the first record, in file order, other than
/// the row label.
fn load_json(path: &Path) -> Result<Table> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let records = root.as_array().context("Expected top-level JSON array")?;

    let Some(first) = records.first() else {
        return Ok(Table::default());
    };
    let first = first.as_object().context("Row 0 is not a JSON object")?;
    let index_key = JSON_INDEX_KEYS
        .iter()
        .copied()
        .find(|k| first.contains_key(*k))
        .with_context(|| format!("Row 0 has no row label ({})", JSON_INDEX_KEYS.join(" or ")))?;
    let names: Vec<String> = first
        .keys()
        .filter(|k| k.as_str() != index_key)
        .cloned()
        .collect();

    let mut index = Vec::with_capacity(records.len());
    let mut columns: BTreeMap<&str, Vec<f64>> = BTreeMap::new();

    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;

        index.push(match obj.get(index_key) {
            Some(JsonValue::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => bail!("Row {i}: missing '{index_key}'"),
        });

        for name in &names {
            let value = match obj.get(name) {
                None | Some(JsonValue::Null) => f64::NAN,
                Some(v) => v
                    .as_f64()
                    .with_context(|| format!("Row {i}, {name}: not a number"))?,
            };
            columns.entry(name.as_str()).or_default().push(value);
        }
    }

    let mut table = Table::new(index);
    for name in &names {
        let values = columns.remove(name.as_str()).unwrap_or_default();
        table.insert_column(name.clone(), values)?;
    }
    Ok(table)
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file of time series.
///
/// Expected schema:
/// - one Utf8 / LargeUtf8 / Date / Timestamp column – the row label
///   (the first such column is used)
/// - any number of numeric columns (ints or floats) – the data
///
/// Works with files written by both **Pandas** (`df.reset_index().to_parquet()`)
/// and **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<Table> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut index: Vec<String> = Vec::new();
    let mut names: Vec<String> = Vec::new();
    let mut columns: Vec<Vec<f64>> = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        let index_idx = schema
            .fields()
            .iter()
            .position(|f| is_label_type(f.data_type()))
            .context("Parquet file has no text or date column for the row label")?;

        // Numeric columns, in schema order
        let data_cols: Vec<usize> = schema
            .fields()
            .iter()
            .enumerate()
            .filter(|(i, f)| *i != index_idx && f.data_type().is_numeric())
            .map(|(i, _)| i)
            .collect();

        if names.is_empty() {
            for (i, f) in schema.fields().iter().enumerate() {
                if i != index_idx && !f.data_type().is_numeric() {
                    log::warn!("ignoring column '{}' of type {}", f.name(), f.data_type());
                }
            }
            names = data_cols
                .iter()
                .map(|&i| schema.field(i).name().clone())
                .collect();
            columns = vec![Vec::new(); names.len()];
        }
        if data_cols.len() != names.len() {
            bail!("record batches disagree on the number of numeric columns");
        }

        index.extend(extract_labels(batch.column(index_idx))?);
        for (slot, &col_idx) in columns.iter_mut().zip(&data_cols) {
            slot.extend(extract_f64(batch.column(col_idx))?);
        }
    }

    let mut table = Table::new(index);
    for (name, values) in names.into_iter().zip(columns) {
        table.insert_column(name, values)?;
    }
    Ok(table)
}

// -- Parquet / Arrow helpers --

fn is_label_type(dt: &DataType) -> bool {
    matches!(
        dt,
        DataType::Utf8
            | DataType::LargeUtf8
            | DataType::Date32
            | DataType::Date64
            | DataType::Timestamp(_, _)
    )
}

/// Render every row label as text (dates as ISO-8601).
fn extract_labels(col: &Arc<dyn Array>) -> Result<Vec<String>> {
    let options = FormatOptions::default();
    let formatter =
        ArrayFormatter::try_new(col.as_ref(), &options).context("formatting row labels")?;
    Ok((0..col.len())
        .map(|row| formatter.value(row).to_string())
        .collect())
}

/// Cast any numeric column to `f64`; nulls become NaN.
fn extract_f64(col: &Arc<dyn Array>) -> Result<Vec<f64>> {
    let cast = arrow::compute::cast(col.as_ref(), &DataType::Float64)
        .with_context(|| format!("casting {:?} column to Float64", col.data_type()))?;
    let values = cast
        .as_any()
        .downcast_ref::<Float64Array>()
        .context("expected Float64Array after cast")?;
    Ok(values.iter().map(|v| v.unwrap_or(f64::NAN)).collect())
}
