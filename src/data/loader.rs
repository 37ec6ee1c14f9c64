use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{
    Array, ArrayRef, AsArray, Float32Array, Float64Array, Int32Array, Int64Array,
};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use super::model::{Column, EmployeeDataset, EmployeeRecord, REQUIRED_COLUMNS};
use crate::error::DashboardError;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the employee table and derive `PromotionRiskScore` for every row.
///
/// Supported formats, dispatched by extension:
/// * `.csv`     – header row with the required column names (primary format)
/// * `.json`    – `[{ "Department": "...", ... }, ...]`
/// * `.parquet` – one column per field
///
/// Any failure is reported as [`DashboardError::DataUnavailable`].
pub fn load(path: &Path) -> Result<EmployeeDataset, DashboardError> {
    match read_records(path) {
        Ok(records) => {
            let dataset = EmployeeDataset::from_records(records);
            if dataset.is_empty() {
                log::warn!("{} contains no employees", path.display());
            }
            log::info!(
                "Loaded {} employees from {} ({} departments)",
                dataset.len(),
                path.display(),
                dataset.departments.len()
            );
            Ok(dataset)
        }
        Err(e) => {
            log::error!("Failed to load {}: {e:#}", path.display());
            Err(DashboardError::DataUnavailable {
                path: path.to_path_buf(),
                reason: format!("{e:#}"),
            })
        }
    }
}

fn read_records(path: &Path) -> Result<Vec<EmployeeRecord>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let raw = match ext.as_str() {
        "csv" => load_csv(path)?,
        "json" => load_json(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => bail!("Unsupported file extension: .{other}"),
    };

    // Single pass: validate the score inputs and derive the score column.
    raw.into_iter()
        .enumerate()
        .map(|(row, rec)| {
            let bad = rec.non_finite_inputs();
            if !bad.is_empty() {
                bail!("Row {row}: non-finite value in {}", join_columns(&bad));
            }
            Ok(rec.with_score())
        })
        .collect()
}

fn join_columns(columns: &[Column]) -> String {
    columns
        .iter()
        .map(|c| c.name())
        .collect::<Vec<_>>()
        .join(", ")
}

fn ensure_required(present: &[&str]) -> Result<()> {
    let missing: Vec<Column> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|c| !present.contains(&c.name()))
        .collect();
    if !missing.is_empty() {
        bail!("missing required column(s): {}", join_columns(&missing));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, one employee per line.
/// Extra columns (including a stale `PromotionRiskScore`) are ignored.
fn load_csv(path: &Path) -> Result<Vec<EmployeeRecord>> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers = reader.headers().context("reading CSV headers")?.clone();
    ensure_required(&headers.iter().collect::<Vec<_>>())?;

    reader
        .deserialize::<EmployeeRecord>()
        .enumerate()
        .map(|(row_no, result)| result.with_context(|| format!("CSV row {row_no}")))
        .collect()
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`).
fn load_json(path: &Path) -> Result<Vec<EmployeeRecord>> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: serde_json::Value = serde_json::from_str(&text).context("parsing JSON")?;

    let rows = root.as_array().context("Expected top-level JSON array")?;

    rows.iter()
        .enumerate()
        .map(|(i, row)| {
            let obj = row
                .as_object()
                .with_context(|| format!("Row {i} is not a JSON object"))?;
            ensure_required(&obj.keys().map(String::as_str).collect::<Vec<_>>())
                .with_context(|| format!("Row {i}"))?;
            serde_json::from_value(row.clone()).with_context(|| format!("Row {i}"))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one column per field.
///
/// Integer and float widths are widened. Text columns may be plain, large,
/// view or dictionary encoded (pandas `category`, Polars `Categorical`).
fn load_parquet(path: &Path) -> Result<Vec<EmployeeRecord>> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    {
        let schema = builder.schema();
        let names: Vec<&str> = schema.fields().iter().map(|f| f.name().as_str()).collect();
        ensure_required(&names)?;
    }
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();
    for batch_result in reader {
        let batch = decode_text_columns(batch_result.context("reading parquet record batch")?)?;
        let offset = records.len();
        for row in 0..batch.num_rows() {
            let rec = record_from_batch(&batch, row)
                .with_context(|| format!("Row {}", offset + row))?;
            records.push(rec);
        }
    }
    Ok(records)
}

fn is_encoded_text(dt: &DataType) -> bool {
    match dt {
        DataType::Utf8View => true,
        DataType::Dictionary(_, value) => matches!(
            value.as_ref(),
            DataType::Utf8 | DataType::LargeUtf8 | DataType::Utf8View
        ),
        _ => false,
    }
}

/// Cast view and dictionary encoded text columns to plain `Utf8`.
fn decode_text_columns(batch: RecordBatch) -> Result<RecordBatch> {
    let schema = batch.schema();
    if !schema.fields().iter().any(|f| is_encoded_text(f.data_type())) {
        return Ok(batch);
    }

    let mut fields = Vec::with_capacity(batch.num_columns());
    let mut columns = Vec::with_capacity(batch.num_columns());
    for (field, col) in schema.fields().iter().zip(batch.columns()) {
        if is_encoded_text(field.data_type()) {
            let decoded = cast(col, &DataType::Utf8)
                .with_context(|| format!("decoding '{}' as text", field.name()))?;
            fields.push(Field::new(field.name(), DataType::Utf8, field.is_nullable()));
            columns.push(decoded);
        } else {
            fields.push(field.as_ref().clone());
            columns.push(col.clone());
        }
    }
    RecordBatch::try_new(Arc::new(Schema::new(fields)), columns)
        .context("rebuilding parquet record batch")
}

fn record_from_batch(batch: &RecordBatch, row: usize) -> Result<EmployeeRecord> {
    Ok(EmployeeRecord {
        department: string_at(batch, row, Column::Department)?,
        job_role: string_at(batch, row, Column::JobRole)?,
        years_at_company: int_at(batch, row, Column::YearsAtCompany)?,
        years_with_curr_manager: int_at(batch, row, Column::YearsWithCurrManager)?,
        promotion_gap_ratio: float_at(batch, row, Column::PromotionGapRatio)?,
        role_stagnation_index: float_at(batch, row, Column::RoleStagnationIndex)?,
        training_intensity_score: float_at(batch, row, Column::TrainingIntensityScore)?,
        promotion_gap_risk: string_at(batch, row, Column::PromotionGapRisk)?,
        career_cluster_label: string_at(batch, row, Column::CareerClusterLabel)?,
        retention_opportunity_index: int_at(batch, row, Column::RetentionOpportunityIndex)?,
        promotion_risk_score: 0.0,
    })
}

// -- Arrow cell helpers --

/// Locate a column by name and reject nulls at `row`.
fn cell(batch: &RecordBatch, row: usize, c: Column) -> Result<&ArrayRef> {
    let idx = batch
        .schema()
        .index_of(c.name())
        .map_err(|_| anyhow::anyhow!("Parquet file missing '{c}' column"))?;
    let col = batch.column(idx);
    if col.is_null(row) {
        bail!("null value in '{c}'");
    }
    Ok(col)
}

fn string_at(batch: &RecordBatch, row: usize, c: Column) -> Result<String> {
    let col = cell(batch, row, c)?;
    match col.data_type() {
        DataType::Utf8 => Ok(col.as_string::<i32>().value(row).to_string()),
        DataType::LargeUtf8 => Ok(col.as_string::<i64>().value(row).to_string()),
        other => bail!("'{c}' has type {other:?}, expected a string column"),
    }
}

fn int_at(batch: &RecordBatch, row: usize, c: Column) -> Result<i64> {
    let col = cell(batch, row, c)?;
    match col.data_type() {
        DataType::Int32 => {
            let arr = col
                .as_any()
                .downcast_ref::<Int32Array>()
                .context("expected Int32Array")?;
            Ok(arr.value(row) as i64)
        }
        DataType::Int64 => {
            let arr = col
                .as_any()
                .downcast_ref::<Int64Array>()
                .context("expected Int64Array")?;
            Ok(arr.value(row))
        }
        other => bail!("'{c}' has type {other:?}, expected an integer column"),
    }
}

fn float_at(batch: &RecordBatch, row: usize, c: Column) -> Result<f64> {
    let col = cell(batch, row, c)?;
    match col.data_type() {
        DataType::Float32 => {
            let arr = col
                .as_any()
                .downcast_ref::<Float32Array>()
                .context("expected Float32Array")?;
            Ok(arr.value(row) as f64)
        }
        DataType::Float64 => {
            let arr = col
                .as_any()
                .downcast_ref::<Float64Array>()
                .context("expected Float64Array")?;
            Ok(arr.value(row))
        }
        DataType::Int32 | DataType::Int64 => int_at(batch, row, c).map(|i| i as f64),
        other => bail!("'{c}' has type {other:?}, expected a float column"),
    }
}
