use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};

use anyhow::{bail, Context, Result};
use arrow::array::{Array, ArrayRef, AsArray};
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int32Type, Int64Type};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{JobRecord, SalaryDataset};

const WORK_YEAR: &str = "work_year";
const SALARY_IN_USD: &str = "salary_in_usd";
const JOB_TITLE: &str = "job_title";

// ---------------------------------------------------------------------------
// Data source
// ---------------------------------------------------------------------------

/// Where the dataset is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    File(PathBuf),
    Url(String),
}

impl DataSource {
    /// `http://` and `https://` locations are URLs, everything else a path.
    pub fn parse(location: &str) -> Self {
        let trimmed = location.trim();
        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            DataSource::Url(trimmed.to_string())
        } else {
            DataSource::File(PathBuf::from(trimmed))
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::File(path) => write!(f, "{}", path.display()),
            DataSource::Url(url) => write!(f, "{url}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load the dataset from any supported source.
pub fn load_source(source: &DataSource) -> Result<SalaryDataset> {
    match source {
        DataSource::File(path) => load_file(path),
        DataSource::Url(url) => load_url(url),
    }
}

/// Run [`load_source`] on a background thread.
///
/// The result arrives on the returned channel; `notify` is called right after
/// it has been sent so the UI can schedule a repaint.
pub fn spawn_load<F>(source: DataSource, notify: F) -> Receiver<Result<SalaryDataset>>
where
    F: FnOnce() + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || {
        log::info!("Loading dataset from {source}");
        let result = load_source(&source);
        // The receiver is gone if the app shut down mid-load.
        if tx.send(result).is_ok() {
            notify();
        }
    });
    rx
}

/// Load a dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.json`    – `[{ "work_year": "2020", "salary_in_usd": "100", "job_title": "A" }, ...]`
/// * `.csv`     – header row with `work_year`, `salary_in_usd`, `job_title`
/// * `.parquet` – columns with the same names
pub fn load_file(path: &Path) -> Result<SalaryDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "json" => load_json(path),
        "csv" => load_csv(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// HTTP loader
// ---------------------------------------------------------------------------

/// Fetch a JSON array over HTTP. Non-success statuses are errors.
fn load_url(url: &str) -> Result<SalaryDataset> {
    let response = ureq::get(url)
        .call()
        .with_context(|| format!("fetching {url}"))?;
    let body = response
        .into_string()
        .context("reading response body")?;
    parse_json_records(&body)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

fn load_json(path: &Path) -> Result<SalaryDataset> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading JSON file {}", path.display()))?;
    parse_json_records(&text)
}

/// Parse a records-oriented JSON array:
///
/// ```json
/// [
///   { "work_year": "2020", "salary_in_usd": "100", "job_title": "A" },
///   { "work_year": 2021,   "salary_in_usd": 250.5, "job_title": "B" }
/// ]
/// ```
///
/// Fields are not validated. Missing or null fields become empty text and
/// elements that are not objects are skipped.
pub fn parse_json_records(text: &str) -> Result<SalaryDataset> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;

    let rows = root.as_array().context("Expected top-level JSON array")?;

    let mut records = Vec::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        let Some(obj) = row.as_object() else {
            log::warn!("Row {i} is not a JSON object, skipping");
            continue;
        };
        records.push(JobRecord {
            work_year: json_to_text(obj.get(WORK_YEAR)),
            salary_in_usd: json_to_text(obj.get(SALARY_IN_USD)),
            job_title: json_to_text(obj.get(JOB_TITLE)),
        });
    }

    Ok(SalaryDataset::from_records(records))
}

fn json_to_text(val: Option<&JsonValue>) -> String {
    match val {
        None | Some(JsonValue::Null) => String::new(),
        Some(JsonValue::String(s)) => s.clone(),
        Some(JsonValue::Number(n)) => n.to_string(),
        Some(other) => other.to_string(),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names; other columns are ignored.
fn load_csv(path: &Path) -> Result<SalaryDataset> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers = reader.headers().context("reading CSV headers")?.clone();

    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h.trim() == name)
            .with_context(|| format!("CSV missing '{name}' column"))
    };
    let year_idx = column(WORK_YEAR)?;
    let salary_idx = column(SALARY_IN_USD)?;
    let title_idx = column(JOB_TITLE)?;

    let mut records = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        records.push(JobRecord::new(
            record.get(year_idx).unwrap_or(""),
            record.get(salary_idx).unwrap_or(""),
            record.get(title_idx).unwrap_or(""),
        ));
    }

    Ok(SalaryDataset::from_records(records))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with `work_year`, `salary_in_usd` and `job_title`
/// columns. String, integer and float physical types are accepted and
/// converted to text; nulls become empty text.
fn load_parquet(path: &Path) -> Result<SalaryDataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let year_col = parquet_column(&batch, WORK_YEAR)?;
        let salary_col = parquet_column(&batch, SALARY_IN_USD)?;
        let title_col = parquet_column(&batch, JOB_TITLE)?;

        for row in 0..batch.num_rows() {
            records.push(JobRecord {
                work_year: extract_text(year_col, row)
                    .with_context(|| format!("Row {row}: failed to read '{WORK_YEAR}'"))?,
                salary_in_usd: extract_text(salary_col, row)
                    .with_context(|| format!("Row {row}: failed to read '{SALARY_IN_USD}'"))?,
                job_title: extract_text(title_col, row)
                    .with_context(|| format!("Row {row}: failed to read '{JOB_TITLE}'"))?,
            });
        }
    }

    Ok(SalaryDataset::from_records(records))
}

// -- Parquet / Arrow helpers --

fn parquet_column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a ArrayRef> {
    let idx = batch
        .schema()
        .index_of(name)
        .map_err(|_| anyhow::anyhow!("Parquet file missing '{name}' column"))?;
    Ok(batch.column(idx))
}

/// Render a single Arrow cell as text.
fn extract_text(col: &ArrayRef, row: usize) -> Result<String> {
    if col.is_null(row) {
        return Ok(String::new());
    }
    let text = match col.data_type() {
        DataType::Utf8 => col
            .as_string_opt::<i32>()
            .context("expected Utf8")?
            .value(row)
            .to_string(),
        DataType::LargeUtf8 => col
            .as_string_opt::<i64>()
            .context("expected LargeUtf8")?
            .value(row)
            .to_string(),
        DataType::Int32 => col
            .as_primitive_opt::<Int32Type>()
            .context("expected Int32")?
            .value(row)
            .to_string(),
        DataType::Int64 => col
            .as_primitive_opt::<Int64Type>()
            .context("expected Int64")?
            .value(row)
            .to_string(),
        DataType::Float32 => col
            .as_primitive_opt::<Float32Type>()
            .context("expected Float32")?
            .value(row)
            .to_string(),
        DataType::Float64 => col
            .as_primitive_opt::<Float64Type>()
            .context("expected Float64")?
            .value(row)
            .to_string(),
        other => bail!("unsupported column type {other:?}"),
    };
    Ok(text)
}
