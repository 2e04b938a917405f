//! Writes a deterministic synthetic job/salary dataset as `myData.json`,
//! `myData.csv` and `myData.parquet` in the working directory.

use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use serde::Serialize;

/// Minimal deterministic PRNG (splitmix64)
struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        SimpleRng { state: seed }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }
}

#[derive(Serialize)]
struct SampleRow {
    work_year: String,
    salary_in_usd: String,
    job_title: String,
}

/// Title with its base salary in USD.
const TITLES: [(&str, f64); 6] = [
    ("Data Scientist", 120_000.0),
    ("Data Engineer", 110_000.0),
    ("Machine Learning Engineer", 140_000.0),
    ("Data Analyst", 80_000.0),
    ("Research Scientist", 150_000.0),
    ("Analytics Engineer", 105_000.0),
];

/// Year with the number of postings generated for it.
const YEARS: [(i64, usize); 7] = [
    (2019, 12),
    (2020, 40),
    (2021, 85),
    (2022, 160),
    (2023, 240),
    (2024, 190),
    (2025, 30),
];

fn generate(rng: &mut SimpleRng) -> Vec<SampleRow> {
    let mut rows = Vec::new();
    for &(year, postings) in &YEARS {
        // Salaries drift up ~4% a year.
        let drift = 1.04_f64.powi((year - 2019) as i32);
        for _ in 0..postings {
            let &(title, base) = rng.pick(&TITLES);
            let salary_in_usd = if rng.next_f64() < 0.01 {
                // Occasional unparseable cell, as seen in scraped data.
                "undisclosed".to_string()
            } else {
                let spread = 0.7 + 0.6 * rng.next_f64();
                format!("{:.0}", base * drift * spread)
            };
            rows.push(SampleRow {
                work_year: year.to_string(),
                salary_in_usd,
                job_title: title.to_string(),
            });
        }
    }
    rows
}

fn write_json(rows: &[SampleRow], path: &str) -> Result<()> {
    let file = std::fs::File::create(path).with_context(|| format!("creating {path}"))?;
    serde_json::to_writer_pretty(file, rows).context("writing JSON")?;
    Ok(())
}

fn write_csv(rows: &[SampleRow], path: &str) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).with_context(|| format!("creating {path}"))?;
    for row in rows {
        writer.serialize(row).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

/// Parquet stores year and salary as integers; unparseable salaries become nulls.
fn write_parquet(rows: &[SampleRow], path: &str) -> Result<()> {
    let years = Int64Array::from(
        rows.iter()
            .map(|r| r.work_year.parse::<i64>().ok())
            .collect::<Vec<_>>(),
    );
    let salaries = Int64Array::from(
        rows.iter()
            .map(|r| r.salary_in_usd.parse::<i64>().ok())
            .collect::<Vec<_>>(),
    );
    let titles = StringArray::from(rows.iter().map(|r| r.job_title.as_str()).collect::<Vec<_>>());

    let schema = Arc::new(Schema::new(vec![
        Field::new("work_year", DataType::Int64, true),
        Field::new("salary_in_usd", DataType::Int64, true),
        Field::new("job_title", DataType::Utf8, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![Arc::new(years), Arc::new(salaries), Arc::new(titles)],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).with_context(|| format!("creating {path}"))?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let rows = generate(&mut rng);

    write_json(&rows, "myData.json")?;
    write_csv(&rows, "myData.csv")?;
    write_parquet(&rows, "myData.parquet")?;

    println!(
        "Wrote {} records ({} years, {} titles) to myData.{{json,csv,parquet}}",
        rows.len(),
        YEARS.len(),
        TITLES.len()
    );
    Ok(())
}
