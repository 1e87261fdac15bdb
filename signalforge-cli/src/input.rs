//! CSV price history input.
//!
//! Expected header: `date,open,high,low,close,volume`, dates as YYYY-MM-DD,
//! oldest first. Validation of the values themselves is left to
//! `PriceSeries::new`, so CSV and library callers get the same errors.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Deserialize;
use signalforge_core::{PricePoint, PriceSeries};
use std::io::Read;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
struct CsvRow {
    date: NaiveDate,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: f64,
}

impl From<CsvRow> for PricePoint {
    fn from(row: CsvRow) -> Self {
        PricePoint::new(row.date, row.open, row.high, row.low, row.close, row.volume)
    }
}

/// Parse CSV rows from any reader into a validated series.
pub fn read_series<R: Read>(reader: R) -> Result<PriceSeries> {
    let mut csv = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut points = Vec::new();
    for (i, row) in csv.deserialize::<CsvRow>().enumerate() {
        // Row 1 is the header.
        let row = row.with_context(|| format!("malformed CSV row {}", i + 2))?;
        points.push(PricePoint::from(row));
    }

    Ok(PriceSeries::new(points)?)
}

pub fn load_series(path: &Path) -> Result<PriceSeries> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    read_series(file).with_context(|| format!("invalid price history in {}", path.display()))
}

/// Every `*.csv` file directly inside `dir`, sorted by path.
pub fn csv_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory {}", dir.display()))?
    {
        let path = entry?.path();
        let is_csv = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        if path.is_file() && is_csv {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Symbol for a batch file: the file stem, upper-cased.
pub fn symbol_from_path(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .map(str::to_uppercase)
        .filter(|s| !s.trim().is_empty())
}
