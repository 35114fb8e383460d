use crate::models::Bar;
use crate::timeframe::Timeframe;
use csv::Reader;
use serde::Deserialize;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{info, warn};

const MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("file too large: {0} bytes (max: {MAX_FILE_SIZE} bytes)")]
    FileTooLarge(u64),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, ImportError>;

#[derive(Debug, Clone)]
pub struct ImportSummary {
    pub file_path: PathBuf,
    pub total_rows: usize,
    pub rows_imported: usize,
    pub rows_skipped: usize,
    pub errors: Vec<String>,
    pub duration: Duration,
}

impl ImportSummary {
    pub fn success_rate(&self) -> f64 {
        if self.total_rows == 0 {
            0.0
        } else {
            (self.rows_imported as f64 / self.total_rows as f64) * 100.0
        }
    }
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    ticker: String,
    timestamp_ms: i64,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: f64,
}

/// Loads historical bars from a CSV file for a single timeframe. This
/// stands in for the out-of-scope HTTP market-data fetcher (§6.2) in
/// backtests and tests: the contract ("bars with any null field are
/// dropped") is the same one spec.md places on the live fetcher.
pub struct CsvBarImporter {
    timeframe: Timeframe,
}

impl CsvBarImporter {
    pub fn new(timeframe: Timeframe) -> Self {
        Self { timeframe }
    }

    pub fn import_file(&self, path: &Path) -> Result<(Vec<Bar>, ImportSummary)> {
        let start = Instant::now();
        let metadata = std::fs::metadata(path)?;
        if metadata.len() > MAX_FILE_SIZE {
            return Err(ImportError::FileTooLarge(metadata.len()));
        }

        info!(path = %path.display(), "importing historical bars");

        let file = File::open(path)?;
        let mut reader = Reader::from_reader(file);

        let mut bars = Vec::new();
        let mut total_rows = 0usize;
        let mut rows_skipped = 0usize;
        let mut errors = Vec::new();

        for (line_num, result) in reader.deserialize::<CsvRow>().enumerate() {
            total_rows += 1;
            let line = line_num + 2;

            let row = match result {
                Ok(row) => row,
                Err(e) => {
                    warn!(line, "failed to parse csv row: {e}");
                    errors.push(format!("line {line}: parse error: {e}"));
                    rows_skipped += 1;
                    continue;
                }
            };

            match Bar::try_new(
                &row.ticker,
                self.timeframe,
                row.timestamp_ms,
                row.open,
                row.high,
                row.low,
                row.close,
                row.volume,
            ) {
                Some(bar) => bars.push(bar),
                None => {
                    warn!(line, "dropping bar failing invariants");
                    errors.push(format!("line {line}: invalid bar"));
                    rows_skipped += 1;
                }
            }
        }

        bars.sort_by_key(|b| b.timestamp_ms);

        let summary = ImportSummary {
            file_path: path.to_path_buf(),
            total_rows,
            rows_imported: bars.len(),
            rows_skipped,
            errors: errors.into_iter().take(100).collect(),
            duration: start.elapsed(),
        };

        info!(
            imported = summary.rows_imported,
            skipped = summary.rows_skipped,
            "import completed"
        );

        Ok((bars, summary))
    }
}
