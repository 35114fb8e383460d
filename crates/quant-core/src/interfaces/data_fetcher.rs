use crate::error::DataFetchError;
use quant_data::{Bar, CsvBarImporter, Timeframe};
use std::path::PathBuf;

/// Historical bar source, abstracted from the Yahoo-style HTTP
/// endpoint described in §6.2. `range` is one of the Yahoo-style range
/// tokens (`3mo`, `6mo`, `1y`, `2y`, ...) the orchestrator escalates
/// through (§4.5 Defaults).
pub trait HistoricalDataFetcher: Send + Sync {
    fn fetch(&self, ticker: &str, timeframe: Timeframe, range: &str) -> Result<Vec<Bar>, DataFetchError>;
}

/// Reads pre-downloaded CSV snapshots from disk instead of issuing an
/// HTTP request, standing in for the out-of-scope network fetcher
/// (§6.2/§1 Non-goals). Expects one file per `{ticker}_{timeframe}_{range}.csv`
/// under `base_dir`.
pub struct CsvHistoricalDataFetcher {
    base_dir: PathBuf,
}

impl CsvHistoricalDataFetcher {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }
}

impl HistoricalDataFetcher for CsvHistoricalDataFetcher {
    fn fetch(&self, ticker: &str, timeframe: Timeframe, range: &str) -> Result<Vec<Bar>, DataFetchError> {
        let path = self
            .base_dir
            .join(format!("{ticker}_{timeframe}_{range}.csv"));
        let importer = CsvBarImporter::new(timeframe);
        let (bars, _summary) = importer
            .import_file(&path)
            .map_err(|e| DataFetchError(e.to_string()))?;
        Ok(bars)
    }
}
