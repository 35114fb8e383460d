//! Abstract external interfaces the hybrid pipeline depends on but
//! does not implement itself (§6): the slow-path LLM strategy
//! compiler and the historical data source.

pub mod data_fetcher;
pub mod spec_producer;

pub use data_fetcher::{CsvHistoricalDataFetcher, HistoricalDataFetcher};
pub use spec_producer::{SpecProducer, StaticSpecProducer};
