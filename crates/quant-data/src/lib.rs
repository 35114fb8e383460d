pub mod database;
pub mod import;
pub mod models;
pub mod timeframe;

pub use database::{Database, DatabaseError};
pub use import::{CsvBarImporter, ImportSummary};
pub use models::Bar;
pub use timeframe::Timeframe;
