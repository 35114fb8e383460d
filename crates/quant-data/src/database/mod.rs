pub mod connection;
pub mod error;
pub mod operations;
pub mod schema;

pub use connection::Database;
pub use error::{DatabaseError, Result};
pub use operations::{EventRow, TradeRow};
