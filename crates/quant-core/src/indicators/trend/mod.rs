pub mod ema;
pub mod sma;

pub use ema::EMA;
pub use sma::SMA;
