pub mod atr;
pub mod bollinger;

pub use atr::ATR;
pub use bollinger::{BollingerBands, BollingerOutput};
