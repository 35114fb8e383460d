pub mod macd;
pub mod rsi;

pub use macd::{MACDOutput, MACD};
pub use rsi::RSI;
