//! Incremental technical indicators (§4.1 / C1).
//!
//! Every indicator implements [`Indicator`] and updates in O(1)
//! amortized time per bar. [`IndicatorEngine`] owns one accumulator
//! set per ticker and is the only thing that ever mutates it.

pub mod enriched;
pub mod engine;
pub mod indicator_trait;
pub mod momentum;
pub mod trend;
pub mod volatility;
pub mod volume;

pub use enriched::{EnrichedBar, IndicatorField};
pub use engine::IndicatorEngine;
pub use indicator_trait::{BarData, Indicator};
pub use momentum::{MACDOutput, RSI, MACD};
pub use trend::{EMA, SMA};
pub use volatility::{BollingerBands, BollingerOutput, ATR};
pub use volume::VolumeAverage;
