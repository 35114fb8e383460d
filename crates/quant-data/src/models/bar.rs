use crate::timeframe::Timeframe;
use serde::{Deserialize, Serialize};

/// A single OHLCV sample for a ticker at a given timeframe.
///
/// Bars are immutable once constructed. `low <= open,close <= high` and
/// `volume >= 0` are enforced by [`Bar::try_new`] rather than encoded in
/// the type, so a fetcher can ask to build one and get `None` back for
/// a malformed row instead of panicking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub ticker: String,
    pub timeframe: Timeframe,
    pub timestamp_ms: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Bar {
    /// Validates and constructs a `Bar`. Returns `None` for any field
    /// that is null/NaN or that violates the OHLC ordering invariant —
    /// callers (the CSV importer, or any future live fetcher) drop the
    /// row and move on rather than propagating an error.
    #[allow(clippy::too_many_arguments)]
    pub fn try_new(
        ticker: &str,
        timeframe: Timeframe,
        timestamp_ms: i64,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
    ) -> Option<Self> {
        if [open, high, low, close, volume]
            .iter()
            .any(|v| !v.is_finite())
        {
            return None;
        }
        if volume < 0.0 {
            return None;
        }
        if low > open || low > close || low > high {
            return None;
        }
        if high < open || high < close {
            return None;
        }
        Some(Self {
            ticker: ticker.to_string(),
            timeframe,
            timestamp_ms,
            open,
            high,
            low,
            close,
            volume,
        })
    }

    pub fn midpoint(&self) -> f64 {
        (self.high + self.low) / 2.0
    }

    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }
}
