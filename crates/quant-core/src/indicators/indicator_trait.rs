use std::fmt::Debug;

/// Minimal OHLCV view an indicator needs. Decoupled from
/// `quant_data::Bar` (which also carries `ticker`/`timeframe`) so an
/// indicator never has to care which ticker it's tracking — the
/// [`crate::indicators::engine::IndicatorEngine`] owns one instance
/// per ticker instead.
#[derive(Debug, Clone, Copy)]
pub struct BarData {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl From<&quant_data::Bar> for BarData {
    fn from(bar: &quant_data::Bar) -> Self {
        Self {
            open: bar.open,
            high: bar.high,
            low: bar.low,
            close: bar.close,
            volume: bar.volume,
        }
    }
}

/// Uniform interface for every incremental technical indicator (§4.1).
///
/// All periods update in O(1) amortized time per bar. `update` returns
/// `None` during warm-up and `Some(value)` once enough history has
/// accumulated; `current` re-reads the last computed value without
/// mutating state.
pub trait Indicator: Send + Sync + Debug {
    fn name(&self) -> &str;

    /// Number of bars required before the indicator produces a value.
    fn warm_up_period(&self) -> usize;

    fn update(&mut self, input: BarData) -> Option<f64>;

    fn current(&self) -> Option<f64>;

    fn reset(&mut self);

    fn is_ready(&self) -> bool {
        self.current().is_some()
    }
}
