use super::enriched::{EnrichedBar, IndicatorField};
use super::indicator_trait::{BarData, Indicator};
use super::momentum::{MACDOutput, RSI, MACD};
use super::trend::{EMA, SMA};
use super::volatility::{BollingerBands, ATR};
use super::volume::VolumeAverage;
use quant_data::Bar;
use std::collections::{HashMap, HashSet, VecDeque};
use tracing::warn;

struct TickerState {
    ring: VecDeque<Bar>,
    ring_capacity: usize,
    sma_20: SMA,
    sma_50: SMA,
    sma_200: SMA,
    ema_12: EMA,
    ema_26: EMA,
    rsi: RSI,
    macd: MACD,
    bollinger: BollingerBands,
    atr: ATR,
    volume_avg: VolumeAverage,
}

impl TickerState {
    fn new(ring_capacity: usize) -> Self {
        Self {
            ring: VecDeque::with_capacity(ring_capacity),
            ring_capacity,
            sma_20: SMA::new(20),
            sma_50: SMA::new(50),
            sma_200: SMA::new(200),
            ema_12: EMA::new(12),
            ema_26: EMA::new(26),
            rsi: RSI::new(14),
            macd: MACD::new(12, 26, 9),
            bollinger: BollingerBands::new(20, 2.0),
            atr: ATR::new(14),
            volume_avg: VolumeAverage::new(20),
        }
    }
}

/// Incremental, O(1)-per-bar technical indicator engine (§4.1, C1).
///
/// Owns one [`TickerState`] per ticker exclusively: nothing outside
/// this type ever mutates an indicator's internal accumulators. The
/// [`crate::engine::ExecutionEngine`] only ever calls [`enrich`] and
/// reads the resulting ring length.
#[derive(Default)]
pub struct IndicatorEngine {
    tickers: HashMap<String, TickerState>,
}

impl IndicatorEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ensures a ticker has state, sizing its bar ring to
    /// `lookback * 2` as §3 specifies. Idempotent: calling again with a
    /// different lookback only grows future capacity, it does not
    /// reset already-accumulated indicator state.
    pub fn ensure_ticker(&mut self, ticker: &str, lookback: usize) {
        self.tickers
            .entry(ticker.to_string())
            .or_insert_with(|| TickerState::new(lookback * 2));
    }

    pub fn ring_len(&self, ticker: &str) -> usize {
        self.tickers.get(ticker).map(|s| s.ring.len()).unwrap_or(0)
    }

    /// Appends `bar` to the ticker's ring and updates every
    /// accumulator, returning an [`EnrichedBar`] whose fields are
    /// populated only for `requested` indicators (and left absent
    /// where history is still insufficient). NaN/non-finite input is
    /// dropped without mutating state, per §4.1 failure semantics.
    pub fn enrich(
        &mut self,
        ticker: &str,
        bar: &Bar,
        requested: &HashSet<IndicatorField>,
    ) -> Option<EnrichedBar> {
        if ![bar.open, bar.high, bar.low, bar.close, bar.volume]
            .iter()
            .all(|v| v.is_finite())
        {
            warn!(ticker, "dropping non-finite bar, indicator state untouched");
            return None;
        }

        let lookback_hint = requested.iter().map(IndicatorField::period).max().unwrap_or(20);
        self.ensure_ticker(ticker, lookback_hint.max(20));
        let state = self.tickers.get_mut(ticker).expect("just ensured");

        state.ring.push_back(bar.clone());
        if state.ring.len() > state.ring_capacity {
            state.ring.pop_front();
        }

        let input = BarData::from(bar);

        state.sma_20.update(input);
        state.sma_50.update(input);
        state.sma_200.update(input);
        state.ema_12.update(input);
        state.ema_26.update(input);
        state.rsi.update(input);
        state.macd.update(input);
        state.bollinger.update(input);
        state.atr.update(input);
        state.volume_avg.update(input);

        let macd_output: Option<MACDOutput> = state.macd.get_output();
        let bb_output = state.bollinger.get_bands();
        let volume_avg = state.volume_avg.current();

        let field = |f: IndicatorField, value: Option<f64>| requested.contains(&f).then_some(value).flatten();

        Some(EnrichedBar {
            ticker: ticker.to_string(),
            timestamp_ms: bar.timestamp_ms,
            open: bar.open,
            high: bar.high,
            low: bar.low,
            close: bar.close,
            volume: bar.volume,
            sma_20: field(IndicatorField::Sma20, state.sma_20.current()),
            sma_50: field(IndicatorField::Sma50, state.sma_50.current()),
            sma_200: field(IndicatorField::Sma200, state.sma_200.current()),
            ema_12: field(IndicatorField::Ema12, state.ema_12.current()),
            ema_26: field(IndicatorField::Ema26, state.ema_26.current()),
            rsi: field(IndicatorField::Rsi, state.rsi.current()),
            macd: field(IndicatorField::Macd, macd_output.map(|o| o.macd)),
            macd_signal: field(IndicatorField::Macd, macd_output.map(|o| o.signal)),
            macd_histogram: field(IndicatorField::Macd, macd_output.map(|o| o.histogram)),
            bb_upper: field(IndicatorField::BollingerBands, bb_output.map(|o| o.upper)),
            bb_middle: field(IndicatorField::BollingerBands, bb_output.map(|o| o.middle)),
            bb_lower: field(IndicatorField::BollingerBands, bb_output.map(|o| o.lower)),
            atr: field(IndicatorField::Atr, state.atr.current()),
            volume_avg: field(IndicatorField::VolumeAvg, volume_avg),
            volume_ratio: field(
                IndicatorField::VolumeAvg,
                volume_avg.and_then(|avg| (avg != 0.0).then_some(bar.volume / avg)),
            ),
        })
    }

    pub fn reset(&mut self, ticker: Option<&str>) {
        match ticker {
            Some(t) => {
                self.tickers.remove(t);
            }
            None => self.tickers.clear(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quant_data::Timeframe;

    fn bar(ts: i64, close: f64) -> Bar {
        Bar::try_new("AAPL", Timeframe::OneDay, ts, close, close + 1.0, close - 1.0, close, 1000.0)
            .unwrap()
    }

    #[test]
    fn absent_until_warm_then_matches_from_scratch_recompute() {
        let mut engine = IndicatorEngine::new();
        let mut requested = HashSet::new();
        requested.insert(IndicatorField::Sma20);

        let mut last = None;
        for i in 0..25 {
            last = engine.enrich("AAPL", &bar(i, 100.0 + i as f64), &requested);
        }
        let enriched = last.unwrap();
        assert!(enriched.sma_20.is_some());

        // recompute from scratch over the last 20 closes
        let closes: Vec<f64> = (5..25).map(|i| 100.0 + i as f64).collect();
        let expected = closes.iter().sum::<f64>() / 20.0;
        assert!((enriched.sma_20.unwrap() - expected).abs() < 1e-9);
    }

    #[test]
    fn unrequested_fields_stay_absent() {
        let mut engine = IndicatorEngine::new();
        let requested = HashSet::new();
        let mut last = None;
        for i in 0..25 {
            last = engine.enrich("AAPL", &bar(i, 100.0), &requested);
        }
        let enriched = last.unwrap();
        assert!(enriched.sma_20.is_none());
    }

    #[test]
    fn drops_non_finite_bars_without_mutating_state() {
        let mut engine = IndicatorEngine::new();
        let mut requested = HashSet::new();
        requested.insert(IndicatorField::Sma20);

        for i in 0..19 {
            engine.enrich("AAPL", &bar(i, 100.0), &requested);
        }
        let mut bad = bar(19, 100.0);
        bad.close = f64::NAN;
        assert!(engine.enrich("AAPL", &bad, &requested).is_none());
        assert_eq!(engine.ring_len("AAPL"), 19);
    }

    #[test]
    fn ring_is_bounded_by_lookback_times_two() {
        let mut engine = IndicatorEngine::new();
        engine.ensure_ticker("AAPL", 10);
        let requested = HashSet::new();
        for i in 0..50 {
            engine.enrich("AAPL", &bar(i, 100.0), &requested);
        }
        assert_eq!(engine.ring_len("AAPL"), 20);
    }
}
