//! Deterministic synthetic bar generation for the REPL's research
//! flow, standing in for a live historical fetch when no CSV snapshot
//! is on disk. Uses a sine-driven walk rather than an RNG, the same
//! trick the data-generation tooling this was adapted from relied on.

use quant_data::{Bar, Timeframe};

pub fn generate(ticker: &str, timeframe: Timeframe, count: usize, base_price: f64) -> Vec<Bar> {
    let mut bars = Vec::with_capacity(count);
    let mut timestamp = 0i64;

    for i in 0..count {
        let drift = (i as f64 * 0.05).sin() * base_price * 0.03;
        let close = base_price + drift;
        let open = close - (i as f64 * 0.07).cos() * base_price * 0.01;
        let high = open.max(close) + base_price * 0.005;
        let low = open.min(close) - base_price * 0.005;
        let volume = 1_000_000.0 + (i as f64 * 0.1).sin().abs() * 500_000.0;

        if let Some(bar) = Bar::try_new(ticker, timeframe, timestamp, open, high, low, close, volume) {
            bars.push(bar);
        }
        timestamp += timeframe.duration_ms();
    }

    bars
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generates_requested_bar_count() {
        let bars = generate("AAPL", Timeframe::OneDay, 200, 100.0);
        assert_eq!(bars.len(), 200);
    }

    #[test]
    fn timestamps_advance_by_timeframe_duration() {
        let bars = generate("AAPL", Timeframe::OneHour, 3, 100.0);
        assert_eq!(bars[1].timestamp_ms - bars[0].timestamp_ms, Timeframe::OneHour.duration_ms());
    }
}
