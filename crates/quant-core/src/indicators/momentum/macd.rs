use crate::indicators::indicator_trait::{BarData, Indicator};
use crate::indicators::trend::ema::EMA;

/// MACD: fast EMA minus slow EMA, with a signal line that is the
/// proper `EMA(9)` over the MACD stream (the source this system was
/// distilled from instead approximated the signal as `macd * 0.9`,
/// which is a bug — see `DESIGN.md`).
#[derive(Debug)]
pub struct MACD {
    slow_period: usize,
    signal_period: usize,
    fast_ema: EMA,
    slow_ema: EMA,
    signal_ema: EMA,
    current_macd: Option<f64>,
    current_signal: Option<f64>,
    current_histogram: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MACDOutput {
    pub macd: f64,
    pub signal: f64,
    pub histogram: f64,
}

impl MACD {
    pub fn new(fast_period: usize, slow_period: usize, signal_period: usize) -> Self {
        Self {
            slow_period,
            signal_period,
            fast_ema: EMA::new(fast_period),
            slow_ema: EMA::new(slow_period),
            signal_ema: EMA::new(signal_period),
            current_macd: None,
            current_signal: None,
            current_histogram: None,
        }
    }

    pub fn get_output(&self) -> Option<MACDOutput> {
        match (self.current_macd, self.current_signal, self.current_histogram) {
            (Some(macd), Some(signal), Some(histogram)) => Some(MACDOutput {
                macd,
                signal,
                histogram,
            }),
            _ => None,
        }
    }
}

impl Indicator for MACD {
    fn name(&self) -> &str {
        "MACD"
    }

    fn warm_up_period(&self) -> usize {
        self.slow_period + self.signal_period - 1
    }

    fn update(&mut self, input: BarData) -> Option<f64> {
        let fast = self.fast_ema.update(input);
        let slow = self.slow_ema.update(input);

        let (Some(fast), Some(slow)) = (fast, slow) else {
            return None;
        };

        let macd_line = fast - slow;
        self.current_macd = Some(macd_line);

        if let Some(signal) = self.signal_ema.update_value(macd_line) {
            self.current_signal = Some(signal);
            self.current_histogram = Some(macd_line - signal);
            return Some(macd_line);
        }

        None
    }

    fn current(&self) -> Option<f64> {
        self.current_macd
    }

    fn reset(&mut self) {
        self.fast_ema.reset();
        self.slow_ema.reset();
        self.signal_ema.reset();
        self.current_macd = None;
        self.current_signal = None;
        self.current_histogram = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(close: f64) -> BarData {
        BarData {
            open: close,
            high: close,
            low: close,
            close,
            volume: 1000.0,
        }
    }

    #[test]
    fn produces_finite_output_once_warm() {
        let mut macd = MACD::new(12, 26, 9);
        for i in 1..=50 {
            let price = 100.0 + (i as f64 * 0.1).sin() * 5.0;
            macd.update(bar(price));
        }
        let out = macd.get_output().unwrap();
        assert!(out.macd.is_finite() && out.signal.is_finite() && out.histogram.is_finite());
    }

    #[test]
    fn uptrend_has_positive_macd() {
        let mut macd = MACD::new(3, 6, 3);
        for i in 1..=20 {
            macd.update(bar(100.0 + i as f64));
        }
        assert!(macd.get_output().unwrap().macd > 0.0);
    }

    #[test]
    fn signal_is_a_real_ema_not_the_macd_times_point_nine_approximation() {
        let mut macd = MACD::new(3, 6, 3);
        for i in 1..=20 {
            macd.update(bar(100.0 + (i as f64 * 0.7).cos() * 3.0));
        }
        let out = macd.get_output().unwrap();
        assert!((out.signal - out.macd * 0.9).abs() > 1e-6);
    }
}
