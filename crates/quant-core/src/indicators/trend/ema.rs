use crate::indicators::indicator_trait::{BarData, Indicator};

/// Exponential moving average. Seeded with the SMA over the first
/// `period` closes, then updated with the standard
/// `ema' = (close - ema) * alpha + ema` recurrence.
#[derive(Debug)]
pub struct EMA {
    period: usize,
    multiplier: f64,
    current_value: Option<f64>,
    count: usize,
    seed_sum: f64,
}

impl EMA {
    pub fn new(period: usize) -> Self {
        Self {
            period,
            multiplier: 2.0 / (period as f64 + 1.0),
            current_value: None,
            count: 0,
            seed_sum: 0.0,
        }
    }

    /// Feed a raw scalar value rather than a whole `BarData` — used by
    /// [`crate::indicators::momentum::macd::MACD`], which runs three
    /// independent EMA accumulators (fast close, slow close, and the
    /// MACD stream itself) and only has a price, not a bar, for the
    /// third one.
    pub fn update_value(&mut self, value: f64) -> Option<f64> {
        self.count += 1;

        if self.count < self.period {
            self.seed_sum += value;
            None
        } else if self.count == self.period {
            self.seed_sum += value;
            let seed = self.seed_sum / self.period as f64;
            self.current_value = Some(seed);
            Some(seed)
        } else {
            let prev = self.current_value.unwrap();
            let next = (value - prev) * self.multiplier + prev;
            self.current_value = Some(next);
            Some(next)
        }
    }
}

impl Indicator for EMA {
    fn name(&self) -> &str {
        "EMA"
    }

    fn warm_up_period(&self) -> usize {
        self.period
    }

    fn update(&mut self, input: BarData) -> Option<f64> {
        self.update_value(input.close)
    }

    fn current(&self) -> Option<f64> {
        self.current_value
    }

    fn reset(&mut self) {
        self.current_value = None;
        self.count = 0;
        self.seed_sum = 0.0;
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
    fn seeds_with_sma_then_smooths() {
        let mut ema = EMA::new(3);
        assert_eq!(ema.update(bar(100.0)), None);
        assert_eq!(ema.update(bar(102.0)), None);

        let seed = ema.update(bar(103.0)).unwrap();
        let expected_seed = (100.0 + 102.0 + 103.0) / 3.0;
        assert!((seed - expected_seed).abs() < 1e-9);

        let next = ema.update(bar(104.0)).unwrap();
        let multiplier = 2.0 / 4.0;
        let expected = (104.0 - expected_seed) * multiplier + expected_seed;
        assert!((next - expected).abs() < 1e-9);
    }

    #[test]
    fn tracks_an_uptrend() {
        let mut ema = EMA::new(5);
        for i in 1..=10 {
            ema.update(bar(100.0 + i as f64));
        }
        let value = ema.current().unwrap();
        assert!(value > 100.0 && value < 115.0);
    }
}
