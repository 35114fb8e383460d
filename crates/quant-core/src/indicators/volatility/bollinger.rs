use crate::indicators::indicator_trait::{BarData, Indicator};
use std::collections::VecDeque;

/// Bollinger Bands: middle = SMA(period), upper/lower = middle ± k*std.
/// Standard deviation is recomputed over the bounded ring each bar —
/// acceptable per §4.1 since `period` is small and fixed.
#[derive(Debug)]
pub struct BollingerBands {
    period: usize,
    k: f64,
    values: VecDeque<f64>,
    output: Option<BollingerOutput>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BollingerOutput {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

impl BollingerBands {
    pub fn new(period: usize, k: f64) -> Self {
        Self {
            period,
            k,
            values: VecDeque::with_capacity(period),
            output: None,
        }
    }

    pub fn get_bands(&self) -> Option<BollingerOutput> {
        self.output
    }

    fn std_dev(&self, mean: f64) -> f64 {
        let variance = self
            .values
            .iter()
            .map(|v| (v - mean).powi(2))
            .sum::<f64>()
            / self.period as f64;
        variance.sqrt()
    }
}

impl Indicator for BollingerBands {
    fn name(&self) -> &str {
        "BollingerBands"
    }

    fn warm_up_period(&self) -> usize {
        self.period
    }

    fn update(&mut self, input: BarData) -> Option<f64> {
        self.values.push_back(input.close);
        if self.values.len() > self.period {
            self.values.pop_front();
        }

        if self.values.len() != self.period {
            return None;
        }

        let middle = self.values.iter().sum::<f64>() / self.period as f64;
        let std = self.std_dev(middle);
        let output = BollingerOutput {
            upper: middle + self.k * std,
            middle,
            lower: middle - self.k * std,
        };
        self.output = Some(output);
        Some(middle)
    }

    fn current(&self) -> Option<f64> {
        self.output.map(|o| o.middle)
    }

    fn reset(&mut self) {
        self.values.clear();
        self.output = None;
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
    fn zero_std_collapses_bands() {
        let mut bb = BollingerBands::new(5, 2.0);
        for _ in 0..5 {
            bb.update(bar(100.0));
        }
        let out = bb.get_bands().unwrap();
        assert!((out.upper - out.middle).abs() < 1e-9);
        assert!((out.lower - out.middle).abs() < 1e-9);
    }

    #[test]
    fn bands_widen_with_volatility() {
        let mut bb = BollingerBands::new(5, 2.0);
        for c in [90.0, 110.0, 95.0, 105.0, 100.0] {
            bb.update(bar(c));
        }
        let out = bb.get_bands().unwrap();
        assert!(out.upper > out.middle);
        assert!(out.lower < out.middle);
    }
}
