use crate::indicators::indicator_trait::{BarData, Indicator};
use std::collections::VecDeque;

/// Simple moving average, maintained via a running sum so each update
/// is O(1) regardless of `period`.
#[derive(Debug)]
pub struct SMA {
    period: usize,
    values: VecDeque<f64>,
    sum: f64,
    current_value: Option<f64>,
}

impl SMA {
    pub fn new(period: usize) -> Self {
        Self {
            period,
            values: VecDeque::with_capacity(period),
            sum: 0.0,
            current_value: None,
        }
    }
}

impl Indicator for SMA {
    fn name(&self) -> &str {
        "SMA"
    }

    fn warm_up_period(&self) -> usize {
        self.period
    }

    fn update(&mut self, input: BarData) -> Option<f64> {
        let value = input.close;
        self.values.push_back(value);
        self.sum += value;

        if self.values.len() > self.period {
            self.sum -= self.values.pop_front().unwrap();
        }

        if self.values.len() == self.period {
            let sma = self.sum / self.period as f64;
            self.current_value = Some(sma);
            Some(sma)
        } else {
            None
        }
    }

    fn current(&self) -> Option<f64> {
        self.current_value
    }

    fn reset(&mut self) {
        self.values.clear();
        self.sum = 0.0;
        self.current_value = None;
    }
}
