use crate::indicators::indicator_trait::{BarData, Indicator};
use std::collections::VecDeque;

/// Running average volume. `volume_ratio` (current volume / this
/// average) is derived by the caller once both are available; this
/// indicator only tracks the average itself.
#[derive(Debug)]
pub struct VolumeAverage {
    period: usize,
    values: VecDeque<f64>,
    sum: f64,
    current_value: Option<f64>,
}

impl VolumeAverage {
    pub fn new(period: usize) -> Self {
        Self {
            period,
            values: VecDeque::with_capacity(period),
            sum: 0.0,
            current_value: None,
        }
    }
}

impl Indicator for VolumeAverage {
    fn name(&self) -> &str {
        "VolumeAverage"
    }

    fn warm_up_period(&self) -> usize {
        self.period
    }

    fn update(&mut self, input: BarData) -> Option<f64> {
        self.values.push_back(input.volume);
        self.sum += input.volume;

        if self.values.len() > self.period {
            self.sum -= self.values.pop_front().unwrap();
        }

        if self.values.len() == self.period {
            let avg = self.sum / self.period as f64;
            self.current_value = Some(avg);
            Some(avg)
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

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(volume: f64) -> BarData {
        BarData {
            open: 1.0,
            high: 1.0,
            low: 1.0,
            close: 1.0,
            volume,
        }
    }

    #[test]
    fn averages_the_window() {
        let mut avg = VolumeAverage::new(3);
        avg.update(bar(100.0));
        avg.update(bar(200.0));
        let result = avg.update(bar(300.0)).unwrap();
        assert!((result - 200.0).abs() < 1e-9);
    }
}
