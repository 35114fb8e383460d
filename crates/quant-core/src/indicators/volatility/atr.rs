use crate::indicators::indicator_trait::{BarData, Indicator};
use std::collections::VecDeque;

/// Average True Range. Seeds with the plain mean of the first `period`
/// true ranges, then continues with Wilder smoothing
/// (`(prev*(period-1)+tr)/period`) — the alternative §4.1/§9 allow
/// over a flat arithmetic mean, chosen here to match this system's
/// RSI, which already uses the same smoothing constant.
#[derive(Debug)]
pub struct ATR {
    period: usize,
    seed_values: VecDeque<f64>,
    current_atr: Option<f64>,
    previous_close: Option<f64>,
}

impl ATR {
    pub fn new(period: usize) -> Self {
        Self {
            period,
            seed_values: VecDeque::with_capacity(period),
            current_atr: None,
            previous_close: None,
        }
    }

    fn true_range(bar: &BarData, prev_close: f64) -> f64 {
        let hl = bar.high - bar.low;
        let hc = (bar.high - prev_close).abs();
        let lc = (bar.low - prev_close).abs();
        hl.max(hc).max(lc)
    }
}

impl Indicator for ATR {
    fn name(&self) -> &str {
        "ATR"
    }

    fn warm_up_period(&self) -> usize {
        self.period + 1
    }

    fn update(&mut self, input: BarData) -> Option<f64> {
        // The first bar has no prior close, so it has no well-defined
        // true range; it only seeds `previous_close`.
        let Some(prev_close) = self.previous_close else {
            self.previous_close = Some(input.close);
            return None;
        };

        let tr = Self::true_range(&input, prev_close);
        self.previous_close = Some(input.close);

        if let Some(prev_atr) = self.current_atr {
            let atr = (prev_atr * (self.period - 1) as f64 + tr) / self.period as f64;
            self.current_atr = Some(atr);
            Some(atr)
        } else {
            self.seed_values.push_back(tr);
            if self.seed_values.len() == self.period {
                let atr = self.seed_values.iter().sum::<f64>() / self.period as f64;
                self.current_atr = Some(atr);
                Some(atr)
            } else {
                None
            }
        }
    }

    fn current(&self) -> Option<f64> {
        self.current_atr
    }

    fn reset(&mut self) {
        self.seed_values.clear();
        self.current_atr = None;
        self.previous_close = None;
    }
}
