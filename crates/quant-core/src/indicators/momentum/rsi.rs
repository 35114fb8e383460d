use crate::indicators::indicator_trait::{BarData, Indicator};

/// Relative Strength Index with Wilder smoothing (§4.1). Seeds
/// `avg_gain`/`avg_loss` as the plain mean of the first `period`
/// gains/losses, then smooths with `1/period`.
#[derive(Debug)]
pub struct RSI {
    period: usize,
    gain_sum: f64,
    loss_sum: f64,
    seed_count: usize,
    avg_gain: Option<f64>,
    avg_loss: Option<f64>,
    previous_close: Option<f64>,
    current_value: Option<f64>,
}

impl RSI {
    pub fn new(period: usize) -> Self {
        Self {
            period,
            gain_sum: 0.0,
            loss_sum: 0.0,
            seed_count: 0,
            avg_gain: None,
            avg_loss: None,
            previous_close: None,
            current_value: None,
        }
    }

    fn compute_rsi(avg_gain: f64, avg_loss: f64) -> f64 {
        if avg_loss == 0.0 {
            100.0
        } else {
            let rs = avg_gain / avg_loss;
            100.0 - 100.0 / (1.0 + rs)
        }
    }
}

impl Indicator for RSI {
    fn name(&self) -> &str {
        "RSI"
    }

    fn warm_up_period(&self) -> usize {
        self.period + 1
    }

    fn update(&mut self, input: BarData) -> Option<f64> {
        let close = input.close;
        let Some(prev) = self.previous_close else {
            self.previous_close = Some(close);
            return None;
        };
        self.previous_close = Some(close);

        let change = close - prev;
        let gain = change.max(0.0);
        let loss = (-change).max(0.0);

        if let (Some(prev_gain), Some(prev_loss)) = (self.avg_gain, self.avg_loss) {
            let avg_gain = (prev_gain * (self.period - 1) as f64 + gain) / self.period as f64;
            let avg_loss = (prev_loss * (self.period - 1) as f64 + loss) / self.period as f64;
            self.avg_gain = Some(avg_gain);
            self.avg_loss = Some(avg_loss);
            let rsi = Self::compute_rsi(avg_gain, avg_loss);
            self.current_value = Some(rsi);
            return Some(rsi);
        }

        self.gain_sum += gain;
        self.loss_sum += loss;
        self.seed_count += 1;

        if self.seed_count == self.period {
            let avg_gain = self.gain_sum / self.period as f64;
            let avg_loss = self.loss_sum / self.period as f64;
            self.avg_gain = Some(avg_gain);
            self.avg_loss = Some(avg_loss);
            let rsi = Self::compute_rsi(avg_gain, avg_loss);
            self.current_value = Some(rsi);
            return Some(rsi);
        }

        None
    }

    fn current(&self) -> Option<f64> {
        self.current_value
    }

    fn reset(&mut self) {
        self.gain_sum = 0.0;
        self.loss_sum = 0.0;
        self.seed_count = 0;
        self.avg_gain = None;
        self.avg_loss = None;
        self.previous_close = None;
        self.current_value = None;
    }
}
