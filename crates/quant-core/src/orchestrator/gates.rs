use crate::backtest::Metrics;
use serde::{Deserialize, Serialize};

/// Gate #1 thresholds: pass criteria to leave RESEARCH for TRADING
/// after a Spec's backtest (§4.5).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Gate1Thresholds {
    pub min_trades: usize,
    pub max_dd_pct: f64,
    pub min_return_pct: f64,
}

impl Gate1Thresholds {
    pub fn evaluate(&self, metrics: &Metrics) -> bool {
        metrics.total_trades >= self.min_trades
            && metrics.max_drawdown <= self.max_dd_pct
            && metrics.total_return_pct >= self.min_return_pct
    }
}

/// Gate #2 (drift): consecutive losing round-trips while TRADING.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Gate2Thresholds {
    pub max_consecutive_losses: u32,
}

impl Default for Gate2Thresholds {
    fn default() -> Self {
        Self {
            max_consecutive_losses: 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(total_trades: usize, max_drawdown: f64, total_return_pct: f64) -> Metrics {
        Metrics {
            total_trades,
            winning: 0,
            losing: 0,
            total_pnl: 0.0,
            total_return_pct,
            win_rate: 0.0,
            avg_win: 0.0,
            avg_loss: 0.0,
            profit_factor: 0.0,
            max_drawdown,
            sharpe_ratio: 0.0,
            avg_holding_time_ms: 0.0,
        }
    }

    #[test]
    fn gate1_fails_below_min_trades() {
        let gate = Gate1Thresholds {
            min_trades: 3,
            max_dd_pct: 20.0,
            min_return_pct: -5.0,
        };
        assert!(!gate.evaluate(&metrics(2, 5.0, 3.0)));
    }

    #[test]
    fn gate1_passes_when_all_thresholds_met() {
        let gate = Gate1Thresholds {
            min_trades: 3,
            max_dd_pct: 20.0,
            min_return_pct: -5.0,
        };
        assert!(gate.evaluate(&metrics(3, 5.0, 3.0)));
    }
}
