use super::trade::Trade;
use serde::{Deserialize, Serialize};

/// Aggregate metrics computed over a backtest's trade ledger and
/// equity curve (§4.4).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub total_trades: usize,
    pub winning: usize,
    pub losing: usize,
    pub total_pnl: f64,
    pub total_return_pct: f64,
    pub win_rate: f64,
    pub avg_win: f64,
    pub avg_loss: f64,
    pub profit_factor: f64,
    pub max_drawdown: f64,
    pub sharpe_ratio: f64,
    pub avg_holding_time_ms: f64,
}

pub fn compute_metrics(
    trades: &[Trade],
    equity_curve: &[f64],
    initial_capital: f64,
    final_capital: f64,
    holding_times_ms: &[i64],
) -> Metrics {
    let closing: Vec<&Trade> = trades.iter().filter(|t| t.pnl.is_some()).collect();
    let total_trades = closing.len();

    let wins: Vec<f64> = closing.iter().filter_map(|t| t.pnl).filter(|p| *p > 0.0).collect();
    let losses: Vec<f64> = closing.iter().filter_map(|t| t.pnl).filter(|p| *p < 0.0).collect();

    let winning = wins.len();
    let losing = losses.len();
    let total_pnl: f64 = closing.iter().filter_map(|t| t.pnl).sum();
    let total_return_pct = (final_capital / initial_capital - 1.0) * 100.0;
    let win_rate = if total_trades == 0 {
        0.0
    } else {
        winning as f64 / total_trades as f64 * 100.0
    };

    let avg_win = if wins.is_empty() { 0.0 } else { wins.iter().sum::<f64>() / wins.len() as f64 };
    let avg_loss = if losses.is_empty() {
        0.0
    } else {
        losses.iter().map(|p| p.abs()).sum::<f64>() / losses.len() as f64
    };
    let profit_factor = if avg_loss == 0.0 { 0.0 } else { avg_win / avg_loss };

    let max_drawdown = max_drawdown_pct(equity_curve);
    let sharpe_ratio = sharpe_ratio(equity_curve);

    let avg_holding_time_ms = if holding_times_ms.is_empty() {
        0.0
    } else {
        holding_times_ms.iter().sum::<i64>() as f64 / holding_times_ms.len() as f64
    };

    Metrics {
        total_trades,
        winning,
        losing,
        total_pnl,
        total_return_pct,
        win_rate,
        avg_win,
        avg_loss,
        profit_factor,
        max_drawdown,
        sharpe_ratio,
        avg_holding_time_ms,
    }
}

fn max_drawdown_pct(equity_curve: &[f64]) -> f64 {
    let mut peak = f64::MIN;
    let mut max_dd = 0.0;
    for &equity in equity_curve {
        if equity > peak {
            peak = equity;
        }
        if peak > 0.0 {
            let dd = (peak - equity) / peak * 100.0;
            if dd > max_dd {
                max_dd = dd;
            }
        }
    }
    max_dd
}

fn sharpe_ratio(equity_curve: &[f64]) -> f64 {
    if equity_curve.len() < 2 {
        return 0.0;
    }
    let returns: Vec<f64> = equity_curve
        .windows(2)
        .map(|w| if w[0] == 0.0 { 0.0 } else { (w[1] - w[0]) / w[0] })
        .collect();
    let mean = returns.iter().sum::<f64>() / returns.len() as f64;
    let variance = returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / returns.len() as f64;
    let stddev = variance.sqrt();
    if stddev == 0.0 {
        0.0
    } else {
        (mean / stddev) * (252.0_f64).sqrt()
    }
}
