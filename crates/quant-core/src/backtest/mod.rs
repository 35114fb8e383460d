//! Deterministic backtest engine (§4.4, C5).

pub mod fill;
pub mod metrics;
pub mod trade;

pub use fill::FillModel;
pub use metrics::Metrics;
pub use trade::{CloseReason, Trade};

use crate::engine::ExecutionEngine;
use crate::spec::{Action, StrategySpec};
use quant_data::Bar;
use serde::{Deserialize, Serialize};

/// Full output of one backtest run (§4.4).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestResult {
    pub metrics: Metrics,
    pub trades: Vec<Trade>,
    pub equity_curve: Vec<f64>,
    pub final_capital: f64,
}

#[derive(Debug, Clone, Copy)]
struct OpenPosition {
    entry_price: f64,
    quantity: f64,
    entry_ts: i64,
    entry_commission: f64,
    stop_loss: f64,
    take_profit: f64,
}

/// Runs a Spec against a historical bar sequence, producing a trade
/// ledger and the metrics in [`Metrics`]. Bars must be time-ordered
/// and belong to `spec.ticker` — the caller's responsibility, per
/// §4.4's contract.
pub struct BacktestEngine {
    fill_model: FillModel,
    initial_capital: f64,
    max_latency_ms: f64,
}

impl BacktestEngine {
    pub fn new(fill_model: FillModel, initial_capital: f64, max_latency_ms: f64) -> Self {
        Self {
            fill_model,
            initial_capital,
            max_latency_ms,
        }
    }

    pub fn run(&self, spec: StrategySpec, bars: &[Bar]) -> BacktestResult {
        let ticker = spec.ticker.clone();
        let mut engine = ExecutionEngine::new(self.max_latency_ms);
        engine.load(spec);

        let mut cash = self.initial_capital;
        let mut open: Option<OpenPosition> = None;
        let mut trades = Vec::new();
        let mut equity_curve = Vec::new();
        let mut holding_times_ms = Vec::new();

        for (i, bar) in bars.iter().enumerate() {
            let decision = engine.on_bar(&ticker, bar, bar.timestamp_ms).ok().flatten();

            if let Some(decision) = &decision {
                if decision.action == Action::Buy && open.is_none() {
                    if let Some(pos) = self.try_open(&mut cash, bar, decision.stop_loss, decision.take_profit) {
                        open = Some(pos);
                        trades.push(Trade {
                            ticker: ticker.clone(),
                            action: Action::Buy,
                            price: self.fill_model.buy_price(bar.close),
                            quantity: pos.quantity,
                            timestamp_ms: bar.timestamp_ms,
                            pnl: None,
                            commission: pos.entry_commission,
                            reason: None,
                        });
                    }
                } else if decision.action == Action::Sell {
                    if let Some(pos) = open.take() {
                        self.close(&mut cash, &ticker, bar, pos, CloseReason::Signal, &mut trades, &mut holding_times_ms);
                    }
                }
            }

            if let Some(pos) = open {
                if bar.close <= pos.stop_loss {
                    open = None;
                    self.close(&mut cash, &ticker, bar, pos, CloseReason::StopLoss, &mut trades, &mut holding_times_ms);
                } else if bar.close >= pos.take_profit {
                    open = None;
                    self.close(&mut cash, &ticker, bar, pos, CloseReason::TakeProfit, &mut trades, &mut holding_times_ms);
                }
            }

            let is_last = i == bars.len() - 1;
            if is_last {
                if let Some(pos) = open.take() {
                    self.close(&mut cash, &ticker, bar, pos, CloseReason::EndOfBacktest, &mut trades, &mut holding_times_ms);
                }
            }

            if i % 100 == 0 || is_last {
                let mark_to_market = open.map(|p| p.quantity * bar.close).unwrap_or(0.0);
                equity_curve.push(cash + mark_to_market);
            }
        }

        let metrics = metrics::compute_metrics(&trades, &equity_curve, self.initial_capital, cash, &holding_times_ms);
        BacktestResult {
            metrics,
            trades,
            equity_curve,
            final_capital: cash,
        }
    }

    fn try_open(&self, cash: &mut f64, bar: &Bar, stop_loss: f64, take_profit: f64) -> Option<OpenPosition> {
        let exec_price = self.fill_model.buy_price(bar.close);
        let quantity = (self.initial_capital * 0.10 / exec_price).floor();
        if quantity <= 0.0 {
            return None;
        }
        let notional = quantity * exec_price;
        let commission = self.fill_model.commission(notional);
        if notional + commission > *cash {
            return None;
        }
        *cash -= notional + commission;
        Some(OpenPosition {
            entry_price: exec_price,
            quantity,
            entry_ts: bar.timestamp_ms,
            entry_commission: commission,
            stop_loss,
            take_profit,
        })
    }

    #[allow(clippy::too_many_arguments)]
    fn close(
        &self,
        cash: &mut f64,
        ticker: &str,
        bar: &Bar,
        pos: OpenPosition,
        reason: CloseReason,
        trades: &mut Vec<Trade>,
        holding_times_ms: &mut Vec<i64>,
    ) {
        let exec_price = self.fill_model.sell_price(bar.close);
        let notional = pos.quantity * exec_price;
        let commission = self.fill_model.commission(notional);
        let pnl = notional - commission - pos.entry_commission - pos.quantity * pos.entry_price;
        *cash += notional - commission;
        holding_times_ms.push(bar.timestamp_ms - pos.entry_ts);
        trades.push(Trade {
            ticker: ticker.to_string(),
            action: Action::Sell,
            price: exec_price,
            quantity: pos.quantity,
            timestamp_ms: bar.timestamp_ms,
            pnl: Some(pnl),
            commission,
            reason: Some(reason),
        });
    }
}
