use crate::spec::Action;
use serde::{Deserialize, Serialize};

/// Why a position was closed (§4.4 step 3 and end-of-run handling).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CloseReason {
    Signal,
    StopLoss,
    TakeProfit,
    EndOfBacktest,
}

/// One fill recorded to the backtest ledger (§3).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub ticker: String,
    pub action: Action,
    pub price: f64,
    pub quantity: f64,
    pub timestamp_ms: i64,
    pub pnl: Option<f64>,
    pub commission: f64,
    pub reason: Option<CloseReason>,
}
