use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A ticker's position state (§3). At most one non-FLAT position per
/// ticker exists at any time — enforced by [`PositionBook`], not by
/// this type itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Flat,
    Long,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub ticker: String,
    pub side: Side,
    pub entry_price: f64,
    pub quantity: f64,
    pub entry_ts: i64,
    pub stop_loss_price: f64,
    pub take_profit_price: f64,
}

impl Position {
    pub fn flat(ticker: impl Into<String>) -> Self {
        Self {
            ticker: ticker.into(),
            side: Side::Flat,
            entry_price: 0.0,
            quantity: 0.0,
            entry_ts: 0,
            stop_loss_price: 0.0,
            take_profit_price: 0.0,
        }
    }

    pub fn is_open(&self) -> bool {
        self.side != Side::Flat
    }
}

/// One open position per ticker, enforced structurally rather than by
/// the teacher's concurrent `DashMap`-backed manager — the fast path
/// here is single-threaded (§5), so a plain map is sufficient.
#[derive(Debug, Default)]
pub struct PositionBook {
    positions: HashMap<String, Position>,
}

impl PositionBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, ticker: &str) -> Option<&Position> {
        self.positions.get(ticker)
    }

    pub fn is_open(&self, ticker: &str) -> bool {
        self.positions.get(ticker).is_some_and(Position::is_open)
    }

    pub fn open(&mut self, position: Position) {
        self.positions.insert(position.ticker.clone(), position);
    }

    pub fn close(&mut self, ticker: &str) -> Option<Position> {
        self.positions.remove(ticker)
    }
}
