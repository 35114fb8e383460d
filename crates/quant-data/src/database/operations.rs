use super::connection::Database;
use super::error::{DatabaseError, Result};
use rusqlite::params;

/// A flattened row for the orchestrator's event stream (§6.4). Kept as
/// plain fields here (not the `quant_core::UiEvent` type) so this
/// crate never needs to depend back on `quant-core`.
#[derive(Debug, Clone)]
pub struct EventRow {
    pub id: String,
    pub ts: i64,
    pub level: String,
    pub kind: String,
    pub message: String,
}

/// A flattened row for the backtest trade ledger (§3 `Trade`).
#[derive(Debug, Clone)]
pub struct TradeRow {
    pub ticker: String,
    pub action: String,
    pub price: f64,
    pub quantity: f64,
    pub timestamp_ms: i64,
    pub pnl: Option<f64>,
    pub commission: f64,
    pub reason: String,
}

impl Database {
    pub fn insert_event(&self, event: &EventRow) -> Result<()> {
        self.connection()
            .execute(
                "INSERT OR REPLACE INTO events (id, ts, level, kind, message) VALUES (?, ?, ?, ?, ?)",
                params![event.id, event.ts, event.level, event.kind, event.message],
            )
            .map_err(|e| DatabaseError::InsertError(e.to_string()))?;
        Ok(())
    }

    pub fn recent_events(&self, limit: usize) -> Result<Vec<EventRow>> {
        let mut stmt = self
            .connection()
            .prepare("SELECT id, ts, level, kind, message FROM events ORDER BY ts DESC LIMIT ?")
            .map_err(|e| DatabaseError::QueryError(e.to_string()))?;

        let rows = stmt
            .query_map(params![limit as i64], |row| {
                Ok(EventRow {
                    id: row.get(0)?,
                    ts: row.get(1)?,
                    level: row.get(2)?,
                    kind: row.get(3)?,
                    message: row.get(4)?,
                })
            })
            .map_err(|e| DatabaseError::QueryError(e.to_string()))?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| DatabaseError::QueryError(e.to_string()))
    }

    pub fn insert_trade(&self, trade: &TradeRow) -> Result<()> {
        self.connection()
            .execute(
                "INSERT INTO trades (ticker, action, price, quantity, timestamp_ms, pnl, commission, reason)
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
                params![
                    trade.ticker,
                    trade.action,
                    trade.price,
                    trade.quantity,
                    trade.timestamp_ms,
                    trade.pnl,
                    trade.commission,
                    trade.reason
                ],
            )
            .map_err(|e| DatabaseError::InsertError(e.to_string()))?;
        Ok(())
    }

    pub fn trades_for_ticker(&self, ticker: &str) -> Result<Vec<TradeRow>> {
        let mut stmt = self
            .connection()
            .prepare(
                "SELECT ticker, action, price, quantity, timestamp_ms, pnl, commission, reason
                 FROM trades WHERE ticker = ? ORDER BY timestamp_ms ASC",
            )
            .map_err(|e| DatabaseError::QueryError(e.to_string()))?;

        let rows = stmt
            .query_map(params![ticker], |row| {
                Ok(TradeRow {
                    ticker: row.get(0)?,
                    action: row.get(1)?,
                    price: row.get(2)?,
                    quantity: row.get(3)?,
                    timestamp_ms: row.get(4)?,
                    pnl: row.get(5)?,
                    commission: row.get(6)?,
                    reason: row.get(7)?,
                })
            })
            .map_err(|e| DatabaseError::QueryError(e.to_string()))?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| DatabaseError::QueryError(e.to_string()))
    }
}
