use super::error::Result;
use rusqlite::Connection;

const EVENTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS events (
    id TEXT PRIMARY KEY,
    ts INTEGER NOT NULL,
    level TEXT NOT NULL,
    kind TEXT NOT NULL,
    message TEXT NOT NULL
)"#;

const EVENTS_TS_INDEX: &str = "CREATE INDEX IF NOT EXISTS idx_events_ts ON events(ts)";

const TRADES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS trades (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    ticker TEXT NOT NULL,
    action TEXT NOT NULL,
    price REAL NOT NULL,
    quantity REAL NOT NULL,
    timestamp_ms INTEGER NOT NULL,
    pnl REAL,
    commission REAL NOT NULL,
    reason TEXT NOT NULL
)"#;

const TRADES_TICKER_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_trades_ticker ON trades(ticker)";

pub fn initialize_schema(conn: &Connection) -> Result<()> {
    conn.execute(EVENTS_TABLE, [])?;
    conn.execute(EVENTS_TS_INDEX, [])?;
    conn.execute(TRADES_TABLE, [])?;
    conn.execute(TRADES_TICKER_INDEX, [])?;
    Ok(())
}
