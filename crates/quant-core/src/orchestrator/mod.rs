//! Hybrid Orchestrator (§4.5, C6): the RESEARCH/TRADING/PAUSED mode
//! state machine and the three gates that drive it.

pub mod events;
pub mod gates;
pub mod mode;
pub mod refresh;

pub use events::{EventKind, EventLevel, UiEvent};
pub use gates::{Gate1Thresholds, Gate2Thresholds};
pub use mode::Mode;
pub use refresh::{RefreshCoordinator, HISTORY_RANGE_ESCALATION};

use crate::backtest::{Metrics, Trade};
use tokio::sync::broadcast;

/// Owns one ticker's mode state machine. The background refresh task
/// (§4.5) and the live trade feed both call into this; both are
/// expected to run on the same executor as the rest of the
/// orchestrator, never concurrently with each other for one ticker.
pub struct Orchestrator {
    ticker: String,
    mode: Mode,
    gate1: Gate1Thresholds,
    gate2: Gate2Thresholds,
    consecutive_losses: u32,
    session_pnl_fraction: f64,
    max_daily_loss: f64,
    events: broadcast::Sender<UiEvent>,
    next_event_id: u64,
}

impl Orchestrator {
    pub fn new(
        ticker: impl Into<String>,
        gate1: Gate1Thresholds,
        gate2: Gate2Thresholds,
        max_daily_loss: f64,
    ) -> Self {
        let (events, _) = broadcast::channel(256);
        Self {
            ticker: ticker.into(),
            mode: Mode::Research,
            gate1,
            gate2,
            consecutive_losses: 0,
            session_pnl_fraction: 0.0,
            max_daily_loss,
            events,
            next_event_id: 0,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn subscribe(&self) -> broadcast::Receiver<UiEvent> {
        self.events.subscribe()
    }

    fn emit(&mut self, ts: i64, level: EventLevel, kind: EventKind, message: impl Into<String>) {
        let id = format!("{}-{}", self.ticker, self.next_event_id);
        self.next_event_id += 1;
        let _ = self.events.send(UiEvent::new(id, ts, level, kind, message));
    }

    /// Gate #1: evaluated once, after a freshly-compiled Spec's
    /// backtest. Moves RESEARCH -> TRADING on pass; stays in RESEARCH
    /// and fires a diagnostic event on failure.
    pub fn evaluate_gate1(&mut self, metrics: &Metrics, now_ms: i64) -> bool {
        let passed = self.gate1.evaluate(metrics);
        if passed {
            self.mode = Mode::Trading;
            self.emit(now_ms, EventLevel::Ok, EventKind::Gate, "gate #1 passed, entering TRADING");
            self.emit(now_ms, EventLevel::Info, EventKind::Mode, "RESEARCH -> TRADING");
        } else {
            self.emit(
                now_ms,
                EventLevel::Warn,
                EventKind::Gate,
                format!(
                    "gate #1 failed: trades={} dd={:.2} return={:.2}",
                    metrics.total_trades, metrics.max_drawdown, metrics.total_return_pct
                ),
            );
        }
        passed
    }

    /// Feeds one closing trade into gates #2 and #3 while TRADING.
    /// Does nothing outside TRADING — gates only apply to live trading.
    pub fn feed_trade(&mut self, trade: &Trade, now_ms: i64) {
        if self.mode != Mode::Trading {
            return;
        }
        let Some(pnl) = trade.pnl else { return };

        if pnl < 0.0 {
            self.consecutive_losses += 1;
        } else {
            self.consecutive_losses = 0;
        }

        if self.consecutive_losses >= self.gate2.max_consecutive_losses {
            self.mode = Mode::Research;
            self.emit(
                now_ms,
                EventLevel::Warn,
                EventKind::Drift,
                format!("{} consecutive losses, reverting to RESEARCH", self.consecutive_losses),
            );
            self.consecutive_losses = 0;
            return;
        }

        self.session_pnl_fraction += pnl / trade.price.max(1.0) / trade.quantity.max(1.0);
        if self.session_pnl_fraction <= -self.max_daily_loss {
            self.mode = Mode::Paused;
            self.emit(
                now_ms,
                EventLevel::Error,
                EventKind::Redline,
                format!("session pnl {:.4} breached max_daily_loss, PAUSED", self.session_pnl_fraction),
            );
        }
    }

    /// Explicit resume from PAUSED back to RESEARCH. PAUSED is
    /// otherwise terminal for the session (§4.5).
    pub fn resume(&mut self, now_ms: i64) {
        if self.mode == Mode::Paused {
            self.mode = Mode::Research;
            self.session_pnl_fraction = 0.0;
            self.emit(now_ms, EventLevel::Info, EventKind::Mode, "PAUSED -> RESEARCH (resume)");
        }
    }
}
