use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventLevel {
    Info,
    Ok,
    Warn,
    Error,
}

impl fmt::Display for EventLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EventLevel::Info => "info",
            EventLevel::Ok => "ok",
            EventLevel::Warn => "warn",
            EventLevel::Error => "error",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    Mode,
    Gate,
    Drift,
    Redline,
    Trade,
    System,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EventKind::Mode => "mode",
            EventKind::Gate => "gate",
            EventKind::Drift => "drift",
            EventKind::Redline => "redline",
            EventKind::Trade => "trade",
            EventKind::System => "system",
        };
        write!(f, "{s}")
    }
}

/// One entry in the orchestrator's observability stream (§6.4). The
/// SQLite-backed `events` table is the authoritative audit log; this
/// type is what gets written there and broadcast to any live listener.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiEvent {
    pub id: String,
    pub ts: i64,
    pub level: EventLevel,
    pub kind: EventKind,
    pub message: String,
}

impl UiEvent {
    pub fn new(id: impl Into<String>, ts: i64, level: EventLevel, kind: EventKind, message: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ts,
            level,
            kind,
            message: message.into(),
        }
    }
}
