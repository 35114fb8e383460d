use serde::{Deserialize, Serialize};

/// The Hybrid Orchestrator's mode state machine (§4.5). `PAUSED` is
/// terminal for the session: only an explicit `resume()` returns to
/// `RESEARCH`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    Research,
    Trading,
    Paused,
}

impl Default for Mode {
    fn default() -> Self {
        Mode::Research
    }
}
