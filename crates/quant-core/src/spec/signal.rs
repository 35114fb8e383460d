use crate::condition::CompiledCondition;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The trade action a firing signal proposes (§3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Buy,
    Sell,
    Hold,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Action::Buy => "BUY",
            Action::Sell => "SELL",
            Action::Hold => "HOLD",
        };
        write!(f, "{s}")
    }
}

/// One entry in a Strategy Spec's signal list (§3). `condition` is
/// kept as both the source string (for serialization and logging) and
/// a compiled, cached predicate — compiled exactly once, at Spec load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Signal {
    pub id: String,
    pub condition: String,
    pub action: Action,
    pub position_size: f64,
    pub confidence: f64,
    pub reasoning: String,
    pub priority: i32,

    #[serde(skip)]
    compiled: Option<CompiledCondition>,
}

impl Signal {
    pub fn new(
        id: impl Into<String>,
        condition: impl Into<String>,
        action: Action,
        position_size: f64,
        confidence: f64,
        reasoning: impl Into<String>,
        priority: i32,
    ) -> Self {
        Self {
            id: id.into(),
            condition: condition.into(),
            action,
            position_size,
            confidence,
            reasoning: reasoning.into(),
            priority,
            compiled: None,
        }
    }

    /// Compiles `condition` and caches the result, per §4.2's
    /// "compiled once per signal when a Spec is loaded" contract.
    pub fn compile(&mut self) -> Result<(), crate::error::ConditionError> {
        self.compiled = Some(CompiledCondition::compile(&self.condition)?);
        Ok(())
    }

    pub fn compiled(&self) -> Option<&CompiledCondition> {
        self.compiled.as_ref()
    }
}

impl PartialEq for Signal {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.condition == other.condition
            && self.action == other.action
            && self.position_size == other.position_size
            && self.confidence == other.confidence
            && self.reasoning == other.reasoning
            && self.priority == other.priority
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compiles_condition_on_demand() {
        let mut signal = Signal::new("s1", "RSI < 30", Action::Buy, 0.1, 0.8, "oversold", 10);
        assert!(signal.compiled().is_none());
        signal.compile().unwrap();
        assert!(signal.compiled().is_some());
    }

    #[test]
    fn invalid_condition_fails_compile() {
        let mut signal = Signal::new("s1", "process.exit()", Action::Buy, 0.1, 0.8, "bad", 10);
        assert!(signal.compile().is_err());
    }
}
