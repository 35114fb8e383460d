use super::data_requirements::DataRequirements;
use super::risk::RiskParameters;
use super::signal::Signal;
use crate::error::SpecError;
use quant_data::Timeframe;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A compiled, loadable trading strategy (§3). The Orchestrator owns
/// the only live copy per ticker; the execution engine holds a
/// reference keyed by ticker and never mutates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategySpec {
    pub id: String,
    pub ticker: String,
    pub timeframe: Timeframe,
    pub data_requirements: DataRequirements,
    pub signals: Vec<Signal>,
    pub risk_params: RiskParameters,
    pub compiled_at: i64,
    pub expires_at: i64,
    pub source_query: String,
}

impl StrategySpec {
    /// Validates §3's invariants and compiles every signal's
    /// condition, sorting signals by priority descending as the data
    /// model requires. Consumes and returns `self` so a caller can't
    /// hold a half-validated Spec.
    pub fn compile(mut self) -> Result<Self, SpecError> {
        if self.signals.is_empty() {
            return Err(SpecError::EmptySignals);
        }

        let mut seen_ids = HashSet::new();
        for signal in &self.signals {
            if !seen_ids.insert(signal.id.clone()) {
                return Err(SpecError::DuplicateSignalId(signal.id.clone()));
            }
        }

        self.data_requirements.validate()?;
        self.risk_params.validate()?;

        for signal in &mut self.signals {
            signal.compile()?;
        }

        self.signals.sort_by(|a, b| b.priority.cmp(&a.priority));
        Ok(self)
    }

    pub fn is_expired(&self, now_ms: i64) -> bool {
        now_ms > self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::signal::Action;
    use std::collections::HashSet as Set;

    fn base_spec(signals: Vec<Signal>) -> StrategySpec {
        StrategySpec {
            id: "spec-1".into(),
            ticker: "AAPL".into(),
            timeframe: Timeframe::OneDay,
            data_requirements: DataRequirements {
                indicators: Set::from([crate::indicators::IndicatorField::Sma20]),
                lookback: 20,
                min_data_points: 21,
            },
            signals,
            risk_params: RiskParameters {
                max_position_size: 0.25,
                stop_loss: 0.02,
                take_profit: 0.05,
                max_daily_loss: 0.03,
                max_drawdown: 0.2,
                use_dynamic_sizing: false,
                risk_per_trade: 0.01,
            },
            compiled_at: 0,
            expires_at: 1_000,
            source_query: "buy oversold AAPL".into(),
        }
    }

    #[test]
    fn sorts_signals_by_priority_descending() {
        let signals = vec![
            Signal::new("low", "RSI < 30", Action::Buy, 0.1, 0.5, "r", 1),
            Signal::new("high", "RSI < 20", Action::Buy, 0.1, 0.5, "r", 10),
        ];
        let spec = base_spec(signals).compile().unwrap();
        assert_eq!(spec.signals[0].id, "high");
        assert_eq!(spec.signals[1].id, "low");
    }

    #[test]
    fn rejects_empty_signals() {
        let spec = base_spec(vec![]);
        assert!(matches!(spec.compile(), Err(SpecError::EmptySignals)));
    }

    #[test]
    fn rejects_duplicate_signal_ids() {
        let signals = vec![
            Signal::new("dup", "RSI < 30", Action::Buy, 0.1, 0.5, "r", 1),
            Signal::new("dup", "RSI < 20", Action::Buy, 0.1, 0.5, "r", 2),
        ];
        let spec = base_spec(signals);
        assert!(matches!(
            spec.compile(),
            Err(SpecError::DuplicateSignalId(_))
        ));
    }

    #[test]
    fn rejects_invalid_condition() {
        let signals = vec![Signal::new(
            "s1",
            "process.exit()",
            Action::Buy,
            0.1,
            0.5,
            "r",
            1,
        )];
        let spec = base_spec(signals);
        assert!(matches!(spec.compile(), Err(SpecError::InvalidCondition(_))));
    }

    #[test]
    fn expiry_is_strictly_after_expires_at() {
        let spec = base_spec(vec![Signal::new(
            "s1", "RSI < 30", Action::Buy, 0.1, 0.5, "r", 1,
        )])
        .compile()
        .unwrap();
        assert!(!spec.is_expired(1_000));
        assert!(spec.is_expired(1_001));
    }
}
