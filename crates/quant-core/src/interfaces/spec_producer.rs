use crate::error::SpecError;
use crate::spec::StrategySpec;

/// The slow-path LLM strategy compiler, abstracted to a single
/// synchronous call (§6.1). Kept synchronous rather than `async_trait`
/// so the orchestrator's refresh loop can drive it with
/// `tokio::task::spawn_blocking` without pulling in a dependency the
/// rest of this stack doesn't otherwise need.
pub trait SpecProducer: Send + Sync {
    fn compile_strategy(&self, query: &str) -> Result<StrategySpec, SpecError>;
}

/// A producer returning a fixed Spec regardless of query, for tests
/// and for driving the orchestrator without a live LLM backend.
pub struct StaticSpecProducer {
    spec: StrategySpec,
}

impl StaticSpecProducer {
    pub fn new(spec: StrategySpec) -> Self {
        Self { spec }
    }
}

impl SpecProducer for StaticSpecProducer {
    fn compile_strategy(&self, _query: &str) -> Result<StrategySpec, SpecError> {
        Ok(self.spec.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::{Action, DataRequirements, RiskParameters, Signal};
    use quant_data::Timeframe;
    use std::collections::HashSet;

    fn spec() -> StrategySpec {
        StrategySpec {
            id: "s".into(),
            ticker: "AAPL".into(),
            timeframe: Timeframe::OneDay,
            data_requirements: DataRequirements {
                indicators: HashSet::new(),
                lookback: 5,
                min_data_points: 2,
            },
            signals: vec![Signal::new("buy", "close < 100", Action::Buy, 0.1, 0.5, "r", 1)],
            risk_params: RiskParameters {
                max_position_size: 1.0,
                stop_loss: 0.02,
                take_profit: 0.05,
                max_daily_loss: 0.1,
                max_drawdown: 0.2,
                use_dynamic_sizing: false,
                risk_per_trade: 0.01,
            },
            compiled_at: 0,
            expires_at: i64::MAX,
            source_query: "q".into(),
        }
        .compile()
        .unwrap()
    }

    #[test]
    fn returns_the_same_spec_for_any_query() {
        let producer = StaticSpecProducer::new(spec());
        let a = producer.compile_strategy("buy the dip").unwrap();
        let b = producer.compile_strategy("anything else").unwrap();
        assert_eq!(a, b);
    }
}
