//! Stand-in for the out-of-scope LLM strategy compiler (§1 Non-goals,
//! §6.1). [`KeywordSpecProducer`] builds one canonical oversold-RSI
//! strategy per query, varying only the ticker it extracts from the
//! query text — enough to drive the research/backtest/gate pipeline
//! end to end without an actual model in the loop.

use quant_core::error::SpecError;
use quant_core::interfaces::SpecProducer;
use quant_core::spec::{Action, DataRequirements, RiskParameters, Signal, StrategySpec};
use quant_core::indicators::IndicatorField;
use quant_data::Timeframe;
use std::collections::HashSet;

pub struct KeywordSpecProducer {
    now_ms: i64,
    spec_lifetime_ms: i64,
}

impl KeywordSpecProducer {
    pub fn new(now_ms: i64, spec_lifetime_ms: i64) -> Self {
        Self {
            now_ms,
            spec_lifetime_ms,
        }
    }

    fn extract_ticker(query: &str) -> String {
        query
            .split_whitespace()
            .find(|tok| tok.len() >= 2 && tok.len() <= 5 && tok.chars().all(|c| c.is_ascii_uppercase()))
            .unwrap_or("AAPL")
            .to_string()
    }
}

impl SpecProducer for KeywordSpecProducer {
    fn compile_strategy(&self, query: &str) -> Result<StrategySpec, SpecError> {
        let ticker = Self::extract_ticker(query);
        let indicators = HashSet::from([IndicatorField::Rsi, IndicatorField::Sma20]);

        StrategySpec {
            id: format!("{ticker}-oversold-rsi"),
            ticker,
            timeframe: Timeframe::OneDay,
            data_requirements: DataRequirements {
                indicators,
                lookback: 20,
                min_data_points: 21,
            },
            signals: vec![
                Signal::new(
                    "buy-oversold",
                    "RSI < 30 && close > SMA_20",
                    Action::Buy,
                    0.10,
                    0.7,
                    "RSI oversold while price holds above its 20-period average",
                    10,
                ),
                Signal::new(
                    "sell-overbought",
                    "RSI > 70",
                    Action::Sell,
                    0.10,
                    0.6,
                    "RSI overbought, take profit",
                    5,
                ),
            ],
            risk_params: RiskParameters {
                max_position_size: 0.25,
                stop_loss: 0.02,
                take_profit: 0.05,
                max_daily_loss: 0.03,
                max_drawdown: 0.2,
                use_dynamic_sizing: false,
                risk_per_trade: 0.01,
            },
            compiled_at: self.now_ms,
            expires_at: self.now_ms + self.spec_lifetime_ms,
            source_query: query.to_string(),
        }
        .compile()
    }
}
