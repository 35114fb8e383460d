use crate::condition::EvalOutcome;
use crate::error::{EngineError, RiskRejection};
use crate::indicators::IndicatorEngine;
use crate::position::{Position, PositionBook, Side};
use crate::spec::{Action, StrategySpec};
use quant_data::Bar;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Instant;
use tracing::{debug, warn};

/// A signal disabled after three consecutive runtime errors (§4.2).
#[derive(Debug, Default)]
struct SignalRuntime {
    consecutive_errors: u32,
    disabled: bool,
}

/// The decision a fired, risk-gate-accepted signal produces (§3).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeDecision {
    pub action: Action,
    pub ticker: String,
    pub position_size: f64,
    pub entry_price: f64,
    pub stop_loss: f64,
    pub take_profit: f64,
    pub confidence: f64,
    pub reasoning: String,
    pub signal_id: String,
    pub latency_ns: u64,
    pub timestamp_ms: i64,
}

/// The deterministic fast-path execution engine (§4.3, C4). Stateless
/// w.r.t. Specs — loaded and unloaded explicitly — but stateful w.r.t.
/// bar history, positions, and per-signal error counters.
pub struct ExecutionEngine {
    specs: HashMap<String, StrategySpec>,
    indicators: IndicatorEngine,
    positions: PositionBook,
    signal_runtime: HashMap<String, SignalRuntime>,
    daily_pnl_fraction: HashMap<String, f64>,
    max_latency_ms: f64,
}

impl ExecutionEngine {
    pub fn new(max_latency_ms: f64) -> Self {
        Self {
            specs: HashMap::new(),
            indicators: IndicatorEngine::new(),
            positions: PositionBook::new(),
            signal_runtime: HashMap::new(),
            daily_pnl_fraction: HashMap::new(),
            max_latency_ms,
        }
    }

    pub fn load(&mut self, spec: StrategySpec) {
        self.indicators
            .ensure_ticker(&spec.ticker, spec.data_requirements.lookback);
        self.specs.insert(spec.ticker.clone(), spec);
    }

    pub fn unload(&mut self, ticker: &str) {
        self.specs.remove(ticker);
        self.indicators.reset(Some(ticker));
        self.positions.close(ticker);
    }

    pub fn record_daily_pnl_fraction(&mut self, ticker: &str, fraction: f64) {
        self.daily_pnl_fraction.insert(ticker.to_string(), fraction);
    }

    pub fn positions(&self) -> &PositionBook {
        &self.positions
    }

    /// The decision loop described in §4.3: lookup, enrich, evaluate
    /// signals in priority order, apply risk gates, emit at most one
    /// decision. Never raises across this boundary — see §7's
    /// propagation policy.
    pub fn on_bar(&mut self, ticker: &str, bar: &Bar, now_ms: i64) -> Result<Option<TradeDecision>, EngineError> {
        let start = Instant::now();

        let Some(spec) = self.specs.get(ticker) else {
            return Ok(None);
        };
        if spec.is_expired(now_ms) {
            return Ok(None);
        }
        let spec = spec.clone();

        let requested = spec.data_requirements.indicators.clone();
        let Some(enriched) = self.indicators.enrich(ticker, bar, &requested) else {
            return Ok(None);
        };
        if self.indicators.ring_len(ticker) < spec.data_requirements.min_data_points {
            return Ok(None);
        }

        let bindings = enriched.as_bindings();
        let daily_pnl_fraction = self.daily_pnl_fraction.get(ticker).copied().unwrap_or(0.0);

        for signal in &spec.signals {
            let runtime = self.signal_runtime.entry(signal.id.clone()).or_default();
            if runtime.disabled {
                continue;
            }

            let Some(compiled) = signal.compiled() else {
                return Err(EngineError::Invariant(format!(
                    "signal {} reached on_bar uncompiled",
                    signal.id
                )));
            };

            match compiled.evaluate(&bindings) {
                EvalOutcome::RuntimeError => {
                    runtime.consecutive_errors += 1;
                    if runtime.consecutive_errors >= 3 {
                        runtime.disabled = true;
                        warn!(signal_id = %signal.id, "disabling signal after 3 consecutive runtime errors");
                    }
                    continue;
                }
                EvalOutcome::False => {
                    runtime.consecutive_errors = 0;
                    continue;
                }
                EvalOutcome::True => {
                    runtime.consecutive_errors = 0;
                }
            }

            if let Err(rejection) = self.check_risk_gates(&spec, signal, daily_pnl_fraction) {
                debug!(signal_id = %signal.id, ?rejection, "signal rejected by risk gate");
                continue;
            }

            let decision = self.build_decision(&spec, signal, bar, start, now_ms);
            if signal.action == Action::Buy {
                self.positions.open(Position {
                    ticker: ticker.to_string(),
                    side: Side::Long,
                    entry_price: decision.entry_price,
                    quantity: signal.position_size,
                    entry_ts: now_ms,
                    stop_loss_price: decision.stop_loss,
                    take_profit_price: decision.take_profit,
                });
            } else if signal.action == Action::Sell {
                self.positions.close(ticker);
            }

            let latency_ms = start.elapsed().as_secs_f64() * 1_000.0;
            if latency_ms > self.max_latency_ms {
                warn!(ticker, latency_ms, "on_bar exceeded max_latency_ms");
            }
            return Ok(Some(decision));
        }

        Ok(None)
    }

    fn check_risk_gates(
        &self,
        spec: &StrategySpec,
        signal: &crate::spec::Signal,
        daily_pnl_fraction: f64,
    ) -> Result<(), RiskRejection> {
        if signal.action == Action::Hold {
            return Ok(());
        }
        if signal.position_size > spec.risk_params.max_position_size {
            return Err(RiskRejection::PositionSizeExceeded);
        }
        if daily_pnl_fraction < -spec.risk_params.max_daily_loss {
            return Err(RiskRejection::DailyLossLimit);
        }
        if signal.action == Action::Buy && self.positions.is_open(&spec.ticker) {
            return Err(RiskRejection::PositionAlreadyOpen);
        }
        Ok(())
    }

    fn build_decision(
        &self,
        spec: &StrategySpec,
        signal: &crate::spec::Signal,
        bar: &Bar,
        start: Instant,
        now_ms: i64,
    ) -> TradeDecision {
        TradeDecision {
            action: signal.action,
            ticker: spec.ticker.clone(),
            position_size: signal.position_size,
            entry_price: bar.close,
            stop_loss: bar.close * (1.0 - spec.risk_params.stop_loss),
            take_profit: bar.close * (1.0 + spec.risk_params.take_profit),
            confidence: signal.confidence,
            reasoning: signal.reasoning.clone(),
            signal_id: signal.id.clone(),
            latency_ns: start.elapsed().as_nanos() as u64,
            timestamp_ms: now_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::{DataRequirements, RiskParameters, Signal};
    use quant_data::Timeframe;
    use std::collections::HashSet;

    fn spec_with(signals: Vec<Signal>) -> StrategySpec {
        StrategySpec {
            id: "spec-1".into(),
            ticker: "AAPL".into(),
            timeframe: Timeframe::OneDay,
            data_requirements: DataRequirements {
                indicators: HashSet::from([crate::indicators::IndicatorField::Sma20]),
                lookback: 20,
                min_data_points: 3,
            },
            signals,
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
            source_query: "test".into(),
        }
    }

    fn bar(ts: i64, close: f64) -> Bar {
        Bar::try_new("AAPL", Timeframe::OneDay, ts, close, close + 1.0, close - 1.0, close, 1_000.0).unwrap()
    }

    #[test]
    fn emits_buy_once_condition_and_history_satisfied() {
        let spec = spec_with(vec![Signal::new(
            "buy-low", "close < 50", Action::Buy, 0.1, 0.8, "dip", 10,
        )])
        .compile()
        .unwrap();

        let mut engine = ExecutionEngine::new(1_000.0);
        engine.load(spec);

        let mut last = None;
        for i in 0..5 {
            last = engine.on_bar("AAPL", &bar(i, 10.0), i).unwrap();
        }
        assert!(last.is_some());
        assert_eq!(last.unwrap().action, Action::Buy);
    }

    #[test]
    fn no_pyramiding_rejects_second_buy() {
        let spec = spec_with(vec![Signal::new(
            "buy-low", "close < 50", Action::Buy, 0.1, 0.8, "dip", 10,
        )])
        .compile()
        .unwrap();

        let mut engine = ExecutionEngine::new(1_000.0);
        engine.load(spec);

        for i in 0..5 {
            engine.on_bar("AAPL", &bar(i, 10.0), i).unwrap();
        }
        assert!(engine.positions().is_open("AAPL"));
        let second = engine.on_bar("AAPL", &bar(5, 10.0), 5).unwrap();
        assert!(second.is_none());
    }

    #[test]
    fn unknown_ticker_returns_none() {
        let mut engine = ExecutionEngine::new(1_000.0);
        let result = engine.on_bar("MSFT", &bar(0, 10.0), 0).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn expired_spec_returns_none() {
        let mut spec = spec_with(vec![Signal::new(
            "buy-low", "close < 50", Action::Buy, 0.1, 0.8, "dip", 10,
        )])
        .compile()
        .unwrap();
        spec.expires_at = 0;
        let mut engine = ExecutionEngine::new(1_000.0);
        engine.load(spec);
        let result = engine.on_bar("AAPL", &bar(0, 10.0), 100).unwrap();
        assert!(result.is_none());
    }
}
