//! Fast deterministic execution engine, backtester, and orchestrator
//! for hybrid LLM-compiled trading strategies.
//!
//! This crate never calls out to an LLM itself — it consumes
//! [`spec::StrategySpec`] values produced by an external
//! [`interfaces::SpecProducer`] and runs them deterministically.

pub mod backtest;
pub mod condition;
pub mod diagnostics;
pub mod engine;
pub mod error;
pub mod indicators;
pub mod interfaces;
pub mod orchestrator;
pub mod position;
pub mod spec;

pub use backtest::{BacktestEngine, BacktestResult};
pub use engine::{ExecutionEngine, TradeDecision};
pub use indicators::{EnrichedBar, IndicatorEngine};
pub use orchestrator::{Mode, Orchestrator};
pub use spec::StrategySpec;
