//! Strategy Spec data model and validation (§3, C2's consumer).

pub mod data_requirements;
pub mod risk;
pub mod signal;
pub mod strategy_spec;

pub use data_requirements::DataRequirements;
pub use risk::RiskParameters;
pub use signal::{Action, Signal};
pub use strategy_spec::StrategySpec;
