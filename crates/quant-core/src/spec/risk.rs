use crate::error::SpecError;
use serde::{Deserialize, Serialize};

/// Risk limits attached to a Strategy Spec (§3). Every value is a
/// fraction of entry price or capital, never absolute currency.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskParameters {
    pub max_position_size: f64,
    pub stop_loss: f64,
    pub take_profit: f64,
    pub max_daily_loss: f64,
    pub max_drawdown: f64,
    pub use_dynamic_sizing: bool,
    pub risk_per_trade: f64,
}

impl RiskParameters {
    pub fn validate(&self) -> Result<(), SpecError> {
        let in_unit = |name: &'static str, v: f64| -> Result<(), SpecError> {
            range_check(name, v, 0.0, 1.0)
        };
        in_unit("max_position_size", self.max_position_size)?;
        in_unit("stop_loss", self.stop_loss)?;
        in_unit("take_profit", self.take_profit)?;
        in_unit("max_daily_loss", self.max_daily_loss)?;
        in_unit("max_drawdown", self.max_drawdown)?;
        range_check("risk_per_trade", self.risk_per_trade, 0.0, 0.1)?;
        Ok(())
    }
}

fn range_check(name: &'static str, value: f64, lo: f64, hi: f64) -> Result<(), SpecError> {
    if value < lo || value > hi {
        return Err(SpecError::RiskParamOutOfRange {
            name,
            lo,
            hi,
            value,
        });
    }
    Ok(())
}
