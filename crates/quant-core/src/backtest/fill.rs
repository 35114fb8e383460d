/// Slippage/commission parameters for the fill model (§4.4).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FillModel {
    pub slippage: f64,
    pub commission_rate: f64,
}

impl FillModel {
    pub fn buy_price(&self, close: f64) -> f64 {
        close * (1.0 + self.slippage)
    }

    pub fn sell_price(&self, close: f64) -> f64 {
        close * (1.0 - self.slippage)
    }

    pub fn commission(&self, notional: f64) -> f64 {
        notional * self.commission_rate
    }
}
