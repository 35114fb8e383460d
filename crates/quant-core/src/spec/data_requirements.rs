use crate::error::SpecError;
use crate::indicators::IndicatorField;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Indicators whose warm-up consumes a price *delta* (a difference
/// between consecutive bars) rather than a plain window average —
/// these need one bar more than their period to produce a first value.
const DELTA_INDICATORS: &[IndicatorField] = &[IndicatorField::Rsi, IndicatorField::Macd, IndicatorField::Atr];

/// What history a Strategy Spec needs before its signals can fire
/// (§3). `lookback` bounds the indicator engine's bar ring;
/// `min_data_points` gates whether the engine will even attempt to
/// evaluate signals (§4.3 step 3).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataRequirements {
    pub indicators: HashSet<IndicatorField>,
    pub lookback: usize,
    pub min_data_points: usize,
}

impl DataRequirements {
    pub fn validate(&self) -> Result<(), SpecError> {
        let max_period = IndicatorField::max_period(&self.indicators);
        if self.lookback < max_period {
            return Err(SpecError::LookbackTooShort {
                lookback: self.lookback,
                max_period,
            });
        }
        let needs_delta = DELTA_INDICATORS.iter().any(|d| self.indicators.contains(d));
        let required = if needs_delta { max_period + 1 } else { max_period };
        if self.min_data_points < required {
            return Err(SpecError::MinDataPointsTooLow {
                min_data_points: self.min_data_points,
                required,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn indicators(fields: &[IndicatorField]) -> HashSet<IndicatorField> {
        fields.iter().copied().collect()
    }

    #[test]
    fn accepts_sufficient_lookback() {
        let req = DataRequirements {
            indicators: indicators(&[IndicatorField::Sma20]),
            lookback: 20,
            min_data_points: 21,
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn non_delta_indicator_does_not_need_the_extra_bar() {
        let req = DataRequirements {
            indicators: indicators(&[IndicatorField::Sma20]),
            lookback: 20,
            min_data_points: 20,
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn delta_indicator_still_needs_the_extra_bar() {
        let req = DataRequirements {
            indicators: indicators(&[IndicatorField::Rsi]),
            lookback: 15,
            min_data_points: 15,
        };
        assert!(matches!(
            req.validate(),
            Err(SpecError::MinDataPointsTooLow { .. })
        ));
    }

    #[test]
    fn rejects_lookback_shorter_than_max_period() {
        let req = DataRequirements {
            indicators: indicators(&[IndicatorField::Sma200]),
            lookback: 50,
            min_data_points: 201,
        };
        assert!(matches!(
            req.validate(),
            Err(SpecError::LookbackTooShort { .. })
        ));
    }

    #[test]
    fn rejects_min_data_points_too_low() {
        let req = DataRequirements {
            indicators: indicators(&[IndicatorField::Rsi]),
            lookback: 15,
            min_data_points: 10,
        };
        assert!(matches!(
            req.validate(),
            Err(SpecError::MinDataPointsTooLow { .. })
        ));
    }
}
