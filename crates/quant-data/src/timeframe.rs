use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The five timeframes a Strategy Spec may declare. Maps 1:1 to a
/// provider-side interval string via [`Timeframe::provider_interval`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timeframe {
    OneMin,
    FiveMin,
    FifteenMin,
    OneHour,
    OneDay,
}

impl Timeframe {
    pub fn duration_ms(&self) -> i64 {
        match self {
            Timeframe::OneMin => 60_000,
            Timeframe::FiveMin => 300_000,
            Timeframe::FifteenMin => 900_000,
            Timeframe::OneHour => 3_600_000,
            Timeframe::OneDay => 86_400_000,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Timeframe::OneMin => "1min",
            Timeframe::FiveMin => "5min",
            Timeframe::FifteenMin => "15min",
            Timeframe::OneHour => "1hour",
            Timeframe::OneDay => "1day",
        }
    }

    /// The Yahoo-style `interval` query parameter for this timeframe
    /// (spec §6.2's timeframe mapping table).
    pub fn provider_interval(&self) -> &'static str {
        match self {
            Timeframe::OneMin => "1m",
            Timeframe::FiveMin => "5m",
            Timeframe::FifteenMin => "15m",
            Timeframe::OneHour => "60m",
            Timeframe::OneDay => "1d",
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Timeframe {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "1min" | "1m" => Ok(Timeframe::OneMin),
            "5min" | "5m" => Ok(Timeframe::FiveMin),
            "15min" | "15m" => Ok(Timeframe::FifteenMin),
            "1hour" | "1h" | "60m" => Ok(Timeframe::OneHour),
            "1day" | "1d" => Ok(Timeframe::OneDay),
            _ => Err(format!("invalid timeframe: {s}")),
        }
    }
}
