use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Symbolic indicator names a Strategy Spec can request in its
/// [`crate::spec::DataRequirements`]. Closed enumeration rather than an
/// open string, per spec's tagged-variant design note — free-form
/// strings only appear at the serialization boundary via `FromStr`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IndicatorField {
    Sma20,
    Sma50,
    Sma200,
    Ema12,
    Ema26,
    Rsi,
    Macd,
    BollingerBands,
    Atr,
    VolumeAvg,
}

impl IndicatorField {
    pub fn all() -> &'static [IndicatorField] {
        &[
            IndicatorField::Sma20,
            IndicatorField::Sma50,
            IndicatorField::Sma200,
            IndicatorField::Ema12,
            IndicatorField::Ema26,
            IndicatorField::Rsi,
            IndicatorField::Macd,
            IndicatorField::BollingerBands,
            IndicatorField::Atr,
            IndicatorField::VolumeAvg,
        ]
    }

    /// The number of bars this indicator needs before it produces a
    /// value — used to validate `DataRequirements.lookback` (§3).
    pub fn period(&self) -> usize {
        match self {
            IndicatorField::Sma20 => 20,
            IndicatorField::Sma50 => 50,
            IndicatorField::Sma200 => 200,
            IndicatorField::Ema12 => 12,
            IndicatorField::Ema26 => 26,
            IndicatorField::Rsi => 15,          // period + 1
            IndicatorField::Macd => 26 + 9 - 1, // slow + signal - 1
            IndicatorField::BollingerBands => 20,
            IndicatorField::Atr => 15, // period + 1
            IndicatorField::VolumeAvg => 20,
        }
    }

    pub fn max_period(fields: &HashSet<IndicatorField>) -> usize {
        fields.iter().map(IndicatorField::period).max().unwrap_or(0)
    }
}

impl fmt::Display for IndicatorField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            IndicatorField::Sma20 => "SMA_20",
            IndicatorField::Sma50 => "SMA_50",
            IndicatorField::Sma200 => "SMA_200",
            IndicatorField::Ema12 => "EMA_12",
            IndicatorField::Ema26 => "EMA_26",
            IndicatorField::Rsi => "RSI",
            IndicatorField::Macd => "MACD",
            IndicatorField::BollingerBands => "BB",
            IndicatorField::Atr => "ATR",
            IndicatorField::VolumeAvg => "VOLUME_AVG",
        };
        write!(f, "{s}")
    }
}

impl FromStr for IndicatorField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "SMA_20" | "SMA20" => Ok(IndicatorField::Sma20),
            "SMA_50" | "SMA50" => Ok(IndicatorField::Sma50),
            "SMA_200" | "SMA200" => Ok(IndicatorField::Sma200),
            "EMA_12" | "EMA12" => Ok(IndicatorField::Ema12),
            "EMA_26" | "EMA26" => Ok(IndicatorField::Ema26),
            "RSI" => Ok(IndicatorField::Rsi),
            "MACD" => Ok(IndicatorField::Macd),
            "BB" | "BOLLINGER" | "BOLLINGER_BANDS" => Ok(IndicatorField::BollingerBands),
            "ATR" => Ok(IndicatorField::Atr),
            "VOLUME_AVG" | "VOLUME_AVERAGE" => Ok(IndicatorField::VolumeAvg),
            other => Err(format!("unknown indicator field: {other}")),
        }
    }
}

/// A `Bar` augmented with indicator values computed up to and
/// including that bar. Fields are absent (never a zero sentinel) when
/// insufficient history exists or the field wasn't requested (§4.1
/// failure semantics).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichedBar {
    pub ticker: String,
    pub timestamp_ms: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,

    pub sma_20: Option<f64>,
    pub sma_50: Option<f64>,
    pub sma_200: Option<f64>,
    pub ema_12: Option<f64>,
    pub ema_26: Option<f64>,
    pub rsi: Option<f64>,
    pub macd: Option<f64>,
    pub macd_signal: Option<f64>,
    pub macd_histogram: Option<f64>,
    pub bb_upper: Option<f64>,
    pub bb_middle: Option<f64>,
    pub bb_lower: Option<f64>,
    pub atr: Option<f64>,
    pub volume_avg: Option<f64>,
    pub volume_ratio: Option<f64>,
}

impl EnrichedBar {
    /// Builds a view of this bar's fields as a flat map, the shape the
    /// condition evaluator (§4.2) binds identifiers against. Absent
    /// indicator fields are simply not inserted — the evaluator treats
    /// a missing identifier as a neutral value, never a sentinel.
    pub fn as_bindings(&self) -> std::collections::HashMap<&'static str, f64> {
        let mut map = std::collections::HashMap::new();
        map.insert("open", self.open);
        map.insert("high", self.high);
        map.insert("low", self.low);
        map.insert("close", self.close);
        map.insert("price", self.close);
        map.insert("volume", self.volume);
        map.insert("timestamp", self.timestamp_ms as f64);

        let mut insert = |key: &'static str, value: Option<f64>| {
            if let Some(v) = value {
                map.insert(key, v);
            }
        };
        insert("SMA_20", self.sma_20);
        insert("SMA_50", self.sma_50);
        insert("SMA_200", self.sma_200);
        insert("EMA_12", self.ema_12);
        insert("EMA_26", self.ema_26);
        insert("RSI", self.rsi);
        insert("MACD", self.macd);
        insert("MACD_signal", self.macd_signal);
        insert("MACD_histogram", self.macd_histogram);
        insert("BB_upper", self.bb_upper);
        insert("BB_middle", self.bb_middle);
        insert("BB_lower", self.bb_lower);
        insert("ATR", self.atr);
        insert("volume_avg", self.volume_avg);
        insert("volume_ratio", self.volume_ratio);
        map
    }
}
