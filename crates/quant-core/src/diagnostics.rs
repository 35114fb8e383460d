use crate::spec::{Action, StrategySpec};
use serde::{Deserialize, Serialize};

/// Why a backtest produced zero trades (§4.6, C7). Produced only when
/// `total_trades == 0`; never runs otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Diagnosis {
    InsufficientHistory { bars_count: usize },
    NoBuySignals,
    OverRestrictiveConditions { signal_ids: Vec<String> },
    LookbackTooLong { lookback: usize, bars_count: usize },
    Untriggered,
}

impl Diagnosis {
    pub fn suggestion(&self) -> String {
        match self {
            Diagnosis::InsufficientHistory { bars_count } => {
                format!("only {bars_count} bars available; fetch a longer history range")
            }
            Diagnosis::NoBuySignals => "spec has no BUY-action signals; add at least one entry signal".to_string(),
            Diagnosis::OverRestrictiveConditions { signal_ids } => format!(
                "signals {} look over-restrictive; relax thresholds or drop a conjunctive term",
                signal_ids.join(", ")
            ),
            Diagnosis::LookbackTooLong { lookback, bars_count } => format!(
                "lookback {lookback} is more than half of the {bars_count} available bars; shorten it or fetch more history"
            ),
            Diagnosis::Untriggered => {
                "conditions never fired; try a wider history range, relaxed thresholds, or a trend-following signal".to_string()
            }
        }
    }
}

/// Counts distinct indicator identifiers referenced in a condition
/// string and conjunctive (`&&`) terms, the over-restrictiveness
/// heuristic from §4.6.
fn condition_complexity(condition: &str) -> (usize, usize) {
    let conjunctive_terms = condition.matches("&&").count() + 1;
    let distinct_indicators: std::collections::HashSet<&str> = condition
        .split(|c: char| !c.is_alphanumeric() && c != '_')
        .filter(|tok| !tok.is_empty() && tok.chars().next().unwrap().is_alphabetic())
        .filter(|tok| !tok.chars().all(|c| c.is_ascii_digit()))
        .collect();
    (conjunctive_terms, distinct_indicators.len())
}

/// Diagnoses a zero-trade backtest per §4.6's four categories, falling
/// back to `Untriggered` when none of them apply.
pub fn diagnose(spec: &StrategySpec, bars_count: usize) -> Diagnosis {
    if bars_count < 100 {
        return Diagnosis::InsufficientHistory { bars_count };
    }

    if !spec.signals.iter().any(|s| s.action == Action::Buy) {
        return Diagnosis::NoBuySignals;
    }

    let over_restrictive: Vec<String> = spec
        .signals
        .iter()
        .filter(|s| {
            let (terms, indicators) = condition_complexity(&s.condition);
            terms >= 3 || indicators >= 4
        })
        .map(|s| s.id.clone())
        .collect();
    if !over_restrictive.is_empty() {
        return Diagnosis::OverRestrictiveConditions {
            signal_ids: over_restrictive,
        };
    }

    if spec.data_requirements.lookback > bars_count / 2 {
        return Diagnosis::LookbackTooLong {
            lookback: spec.data_requirements.lookback,
            bars_count,
        };
    }

    Diagnosis::Untriggered
}
