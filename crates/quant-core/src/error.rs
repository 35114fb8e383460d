use thiserror::Error;

/// A Strategy Spec failed schema validation or one of §3's invariants.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SpecError {
    #[error("signal id {0:?} is not unique within the spec")]
    DuplicateSignalId(String),

    #[error("spec has no signals")]
    EmptySignals,

    #[error("risk parameter {name} must be in [{lo}, {hi}], got {value}")]
    RiskParamOutOfRange {
        name: &'static str,
        lo: f64,
        hi: f64,
        value: f64,
    },

    #[error("lookback {lookback} is smaller than the max indicator period {max_period}")]
    LookbackTooShort { lookback: usize, max_period: usize },

    #[error("min_data_points {min_data_points} is smaller than required {required}")]
    MinDataPointsTooLow {
        min_data_points: usize,
        required: usize,
    },

    #[error("condition failed to compile: {0}")]
    InvalidCondition(#[from] ConditionError),
}

/// A condition expression (§4.2) failed to compile.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConditionError {
    #[error("character {0:?} is not allowed in a condition expression")]
    IllegalCharacter(char),

    #[error("token {0:?} is not allowed in a condition expression")]
    DeniedIdentifier(String),

    #[error("unexpected end of expression")]
    UnexpectedEof,

    #[error("unexpected token {0:?}")]
    UnexpectedToken(String),

    #[error("unbalanced parentheses")]
    UnbalancedParens,
}

/// Errors surfaced by the fast execution engine (§4.3, §7).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("an invariant the engine relies on was violated: {0}")]
    Invariant(String),

    #[error(transparent)]
    Spec(#[from] SpecError),
}

/// Risk-gate rejection reasons (§4.3). These are not failures of the
/// engine — they are an expected, logged outcome when a signal fires
/// but trading it would violate a constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskRejection {
    DailyLossLimit,
    PositionAlreadyOpen,
    PositionSizeExceeded,
}

impl std::fmt::Display for RiskRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            RiskRejection::DailyLossLimit => "DailyLossLimit",
            RiskRejection::PositionAlreadyOpen => "PositionAlreadyOpen",
            RiskRejection::PositionSizeExceeded => "PositionSizeExceeded",
        };
        write!(f, "{s}")
    }
}

/// External I/O failure fetching historical bars (§6.2, §7). Retried
/// by the orchestrator's range escalation; fatal only once every range
/// has been exhausted.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("failed to fetch historical data: {0}")]
pub struct DataFetchError(pub String);
