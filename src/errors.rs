/// Domain-specific error types for the risk-curve engine.
///
/// The numerical core never fails: non-positive spot or strike values
/// propagate as NaN. Only boundary work (grid construction, trade
/// resolution, config, snapshot loading) returns these.
#[derive(Debug, thiserror::Error)]
pub enum RiskError {
    #[error("invalid price grid: {0}")]
    InvalidGrid(String),

    #[error("invalid trade: {0}")]
    InvalidTrade(String),

    #[error("unknown view type: {0}")]
    UnknownView(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("snapshot error: {0}")]
    Snapshot(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("io error: {0}")]
    Io(String),
}

impl From<serde_json::Error> for RiskError {
    fn from(e: serde_json::Error) -> Self {
        RiskError::Parse(e.to_string())
    }
}

pub type RiskResult<T> = Result<T, RiskError>;
