//! Structured error type shared by every chartlab component.
//!
//! Errors are raised at the call that detects them. There are no partial
//! results: an operation either returns a complete value or one of these.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChartError {
    /// Bad span, empty series, missing column, or inconsistent MACD/layout request.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Operation requested out of order on a stateful context.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// Input data that cannot be interpreted (timestamps, ordering).
    #[error("malformed input: {0}")]
    MalformedInput(String),

    #[error("not implemented: {0}")]
    NotImplemented(&'static str),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ChartError {
    pub(crate) fn invalid_parameter(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }

    pub(crate) fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedInput(msg.into())
    }

    /// Prefix the message with the input row it came from.
    pub(crate) fn at_row(self, source: &str, row: usize) -> Self {
        match self {
            Self::InvalidParameter(msg) => Self::InvalidParameter(format!("{source} row {row}: {msg}")),
            Self::MalformedInput(msg) => Self::MalformedInput(format!("{source} row {row}: {msg}")),
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, ChartError>;
