//! Error types for urlgate

use thiserror::Error;

/// urlgate error type
#[derive(Error, Debug)]
pub enum GateError {
    /// URL is missing a scheme or host and cannot be classified
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// Training called with empty or mismatched data
    #[error("invalid training input: {0}")]
    InvalidInput(String),

    /// Prediction requested before the model was trained or loaded
    #[error("model not trained")]
    NotTrained,

    /// Persisted model artifact failed to parse or validate
    #[error("corrupt model: {0}")]
    CorruptModel(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for urlgate
pub type GateResult<T> = Result<T, GateError>;
