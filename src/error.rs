use std::io;
use thiserror::Error;

/// Custom error type for the batbench application
#[derive(Error, Debug)]
pub enum BatbenchError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Sample error: {0}")]
    Sample(String),

    #[error("Chart error: {0}")]
    Chart(String),

    #[error("Service control error: {0}")]
    Service(String),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for the batbench application
pub type Result<T> = std::result::Result<T, BatbenchError>;

impl BatbenchError {
    /// Create a sample error (status command failure or malformed output)
    pub fn sample<S: Into<String>>(msg: S) -> Self {
        BatbenchError::Sample(msg.into())
    }

    /// Create a chart rendering error
    pub fn chart<S: Into<String>>(msg: S) -> Self {
        BatbenchError::Chart(msg.into())
    }

    /// Create a service control error
    pub fn service<S: Into<String>>(msg: S) -> Self {
        BatbenchError::Service(msg.into())
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        BatbenchError::Other(msg.into())
    }
}
