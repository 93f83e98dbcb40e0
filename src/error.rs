use std::io;
use thiserror::Error;

/// Error type shared by every probe in the suite.
#[derive(Error, Debug)]
pub enum CheckError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid threshold '{0}': expected one of N, :N, N:M or :N:")]
    InvalidThresholdFormat(String),

    #[error("invalid numeric value '{0}'")]
    InvalidNumericValue(String),

    #[error("invalid severity '{0}': expected one of OK, WARNING, CRITICAL, UNKNOWN")]
    InvalidSeverity(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("{url} timed out after {seconds} seconds")]
    Timeout { url: String, seconds: u64 },

    #[error("connection refused {0}")]
    ConnectionRefused(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type alias used across the crate.
pub type Result<T> = std::result::Result<T, CheckError>;

impl CheckError {
    /// Create an invalid threshold format error
    pub fn invalid_threshold<S: Into<String>>(spec: S) -> Self {
        CheckError::InvalidThresholdFormat(spec.into())
    }

    /// Create an invalid numeric value error
    pub fn invalid_numeric<S: Into<String>>(value: S) -> Self {
        CheckError::InvalidNumericValue(value.into())
    }

    /// Create an invalid severity error
    pub fn invalid_severity<S: Into<String>>(name: S) -> Self {
        CheckError::InvalidSeverity(name.into())
    }

    /// Create an invalid argument error
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        CheckError::InvalidArgument(msg.into())
    }

    /// Create a timeout error
    pub fn timeout<S: Into<String>>(url: S, seconds: u64) -> Self {
        CheckError::Timeout {
            url: url.into(),
            seconds,
        }
    }

    /// Create a connection refused error
    pub fn connection_refused<S: Into<String>>(url: S) -> Self {
        CheckError::ConnectionRefused(url.into())
    }
}
