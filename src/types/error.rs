//! Error types for the velocity limits engine
//!
//! This module separates two very different outcomes:
//!
//! - [`VelocityError`]: a fault in the batch driver (missing file, I/O failure,
//!   malformed request line). Processing stops at the first one.
//! - [`Rejection`]: the reason a well-formed load was declined by a limit.
//!   This is a normal business outcome and never aborts processing.

use thiserror::Error;

/// Errors raised while reading, parsing or writing load requests
#[derive(Debug, Clone, PartialEq, Error)]
pub enum VelocityError {
    /// Input file not found at the specified path
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// I/O error occurred while reading or writing
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// A request line is not a valid JSON load request
    #[error("Parse error at line {line}: {message}")]
    ParseError {
        /// 1-based line number in the input
        line: u64,
        /// Description of the parsing error
        message: String,
    },

    /// The `load_amount` field is not a non-negative monetary value
    #[error("Invalid load amount '{amount}' at line {line}")]
    InvalidAmount {
        /// 1-based line number in the input
        line: u64,
        /// The raw amount string
        amount: String,
    },

    /// The `time` field is not an RFC 3339 timestamp
    #[error("Invalid time '{time}' at line {line}")]
    InvalidTime {
        /// 1-based line number in the input
        line: u64,
        /// The raw time string
        time: String,
    },

    /// The async runtime could not be started or a worker task failed
    #[error("Runtime error: {message}")]
    RuntimeError {
        /// Description of the failure
        message: String,
    },
}

impl From<std::io::Error> for VelocityError {
    fn from(error: std::io::Error) -> Self {
        VelocityError::IoError {
            message: error.to_string(),
        }
    }
}

// Conversion from the async line codec's error to VelocityError
impl From<tokio_util::codec::LinesCodecError> for VelocityError {
    fn from(error: tokio_util::codec::LinesCodecError) -> Self {
        VelocityError::IoError {
            message: error.to_string(),
        }
    }
}

impl VelocityError {
    /// Create a FileNotFound error
    pub fn file_not_found(path: &std::path::Path) -> Self {
        VelocityError::FileNotFound {
            path: path.display().to_string(),
        }
    }

    /// Create a ParseError
    pub fn parse(line: u64, message: impl Into<String>) -> Self {
        VelocityError::ParseError {
            line,
            message: message.into(),
        }
    }

    /// Create an error for an input line that could not be read
    ///
    /// Bytes that do not decode as UTF-8 make the line malformed, so they are
    /// reported as a parse error on that line.
    pub fn unreadable_line(line: u64, error: std::io::Error) -> Self {
        match error.kind() {
            std::io::ErrorKind::InvalidData => {
                VelocityError::parse(line, "line is not valid UTF-8")
            }
            _ => VelocityError::from(error),
        }
    }

    /// Create an InvalidAmount error
    pub fn invalid_amount(line: u64, amount: &str) -> Self {
        VelocityError::InvalidAmount {
            line,
            amount: amount.to_string(),
        }
    }

    /// Create an InvalidTime error
    pub fn invalid_time(line: u64, time: &str) -> Self {
        VelocityError::InvalidTime {
            line,
            time: time.to_string(),
        }
    }

    /// Create a RuntimeError
    pub fn runtime(message: impl Into<String>) -> Self {
        VelocityError::RuntimeError {
            message: message.into(),
        }
    }
}

/// Reason a load was declined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
    /// The amount exceeds what is left of the daily budget
    #[error("daily budget exceeded")]
    DailyBudgetExceeded,

    /// No loads are left for the current day
    #[error("daily transaction count exceeded")]
    DailyCountExceeded,

    /// The amount exceeds what is left of the weekly budget
    #[error("weekly budget exceeded")]
    WeeklyBudgetExceeded,
}
