//! Error type for backend-facing operations.
//!
//! Geometry, scrolling and text layout never fail: degenerate inputs are clamped.
//! Only the terminal backend (and logging setup) can surface an error.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TuiError {
    #[error("terminal I/O failed while {operation}: {source}")]
    Io {
        operation: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to query terminal size: {source}")]
    TerminalQuery {
        #[source]
        source: std::io::Error,
    },

    #[error("terminal backend is not supported on this platform: {0}")]
    Unsupported(&'static str),

    #[error("failed to open log file {path}: {source}")]
    LogFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid log filter '{filter}': {message}")]
    LogFilter { filter: String, message: String },

    #[error("a global tracing subscriber is already installed")]
    LoggingAlreadyInitialized,
}

impl TuiError {
    pub(crate) fn io(operation: &'static str, source: std::io::Error) -> Self {
        Self::Io { operation, source }
    }
}

pub type Result<T> = std::result::Result<T, TuiError>;
