//! Debug logging sink.
//!
//! The terminal owns stdout, so log output only goes to the file named by
//! `SLATE_TUI_LOG`. Without it no subscriber is installed and the `tracing`
//! macros across the crate are no-ops.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::EnvConfig;
use crate::error::{Result, TuiError};

/// Install a file-backed `tracing` subscriber. Returns `Ok(false)` when no log
/// path is configured.
pub fn init(config: &EnvConfig) -> Result<bool> {
    let Some(path) = config.log_path.as_deref() else {
        return Ok(false);
    };

    let filter = build_filter(config)?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| TuiError::LogFile {
            path: PathBuf::from(path),
            source,
        })?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|_| TuiError::LoggingAlreadyInitialized)?;

    tracing::info!(path, filter = %config.log_filter, "logging initialized");
    Ok(true)
}

fn filter_directive(config: &EnvConfig) -> &str {
    if config.debug && config.log_filter == crate::config::DEFAULT_LOG_FILTER {
        "debug"
    } else {
        config.log_filter.as_str()
    }
}

fn build_filter(config: &EnvConfig) -> Result<EnvFilter> {
    let directive = filter_directive(config);
    EnvFilter::try_new(directive).map_err(|err| TuiError::LogFilter {
        filter: directive.to_string(),
        message: err.to_string(),
    })
}
