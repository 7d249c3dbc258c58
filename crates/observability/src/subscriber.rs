//! Tracing/logging initialization.
//!
//! Three layers share one registry:
//! - JSON to stdout, filtered by `RUST_LOG` (default `info`)
//! - plain text appended to `general.log`, info and above
//! - plain text appended to `errors.log`, errors only

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use thiserror::Error;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

use crate::LogFiles;

#[derive(Debug, Error)]
pub enum ObservabilityError {
    #[error("failed to prepare log file {path}: {source}")]
    LogFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Clone)]
pub struct LogConfig {
    pub log_dir: PathBuf,
    /// Fallback directive when `RUST_LOG` is unset.
    pub default_filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from("logs"),
            default_filter: "info".to_string(),
        }
    }
}

fn open_append(path: &Path) -> Result<File, ObservabilityError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| ObservabilityError::LogFile {
            path: path.to_path_buf(),
            source,
        })
}

/// Initialize tracing for the process and return the log file handle.
///
/// Safe to call multiple times; once a global subscriber is installed later
/// calls only ensure the files exist.
pub fn init(config: &LogConfig) -> Result<LogFiles, ObservabilityError> {
    fs::create_dir_all(&config.log_dir).map_err(|source| ObservabilityError::LogFile {
        path: config.log_dir.clone(),
        source,
    })?;
    let files = LogFiles::in_dir(&config.log_dir);

    let general = open_append(files.general_path())?;
    let errors = open_append(files.errors_path())?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.default_filter));

    let stdout = fmt::layer()
        .json()
        .with_timer(fmt::time::SystemTime)
        .with_target(false)
        .with_filter(filter);

    let general = fmt::layer()
        .with_writer(Mutex::new(general))
        .with_ansi(false)
        .with_target(false)
        .with_filter(LevelFilter::INFO);

    let errors = fmt::layer()
        .with_writer(Mutex::new(errors))
        .with_ansi(false)
        .with_target(false)
        .with_filter(LevelFilter::ERROR);

    let _ = tracing_subscriber::registry()
        .with(stdout)
        .with(general)
        .with(errors)
        .try_init();

    Ok(files)
}
