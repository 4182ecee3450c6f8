//! Structured logging.
//!
//! The terminal belongs to the TUI, so events are only written when a log
//! file is requested, either explicitly or through `TYPER_LOG`.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::app_dirs::AppDirs;
use crate::error::{Result, TyperError};

pub const LOG_ENV: &str = "TYPER_LOG";

/// Picks the log file: an explicit path wins, otherwise `TYPER_LOG` enables
/// logging to its value, or to the default state dir when it is empty.
pub fn resolve_log_path(explicit: Option<&Path>, env_value: Option<&str>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    match env_value {
        Some(value) if !value.trim().is_empty() && Path::new(value).extension().is_some() => {
            Some(PathBuf::from(value))
        }
        Some(_) => AppDirs::log_path(),
        None => None,
    }
}

/// Installs a file-backed subscriber. Does nothing when `path` is `None`.
pub fn init(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };

    let io_err = |source: std::io::Error| TyperError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(io_err)?;

    let filter = EnvFilter::try_from_env("RUST_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|err| TyperError::Logging(err.to_string()))
}
