//! ## Sets up logging by reading configuration from environment variables.
//!
//! Environment variables used:
//! - LOG_MODE: "stdout" (default) or "file"
//! - LOG_LEVEL: log level ("trace", "debug", "info", "warn", "error"); default is "info"
//! - LOG_FILE_PATH: when using file mode, the path of the log file (default "logs/relayer.log")

use chrono::{NaiveDate, Utc};
use log::info;
use simplelog::{Config, LevelFilter, SimpleLogger, WriteLogger};
use std::{
    env,
    fs::{create_dir_all, File},
    path::Path,
};
use thiserror::Error;

use crate::constants::{DEFAULT_LOG_FILE_PATH, DEFAULT_LOG_LEVEL, DEFAULT_LOG_MODE};

#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("Unable to create log file {path}: {source}")]
    LogFile {
        path: String,
        source: std::io::Error,
    },
    #[error("Logger already initialized: {0}")]
    AlreadyInitialized(#[from] log::SetLoggerError),
}

pub fn parse_level_filter(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "info" => LevelFilter::Info,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        _ => LevelFilter::Info,
    }
}

/// Appends the date to the base path, replacing a trailing `.log`.
pub fn rolled_file_path(base_file_path: &str, date: NaiveDate) -> String {
    let date_str = date.format("%Y-%m-%d");
    match base_file_path.strip_suffix(".log") {
        Some(trimmed) => format!("{trimmed}-{date_str}.log"),
        None => format!("{base_file_path}-{date_str}.log"),
    }
}

pub fn setup_logging() -> Result<(), LoggingError> {
    let log_mode = env::var("LOG_MODE").unwrap_or_else(|_| DEFAULT_LOG_MODE.to_string());
    let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string());
    let level_filter = parse_level_filter(&log_level);

    if log_mode.eq_ignore_ascii_case("file") {
        let base_file_path =
            env::var("LOG_FILE_PATH").unwrap_or_else(|_| DEFAULT_LOG_FILE_PATH.to_string());
        let rolled = rolled_file_path(&base_file_path, Utc::now().date_naive());

        let to_log_file_error = |source| LoggingError::LogFile {
            path: rolled.clone(),
            source,
        };
        if let Some(parent) = Path::new(&rolled).parent() {
            create_dir_all(parent).map_err(to_log_file_error)?;
        }
        let log_file = File::create(&rolled).map_err(to_log_file_error)?;

        WriteLogger::init(level_filter, Config::default(), log_file)?;
    } else {
        SimpleLogger::init(level_filter, Config::default())?;
    }

    info!("Logging is successfully configured (mode: {})", log_mode);
    Ok(())
}
