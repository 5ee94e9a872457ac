//! # Logging Utilities
//!
//! Logging infrastructure for sigsnap using `tracing`.
//!
//! Snapshot dumps go to the handler's configured output sink, never to
//! the logger; the logger carries the ambient diagnostics around them
//! (bindings installed, probes failed, scripts written).
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sigsnap_utils::init_logging;
//!
//! init_logging().expect("Failed to initialize logging");
//!
//! tracing::info!("handlers installed");
//! ```
//!
//! ## Environment Variables
//!
//! - `RUST_LOG`: Set log level filter (e.g., `RUST_LOG=debug`, `RUST_LOG=sigsnap_core=debug`)
//! - `SIGSNAP_LOG_FORMAT`: Set output format (`json` or `pretty`, default: `pretty`)
//! - `SIGSNAP_LOG_FILE`: Optional path to a log file (if not set, logs only to the console)
//!
//! When snapshot output shares stdout with the logger, the two can
//! interleave mid-dump. [`init_logging_to_file`] keeps the logger on a
//! file instead, leaving stdout to the dumps.

use std::path::PathBuf;
use std::str::FromStr;
use std::{env, io};

use chrono::Utc;
use thiserror::Error;
use tracing::Level;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::fmt::{self};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

/// Errors raised while installing the logging subscriber.
#[derive(Error, Debug)]
pub enum LoggingError
{
    /// The log file or its directory could not be prepared.
    #[error("Failed to prepare log file: {0}")]
    FileError(#[from] io::Error),

    /// A global subscriber is already installed.
    #[error("Failed to install subscriber: {0}")]
    InitError(String),
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat
{
    /// Pretty-printed, human-readable format (default for development)
    Pretty,
    /// JSON format (default for production)
    Json,
}

impl FromStr for LogFormat
{
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err>
    {
        match s.to_lowercase().as_str() {
            "pretty" | "dev" | "development" => Ok(LogFormat::Pretty),
            "json" | "prod" | "production" => Ok(LogFormat::Json),
            _ => Err(format!("Unknown log format: {s}. Use 'pretty' or 'json'")),
        }
    }
}

/// Log level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel
{
    /// Error level
    Error,
    /// Warning level
    Warn,
    /// Info level (default)
    Info,
    /// Debug level
    Debug,
    /// Trace level (most verbose)
    Trace,
}

impl From<LogLevel> for Level
{
    fn from(level: LogLevel) -> Self
    {
        match level {
            LogLevel::Error => Level::ERROR,
            LogLevel::Warn => Level::WARN,
            LogLevel::Info => Level::INFO,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Trace => Level::TRACE,
        }
    }
}

impl FromStr for LogLevel
{
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err>
    {
        match s.to_lowercase().as_str() {
            "error" | "err" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" | "dbg" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            _ => Err(format!(
                "Unknown log level: {s}. Use 'error', 'warn', 'info', 'debug', or 'trace'"
            )),
        }
    }
}

/// Initialize logging with default settings
///
/// Reads configuration from environment variables:
/// - `RUST_LOG`: Log level filter (e.g., `debug`, `sigsnap_core=debug`)
/// - `SIGSNAP_LOG_FORMAT`: Output format (`json` or `pretty`, default: `pretty`)
/// - `SIGSNAP_LOG_FILE`: Optional path to a log file
///
/// ## Errors
///
/// Returns an error if logging is already initialized or file logging
/// fails (if `SIGSNAP_LOG_FILE` is set).
pub fn init_logging() -> Result<(), LoggingError>
{
    let format = env::var("SIGSNAP_LOG_FORMAT")
        .ok()
        .and_then(|s| LogFormat::from_str(&s).ok())
        .unwrap_or(LogFormat::Pretty);

    let default_level = env::var("RUST_LOG")
        .unwrap_or_else(|_| "info".to_string())
        .parse::<LogLevel>()
        .map(Into::into)
        .unwrap_or(Level::INFO);

    init_logging_internal(format, default_level)
}

/// Initialize logging with explicit level and format
///
/// ## Errors
///
/// Returns an error if logging is already initialized or file logging fails.
pub fn init_logging_with_level(level: LogLevel, format: LogFormat) -> Result<(), LoggingError>
{
    init_logging_internal(format, level.into())
}

/// Initialize file-only logging, leaving stdout to snapshot output
///
/// Without a `path`, the log file is `~/.sigsnap/YYYY-MM-DD-sigsnap.log`
/// (or `/tmp/YYYY-MM-DD-sigsnap.log` when no home directory is
/// available). Returns the path actually used.
///
/// ## Errors
///
/// Returns an error if logging is already initialized or the file
/// cannot be created.
pub fn init_logging_to_file(path: Option<PathBuf>) -> Result<PathBuf, LoggingError>
{
    let log_file = match path {
        Some(path) => path,
        None => {
            let today = Utc::now().format("%Y-%m-%d");
            if let Ok(home) = env::var("HOME") {
                let sigsnap_dir = PathBuf::from(home).join(".sigsnap");
                std::fs::create_dir_all(&sigsnap_dir).map_err(LoggingError::FileError)?;
                sigsnap_dir.join(format!("{today}-sigsnap.log"))
            } else {
                PathBuf::from("/tmp").join(format!("{today}-sigsnap.log"))
            }
        }
    };

    let env_filter = if let Ok(rust_log) = env::var("RUST_LOG") {
        EnvFilter::try_new(&rust_log).unwrap_or_else(|_| EnvFilter::new(Level::INFO.to_string()))
    } else {
        EnvFilter::new(Level::INFO.to_string())
    };

    // The filename already carries the date, no rolling needed
    let file_appender = tracing_appender::rolling::never(
        log_file.parent().unwrap_or(&PathBuf::from(".")),
        log_file.file_name().unwrap_or_default(),
    );
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // Keep the guard alive for the process lifetime
    std::mem::forget(guard);

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .with_timer(ChronoUtc::rfc_3339())
        .with_ansi(false) // No ANSI in files
        .with_filter(env_filter);

    Registry::default()
        .with(file_layer)
        .try_init()
        .map_err(|e| LoggingError::InitError(e.to_string()))?;
    Ok(log_file)
}

/// Internal initialization function
fn init_logging_internal(format: LogFormat, default_level: Level) -> Result<(), LoggingError>
{
    // RUST_LOG can override the default level with more specific filters
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level.to_string()));

    let log_file = env::var("SIGSNAP_LOG_FILE").ok().map(PathBuf::from);

    match format {
        LogFormat::Pretty => {
            let console_layer = fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true)
                .with_timer(ChronoUtc::rfc_3339())
                .with_ansi(true)
                .with_writer(io::stderr)
                .with_filter(env_filter.clone());

            if let Some(file_path) = log_file {
                let file_layer = build_file_layer(&file_path, env_filter);
                Registry::default()
                    .with(console_layer)
                    .with(file_layer)
                    .try_init()
                    .map_err(|e| LoggingError::InitError(e.to_string()))?;
            } else {
                Registry::default()
                    .with(console_layer)
                    .try_init()
                    .map_err(|e| LoggingError::InitError(e.to_string()))?;
            }
        }
        LogFormat::Json => {
            let console_layer = fmt::layer()
                .json()
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true)
                .with_timer(ChronoUtc::rfc_3339())
                .with_current_span(true)
                .with_span_list(true)
                .with_writer(io::stderr)
                .with_filter(env_filter.clone());

            if let Some(file_path) = log_file {
                let file_layer = build_file_layer(&file_path, env_filter);
                Registry::default()
                    .with(console_layer)
                    .with(file_layer)
                    .try_init()
                    .map_err(|e| LoggingError::InitError(e.to_string()))?;
            } else {
                Registry::default()
                    .with(console_layer)
                    .try_init()
                    .map_err(|e| LoggingError::InitError(e.to_string()))?;
            }
        }
    }

    Ok(())
}

/// Daily-rolling plain-text file layer for `SIGSNAP_LOG_FILE`.
fn build_file_layer<S>(file_path: &std::path::Path, env_filter: EnvFilter) -> impl Layer<S>
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    let file_appender = tracing_appender::rolling::daily(
        file_path.parent().unwrap_or_else(|| std::path::Path::new(".")),
        file_path.file_name().unwrap_or_default(),
    );
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // Keep the guard alive for the process lifetime
    std::mem::forget(guard);

    fmt::layer()
        .with_writer(non_blocking)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .with_timer(ChronoUtc::rfc_3339())
        .with_ansi(false) // No ANSI in files
        .with_filter(env_filter)
}
