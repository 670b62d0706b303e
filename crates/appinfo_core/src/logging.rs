//! Structured logging setup with console and file output.
//!
//! Application diagnostics and telemetry records share one subscriber but
//! go to separate sinks:
//! - `appinfo.<date>.log`: diagnostics, filtered by APPINFO_LOG or RUST_LOG
//! - `telemetry.<date>.log`: only the `telemetry` target, one record per line
//!
//! When attached to a terminal everything goes to stdout instead. If the
//! log directory cannot be used, logging falls back to console only.

use std::path::PathBuf;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::filter::Targets;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

use crate::config::AppConfig;
use crate::telemetry::TELEMETRY_TARGET;

const LOG_FILE_PREFIX: &str = "appinfo";
const TELEMETRY_FILE_PREFIX: &str = "telemetry";

/// Logging configuration.
pub struct LogConfig {
    /// Directory for log files
    pub log_dir: PathBuf,
    /// Whether stdout is a terminal
    pub is_pty: bool,
    /// Optional custom log filter
    pub log_filter: Option<String>,
}

impl LogConfig {
    /// Create a new logging configuration.
    pub fn new(log_dir: PathBuf) -> Self {
        Self { log_dir, is_pty: atty::is(atty::Stream::Stdout), log_filter: None }
    }

    /// Derive logging configuration from the application configuration.
    pub fn from_app_config(config: &AppConfig) -> Self {
        let mut log_config = Self::new(config.log_dir());
        log_config.log_filter = config.log_filter.clone();
        log_config
    }

    /// Set custom log filter.
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = Some(filter.into());
        self
    }
}

/// Guard that must be held for the lifetime of the application.
///
/// Dropping this guard flushes pending log and telemetry entries.
pub struct LoggingGuard {
    _worker_guards: Vec<WorkerGuard>,
}

/// Initialize logging with the given configuration.
pub fn init_logging(config: LogConfig) -> LoggingGuard {
    if config.is_pty {
        return init_stdout_logging(config.log_filter.as_deref());
    }

    match init_file_logging(&config) {
        Ok(guards) => LoggingGuard { _worker_guards: guards },
        Err(e) => {
            eprintln!("Warning: Failed to initialize file logging: {}. Using console only.", e);
            init_stdout_logging(config.log_filter.as_deref())
        }
    }
}

/// Initialize stdout-only logging, telemetry records included.
fn init_stdout_logging(filter: Option<&str>) -> LoggingGuard {
    let env_filter = with_telemetry_directive(build_env_filter(filter), "info");

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_ansi(true)
        .with_target(false)
        .with_thread_ids(false)
        .init();

    LoggingGuard { _worker_guards: Vec::new() }
}

/// Initialize diagnostics (stdout + file) and the telemetry file sink.
fn init_file_logging(config: &LogConfig) -> Result<Vec<WorkerGuard>, Box<dyn std::error::Error>> {
    std::fs::create_dir_all(&config.log_dir)?;

    let (log_writer, log_guard) =
        tracing_appender::non_blocking(daily_appender(&config.log_dir, LOG_FILE_PREFIX)?);
    let (telemetry_writer, telemetry_guard) =
        tracing_appender::non_blocking(daily_appender(&config.log_dir, TELEMETRY_FILE_PREFIX)?);

    let stdout = std::io::stdout.with_max_level(Level::INFO);
    let diagnostics = fmt::layer()
        .with_writer(stdout.and(log_writer))
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_filter(diagnostics_filter(config.log_filter.as_deref()));

    let telemetry = fmt::layer()
        .with_writer(telemetry_writer)
        .with_ansi(false)
        .with_target(false)
        .with_level(false)
        .with_filter(telemetry_filter());

    tracing_subscriber::registry().with(diagnostics).with(telemetry).try_init()?;

    Ok(vec![log_guard, telemetry_guard])
}

fn daily_appender(
    dir: &std::path::Path,
    prefix: &str,
) -> Result<RollingFileAppender, tracing_appender::rolling::InitError> {
    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(prefix)
        .filename_suffix("log")
        .build(dir)
}

/// Diagnostics filter; telemetry records are kept out of the application log.
fn diagnostics_filter(custom_filter: Option<&str>) -> EnvFilter {
    with_telemetry_directive(build_env_filter(custom_filter), "off")
}

/// Filter for the telemetry sink: the telemetry target only.
fn telemetry_filter() -> Targets {
    Targets::new().with_target(TELEMETRY_TARGET, Level::INFO)
}

fn with_telemetry_directive(filter: EnvFilter, level: &str) -> EnvFilter {
    match format!("{TELEMETRY_TARGET}={level}").parse() {
        Ok(directive) => filter.add_directive(directive),
        Err(_) => filter,
    }
}

/// Build the environment filter from config or defaults.
fn build_env_filter(custom_filter: Option<&str>) -> EnvFilter {
    // Priority: custom filter > APPINFO_LOG > RUST_LOG > default
    if let Some(filter) = custom_filter {
        return EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new(default_log_filter()));
    }

    EnvFilter::try_from_env("APPINFO_LOG")
        .or_else(|_| EnvFilter::try_from_env("RUST_LOG"))
        .unwrap_or_else(|_| EnvFilter::new(default_log_filter()))
}

/// Get the default log filter based on build type.
pub fn default_log_filter() -> &'static str {
    #[cfg(debug_assertions)]
    {
        "debug,appinfo=trace,appinfo_core=trace,appinfo_ui=debug"
    }
    #[cfg(not(debug_assertions))]
    {
        "info,appinfo=info,appinfo_core=info,appinfo_ui=info"
    }
}
