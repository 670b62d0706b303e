//! Application configuration read from the process environment.
//!
//! Recognised variables:
//! - `APPINFO_DATA_DIR`: directory for logs (defaults per OS and build type)
//! - `APPINFO_TELEMETRY`: `0`, `false`, `off` or `no` disables telemetry
//! - `APPINFO_THEME`: `light` or `dark`
//!
//! Log filtering (`APPINFO_LOG`, `RUST_LOG`) is handled by [`crate::logging`].

use std::path::PathBuf;

use crate::error::AppInfoError;

const DATA_DIR_VAR: &str = "APPINFO_DATA_DIR";
const TELEMETRY_VAR: &str = "APPINFO_TELEMETRY";
const THEME_VAR: &str = "APPINFO_THEME";

/// Preferred window theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemePreference {
    /// Dark palette.
    #[default]
    Dark,
    /// Light palette.
    Light,
}

/// Resolved application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Application data directory (logs live under `logs/`).
    pub data_dir: PathBuf,
    /// Whether telemetry events are recorded.
    pub telemetry_enabled: bool,
    /// Optional explicit log filter, overriding environment variables.
    pub log_filter: Option<String>,
    /// Window theme.
    pub theme: ThemePreference,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            telemetry_enabled: true,
            log_filter: None,
            theme: ThemePreference::default(),
        }
    }
}

impl AppConfig {
    /// Build configuration from environment variables.
    ///
    /// Invalid values are logged and replaced by their defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(dir) = lookup(DATA_DIR_VAR).filter(|d| !d.trim().is_empty()) {
            config.data_dir = PathBuf::from(dir);
        }

        if let Some(value) = lookup(TELEMETRY_VAR) {
            match parse_bool(&value) {
                Ok(enabled) => config.telemetry_enabled = enabled,
                Err(e) => tracing::warn!(error = %e, "Ignoring {TELEMETRY_VAR}"),
            }
        }

        if let Some(value) = lookup(THEME_VAR) {
            match parse_theme(&value) {
                Ok(theme) => config.theme = theme,
                Err(e) => tracing::warn!(error = %e, "Ignoring {THEME_VAR}"),
            }
        }

        config
    }

    /// Set custom log filter.
    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = Some(filter.into());
        self
    }

    /// Directory for log files.
    pub fn log_dir(&self) -> PathBuf {
        self.data_dir.join("logs")
    }
}

#[cfg(feature = "gpui")]
impl gpui::Global for AppConfig {}

/// Parse a boolean switch value.
pub fn parse_bool(value: &str) -> Result<bool, AppInfoError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Ok(true),
        "0" | "false" | "off" | "no" => Ok(false),
        other => Err(AppInfoError::config(format!("expected a boolean, got '{other}'"))),
    }
}

/// Parse a theme name.
pub fn parse_theme(value: &str) -> Result<ThemePreference, AppInfoError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "dark" => Ok(ThemePreference::Dark),
        "light" => Ok(ThemePreference::Light),
        other => Err(AppInfoError::config(format!("unknown theme '{other}'"))),
    }
}

/// Get the default data directory based on OS and build type.
pub fn default_data_dir() -> PathBuf {
    #[cfg(debug_assertions)]
    {
        PathBuf::from("./appinfo_data")
    }

    #[cfg(not(debug_assertions))]
    {
        dirs::data_dir()
            .map(|d| {
                #[cfg(target_os = "macos")]
                {
                    d.join("dev.appinfo.AppInfo")
                }
                #[cfg(target_os = "windows")]
                {
                    d.join("appinfo").join("AppInfo")
                }
                #[cfg(not(any(target_os = "macos", target_os = "windows")))]
                {
                    d.join("appinfo")
                }
            })
            .unwrap_or_else(|| PathBuf::from("./appinfo_data"))
    }
}
