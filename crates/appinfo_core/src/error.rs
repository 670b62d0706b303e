//! Error types for App Info.
//!
//! These errors stay inside the crate's platform layer and startup code.
//! The `AppInfo` facade converts every one of them into a display string.

use thiserror::Error;

/// Main error type for App Info.
#[derive(Debug, Error)]
pub enum AppInfoError {
    /// Package metadata could not be read.
    #[error("Package error: {message}")]
    Package {
        /// Human-readable error message.
        message: String,
        /// Optional underlying error source.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A process or OS lookup failed.
    #[error("Environment error: {message}")]
    Environment {
        /// Human-readable error message.
        message: String,
    },

    /// File system error.
    #[error("I/O error: {message}")]
    Io {
        /// Human-readable error message.
        message: String,
        /// Underlying error source.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration value could not be parsed.
    #[error("Config error: {message}")]
    Config {
        /// Human-readable error message.
        message: String,
    },

    /// Window creation or management error.
    #[error("Window error: {message}")]
    Window {
        /// Human-readable error message.
        message: String,
    },
}

impl AppInfoError {
    // ========== Constructors ==========

    /// Create a new package error.
    pub fn package(message: impl Into<String>) -> Self {
        Self::Package { message: message.into(), source: None }
    }

    /// Create a new package error with source.
    pub fn package_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Package { message: message.into(), source: Some(Box::new(source)) }
    }

    /// Create a new environment error.
    pub fn environment(message: impl Into<String>) -> Self {
        Self::Environment { message: message.into() }
    }

    /// Create a new config error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config { message: message.into() }
    }

    /// Create a new window error.
    pub fn window(message: impl Into<String>) -> Self {
        Self::Window { message: message.into() }
    }

    // ========== Methods ==========

    /// Get the error category name.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Package { .. } => "Package",
            Self::Environment { .. } => "Environment",
            Self::Io { .. } => "I/O",
            Self::Config { .. } => "Config",
            Self::Window { .. } => "Window",
        }
    }
}

/// Convert from std::io::Error to AppInfoError.
impl From<std::io::Error> for AppInfoError {
    fn from(err: std::io::Error) -> Self {
        AppInfoError::Io { message: err.to_string(), source: Some(Box::new(err)) }
    }
}
