//! Core types and utilities for the App Info desktop application.
//!
//! This crate holds everything that does not depend on the UI toolkit:
//!
//! - **error**: Error type for platform and configuration failures
//! - **config**: Environment-driven application configuration
//! - **logging**: Structured logging setup
//! - **telemetry**: Page view and event tracking capability
//! - **environment**: Per-platform packaging and runtime queries
//! - **facade**: Display-ready strings with fallbacks (`AppInfo`)
//! - **controller**: Info panel state and rendering through a view trait

pub mod config;
pub mod controller;
pub mod environment;
pub mod error;
pub mod facade;
pub mod logging;
pub mod telemetry;

pub use config::{AppConfig, ThemePreference};
pub use controller::{InfoField, InfoPanelController, InfoView, ToggleState};
pub use environment::{
    system_environment, EnvironmentQuery, PackageKind, PackageMetadata, RuntimeDescriptor,
};
pub use error::AppInfoError;
pub use facade::{AppInfo, FALLBACK_NOT_PACKAGED};
pub use telemetry::{NoopTelemetry, Telemetry, TracingTelemetry};
