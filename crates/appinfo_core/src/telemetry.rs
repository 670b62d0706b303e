//! Page view and event tracking.
//!
//! The [`Telemetry`] trait is the capability handed to UI controllers.
//! [`TracingTelemetry`] serializes each record as JSON and emits it on the
//! `telemetry` tracing target; [`crate::logging`] routes that target to its
//! own rotating file.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::Serialize;
use uuid::Uuid;

/// Tracing target carrying telemetry records.
pub const TELEMETRY_TARGET: &str = "telemetry";

/// Page name recorded when the main window is constructed.
pub const PAGE_MAIN_WINDOW: &str = "MainWindow";

/// Event recorded on every runtime info toggle.
pub const EVENT_SHOW_RUNTIME_INFO: &str = "ClickShowRuntimeInfo";

/// Fire-and-forget usage tracking.
pub trait Telemetry: Send + Sync {
    /// Start a telemetry session.
    fn initialize(&self);

    /// Record that a page or window was shown.
    fn track_page_view(&self, name: &str);

    /// Record a named user event.
    fn track_event(&self, name: &str);
}

/// Telemetry that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTelemetry;

impl Telemetry for NoopTelemetry {
    fn initialize(&self) {}
    fn track_page_view(&self, _name: &str) {}
    fn track_event(&self, _name: &str) {}
}

/// Properties shared by every record of one process run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TelemetrySession {
    /// Random session identifier.
    pub id: Uuid,
    /// When the session was initialized.
    pub started_at: DateTime<Utc>,
    /// Application build version.
    pub app_version: String,
    /// Operating system family.
    pub os: String,
    /// Process architecture.
    pub arch: String,
}

impl TelemetrySession {
    fn start(app_version: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            app_version: app_version.to_string(),
            os: std::env::consts::OS.to_string(),
            arch: std::env::consts::ARCH.to_string(),
        }
    }
}

/// Kind of tracked item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    /// A page or window was shown.
    PageView,
    /// A user event.
    Event,
}

/// One tracked item as emitted to the log.
#[derive(Debug, Clone, Serialize)]
pub struct TelemetryRecord<'a> {
    /// Item kind.
    pub kind: RecordKind,
    /// Page or event name.
    pub name: &'a str,
    /// Owning session.
    pub session_id: Uuid,
    /// Position within the session, starting at 1.
    pub sequence: u64,
    /// When the item was tracked.
    pub timestamp: DateTime<Utc>,
}

/// Telemetry that emits JSON records through `tracing`.
pub struct TracingTelemetry {
    enabled: bool,
    app_version: String,
    session: Mutex<Option<TelemetrySession>>,
    sequence: AtomicU64,
}

impl TracingTelemetry {
    /// Create an enabled client.
    pub fn new(app_version: impl Into<String>) -> Self {
        Self {
            enabled: true,
            app_version: app_version.into(),
            session: Mutex::new(None),
            sequence: AtomicU64::new(0),
        }
    }

    /// Create a client that ignores every call.
    pub fn disabled() -> Self {
        Self { enabled: false, ..Self::new(String::new()) }
    }

    /// Current session, if initialized.
    pub fn session(&self) -> Option<TelemetrySession> {
        self.session.lock().clone()
    }

    /// Number of records emitted in this session.
    pub fn tracked_count(&self) -> u64 {
        self.sequence.load(Ordering::SeqCst)
    }

    fn session_id(&self) -> Uuid {
        let mut session = self.session.lock();
        session.get_or_insert_with(|| self.start_session()).id
    }

    fn start_session(&self) -> TelemetrySession {
        let session = TelemetrySession::start(&self.app_version);
        tracing::debug!(session_id = %session.id, "Telemetry session started");
        session
    }

    fn emit(&self, kind: RecordKind, name: &str) {
        if !self.enabled {
            return;
        }

        let record = TelemetryRecord {
            kind,
            name,
            session_id: self.session_id(),
            sequence: self.sequence.fetch_add(1, Ordering::SeqCst) + 1,
            timestamp: Utc::now(),
        };

        match serde_json::to_string(&record) {
            Ok(json) => tracing::info!(target: TELEMETRY_TARGET, record = %json, "{name}"),
            Err(e) => tracing::warn!(error = %e, name, "Failed to serialize telemetry record"),
        }
    }
}

impl Telemetry for TracingTelemetry {
    fn initialize(&self) {
        if !self.enabled {
            tracing::info!("Telemetry disabled");
            return;
        }

        let mut session = self.session.lock();
        if session.is_none() {
            *session = Some(self.start_session());
        }
    }

    fn track_page_view(&self, name: &str) {
        self.emit(RecordKind::PageView, name);
    }

    fn track_event(&self, name: &str) {
        self.emit(RecordKind::Event, name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initialize_starts_one_session() {
        let telemetry = TracingTelemetry::new("0.1.0");
        assert!(telemetry.session().is_none());

        telemetry.initialize();
        let first = telemetry.session().unwrap();
        telemetry.initialize();

        assert_eq!(telemetry.session().unwrap().id, first.id);
        assert_eq!(first.app_version, "0.1.0");
        assert_eq!(first.os, std::env::consts::OS);
    }

    #[test]
    fn test_tracking_before_initialize_starts_session() {
        let telemetry = TracingTelemetry::new("0.1.0");
        telemetry.track_event(EVENT_SHOW_RUNTIME_INFO);
        assert!(telemetry.session().is_some());
        assert_eq!(telemetry.tracked_count(), 1);
    }

    #[test]
    fn test_records_are_sequenced() {
        let telemetry = TracingTelemetry::new("0.1.0");
        telemetry.initialize();
        telemetry.track_page_view(PAGE_MAIN_WINDOW);
        telemetry.track_event(EVENT_SHOW_RUNTIME_INFO);
        telemetry.track_event(EVENT_SHOW_RUNTIME_INFO);
        assert_eq!(telemetry.tracked_count(), 3);
    }

    #[test]
    fn test_disabled_client_is_silent() {
        let telemetry = TracingTelemetry::disabled();
        telemetry.initialize();
        telemetry.track_page_view(PAGE_MAIN_WINDOW);
        assert!(telemetry.session().is_none());
        assert_eq!(telemetry.tracked_count(), 0);
    }

    #[test]
    fn test_record_serializes_kind_in_snake_case() {
        let record = TelemetryRecord {
            kind: RecordKind::PageView,
            name: PAGE_MAIN_WINDOW,
            session_id: Uuid::nil(),
            sequence: 1,
            timestamp: Utc::now(),
        };
        let json: serde_json::Value = serde_json::to_value(&record).unwrap();
        assert_eq!(json["kind"], "page_view");
        assert_eq!(json["name"], "MainWindow");
        assert_eq!(json["sequence"], 1);
    }
}
