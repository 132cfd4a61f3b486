//! Logging setup and structured events for marsgeo tools
//!
//! - Structured logging with tracing
//! - Session correlation id
//! - Operation timers

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use uuid::Uuid;

/// Global session ID for correlating logs
static SESSION_ID: Lazy<String> = Lazy::new(|| Uuid::new_v4().to_string());

/// Initialize the telemetry system
pub fn init() -> anyhow::Result<()> {
    init_with_config(TelemetryConfig::default())
}

/// Initialize with custom configuration
///
/// `RUST_LOG` takes precedence over `config.log_level`.
pub fn init_with_config(config: TelemetryConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(config.show_target)
        .with_file(config.show_file)
        .with_line_number(config.show_line_number);

    let registry = tracing_subscriber::registry().with(filter);
    let result = if config.json {
        tracing::subscriber::set_global_default(registry.with(fmt_layer.json()))
    } else {
        tracing::subscriber::set_global_default(registry.with(fmt_layer.compact()))
    };
    result.map_err(|e| anyhow::anyhow!("Failed to set tracing subscriber: {}", e))?;

    tracing::debug!(
        session_id = %session_id(),
        version = env!("CARGO_PKG_VERSION"),
        "Telemetry initialized"
    );

    Ok(())
}

/// Get the current session ID
pub fn session_id() -> &'static str {
    &SESSION_ID
}

/// Telemetry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub show_target: bool,
    pub show_file: bool,
    pub show_line_number: bool,
    /// Emit JSON lines instead of compact text
    pub json: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            show_target: false,
            show_file: false,
            show_line_number: false,
            json: false,
        }
    }
}

impl TelemetryConfig {
    /// Default settings at the given level.
    pub fn with_level(log_level: impl Into<String>) -> Self {
        Self {
            log_level: log_level.into(),
            ..Self::default()
        }
    }
}

/// Timer for measuring operation duration
pub struct Timer {
    name: String,
    start: Instant,
}

impl Timer {
    /// Start a new timer
    pub fn start(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            start: Instant::now(),
        }
    }

    /// Stop the timer and log the duration
    pub fn stop(self) -> Duration {
        let duration = self.start.elapsed();
        tracing::debug!(
            operation = %self.name,
            duration_ms = duration.as_millis(),
            "Timer completed"
        );
        duration
    }
}

/// Event for structured logging
#[derive(Debug, Serialize)]
pub struct Event {
    pub timestamp: DateTime<Utc>,
    pub session_id: String,
    pub event_type: String,
    pub data: serde_json::Value,
}

impl Event {
    pub fn new(event_type: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            timestamp: Utc::now(),
            session_id: session_id().to_string(),
            event_type: event_type.into(),
            data,
        }
    }

    pub fn log(&self) {
        tracing::info!(
            event_type = %self.event_type,
            data = %self.data,
            "Event recorded"
        );
    }
}
