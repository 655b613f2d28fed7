//! Telemetry configuration.

use serde::{Deserialize, Serialize};

/// Environment variable holding the log filter directive.
pub const ENV_LOG_LEVEL: &str = "NETREG_LOG_LEVEL";

/// Environment variable toggling JSON log output.
pub const ENV_LOG_JSON: &str = "NETREG_LOG_JSON";

/// Telemetry configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    /// `tracing` env-filter directive, e.g. `info` or
    /// `netreg_allocator=debug,info`.
    pub log_level: String,
    /// Emit JSON log lines instead of human-readable output.
    pub json_logs: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}

impl TelemetryConfig {
    /// Load configuration from the environment, falling back to defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(level) = std::env::var(ENV_LOG_LEVEL) {
            config.log_level = level;
        }
        if let Ok(raw) = std::env::var(ENV_LOG_JSON) {
            config.json_logs = matches!(raw.trim(), "1" | "true" | "yes");
        }
        config
    }
}
