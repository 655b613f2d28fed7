//! # netreg Telemetry
//!
//! Observability bootstrap for the registry subsystems.
//!
//! Every subsystem logs through `tracing`; this crate owns the single global
//! subscriber. Plain human-readable output is the default; JSON output is a
//! switch away for deployments that ship logs somewhere structured.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use netreg_telemetry::{init_telemetry, TelemetryConfig};
//!
//! fn main() {
//!     let config = TelemetryConfig::from_env();
//!     let _guard = init_telemetry(&config).expect("failed to init telemetry");
//!
//!     // Subsystems now log through the global subscriber
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `NETREG_LOG_LEVEL` | `info` | `tracing` env-filter directive |
//! | `NETREG_LOG_JSON` | `false` | Emit JSON log lines |

mod config;
mod logging;

pub use config::TelemetryConfig;
pub use logging::init_logging;

use thiserror::Error;

/// Telemetry initialization errors.
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// The filter directive could not be parsed.
    #[error("invalid log filter: {0}")]
    Filter(String),

    /// A global subscriber is already installed.
    #[error("failed to install subscriber: {0}")]
    Init(String),
}

/// Install the global subscriber per `config`.
///
/// Returns a guard that must be held for the lifetime of the application; a
/// second call fails with [`TelemetryError::Init`].
pub fn init_telemetry(config: &TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    logging::init_logging(config)?;
    tracing::debug!(
        log_level = %config.log_level,
        json_logs = config.json_logs,
        "telemetry initialized"
    );
    Ok(TelemetryGuard { _private: () })
}

/// Guard that keeps telemetry conceptually owned by the caller.
pub struct TelemetryGuard {
    _private: (),
}
