//! Structured logging setup.
//!
//! One global `tracing-subscriber` registry with an env-filter layer. JSON
//! output keeps the field structure (`subsystem`, `network`, `owner`, ...)
//! machine-parseable for whatever ships the logs.

use crate::{TelemetryConfig, TelemetryError};
use tracing_subscriber::EnvFilter;

/// Install the global subscriber.
///
/// Split out from [`init_telemetry`](crate::init_telemetry) so tests can
/// exercise filter parsing without fighting over the global default.
pub fn init_logging(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let filter = EnvFilter::try_new(&config.log_level)
        .map_err(|err| TelemetryError::Filter(err.to_string()))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    let result = if config.json_logs {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    result.map_err(|err| TelemetryError::Init(err.to_string()))
}
