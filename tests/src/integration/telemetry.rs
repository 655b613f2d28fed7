//! Telemetry bootstrap smoke tests.

#[cfg(test)]
mod tests {
    use netreg_telemetry::{init_telemetry, TelemetryConfig};

    #[test]
    fn test_subscriber_installs_exactly_once() {
        let config = TelemetryConfig::default();
        let first = init_telemetry(&config);
        assert!(first.is_ok());

        // The global default is already taken now
        let second = init_telemetry(&config);
        assert!(second.is_err());
    }
}
