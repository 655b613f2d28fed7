//! Cross-subsystem integration tests.

pub mod accounts;
pub mod flows;
pub mod reservations;
pub mod telemetry;
