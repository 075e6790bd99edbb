//! PBDNS Exporter Infrastructure Layer
pub mod metrics;
pub mod telemetry;
pub mod transaction_log;
