pub mod telemetry_metrics;
pub mod transaction_log;

pub use telemetry_metrics::TelemetryMetrics;
pub use transaction_log::TransactionLog;
