//! PBDNS Exporter Application Layer
pub mod ports;
pub mod use_cases;

pub use ports::{TelemetryMetrics, TransactionLog};
pub use use_cases::{Dispatch, ProcessEventUseCase};
