//! PBDNS Exporter Domain Layer
pub mod config;
pub mod dns_record;
pub mod errors;
pub mod telemetry_event;

pub use config::{CliOverrides, Config, ConfigError, PrefixWidth};
pub use dns_record::{response_code_name, RecordClass, RecordType};
pub use errors::{FramingError, IngestError};
pub use telemetry_event::{
    DnsResponse, EventKind, Question, RData, ResourceRecord, SocketProtocol, TelemetryEvent,
};
