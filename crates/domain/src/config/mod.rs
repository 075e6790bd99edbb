//! Configuration module for the PBDNS exporter
//!
//! This module contains all configuration structures organized by concern:
//! - `root`: Main configuration and CLI overrides
//! - `server`: Listen addresses and the metrics path
//! - `metrics`: Metric namespace and subsystem
//! - `handoff`: Framing and ingestion queue settings
//! - `logging`: Logging settings
//! - `errors`: Configuration errors

pub mod errors;
pub mod handoff;
pub mod logging;
pub mod metrics;
pub mod root;
pub mod server;

pub use errors::ConfigError;
pub use handoff::{HandoffConfig, PrefixWidth};
pub use logging::LoggingConfig;
pub use metrics::MetricsConfig;
pub use root::{CliOverrides, Config};
pub use server::ServerConfig;
