//! Prometheus-backed counter aggregator.

pub mod exporter;

pub use exporter::ExporterMetrics;
