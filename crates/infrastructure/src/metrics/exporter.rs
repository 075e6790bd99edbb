use dashmap::DashMap;
use pbdns_exporter_application::ports::TelemetryMetrics;
use pbdns_exporter_domain::config::MetricsConfig;
use pbdns_exporter_domain::IngestError;
use prometheus::{Encoder, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};

/// Counters exposed on the scrape endpoint.
///
/// Each instance owns its registry, so tests can build fresh ones without
/// colliding on global registration. Policy label handles are cached in a
/// `DashMap` to skip the label-hash lookup on the hot path.
pub struct ExporterMetrics {
    registry: Registry,
    answers_total: IntCounter,
    applied_policy_total: IntCounterVec,
    dropped_events_total: IntCounter,
    policy_handles: DashMap<String, IntCounter>,
}

impl ExporterMetrics {
    pub fn new(namespace: &str, subsystem: &str) -> Result<Self, IngestError> {
        let registry = Registry::new();

        let answers_total = IntCounter::with_opts(
            Opts::new("answers_total", "Number of packets answered in total")
                .namespace(namespace)
                .subsystem(subsystem),
        )
        .map_err(metrics_error)?;

        let applied_policy_total = IntCounterVec::new(
            Opts::new(
                "applied_policy_total",
                "Number of packets applied in each received policyName",
            )
            .namespace(namespace)
            .subsystem(subsystem),
            &["policy"],
        )
        .map_err(metrics_error)?;

        let dropped_events_total = IntCounter::with_opts(
            Opts::new(
                "dropped_events_total",
                "Events dropped because the handoff queue stayed full",
            )
            .namespace(namespace)
            .subsystem(subsystem),
        )
        .map_err(metrics_error)?;

        registry
            .register(Box::new(answers_total.clone()))
            .map_err(metrics_error)?;
        registry
            .register(Box::new(applied_policy_total.clone()))
            .map_err(metrics_error)?;
        registry
            .register(Box::new(dropped_events_total.clone()))
            .map_err(metrics_error)?;

        Ok(Self {
            registry,
            answers_total,
            applied_policy_total,
            dropped_events_total,
            policy_handles: DashMap::new(),
        })
    }

    pub fn from_config(config: &MetricsConfig) -> Result<Self, IngestError> {
        Self::new(&config.namespace, &config.subsystem)
    }

    /// Prometheus text exposition of every counter.
    pub fn render(&self) -> Result<String, IngestError> {
        let encoder = TextEncoder::new();
        let families = self.registry.gather();
        let mut buffer = Vec::new();

        encoder
            .encode(&families, &mut buffer)
            .map_err(metrics_error)?;

        String::from_utf8(buffer).map_err(metrics_error)
    }

    pub fn content_type(&self) -> &'static str {
        prometheus::TEXT_FORMAT
    }

    fn policy_counter(&self, policy: &str) -> IntCounter {
        if let Some(counter) = self.policy_handles.get(policy) {
            return counter.clone();
        }

        self.policy_handles
            .entry(policy.to_string())
            .or_insert_with(|| self.applied_policy_total.with_label_values(&[policy]))
            .clone()
    }
}

impl TelemetryMetrics for ExporterMetrics {
    fn record_response(&self, applied_policy: Option<&str>) {
        self.answers_total.inc();

        if let Some(policy) = applied_policy {
            self.policy_counter(policy).inc();
        }
    }

    fn record_dropped_event(&self) {
        self.dropped_events_total.inc();
    }

    fn answers_total(&self) -> u64 {
        self.answers_total.get()
    }

    fn applied_policy_total(&self, policy: &str) -> u64 {
        self.policy_handles
            .get(policy)
            .map(|counter| counter.get())
            .unwrap_or(0)
    }

    fn dropped_events_total(&self) -> u64 {
        self.dropped_events_total.get()
    }
}

fn metrics_error(e: impl std::fmt::Display) -> IngestError {
    IngestError::Metrics(e.to_string())
}
