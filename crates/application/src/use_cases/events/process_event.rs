use crate::ports::{TelemetryMetrics, TransactionLog};
use pbdns_exporter_domain::{EventKind, TelemetryEvent};
use std::sync::Arc;
use tracing::trace;

/// Which handling path an event took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    Query,
    Response,
    Ignored,
}

/// Classifies a decoded event by its kind tag and runs exactly one path:
///
/// - Query: transaction log only
/// - Response: counters, then transaction log
/// - anything else: nothing
///
/// Routing never looks at which optional sections are populated; a Response
/// without a response section still counts as an answer.
pub struct ProcessEventUseCase {
    metrics: Arc<dyn TelemetryMetrics>,
    transaction_log: Arc<dyn TransactionLog>,
}

impl ProcessEventUseCase {
    pub fn new(
        metrics: Arc<dyn TelemetryMetrics>,
        transaction_log: Arc<dyn TransactionLog>,
    ) -> Self {
        Self {
            metrics,
            transaction_log,
        }
    }

    pub fn execute(&self, event: &TelemetryEvent) -> Dispatch {
        match event.kind {
            EventKind::Query => {
                self.transaction_log.log_query(event);
                Dispatch::Query
            }
            EventKind::Response => {
                self.metrics.record_response(event.applied_policy());
                self.transaction_log.log_response(event);
                Dispatch::Response
            }
            EventKind::Unknown(tag) => {
                trace!(tag, "Ignoring telemetry event of unhandled kind");
                Dispatch::Ignored
            }
        }
    }

    pub fn flush(&self) {
        self.transaction_log.flush();
    }
}
