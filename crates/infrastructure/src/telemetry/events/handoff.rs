use pbdns_exporter_application::ports::TelemetryMetrics;
use pbdns_exporter_domain::{IngestError, TelemetryEvent};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::SendTimeoutError;
use tracing::warn;

/// Producer side of the bounded event queue.
///
/// Every connection task holds a clone. When the queue is full the producer
/// waits up to `enqueue_timeout`, then drops the event and counts it in
/// `dropped_events_total`. A reader is therefore never stalled indefinitely
/// by a slow consumer.
#[derive(Clone)]
pub struct EventHandoff {
    sender: mpsc::Sender<TelemetryEvent>,
    enqueue_timeout: Duration,
    metrics: Arc<dyn TelemetryMetrics>,
}

impl EventHandoff {
    /// Creates the handoff and returns the receiver for the consumer task.
    pub fn bounded(
        capacity: usize,
        enqueue_timeout: Duration,
        metrics: Arc<dyn TelemetryMetrics>,
    ) -> (Self, mpsc::Receiver<TelemetryEvent>) {
        let (tx, rx) = mpsc::channel(capacity);
        let handoff = Self {
            sender: tx,
            enqueue_timeout,
            metrics,
        };
        (handoff, rx)
    }

    pub async fn forward(&self, event: TelemetryEvent) -> Result<(), IngestError> {
        match self.sender.send_timeout(event, self.enqueue_timeout).await {
            Ok(()) => Ok(()),
            Err(SendTimeoutError::Timeout(dropped)) => {
                self.metrics.record_dropped_event();
                let timeout_ms = self.enqueue_timeout.as_millis() as u64;
                warn!(
                    transaction_id = dropped.transaction_id,
                    kind = %dropped.kind,
                    timeout_ms,
                    "Handoff queue full, dropping event"
                );
                Err(IngestError::HandoffSaturated { timeout_ms })
            }
            Err(SendTimeoutError::Closed(_)) => Err(IngestError::HandoffClosed),
        }
    }

    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

impl std::fmt::Debug for EventHandoff {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventHandoff")
            .field("capacity", &self.sender.max_capacity())
            .field("enqueue_timeout", &self.enqueue_timeout)
            .finish()
    }
}
