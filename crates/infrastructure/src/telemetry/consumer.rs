use pbdns_exporter_application::{Dispatch, ProcessEventUseCase};
use pbdns_exporter_domain::TelemetryEvent;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::debug;

/// Most events handled between two transaction log flushes.
const MAX_BATCH: usize = 100;

/// Background task draining the handoff queue in arrival order.
///
/// Events already waiting in the queue are handled as one batch and the
/// transaction log is flushed once per batch. The task exits once every
/// [`super::EventHandoff`] clone has been dropped and the queue is empty, so
/// pending events are always processed before shutdown completes.
pub struct EventConsumer {
    use_case: Arc<ProcessEventUseCase>,
}

impl EventConsumer {
    pub fn new(use_case: Arc<ProcessEventUseCase>) -> Self {
        Self { use_case }
    }

    pub fn start(self, mut rx: mpsc::Receiver<TelemetryEvent>) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            debug!("EventConsumer: Starting");

            let mut tally = Tally::default();
            let mut batches = 0u64;

            while let Some(event) = rx.recv().await {
                tally.add(self.use_case.execute(&event));

                let mut batch_size = 1;
                while batch_size < MAX_BATCH {
                    let Ok(event) = rx.try_recv() else { break };
                    tally.add(self.use_case.execute(&event));
                    batch_size += 1;
                }

                self.use_case.flush();
                batches += 1;
            }

            debug!(
                queries = tally.queries,
                responses = tally.responses,
                ignored = tally.ignored,
                batches,
                "EventConsumer: Queue closed, shutting down"
            );
        })
    }
}

#[derive(Default)]
struct Tally {
    queries: u64,
    responses: u64,
    ignored: u64,
}

impl Tally {
    fn add(&mut self, dispatch: Dispatch) {
        match dispatch {
            Dispatch::Query => self.queries += 1,
            Dispatch::Response => self.responses += 1,
            Dispatch::Ignored => self.ignored += 1,
        }
    }
}
