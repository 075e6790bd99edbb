use pbdns_exporter_domain::TelemetryEvent;

/// Sink for the human-readable transaction log.
///
/// Rendering is a pure projection of the event; implementations own the
/// formatting and the output stream, and must not fail the caller.
pub trait TransactionLog: Send + Sync {
    fn log_query(&self, event: &TelemetryEvent);

    fn log_response(&self, event: &TelemetryEvent);

    /// Pushes buffered entries to the output. Called once per drained batch.
    fn flush(&self) {}
}
