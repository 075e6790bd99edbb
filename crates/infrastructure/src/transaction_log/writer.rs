use super::render;
use pbdns_exporter_application::ports::TransactionLog;
use pbdns_exporter_domain::TelemetryEvent;
use std::io::{self, BufWriter, Write};
use std::sync::{Mutex, MutexGuard};
use tracing::warn;

/// Writes rendered events to any `Write` sink, one event per locked write
/// so lines of different events never interleave.
///
/// Output is buffered; nothing reaches the sink until [`TransactionLog::flush`]
/// runs or the buffer fills.
pub struct WriterTransactionLog<W: Write + Send> {
    sink: Mutex<BufWriter<W>>,
}

impl WriterTransactionLog<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> WriterTransactionLog<W> {
    pub fn new(sink: W) -> Self {
        Self {
            sink: Mutex::new(BufWriter::new(sink)),
        }
    }

    /// Flushes what is buffered and hands the sink back.
    pub fn into_inner(self) -> W {
        let buffered = self
            .sink
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        buffered.into_inner().unwrap_or_else(|e| {
            warn!(error = %e.error(), "Failed to flush transaction log on close");
            e.into_inner().into_parts().0
        })
    }

    fn lock(&self) -> MutexGuard<'_, BufWriter<W>> {
        self.sink
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_lines(&self, lines: &[String]) {
        let mut sink = self.lock();

        let result = lines
            .iter()
            .try_for_each(|line| writeln!(sink, "{}", line));

        if let Err(e) = result {
            warn!(error = %e, "Failed to write transaction log entry");
        }
    }
}

impl<W: Write + Send> TransactionLog for WriterTransactionLog<W> {
    fn log_query(&self, event: &TelemetryEvent) {
        self.write_lines(&render::render_query(event));
    }

    fn log_response(&self, event: &TelemetryEvent) {
        self.write_lines(&render::render_response(event));
    }

    fn flush(&self) {
        if let Err(e) = self.lock().flush() {
            warn!(error = %e, "Failed to flush transaction log");
        }
    }
}
