//! Human-readable transaction log: pure rendering plus a writer sink.

pub mod render;
pub mod writer;

pub use writer::WriterTransactionLog;
