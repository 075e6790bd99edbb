//! PBDNSMessage ingestion: framing, envelope codec, connection handling
//! and the handoff into the single event consumer.

pub mod consumer;
pub mod decoder;
pub mod encoder;
pub mod events;
pub mod framing;
pub mod schema;
pub mod supervisor;

pub use consumer::EventConsumer;
pub use decoder::EnvelopeDecoder;
pub use encoder::EnvelopeEncoder;
pub use events::EventHandoff;
pub use framing::{encode_frame, FrameReader};
pub use supervisor::{CloseReason, ConnectionSupervisor, FrameSettings};
