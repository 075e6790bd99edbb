use serde::{Deserialize, Serialize};

/// Width of the big-endian length prefix in front of every envelope.
///
/// Must match the sender exactly: a narrower read desynchronises the stream
/// after the first frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum PrefixWidth {
    U16,
    #[default]
    U32,
}

impl PrefixWidth {
    /// Number of prefix bytes on the wire.
    pub fn byte_len(&self) -> usize {
        match self {
            PrefixWidth::U16 => 2,
            PrefixWidth::U32 => 4,
        }
    }

    /// Largest payload length the prefix can express.
    pub fn max_len(&self) -> usize {
        match self {
            PrefixWidth::U16 => u16::MAX as usize,
            PrefixWidth::U32 => u32::MAX as usize,
        }
    }
}

impl TryFrom<u8> for PrefixWidth {
    type Error = String;

    fn try_from(bits: u8) -> Result<Self, Self::Error> {
        match bits {
            16 => Ok(PrefixWidth::U16),
            32 => Ok(PrefixWidth::U32),
            other => Err(format!("prefix width must be 16 or 32 bits, got {}", other)),
        }
    }
}

impl From<PrefixWidth> for u8 {
    fn from(width: PrefixWidth) -> Self {
        match width {
            PrefixWidth::U16 => 16,
            PrefixWidth::U32 => 32,
        }
    }
}

/// Framing limits and the bounded queue between connections and the
/// event consumer.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HandoffConfig {
    /// Events buffered between connection tasks and the consumer
    #[serde(default = "default_capacity")]
    pub capacity: usize,

    /// How long a connection waits on a full queue before dropping the event
    #[serde(default = "default_enqueue_timeout_ms")]
    pub enqueue_timeout_ms: u64,

    /// Frames advertising more bytes than this close the connection
    #[serde(default = "default_max_frame_size")]
    pub max_frame_size: usize,

    #[serde(default)]
    pub prefix_width: PrefixWidth,
}

impl Default for HandoffConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
            enqueue_timeout_ms: default_enqueue_timeout_ms(),
            max_frame_size: default_max_frame_size(),
            prefix_width: PrefixWidth::default(),
        }
    }
}

fn default_capacity() -> usize {
    4096
}

fn default_enqueue_timeout_ms() -> u64 {
    250
}

fn default_max_frame_size() -> usize {
    16 * 1024 * 1024
}
