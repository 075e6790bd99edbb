use std::fmt;

/// DNS class of a question or resource record.
///
/// Class 0 never appears on the DNS wire; telemetry senders use it for
/// "not set" and it is treated as `IN`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordClass {
    IN,
    CH,
    HS,
    NONE,
    ANY,
    Other(u32),
}

impl RecordClass {
    pub fn from_u16(value: u16) -> Self {
        match value {
            0 | 1 => RecordClass::IN,
            3 => RecordClass::CH,
            4 => RecordClass::HS,
            254 => RecordClass::NONE,
            255 => RecordClass::ANY,
            other => RecordClass::Other(u32::from(other)),
        }
    }

    /// Telemetry value; anything above 65535 is `Other`.
    pub fn from_wire(value: u32) -> Self {
        match u16::try_from(value) {
            Ok(code) => Self::from_u16(code),
            Err(_) => RecordClass::Other(value),
        }
    }

    pub fn code(&self) -> u32 {
        match self {
            RecordClass::IN => 1,
            RecordClass::CH => 3,
            RecordClass::HS => 4,
            RecordClass::NONE => 254,
            RecordClass::ANY => 255,
            RecordClass::Other(code) => *code,
        }
    }

    /// Whether records of this class are rendered in the transaction log.
    /// Only `IN` (including the implicit 0) and `ANY` qualify.
    pub fn is_rendered(&self) -> bool {
        matches!(self, RecordClass::IN | RecordClass::ANY)
    }
}

impl fmt::Display for RecordClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordClass::IN => f.write_str("IN"),
            RecordClass::CH => f.write_str("CH"),
            RecordClass::HS => f.write_str("HS"),
            RecordClass::NONE => f.write_str("NONE"),
            RecordClass::ANY => f.write_str("ANY"),
            RecordClass::Other(code) => write!(f, "CLASS{}", code),
        }
    }
}
