pub mod rdata;

use crate::dns_record::{RecordClass, RecordType};
use chrono::{DateTime, Utc};
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

pub use rdata::RData;

/// Kind of a telemetry event, taken verbatim from the envelope's type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Query,
    Response,
    /// Any other tag (outgoing queries, incoming responses, or garbage).
    /// The raw tag is kept so the event re-encodes unchanged.
    Unknown(i32),
}

impl EventKind {
    pub fn from_wire(tag: Option<i32>) -> Self {
        match tag {
            Some(1) => EventKind::Query,
            Some(2) => EventKind::Response,
            Some(other) => EventKind::Unknown(other),
            None => EventKind::Unknown(0),
        }
    }

    pub fn to_wire(&self) -> i32 {
        match self {
            EventKind::Query => 1,
            EventKind::Response => 2,
            EventKind::Unknown(tag) => *tag,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EventKind::Query => "Query",
            EventKind::Response => "Response",
            EventKind::Unknown(_) => "Unknown",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SocketProtocol {
    #[default]
    Udp,
    Tcp,
}

impl SocketProtocol {
    /// Anything that is not explicitly UDP (1) is reported as TCP.
    pub fn from_wire(tag: Option<i32>) -> Self {
        match tag {
            Some(1) | None => SocketProtocol::Udp,
            Some(_) => SocketProtocol::Tcp,
        }
    }

    pub fn to_wire(&self) -> i32 {
        match self {
            SocketProtocol::Udp => 1,
            SocketProtocol::Tcp => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SocketProtocol::Udp => "UDP",
            SocketProtocol::Tcp => "TCP",
        }
    }
}

/// Converts sec + usec since the epoch into a single instant.
/// Out-of-range values collapse to the epoch rather than failing the event.
pub fn instant_from_parts(sec: u32, usec: u32) -> DateTime<Utc> {
    let nanos = usec.saturating_mul(1_000).min(999_999_999);
    DateTime::<Utc>::from_timestamp(i64::from(sec), nanos)
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

/// Splits an instant back into (sec, usec). Instants before the epoch or
/// beyond the u32 range clamp to the nearest representable value.
pub fn instant_to_parts(instant: &DateTime<Utc>) -> (u32, u32) {
    let sec = u32::try_from(instant.timestamp().max(0)).unwrap_or(u32::MAX);
    (sec, instant.timestamp_subsec_micros())
}

/// Interprets a raw address byte string: 4 bytes is IPv4, 16 bytes is IPv6,
/// anything else is unknown.
pub fn ip_from_bytes(bytes: &[u8]) -> Option<IpAddr> {
    match bytes.len() {
        4 => {
            let octets: [u8; 4] = bytes.try_into().ok()?;
            Some(IpAddr::V4(Ipv4Addr::from(octets)))
        }
        16 => {
            let octets: [u8; 16] = bytes.try_into().ok()?;
            Some(IpAddr::V6(Ipv6Addr::from(octets)))
        }
        _ => None,
    }
}

pub fn ip_to_bytes(ip: &IpAddr) -> Vec<u8> {
    match ip {
        IpAddr::V4(v4) => v4.octets().to_vec(),
        IpAddr::V6(v6) => v6.octets().to_vec(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub qname: String,
    /// Raw values as sent. Telemetry widens both to 32 bits; codes beyond
    /// the DNS range are kept and rendered numerically. Class 0 means
    /// "not set" and displays as IN.
    pub qtype: u32,
    pub qclass: u32,
}

impl Question {
    pub fn record_type(&self) -> RecordType {
        RecordType::from_wire(self.qtype)
    }

    pub fn record_class(&self) -> RecordClass {
        RecordClass::from_wire(self.qclass)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRecord {
    pub name: String,
    pub rtype: u32,
    pub class: u32,
    pub ttl: u32,
    pub rdata: Vec<u8>,
}

impl ResourceRecord {
    pub fn record_type(&self) -> RecordType {
        RecordType::from_wire(self.rtype)
    }

    pub fn record_class(&self) -> RecordClass {
        RecordClass::from_wire(self.class)
    }

    pub fn decoded_rdata(&self) -> RData {
        RData::decode(self.record_type(), &self.rdata)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsResponse {
    pub query_timestamp: DateTime<Utc>,
    pub response_code: u32,
    /// Name of the policy the resolver applied; empty when none was.
    pub applied_policy: String,
    pub tags: Vec<String>,
    pub records: Vec<ResourceRecord>,
}

impl DnsResponse {
    pub fn applied_policy(&self) -> Option<&str> {
        if self.applied_policy.is_empty() {
            None
        } else {
            Some(&self.applied_policy)
        }
    }
}

/// One decoded telemetry envelope.
///
/// Built once by the envelope decoder, read by the classifier and the
/// transaction log, then dropped. `message_id`, `initial_request_id` and
/// `transaction_id` are opaque correlation keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryEvent {
    pub kind: EventKind,
    pub timestamp: DateTime<Utc>,
    pub transaction_id: u64,
    pub message_id: Vec<u8>,
    pub initial_request_id: Vec<u8>,
    pub server_identity: Vec<u8>,
    pub requestor_id: Option<String>,
    /// Size of the DNS message on the resolver side, in bytes.
    pub in_bytes: u64,
    pub socket_protocol: SocketProtocol,
    pub source: Option<IpAddr>,
    pub destination: Option<IpAddr>,
    pub source_port: Option<u16>,
    pub destination_port: Option<u16>,
    pub original_requestor_subnet: Option<IpAddr>,
    pub question: Option<Question>,
    pub response: Option<DnsResponse>,
}

impl TelemetryEvent {
    /// An empty event of the given kind with every optional field absent.
    pub fn new(kind: EventKind) -> Self {
        Self {
            kind,
            timestamp: DateTime::<Utc>::UNIX_EPOCH,
            transaction_id: 0,
            message_id: Vec::new(),
            initial_request_id: Vec::new(),
            server_identity: Vec::new(),
            requestor_id: None,
            in_bytes: 0,
            socket_protocol: SocketProtocol::Udp,
            source: None,
            destination: None,
            source_port: None,
            destination_port: None,
            original_requestor_subnet: None,
            question: None,
            response: None,
        }
    }

    pub fn message_id_hex(&self) -> String {
        to_hex(&self.message_id)
    }

    pub fn initial_request_id_hex(&self) -> String {
        to_hex(&self.initial_request_id)
    }

    /// Applied policy of a response event; `None` for every other shape.
    pub fn applied_policy(&self) -> Option<&str> {
        self.response.as_ref().and_then(DnsResponse::applied_policy)
    }
}

fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}
