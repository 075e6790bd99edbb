use super::ip_from_bytes;
use crate::dns_record::RecordType;
use std::fmt;
use std::net::IpAddr;

/// Marker printed in place of rdata this exporter does not interpret.
pub const UNDECODED_MARKER: &str = "<not decoded>";

/// Opportunistically decoded record data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RData {
    /// A / AAAA: raw network-order address bytes.
    Address(IpAddr),
    /// NS / CNAME / PTR / MX: senders ship these already in text form.
    Name(String),
    Undecoded,
}

impl RData {
    pub fn decode(record_type: RecordType, rdata: &[u8]) -> Self {
        if record_type.has_address_rdata() {
            return match ip_from_bytes(rdata) {
                Some(ip) => RData::Address(ip),
                None => RData::Undecoded,
            };
        }

        if record_type.has_name_rdata() {
            return RData::Name(String::from_utf8_lossy(rdata).into_owned());
        }

        RData::Undecoded
    }
}

impl fmt::Display for RData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RData::Address(ip) => write!(f, "{}", ip),
            RData::Name(name) => f.write_str(name),
            RData::Undecoded => f.write_str(UNDECODED_MARKER),
        }
    }
}
