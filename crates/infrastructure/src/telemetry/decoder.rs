use super::schema::{pb_dns_message, PbDnsMessage};
use pbdns_exporter_domain::telemetry_event::{instant_from_parts, ip_from_bytes};
use pbdns_exporter_domain::{
    DnsResponse, EventKind, IngestError, Question, ResourceRecord, SocketProtocol, TelemetryEvent,
};
use prost::Message;

/// Turns one raw envelope into a [`TelemetryEvent`].
///
/// Absent fields fall back to their documented defaults (zero, empty,
/// `None`). Only bytes that do not parse as a `PBDNSMessage` are rejected;
/// odd values in display-only fields never cost an event its count.
pub struct EnvelopeDecoder;

impl EnvelopeDecoder {
    pub fn decode(payload: &[u8]) -> Result<TelemetryEvent, IngestError> {
        let message = PbDnsMessage::decode(payload)
            .map_err(|e| IngestError::MalformedEnvelope(e.to_string()))?;

        Ok(Self::from_message(message))
    }

    pub fn from_message(message: PbDnsMessage) -> TelemetryEvent {
        let mut event = TelemetryEvent::new(EventKind::from_wire(message.r#type));

        event.timestamp = instant_from_parts(
            message.time_sec.unwrap_or(0),
            message.time_usec.unwrap_or(0),
        );
        event.transaction_id = message.id.unwrap_or(0);
        event.message_id = message.message_id.unwrap_or_default();
        event.initial_request_id = message.initial_request_id.unwrap_or_default();
        event.server_identity = message.server_identity.unwrap_or_default();
        event.requestor_id = message.requestor_id;
        event.in_bytes = message.in_bytes.unwrap_or(0);
        event.socket_protocol = SocketProtocol::from_wire(message.socket_protocol);
        event.source = message.from.as_deref().and_then(ip_from_bytes);
        event.destination = message.to.as_deref().and_then(ip_from_bytes);
        event.source_port = message.from_port.and_then(port);
        event.destination_port = message.to_port.and_then(port);
        event.original_requestor_subnet = message
            .original_requestor_subnet
            .as_deref()
            .and_then(ip_from_bytes);
        event.question = message.question.map(decode_question);
        event.response = message.response.map(decode_response);

        event
    }
}

fn decode_question(question: pb_dns_message::DnsQuestion) -> Question {
    Question {
        qname: question.q_name.unwrap_or_default(),
        qtype: question.q_type.unwrap_or(0),
        qclass: question.q_class.unwrap_or(0),
    }
}

fn decode_response(response: pb_dns_message::DnsResponse) -> DnsResponse {
    let records = response
        .rrs
        .into_iter()
        .map(|rr| ResourceRecord {
            name: rr.name.unwrap_or_default(),
            rtype: rr.r#type.unwrap_or(0),
            class: rr.class.unwrap_or(0),
            ttl: rr.ttl.unwrap_or(0),
            rdata: rr.rdata.unwrap_or_default(),
        })
        .collect();

    DnsResponse {
        query_timestamp: instant_from_parts(
            response.query_time_sec.unwrap_or(0),
            response.query_time_usec.unwrap_or(0),
        ),
        response_code: response.rcode.unwrap_or(0),
        applied_policy: response.applied_policy.unwrap_or_default(),
        tags: response.tags,
        records,
    }
}

/// Ports above 65535 cannot exist; treat them as absent.
fn port(value: u32) -> Option<u16> {
    u16::try_from(value).ok()
}
