use super::schema::{pb_dns_message, socket_family, PbDnsMessage};
use pbdns_exporter_domain::telemetry_event::{instant_to_parts, ip_to_bytes};
use pbdns_exporter_domain::{DnsResponse, Question, TelemetryEvent};
use prost::Message;
use std::net::IpAddr;

/// Inverse of [`super::EnvelopeDecoder`]: serializes an event back into a
/// `PBDNSMessage` payload. Empty byte fields are left unset.
pub struct EnvelopeEncoder;

impl EnvelopeEncoder {
    pub fn encode(event: &TelemetryEvent) -> Vec<u8> {
        Self::to_message(event).encode_to_vec()
    }

    pub fn to_message(event: &TelemetryEvent) -> PbDnsMessage {
        let (time_sec, time_usec) = instant_to_parts(&event.timestamp);

        PbDnsMessage {
            r#type: Some(event.kind.to_wire()),
            message_id: non_empty(&event.message_id),
            server_identity: non_empty(&event.server_identity),
            socket_family: event.source.as_ref().map(family_of),
            socket_protocol: Some(event.socket_protocol.to_wire()),
            from: event.source.as_ref().map(ip_to_bytes),
            to: event.destination.as_ref().map(ip_to_bytes),
            in_bytes: Some(event.in_bytes),
            time_sec: Some(time_sec),
            time_usec: Some(time_usec),
            id: Some(event.transaction_id),
            question: event.question.as_ref().map(encode_question),
            response: event.response.as_ref().map(encode_response),
            original_requestor_subnet: event.original_requestor_subnet.as_ref().map(ip_to_bytes),
            requestor_id: event.requestor_id.clone(),
            initial_request_id: non_empty(&event.initial_request_id),
            from_port: event.source_port.map(u32::from),
            to_port: event.destination_port.map(u32::from),
        }
    }
}

fn non_empty(bytes: &[u8]) -> Option<Vec<u8>> {
    if bytes.is_empty() {
        None
    } else {
        Some(bytes.to_vec())
    }
}

fn family_of(ip: &IpAddr) -> i32 {
    match ip {
        IpAddr::V4(_) => socket_family::INET,
        IpAddr::V6(_) => socket_family::INET6,
    }
}

fn encode_question(question: &Question) -> pb_dns_message::DnsQuestion {
    pb_dns_message::DnsQuestion {
        q_name: Some(question.qname.clone()),
        q_type: Some(question.qtype),
        q_class: Some(question.qclass),
    }
}

fn encode_response(response: &DnsResponse) -> pb_dns_message::DnsResponse {
    let (query_time_sec, query_time_usec) = instant_to_parts(&response.query_timestamp);

    pb_dns_message::DnsResponse {
        rcode: Some(response.response_code),
        rrs: response
            .records
            .iter()
            .map(|rr| pb_dns_message::dns_response::DnsRr {
                name: Some(rr.name.clone()),
                r#type: Some(rr.rtype),
                class: Some(rr.class),
                ttl: Some(rr.ttl),
                rdata: Some(rr.rdata.clone()),
                udr: None,
            })
            .collect(),
        applied_policy: if response.applied_policy.is_empty() {
            None
        } else {
            Some(response.applied_policy.clone())
        },
        tags: response.tags.clone(),
        query_time_sec: Some(query_time_sec),
        query_time_usec: Some(query_time_usec),
    }
}
