use pbdns_exporter_domain::telemetry_event::instant_from_parts;
use pbdns_exporter_domain::{
    DnsResponse, EventKind, Question, ResourceRecord, SocketProtocol, TelemetryEvent,
};

// ============================================================================
// Event builders
// ============================================================================

pub fn query_event(id: u64, qname: &str) -> TelemetryEvent {
    let mut event = TelemetryEvent::new(EventKind::Query);
    event.timestamp = instant_from_parts(1_700_000_000, 250_000);
    event.transaction_id = id;
    event.message_id = vec![0x11, 0x22, 0x33, 0x44];
    event.server_identity = b"resolver-1".to_vec();
    event.in_bytes = 45;
    event.socket_protocol = SocketProtocol::Udp;
    event.source = Some("192.0.2.10".parse().unwrap());
    event.destination = Some("192.0.2.53".parse().unwrap());
    event.source_port = Some(53_000);
    event.destination_port = Some(53);
    event.question = Some(Question {
        qname: qname.to_string(),
        qtype: 1,
        qclass: 1,
    });
    event
}

pub fn response_event(id: u64, policy: &str) -> TelemetryEvent {
    let mut event = query_event(id, "example.com.");
    event.kind = EventKind::Response;
    event.in_bytes = 61;
    event.response = Some(DnsResponse {
        query_timestamp: instant_from_parts(1_700_000_000, 200_000),
        response_code: 0,
        applied_policy: policy.to_string(),
        tags: vec![],
        records: vec![ResourceRecord {
            name: "example.com.".to_string(),
            rtype: 1,
            class: 1,
            ttl: 300,
            rdata: vec![192, 0, 2, 1],
        }],
    });
    event
}

/// Response carrying every optional field the model knows about.
pub fn full_response_event() -> TelemetryEvent {
    let mut event = response_event(77, "blocklist");
    event.socket_protocol = SocketProtocol::Tcp;
    event.source = Some("2001:db8::10".parse().unwrap());
    event.destination = Some("2001:db8::53".parse().unwrap());
    event.original_requestor_subnet = Some("198.51.100.0".parse().unwrap());
    event.requestor_id = Some("alice".to_string());
    event.initial_request_id = vec![0xaa, 0xbb];

    if let Some(response) = event.response.as_mut() {
        response.response_code = 3;
        response.tags = vec!["tag-a".to_string(), "tag-b".to_string()];
        response.records.push(ResourceRecord {
            name: "example.com.".to_string(),
            rtype: 28,
            class: 1,
            ttl: 60,
            rdata: "2001:db8::1"
                .parse::<std::net::Ipv6Addr>()
                .unwrap()
                .octets()
                .to_vec(),
        });
        response.records.push(ResourceRecord {
            name: "example.com.".to_string(),
            rtype: 16,
            class: 3,
            ttl: 0,
            rdata: b"chaos".to_vec(),
        });
    }
    event
}
