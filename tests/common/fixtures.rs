use pbdns_exporter_domain::telemetry_event::instant_from_parts;
use pbdns_exporter_domain::{
    DnsResponse, EventKind, PrefixWidth, Question, ResourceRecord, TelemetryEvent,
};
use pbdns_exporter_infrastructure::telemetry::{encode_frame, EnvelopeEncoder};

pub fn query(id: u64, qname: &str) -> TelemetryEvent {
    let mut event = TelemetryEvent::new(EventKind::Query);
    event.timestamp = instant_from_parts(1_700_000_000, 0);
    event.transaction_id = id;
    event.message_id = id.to_be_bytes().to_vec();
    event.source = Some("192.0.2.10".parse().unwrap());
    event.destination = Some("192.0.2.53".parse().unwrap());
    event.question = Some(Question {
        qname: qname.to_string(),
        qtype: 1,
        qclass: 1,
    });
    event
}

pub fn answer(id: u64, policy: &str, ip: [u8; 4]) -> TelemetryEvent {
    let mut event = query(id, "example.com.");
    event.kind = EventKind::Response;
    event.response = Some(DnsResponse {
        query_timestamp: instant_from_parts(1_700_000_000, 0),
        response_code: 0,
        applied_policy: policy.to_string(),
        tags: vec![],
        records: vec![ResourceRecord {
            name: "example.com.".to_string(),
            rtype: 1,
            class: 1,
            ttl: 300,
            rdata: ip.to_vec(),
        }],
    });
    event
}

pub fn unknown(tag: i32) -> TelemetryEvent {
    TelemetryEvent::new(EventKind::Unknown(tag))
}

pub fn frame(event: &TelemetryEvent, width: PrefixWidth) -> Vec<u8> {
    encode_frame(&EnvelopeEncoder::encode(event), width)
        .expect("fixture frame fits the prefix")
        .to_vec()
}
