use chrono::{DateTime, Utc};
use pbdns_exporter_domain::{response_code_name, DnsResponse, Question, TelemetryEvent};
use std::fmt::Write;

const UNKNOWN_ADDRESS: &str = "N/A";

/// Millisecond stamp, e.g. `Jan  2 15:04:05.000` (UTC).
pub fn format_timestamp(instant: &DateTime<Utc>) -> String {
    instant.format("%b %e %H:%M:%S%.3f").to_string()
}

/// `[ts] Kind of size N: from (subnet) -> to (PROTO), id: T, uuid: M`
pub fn summary_line(event: &TelemetryEvent) -> String {
    let mut line = format!(
        "[{}] {} of size {}: ",
        format_timestamp(&event.timestamp),
        event.kind,
        event.in_bytes
    );

    match event.source {
        Some(ip) => {
            let _ = write!(line, "{}", ip);
        }
        None => line.push_str(UNKNOWN_ADDRESS),
    }
    if let Some(subnet) = event.original_requestor_subnet {
        let _ = write!(line, " ({})", subnet);
    }

    line.push_str(" -> ");
    match event.destination {
        Some(ip) => {
            let _ = write!(line, "{}", ip);
        }
        None => line.push_str(UNKNOWN_ADDRESS),
    }

    let _ = write!(
        line,
        " ({}), id: {}, uuid: {}",
        event.socket_protocol.as_str(),
        event.transaction_id,
        event.message_id_hex()
    );

    if !event.initial_request_id.is_empty() {
        let _ = write!(line, ", initial uuid: {}", event.initial_request_id_hex());
    }

    line
}

/// Class 0 is shown as IN.
pub fn question_line(question: &Question) -> String {
    format!(
        "- Question: {}, {}, {}",
        question.record_class(),
        question.record_type(),
        question.qname
    )
}

/// Query-time line, header line, then one line per renderable record.
/// Records outside IN/ANY are skipped here but still counted in `RRs:`.
pub fn response_lines(response: &DnsResponse) -> Vec<String> {
    let mut lines = Vec::with_capacity(2 + response.records.len());

    lines.push(format!(
        "- Query time: {}",
        format_timestamp(&response.query_timestamp)
    ));

    let mut header = format!(
        "- Response Code: {} ({}), RRs: {}",
        response.response_code,
        response_code_name(response.response_code),
        response.records.len()
    );
    if let Some(policy) = response.applied_policy() {
        let _ = write!(header, ", Applied policy: {}", policy);
    }
    if !response.tags.is_empty() {
        let _ = write!(header, ", Tags: {}", response.tags.join(", "));
    }
    lines.push(header);

    for rr in &response.records {
        if !rr.record_class().is_rendered() {
            continue;
        }
        lines.push(format!(
            "\t - {}, {}, {}, {}, {}",
            rr.record_class(),
            rr.record_type(),
            rr.name,
            rr.ttl,
            rr.decoded_rdata()
        ));
    }

    lines
}

pub fn render_query(event: &TelemetryEvent) -> Vec<String> {
    let mut lines = vec![summary_line(event)];
    if let Some(question) = &event.question {
        lines.push(question_line(question));
    }
    lines
}

pub fn render_response(event: &TelemetryEvent) -> Vec<String> {
    let mut lines = render_query(event);
    if let Some(response) = &event.response {
        lines.extend(response_lines(response));
    }
    lines
}
