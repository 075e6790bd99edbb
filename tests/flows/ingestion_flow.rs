/// Ingestion Flow Test
///
/// Sender frames over TCP → decode → classify → counters → scrape text

#[path = "../common/mod.rs"]
mod common;

use common::{answer, frame, query, unknown, TestServer, TestServerBuilder};
use pbdns_exporter_domain::PrefixWidth;
use tokio::io::AsyncWriteExt;

// ============================================================================
// Scrape surface
// ============================================================================

#[tokio::test]
async fn test_blocklist_answer_reaches_scrape() {
    let server = TestServer::start().await.expect("Failed to start server");
    let width = server.prefix_width();

    let mut sender = server.connect().await;
    sender
        .write_all(&frame(&answer(1, "blocklist", [192, 0, 2, 1]), width))
        .await
        .unwrap();

    let body = server
        .wait_for_metric("pdns_protobuf_rpz_answers_total 1")
        .await;
    assert!(body.contains("pdns_protobuf_rpz_applied_policy_total{policy=\"blocklist\"} 1"));

    server.shutdown().await;
}

#[tokio::test]
async fn test_queries_and_unknown_kinds_leave_counters_alone() {
    let server = TestServer::start().await.expect("Failed to start server");
    let width = server.prefix_width();

    let mut sender = server.connect().await;
    let mut wire = Vec::new();
    wire.extend(frame(&query(1, "example.com."), width));
    wire.extend(frame(&unknown(3), width));
    wire.extend(frame(&unknown(4), width));
    // Marker so the test knows everything before it was processed.
    wire.extend(frame(&answer(2, "", [192, 0, 2, 1]), width));
    sender.write_all(&wire).await.unwrap();

    let body = server
        .wait_for_metric("pdns_protobuf_rpz_answers_total 1")
        .await;
    assert!(!body.contains("applied_policy_total{"));

    server.shutdown().await;
}

#[tokio::test]
async fn test_policies_from_several_senders() {
    let server = TestServer::start().await.expect("Failed to start server");
    let width = server.prefix_width();

    let mut a = server.connect().await;
    let mut b = server.connect().await;

    for id in 0..3 {
        a.write_all(&frame(&answer(id, "blocklist", [10, 0, 0, 1]), width))
            .await
            .unwrap();
    }
    b.write_all(&frame(&answer(10, "malware", [10, 0, 0, 2]), width))
        .await
        .unwrap();
    b.write_all(&frame(&answer(11, "", [10, 0, 0, 3]), width))
        .await
        .unwrap();

    let body = server
        .wait_for_metric("pdns_protobuf_rpz_answers_total 5")
        .await;
    assert!(body.contains("pdns_protobuf_rpz_applied_policy_total{policy=\"blocklist\"} 3"));
    assert!(body.contains("pdns_protobuf_rpz_applied_policy_total{policy=\"malware\"} 1"));

    server.shutdown().await;
}

#[tokio::test]
async fn test_broken_sender_does_not_disturb_others() {
    let server = TestServer::start().await.expect("Failed to start server");
    let width = server.prefix_width();

    let mut broken = server.connect().await;
    broken.write_all(&[0, 0, 1, 0, 1, 2, 3]).await.unwrap();
    drop(broken);

    let mut healthy = server.connect().await;
    healthy
        .write_all(&frame(&answer(1, "blocklist", [192, 0, 2, 1]), width))
        .await
        .unwrap();

    let body = server
        .wait_for_metric("pdns_protobuf_rpz_answers_total 1")
        .await;
    assert!(body.contains("pdns_protobuf_rpz_applied_policy_total{policy=\"blocklist\"} 1"));

    server.shutdown().await;
}

#[tokio::test]
async fn test_sixteen_bit_prefix_listener() {
    let server = TestServerBuilder::new()
        .with_prefix_width(PrefixWidth::U16)
        .build()
        .await
        .expect("Failed to start server");

    let mut sender = server.connect().await;
    sender
        .write_all(&frame(&answer(1, "blocklist", [192, 0, 2, 1]), PrefixWidth::U16))
        .await
        .unwrap();

    server
        .wait_for_metric("pdns_protobuf_rpz_applied_policy_total{policy=\"blocklist\"} 1")
        .await;

    server.shutdown().await;
}

// ============================================================================
// Web surface
// ============================================================================

#[tokio::test]
async fn test_custom_path_and_landing_page() {
    let server = TestServerBuilder::new()
        .with_metrics_path("/telemetry")
        .build()
        .await
        .expect("Failed to start server");

    let (status, body) = server.get("/").await;
    assert!(status.contains("200"));
    assert!(body.contains(r#"href="/telemetry""#));

    let (status, body) = server.get("/telemetry").await;
    assert!(status.contains("200"));
    assert!(body.contains("pdns_protobuf_rpz_answers_total 0"));

    let (status, body) = server.get("/health").await;
    assert!(status.contains("200"));
    assert_eq!(body, "OK");

    server.shutdown().await;
}
