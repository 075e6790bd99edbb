#![allow(dead_code)]

use pbdns_exporter_application::ports::{TelemetryMetrics, TransactionLog};
use pbdns_exporter_domain::{EventKind, TelemetryEvent};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

// ============================================================================
// Mock TelemetryMetrics
// ============================================================================

#[derive(Default)]
pub struct MockTelemetryMetrics {
    answers: AtomicU64,
    dropped: AtomicU64,
    policies: Mutex<HashMap<String, u64>>,
    /// Order in which increments happened, for checking answers-before-policy.
    trail: Mutex<Vec<String>>,
}

impl MockTelemetryMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trail(&self) -> Vec<String> {
        self.trail.lock().unwrap().clone()
    }

    pub fn policy_labels(&self) -> Vec<String> {
        let mut labels: Vec<String> = self.policies.lock().unwrap().keys().cloned().collect();
        labels.sort();
        labels
    }
}

impl TelemetryMetrics for MockTelemetryMetrics {
    fn record_response(&self, applied_policy: Option<&str>) {
        self.answers.fetch_add(1, Ordering::SeqCst);
        self.trail.lock().unwrap().push("answers".to_string());

        if let Some(policy) = applied_policy {
            *self
                .policies
                .lock()
                .unwrap()
                .entry(policy.to_string())
                .or_insert(0) += 1;
            self.trail.lock().unwrap().push(format!("policy:{}", policy));
        }
    }

    fn record_dropped_event(&self) {
        self.dropped.fetch_add(1, Ordering::SeqCst);
    }

    fn answers_total(&self) -> u64 {
        self.answers.load(Ordering::SeqCst)
    }

    fn applied_policy_total(&self, policy: &str) -> u64 {
        self.policies
            .lock()
            .unwrap()
            .get(policy)
            .copied()
            .unwrap_or(0)
    }

    fn dropped_events_total(&self) -> u64 {
        self.dropped.load(Ordering::SeqCst)
    }
}

// ============================================================================
// Mock TransactionLog
// ============================================================================

#[derive(Default)]
pub struct MockTransactionLog {
    entries: Mutex<Vec<(EventKind, u64)>>,
    flushes: AtomicU64,
}

impl MockTransactionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// (kind, transaction id) of every logged event, in order.
    pub fn entries(&self) -> Vec<(EventKind, u64)> {
        self.entries.lock().unwrap().clone()
    }

    pub fn flushes(&self) -> u64 {
        self.flushes.load(Ordering::Relaxed)
    }
}

impl TransactionLog for MockTransactionLog {
    fn log_query(&self, event: &TelemetryEvent) {
        self.entries
            .lock()
            .unwrap()
            .push((EventKind::Query, event.transaction_id));
    }

    fn log_response(&self, event: &TelemetryEvent) {
        self.entries
            .lock()
            .unwrap()
            .push((EventKind::Response, event.transaction_id));
    }

    fn flush(&self) {
        self.flushes.fetch_add(1, Ordering::Relaxed);
    }
}
