/// Application-layer port for the running counters.
///
/// Implementations are shared across every connection task and the event
/// consumer, so each increment must be atomic on its own. Counters only
/// ever grow; there is no reset.
pub trait TelemetryMetrics: Send + Sync {
    /// Count one Response-kind event. `applied_policy` is `Some` only when
    /// the resolver applied a non-empty policy; the total must be bumped
    /// before the policy label so a scrape never sees more policy hits
    /// than answers.
    fn record_response(&self, applied_policy: Option<&str>);

    /// Count one event dropped because the handoff queue stayed full.
    fn record_dropped_event(&self);

    fn answers_total(&self) -> u64;

    fn applied_policy_total(&self, policy: &str) -> u64;

    fn dropped_events_total(&self) -> u64;
}
