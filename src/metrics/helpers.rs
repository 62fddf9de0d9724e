//! Metrics helper structs for convenient metric recording

use std::time::Duration;

use prometheus::{Encoder, TextEncoder};

use super::{DEX_QUERIES_TOTAL, RELAY_DURATION, RELAY_OUTCOMES_TOTAL, RELAY_REMOTE_CALLS_TOTAL};

/// Encode all metrics to Prometheus text format
pub fn encode_metrics() -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    Ok(String::from_utf8(buffer).unwrap_or_default())
}

/// Helper struct for recording relay metrics
pub struct RelayMetrics;

impl RelayMetrics {
    /// Record how a relay request ended
    pub fn record_outcome(outcome: &str) {
        RELAY_OUTCOMES_TOTAL.with_label_values(&[outcome]).inc();
    }

    /// Record an outbound call
    pub fn record_remote_call(kind: &str, ok: bool) {
        let result = if ok { "ok" } else { "error" };
        RELAY_REMOTE_CALLS_TOTAL
            .with_label_values(&[kind, result])
            .inc();
    }

    /// Record total handling time
    pub fn observe_duration(duration: Duration) {
        RELAY_DURATION.observe(duration.as_secs_f64());
    }
}

/// Helper struct for recording dex metrics
pub struct DexMetrics;

impl DexMetrics {
    pub fn record_query(kind: &str) {
        DEX_QUERIES_TOTAL.with_label_values(&[kind]).inc();
    }
}
