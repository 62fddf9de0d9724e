//! Prometheus metrics for the chat command service.
//!
//! This module provides:
//! - Relay metrics (outcomes, remote calls, end-to-end latency)
//! - Dex query metrics by query kind

mod helpers;

pub use helpers::{encode_metrics, DexMetrics, RelayMetrics};

use lazy_static::lazy_static;
use prometheus::{register_histogram, register_int_counter_vec, Histogram, IntCounterVec};

/// Prefix for all metrics
const METRIC_PREFIX: &str = "dexrelay";

lazy_static! {
    // ============================================================================
    // Relay Metrics
    // ============================================================================

    /// Relay requests by final outcome (empty, invalid, forwarded, error)
    pub static ref RELAY_OUTCOMES_TOTAL: IntCounterVec = register_int_counter_vec!(
        format!("{}_relay_outcomes_total", METRIC_PREFIX),
        "Relay requests by outcome",
        &["outcome"]
    ).unwrap();

    /// Outbound calls by kind (config_fetch, webhook) and result (ok, error)
    pub static ref RELAY_REMOTE_CALLS_TOTAL: IntCounterVec = register_int_counter_vec!(
        format!("{}_relay_remote_calls_total", METRIC_PREFIX),
        "Outbound relay calls",
        &["kind", "result"]
    ).unwrap();

    /// Relay handling time, including remote calls
    pub static ref RELAY_DURATION: Histogram = register_histogram!(
        format!("{}_relay_duration_seconds", METRIC_PREFIX),
        "Relay request duration in seconds",
        vec![0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]
    ).unwrap();

    // ============================================================================
    // Dex Metrics
    // ============================================================================

    /// Dex queries by kind (random, help, lookup, type, ability, not_found, easter_egg)
    pub static ref DEX_QUERIES_TOTAL: IntCounterVec = register_int_counter_vec!(
        format!("{}_dex_queries_total", METRIC_PREFIX),
        "Dex queries by kind",
        &["kind"]
    ).unwrap();
}
