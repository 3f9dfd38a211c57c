//! Prometheus metrics collection for relayd.
//!
//! Metrics are exposed on an optional HTTP endpoint (see [`crate::http`]).
//! Until [`init`] runs every recording helper is a no-op, which keeps unit
//! tests and embedded use free of global registration.
//!
//! - `relay_connected_sessions` - Sessions currently in the registry
//! - `relay_lines_broadcast_total` - Lines accepted for fan-out
//! - `relay_message_fanout` - Recipients per broadcast line (histogram)
//! - `relay_delivery_failures_total{reason}` - Lines dropped per recipient
//! - `relay_command_total{command}` / `relay_command_duration_seconds{command}`
//! - `relay_command_errors_total{command,error}`
//! - `relay_evictions_total` - Sessions evicted by a registration
//! - `relay_registered_nicks` - Records in the nickname directory

use prometheus::{
    Encoder, Histogram, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, IntGauge, Opts,
    Registry, TextEncoder,
};
use std::sync::OnceLock;

/// Global Prometheus registry for all metrics.
pub static REGISTRY: OnceLock<Registry> = OnceLock::new();

pub fn registry() -> &'static Registry {
    REGISTRY.get_or_init(Registry::new)
}

// ========================================================================
// Gauges
// ========================================================================

pub static CONNECTED_SESSIONS: OnceLock<IntGauge> = OnceLock::new();

pub static REGISTERED_NICKS: OnceLock<IntGauge> = OnceLock::new();

// ========================================================================
// Counters
// ========================================================================

pub static LINES_BROADCAST: OnceLock<IntCounter> = OnceLock::new();

pub static DELIVERY_FAILURES: OnceLock<IntCounterVec> = OnceLock::new();

pub static EVICTIONS: OnceLock<IntCounter> = OnceLock::new();

/// Commands processed by keyword.
pub static COMMAND_COUNTER: OnceLock<IntCounterVec> = OnceLock::new();

/// Command errors by keyword and error kind.
pub static COMMAND_ERRORS: OnceLock<IntCounterVec> = OnceLock::new();

// ========================================================================
// Histograms
// ========================================================================

/// Command processing latency by keyword.
pub static COMMAND_LATENCY: OnceLock<HistogramVec> = OnceLock::new();

/// Recipients per broadcast line.
pub static MESSAGE_FANOUT: OnceLock<Histogram> = OnceLock::new();

/// Initialize the Prometheus metrics registry.
///
/// Call once at startup; later calls are harmless.
pub fn init() {
    let r = registry();

    // Helper macro to register metric
    macro_rules! register {
        ($metric:ident, $init:expr) => {
            match $init {
                Ok(m) => {
                    if let Err(e) = r.register(Box::new(m.clone())) {
                        tracing::warn!(error = %e, metric = stringify!($metric), "Failed to register metric");
                    }
                    let _ = $metric.set(m);
                }
                Err(e) => {
                    tracing::warn!(error = %e, metric = stringify!($metric), "Failed to create metric");
                }
            }
        };
    }

    register!(CONNECTED_SESSIONS, IntGauge::new("relay_connected_sessions", "Sessions currently connected"));
    register!(REGISTERED_NICKS, IntGauge::new("relay_registered_nicks", "Registered nicknames"));
    register!(LINES_BROADCAST, IntCounter::new("relay_lines_broadcast_total", "Lines accepted for broadcast"));
    register!(DELIVERY_FAILURES, IntCounterVec::new(Opts::new("relay_delivery_failures_total", "Lines that could not be queued for a recipient"), &["reason"]));
    register!(EVICTIONS, IntCounter::new("relay_evictions_total", "Sessions evicted by nickname registration"));
    register!(COMMAND_COUNTER, IntCounterVec::new(Opts::new("relay_command_total", "Commands processed by keyword"), &["command"]));
    register!(COMMAND_ERRORS, IntCounterVec::new(Opts::new("relay_command_errors_total", "Command errors by keyword and kind"), &["command", "error"]));
    register!(COMMAND_LATENCY, HistogramVec::new(
        HistogramOpts::new("relay_command_duration_seconds", "Command latency by keyword")
            .buckets(vec![0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0]),
        &["command"]));
    register!(MESSAGE_FANOUT, Histogram::with_opts(
        HistogramOpts::new("relay_message_fanout", "Recipients per broadcast line")
            .buckets(vec![1.0, 5.0, 10.0, 25.0, 50.0, 100.0, 250.0, 500.0, 1000.0])));
}

/// Gather all metrics and encode them in Prometheus text format.
pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = registry().gather();
    let mut buffer = vec![];
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!(error = %e, "Failed to encode Prometheus metrics");
        return String::new();
    }
    match String::from_utf8(buffer) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = %e, "Prometheus metrics were not valid UTF-8");
            String::new()
        }
    }
}

// ============================================================================
// Recording helpers
// ============================================================================

#[inline]
pub fn set_connected_sessions(count: usize) {
    if let Some(g) = CONNECTED_SESSIONS.get() {
        g.set(count as i64);
    }
}

#[inline]
pub fn set_registered_nicks(count: usize) {
    if let Some(g) = REGISTERED_NICKS.get() {
        g.set(count as i64);
    }
}

/// Record one broadcast line and how many recipients it was queued for.
#[inline]
pub fn record_broadcast(recipients: usize) {
    if let Some(c) = LINES_BROADCAST.get() {
        c.inc();
    }
    if let Some(h) = MESSAGE_FANOUT.get() {
        h.observe(recipients as f64);
    }
}

#[inline]
pub fn record_delivery_failure(reason: &str) {
    if let Some(c) = DELIVERY_FAILURES.get() {
        c.with_label_values(&[reason]).inc();
    }
}

#[inline]
pub fn record_evictions(count: usize) {
    if let Some(c) = EVICTIONS.get() {
        c.inc_by(count as u64);
    }
}

/// Record a command execution with latency.
#[inline]
pub fn record_command(command: &str, duration_secs: f64) {
    if let Some(c) = COMMAND_COUNTER.get() {
        c.with_label_values(&[command]).inc();
    }
    if let Some(h) = COMMAND_LATENCY.get() {
        h.with_label_values(&[command]).observe(duration_secs);
    }
}

/// Record a command error.
#[inline]
pub fn record_command_error(command: &str, error: &str) {
    if let Some(c) = COMMAND_ERRORS.get() {
        c.with_label_values(&[command, error]).inc();
    }
}
