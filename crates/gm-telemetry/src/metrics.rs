//! Prometheus metrics for guardian-messenger subsystems.
//!
//! All metrics follow the naming convention: `gm_<metric>_<unit>`

use std::time::Instant;

use lazy_static::lazy_static;
use prometheus::{
    exponential_buckets, Counter, CounterVec, Encoder, Histogram, HistogramOpts, Opts, Registry,
    TextEncoder,
};

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    // =========================================================================
    // OUTBOUND (Subsystem 6)
    // =========================================================================

    /// Envelopes encoded and handed to transport
    pub static ref MESSAGES_SENT: Counter = Counter::new(
        "gm_messages_sent_total",
        "Total number of envelopes ready for transmission"
    ).expect("metric creation failed");

    // =========================================================================
    // INBOUND (Subsystem 6)
    // =========================================================================

    /// Messages delivered to the application
    pub static ref MESSAGES_DELIVERED: Counter = Counter::new(
        "gm_messages_delivered_total",
        "Total number of inbound messages delivered exactly once"
    ).expect("metric creation failed");

    /// Rejected inbound messages by reason
    pub static ref MESSAGES_REJECTED: CounterVec = CounterVec::new(
        Opts::new("gm_messages_rejected_total", "Inbound messages rejected, by reason"),
        &["reason"]
    ).expect("metric creation failed");

    /// Replayed inbound messages
    pub static ref REPLAYS: Counter = Counter::new(
        "gm_replays_total",
        "Inbound messages that were already delivered"
    ).expect("metric creation failed");

    /// Attestation poll results
    pub static ref ATTESTATION_POLLS: CounterVec = CounterVec::new(
        Opts::new("gm_attestation_polls_total", "Attestation polls, by outcome"),
        &["outcome"]  // outcome: attested/not_yet_available/error
    ).expect("metric creation failed");

    // =========================================================================
    // SIGNATURE VERIFICATION (Subsystem 4)
    // =========================================================================

    /// Attestation verifications by result
    pub static ref SIGNATURE_VERIFICATIONS: CounterVec = CounterVec::new(
        Opts::new(
            "gm_signature_verifications_total",
            "Attestation verifications, by result"
        ),
        &["result"]  // result: valid or a verification error kind
    ).expect("metric creation failed");

    /// Attestation verification duration
    pub static ref VERIFICATION_DURATION: Histogram = Histogram::with_opts(
        HistogramOpts::new(
            "gm_attestation_verification_duration_seconds",
            "Time spent verifying guardian attestations"
        ).buckets(exponential_buckets(0.0001, 2.0, 14).expect("bucket layout"))
    ).expect("metric creation failed");
}

/// Register all metrics with the global registry.
///
/// Calling this more than once is harmless.
pub fn register_metrics() -> Result<(), TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        Box::new(MESSAGES_SENT.clone()),
        Box::new(MESSAGES_DELIVERED.clone()),
        Box::new(MESSAGES_REJECTED.clone()),
        Box::new(REPLAYS.clone()),
        Box::new(ATTESTATION_POLLS.clone()),
        Box::new(SIGNATURE_VERIFICATIONS.clone()),
        Box::new(VERIFICATION_DURATION.clone()),
    ];

    for metric in metrics {
        match REGISTRY.register(metric) {
            Ok(()) | Err(prometheus::Error::AlreadyReg) => {}
            Err(e) => return Err(TelemetryError::MetricsInit(e.to_string())),
        }
    }
    Ok(())
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}

/// Timer guard for automatic histogram observation.
pub struct HistogramTimer {
    histogram: Histogram,
    start: Instant,
}

impl HistogramTimer {
    /// Start a new timer for the given histogram.
    pub fn new(histogram: &Histogram) -> Self {
        Self {
            histogram: histogram.clone(),
            start: Instant::now(),
        }
    }
}

impl Drop for HistogramTimer {
    fn drop(&mut self) {
        self.histogram.observe(self.start.elapsed().as_secs_f64());
    }
}
