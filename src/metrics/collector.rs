//! Metrics collection and registry.

use crate::analysis::DetectionRate;
use crate::detection::Report;
use prometheus::{Encoder, IntCounter, IntGauge, Registry, TextEncoder};
use thiserror::Error;

/// Errors that can occur during metrics operations.
#[derive(Debug, Error)]
pub enum MetricsError {
    /// Registration or encoding failed inside prometheus.
    #[error("prometheus error: {0}")]
    Prometheus(#[from] prometheus::Error),
}

/// Prometheus metrics registry for detection runs.
pub struct MetricsRegistry {
    registry: Registry,

    // Check metrics
    checks_total: IntCounter,
    checks_detected_total: IntCounter,
    last_verdict: IntGauge,

    // Trial metrics
    trials_total: IntCounter,
    trials_positive_total: IntCounter,

    // Source metrics
    entropy_failures_total: IntCounter,
}

impl MetricsRegistry {
    /// Creates a new registry with all detection metrics registered.
    pub fn new() -> Result<Self, MetricsError> {
        let registry = Registry::new();

        let checks_total = IntCounter::new(
            "srandom_detect_checks_total",
            "Total number of combined checks run",
        )?;
        let checks_detected_total = IntCounter::new(
            "srandom_detect_checks_detected_total",
            "Combined checks that reported srandom",
        )?;
        let last_verdict = IntGauge::new(
            "srandom_detect_last_verdict",
            "Verdict of the most recent check (1=detected, 0=not detected)",
        )?;
        let trials_total = IntCounter::new(
            "srandom_detect_trials_total",
            "Total number of single trials run",
        )?;
        let trials_positive_total = IntCounter::new(
            "srandom_detect_trials_positive_total",
            "Single trials where a probe matched",
        )?;
        let entropy_failures_total = IntCounter::new(
            "srandom_detect_entropy_failures_total",
            "Entropy draws that failed",
        )?;

        registry.register(Box::new(checks_total.clone()))?;
        registry.register(Box::new(checks_detected_total.clone()))?;
        registry.register(Box::new(last_verdict.clone()))?;
        registry.register(Box::new(trials_total.clone()))?;
        registry.register(Box::new(trials_positive_total.clone()))?;
        registry.register(Box::new(entropy_failures_total.clone()))?;

        Ok(Self {
            registry,
            checks_total,
            checks_detected_total,
            last_verdict,
            trials_total,
            trials_positive_total,
            entropy_failures_total,
        })
    }

    /// Records a finished check and its trials.
    pub fn record_report(&self, report: &Report) {
        self.checks_total.inc();
        if report.detected {
            self.checks_detected_total.inc();
        }
        self.last_verdict.set(i64::from(report.detected));

        self.trials_total.inc_by(report.trials.len() as u64);
        self.trials_positive_total
            .inc_by(report.positive_trials() as u64);
    }

    /// Records the trials of a simulation run.
    pub fn record_rate(&self, rate: &DetectionRate) {
        self.trials_total.inc_by(rate.trials);
        self.trials_positive_total.inc_by(rate.positive);
    }

    /// Records a failed entropy draw.
    pub fn record_entropy_failure(&self) {
        self.entropy_failures_total.inc();
    }

    /// Encodes all metrics in Prometheus text format.
    pub fn encode(&self) -> Result<String, MetricsError> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}
