//! Prometheus metrics for detection runs.
//!
//! # Metrics Exposed
//!
//! - `srandom_detect_checks_total` - Combined checks run
//! - `srandom_detect_checks_detected_total` - Checks that reported srandom
//! - `srandom_detect_last_verdict` - Most recent verdict (1=detected)
//! - `srandom_detect_trials_total` - Single trials run
//! - `srandom_detect_trials_positive_total` - Trials where a probe matched
//! - `srandom_detect_entropy_failures_total` - Failed entropy draws
//!
//! # Example
//!
//! ```no_run
//! use srandom_detect::detection::Detector;
//! use srandom_detect::metrics::MetricsRegistry;
//! use srandom_detect::source::RngSource;
//!
//! let registry = MetricsRegistry::new().expect("Failed to create registry");
//! let report = Detector::default()
//!     .check(&mut RngSource::os())
//!     .expect("entropy unavailable");
//!
//! registry.record_report(&report);
//! println!("{}", registry.encode().unwrap());
//! ```

mod collector;

pub use collector::{MetricsError, MetricsRegistry};
