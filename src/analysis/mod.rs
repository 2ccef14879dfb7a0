//! Detection-rate measurement.
//!
//! Runs many single trials against one source and compares the observed
//! rate with what the source is known to be. These are empirical checks
//! of the detector, not proofs of its error bounds.

mod expectation;
mod rate;

pub use expectation::{Expectation, ExpectationViolation};
pub use rate::{measure, DetectionRate};
