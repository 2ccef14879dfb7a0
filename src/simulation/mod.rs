//! Simulated suspect generator.
//!
//! A faithful model of srandom's output path, used as the positive
//! control for the detector: anything drawn from [`SrandomSource`] should
//! be flagged on every trial.

mod srandom;
mod xorshift128;

pub use srandom::{Layout, SrandomSource};
pub use xorshift128::Xorshift128;
