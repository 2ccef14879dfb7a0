//! srandom detection library
//!
//! Detects whether a system's general-purpose random source is secretly
//! the srandom generator, whose output is a thin XOR layer over splitmix64
//! and xorshift128+, rather than a sound entropy source.
//!
//! # Architecture
//!
//! ```text
//! word ─► splitmix ─► detection ◄── source
//!              │           │
//!              └─► simulation (srandom model, positive control)
//!                          │
//!                   analysis, metrics
//! ```
//!
//! - [`word`]: 64-bit modular arithmetic over pairs of 32-bit words
//! - [`splitmix`]: the generator step, its inverse, and counter skipping
//! - [`detection`]: probes, trials, and the combined multi-trial check
//! - [`source`]: the entropy interface and its adapters
//!
//! # Design Principles
//!
//! - **Explicit failure**: an unavailable source is an error, never a
//!   verdict
//! - **Stateless trials**: each trial sees only its own buffer
//! - **Amplified confidence**: every trial must agree before reporting
//!   detection; the composed 2^-248 false-positive figure assumes
//!   independent draws and is not a proven bound
//!
//! # Example
//!
//! ```no_run
//! use srandom_detect::{Detector, RngSource};
//!
//! let detector = Detector::default();
//! let detected = detector.detect(&mut RngSource::os()).unwrap();
//!
//! if detected {
//!     println!("BAD: srandom PRNG detected");
//! }
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod analysis;
pub mod detection;
pub mod metrics;
pub mod simulation;
pub mod source;
pub mod splitmix;
pub mod word;

// Re-export commonly used types at crate root
pub use detection::{Detector, DetectorConfig, EntropyBuffer, ProbeId, Report};
pub use simulation::{Layout, SrandomSource};
pub use source::{EntropyError, EntropySource, ReplaySource, RngSource};
pub use splitmix::{mix, skip, unmix, GeneratorState};
pub use word::Word64;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
