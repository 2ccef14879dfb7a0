//! Fingerprinting srandom output.
//!
//! A check draws several independent buffers from an entropy source and
//! runs a fixed set of probes over each. A probe treats combinations of
//! buffer words as splitmix outputs, inverts the mixer to recover the
//! counter, and confirms the guess against words it did not use. Genuine
//! srandom output passes every trial; random data passes one with
//! probability near 2^-62.
//!
//! ```text
//! source ─► EntropyBuffer ─► probes ─► TrialOutcome ─┐
//!   ▲                                                ├─► Report (AND)
//!   └──────────────── repeat per trial ──────────────┘
//! ```

mod buffer;
mod config;
mod detector;
mod probe;
mod report;

pub use buffer::{EntropyBuffer, BLOCK_WORDS, BUFFER_WORDS, LANES, RAW_WORDS, TAIL_WORDS};
pub use config::{ConfigError, DetectorConfig, FileConfig, SimulationConfig, MAX_TRIALS};
pub use detector::{analyze, Detector};
pub use probe::{Parity, Probe, ProbeId, ProbeMatch, PROBES};
pub use report::{Report, TrialOutcome};
