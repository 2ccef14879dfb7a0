//! Entropy sources the detector can sample.
//!
//! The detector only sees [`EntropySource`]: a capability that fills a
//! buffer of 32-bit words or fails. Adapters cover the OS generator, a
//! seeded ChaCha20 stream as a sound reference, and replay of a recorded
//! buffer.

mod entropy;
mod replay;
mod rng;

pub use entropy::{EntropyError, EntropySource};
pub use replay::ReplaySource;
pub use rng::RngSource;
