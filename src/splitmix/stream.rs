//! A stateful splitmix64 stream.

use super::{mix, GeneratorState};
use crate::word::Word64;

/// Splitmix64 as an iterator of outputs.
///
/// Owns its state and threads it through [`mix`] on every call. Useful
/// wherever a sequence of generator outputs is needed rather than single
/// steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitMix64 {
    state: GeneratorState,
}

impl SplitMix64 {
    /// Starts a stream whose first output is the mix of `seed + INCREMENT`.
    pub fn new(seed: impl Into<GeneratorState>) -> Self {
        Self { state: seed.into() }
    }

    /// Returns the next output and advances the state.
    pub fn next_word(&mut self) -> Word64 {
        let (state, output) = mix(self.state);
        self.state = state;
        output
    }
}

impl Iterator for SplitMix64 {
    type Item = Word64;

    fn next(&mut self) -> Option<Word64> {
        Some(self.next_word())
    }
}
