//! Generator counter value.

use crate::word::Word64;
use serde::{Serialize, Serializer};

/// The internal counter of a splitmix generator at one point of its
/// sequence.
///
/// Treated as a plain value: [`mix`](super::mix) and [`skip`](super::skip)
/// return a new state rather than mutating one in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GeneratorState(Word64);

impl GeneratorState {
    /// Wraps a counter value.
    #[inline]
    pub const fn new(counter: Word64) -> Self {
        Self(counter)
    }

    /// Returns the counter value.
    #[inline]
    pub const fn counter(self) -> Word64 {
        self.0
    }
}

impl From<u64> for GeneratorState {
    fn from(counter: u64) -> Self {
        Self(Word64::from_u64(counter))
    }
}

impl From<Word64> for GeneratorState {
    fn from(counter: Word64) -> Self {
        Self(counter)
    }
}

/// Serialized as the hex counter, the same text `Display` produces.
impl Serialize for GeneratorState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl std::fmt::Display for GeneratorState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}
