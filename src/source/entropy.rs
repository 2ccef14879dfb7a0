//! Entropy source abstraction.
//!
//! A trait-based seam between the detector and whatever produces the
//! words under test, so the same checks run against the host generator,
//! a simulated suspect, or a recording.

use thiserror::Error;

/// Errors that can occur while drawing entropy.
///
/// Any of these aborts a check: analysing a partial or zero-filled
/// buffer would make the verdict meaningless.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntropyError {
    /// The underlying generator reported a failure.
    #[error("entropy source unavailable: {0}")]
    Unavailable(String),
    /// A finite source has fewer words left than requested.
    #[error("entropy source exhausted: requested {requested} words, {available} available")]
    Exhausted {
        /// Words asked for.
        requested: usize,
        /// Words left in the source.
        available: usize,
    },
}

/// A source of 32-bit words to be tested.
pub trait EntropySource {
    /// Fills every word of `words`, or fails without a usable result.
    fn fill(&mut self, words: &mut [u32]) -> Result<(), EntropyError>;

    /// Short label used in logs.
    fn name(&self) -> &str {
        "entropy"
    }
}

impl<S: EntropySource + ?Sized> EntropySource for &mut S {
    fn fill(&mut self, words: &mut [u32]) -> Result<(), EntropyError> {
        (**self).fill(words)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<S: EntropySource + ?Sized> EntropySource for Box<S> {
    fn fill(&mut self, words: &mut [u32]) -> Result<(), EntropyError> {
        (**self).fill(words)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
