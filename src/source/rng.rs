//! Adapter from `rand_core` generators to [`EntropySource`].

use super::{EntropyError, EntropySource};
use rand_chacha::ChaCha20Rng;
use rand_core::{OsRng, RngCore, SeedableRng};

/// Draws words from any [`RngCore`] through its fallible fill.
///
/// Bytes are decoded as little-endian words, matching how a typed
/// 32-bit view over a byte buffer reads on the platforms this targets.
pub struct RngSource<R> {
    /// The wrapped generator.
    rng: R,
    /// Label reported in logs.
    label: &'static str,
    /// Words handed out so far.
    words_drawn: u64,
}

impl RngSource<OsRng> {
    /// Samples the operating system's generator.
    ///
    /// This is the source a real check runs against.
    pub fn os() -> Self {
        Self::new(OsRng, "os")
    }
}

impl RngSource<ChaCha20Rng> {
    /// A reproducible ChaCha20 stream.
    ///
    /// Stands in for a sound entropy source in simulations and tests.
    pub fn chacha(seed: u64) -> Self {
        Self::new(ChaCha20Rng::seed_from_u64(seed), "chacha20")
    }
}

impl<R: RngCore> RngSource<R> {
    /// Wraps a generator under the given log label.
    pub fn new(rng: R, label: &'static str) -> Self {
        Self {
            rng,
            label,
            words_drawn: 0,
        }
    }

    /// Returns the number of words drawn so far.
    pub fn words_drawn(&self) -> u64 {
        self.words_drawn
    }
}

impl<R: RngCore> EntropySource for RngSource<R> {
    fn fill(&mut self, words: &mut [u32]) -> Result<(), EntropyError> {
        let mut bytes = vec![0u8; words.len() * 4];
        self.rng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| EntropyError::Unavailable(e.to_string()))?;

        for (word, chunk) in words.iter_mut().zip(bytes.chunks_exact(4)) {
            *word = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }
        self.words_drawn += words.len() as u64;

        tracing::trace!(source = self.label, words = words.len(), "Drew entropy");
        Ok(())
    }

    fn name(&self) -> &str {
        self.label
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::num::NonZeroU32;

    /// Generator whose fallible fill always fails.
    struct BrokenRng;

    impl RngCore for BrokenRng {
        fn next_u32(&mut self) -> u32 {
            0
        }

        fn next_u64(&mut self) -> u64 {
            0
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            dest.fill(0);
        }

        fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> Result<(), rand_core::Error> {
            let code = NonZeroU32::new(rand_core::Error::CUSTOM_START + 7).unwrap();
            Err(rand_core::Error::from(code))
        }
    }

    #[test]
    fn test_chacha_is_reproducible() {
        let mut a = RngSource::chacha(9);
        let mut b = RngSource::chacha(9);

        let mut out_a = [0u32; 16];
        let mut out_b = [0u32; 16];
        a.fill(&mut out_a).unwrap();
        b.fill(&mut out_b).unwrap();

        assert_eq!(out_a, out_b);
        assert_eq!(a.words_drawn(), 16);
    }

    #[test]
    fn test_words_are_little_endian() {
        let mut reference = ChaCha20Rng::seed_from_u64(3);
        let mut bytes = [0u8; 8];
        reference.fill_bytes(&mut bytes);

        let mut source = RngSource::chacha(3);
        let mut words = [0u32; 2];
        source.fill(&mut words).unwrap();

        assert_eq!(words[0], u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]));
        assert_eq!(words[1], u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]));
    }

    #[test]
    fn test_os_source_fills() {
        let mut source = RngSource::os();
        let mut words = [0u32; 64];
        assert!(source.fill(&mut words).is_ok());
        assert_eq!(source.name(), "os");
    }

    #[test]
    fn test_failure_is_reported() {
        let mut source = RngSource::new(BrokenRng, "broken");
        let mut words = [0u32; 4];

        assert!(matches!(
            source.fill(&mut words),
            Err(EntropyError::Unavailable(_))
        ));
        assert_eq!(source.words_drawn(), 0);
    }
}
