//! The per-trial sample of entropy.

use crate::source::{EntropyError, EntropySource};
use crate::word::Word64;

/// Words in one pool block (a 512-byte read).
pub const BLOCK_WORDS: usize = 64;
/// Words sampled past the block boundary.
pub const TAIL_WORDS: usize = 4;
/// 64-bit words in one buffer.
pub const BUFFER_WORDS: usize = BLOCK_WORDS + TAIL_WORDS;
/// 32-bit words drawn from the source to fill one buffer.
pub const RAW_WORDS: usize = BUFFER_WORDS * 2;

/// Number of lanes a buffer exposes.
pub const LANES: usize = TAIL_WORDS - 1;

/// 68 words drawn in one read.
///
/// If the source is srandom, words `0..64` are one pool array and words
/// `64..68` are the head of the same array after its next refresh. The
/// refresh sets `new[k] = old[k + 1] ^ ...` for `k < 3` and builds
/// `new[3]` from generator output alone, so XOR-ing those pairs
/// (the *lanes*) cancels the old array contents.
#[derive(Clone, PartialEq, Eq)]
pub struct EntropyBuffer {
    words: [Word64; BUFFER_WORDS],
}

impl EntropyBuffer {
    /// Draws a fresh buffer from `source`.
    ///
    /// Fails if the source cannot supply every word.
    pub fn draw<S: EntropySource + ?Sized>(source: &mut S) -> Result<Self, EntropyError> {
        let mut raw = [0u32; RAW_WORDS];
        source.fill(&mut raw)?;
        Ok(Self::from_raw(&raw))
    }

    /// Pairs raw 32-bit words into 64-bit words, low half first.
    pub fn from_raw(raw: &[u32; RAW_WORDS]) -> Self {
        let mut words = [Word64::ZERO; BUFFER_WORDS];
        for (word, pair) in words.iter_mut().zip(raw.chunks_exact(2)) {
            *word = Word64::from_halves(pair[0], pair[1]);
        }
        Self { words }
    }

    /// Wraps already-paired words.
    pub fn from_words(words: [Word64; BUFFER_WORDS]) -> Self {
        Self { words }
    }

    /// Returns all words.
    #[inline]
    pub fn words(&self) -> &[Word64; BUFFER_WORDS] {
        &self.words
    }

    /// `old[k + 1] ^ new[k]` for lane `k` in `0..LANES`.
    #[inline]
    pub fn lane(&self, k: usize) -> Word64 {
        debug_assert!(k < LANES, "lane out of range");
        self.words[k + 1] ^ self.words[BLOCK_WORDS + k]
    }

    /// The last word, `new[3]`.
    #[inline]
    pub fn tail(&self) -> Word64 {
        self.words[BUFFER_WORDS - 1]
    }
}

impl std::fmt::Debug for EntropyBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let lanes: [Word64; LANES] = std::array::from_fn(|k| self.lane(k));
        f.debug_struct("EntropyBuffer")
            .field("lanes", &lanes)
            .field("tail", &self.tail())
            .finish()
    }
}
