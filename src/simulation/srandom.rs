//! Model of the srandom generator.
//!
//! srandom keeps a set of 64-word arrays plus one selector array. Each
//! read picks an array using four bits of the selector, copies it out one
//! 512-byte block at a time, and rewrites the array after every block.
//! The rewrite folds splitmix output (and, in the `Norm` layout,
//! xorshift128+ output) into the array, which is what the detector's
//! probes key on.

use super::Xorshift128;
use crate::source::{EntropyError, EntropySource};
use crate::splitmix::SplitMix64;
use crate::word::Word64;
use rand_chacha::ChaCha20Rng;
use rand_core::{RngCore, SeedableRng};

/// Words per array; one 512-byte block.
const ARRAY_WORDS: usize = 64;
/// Selector reads before the selector array itself is rewritten.
const SELECTOR_PERIOD: usize = 1021;
/// Bytes copied per block.
const BLOCK_BYTES: usize = ARRAY_WORDS * 8;

/// Which of srandom's array layouts to model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// 16 arrays; rewrites mix splitmix with xorshift128+.
    Norm,
    /// 32 arrays; rewrites use splitmix alone.
    Uhs,
}

impl Layout {
    fn array_count(self) -> usize {
        match self {
            Layout::Norm => 16,
            Layout::Uhs => 32,
        }
    }

    /// Label used in logs and reports.
    pub fn label(self) -> &'static str {
        match self {
            Layout::Norm => "srandom-norm",
            Layout::Uhs => "srandom-uhs",
        }
    }
}

type Array = [Word64; ARRAY_WORDS];

/// An entropy source that behaves like srandom.
pub struct SrandomSource {
    layout: Layout,
    arrays: Vec<Array>,
    selector: Array,
    selector_position: usize,
    splitmix: SplitMix64,
    xorshift: Xorshift128,
}

impl SrandomSource {
    /// Seeds every array and generator from `rng`.
    pub fn from_rng<R: RngCore>(layout: Layout, rng: &mut R) -> Self {
        let mut word = || Word64::from_u64(rng.next_u64());
        let splitmix = SplitMix64::new(word());
        let xorshift = Xorshift128::new(word(), word());
        let selector: Array = std::array::from_fn(|_| word());
        let arrays = (0..layout.array_count())
            .map(|_| std::array::from_fn(|_| word()))
            .collect();

        Self {
            layout,
            arrays,
            selector,
            selector_position: 0,
            splitmix,
            xorshift,
        }
    }

    /// Reproducible instance seeded through ChaCha20.
    pub fn from_seed(layout: Layout, seed: u64) -> Self {
        Self::from_rng(layout, &mut ChaCha20Rng::seed_from_u64(seed))
    }

    /// Returns the modelled layout.
    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// One read of `byte_len` bytes, as whole words.
    ///
    /// Always copies `byte_len / 512 + 1` blocks from a single array,
    /// rewriting the array after each.
    fn read(&mut self, byte_len: usize) -> Vec<Word64> {
        let index = self.next_array();
        let blocks = byte_len / BLOCK_BYTES + 1;

        let mut out = Vec::with_capacity(blocks * ARRAY_WORDS);
        for _ in 0..blocks {
            out.extend_from_slice(&self.arrays[index]);
            match self.layout {
                Layout::Norm => {
                    rewrite_mixed(&mut self.arrays[index], &mut self.splitmix, &mut self.xorshift)
                }
                Layout::Uhs => rewrite_direct(&mut self.arrays[index], &mut self.splitmix),
            }
        }
        out
    }

    /// Picks the array for the next read from four selector bits.
    fn next_array(&mut self) -> usize {
        let word = self.selector[self.selector_position / 16];
        let roll = (self.selector_position % 16) as u32 * 4;
        let index = (word >> roll).lo() as usize & (self.arrays.len() - 1);

        self.selector_position += 1;
        if self.selector_position >= SELECTOR_PERIOD {
            self.selector_position = 0;
            rewrite_mixed(&mut self.selector, &mut self.splitmix, &mut self.xorshift);
        }
        index
    }
}

impl EntropySource for SrandomSource {
    fn fill(&mut self, words: &mut [u32]) -> Result<(), EntropyError> {
        let output = self.read(words.len() * 4);
        for (pair, word) in words.chunks_mut(2).zip(&output) {
            pair[0] = word.lo();
            if let Some(hi) = pair.get_mut(1) {
                *hi = word.hi();
            }
        }
        Ok(())
    }

    fn name(&self) -> &str {
        self.layout.label()
    }
}

/// Rewrite with three splitmix outputs and two xorshift words per group
/// of four.
fn rewrite_mixed(array: &mut Array, splitmix: &mut SplitMix64, xorshift: &mut Xorshift128) {
    let (z1, z2, z3) = (splitmix.next_word(), splitmix.next_word(), splitmix.next_word());

    for i in (0..ARRAY_WORDS).step_by(4) {
        let x = xorshift.next_word();
        let y = xorshift.next_word();
        if z1.is_odd() {
            array[i] = array[i + 1] ^ x ^ z2;
            array[i + 1] = array[i + 2] ^ x ^ y;
            array[i + 2] = array[i + 3] ^ y ^ z3;
            array[i + 3] = x ^ y ^ z1;
        } else {
            array[i] = array[i + 1] ^ x ^ y;
            array[i + 1] = array[i + 2] ^ y ^ z1;
            array[i + 2] = array[i + 3] ^ x ^ z2;
            array[i + 3] = x ^ y ^ z3;
        }
    }
}

/// Rewrite with one fixed splitmix output and a fresh one per group.
fn rewrite_direct(array: &mut Array, splitmix: &mut SplitMix64) {
    let z1 = splitmix.next_word();

    for i in (0..ARRAY_WORDS).step_by(4) {
        let x = splitmix.next_word();
        if z1.is_odd() {
            array[i] = array[i + 1] ^ x ^ z1;
            array[i + 1] = array[i + 2] ^ x;
        } else {
            array[i] = array[i + 1] ^ x;
            array[i + 1] = array[i + 2] ^ x ^ z1;
        }
        array[i + 2] = array[i + 3] ^ x ^ z1;
        array[i + 3] = x ^ z1;
    }
}
