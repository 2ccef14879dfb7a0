//! xorshift128+ over [`Word64`].

use crate::word::Word64;

/// xorshift128+ with shifts 23/17/26.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Xorshift128 {
    state: [Word64; 2],
}

impl Xorshift128 {
    /// Creates a generator from two state words; they must not both be 0.
    pub fn new(s0: Word64, s1: Word64) -> Self {
        Self { state: [s0, s1] }
    }

    /// Returns the next output.
    pub fn next_word(&mut self) -> Word64 {
        let [s0, s1] = self.state;
        let mut x = s0 ^ (s0 << 23);
        x = x ^ (x >> 17) ^ s1 ^ (s1 >> 26);
        self.state = [s1, x];
        x + s1
    }
}
