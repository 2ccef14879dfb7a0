//! 64-bit unsigned arithmetic emulated over pairs of 32-bit words.
//!
//! Every operation is total: overflow wraps, shifts truncate. Results are
//! bit-exact with native `u64` wrapping arithmetic, which is the baseline
//! the mixer and detector rely on.

mod word64;

pub use word64::{ParseWordError, Word64};
