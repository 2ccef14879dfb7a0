//! The `Word64` value type.

use std::fmt;
use std::ops::{Add, BitXor, BitXorAssign, Mul, Shl, Shr, Sub};
use std::str::FromStr;
use thiserror::Error;

/// A 64-bit unsigned value stored as a low and a high 32-bit half.
///
/// All arithmetic is modulo 2^64. The type is `Copy` and carries no
/// invariants beyond its two halves.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Word64 {
    lo: u32,
    hi: u32,
}

/// Errors from parsing a hexadecimal word.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseWordError {
    /// No digits after the optional prefix.
    #[error("empty input")]
    Empty,
    /// More digits than fit in 64 bits.
    #[error("more than 16 hex digits: {0}")]
    TooLong(usize),
    /// A character that is not a hex digit or `_`.
    #[error("invalid hex digit {0:?}")]
    InvalidDigit(char),
}

impl Word64 {
    /// The value 0.
    pub const ZERO: Self = Self { lo: 0, hi: 0 };
    /// The value 1.
    pub const ONE: Self = Self { lo: 1, hi: 0 };
    /// The value 2^64 - 1.
    pub const MAX: Self = Self {
        lo: u32::MAX,
        hi: u32::MAX,
    };

    /// Builds a word from its low and high halves.
    #[inline]
    pub const fn from_halves(lo: u32, hi: u32) -> Self {
        Self { lo, hi }
    }

    /// Splits a native `u64` into halves.
    #[inline]
    pub const fn from_u64(value: u64) -> Self {
        Self {
            lo: value as u32,
            hi: (value >> 32) as u32,
        }
    }

    /// Joins the halves back into a native `u64`.
    #[inline]
    pub const fn to_u64(self) -> u64 {
        ((self.hi as u64) << 32) | self.lo as u64
    }

    /// Returns the low 32 bits.
    #[inline]
    pub const fn lo(self) -> u32 {
        self.lo
    }

    /// Returns the high 32 bits.
    #[inline]
    pub const fn hi(self) -> u32 {
        self.hi
    }

    /// Returns true if bit 0 is set.
    #[inline]
    pub const fn is_odd(self) -> bool {
        self.lo & 1 == 1
    }

    /// Sum modulo 2^64. The carry out of the low half is added into the
    /// high half exactly once.
    pub const fn wrapping_add(self, rhs: Self) -> Self {
        let (lo, carry) = self.lo.overflowing_add(rhs.lo);
        let hi = self.hi.wrapping_add(rhs.hi).wrapping_add(carry as u32);
        Self { lo, hi }
    }

    /// Difference modulo 2^64, borrowing from the high half.
    pub const fn wrapping_sub(self, rhs: Self) -> Self {
        let (lo, borrow) = self.lo.overflowing_sub(rhs.lo);
        let hi = self.hi.wrapping_sub(rhs.hi).wrapping_sub(borrow as u32);
        Self { lo, hi }
    }

    /// Truncated 32x32 product: the low 32 bits of `a * b`.
    #[inline]
    pub const fn mul32(a: u32, b: u32) -> u32 {
        a.wrapping_mul(b)
    }

    /// Exact 32x32 -> 64 product.
    ///
    /// Schoolbook multiplication over 16-bit digits: four partial
    /// products, with the carries of the two middle terms folded into
    /// the high half.
    pub const fn mul_widening32(a: u32, b: u32) -> Self {
        let (a0, a1) = (a & 0xffff, a >> 16);
        let (b0, b1) = (b & 0xffff, b >> 16);

        let lo = a0 * b0;
        let mut hi = a1 * b1;
        let (mid, mid_carry) = (a0 * b1).overflowing_add(a1 * b0);
        if mid_carry {
            // bit 32 of the middle sum sits at bit 48 of the product
            hi = hi.wrapping_add(0x1_0000);
        }

        let (lo, lo_carry) = lo.overflowing_add(mid << 16);
        hi = hi.wrapping_add(mid >> 16).wrapping_add(lo_carry as u32);
        Self { lo, hi }
    }

    /// Product modulo 2^64.
    ///
    /// `lo x lo` is computed exactly; the two cross terms only reach the
    /// high half, so their truncated products suffice. `hi x hi` lands
    /// entirely above bit 63 and is dropped.
    pub const fn wrapping_mul(self, rhs: Self) -> Self {
        let low = Self::mul_widening32(self.lo, rhs.lo);
        let hi = low
            .hi
            .wrapping_add(Self::mul32(self.lo, rhs.hi))
            .wrapping_add(Self::mul32(self.hi, rhs.lo));
        Self { lo: low.lo, hi }
    }

    /// Logical left shift. `n` is taken modulo 64.
    pub const fn shift_left(self, n: u32) -> Self {
        debug_assert!(n < 64, "shift amount out of range");
        let n = n & 63;
        if n == 0 {
            self
        } else if n < 32 {
            Self {
                lo: self.lo << n,
                hi: (self.hi << n) | (self.lo >> (32 - n)),
            }
        } else {
            Self {
                lo: 0,
                hi: self.lo << (n - 32),
            }
        }
    }

    /// Logical right shift. `n` is taken modulo 64.
    pub const fn shift_right(self, n: u32) -> Self {
        debug_assert!(n < 64, "shift amount out of range");
        let n = n & 63;
        if n == 0 {
            self
        } else if n < 32 {
            Self {
                lo: (self.lo >> n) | (self.hi << (32 - n)),
                hi: self.hi >> n,
            }
        } else {
            Self {
                lo: self.hi >> (n - 32),
                hi: 0,
            }
        }
    }

    /// Bitwise exclusive or.
    #[inline]
    pub const fn xor(self, rhs: Self) -> Self {
        Self {
            lo: self.lo ^ rhs.lo,
            hi: self.hi ^ rhs.hi,
        }
    }

    /// Multiplicative inverse modulo 2^64 of an odd value.
    ///
    /// Newton iteration `y = y * (2 - x * y)`: starting from `y = x`
    /// (correct to 3 bits for odd `x`), five rounds give 96 correct bits.
    /// Even inputs have no inverse and yield an unspecified value.
    pub const fn mul_inverse(self) -> Self {
        let two = Self::from_u64(2);
        let mut y = self;
        let mut round = 0;
        while round < 5 {
            y = y.wrapping_mul(two.wrapping_sub(self.wrapping_mul(y)));
            round += 1;
        }
        y
    }
}

impl From<u64> for Word64 {
    fn from(value: u64) -> Self {
        Self::from_u64(value)
    }
}

impl From<Word64> for u64 {
    fn from(word: Word64) -> Self {
        word.to_u64()
    }
}

impl Add for Word64 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        self.wrapping_add(rhs)
    }
}

impl Sub for Word64 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self.wrapping_sub(rhs)
    }
}

impl Mul for Word64 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        self.wrapping_mul(rhs)
    }
}

impl BitXor for Word64 {
    type Output = Self;

    fn bitxor(self, rhs: Self) -> Self {
        self.xor(rhs)
    }
}

impl BitXorAssign for Word64 {
    fn bitxor_assign(&mut self, rhs: Self) {
        *self = self.xor(rhs);
    }
}

impl Shl<u32> for Word64 {
    type Output = Self;

    fn shl(self, n: u32) -> Self {
        self.shift_left(n)
    }
}

impl Shr<u32> for Word64 {
    type Output = Self;

    fn shr(self, n: u32) -> Self {
        self.shift_right(n)
    }
}

impl FromStr for Word64 {
    type Err = ParseWordError;

    /// Parses up to 16 hex digits, with an optional `0x` prefix and `_`
    /// separators.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .trim()
            .strip_prefix("0x")
            .or_else(|| s.trim().strip_prefix("0X"))
            .unwrap_or_else(|| s.trim());

        let mut value = Self::ZERO;
        let mut count = 0usize;
        for c in digits.chars().filter(|&c| c != '_') {
            let nibble = c.to_digit(16).ok_or(ParseWordError::InvalidDigit(c))?;
            value = value.shift_left(4).xor(Self::from_u64(nibble as u64));
            count += 1;
        }

        match count {
            0 => Err(ParseWordError::Empty),
            1..=16 => Ok(value),
            n => Err(ParseWordError::TooLong(n)),
        }
    }
}

impl fmt::Debug for Word64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Word64({:#010x}_{:08x})", self.hi, self.lo)
    }
}

impl fmt::Display for Word64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08x}{:08x}", self.hi, self.lo)
    }
}

impl fmt::LowerHex for Word64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.to_u64(), f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn w(value: u64) -> Word64 {
        Word64::from_u64(value)
    }

    #[test]
    fn test_halves_round_trip() {
        let word = Word64::from_halves(0x7f4a7c15, 0x9e3779b9);
        assert_eq!(word.to_u64(), 0x9E3779B97F4A7C15);
        assert_eq!(word.lo(), 0x7f4a7c15);
        assert_eq!(word.hi(), 0x9e3779b9);
    }

    #[test]
    fn test_add_wraps_at_max() {
        assert_eq!(Word64::MAX + Word64::ONE, Word64::ZERO);
        assert_eq!(w(0xFFFF_FFFF) + Word64::ONE, w(0x1_0000_0000));
    }

    #[test]
    fn test_sub_borrows() {
        assert_eq!(Word64::ZERO - Word64::ONE, Word64::MAX);
        assert_eq!(w(0x1_0000_0000) - Word64::ONE, w(0xFFFF_FFFF));
    }

    #[test]
    fn test_mul_drops_high_bits() {
        assert_eq!(w(2) * w(1 << 63), Word64::ZERO);
        assert_eq!(Word64::MAX * Word64::MAX, Word64::ONE);
    }

    #[test]
    fn test_mul_widening32_extremes() {
        let product = Word64::mul_widening32(u32::MAX, u32::MAX);
        assert_eq!(product.to_u64(), 0xFFFF_FFFE_0000_0001);
        assert_eq!(Word64::mul_widening32(0x1_0000 - 1, 0x1_0001).to_u64(), 0xFFFF_FFFF);
    }

    #[test]
    fn test_shift_across_halves() {
        let x = w(0x8000_0001_8000_0001);
        assert_eq!(x.shift_right(0), x);
        assert_eq!(x.shift_right(31).to_u64(), 0x8000_0001_8000_0001 >> 31);
        assert_eq!(x.shift_right(32).to_u64(), 0x8000_0001);
        assert_eq!(x.shift_right(63).to_u64(), 1);
        assert_eq!(x.shift_left(32).to_u64(), 0x8000_0001_0000_0000);
        assert_eq!(x.shift_left(63).to_u64(), 1 << 63);
    }

    #[test]
    fn test_mul_inverse_of_mixer_constants() {
        assert_eq!(
            w(0xBF58476D1CE4E5B9).mul_inverse(),
            w(0x96DE1B173F119089)
        );
        assert_eq!(
            w(0x94D049BB133111EB).mul_inverse(),
            w(0x319642B2D24D8EC3)
        );
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!("0x9e3779b97f4a7c15".parse(), Ok(w(0x9E3779B97F4A7C15)));
        assert_eq!("FF_FF".parse(), Ok(w(0xFFFF)));
        assert_eq!("".parse::<Word64>(), Err(ParseWordError::Empty));
        assert_eq!("0x".parse::<Word64>(), Err(ParseWordError::Empty));
        assert_eq!(
            "12345678901234567".parse::<Word64>(),
            Err(ParseWordError::TooLong(17))
        );
        assert_eq!("12g4".parse::<Word64>(), Err(ParseWordError::InvalidDigit('g')));
    }

    #[test]
    fn test_display_is_zero_padded_hex() {
        assert_eq!(w(0xabc).to_string(), "0x0000000000000abc");
        assert_eq!(format!("{:x}", w(0xabc)), "abc");
    }

    proptest! {
        #[test]
        fn prop_add_matches_native(a: u64, b: u64) {
            prop_assert_eq!((w(a) + w(b)).to_u64(), a.wrapping_add(b));
        }

        #[test]
        fn prop_sub_matches_native(a: u64, b: u64) {
            prop_assert_eq!((w(a) - w(b)).to_u64(), a.wrapping_sub(b));
        }

        #[test]
        fn prop_mul_matches_native(a: u64, b: u64) {
            prop_assert_eq!((w(a) * w(b)).to_u64(), a.wrapping_mul(b));
        }

        #[test]
        fn prop_mul_widening32_is_exact(a: u32, b: u32) {
            prop_assert_eq!(Word64::mul_widening32(a, b).to_u64(), a as u64 * b as u64);
        }

        #[test]
        fn prop_shifts_match_native(a: u64, n in 0u32..64) {
            prop_assert_eq!((w(a) << n).to_u64(), a << n);
            prop_assert_eq!((w(a) >> n).to_u64(), a >> n);
        }

        #[test]
        fn prop_xor_matches_native(a: u64, b: u64) {
            prop_assert_eq!((w(a) ^ w(b)).to_u64(), a ^ b);
        }

        #[test]
        fn prop_mul_inverse_of_odd(a: u64) {
            let odd = w(a | 1);
            prop_assert_eq!(odd * odd.mul_inverse(), Word64::ONE);
        }
    }
}
