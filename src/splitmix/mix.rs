//! Forward and inverse mixing.

use super::GeneratorState;
use crate::word::Word64;

/// Golden-ratio increment added to the counter on every step.
pub const INCREMENT: Word64 = Word64::from_u64(0x9E37_79B9_7F4A_7C15);

/// Shift of the final xorshift that produces the output.
const FINAL_SHIFT: u32 = 31;

/// One `z = (z ^ (z >> shift)) * multiplier` avalanche round.
struct Round {
    shift: u32,
    multiplier: Word64,
    inverse: Word64,
}

impl Round {
    const fn new(shift: u32, multiplier: u64) -> Self {
        let multiplier = Word64::from_u64(multiplier);
        Self {
            shift,
            multiplier,
            inverse: multiplier.mul_inverse(),
        }
    }
}

const ROUNDS: [Round; 2] = [
    Round::new(30, 0xBF58_476D_1CE4_E5B9),
    Round::new(27, 0x94D0_49BB_1331_11EB),
];

/// Advances the generator one step.
///
/// Returns the new state and the output derived from it. Callers must
/// carry the returned state forward; the input state is not modified.
pub fn mix(state: GeneratorState) -> (GeneratorState, Word64) {
    let counter = state.counter() + INCREMENT;
    (GeneratorState::new(counter), avalanche(counter))
}

fn avalanche(counter: Word64) -> Word64 {
    let mut z = counter;
    for round in &ROUNDS {
        z = (z ^ (z >> round.shift)) * round.multiplier;
    }
    z ^ (z >> FINAL_SHIFT)
}

/// Recovers the state whose [`mix`] output is `output`.
///
/// The result is the counter *after* the increment, i.e. the state `mix`
/// returns alongside `output`. Any 64-bit value has exactly one preimage,
/// so this is defined for arbitrary input, not only genuine outputs.
pub fn unmix(output: Word64) -> GeneratorState {
    let mut z = unfold_xorshift(output, FINAL_SHIFT);
    for round in ROUNDS.iter().rev() {
        z = unfold_xorshift(z * round.inverse, round.shift);
    }
    GeneratorState::new(z)
}

/// Inverts `z ^ (z >> shift)` for `0 < shift < 64`.
///
/// XORs in copies of the input shifted by `shift`, `2 * shift`, ... until
/// the shift reaches 64; the partial terms telescope back to `z`.
pub fn unfold_xorshift(value: Word64, shift: u32) -> Word64 {
    debug_assert!(shift > 0 && shift < 64, "fold shift out of range");
    let mut z = value;
    let mut offset = shift;
    while offset < 64 {
        z ^= value >> offset;
        offset += shift;
    }
    z
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_first_output_from_zero_seed() {
        let (state, output) = mix(GeneratorState::default());
        assert_eq!(state.counter(), INCREMENT);
        assert_eq!(output, Word64::from_u64(0xE220_A839_7B1D_CDAF));
    }

    #[test]
    fn test_unmix_known_output() {
        let state = unmix(Word64::from_u64(0xE220_A839_7B1D_CDAF));
        assert_eq!(state.counter(), INCREMENT);
    }

    #[test]
    fn test_inverse_constants() {
        assert_eq!(ROUNDS[0].inverse, Word64::from_u64(0x96DE_1B17_3F11_9089));
        assert_eq!(ROUNDS[1].inverse, Word64::from_u64(0x3196_42B2_D24D_8EC3));
    }

    #[test]
    fn test_unfold_large_shift_is_single_fold() {
        let value = Word64::from_u64(0xDEAD_BEEF_0123_4567);
        assert_eq!(unfold_xorshift(value, 40), value ^ (value >> 40));
    }

    proptest! {
        #[test]
        fn prop_unmix_inverts_mix(seed: u64) {
            let (state, output) = mix(GeneratorState::from(seed));
            prop_assert_eq!(unmix(output), state);
        }

        #[test]
        fn prop_mix_inverts_unmix(output: u64) {
            let output = Word64::from_u64(output);
            let recovered = unmix(output);
            let previous = GeneratorState::new(recovered.counter() - INCREMENT);
            prop_assert_eq!(mix(previous), (recovered, output));
        }

        #[test]
        fn prop_unfold_inverts_fold(value: u64, shift in 1u32..64) {
            let value = Word64::from_u64(value);
            let folded = value ^ (value >> shift);
            prop_assert_eq!(unfold_xorshift(folded, shift), value);
        }
    }
}
