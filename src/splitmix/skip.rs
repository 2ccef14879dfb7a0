//! Moving the counter by whole steps.

use super::{GeneratorState, INCREMENT};
use crate::word::Word64;

/// Moves `state` forward by `count` increments, or back by `|count|`
/// when `count` is negative.
///
/// Equivalent to adding (or subtracting) [`INCREMENT`] `|count|` times,
/// computed as one multiply so large counts cost the same as small ones.
pub fn skip(state: GeneratorState, count: i64) -> GeneratorState {
    let distance = INCREMENT * Word64::from_u64(count.unsigned_abs());
    let counter = if count >= 0 {
        state.counter() + distance
    } else {
        state.counter() - distance
    };
    GeneratorState::new(counter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::splitmix::mix;
    use proptest::prelude::*;

    #[test]
    fn test_zero_is_noop() {
        let state = GeneratorState::from(0x1234_5678_9ABC_DEF0);
        assert_eq!(skip(state, 0), state);
    }

    #[test]
    fn test_forward_matches_repeated_mix() {
        let start = GeneratorState::from(42);
        let mut state = start;
        for _ in 0..17 {
            state = mix(state).0;
        }
        assert_eq!(skip(start, 17), state);
    }

    #[test]
    fn test_rewind_matches_repeated_subtraction() {
        let start = GeneratorState::from(3);
        let mut counter = start.counter();
        for _ in 0..5 {
            counter = counter - INCREMENT;
        }
        assert_eq!(skip(start, -5).counter(), counter);
    }

    #[test]
    fn test_rewind_then_mix_replays_outputs() {
        let start = GeneratorState::from(0xFEED);
        let (after_one, first) = mix(start);
        let (after_two, _) = mix(after_one);

        let rewound = skip(after_two, -2);
        assert_eq!(rewound, start);
        assert_eq!(mix(rewound).1, first);
    }

    proptest! {
        #[test]
        fn prop_skip_round_trip(seed: u64, count: i64) {
            let state = GeneratorState::from(seed);
            prop_assert_eq!(skip(skip(state, count), count.wrapping_neg()), state);
        }

        #[test]
        fn prop_skip_is_additive(seed: u64, a in -10_000i64..10_000, b in -10_000i64..10_000) {
            let state = GeneratorState::from(seed);
            prop_assert_eq!(skip(skip(state, a), b), skip(state, a + b));
        }
    }
}
