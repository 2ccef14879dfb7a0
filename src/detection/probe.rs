//! Detection probes.
//!
//! Each probe hypothesises that the lanes of a buffer hide splitmix
//! outputs in a particular arrangement, recovers the generator state that
//! arrangement implies, and checks the hypothesis against words it did
//! not use for the recovery. All four variants run through
//! [`Probe::matches`]; they differ only in the lanes they read and the
//! parity they expect of the first generator output.
//!
//! Arrangements, with `z1..z3` consecutive splitmix outputs and `x`, `y`
//! the unknown xorshift128 words of one refresh group:
//!
//! ```text
//!              lane 0     lane 1     lane 2     tail
//! pooled even  x^y        y^z1       x^z2       x^y^z3
//! pooled odd   x^z2       x^y        y^z3       x^y^z1
//! direct even  x          x^z1       x^z1       x^z1      (x = next output)
//! direct odd   x^z1       x          x^z1       x^z1
//! ```

use super::buffer::EntropyBuffer;
use crate::splitmix::{mix, skip, unmix, GeneratorState};
use crate::word::Word64;
use serde::{Deserialize, Serialize};

/// Names the probe that matched a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProbeId {
    /// Pool refresh mixing xorshift128 output, first splitmix output even.
    PooledEven,
    /// Pool refresh mixing xorshift128 output, first splitmix output odd.
    PooledOdd,
    /// Splitmix-only refresh, first output even.
    DirectEven,
    /// Splitmix-only refresh, first output odd.
    DirectOdd,
}

impl std::fmt::Display for ProbeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ProbeId::PooledEven => "pooled-even",
            ProbeId::PooledOdd => "pooled-odd",
            ProbeId::DirectEven => "direct-even",
            ProbeId::DirectOdd => "direct-odd",
        };
        f.write_str(name)
    }
}

/// Expected low bit of the first generator output of a refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parity {
    /// Low bit clear.
    Even,
    /// Low bit set.
    Odd,
}

impl Parity {
    /// Returns true if `word` has this parity.
    #[inline]
    pub fn matches(self, word: Word64) -> bool {
        word.is_odd() == (self == Parity::Odd)
    }
}

/// `lane ^ z[output]` reconstructs one xorshift128 word.
#[derive(Debug, Clone, Copy)]
struct Witness {
    lane: usize,
    output: usize,
}

#[derive(Debug, Clone, Copy)]
enum Shape {
    /// `lane(seed_lane) ^ tail` is output `z[seed_output]`; the witnesses
    /// must rebuild the tail.
    Pooled {
        seed_lane: usize,
        seed_output: usize,
        witnesses: [Witness; 2],
    },
    /// `lane(lane)` is the output following `lane(lane) ^ tail`.
    Direct { lane: usize },
}

/// A probe hit and the generator state it recovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeMatch {
    /// The probe that matched.
    pub probe: ProbeId,
    /// Generator state right after the read that produced the buffer.
    pub state: GeneratorState,
}

/// One parameterised detection heuristic.
#[derive(Debug, Clone, Copy)]
pub struct Probe {
    id: ProbeId,
    parity: Parity,
    shape: Shape,
}

/// Every probe, in evaluation order.
pub const PROBES: [Probe; 4] = [
    Probe {
        id: ProbeId::PooledEven,
        parity: Parity::Even,
        shape: Shape::Pooled {
            seed_lane: 0,
            seed_output: 2,
            witnesses: [Witness { lane: 2, output: 1 }, Witness { lane: 1, output: 0 }],
        },
    },
    Probe {
        id: ProbeId::PooledOdd,
        parity: Parity::Odd,
        shape: Shape::Pooled {
            seed_lane: 1,
            seed_output: 0,
            witnesses: [Witness { lane: 0, output: 1 }, Witness { lane: 2, output: 2 }],
        },
    },
    Probe {
        id: ProbeId::DirectEven,
        parity: Parity::Even,
        shape: Shape::Direct { lane: 0 },
    },
    Probe {
        id: ProbeId::DirectOdd,
        parity: Parity::Odd,
        shape: Shape::Direct { lane: 1 },
    },
];

impl Probe {
    /// Returns the probe's name.
    pub fn id(&self) -> ProbeId {
        self.id
    }

    /// Returns the parity this probe expects.
    pub fn parity(&self) -> Parity {
        self.parity
    }

    /// Tests the probe's hypothesis against `buffer`.
    ///
    /// For uniformly random input a match happens with probability
    /// around 2^-63 per probe.
    pub fn matches(&self, buffer: &EntropyBuffer) -> bool {
        self.recover(buffer).is_some()
    }

    /// Runs the probe and, on a match, returns the generator state the
    /// source holds right after the read that produced `buffer`.
    ///
    /// A read copies two blocks and refreshes the array after each, so
    /// the state recovered from the first refresh is advanced past the
    /// second one.
    pub fn recover(&self, buffer: &EntropyBuffer) -> Option<GeneratorState> {
        let tail = buffer.tail();
        let recovered = match self.shape {
            Shape::Pooled {
                seed_lane,
                seed_output,
                witnesses,
            } => {
                let seed = buffer.lane(seed_lane) ^ tail;
                let (state, outputs) = refresh_outputs(unmix(seed), seed_output);
                let claimed = witnesses.iter().fold(outputs[seed_output], |acc, w| {
                    acc ^ buffer.lane(w.lane) ^ outputs[w.output]
                });
                (self.parity.matches(outputs[0]) && claimed == tail)
                    .then(|| skip(state, POOLED_REFRESH_OUTPUTS))
            }
            Shape::Direct { lane } => {
                let next = buffer.lane(lane);
                let first = tail ^ next;
                let (state, replayed) = mix(unmix(first));
                // `state` sits two outputs into the first refresh
                (self.parity.matches(first) && replayed == next)
                    .then(|| skip(state, 2 * DIRECT_REFRESH_OUTPUTS - 2))
            }
        };

        tracing::trace!(probe = %self.id, matched = recovered.is_some(), "Probe evaluated");
        recovered
    }
}

/// Splitmix outputs drawn by one refresh that mixes in xorshift128 words.
const POOLED_REFRESH_OUTPUTS: i64 = 3;
/// Splitmix outputs drawn by one splitmix-only refresh: one fixed output
/// plus one per group of four words.
const DIRECT_REFRESH_OUTPUTS: i64 = 17;

/// The three outputs of one refresh and the state after the last of them,
/// given the state recovered from the output at `position`.
fn refresh_outputs(recovered: GeneratorState, position: usize) -> (GeneratorState, [Word64; 3]) {
    let mut state = skip(recovered, -(position as i64 + 1));
    let mut outputs = [Word64::ZERO; 3];
    for output in &mut outputs {
        let (next, z) = mix(state);
        state = next;
        *output = z;
    }
    (state, outputs)
}
