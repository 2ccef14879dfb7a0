//! The splitmix64 generator: forward mixing, its exact inverse, and
//! counter skipping.
//!
//! The generator's only state is a 64-bit counter. Each step adds a fixed
//! odd increment and passes the new counter through two xorshift/multiply
//! rounds and a final xorshift. Every stage is a bijection on 64-bit
//! words, so an output pins down the counter that produced it.
//!
//! ```text
//! state ──(+INCREMENT)──► counter ──(avalanche)──► output
//!                            ▲                        │
//!                            └──────── unmix ─────────┘
//! ```

mod mix;
mod skip;
mod state;
mod stream;

pub use mix::{mix, unmix, unfold_xorshift, INCREMENT};
pub use skip::skip;
pub use state::GeneratorState;
pub use stream::SplitMix64;
