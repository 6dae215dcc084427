//! Entropy sources for the sampler
//!
//! The selector core is fully deterministic; all randomness enters through
//! the [`EntropySource`] trait, one `u64` word per draw.
//! CRITICAL: every entropy word a `Sampler` consumes comes from this module,
//! which is what keeps whole draw sequences reproducible from a seed.
//!
//! # Sources
//!
//! 1. **XorShift**: xorshift64* PRNG (fast, high-quality, deterministic)
//! 2. **Counter**: plain arithmetic counter (degenerate but valid entropy,
//!    useful for driving the selector through specific update paths)
//!
//! Sources are chosen through [`EntropyConfig`] and built via the factory
//! functions, so a sampler config fully describes its entropy stream.

use serde::{Deserialize, Serialize};

mod counter;
mod xorshift;

pub use counter::CounterEntropy;
pub use xorshift::XorShiftEntropy;

/// A stream of entropy words driving value selection
///
/// Implementations must be deterministic given their construction
/// parameters: the selector's replay and checkpoint guarantees hold only if
/// the same state always yields the same continuation of the stream.
///
/// ```
/// use modrange_core_rs::entropy::EntropySource;
///
/// #[derive(Debug)]
/// struct Fixed(u64);
///
/// impl EntropySource for Fixed {
///     fn next_entropy(&mut self) -> u64 {
///         self.0
///     }
///
///     fn state(&self) -> u64 {
///         self.0
///     }
/// }
/// ```
pub trait EntropySource: std::fmt::Debug {
    /// Produce the next entropy word, advancing the stream
    fn next_entropy(&mut self) -> u64;

    /// Current stream state, sufficient to resume the exact sequence
    /// (for checkpointing/replay)
    fn state(&self) -> u64;
}

/// Entropy source selection for a sampler
///
/// Serialized as part of the sampler config, so checkpoints capture which
/// source produced the stream as well as where in the stream it stood.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntropyConfig {
    /// xorshift64* PRNG seeded with `seed`
    XorShift {
        /// Initial seed (zero is coerced to 1)
        seed: u64,
    },

    /// Arithmetic counter: `start`, `start + step`, `start + 2*step`, ...
    Counter {
        /// First word to emit
        start: u64,
        /// Increment between words (wrapping; 0 repeats `start` forever)
        step: u64,
    },
}

/// Build a fresh entropy source from its config
///
/// # Example
/// ```
/// use modrange_core_rs::entropy::{build_entropy_source, EntropyConfig, EntropySource};
///
/// let mut source = build_entropy_source(&EntropyConfig::Counter { start: 7, step: 2 });
/// assert_eq!(source.next_entropy(), 7);
/// assert_eq!(source.next_entropy(), 9);
/// ```
pub fn build_entropy_source(config: &EntropyConfig) -> Box<dyn EntropySource> {
    match config {
        EntropyConfig::XorShift { seed } => Box::new(XorShiftEntropy::new(*seed)),
        EntropyConfig::Counter { start, step } => Box::new(CounterEntropy::new(*start, *step)),
    }
}

/// Rebuild an entropy source mid-stream from a checkpointed state
///
/// The config decides the source kind; `state` replaces its positional
/// parameter (`seed` or `start`) so the rebuilt source continues the exact
/// sequence the original would have produced.
pub fn rebuild_entropy_source(config: &EntropyConfig, state: u64) -> Box<dyn EntropySource> {
    match config {
        EntropyConfig::XorShift { .. } => Box::new(XorShiftEntropy::new(state)),
        EntropyConfig::Counter { step, .. } => Box::new(CounterEntropy::new(state, *step)),
    }
}
