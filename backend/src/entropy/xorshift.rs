//! xorshift64* entropy source
//!
//! A fast, high-quality PRNG that is deterministic and cheap enough that
//! entropy generation never dominates a draw.
//!
//! # Algorithm
//!
//! xorshift64* is a variant of xorshift that passes TestU01's BigCrush
//! statistical tests. It uses 64-bit state and produces 64-bit output.
//!
//! # Determinism
//!
//! Same seed → same sequence of entropy words. This is CRITICAL for:
//! - Debugging (reproduce an exact draw sequence)
//! - Testing (verify behavior)
//! - Checkpoint restore (resume a stream mid-sequence)

use serde::{Deserialize, Serialize};

use crate::entropy::EntropySource;

/// Deterministic entropy source using xorshift64*
///
/// # Example
/// ```
/// use modrange_core_rs::entropy::{EntropySource, XorShiftEntropy};
///
/// let mut source = XorShiftEntropy::new(12345);
/// let word = source.next_entropy();
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct XorShiftEntropy {
    /// Internal state (64-bit)
    state: u64,
}

impl XorShiftEntropy {
    /// Create a new source with given seed
    ///
    /// # Arguments
    /// * `seed` - Initial seed value (u64)
    ///
    /// # Example
    /// ```
    /// use modrange_core_rs::entropy::XorShiftEntropy;
    ///
    /// let source = XorShiftEntropy::new(12345);
    /// ```
    pub fn new(seed: u64) -> Self {
        // Ensure seed is never zero (xorshift requirement)
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }
}

impl EntropySource for XorShiftEntropy {
    /// Generate the next entropy word
    ///
    /// Advances the internal state; the returned word is the scrambled
    /// (multiplied) state, while the raw state is what [`state`] exposes
    /// for resumption.
    ///
    /// [`state`]: EntropySource::state
    fn next_entropy(&mut self) -> u64 {
        // xorshift64* algorithm
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545F4914F6CDD1D)
    }

    /// Get current state (for checkpointing/replay)
    ///
    /// A source created from this value continues the exact sequence.
    /// The state is never zero once constructed, so round-tripping it
    /// through [`XorShiftEntropy::new`] is lossless.
    fn state(&self) -> u64 {
        self.state
    }
}
