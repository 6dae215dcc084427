//! Sampler Engine
//!
//! Main draw loop tying the pieces together:
//! - Entropy generation (one word per draw, via [`EntropySource`])
//! - Value selection (the [`RangeSet`] core)
//! - Draw accounting (counts, observed range-count peak)
//! - Checkpointing (see `checkpoint.rs` for snapshot validation)
//!
//! # Architecture
//!
//! ```text
//! For each draw:
//! 1. Refuse if the pool is exhausted (entropy stream untouched)
//! 2. Pull one entropy word from the source
//! 3. Select a value: word % range_count picks a range,
//!    word % range_size picks the offset inside it
//! 4. Update the range set (shrink / split / swap-remove)
//! 5. Update draw counters
//! ```
//!
//! # Example
//!
//! ```
//! use modrange_core_rs::entropy::EntropyConfig;
//! use modrange_core_rs::sampler::{Sampler, SamplerConfig};
//!
//! let config = SamplerConfig {
//!     size: 1000,
//!     entropy: EntropyConfig::XorShift { seed: 42 },
//! };
//!
//! let mut sampler = Sampler::new(config).unwrap();
//! let first = sampler.draw().unwrap();
//! let rest = sampler.draw_many(99).unwrap();
//! assert!(first < 1000);
//! assert_eq!(rest.len(), 99);
//! assert_eq!(sampler.remaining(), 900);
//! ```

use crate::entropy::{build_entropy_source, rebuild_entropy_source, EntropyConfig, EntropySource};
use crate::ranges::{Range, RangeSet, RangeSetError};
use crate::sampler::checkpoint::{compute_config_hash, validate_snapshot, SamplerSnapshot};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Configuration Types
// ============================================================================

/// Complete sampler configuration
///
/// Fully describes a draw sequence: the pool plus the entropy stream that
/// walks it. Serializable so checkpoints can embed it and hash it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SamplerConfig {
    /// Pool size `n`; values are drawn from `[0, n)`
    pub size: u64,

    /// Entropy source feeding the selector
    pub entropy: EntropyConfig,
}

// ============================================================================
// Error Types
// ============================================================================

/// Sampler error types
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SamplerError {
    /// Configuration validation error
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// Selection error from the range-set core
    #[error("Selection failed: {0}")]
    Selection(#[from] RangeSetError),

    /// Snapshot serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Snapshot failed an integrity check
    #[error("Snapshot validation failed: {0}")]
    SnapshotValidation(String),

    /// Snapshot config hash does not match its embedded config
    #[error("Config hash mismatch: expected {expected}, got {actual}")]
    ConfigMismatch { expected: String, actual: String },
}

// ============================================================================
// Sampler
// ============================================================================

/// Draws unique values from a fixed pool, one entropy word per draw
///
/// Owns the range set and the entropy source, so a seeded sampler is fully
/// deterministic: same config, same draw sequence. Purely sequential by
/// construction; wrap the whole sampler in a lock if it must be shared.
///
/// # Example
/// ```
/// use modrange_core_rs::entropy::EntropyConfig;
/// use modrange_core_rs::sampler::{Sampler, SamplerConfig};
///
/// let config = SamplerConfig {
///     size: 10,
///     entropy: EntropyConfig::Counter { start: 3, step: 0 },
/// };
/// let mut sampler = Sampler::new(config).unwrap();
/// assert_eq!(sampler.draw().unwrap(), 3);
/// ```
#[derive(Debug)]
pub struct Sampler {
    /// Config this sampler was built from (embedded in snapshots)
    config: SamplerConfig,

    /// Not-yet-drawn values
    range_set: RangeSet,

    /// Entropy stream (CRITICAL for determinism: the only randomness here)
    entropy: Box<dyn EntropySource>,

    /// Number of successful draws so far
    draws: u64,

    /// Highest range count observed across the run (storage watermark)
    max_ranges_seen: usize,
}

impl Sampler {
    /// Create a new sampler from configuration
    ///
    /// # Arguments
    /// * `config` - Pool size and entropy source selection
    ///
    /// # Returns
    /// - `Ok(Sampler)` ready to draw
    /// - `Err(SamplerError::InvalidConfig)` if the pool size is zero
    pub fn new(config: SamplerConfig) -> Result<Self, SamplerError> {
        // Validate configuration
        let range_set =
            RangeSet::new(config.size).map_err(|e| SamplerError::InvalidConfig(e.to_string()))?;

        // Initialize entropy
        let entropy = build_entropy_source(&config.entropy);

        Ok(Self {
            config,
            range_set,
            entropy,
            draws: 0,
            max_ranges_seen: 1,
        })
    }

    /// Draw the next unique value
    ///
    /// Consumes exactly one entropy word per successful draw. An exhausted
    /// pool is detected *before* touching the entropy stream, so a failed
    /// draw perturbs nothing: the sampler state, including the stream
    /// position, is exactly what it was.
    ///
    /// # Returns
    /// - `Ok(value)` in `[0, size)`, unique across the sampler's lifetime
    /// - `Err(SamplerError::Selection(RangeSetError::Exhausted))` once all
    ///   values are drawn
    pub fn draw(&mut self) -> Result<u64, SamplerError> {
        if self.range_set.is_exhausted() {
            return Err(SamplerError::Selection(RangeSetError::Exhausted));
        }

        let word = self.entropy.next_entropy();
        let value = self.range_set.select(word)?;

        self.draws += 1;
        self.max_ranges_seen = self.max_ranges_seen.max(self.range_set.range_count());

        Ok(value)
    }

    /// Draw `count` unique values
    ///
    /// All-or-nothing: if fewer than `count` values remain, fails up front
    /// without drawing anything or consuming entropy.
    ///
    /// # Example
    /// ```
    /// use modrange_core_rs::entropy::EntropyConfig;
    /// use modrange_core_rs::sampler::{Sampler, SamplerConfig};
    ///
    /// let config = SamplerConfig {
    ///     size: 5,
    ///     entropy: EntropyConfig::XorShift { seed: 7 },
    /// };
    /// let mut sampler = Sampler::new(config).unwrap();
    ///
    /// let mut values = sampler.draw_many(5).unwrap();
    /// values.sort();
    /// assert_eq!(values, vec![0, 1, 2, 3, 4]);
    /// assert!(sampler.draw_many(1).is_err());
    /// ```
    pub fn draw_many(&mut self, count: u64) -> Result<Vec<u64>, SamplerError> {
        if count > self.remaining() {
            return Err(SamplerError::Selection(RangeSetError::Exhausted));
        }

        let mut values = Vec::with_capacity(count as usize);
        for _ in 0..count {
            values.push(self.draw()?);
        }
        Ok(values)
    }

    /// Get the sampler configuration
    pub fn config(&self) -> &SamplerConfig {
        &self.config
    }

    /// Get the fixed pool size `n`
    pub fn size(&self) -> u64 {
        self.range_set.size()
    }

    /// Get the number of values not yet drawn
    pub fn remaining(&self) -> u64 {
        self.range_set.remaining()
    }

    /// Check whether every value has been drawn
    pub fn is_exhausted(&self) -> bool {
        self.range_set.is_exhausted()
    }

    /// Get the current number of stored ranges
    pub fn range_count(&self) -> usize {
        self.range_set.range_count()
    }

    /// View the current ranges (storage order is meaningless)
    pub fn ranges(&self) -> &[Range] {
        self.range_set.ranges()
    }

    /// Upper bound on the range count for this pool size
    pub fn max_possible_ranges(&self) -> u64 {
        self.range_set.max_possible_ranges()
    }

    /// Get the number of successful draws so far
    pub fn draws(&self) -> u64 {
        self.draws
    }

    /// Get the highest range count observed across the run
    pub fn max_ranges_seen(&self) -> usize {
        self.max_ranges_seen
    }

    /// Get the current entropy stream state (for checkpointing)
    pub fn entropy_state(&self) -> u64 {
        self.entropy.state()
    }

    /// Capture a snapshot of complete sampler state
    ///
    /// The snapshot embeds the config and its SHA256 hash, the entropy
    /// stream position, the draw counters, and the live ranges. Everything
    /// needed to resume the exact draw sequence later.
    pub fn snapshot(&self) -> Result<SamplerSnapshot, SamplerError> {
        Ok(SamplerSnapshot {
            config: self.config.clone(),
            entropy_state: self.entropy.state(),
            draws: self.draws,
            max_ranges_seen: self.max_ranges_seen,
            ranges: self.range_set.ranges().to_vec(),
            config_hash: compute_config_hash(&self.config)?,
        })
    }

    /// Restore a sampler from a snapshot
    ///
    /// Verifies the embedded config hash, then runs full structural
    /// validation (bounds, disjointness, value conservation, range-count
    /// bound) before rebuilding. The restored sampler continues the exact
    /// draw sequence the snapshotted one would have produced.
    ///
    /// # Returns
    /// - `Ok(Sampler)` positioned exactly where the snapshot was taken
    /// - `Err(SamplerError::ConfigMismatch)` if the hash does not match
    /// - `Err(SamplerError::SnapshotValidation)` if an invariant fails
    pub fn restore(snapshot: &SamplerSnapshot) -> Result<Self, SamplerError> {
        // Config hash check first: a snapshot whose hash disagrees with its
        // embedded config was corrupted or hand-edited
        let expected = compute_config_hash(&snapshot.config)?;
        if expected != snapshot.config_hash {
            return Err(SamplerError::ConfigMismatch {
                expected,
                actual: snapshot.config_hash.clone(),
            });
        }

        validate_snapshot(snapshot)?;

        let range_set = RangeSet::from_snapshot(snapshot.config.size, snapshot.ranges.clone())?;
        let entropy = rebuild_entropy_source(&snapshot.config.entropy, snapshot.entropy_state);

        Ok(Self {
            config: snapshot.config.clone(),
            range_set,
            entropy,
            draws: snapshot.draws,
            max_ranges_seen: snapshot.max_ranges_seen.max(snapshot.ranges.len()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counter_sampler(size: u64, start: u64, step: u64) -> Sampler {
        Sampler::new(SamplerConfig {
            size,
            entropy: EntropyConfig::Counter { start, step },
        })
        .expect("Failed to create test sampler")
    }

    #[test]
    fn test_new_rejects_zero_size() {
        let result = Sampler::new(SamplerConfig {
            size: 0,
            entropy: EntropyConfig::XorShift { seed: 1 },
        });
        assert!(matches!(result, Err(SamplerError::InvalidConfig(_))));
    }

    #[test]
    fn test_draw_follows_entropy_stream() {
        // Counter fixed at 3 over [0, 10): first draw takes value 3
        let mut sampler = counter_sampler(10, 3, 0);
        assert_eq!(sampler.draw().unwrap(), 3);
        assert_eq!(sampler.draws(), 1);
        assert_eq!(sampler.range_count(), 2);
        assert_eq!(sampler.max_ranges_seen(), 2);
    }

    #[test]
    fn test_draws_are_unique_to_exhaustion() {
        let mut sampler = Sampler::new(SamplerConfig {
            size: 500,
            entropy: EntropyConfig::XorShift { seed: 42 },
        })
        .unwrap();

        let mut seen = vec![false; 500];
        for _ in 0..500 {
            let value = sampler.draw().unwrap() as usize;
            assert!(!seen[value], "value {} drawn twice", value);
            seen[value] = true;
        }

        assert!(sampler.is_exhausted());
        assert!(seen.iter().all(|&s| s), "some value never drawn");
    }

    #[test]
    fn test_failed_draw_leaves_entropy_untouched() {
        let mut sampler = counter_sampler(2, 0, 1);
        sampler.draw().unwrap();
        sampler.draw().unwrap();

        let state_before = sampler.entropy_state();
        assert!(sampler.draw().is_err());
        assert_eq!(sampler.entropy_state(), state_before);
        assert_eq!(sampler.draws(), 2);
    }

    #[test]
    fn test_draw_many_all_or_nothing() {
        let mut sampler = counter_sampler(10, 0, 1);
        sampler.draw_many(8).unwrap();

        // 2 remain; asking for 3 must fail without drawing any
        let state_before = sampler.entropy_state();
        assert!(sampler.draw_many(3).is_err());
        assert_eq!(sampler.remaining(), 2);
        assert_eq!(sampler.entropy_state(), state_before);

        assert_eq!(sampler.draw_many(2).unwrap().len(), 2);
        assert!(sampler.is_exhausted());
    }

    #[test]
    fn test_draw_many_zero_is_noop() {
        let mut sampler = counter_sampler(4, 0, 1);
        assert_eq!(sampler.draw_many(0).unwrap(), Vec::<u64>::new());
        assert_eq!(sampler.remaining(), 4);
    }

    #[test]
    fn test_same_config_same_sequence() {
        let config = SamplerConfig {
            size: 100,
            entropy: EntropyConfig::XorShift { seed: 12345 },
        };

        let mut a = Sampler::new(config.clone()).unwrap();
        let mut b = Sampler::new(config).unwrap();

        for _ in 0..100 {
            assert_eq!(a.draw().unwrap(), b.draw().unwrap());
        }
    }
}
