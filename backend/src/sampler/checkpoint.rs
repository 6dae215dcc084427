//! Checkpoint - Save/Load Sampler State
//!
//! Enables serialization and deserialization of complete sampler state
//! for pause/resume functionality.
//!
//! # Critical Invariants
//!
//! - **Determinism**: A restored sampler continues the exact draw sequence
//! - **Value Conservation**: undrawn + drawn always equals the pool size
//! - **Disjointness**: No stored range overlaps another
//! - **Config Matching**: State can only be loaded with matching config

use crate::ranges::Range;
use crate::sampler::{SamplerConfig, SamplerError};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

// ============================================================================
// Snapshot Structure
// ============================================================================

/// Complete sampler state snapshot
///
/// Captures everything needed to resume a draw sequence from an arbitrary
/// point: the config, the entropy stream position, the draw counters, and
/// the live ranges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SamplerSnapshot {
    /// Config the sampler was built from
    pub config: SamplerConfig,

    /// Entropy stream state at snapshot time (CRITICAL for determinism)
    pub entropy_state: u64,

    /// Number of successful draws so far
    pub draws: u64,

    /// Highest range count observed across the run
    pub max_ranges_seen: usize,

    /// Ranges covering the not-yet-drawn values
    pub ranges: Vec<Range>,

    /// SHA256 hash of `config` (for validation)
    pub config_hash: String,
}

impl SamplerSnapshot {
    /// Serialize to a JSON string
    pub fn to_json(&self) -> Result<String, SamplerError> {
        serde_json::to_string(self).map_err(|e| {
            SamplerError::Serialization(format!("Snapshot serialization failed: {}", e))
        })
    }

    /// Deserialize from a JSON string
    ///
    /// Parsing alone does not establish integrity; [`Sampler::restore`]
    /// still hash-checks and validates the result.
    ///
    /// [`Sampler::restore`]: crate::sampler::Sampler::restore
    pub fn from_json(json: &str) -> Result<Self, SamplerError> {
        serde_json::from_str(json).map_err(|e| {
            SamplerError::Serialization(format!("Snapshot deserialization failed: {}", e))
        })
    }
}

// ============================================================================
// Config Hashing
// ============================================================================

/// Compute deterministic SHA256 hash of config
///
/// This hash is used to verify that a checkpoint's config matches
/// the config used to restore it.
///
/// Uses canonical JSON serialization with sorted keys to ensure
/// deterministic hashing regardless of map iteration order.
pub fn compute_config_hash<T: Serialize>(config: &T) -> Result<String, SamplerError> {
    use serde_json::Value;
    use std::collections::BTreeMap;

    // First serialize to serde_json::Value
    let value = serde_json::to_value(config).map_err(|e| {
        SamplerError::Serialization(format!("Config serialization failed: {}", e))
    })?;

    // Recursively sort all object keys for canonical representation
    fn canonicalize(value: Value) -> Value {
        match value {
            Value::Object(map) => {
                let sorted: BTreeMap<String, Value> =
                    map.into_iter().map(|(k, v)| (k, canonicalize(v))).collect();
                Value::Object(sorted.into_iter().collect())
            }
            Value::Array(arr) => Value::Array(arr.into_iter().map(canonicalize).collect()),
            other => other,
        }
    }

    let canonical_value = canonicalize(value);

    // Serialize to JSON string (now with sorted keys)
    let json = serde_json::to_string(&canonical_value).map_err(|e| {
        SamplerError::Serialization(format!("Config serialization failed: {}", e))
    })?;

    // Compute SHA256 hash
    let mut hasher = Sha256::new();
    hasher.update(json.as_bytes());
    let result = hasher.finalize();

    Ok(format!("{:x}", result))
}

// ============================================================================
// Validation Functions
// ============================================================================

/// Validate sampler snapshot integrity
///
/// Deserialization bypasses every constructor, so a snapshot can describe
/// states no live sampler could reach. Checks, in order:
/// - Pool size is at least 1
/// - Every range is non-empty, non-overflowing, and inside `[0, size)`
/// - Ranges are pairwise disjoint
/// - Value conservation: undrawn + draws == size
/// - Range count within the `ceil(size/2)` bound
pub fn validate_snapshot(snapshot: &SamplerSnapshot) -> Result<(), SamplerError> {
    let size = snapshot.config.size;

    if size == 0 {
        return Err(SamplerError::SnapshotValidation(
            "Pool size must be at least 1".to_string(),
        ));
    }

    // 1. Per-range bounds
    for range in &snapshot.ranges {
        if range.size() == 0 {
            return Err(SamplerError::SnapshotValidation(format!(
                "Empty range at start {}",
                range.start()
            )));
        }
        let end = range.start().checked_add(range.size()).ok_or_else(|| {
            SamplerError::SnapshotValidation(format!(
                "Range at start {} overflows u64",
                range.start()
            ))
        })?;
        if end > size {
            return Err(SamplerError::SnapshotValidation(format!(
                "Range [{}, {}) exceeds pool size {}",
                range.start(),
                end,
                size
            )));
        }
    }

    // 2. Pairwise disjointness (bounds are in-range here, so plain addition
    //    is safe)
    let mut spans: Vec<(u64, u64)> = snapshot
        .ranges
        .iter()
        .map(|r| (r.start(), r.start() + r.size()))
        .collect();
    spans.sort_unstable();
    for pair in spans.windows(2) {
        if pair[1].0 < pair[0].1 {
            return Err(SamplerError::SnapshotValidation(format!(
                "Overlapping ranges starting at {} and {}",
                pair[0].0, pair[1].0
            )));
        }
    }

    // 3. Value conservation. Disjoint in-bounds ranges sum to at most
    //    `size`, so the undrawn sum cannot overflow; `draws` is untrusted
    //    input and still needs the checked add.
    let undrawn: u64 = snapshot.ranges.iter().map(|r| r.size()).sum();
    match undrawn.checked_add(snapshot.draws) {
        Some(total) if total == size => {}
        _ => {
            return Err(SamplerError::SnapshotValidation(format!(
                "Value conservation violated: {} undrawn + {} drawn != {} total",
                undrawn, snapshot.draws, size
            )));
        }
    }

    // 4. Range-count bound
    let bound = size / 2 + size % 2;
    if snapshot.ranges.len() as u64 > bound {
        return Err(SamplerError::SnapshotValidation(format!(
            "Range count {} exceeds bound {} for pool size {}",
            snapshot.ranges.len(),
            bound,
            size
        )));
    }

    Ok(())
}
