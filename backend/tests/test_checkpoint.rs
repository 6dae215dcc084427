//! Checkpoint Tests - Save/Load Sampler State
//!
//! Test suite for serializing and deserializing complete sampler state.
//!
//! Critical invariants tested:
//! - Determinism: Restored sampler produces the identical draw sequence
//! - Value conservation: undrawn + drawn equals the pool size
//! - Structural integrity: Tampered snapshots are rejected
//! - Config matching: Reject state from a different config

use modrange_core_rs::entropy::EntropyConfig;
use modrange_core_rs::ranges::Range;
use modrange_core_rs::sampler::{
    compute_config_hash, Sampler, SamplerConfig, SamplerError, SamplerSnapshot,
};

// ============================================================================
// Test Helpers
// ============================================================================

/// Create a seeded test sampler over `[0, 500)`
fn create_test_sampler() -> Sampler {
    create_test_sampler_with_seed(42)
}

/// Create a test sampler with specific seed
fn create_test_sampler_with_seed(seed: u64) -> Sampler {
    Sampler::new(SamplerConfig {
        size: 500,
        entropy: EntropyConfig::XorShift { seed },
    })
    .expect("Failed to create test sampler")
}

// ============================================================================
// Snapshot Capture
// ============================================================================

#[test]
fn test_snapshot_reflects_sampler_state() {
    let mut sampler = create_test_sampler();
    for _ in 0..100 {
        sampler.draw().unwrap();
    }

    let snapshot = sampler.snapshot().unwrap();

    assert_eq!(snapshot.config, *sampler.config());
    assert_eq!(snapshot.draws, 100);
    assert_eq!(snapshot.entropy_state, sampler.entropy_state());
    assert_eq!(snapshot.max_ranges_seen, sampler.max_ranges_seen());
    assert_eq!(snapshot.ranges, sampler.ranges().to_vec());
    assert_eq!(
        snapshot.config_hash,
        compute_config_hash(sampler.config()).unwrap()
    );
}

#[test]
fn test_snapshot_of_fresh_sampler() {
    let sampler = create_test_sampler();
    let snapshot = sampler.snapshot().unwrap();

    assert_eq!(snapshot.draws, 0);
    assert_eq!(snapshot.ranges, vec![Range::new(0, 500)]);
}

// ============================================================================
// Restore Determinism
// ============================================================================

#[test]
fn test_restore_continues_exact_sequence() {
    let mut original = create_test_sampler();
    for _ in 0..200 {
        original.draw().unwrap();
    }

    let snapshot = original.snapshot().unwrap();
    let mut restored = Sampler::restore(&snapshot).unwrap();

    assert_eq!(restored.draws(), 200);
    assert_eq!(restored.remaining(), 300);

    // Both samplers must now produce the identical tail
    for i in 0..300 {
        assert_eq!(
            restored.draw().unwrap(),
            original.draw().unwrap(),
            "divergence at draw {} after restore",
            i
        );
    }

    assert!(original.is_exhausted());
    assert!(restored.is_exhausted());
}

#[test]
fn test_restore_never_repeats_earlier_draws() {
    let mut original = create_test_sampler_with_seed(7);
    let mut seen = vec![false; 500];

    for _ in 0..250 {
        seen[original.draw().unwrap() as usize] = true;
    }

    let snapshot = original.snapshot().unwrap();
    let mut restored = Sampler::restore(&snapshot).unwrap();

    for _ in 0..250 {
        let value = restored.draw().unwrap() as usize;
        assert!(!seen[value], "restored sampler repeated value {}", value);
        seen[value] = true;
    }

    assert!(seen.iter().all(|&s| s), "some value never drawn");
}

#[test]
fn test_json_round_trip_preserves_continuation() {
    let mut original = create_test_sampler_with_seed(99);
    for _ in 0..123 {
        original.draw().unwrap();
    }

    let json = original.snapshot().unwrap().to_json().unwrap();
    let parsed = SamplerSnapshot::from_json(&json).unwrap();
    let mut restored = Sampler::restore(&parsed).unwrap();

    for _ in 0..100 {
        assert_eq!(restored.draw().unwrap(), original.draw().unwrap());
    }
}

#[test]
fn test_counter_sampler_restores_midstream() {
    let mut original = Sampler::new(SamplerConfig {
        size: 20,
        entropy: EntropyConfig::Counter { start: 3, step: 5 },
    })
    .unwrap();

    for _ in 0..11 {
        original.draw().unwrap();
    }

    let snapshot = original.snapshot().unwrap();
    let mut restored = Sampler::restore(&snapshot).unwrap();

    for _ in 0..9 {
        assert_eq!(restored.draw().unwrap(), original.draw().unwrap());
    }
    assert!(restored.is_exhausted());
}

// ============================================================================
// Rejection Paths
// ============================================================================

#[test]
fn test_restore_rejects_tampered_hash() {
    let sampler = create_test_sampler();
    let mut snapshot = sampler.snapshot().unwrap();
    snapshot.config_hash = "0000000000000000".to_string();

    let err = Sampler::restore(&snapshot).unwrap_err();
    assert!(matches!(err, SamplerError::ConfigMismatch { .. }));
}

#[test]
fn test_restore_rejects_edited_config() {
    let mut sampler = create_test_sampler();
    for _ in 0..10 {
        sampler.draw().unwrap();
    }

    // Growing the pool after the fact invalidates the embedded hash
    let mut snapshot = sampler.snapshot().unwrap();
    snapshot.config.size = 600;

    let err = Sampler::restore(&snapshot).unwrap_err();
    assert!(matches!(err, SamplerError::ConfigMismatch { .. }));
}

#[test]
fn test_restore_rejects_overlapping_ranges() {
    let sampler = create_test_sampler();
    let mut snapshot = sampler.snapshot().unwrap();

    // Hash still matches the config; corruption is in the ranges
    snapshot.ranges = vec![Range::new(0, 300), Range::new(200, 300)];
    snapshot.draws = 0;

    let err = Sampler::restore(&snapshot).unwrap_err();
    assert!(matches!(err, SamplerError::SnapshotValidation(_)));
}

#[test]
fn test_restore_rejects_conservation_violation() {
    let mut sampler = create_test_sampler();
    for _ in 0..50 {
        sampler.draw().unwrap();
    }

    let mut snapshot = sampler.snapshot().unwrap();
    snapshot.draws = 49; // disagrees with the stored ranges

    let err = Sampler::restore(&snapshot).unwrap_err();
    match err {
        SamplerError::SnapshotValidation(msg) => {
            assert!(msg.contains("conservation"), "unexpected message: {}", msg)
        }
        other => panic!("expected SnapshotValidation, got {:?}", other),
    }
}

#[test]
fn test_restore_rejects_out_of_bounds_range() {
    let sampler = create_test_sampler();
    let mut snapshot = sampler.snapshot().unwrap();

    snapshot.ranges = vec![Range::new(450, 100)];
    snapshot.draws = 400;

    let err = Sampler::restore(&snapshot).unwrap_err();
    assert!(matches!(err, SamplerError::SnapshotValidation(_)));
}
