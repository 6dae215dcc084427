//! Entropy Determinism Tests
//!
//! The replay and checkpoint guarantees rest entirely on entropy sources
//! being deterministic: same seed, same stream; same state, same
//! continuation. These tests pin that down across both source kinds and
//! the config factory.

use modrange_core_rs::entropy::{
    build_entropy_source, rebuild_entropy_source, CounterEntropy, EntropyConfig, EntropySource,
    XorShiftEntropy,
};
use modrange_core_rs::sampler::{Sampler, SamplerConfig};

// ============================================================================
// Source-Level Determinism
// ============================================================================

#[test]
fn test_xorshift_same_seed_same_stream() {
    let mut a = XorShiftEntropy::new(12345);
    let mut b = XorShiftEntropy::new(12345);

    for _ in 0..1000 {
        assert_eq!(a.next_entropy(), b.next_entropy());
    }
}

#[test]
fn test_xorshift_streams_look_different_across_seeds() {
    let mut a = XorShiftEntropy::new(1);
    let mut b = XorShiftEntropy::new(2);

    let collisions = (0..1000)
        .filter(|_| a.next_entropy() == b.next_entropy())
        .count();
    assert!(collisions < 5, "{} collisions across seeds", collisions);
}

#[test]
fn test_state_resumption_is_exact() {
    let configs = [
        EntropyConfig::XorShift { seed: 424242 },
        EntropyConfig::Counter { start: 17, step: 13 },
    ];

    for config in configs {
        let mut original = build_entropy_source(&config);
        for _ in 0..257 {
            original.next_entropy();
        }

        let mut resumed = rebuild_entropy_source(&config, original.state());
        for i in 0..257 {
            assert_eq!(
                resumed.next_entropy(),
                original.next_entropy(),
                "divergence at word {} for {:?}",
                i,
                config
            );
        }
    }
}

#[test]
fn test_counter_stream_is_plain_progression() {
    let mut source = CounterEntropy::new(100, 25);
    let words: Vec<u64> = (0..4).map(|_| source.next_entropy()).collect();
    assert_eq!(words, vec![100, 125, 150, 175]);
}

// ============================================================================
// Sampler-Level Determinism
// ============================================================================

#[test]
fn test_seeded_sampler_replays_exactly() {
    let config = SamplerConfig {
        size: 1000,
        entropy: EntropyConfig::XorShift { seed: 42 },
    };

    let mut first = Sampler::new(config.clone()).unwrap();
    let mut second = Sampler::new(config).unwrap();

    for _ in 0..500 {
        assert_eq!(first.draw().unwrap(), second.draw().unwrap());
    }

    // Not just the values: the internal range layout matches too
    assert_eq!(first.ranges(), second.ranges());

    for _ in 0..500 {
        assert_eq!(first.draw().unwrap(), second.draw().unwrap());
    }
    assert!(first.is_exhausted());
}

#[test]
fn test_counter_driven_draw_sequence() {
    // Counter 0, 1, 2, ... over a pool of 5 walks a fixed path through the
    // update cases; the expected values are derivable by hand.
    let mut sampler = Sampler::new(SamplerConfig {
        size: 5,
        entropy: EntropyConfig::Counter { start: 0, step: 1 },
    })
    .unwrap();

    let values: Vec<u64> = (0..5).map(|_| sampler.draw().unwrap()).collect();
    assert_eq!(values, vec![0, 2, 1, 4, 3]);
    assert!(sampler.is_exhausted());
}

#[test]
fn test_different_seeds_give_different_orders() {
    let draw_all = |seed: u64| -> Vec<u64> {
        let mut sampler = Sampler::new(SamplerConfig {
            size: 100,
            entropy: EntropyConfig::XorShift { seed },
        })
        .unwrap();
        (0..100).map(|_| sampler.draw().unwrap()).collect()
    };

    let a = draw_all(1);
    let b = draw_all(999_983);

    // Same value set, near-certainly different order
    assert_ne!(a, b);
    let mut sa = a.clone();
    let mut sb = b.clone();
    sa.sort();
    sb.sort();
    assert_eq!(sa, sb);
}
