//! Modrange Core - Rust Engine
//!
//! Unique-value selection over a fixed integer pool with O(1) draws and
//! O(n)-bounded storage, driven entirely by caller-supplied entropy.
//!
//! # Architecture
//!
//! - **ranges**: The selector core (`Range`, `RangeSet`)
//! - **entropy**: Entropy sources (`EntropySource`, xorshift64*, counter)
//! - **sampler**: Seeded draw sequences with checkpoint support
//!
//! # Critical Invariants
//!
//! 1. No value is ever returned twice from the same selector
//! 2. Stored ranges are pairwise disjoint and cover exactly the undrawn set
//! 3. All randomness enters through the entropy layer (seeded, replayable)
//! 4. FFI boundary is minimal and safe
//!
//! # Example
//!
//! ```
//! use modrange_core_rs::entropy::EntropyConfig;
//! use modrange_core_rs::sampler::{Sampler, SamplerConfig};
//!
//! let mut sampler = Sampler::new(SamplerConfig {
//!     size: 100,
//!     entropy: EntropyConfig::XorShift { seed: 42 },
//! })
//! .unwrap();
//!
//! let mut values = sampler.draw_many(100).unwrap();
//! values.sort();
//! assert_eq!(values, (0..100).collect::<Vec<u64>>());
//! ```

// Module declarations
pub mod entropy;
pub mod ranges;
pub mod sampler;

// Re-exports for convenience
pub use entropy::{
    build_entropy_source, rebuild_entropy_source, CounterEntropy, EntropyConfig, EntropySource,
    XorShiftEntropy,
};
pub use ranges::{Range, RangeSet, RangeSetError};
pub use sampler::{
    compute_config_hash, validate_snapshot, Sampler, SamplerConfig, SamplerError, SamplerSnapshot,
};

// FFI module (when feature enabled)
#[cfg(feature = "pyo3")]
pub mod ffi;

// PyO3 exports (when feature enabled)
#[cfg(feature = "pyo3")]
use pyo3::prelude::*;

#[cfg(feature = "pyo3")]
#[pymodule]
fn modrange_core_rs(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<ffi::generator::PyModRangeGenerator>()?;
    Ok(())
}
