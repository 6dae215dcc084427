//! Sampler - seeded draw sequences over a fixed pool
//!
//! Wraps the range-set selector with an entropy source, draw accounting,
//! and checkpoint support.
//!
//! See `engine.rs` for the draw loop and `checkpoint.rs` for save/load.

pub mod checkpoint;
pub mod engine;

// Re-export main types for convenience
pub use engine::{Sampler, SamplerConfig, SamplerError};

// Re-export checkpoint types
pub use checkpoint::{compute_config_hash, validate_snapshot, SamplerSnapshot};
