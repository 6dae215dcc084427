//! Range models for the selector
//!
//! A [`RangeSet`] tracks the not-yet-drawn subset of `[0, n)` as disjoint
//! [`Range`]s and hands out unique values one entropy word at a time.

pub mod range;
pub mod range_set;

// Re-exports
pub use range::Range;
pub use range_set::{RangeSet, RangeSetError};
