//! Range model
//!
//! A `Range` is the unit of bookkeeping for the selector: one contiguous
//! block of values that have not been drawn yet. The whole pool `[0, n)`
//! starts as a single range and gets carved up as values are drawn.
//!
//! CRITICAL: a range always covers at least one value. A range that would
//! become empty is removed from its `RangeSet`, never stored.

use serde::{Deserialize, Serialize};

/// A half-open interval `[start, start + size)` of not-yet-drawn values.
///
/// # Example
/// ```
/// use modrange_core_rs::Range;
///
/// let range = Range::new(100, 50); // covers 100..150
/// assert_eq!(range.start(), 100);
/// assert_eq!(range.size(), 50);
/// assert_eq!(range.end(), 150);
/// assert!(range.contains(149));
/// assert!(!range.contains(150));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Range {
    /// First value covered by this range
    start: u64,

    /// Number of values covered (always >= 1)
    size: u64,
}

impl Range {
    /// Create a new range covering `[start, start + size)`
    ///
    /// # Arguments
    /// * `start` - First value covered
    /// * `size` - Number of values covered (must be >= 1)
    ///
    /// # Panics
    /// Panics if `size == 0`
    ///
    /// # Example
    /// ```
    /// use modrange_core_rs::Range;
    ///
    /// let range = Range::new(0, 1000);
    /// ```
    pub fn new(start: u64, size: u64) -> Self {
        assert!(size >= 1, "size must be at least 1");
        Self { start, size }
    }

    /// Get the first value covered by this range
    pub fn start(&self) -> u64 {
        self.start
    }

    /// Get the number of values covered by this range
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Get the first value past the end of this range
    pub fn end(&self) -> u64 {
        self.start + self.size
    }

    /// Check whether `value` lies inside this range
    pub fn contains(&self, value: u64) -> bool {
        value >= self.start && value < self.end()
    }
}
