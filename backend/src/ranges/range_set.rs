//! RangeSet model
//!
//! The core selector structure: a dynamic collection of disjoint ranges
//! covering exactly the values of `[0, n)` that have not been drawn yet.
//!
//! Each draw consumes one caller-supplied entropy word, returns one
//! previously-undrawn value, and updates the collection in O(1): a range
//! either shrinks at a boundary, splits in two around an interior value,
//! or disappears via swap-removal when its last value goes.
//!
//! # Critical Invariants
//!
//! 1. Ranges are pairwise disjoint
//! 2. The union of all ranges is exactly the not-yet-drawn subset of `[0, n)`
//! 3. Storage order of ranges carries no meaning
//! 4. The number of ranges never exceeds `ceil(n/2)`
//! 5. `n` is fixed at construction

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ranges::range::Range;

/// Errors that can occur during range-set operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RangeSetError {
    #[error("Pool size must be at least 1, got {size}")]
    InvalidSize { size: u64 },

    #[error("All values have already been drawn from the pool")]
    Exhausted,
}

/// Draws unique values from `[0, size)`, one per entropy word, without
/// ever materializing the pool.
///
/// The structure stores only the *undrawn* values, as disjoint ranges in a
/// resizable array. A fresh set holds the single range `[0, size)`; a fully
/// drained set holds no ranges at all. Every [`select`](RangeSet::select)
/// call runs in O(1) time and appends at most one range, so worst-case
/// storage is `size/2 + 1` ranges regardless of the entropy sequence.
///
/// Purely sequential: there is no internal locking, and a `select` call
/// either completes fully or fails without mutation. Callers sharing a set
/// across threads must serialize access externally.
///
/// # Bias
///
/// `select` picks a range uniformly among *ranges*, not proportionally to
/// range *size*, and reuses the same entropy word for the in-range offset.
/// Values sitting in small ranges are therefore more likely per draw than
/// values in large ranges: the distribution over individual values is not
/// uniform, although the output is still repeat-free and, with decent
/// entropy, hard to predict. A uniform-over-values variant would weight the
/// range pick by size (e.g. through a cumulative-size lookup) at the cost
/// of the strict O(1) pick; this structure intentionally does not do that.
///
/// # Example
/// ```
/// use modrange_core_rs::RangeSet;
///
/// let mut set = RangeSet::new(10).unwrap();
/// let value = set.select(3).unwrap();
/// assert_eq!(value, 3);
/// assert_eq!(set.remaining(), 9);
/// assert_eq!(set.range_count(), 2); // split into [0,3) and [4,10)
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeSet {
    /// Disjoint ranges covering every value not yet drawn.
    /// Storage order is meaningless; removal uses `swap_remove`.
    ranges: Vec<Range>,

    /// Fixed pool size `n`; values are drawn from `[0, n)`
    size: u64,

    /// Number of values not yet drawn, tracked incrementally so that
    /// querying it is O(1) instead of a sum over ranges
    remaining: u64,
}

impl RangeSet {
    /// Create a selector over the pool `[0, size)`
    ///
    /// The new set holds the single range covering the whole pool. O(1)
    /// time and space.
    ///
    /// # Arguments
    /// * `size` - Pool size `n` (must be >= 1)
    ///
    /// # Returns
    /// - `Ok(RangeSet)` on success
    /// - `Err(RangeSetError::InvalidSize)` if `size == 0`
    ///
    /// # Example
    /// ```
    /// use modrange_core_rs::RangeSet;
    ///
    /// let set = RangeSet::new(1000).unwrap();
    /// assert_eq!(set.remaining(), 1000);
    /// assert_eq!(set.range_count(), 1);
    ///
    /// assert!(RangeSet::new(0).is_err());
    /// ```
    pub fn new(size: u64) -> Result<Self, RangeSetError> {
        if size == 0 {
            return Err(RangeSetError::InvalidSize { size });
        }

        Ok(Self {
            ranges: vec![Range::new(0, size)],
            size,
            remaining: size,
        })
    }

    /// Rebuild a selector from persisted parts (for checkpoint restoration)
    ///
    /// `remaining` is recomputed by summing the range sizes, so this costs
    /// O(R). Structural invariants (disjointness, bounds, conservation) are
    /// NOT re-checked here; snapshot validation is the caller's concern.
    ///
    /// # Arguments
    /// * `size` - Original pool size `n`
    /// * `ranges` - Ranges covering the not-yet-drawn values
    ///
    /// # Returns
    /// - `Ok(RangeSet)` on success
    /// - `Err(RangeSetError::InvalidSize)` if `size == 0`
    pub fn from_snapshot(size: u64, ranges: Vec<Range>) -> Result<Self, RangeSetError> {
        if size == 0 {
            return Err(RangeSetError::InvalidSize { size });
        }

        let remaining = ranges.iter().map(|r| r.size()).sum();
        Ok(Self {
            ranges,
            size,
            remaining,
        })
    }

    /// Draw one not-yet-drawn value, consuming one entropy word
    ///
    /// The entropy word drives both decisions:
    /// 1. `entropy % range_count` picks a range (uniform over ranges)
    /// 2. `entropy % range_size` picks the value inside it
    ///
    /// Reusing the word for both moduli keeps the draw to a single entropy
    /// consumption. It also correlates the two picks; that correlation is
    /// intentional (see the type-level bias note), and deriving independent
    /// sub-values instead would change the statistical behavior.
    ///
    /// # Arguments
    /// * `entropy` - Caller-supplied integer; only `%` is applied to it, so
    ///   any distribution is accepted and the unpredictability of the
    ///   returned values is exactly that of the supplied entropy
    ///
    /// # Returns
    /// - `Ok(value)` with `value` in `[0, size)`, never returned before and
    ///   never returned again
    /// - `Err(RangeSetError::Exhausted)` if every value has been drawn; the
    ///   set is left completely unchanged in that case
    ///
    /// # Example
    /// ```
    /// use modrange_core_rs::RangeSet;
    ///
    /// let mut set = RangeSet::new(1000).unwrap();
    /// assert_eq!(set.select(473).unwrap(), 473);
    /// assert_eq!(set.select(100).unwrap(), 100);
    /// assert_eq!(set.remaining(), 998);
    /// ```
    pub fn select(&mut self, entropy: u64) -> Result<u64, RangeSetError> {
        if self.ranges.is_empty() {
            return Err(RangeSetError::Exhausted);
        }

        // Pick the range, then the value inside it
        let range_index = (entropy % self.ranges.len() as u64) as usize;
        let chosen = self.ranges[range_index];
        let offset = entropy % chosen.size();
        let value = chosen.start() + offset;

        self.update_ranges(range_index, value);
        self.remaining -= 1;

        Ok(value)
    }

    /// Remove `value` from the range at `range_index`
    ///
    /// Four cases, all O(1):
    /// - sole value of the range: drop the range via swap-removal
    /// - first value: shrink from the left
    /// - last value: shrink from the right
    /// - interior value: split into two ranges, appending the right part
    ///
    /// Never stores a zero-size range and consumes exactly one value.
    fn update_ranges(&mut self, range_index: usize, value: u64) {
        let chosen = self.ranges[range_index];
        let start = chosen.start();
        let size = chosen.size();
        let offset = value - start;

        if offset == 0 {
            if size == 1 {
                // Swap-removal: overwrite with the last element and shrink.
                // O(1), and safe because storage order carries no meaning.
                self.ranges.swap_remove(range_index);
            } else {
                self.ranges[range_index] = Range::new(start + 1, size - 1);
            }
        } else if offset == size - 1 {
            self.ranges[range_index] = Range::new(start, size - 1);
        } else {
            // Interior value: split. Both parts are non-empty here, since
            // offset >= 1 and size - offset - 1 >= 1 in this branch.
            self.ranges[range_index] = Range::new(start, offset);
            self.ranges.push(Range::new(value + 1, size - offset - 1));
        }
    }

    /// Get the fixed pool size `n`
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Get the number of values not yet drawn (O(1), tracked incrementally)
    pub fn remaining(&self) -> u64 {
        self.remaining
    }

    /// Get the number of values drawn so far
    pub fn drawn(&self) -> u64 {
        self.size - self.remaining
    }

    /// Check whether every value has been drawn
    pub fn is_exhausted(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Get the current number of stored ranges
    pub fn range_count(&self) -> usize {
        self.ranges.len()
    }

    /// View the current ranges (storage order is meaningless)
    pub fn ranges(&self) -> &[Range] {
        &self.ranges
    }

    /// Upper bound on the range count, for capacity planning
    ///
    /// Returns the conservative bound `size/2 + 1`, which equals
    /// `ceil((size+1)/2)` and cannot overflow for any `u64` pool size. The
    /// exact reachable worst case is slightly tighter, `ceil(size/2)`:
    /// the count only grows on an interior split, each split also consumes
    /// one value, and every range keeps at least one undrawn value, so
    /// `size >= 2R - 1` at all times.
    ///
    /// # Example
    /// ```
    /// use modrange_core_rs::RangeSet;
    ///
    /// let set = RangeSet::new(1000).unwrap();
    /// assert_eq!(set.max_possible_ranges(), 501);
    /// ```
    pub fn max_possible_ranges(&self) -> u64 {
        self.size / 2 + 1
    }
}
