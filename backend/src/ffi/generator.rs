//! PyO3 wrapper for the range-set selector
//!
//! This module provides the Python interface to the Rust selector core.

use pyo3::prelude::*;

use crate::ranges::RangeSet;

/// Python wrapper for the Rust range-set selector
///
/// Python drives the selector directly: it supplies one entropy integer
/// per draw and gets back a unique value, or `None` once the pool is
/// exhausted.
///
/// # Example (from Python)
///
/// ```python
/// from modrange_core_rs import ModRangeGenerator
///
/// gen = ModRangeGenerator(1000)
/// value = gen.generate_value(473)
/// assert value == 473
/// assert gen.remaining() == 999
/// ```
#[pyclass(name = "ModRangeGenerator")]
pub struct PyModRangeGenerator {
    inner: RangeSet,
}

#[pymethods]
impl PyModRangeGenerator {
    /// Create a new generator over the pool `[0, size)`
    ///
    /// # Arguments
    ///
    /// * `size` - Pool size (must be at least 1)
    ///
    /// # Errors
    ///
    /// Raises ValueError if `size` is zero
    #[new]
    fn new(size: u64) -> PyResult<Self> {
        let inner = RangeSet::new(size).map_err(|e| {
            PyErr::new::<pyo3::exceptions::PyValueError, _>(format!(
                "Failed to create generator: {}",
                e
            ))
        })?;

        Ok(PyModRangeGenerator { inner })
    }

    /// Draw the next unique value using the supplied entropy integer
    ///
    /// # Arguments
    ///
    /// * `entropy` - Caller-supplied integer driving the selection
    ///
    /// # Returns
    ///
    /// The drawn value, or `None` once every value has been drawn.
    /// Exhaustion is an expected end state in this API, not an exception.
    fn generate_value(&mut self, entropy: u64) -> Option<u64> {
        self.inner.select(entropy).ok()
    }

    /// Get the number of values not yet drawn
    fn remaining(&self) -> u64 {
        self.inner.remaining()
    }

    /// Check whether every value has been drawn
    fn is_exhausted(&self) -> bool {
        self.inner.is_exhausted()
    }

    /// Get the current number of stored ranges
    fn range_count(&self) -> usize {
        self.inner.range_count()
    }

    /// Get the current ranges as `(start, size)` tuples
    ///
    /// Storage order carries no meaning.
    fn ranges(&self) -> Vec<(u64, u64)> {
        self.inner
            .ranges()
            .iter()
            .map(|r| (r.start(), r.size()))
            .collect()
    }
}
