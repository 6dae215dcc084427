//! PyO3 bindings
//!
//! This module provides the Python interface to the Rust selector core.
//! The boundary is deliberately small: Python supplies the entropy words
//! and receives plain integers back.

pub mod generator;
