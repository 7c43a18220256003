//! Splitting oversized producer documents into `_0` / `_1` siblings.

/// Splitter implementation.
pub mod halves;
