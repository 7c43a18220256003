//! Shared value types and the error taxonomy.

/// Frame indices, sibling tags and grid geometry.
pub mod core;
/// Error taxonomy and result alias.
pub mod error;
