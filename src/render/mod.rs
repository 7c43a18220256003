//! Rasterization and image output.

/// Frame painting into a reusable pixel buffer.
pub mod raster;
/// PNG output under deterministic names.
pub mod writer;
