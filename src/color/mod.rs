//! Sample-to-pixel coloring rules.

/// Palettes and the HSB conversion.
pub mod palette;
