use std::fmt;

use crate::foundation::error::{ReelError, ReelResult};

/// Zero-based frame index inside one input document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameIndex(pub u64);

impl fmt::Display for FrameIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which half of a work unit a document belongs to.
///
/// Ordering follows processing order: `First` (tag `0`) always precedes `Second` (tag `1`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SiblingTag {
    /// Tag `0`.
    First,
    /// Tag `1`.
    Second,
}

impl SiblingTag {
    /// Both tags in processing order.
    pub const ALL: [SiblingTag; 2] = [SiblingTag::First, SiblingTag::Second];

    /// Parse the tag as it appears in file names.
    pub fn from_digit(s: &str) -> Option<Self> {
        match s {
            "0" => Some(Self::First),
            "1" => Some(Self::Second),
            _ => None,
        }
    }

    /// Numeric tag as written in file names.
    pub fn digit(self) -> u8 {
        match self {
            Self::First => 0,
            Self::Second => 1,
        }
    }
}

impl fmt::Display for SiblingTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.digit())
    }
}

/// Grid geometry in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dimensions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Dimensions {
    /// Create validated dimensions with `width > 0` and `height > 0`.
    pub fn new(width: u32, height: u32) -> ReelResult<Self> {
        if width == 0 || height == 0 {
            return Err(ReelError::decode(format!(
                "dimensions must be non-zero, got {width}x{height}"
            )));
        }
        Ok(Self { width, height })
    }

    /// Number of cells in one frame (`width * height`).
    pub fn cells(self) -> usize {
        self.width as usize * self.height as usize
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
