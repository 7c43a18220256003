/// Convenience result type used across mandelreel.
pub type ReelResult<T> = Result<T, ReelError>;

/// Top-level error taxonomy used by the rasterization pipeline.
///
/// Every message names the file or directory it concerns, so the text can be shown to an
/// operator as-is.
#[derive(thiserror::Error, Debug)]
pub enum ReelError {
    /// Input or output directory missing or unreadable at startup.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A work unit is missing one of its two sibling documents.
    #[error("unpaired unit error: {0}")]
    UnpairedUnit(String),

    /// Malformed input document, missing field, wrong shape or non-numeric sample.
    #[error("decode error: {0}")]
    Decode(String),

    /// Failure while encoding or writing an output image.
    #[error("render error: {0}")]
    Render(String),

    /// Failure while deleting a consumed input document.
    #[error("reap error: {0}")]
    Reap(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ReelError {
    /// Build a [`ReelError::Configuration`] value.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Build a [`ReelError::UnpairedUnit`] value.
    pub fn unpaired_unit(msg: impl Into<String>) -> Self {
        Self::UnpairedUnit(msg.into())
    }

    /// Build a [`ReelError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`ReelError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`ReelError::Reap`] value.
    pub fn reap(msg: impl Into<String>) -> Self {
        Self::Reap(msg.into())
    }

    /// Return `true` for errors that end the whole run rather than a single work unit.
    pub fn is_fatal_for_run(&self) -> bool {
        matches!(self, Self::Configuration(_) | Self::Other(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
