//! Input document decoding.
//!
//! Upstream producers write the bounded sentinel as a bare `NaN` token, which strict JSON
//! rejects. Those tokens are rewritten before the bytes reach `serde_json`.

/// `FrameSeries` and the JSON document model.
pub mod document;
pub(crate) mod nan;
