//! The per-frame lifecycle: catalog, decode, rasterize, write, reap.

/// Status stream sinks.
pub mod progress;
/// Removal of consumed input documents.
pub mod reaper;
/// Run driver.
pub mod render_session;
