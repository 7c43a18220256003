use std::path::Path;

use crate::foundation::error::{ReelError, ReelResult};

/// Delete a consumed input document.
pub fn reap(path: &Path) -> ReelResult<()> {
    std::fs::remove_file(path)
        .map_err(|e| ReelError::reap(format!("delete '{}': {e}", path.display())))
}

/// Delete a consumed input document, logging instead of failing.
///
/// Returns `false` if the document is still on disk. Images already written are never touched.
pub fn reap_or_warn(path: &Path) -> bool {
    match reap(path) {
        Ok(()) => {
            tracing::debug!(path = %path.display(), "reaped input document");
            true
        }
        Err(e) => {
            tracing::warn!(error = %e, "consumed input document left on disk");
            false
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/reaper.rs"]
mod tests;
