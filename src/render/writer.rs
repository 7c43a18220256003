use std::path::{Path, PathBuf};

use image::{ImageFormat, RgbImage};

use crate::foundation::core::{FrameIndex, SiblingTag};
use crate::foundation::error::{ReelError, ReelResult};

/// Output file name for one frame: `<name>_<tag>_<frame_index>.png`.
pub fn frame_file_name(name: &str, tag: SiblingTag, idx: FrameIndex) -> String {
    format!("{name}_{tag}_{idx}.png")
}

/// Persists rendered frames as PNG files in a fixed directory.
#[derive(Clone, Debug)]
pub struct FrameWriter {
    out_dir: PathBuf,
}

impl FrameWriter {
    /// Create a writer for an existing output directory.
    ///
    /// Fails with [`ReelError::Configuration`] if `out_dir` is not a directory.
    pub fn new(out_dir: impl Into<PathBuf>) -> ReelResult<Self> {
        let out_dir = out_dir.into();
        if !out_dir.is_dir() {
            return Err(ReelError::configuration(format!(
                "output directory '{}' does not exist or is not a directory",
                out_dir.display()
            )));
        }
        Ok(Self { out_dir })
    }

    /// Directory frames are written to.
    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Full path of the file for `(name, tag, idx)`.
    pub fn frame_path(&self, name: &str, tag: SiblingTag, idx: FrameIndex) -> PathBuf {
        self.out_dir.join(frame_file_name(name, tag, idx))
    }

    /// Encode `buf` as a 24-bit PNG, replacing any existing file.
    pub fn write(
        &self,
        buf: &RgbImage,
        name: &str,
        tag: SiblingTag,
        idx: FrameIndex,
    ) -> ReelResult<PathBuf> {
        let path = self.frame_path(name, tag, idx);
        buf.save_with_format(&path, ImageFormat::Png)
            .map_err(|e| ReelError::render(format!("write png '{}': {e}", path.display())))?;
        tracing::trace!(path = %path.display(), "wrote frame");
        Ok(path)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/writer.rs"]
mod tests;
