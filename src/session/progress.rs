use std::io::Write;

use crate::foundation::core::FrameIndex;
use crate::foundation::error::ReelError;

/// Terminal marker written once every work unit has been handled.
pub const DONE_MARKER: &str = "done";

/// Receiver for the textual status stream.
///
/// Ordering contract: `frame_written` is called in the order frames are written, and `finished`
/// is called at most once, after the last unit.
pub trait ProgressSink {
    /// One frame of `name` has been written; `idx` is zero-based, `total` is the frame count of
    /// the current document.
    fn frame_written(&mut self, name: &str, idx: FrameIndex, total: usize);
    /// A work unit failed or was skipped, or the run could not start.
    fn failed(&mut self, err: &ReelError);
    /// A document was split into `first` + `second` frames.
    fn document_split(&mut self, name: &str, first: usize, second: usize);
    /// All units are done.
    fn finished(&mut self);
}

/// Writes status lines to any `Write` (stdout in the binary).
///
/// Write failures on the status stream are logged and otherwise ignored; they never abort a run.
#[derive(Debug)]
pub struct StatusWriter<W: Write> {
    out: W,
}

impl<W: Write> StatusWriter<W> {
    /// Wrap a writer.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Recover the wrapped writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, line: std::fmt::Arguments<'_>) {
        if let Err(e) = writeln!(self.out, "{line}").and_then(|()| self.out.flush()) {
            tracing::warn!(error = %e, "failed to write status line");
        }
    }
}

impl<W: Write> ProgressSink for StatusWriter<W> {
    fn frame_written(&mut self, name: &str, idx: FrameIndex, total: usize) {
        self.line(format_args!("{name}, {}/{total}", idx.0 + 1));
    }

    fn failed(&mut self, err: &ReelError) {
        self.line(format_args!("error: {err}"));
    }

    fn document_split(&mut self, name: &str, first: usize, second: usize) {
        self.line(format_args!("split {name}: {first} + {second}"));
    }

    fn finished(&mut self) {
        self.line(format_args!("{DONE_MARKER}"));
    }
}

/// One recorded status event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProgressEvent {
    /// See [`ProgressSink::frame_written`].
    Frame {
        /// Unit identifier.
        name: String,
        /// Zero-based frame index.
        idx: FrameIndex,
        /// Frames in the document.
        total: usize,
    },
    /// See [`ProgressSink::failed`]; holds the rendered error message.
    Failed(String),
    /// See [`ProgressSink::document_split`].
    Split {
        /// Unit identifier.
        name: String,
        /// Frames in the `_0` half.
        first: usize,
        /// Frames in the `_1` half.
        second: usize,
    },
    /// See [`ProgressSink::finished`].
    Finished,
}

/// In-memory sink for tests and embedding.
#[derive(Debug, Default)]
pub struct InMemoryProgress {
    events: Vec<ProgressEvent>,
}

impl InMemoryProgress {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Events in arrival order.
    pub fn events(&self) -> &[ProgressEvent] {
        &self.events
    }

    /// Events rendered as the lines [`StatusWriter`] would print.
    pub fn lines(&self) -> Vec<String> {
        self.events
            .iter()
            .map(|ev| match ev {
                ProgressEvent::Frame { name, idx, total } => {
                    format!("{name}, {}/{total}", idx.0 + 1)
                }
                ProgressEvent::Failed(msg) => format!("error: {msg}"),
                ProgressEvent::Split {
                    name,
                    first,
                    second,
                } => format!("split {name}: {first} + {second}"),
                ProgressEvent::Finished => DONE_MARKER.to_owned(),
            })
            .collect()
    }
}

impl ProgressSink for InMemoryProgress {
    fn frame_written(&mut self, name: &str, idx: FrameIndex, total: usize) {
        self.events.push(ProgressEvent::Frame {
            name: name.to_owned(),
            idx,
            total,
        });
    }

    fn failed(&mut self, err: &ReelError) {
        self.events.push(ProgressEvent::Failed(err.to_string()));
    }

    fn document_split(&mut self, name: &str, first: usize, second: usize) {
        self.events.push(ProgressEvent::Split {
            name: name.to_owned(),
            first,
            second,
        });
    }

    fn finished(&mut self) {
        self.events.push(ProgressEvent::Finished);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/progress.rs"]
mod tests;
