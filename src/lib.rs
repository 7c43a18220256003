//! mandelreel renders pre-computed Mandelbrot escape-time documents into PNG frame sequences.
//!
//! Upstream producers write one JSON document per batch of frames. Each document holds a
//! `width x height` grid of hue samples per frame, with `NaN` marking bounded cells. Documents
//! come in sibling pairs (`mandelbrot_nums_<name>_0.json` / `_1.json`) that together form a work
//! unit.
//!
//! # Pipeline overview
//!
//! 1. **Catalog**: list the input directory and pair siblings into ordered [`WorkUnit`]s
//! 2. **Decode**: read one document into a [`FrameSeries`]
//! 3. **Rasterize**: paint each frame into a reusable RGB buffer through a [`Palette`]
//! 4. **Write**: save the buffer as `<name>_<tag>_<frame>.png` via [`FrameWriter`]
//! 5. **Reap**: delete the consumed document once all of its frames are on disk
//!
//! [`RenderSession`] drives these steps strictly sequentially and reports progress to a
//! [`ProgressSink`].
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: for a fixed input directory the output files and status lines are stable.
//! - **Bounded memory**: at most one decoded document is alive at a time.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod catalog;
mod color;
mod decode;
mod foundation;
mod render;
mod session;
mod split;

pub use catalog::scan::{
    Catalog, INPUT_PREFIX, INPUT_SUFFIX, InputName, UnpairedUnit, WorkUnit, list_eligible,
    parse_input_name, sibling_file_name, whole_file_name,
};
pub use color::palette::{BOUNDED, HSB_SCALE, Palette, color, hsb_to_rgb};
pub use decode::document::FrameSeries;
pub use foundation::core::{Dimensions, FrameIndex, SiblingTag};
pub use foundation::error::{ReelError, ReelResult};
pub use render::raster::{Rasterizer, cell_to_pixel, paint_frame};
pub use render::writer::{FrameWriter, frame_file_name};
pub use session::progress::{
    DONE_MARKER, InMemoryProgress, ProgressEvent, ProgressSink, StatusWriter,
};
pub use session::reaper::{reap, reap_or_warn};
pub use session::render_session::{FailurePolicy, RenderSession, RenderSessionOpts, RunReport};
pub use split::halves::{SplitReport, split_counts, split_directory, split_document};
