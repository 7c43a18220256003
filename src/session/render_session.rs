use std::path::{Path, PathBuf};

use crate::catalog::scan::{Catalog, WorkUnit};
use crate::color::palette::Palette;
use crate::decode::document::FrameSeries;
use crate::foundation::core::{FrameIndex, SiblingTag};
use crate::foundation::error::{ReelError, ReelResult};
use crate::render::raster::Rasterizer;
use crate::render::writer::FrameWriter;
use crate::session::progress::ProgressSink;
use crate::session::reaper::reap_or_warn;

/// What to do when a single work unit cannot be completed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Stop the run at the first failed or unpaired unit.
    #[default]
    Abort,
    /// Report the unit, skip it, and continue with the next one.
    KeepGoing,
}

/// Options controlling a [`RenderSession`].
#[derive(Clone, Debug, Default)]
pub struct RenderSessionOpts {
    /// Coloring rule for every frame.
    pub palette: Palette,
    /// Behavior on unit-scoped failures.
    pub failure_policy: FailurePolicy,
}

/// Counters for a finished run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Units whose two documents were fully rendered.
    pub units_completed: u64,
    /// Units that failed while decoding or writing.
    pub units_failed: u64,
    /// Units skipped because a sibling was missing.
    pub units_skipped: u64,
    /// Output images written, including those of units that failed later.
    pub frames_written: u64,
    /// Consumed documents that could not be deleted.
    pub reap_failures: u64,
}

impl RunReport {
    /// `true` when every catalogued unit completed. Reap failures do not count against a run.
    pub fn is_success(&self) -> bool {
        self.units_failed == 0 && self.units_skipped == 0
    }
}

/// Sequential renderer for one input directory.
///
/// The catalog is taken once at construction. A run then walks the work units in catalog order;
/// for each unit the tag `0` document is decoded, rendered frame by frame, written and reaped
/// before the tag `1` document is opened, so at most one [`FrameSeries`] is alive at a time.
pub struct RenderSession {
    input_dir: PathBuf,
    catalog: Catalog,
    writer: FrameWriter,
    rasterizer: Rasterizer,
    opts: RenderSessionOpts,
    reaper: fn(&Path) -> bool,
}

impl RenderSession {
    /// Validate both directories and scan the input directory.
    ///
    /// Fails with [`ReelError::Configuration`] before any work if either directory is unusable.
    pub fn new(
        input_dir: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
        opts: RenderSessionOpts,
    ) -> ReelResult<Self> {
        let input_dir = input_dir.into();
        if !input_dir.is_dir() {
            return Err(ReelError::configuration(format!(
                "input directory '{}' does not exist or is not a directory",
                input_dir.display()
            )));
        }
        let writer = FrameWriter::new(output_dir)?;
        let catalog = Catalog::scan(&input_dir)?;

        for path in catalog.ignored() {
            tracing::warn!(path = %path.display(), "ignoring .json file outside the naming scheme");
        }
        for (name, path) in catalog.whole_documents() {
            tracing::warn!(
                unit = %name,
                path = %path.display(),
                "ignoring unsplit document; run `split` first"
            );
        }

        Ok(Self {
            input_dir,
            catalog,
            writer,
            rasterizer: Rasterizer::new(opts.palette),
            opts,
            reaper: reap_or_warn,
        })
    }

    /// Input directory this session was built from.
    pub fn input_dir(&self) -> &Path {
        &self.input_dir
    }

    /// Catalog taken at construction.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Render every work unit, reporting progress to `sink`.
    ///
    /// Under [`FailurePolicy::Abort`] the first unit-scoped error is reported to `sink` and
    /// returned. Under [`FailurePolicy::KeepGoing`] it is reported and counted in the returned
    /// [`RunReport`]. The terminal marker is emitted only when the loop reaches the end.
    pub fn run(&mut self, sink: &mut dyn ProgressSink) -> ReelResult<RunReport> {
        let mut report = RunReport::default();

        let unpaired = self.catalog.unpaired().to_vec();
        if let Some(first) = unpaired.first() {
            for unit in &unpaired {
                let err = unit.to_error();
                match self.opts.failure_policy {
                    FailurePolicy::Abort => {
                        tracing::error!(unit = %unit.name, error = %err, "unpaired unit, aborting run");
                    }
                    FailurePolicy::KeepGoing => {
                        tracing::error!(unit = %unit.name, error = %err, "unpaired unit, skipping");
                        report.units_skipped += 1;
                    }
                }
                sink.failed(&err);
            }
            if self.opts.failure_policy == FailurePolicy::Abort {
                return Err(first.to_error());
            }
        }

        let units = self.catalog.units().to_vec();
        for unit in &units {
            match self.render_unit(unit, sink, &mut report) {
                Ok(()) => report.units_completed += 1,
                Err(err) => {
                    tracing::error!(unit = %unit.name, error = %err, "work unit failed");
                    sink.failed(&err);
                    if err.is_fatal_for_run() || self.opts.failure_policy == FailurePolicy::Abort {
                        return Err(err);
                    }
                    report.units_failed += 1;
                }
            }
        }

        sink.finished();
        tracing::info!(?report, "run finished");
        Ok(report)
    }

    #[tracing::instrument(level = "info", skip_all, fields(unit = %unit.name))]
    fn render_unit(
        &mut self,
        unit: &WorkUnit,
        sink: &mut dyn ProgressSink,
        report: &mut RunReport,
    ) -> ReelResult<()> {
        for tag in SiblingTag::ALL {
            self.render_document(&unit.name, tag, unit.document(tag), sink, report)?;
        }
        Ok(())
    }

    fn render_document(
        &mut self,
        name: &str,
        tag: SiblingTag,
        path: &Path,
        sink: &mut dyn ProgressSink,
        report: &mut RunReport,
    ) -> ReelResult<()> {
        let series = FrameSeries::from_path(path)?;
        let total = series.iterations();

        for i in 0..total {
            let idx = FrameIndex(i as u64);
            let buf = self.rasterizer.paint(&series, idx)?;
            self.writer.write(buf, name, tag, idx)?;
            report.frames_written += 1;
            sink.frame_written(name, idx, total);
        }

        drop(series);
        self.rasterizer.release();
        if !(self.reaper)(path) {
            report.reap_failures += 1;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/render_session.rs"]
mod tests;
