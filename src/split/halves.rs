use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::catalog::scan::{Catalog, sibling_file_name};
use crate::decode::document::FrameSeries;
use crate::foundation::core::SiblingTag;
use crate::foundation::error::{ReelError, ReelResult};
use crate::session::progress::ProgressSink;
use crate::session::reaper::reap_or_warn;
use crate::session::render_session::FailurePolicy;

/// Frame counts of the `_0` and `_1` halves; the first half takes the odd frame.
pub fn split_counts(iterations: usize) -> (usize, usize) {
    let first = iterations.div_ceil(2);
    (first, iterations - first)
}

/// Counters for a split run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SplitReport {
    /// Documents replaced by two siblings.
    pub documents_split: u64,
    /// Documents left in place because they could not be split.
    pub documents_failed: u64,
}

/// Split `path` (the unsplit document for `name`) into two siblings in `out_dir`, then delete it.
///
/// Either both siblings appear or neither does: the halves are written under `.part` names and
/// renamed only once both are complete. Existing siblings are never overwritten. Returns the frame
/// counts of both halves.
#[tracing::instrument(level = "info", skip(path, out_dir), fields(path = %path.display()))]
pub fn split_document(name: &str, path: &Path, out_dir: &Path) -> ReelResult<(usize, usize)> {
    let targets = SiblingTag::ALL.map(|tag| out_dir.join(sibling_file_name(name, tag)));
    if let Some(existing) = targets.iter().find(|t| t.exists()) {
        return Err(ReelError::decode(format!(
            "'{}': refusing to split, '{}' already exists",
            path.display(),
            existing.display()
        )));
    }

    let series = FrameSeries::from_path(path)?;
    let total = series.iterations();
    if total < 2 {
        return Err(ReelError::decode(format!(
            "'{}': cannot split a document of {total} frame(s)",
            path.display()
        )));
    }

    let (first, _) = split_counts(total);
    let (head, tail) = series.split_at(first)?;
    let counts = (head.iterations(), tail.iterations());
    let parts = targets.each_ref().map(|t| part_path(t));

    let written = write_part(&head, &parts[0]).and_then(|()| write_part(&tail, &parts[1]));
    drop((head, tail));
    if let Err(err) = written.and_then(|()| commit(&parts, &targets)) {
        discard(&parts);
        return Err(err);
    }

    reap_or_warn(path);
    Ok(counts)
}

/// Split every unsplit document in `dir`, in file name order.
pub fn split_directory(
    dir: &Path,
    policy: FailurePolicy,
    sink: &mut dyn ProgressSink,
) -> ReelResult<SplitReport> {
    if !dir.is_dir() {
        return Err(ReelError::configuration(format!(
            "input directory '{}' does not exist or is not a directory",
            dir.display()
        )));
    }
    let catalog = Catalog::scan(dir)?;
    let mut report = SplitReport::default();

    for (name, path) in catalog.whole_documents() {
        match split_document(name, path, dir) {
            Ok((first, second)) => {
                report.documents_split += 1;
                sink.document_split(name, first, second);
            }
            Err(err) => {
                tracing::error!(unit = %name, error = %err, "split failed");
                sink.failed(&err);
                if err.is_fatal_for_run() || policy == FailurePolicy::Abort {
                    return Err(err);
                }
                report.documents_failed += 1;
            }
        }
    }

    sink.finished();
    Ok(report)
}

fn part_path(path: &Path) -> PathBuf {
    let mut part = path.as_os_str().to_owned();
    part.push(".part");
    PathBuf::from(part)
}

fn write_part(series: &FrameSeries, part: &Path) -> ReelResult<()> {
    let f = File::create(part).with_context(|| format!("create '{}'", part.display()))?;
    let mut w = BufWriter::new(f);
    series.write_json(&mut w)?;
    w.flush()
        .with_context(|| format!("write '{}'", part.display()))?;
    Ok(())
}

// A scan only ever sees both siblings or neither: if the second rename fails the first is undone.
fn commit(parts: &[PathBuf; 2], targets: &[PathBuf; 2]) -> ReelResult<()> {
    std::fs::rename(&parts[0], &targets[0]).with_context(|| {
        format!("rename '{}' to '{}'", parts[0].display(), targets[0].display())
    })?;
    if let Err(e) = std::fs::rename(&parts[1], &targets[1]) {
        discard(&targets[..1]);
        return Err(anyhow::Error::new(e)
            .context(format!(
                "rename '{}' to '{}'",
                parts[1].display(),
                targets[1].display()
            ))
            .into());
    }
    Ok(())
}

fn discard(paths: &[PathBuf]) {
    for path in paths {
        match std::fs::remove_file(path) {
            Ok(()) => tracing::debug!(path = %path.display(), "removed partial split output"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "could not remove partial split output"
                );
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/split/halves.rs"]
mod tests;
