use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::foundation::core::SiblingTag;
use crate::foundation::error::{ReelError, ReelResult};

/// Literal prefix shared by every input document name.
pub const INPUT_PREFIX: &str = "mandelbrot_nums_";
/// Eligibility suffix (lowercase, exact).
pub const INPUT_SUFFIX: &str = ".json";

/// Parsed form of an eligible input file name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputName {
    /// `mandelbrot_nums_<name>_<tag>.json`, one half of a work unit.
    Sibling {
        /// Unit identifier.
        name: String,
        /// Half of the unit.
        tag: SiblingTag,
    },
    /// `mandelbrot_nums_<name>.json`, a producer document that has not been split yet.
    Whole {
        /// Unit identifier.
        name: String,
    },
}

/// Parse a file name against the input naming scheme.
///
/// Returns `None` for names that are not `.json` files or do not follow the scheme. `<name>` must
/// be non-empty and must not contain `_`.
pub fn parse_input_name(file_name: &str) -> Option<InputName> {
    let stem = file_name
        .strip_suffix(INPUT_SUFFIX)?
        .strip_prefix(INPUT_PREFIX)?;

    match stem.split_once('_') {
        None if !stem.is_empty() => Some(InputName::Whole {
            name: stem.to_owned(),
        }),
        None => None,
        Some((name, tag)) => {
            if name.is_empty() || tag.contains('_') {
                return None;
            }
            let tag = SiblingTag::from_digit(tag)?;
            Some(InputName::Sibling {
                name: name.to_owned(),
                tag,
            })
        }
    }
}

/// File name of the sibling document for `(name, tag)`.
pub fn sibling_file_name(name: &str, tag: SiblingTag) -> String {
    format!("{INPUT_PREFIX}{name}_{tag}{INPUT_SUFFIX}")
}

/// File name of an unsplit producer document.
pub fn whole_file_name(name: &str) -> String {
    format!("{INPUT_PREFIX}{name}{INPUT_SUFFIX}")
}

/// Two sibling documents sharing an identifier, processed `First` then `Second`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkUnit {
    /// Shared identifier.
    pub name: String,
    /// Path of the tag `0` document.
    pub first: PathBuf,
    /// Path of the tag `1` document.
    pub second: PathBuf,
}

impl WorkUnit {
    /// Path of the document with the given tag.
    pub fn document(&self, tag: SiblingTag) -> &Path {
        match tag {
            SiblingTag::First => &self.first,
            SiblingTag::Second => &self.second,
        }
    }
}

/// A unit for which only one sibling exists on disk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnpairedUnit {
    /// Shared identifier.
    pub name: String,
    /// The sibling that exists.
    pub present: PathBuf,
    /// The sibling that was expected but not found.
    pub missing: PathBuf,
}

impl UnpairedUnit {
    /// Error describing this unit, naming both files.
    pub fn to_error(&self) -> ReelError {
        ReelError::unpaired_unit(format!(
            "unit '{}': found '{}' but '{}' is missing",
            self.name,
            self.present.display(),
            self.missing.display()
        ))
    }
}

/// Deterministic view of an input directory.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    units: Vec<WorkUnit>,
    unpaired: Vec<UnpairedUnit>,
    whole: Vec<(String, PathBuf)>,
    ignored: Vec<PathBuf>,
}

impl Catalog {
    /// List `dir` and build a catalog from its eligible files.
    ///
    /// Fails with [`ReelError::Configuration`] if the directory cannot be listed.
    #[tracing::instrument(level = "debug")]
    pub fn scan(dir: &Path) -> ReelResult<Self> {
        let names = list_eligible(dir)?;
        let catalog = Self::from_file_names(dir, names);
        tracing::info!(
            dir = %dir.display(),
            units = catalog.units.len(),
            unpaired = catalog.unpaired.len(),
            unsplit = catalog.whole.len(),
            ignored = catalog.ignored.len(),
            "scanned input directory"
        );
        Ok(catalog)
    }

    /// Build a catalog from bare file names located in `dir`.
    ///
    /// Names are sorted lexicographically before grouping, so the result does not depend on
    /// the iteration order of `names`.
    pub fn from_file_names<I, S>(dir: &Path, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut names: Vec<String> = names
            .into_iter()
            .map(Into::into)
            .filter(|n| n.ends_with(INPUT_SUFFIX))
            .collect();
        names.sort();
        names.dedup();

        let mut out = Self::default();
        let mut parsed = Vec::with_capacity(names.len());
        let mut tags_by_name: HashMap<String, [bool; 2]> = HashMap::new();

        for file_name in &names {
            match parse_input_name(file_name) {
                Some(InputName::Sibling { name, tag }) => {
                    tags_by_name.entry(name.clone()).or_default()[tag.digit() as usize] = true;
                    parsed.push((name, tag, file_name));
                }
                Some(InputName::Whole { name }) => {
                    out.whole.push((name, dir.join(file_name)));
                }
                None => out.ignored.push(dir.join(file_name)),
            }
        }

        for (name, tag, file_name) in parsed {
            let present = tags_by_name.get(&name).copied().unwrap_or_default();
            match (tag, present) {
                (SiblingTag::First, [true, true]) => out.units.push(WorkUnit {
                    first: dir.join(file_name),
                    second: dir.join(sibling_file_name(&name, SiblingTag::Second)),
                    name,
                }),
                (SiblingTag::Second, [true, true]) => {}
                (SiblingTag::First, _) => out.unpaired.push(UnpairedUnit {
                    present: dir.join(file_name),
                    missing: dir.join(sibling_file_name(&name, SiblingTag::Second)),
                    name,
                }),
                (SiblingTag::Second, _) => out.unpaired.push(UnpairedUnit {
                    present: dir.join(file_name),
                    missing: dir.join(sibling_file_name(&name, SiblingTag::First)),
                    name,
                }),
            }
        }

        out
    }

    /// Complete work units, ordered by their tag `0` file name.
    pub fn units(&self) -> &[WorkUnit] {
        &self.units
    }

    /// Units missing a sibling, ordered by the file that is present.
    pub fn unpaired(&self) -> &[UnpairedUnit] {
        &self.unpaired
    }

    /// Unsplit producer documents as `(name, path)`, in file name order.
    pub fn whole_documents(&self) -> &[(String, PathBuf)] {
        &self.whole
    }

    /// `.json` files that do not follow the naming scheme.
    pub fn ignored(&self) -> &[PathBuf] {
        &self.ignored
    }
}

/// Sorted names of the `.json` regular files in `dir`.
pub fn list_eligible(dir: &Path) -> ReelResult<Vec<String>> {
    let entries = std::fs::read_dir(dir).map_err(|e| {
        ReelError::configuration(format!("list input directory '{}': {e}", dir.display()))
    })?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| {
            ReelError::configuration(format!("list input directory '{}': {e}", dir.display()))
        })?;
        let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
        if is_dir {
            continue;
        }
        match entry.file_name().into_string() {
            Ok(name) if name.ends_with(INPUT_SUFFIX) => names.push(name),
            Ok(_) => {}
            Err(raw) => {
                tracing::warn!(name = ?raw, "skipping input file with a non UTF-8 name");
            }
        }
    }
    names.sort();
    Ok(names)
}

#[cfg(test)]
#[path = "../../tests/unit/catalog/scan.rs"]
mod tests;
