use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;
use tracing::{debug, info, warn};

use crate::consts::RENAME_LOG_PREFIX;
use crate::error::{Result, StellarError};
use crate::filter::Filter;

use super::annotation::{splice_before_anchor, Annotation};
use super::pattern::glob_to_regex;
use super::report::{RenameReport, SkipReason, Skipped};

/// Renames master artifacts in one directory by splicing a per-filter
/// annotation before a fixed anchor.
#[derive(Clone, Debug)]
pub struct FilenameAnnotator {
    dir: PathBuf,
    candidates: Regex,
    filter_pattern: Regex,
    anchor: String,
    scope: Option<Filter>,
}

impl FilenameAnnotator {
    /// `filter_pattern` must capture the filter token in group 1; without a
    /// capture group the whole match is used.
    pub fn new(
        dir: impl Into<PathBuf>,
        candidate_glob: &str,
        filter_pattern: &str,
        anchor: impl Into<String>,
    ) -> Result<Self> {
        let filter_pattern =
            Regex::new(filter_pattern).map_err(|source| StellarError::InvalidPattern {
                pattern: filter_pattern.to_string(),
                source,
            })?;
        Ok(Self {
            dir: dir.into(),
            candidates: glob_to_regex(candidate_glob)?,
            filter_pattern,
            anchor: anchor.into(),
            scope: None,
        })
    }

    /// Only touch candidates of this filter; others are counted as out of scope.
    pub fn restrict_to(mut self, filter: Option<Filter>) -> Self {
        self.scope = filter;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Files in the directory whose name matches the candidate glob, in
    /// enumeration order. A missing directory yields no candidates.
    pub fn candidates(&self) -> Result<Vec<PathBuf>> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(dir = %self.dir.display(), "{RENAME_LOG_PREFIX} directory not found");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        let mut out = Vec::new();
        for entry in entries {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let name = entry.file_name();
            if name.to_str().is_some_and(|n| self.candidates.is_match(n)) {
                out.push(entry.path());
            }
        }
        Ok(out)
    }

    /// Filter token embedded in a filename.
    pub fn filter_of(&self, name: &str) -> Option<Filter> {
        let caps = self.filter_pattern.captures(name)?;
        let token = caps.get(1).or_else(|| caps.get(0))?.as_str();
        Filter::new(token).ok()
    }

    /// Run one pass. The candidate list is taken up front so a renamed file
    /// is never revisited; `lookup` yields the annotation for a filter.
    ///
    /// Only a failing rename is an error, everything else is a skip.
    pub fn annotate<F>(&self, mut lookup: F) -> Result<RenameReport>
    where
        F: FnMut(&Filter) -> Option<Annotation>,
    {
        let mut report = RenameReport::default();

        for path in self.candidates()? {
            match self.plan(&path, &mut lookup) {
                Plan::OutOfScope => report.out_of_scope += 1,
                Plan::Skip(reason) => {
                    let skipped = Skipped { path, reason };
                    warn!("{RENAME_LOG_PREFIX} {skipped}");
                    report.skipped.push(skipped);
                }
                Plan::Rename(target) => {
                    fs::rename(&path, &target).map_err(|source| StellarError::Rename {
                        from: path.clone(),
                        to: target.clone(),
                        source,
                    })?;
                    info!(
                        "{RENAME_LOG_PREFIX} {} -> {}",
                        path.display(),
                        target.display()
                    );
                    report.renamed.push((path, target));
                }
            }
        }

        Ok(report)
    }

    fn plan<F>(&self, path: &Path, lookup: &mut F) -> Plan
    where
        F: FnMut(&Filter) -> Option<Annotation>,
    {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            return Plan::Skip(SkipReason::NoFilterToken);
        };
        let Some(filter) = self.filter_of(name) else {
            return Plan::Skip(SkipReason::NoFilterToken);
        };
        if self.scope.as_ref().is_some_and(|s| *s != filter) {
            debug!(%filter, "{RENAME_LOG_PREFIX} outside pass scope: {name}");
            return Plan::OutOfScope;
        }

        let annotation = match lookup(&filter) {
            Some(a) if !a.is_degenerate() => a,
            _ => return Plan::Skip(SkipReason::MissingAnnotation),
        };
        if annotation.is_present_in(name) {
            return Plan::Skip(SkipReason::AlreadyAnnotated);
        }
        let Some(new_name) = splice_before_anchor(name, &self.anchor, &annotation.token()) else {
            return Plan::Skip(SkipReason::AnchorNotFound(self.anchor.clone()));
        };

        if !path.exists() {
            return Plan::Skip(SkipReason::FileNotFound);
        }
        let target = path.with_file_name(new_name);
        if target.exists() {
            return Plan::Skip(SkipReason::TargetExists(target));
        }
        Plan::Rename(target)
    }
}

enum Plan {
    OutOfScope,
    Skip(SkipReason),
    Rename(PathBuf),
}
