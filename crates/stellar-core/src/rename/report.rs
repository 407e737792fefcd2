use std::fmt;
use std::path::PathBuf;

/// Why a group or candidate file was left alone.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SkipReason {
    NoFilterToken,
    UnknownActiveFrames,
    ZeroActiveFrames,
    NoGroup,
    MissingAnnotation,
    AlreadyAnnotated,
    AnchorNotFound(String),
    FileNotFound,
    TargetExists(PathBuf),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoFilterToken => write!(f, "no filter token found"),
            Self::UnknownActiveFrames => write!(f, "active frame count unknown"),
            Self::ZeroActiveFrames => write!(f, "zero active frames"),
            Self::NoGroup => write!(f, "event carries no group"),
            Self::MissingAnnotation => write!(f, "could not read stacked frames"),
            Self::AlreadyAnnotated => write!(f, "already annotated"),
            Self::AnchorNotFound(anchor) => write!(f, "anchor {anchor:?} not found"),
            Self::FileNotFound => write!(f, "file not found"),
            Self::TargetExists(target) => {
                write!(f, "target {} already exists", target.display())
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Skipped {
    pub path: PathBuf,
    pub reason: SkipReason,
}

impl fmt::Display for Skipped {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.reason {
            SkipReason::MissingAnnotation => {
                write!(f, "Could not read stacked frames for: {}", self.path.display())
            }
            _ => write!(f, "{}: {}", self.reason, self.path.display()),
        }
    }
}

/// Outcome of one annotation pass.
#[derive(Clone, Debug, Default)]
pub struct RenameReport {
    /// `(old, new)` paths, in processing order.
    pub renamed: Vec<(PathBuf, PathBuf)>,
    pub skipped: Vec<Skipped>,
    /// Candidates belonging to a filter outside the pass scope.
    pub out_of_scope: usize,
}

impl RenameReport {
    pub fn is_empty(&self) -> bool {
        self.renamed.is_empty() && self.skipped.is_empty()
    }

    pub fn skipped_for(&self, reason: &SkipReason) -> usize {
        self.skipped.iter().filter(|s| &s.reason == reason).count()
    }
}
