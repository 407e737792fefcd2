mod annotation;
mod annotator;
mod pattern;
mod report;

pub use annotation::{splice_before_anchor, Annotation};
pub use annotator::FilenameAnnotator;
pub use pattern::glob_to_regex;
pub use report::{RenameReport, SkipReason, Skipped};
