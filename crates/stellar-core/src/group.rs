//! Processing groups exposed by the host pipeline and the metadata recovered
//! from them.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::consts::RENAME_LOG_PREFIX;
use crate::filter::Filter;
use crate::rename::SkipReason;

/// Which grouping pass of the host a group belongs to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupingMode {
    /// Calibration groups.
    Pre,
    /// Post-calibration groups, one per integrated master.
    #[default]
    Post,
}

/// A group of source frames as seen by the host pipeline.
///
/// Typed accessors are preferred; when a host cannot provide `filter` or
/// `active_frames` directly, they are recovered from [`describe`](Self::describe),
/// which must contain `filter = <token>` and `(<N> active)`.
pub trait ProcessingGroup {
    fn filter(&self) -> Option<&str> {
        None
    }

    fn active_frames(&self) -> Option<u32> {
        None
    }

    fn total_exposure_seconds(&self) -> f64;

    fn describe(&self) -> String;
}

/// Aggregation-wide access to the host's groups.
pub trait GroupsProvider {
    fn groups_for_mode(&self, mode: GroupingMode) -> Vec<&dyn ProcessingGroup>;
}

/// A serializable group, used when the host hands groups over as a file.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct GroupRecord {
    #[serde(default)]
    pub mode: GroupingMode,
    #[serde(default)]
    pub filter: Option<String>,
    #[serde(default)]
    pub active_frames: Option<u32>,
    /// Total exposure of the active frames, in seconds.
    #[serde(default)]
    pub total_exposure: f64,
    /// Host textual form, used when the typed fields are missing.
    #[serde(default)]
    pub description: Option<String>,
}

impl ProcessingGroup for GroupRecord {
    fn filter(&self) -> Option<&str> {
        self.filter.as_deref()
    }

    fn active_frames(&self) -> Option<u32> {
        self.active_frames
    }

    fn total_exposure_seconds(&self) -> f64 {
        self.total_exposure
    }

    fn describe(&self) -> String {
        if let Some(ref text) = self.description {
            return text.clone();
        }
        let mut text = String::from("group:");
        if let Some(ref filter) = self.filter {
            text.push_str(&format!(" filter = {filter}"));
        }
        if let Some(n) = self.active_frames {
            text.push_str(&format!(" ({n} active)"));
        }
        text
    }
}

impl GroupsProvider for [GroupRecord] {
    fn groups_for_mode(&self, mode: GroupingMode) -> Vec<&dyn ProcessingGroup> {
        self.iter()
            .filter(|g| g.mode == mode)
            .map(|g| g as &dyn ProcessingGroup)
            .collect()
    }
}

impl GroupsProvider for Vec<GroupRecord> {
    fn groups_for_mode(&self, mode: GroupingMode) -> Vec<&dyn ProcessingGroup> {
        self.as_slice().groups_for_mode(mode)
    }
}

/// Active frame count of a group. `Unknown` and `Count(0)` both block
/// annotation but are reported differently.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActiveFrames {
    Unknown,
    Count(u32),
}

impl fmt::Display for ActiveFrames {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown => write!(f, "unknown"),
            Self::Count(n) => write!(f, "{n}"),
        }
    }
}

/// Metadata recovered from one processing group.
#[derive(Clone, Debug, PartialEq)]
pub struct GroupMetadata {
    pub filter: Option<Filter>,
    pub active_frames: ActiveFrames,
    pub total_exposure_seconds: f64,
}

impl GroupMetadata {
    /// Best-effort extraction; never fails, missing pieces stay empty.
    pub fn extract(group: &dyn ProcessingGroup) -> Self {
        let mut description: Option<String> = None;
        let mut text = || description.get_or_insert_with(|| group.describe()).clone();

        let filter = match group.filter() {
            Some(token) => match Filter::new(token) {
                Ok(f) => Some(f),
                Err(e) => {
                    warn!("{RENAME_LOG_PREFIX} {e}");
                    None
                }
            },
            None => parse_filter(&text()),
        };

        let active_frames = match group.active_frames() {
            Some(n) => ActiveFrames::Count(n),
            None => parse_active_frames(&text())
                .map(ActiveFrames::Count)
                .unwrap_or(ActiveFrames::Unknown),
        };

        Self {
            filter,
            active_frames,
            total_exposure_seconds: group.total_exposure_seconds(),
        }
    }

    /// Extraction from the textual form alone.
    pub fn from_description(text: &str, total_exposure_seconds: f64) -> Self {
        Self {
            filter: parse_filter(text),
            active_frames: parse_active_frames(text)
                .map(ActiveFrames::Count)
                .unwrap_or(ActiveFrames::Unknown),
            total_exposure_seconds,
        }
    }

    /// Filter and a positive frame count, or why this group cannot be used.
    pub fn annotatable(&self) -> Result<(&Filter, u32), SkipReason> {
        let filter = self.filter.as_ref().ok_or(SkipReason::NoFilterToken)?;
        match self.active_frames {
            ActiveFrames::Unknown => Err(SkipReason::UnknownActiveFrames),
            ActiveFrames::Count(0) => Err(SkipReason::ZeroActiveFrames),
            ActiveFrames::Count(n) => Ok((filter, n)),
        }
    }

    /// Log why this group will not contribute an annotation, if it won't.
    pub fn report_unusable(&self, group: &dyn ProcessingGroup) {
        if let Err(reason) = self.annotatable() {
            warn!("{RENAME_LOG_PREFIX} {reason}: {}", group.describe());
        } else {
            debug!(
                filter = ?self.filter,
                frames = %self.active_frames,
                exposure = self.total_exposure_seconds,
                "{RENAME_LOG_PREFIX} group metadata"
            );
        }
    }
}

/// Recover `N` from a `(<N> active)` phrase.
pub fn parse_active_frames(text: &str) -> Option<u32> {
    static ACTIVE_REGEX: OnceLock<Regex> = OnceLock::new();
    let re = ACTIVE_REGEX.get_or_init(|| Regex::new(r"\((\d+)\s*active\)").unwrap());
    re.captures(text)?.get(1)?.as_str().parse().ok()
}

/// Recover the token from a `filter = <token>` phrase.
pub fn parse_filter(text: &str) -> Option<Filter> {
    static FILTER_REGEX: OnceLock<Regex> = OnceLock::new();
    let re = FILTER_REGEX.get_or_init(|| Regex::new(r"filter\s*=\s*(\w+)").unwrap());
    let token = re.captures(text)?.get(1)?.as_str();
    Filter::new(token).ok()
}
