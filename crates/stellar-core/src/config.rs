use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_CANDIDATE_PATTERN, DEFAULT_DARK_TEMPERATURES, DEFAULT_FILTER_PATTERN,
    DEFAULT_MASTER_SUBDIR, DEFAULT_STATE_SUBDIR, FILTER_ANCHOR, KNOWN_FILTERS, MONO_ANCHOR,
};

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StellarConfig {
    #[serde(default)]
    pub rename: RenameConfig,
    #[serde(default)]
    pub library: LibraryConfig,
}

/// Where master artifacts and state files live below the pipeline output
/// directory, and how they are recognised.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RenameConfig {
    #[serde(default = "default_master_subdir")]
    pub master_subdir: PathBuf,
    #[serde(default = "default_state_subdir")]
    pub state_subdir: PathBuf,
    /// Filename glob selecting candidate artifacts.
    #[serde(default = "default_candidate_pattern")]
    pub candidate_pattern: String,
    /// Regex capturing the filter token of a candidate in group 1.
    #[serde(default = "default_filter_pattern")]
    pub filter_pattern: String,
    #[serde(default)]
    pub live: LiveRenameConfig,
    #[serde(default)]
    pub deferred: DeferredRenameConfig,
}

fn default_master_subdir() -> PathBuf {
    PathBuf::from(DEFAULT_MASTER_SUBDIR)
}
fn default_state_subdir() -> PathBuf {
    PathBuf::from(DEFAULT_STATE_SUBDIR)
}
fn default_candidate_pattern() -> String {
    DEFAULT_CANDIDATE_PATTERN.to_string()
}
fn default_filter_pattern() -> String {
    DEFAULT_FILTER_PATTERN.to_string()
}

impl Default for RenameConfig {
    fn default() -> Self {
        Self {
            master_subdir: default_master_subdir(),
            state_subdir: default_state_subdir(),
            candidate_pattern: default_candidate_pattern(),
            filter_pattern: default_filter_pattern(),
            live: LiveRenameConfig::default(),
            deferred: DeferredRenameConfig::default(),
        }
    }
}

/// Which token the astrometric solution pass injects.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LiveTokenStyle {
    /// `_FRAMES-<n>_TOTAL-<seconds>`
    #[default]
    FramesAndTotal,
    /// `_TOTAL-<duration>-<n>f`
    TotalOnly,
}

impl fmt::Display for LiveTokenStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FramesAndTotal => write!(f, "Frames + Total"),
            Self::TotalOnly => write!(f, "Total only"),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LiveRenameConfig {
    #[serde(default = "default_mono_anchor")]
    pub anchor: String,
    #[serde(default)]
    pub style: LiveTokenStyle,
}

fn default_mono_anchor() -> String {
    MONO_ANCHOR.to_string()
}

impl Default for LiveRenameConfig {
    fn default() -> Self {
        Self {
            anchor: default_mono_anchor(),
            style: LiveTokenStyle::default(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DeferredRenameConfig {
    #[serde(default = "default_filter_anchor")]
    pub anchor: String,
}

fn default_filter_anchor() -> String {
    FILTER_ANCHOR.to_string()
}

impl Default for DeferredRenameConfig {
    fn default() -> Self {
        Self {
            anchor: default_filter_anchor(),
        }
    }
}

/// Layout of the raw frame library handled by `consolidate` and `organize`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LibraryConfig {
    #[serde(default = "default_base_dir")]
    pub base_dir: PathBuf,
    /// Filters accepted for lights and flats.
    #[serde(default = "default_filters")]
    pub filters: Vec<String>,
    /// Temperatures (degrees C) with a dark library.
    #[serde(default = "default_dark_temperatures")]
    pub dark_temperatures: Vec<i32>,
}

fn default_base_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_default()
        .join("stellar")
}
fn default_filters() -> Vec<String> {
    KNOWN_FILTERS.iter().map(|f| f.to_string()).collect()
}
fn default_dark_temperatures() -> Vec<i32> {
    DEFAULT_DARK_TEMPERATURES.to_vec()
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            base_dir: default_base_dir(),
            filters: default_filters(),
            dark_temperatures: default_dark_temperatures(),
        }
    }
}
