/// Prefix carried by every rename diagnostic line.
pub const RENAME_LOG_PREFIX: &str = "[RENAME]";

/// Subdirectory of the pipeline output directory holding master frames.
pub const DEFAULT_MASTER_SUBDIR: &str = "master";

/// Subdirectory of the pipeline output directory holding per-filter state files.
pub const DEFAULT_STATE_SUBDIR: &str = "custom";

/// Extension of a per-filter state file.
pub const STATE_FILE_EXTENSION: &str = "txt";

/// Glob selecting master light artifacts.
pub const DEFAULT_CANDIDATE_PATTERN: &str = "masterLight*.xisf";

/// Regex recovering the filter token from a master light filename.
pub const DEFAULT_FILTER_PATTERN: &str = "FILTER-([A-Za-z]+)";

/// Anchor used by the live (astrometric solution) rename.
pub const MONO_ANCHOR: &str = "_mono_";

/// Anchor used by the deferred (autocrop) rename.
pub const FILTER_ANCHOR: &str = "_FILTER-";

/// Marker of the active frame count token.
pub const FRAMES_MARKER: &str = "_FRAMES-";

/// Marker of the total exposure token.
pub const TOTAL_MARKER: &str = "_TOTAL-";

/// Marker of the stacked frame count token.
pub const STACKED_MARKER: &str = "_STACKED-";

/// Stage names as reported by the host pipeline.
pub const STAGE_ASTROMETRIC_SOLUTION: &str = "Astrometric solution";
pub const STAGE_INTEGRATION: &str = "Integration";
pub const STAGE_AUTOCROP: &str = "Autocrop";

/// Outcome string the host reports for a finished stage.
pub const OUTCOME_DONE: &str = "done";

/// Acquisition filters known at design time. Others are tolerated.
pub const KNOWN_FILTERS: [&str; 7] = ["L", "R", "G", "B", "S", "H", "O"];

/// Sensor temperatures (degrees C) for which dark libraries exist.
pub const DEFAULT_DARK_TEMPERATURES: [i32; 3] = [0, -10, -20];

/// Directory names below the frame library base directory.
pub const CONSOLIDATED_DIR: &str = "consolidated";
pub const CALIBRATION_DIR: &str = "calibration";
pub const ORGANIZED_DIR: &str = "organized";

/// Captures taken before this time of day belong to the previous night.
pub const NIGHT_BOUNDARY_HMS: (u32, u32, u32) = (12, 1, 0);
