use crate::consts::{FRAMES_MARKER, STACKED_MARKER, TOTAL_MARKER};
use crate::duration::format_duration_with_frames;

const LIVE_MARKERS: [&str; 2] = [FRAMES_MARKER, TOTAL_MARKER];
const STACKED_MARKERS: [&str; 1] = [STACKED_MARKER];

/// Token spliced into a master filename.
#[derive(Clone, Debug, PartialEq)]
pub enum Annotation {
    /// `_FRAMES-<n>_TOTAL-<seconds>`
    FramesAndTotal { frames: u32, total_seconds: f64 },
    /// `_TOTAL-<duration>-<n>f`
    Total { frames: u32, total_seconds: f64 },
    /// `_STACKED-<n>`
    Stacked { frames: u32 },
}

impl Annotation {
    pub fn token(&self) -> String {
        match self {
            Self::FramesAndTotal {
                frames,
                total_seconds,
            } => format!("{FRAMES_MARKER}{frames}{TOTAL_MARKER}{total_seconds}"),
            Self::Total {
                frames,
                total_seconds,
            } => format!(
                "{TOTAL_MARKER}{}",
                format_duration_with_frames(*total_seconds, *frames)
            ),
            Self::Stacked { frames } => format!("{STACKED_MARKER}{frames}"),
        }
    }

    /// Substrings any of which means a file already carries an annotation of
    /// this kind. Both live styles share one set.
    pub fn markers(&self) -> &'static [&'static str] {
        match self {
            Self::FramesAndTotal { .. } | Self::Total { .. } => &LIVE_MARKERS,
            Self::Stacked { .. } => &STACKED_MARKERS,
        }
    }

    pub fn is_present_in(&self, name: &str) -> bool {
        self.markers().iter().any(|m| name.contains(m))
    }

    /// A zero frame count or exposure must never reach a filename.
    pub fn is_degenerate(&self) -> bool {
        match self {
            Self::FramesAndTotal {
                frames,
                total_seconds,
            }
            | Self::Total {
                frames,
                total_seconds,
            } => *frames == 0 || !(*total_seconds > 0.0),
            Self::Stacked { frames } => *frames == 0,
        }
    }
}

/// Insert `token` immediately before the first occurrence of `anchor`.
pub fn splice_before_anchor(name: &str, anchor: &str, token: &str) -> Option<String> {
    let idx = name.find(anchor)?;
    let mut out = String::with_capacity(name.len() + token.len());
    out.push_str(&name[..idx]);
    out.push_str(token);
    out.push_str(&name[idx..]);
    Some(out)
}
