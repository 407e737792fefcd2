//! Raw capture filenames:
//! `TYPE_OBJECT_EXPOSURE_BIN_CAMERA_FILTER_GAIN_DATETIME_TEMP_NUMBER`,
//! without `OBJECT` for flats and darks.

use std::fmt;
use std::sync::OnceLock;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;
use tracing::warn;

use crate::consts::NIGHT_BOUNDARY_HMS;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameKind {
    Light,
    Flat,
    Dark,
    Bias,
}

impl FrameKind {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "Light" => Some(Self::Light),
            "Flat" => Some(Self::Flat),
            "Dark" => Some(Self::Dark),
            "Bias" => Some(Self::Bias),
            _ => None,
        }
    }

    /// Flats and darks carry no object field.
    fn has_object(self) -> bool {
        matches!(self, Self::Light | Self::Bias)
    }
}

impl fmt::Display for FrameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Light => write!(f, "Light"),
            Self::Flat => write!(f, "Flat"),
            Self::Dark => write!(f, "Dark"),
            Self::Bias => write!(f, "Bias"),
        }
    }
}

/// Fields of a parsed capture filename.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameName {
    pub kind: FrameKind,
    /// `Flat`/`Dark` for frames without an object field.
    pub object: String,
    /// Seconds.
    pub exposure: f64,
    pub bin: String,
    pub camera: String,
    pub filter: String,
    /// Gain digits, `GAIN-100` -> `100`.
    pub gain: String,
    pub captured: NaiveDateTime,
    /// Sensor temperature, degrees C.
    pub temperature: f64,
    pub number: String,
}

impl FrameName {
    /// Parse a filename stem. Malformed names are logged and yield `None`.
    pub fn parse(stem: &str) -> Option<Self> {
        let parts: Vec<&str> = stem.split('_').collect();
        let kind = match parts.first().and_then(|t| FrameKind::from_token(t)) {
            Some(kind) => kind,
            None => {
                warn!("Unknown frame type in filename: {stem}");
                return None;
            }
        };

        let (object, rest) = if kind.has_object() {
            if parts.len() != 10 {
                warn!("Unexpected {kind} filename format: {stem}");
                return None;
            }
            (parts[1].to_string(), &parts[2..])
        } else {
            if parts.len() != 9 {
                warn!("Unexpected {kind} filename format: {stem}");
                return None;
            }
            (kind.to_string(), &parts[1..])
        };
        let [exposure, bin, camera, filter, gain, datetime, temp, number] = rest else {
            return None;
        };

        let Ok(exposure) = exposure.trim_end_matches('s').parse::<f64>() else {
            warn!("Invalid exposure in filename: {exposure}");
            return None;
        };
        let Some(gain) = parse_gain(gain) else {
            warn!("Invalid gain format in filename: {gain}");
            return None;
        };
        let Ok(captured) = NaiveDateTime::parse_from_str(datetime, "%Y%m%d-%H%M%S") else {
            warn!("Invalid datetime format in filename: {datetime}");
            return None;
        };
        let Some(temperature) = temp.strip_suffix('C').and_then(|t| t.parse::<f64>().ok()) else {
            warn!("Invalid temp format in filename: {temp}");
            return None;
        };

        Some(Self {
            kind,
            object,
            exposure,
            bin: bin.to_string(),
            camera: camera.to_string(),
            filter: filter.to_string(),
            gain,
            captured,
            temperature,
            number: number.to_string(),
        })
    }

    /// Exposure as a directory name (whole seconds).
    pub fn exposure_dir(&self) -> String {
        (self.exposure.trunc() as i64).to_string()
    }

    pub fn night(&self) -> NaiveDate {
        observing_night(self.captured)
    }
}

fn parse_gain(token: &str) -> Option<String> {
    static GAIN_REGEX: OnceLock<Regex> = OnceLock::new();
    let re = GAIN_REGEX.get_or_init(|| Regex::new(r"(?i)^gain-?(\d+)").unwrap());
    Some(re.captures(token)?.get(1)?.as_str().to_string())
}

/// The night a capture belongs to: its own date from 12:01:00, the previous
/// date before that.
pub fn observing_night(captured: NaiveDateTime) -> NaiveDate {
    let (h, m, s) = NIGHT_BOUNDARY_HMS;
    let date = captured.date();
    match NaiveTime::from_hms_opt(h, m, s) {
        Some(boundary) if captured.time() < boundary => date.pred_opt().unwrap_or(date),
        _ => date,
    }
}
