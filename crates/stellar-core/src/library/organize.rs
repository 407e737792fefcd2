use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::config::LibraryConfig;
use crate::consts::{CALIBRATION_DIR, CONSOLIDATED_DIR, ORGANIZED_DIR};
use crate::error::{Result, StellarError};

use super::naming::FrameName;
use super::{file_name, files_in, files_recursive, has_extension, subdirs_of, FileAction};

const LIGHT_EXTENSIONS: [&str; 3] = ["fit", "fits", "xisf"];

/// Gain, temperature and exposure shared by lights that need the same darks.
#[derive(Clone, Debug, PartialEq)]
struct CalibrationKey {
    gain: String,
    temperature: f64,
    exposure: f64,
}

/// Plan the working set for `object` under `organized/<object>`:
/// one `night N/{lights,flats}` per observing night (sorted by date), plus
/// bias frames per gain and darks per gain/temperature/exposure at the root.
/// An object without observation nights yields an empty plan.
pub fn organize(object: &str, config: &LibraryConfig) -> Result<Vec<FileAction>> {
    let consolidated = config.base_dir.join(CONSOLIDATED_DIR);
    let obj_dir = consolidated.join(object);
    if !obj_dir.is_dir() {
        return Err(StellarError::MissingDirectory(obj_dir));
    }
    let output_dir = config.base_dir.join(ORGANIZED_DIR).join(object);

    let mut dates = BTreeSet::new();
    for filter in &config.filters {
        for date_dir in subdirs_of(&obj_dir.join(filter))? {
            if let Some(name) = date_dir.file_name().and_then(|n| n.to_str()) {
                dates.insert(name.to_string());
            }
        }
    }
    if dates.is_empty() {
        warn!("No observation dates found for object '{object}'");
        return Ok(Vec::new());
    }

    let mut actions = vec![FileAction::CreateDir(output_dir.clone())];
    let mut keys: Vec<CalibrationKey> = Vec::new();

    for (i, date) in dates.iter().enumerate() {
        let night_dir = output_dir.join(format!("night {}", i + 1));
        let lights_dir = night_dir.join("lights");
        let flats_dir = night_dir.join("flats");
        actions.push(FileAction::CreateDir(lights_dir.clone()));
        actions.push(FileAction::CreateDir(flats_dir.clone()));
        info!(night = i + 1, date = %date, "Creating {}", night_dir.display());

        for filter in &config.filters {
            for exp_dir in subdirs_of(&obj_dir.join(filter).join(date))? {
                for file in files_in(&exp_dir)? {
                    if !has_extension(&file, &LIGHT_EXTENSIONS) {
                        continue;
                    }
                    let Some(frame) = file
                        .file_stem()
                        .and_then(|s| s.to_str())
                        .and_then(FrameName::parse)
                    else {
                        continue;
                    };
                    let key = CalibrationKey {
                        gain: frame.gain,
                        temperature: frame.temperature,
                        exposure: frame.exposure,
                    };
                    if !keys.contains(&key) {
                        keys.push(key);
                    }
                    actions.push(FileAction::Copy {
                        to: lights_dir.join(file_name(&file)),
                        from: file,
                    });
                }
            }

            let flat_dir = consolidated.join("Flat").join(filter).join(date);
            for file in files_recursive(&flat_dir)? {
                if has_extension(&file, &LIGHT_EXTENSIONS) {
                    actions.push(FileAction::Copy {
                        to: flats_dir.join(file_name(&file)),
                        from: file,
                    });
                }
            }
        }
    }

    let calibration = config.base_dir.join(CALIBRATION_DIR);
    plan_bias(&calibration, &keys, &output_dir, &mut actions)?;
    plan_darks(&calibration, &keys, &config.dark_temperatures, &output_dir, &mut actions)?;

    Ok(actions)
}

fn plan_bias(
    calibration: &Path,
    keys: &[CalibrationKey],
    output_dir: &Path,
    actions: &mut Vec<FileAction>,
) -> Result<()> {
    let mut seen = BTreeSet::new();
    for key in keys {
        if !seen.insert(key.gain.as_str()) {
            continue;
        }
        let bias_dir = calibration.join("bias").join(&key.gain);
        if !bias_dir.is_dir() {
            warn!(gain = %key.gain, "No bias directory at {}", bias_dir.display());
            continue;
        }
        for file in files_in(&bias_dir)? {
            actions.push(FileAction::Copy {
                to: output_dir.join(file_name(&file)),
                from: file,
            });
        }
    }
    Ok(())
}

fn plan_darks(
    calibration: &Path,
    keys: &[CalibrationKey],
    temperatures: &[i32],
    output_dir: &Path,
    actions: &mut Vec<FileAction>,
) -> Result<()> {
    for key in keys {
        let Some(temp) = closest_temperature(key.temperature, temperatures) else {
            warn!(temperature = key.temperature, "No dark temperature available");
            continue;
        };
        let dark_dir = calibration
            .join("darks")
            .join(&key.gain)
            .join(format!("{temp}C"));
        if !dark_dir.is_dir() {
            warn!("No dark temp directory: {}", dark_dir.display());
            continue;
        }

        let exposure_tag = format!("EXPOSURE-{:.2}s", key.exposure);
        let matched: Vec<PathBuf> = files_in(&dark_dir)?
            .into_iter()
            .filter(|f| has_extension(f, &["xisf"]))
            .filter(|f| file_name(f).to_string_lossy().contains(&exposure_tag))
            .collect();
        if matched.is_empty() {
            warn!(
                gain = %key.gain,
                temperature = temp,
                exposure = key.exposure,
                "No darks found"
            );
            continue;
        }
        for file in matched {
            let to = output_dir.join(file_name(&file));
            if !actions.iter().any(|a| matches!(a, FileAction::Copy { to: t, .. } if *t == to)) {
                actions.push(FileAction::Copy { from: file, to });
            }
        }
    }
    Ok(())
}

/// Available dark temperature nearest to `target`.
pub fn closest_temperature(target: f64, available: &[i32]) -> Option<i32> {
    if !target.is_finite() {
        return None;
    }
    available.iter().copied().min_by(|a, b| {
        let da = (f64::from(*a) - target).abs();
        let db = (f64::from(*b) - target).abs();
        da.total_cmp(&db)
    })
}
