mod common;

use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use common::{names_in, touch};
use stellar_core::config::LibraryConfig;
use stellar_core::error::StellarError;
use stellar_core::library::naming::{observing_night, FrameKind, FrameName};
use stellar_core::library::{closest_temperature, consolidate, execute, organize, FileAction};

fn library(base: &Path) -> LibraryConfig {
    LibraryConfig {
        base_dir: base.to_path_buf(),
        ..Default::default()
    }
}

fn at(text: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(text, "%Y%m%d-%H%M%S").unwrap()
}

// ---------------------------------------------------------------------------
// Filename parsing
// ---------------------------------------------------------------------------

#[test]
fn test_parse_light_name() {
    let f = FrameName::parse("Light_M42_120s_BIN-1_6248x4176_L_GAIN-100_20230922-213015_-10.0C_001")
        .unwrap();
    assert_eq!(f.kind, FrameKind::Light);
    assert_eq!(f.object, "M42");
    assert_eq!(f.exposure, 120.0);
    assert_eq!(f.bin, "BIN-1");
    assert_eq!(f.camera, "6248x4176");
    assert_eq!(f.filter, "L");
    assert_eq!(f.gain, "100");
    assert_eq!(f.captured, at("20230922-213015"));
    assert_eq!(f.temperature, -10.0);
    assert_eq!(f.number, "001");
    assert_eq!(f.exposure_dir(), "120");
}

#[test]
fn test_parse_flat_and_dark_names() {
    let flat = FrameName::parse("Flat_1.5s_BIN-1_6248x4176_R_gain100_20230922-190000_-10.0C_004")
        .unwrap();
    assert_eq!(flat.kind, FrameKind::Flat);
    assert_eq!(flat.object, "Flat");
    assert_eq!(flat.filter, "R");
    assert_eq!(flat.gain, "100");
    assert_eq!(flat.exposure_dir(), "1");

    let dark = FrameName::parse("Dark_300s_BIN-1_6248x4176_L_GAIN-0_20230923-100000_-20.0C_010")
        .unwrap();
    assert_eq!(dark.kind, FrameKind::Dark);
    assert_eq!(dark.gain, "0");
}

#[test]
fn test_parse_rejects_malformed_names() {
    assert!(FrameName::parse("Light_M42_120s").is_none());
    assert!(FrameName::parse("Snap_M42_120s_BIN-1_cam_L_GAIN-100_20230922-213015_-10.0C_001").is_none());
    assert!(FrameName::parse("Light_M42_abc_BIN-1_cam_L_GAIN-100_20230922-213015_-10.0C_001").is_none());
    assert!(FrameName::parse("Light_M42_120s_BIN-1_cam_L_ISO-100_20230922-213015_-10.0C_001").is_none());
    assert!(FrameName::parse("Light_M42_120s_BIN-1_cam_L_GAIN-100_20230922213015_-10.0C_001").is_none());
    assert!(FrameName::parse("Light_M42_120s_BIN-1_cam_L_GAIN-100_20230922-213015_-10.0_001").is_none());
    // flats have no object field
    assert!(FrameName::parse("Flat_M42_1s_BIN-1_cam_L_GAIN-100_20230922-213015_-10.0C_001").is_none());
}

#[test]
fn test_observing_night_boundary() {
    let d = |s: &str| NaiveDate::parse_from_str(s, "%Y%m%d").unwrap();
    assert_eq!(observing_night(at("20230922-213015")), d("20230922"));
    assert_eq!(observing_night(at("20230923-031500")), d("20230922"));
    assert_eq!(observing_night(at("20230923-120059")), d("20230922"));
    assert_eq!(observing_night(at("20230923-120100")), d("20230923"));
    assert_eq!(observing_night(at("20230301-020000")), d("20230228"));
}

#[test]
fn test_closest_temperature() {
    assert_eq!(closest_temperature(-9.2, &[0, -10, -20]), Some(-10));
    assert_eq!(closest_temperature(-17.0, &[0, -10, -20]), Some(-20));
    assert_eq!(closest_temperature(3.0, &[0, -10, -20]), Some(0));
    assert_eq!(closest_temperature(-5.0, &[0, -10, -20]), Some(0));
    assert_eq!(closest_temperature(-5.0, &[]), None);
    assert_eq!(closest_temperature(f64::NAN, &[0]), None);
}

#[test]
fn test_file_action_display() {
    let a = FileAction::Move {
        from: "a.fit".into(),
        to: "b/a.fit".into(),
    };
    assert_eq!(a.to_string(), "mv a.fit -> b/a.fit");
    assert_eq!(FileAction::CreateDir("x".into()).to_string(), "mkdir -p x");
}

// ---------------------------------------------------------------------------
// Consolidate
// ---------------------------------------------------------------------------

#[test]
fn test_consolidate_moves_into_library_tree() {
    let base = tempfile::tempdir().unwrap();
    let src = tempfile::tempdir().unwrap();
    touch(
        &src.path().join("session"),
        "Light_M42_120s_BIN-1_cam_L_GAIN-100_20230923-031500_-10.0C_001.fit",
    );
    touch(src.path(), "Flat_1.5s_BIN-1_cam_R_GAIN-100_20230922-190000_-10.0C_004.fit");
    touch(src.path(), "Dark_300s_BIN-1_cam_L_GAIN-100_20230923-100000_-20.0C_010.fit");
    touch(src.path(), "Light_M42_120s_BIN-1_cam_X_GAIN-100_20230922-213015_-10.0C_002.fit");
    touch(src.path(), "notes.txt");

    let config = library(base.path());
    let actions = consolidate(src.path(), &config).unwrap();
    let moves = actions
        .iter()
        .filter(|a| matches!(a, FileAction::Move { .. }))
        .count();
    assert_eq!(moves, 3);

    execute(&actions, |_, _| {}).unwrap();

    let root = base.path().join("consolidated");
    assert!(names_in(&root.join("M42/L/20230922/120"))
        .contains("Light_M42_120s_BIN-1_cam_L_GAIN-100_20230923-031500_-10.0C_001.fit"));
    assert!(names_in(&root.join("Flat/R/20230922/1"))
        .contains("Flat_1.5s_BIN-1_cam_R_GAIN-100_20230922-190000_-10.0C_004.fit"));
    assert!(names_in(&root.join("Dark/100/300"))
        .contains("Dark_300s_BIN-1_cam_L_GAIN-100_20230923-100000_-20.0C_010.fit"));
    // unlisted filter stays in place
    assert!(names_in(src.path())
        .contains("Light_M42_120s_BIN-1_cam_X_GAIN-100_20230922-213015_-10.0C_002.fit"));
}

#[test]
fn test_consolidate_missing_source_is_an_error() {
    let base = tempfile::tempdir().unwrap();
    let err = consolidate(&base.path().join("nope"), &library(base.path())).unwrap_err();
    assert!(matches!(err, StellarError::MissingDirectory(_)));
}

// ---------------------------------------------------------------------------
// Organize
// ---------------------------------------------------------------------------

fn seed_library(base: &Path) {
    let cons = base.join("consolidated");
    touch(
        &cons.join("M42/L/20230922/120"),
        "Light_M42_120s_BIN-1_cam_L_GAIN-100_20230922-213015_-9.5C_001.fit",
    );
    touch(
        &cons.join("M42/R/20230925/120"),
        "Light_M42_120s_BIN-1_cam_R_GAIN-100_20230925-220000_-9.5C_001.fit",
    );
    touch(
        &cons.join("Flat/L/20230922/1"),
        "Flat_1.5s_BIN-1_cam_L_GAIN-100_20230922-190000_-10.0C_004.fit",
    );

    let cal = base.join("calibration");
    touch(&cal.join("bias/100"), "masterBias_GAIN-100.xisf");
    touch(&cal.join("darks/100/-10C"), "masterDark_EXPOSURE-120.00s.xisf");
    touch(&cal.join("darks/100/-10C"), "masterDark_EXPOSURE-300.00s.xisf");
}

#[test]
fn test_organize_builds_nights_and_calibration() {
    let base = tempfile::tempdir().unwrap();
    seed_library(base.path());
    let config = library(base.path());

    let actions = organize("M42", &config).unwrap();
    execute(&actions, |_, _| {}).unwrap();

    let out = base.path().join("organized/M42");
    assert!(names_in(&out.join("night 1/lights"))
        .contains("Light_M42_120s_BIN-1_cam_L_GAIN-100_20230922-213015_-9.5C_001.fit"));
    assert!(names_in(&out.join("night 1/flats"))
        .contains("Flat_1.5s_BIN-1_cam_L_GAIN-100_20230922-190000_-10.0C_004.fit"));
    assert!(names_in(&out.join("night 2/lights"))
        .contains("Light_M42_120s_BIN-1_cam_R_GAIN-100_20230925-220000_-9.5C_001.fit"));
    assert!(names_in(&out.join("night 2/flats")).is_empty());

    let root = names_in(&out);
    assert!(root.contains("masterBias_GAIN-100.xisf"));
    assert!(root.contains("masterDark_EXPOSURE-120.00s.xisf"));
    assert!(!root.contains("masterDark_EXPOSURE-300.00s.xisf"));
}

#[test]
fn test_organize_plan_copies_dark_once() {
    let base = tempfile::tempdir().unwrap();
    seed_library(base.path());

    let actions = organize("M42", &library(base.path())).unwrap();
    let dark_copies = actions
        .iter()
        .filter(|a| matches!(a, FileAction::Copy { to, .. } if to.ends_with("masterDark_EXPOSURE-120.00s.xisf")))
        .count();
    assert_eq!(dark_copies, 1);
}

#[test]
fn test_organize_missing_object_is_an_error() {
    let base = tempfile::tempdir().unwrap();
    let config = library(base.path());

    let err = organize("M31", &config).unwrap_err();
    assert!(matches!(err, StellarError::MissingDirectory(_)));
}

#[test]
fn test_organize_without_nights_is_an_empty_plan() {
    let base = tempfile::tempdir().unwrap();
    let config = library(base.path());
    std::fs::create_dir_all(base.path().join("consolidated/M31/notes")).unwrap();

    let actions = organize("M31", &config).unwrap();
    assert!(actions.is_empty());
    assert!(!base.path().join("organized").exists());
}
