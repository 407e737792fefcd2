mod common;

use common::{names_in, touch};
use stellar_core::config::{LiveTokenStyle, RenameConfig};
use stellar_core::filter::Filter;
use stellar_core::group::GroupRecord;
use stellar_core::rename::SkipReason;
use stellar_core::stage::{Stage, StageCoordinator, StageEffect, StageEvent, StageOutcome};

fn group(filter: &str, active: Option<u32>, exposure: f64) -> GroupRecord {
    GroupRecord {
        filter: Some(filter.into()),
        active_frames: active,
        total_exposure: exposure,
        ..Default::default()
    }
}

fn no_groups() -> Vec<GroupRecord> {
    Vec::new()
}

// ---------------------------------------------------------------------------
// Event recognition
// ---------------------------------------------------------------------------

#[test]
fn test_stage_names() {
    assert_eq!(
        Stage::from_name("Astrometric solution"),
        Some(Stage::AstrometricSolution)
    );
    assert_eq!(Stage::from_name("Integration"), Some(Stage::Integration));
    assert_eq!(Stage::from_name("Autocrop"), Some(Stage::Autocrop));
    assert_eq!(Stage::from_name("integration"), None);
    assert_eq!(format!("{}", Stage::AstrometricSolution), "Astrometric solution");
}

#[test]
fn test_outcome_parse() {
    assert_eq!(StageOutcome::parse("done"), StageOutcome::Completed);
    assert_eq!(
        StageOutcome::parse("failed"),
        StageOutcome::Other("failed".into())
    );
}

#[test]
fn test_unrecognised_events_are_ignored() {
    let dir = tempfile::tempdir().unwrap();
    touch(&dir.path().join("master"), "masterLight_FILTER-G.xisf");
    let coordinator = StageCoordinator::new(dir.path(), RenameConfig::default());

    for (stage, outcome) in [
        ("Calibration", "done"),
        ("Autocrop", "failed"),
        ("Integration", "started"),
    ] {
        let effect = coordinator
            .handle(&StageEvent::new(stage, outcome), &no_groups())
            .unwrap();
        assert!(matches!(effect, StageEffect::Ignored), "{stage}/{outcome}");
    }
    assert!(names_in(&dir.path().join("master")).contains("masterLight_FILTER-G.xisf"));
    assert!(!dir.path().join("custom").exists());
}

// ---------------------------------------------------------------------------
// Astrometric solution: live aggregation
// ---------------------------------------------------------------------------

#[test]
fn test_astrometric_solution_renames_with_frames_and_total() {
    let dir = tempfile::tempdir().unwrap();
    let master = dir.path().join("master");
    touch(&master, "masterLight_mono_FILTER-L.xisf");
    let coordinator = StageCoordinator::new(dir.path(), RenameConfig::default());
    let groups = vec![group("L", Some(20), 7200.0)];

    let effect = coordinator
        .handle(&StageEvent::new("Astrometric solution", "done"), &groups)
        .unwrap();

    let StageEffect::Renamed(report) = effect else {
        panic!("expected a rename pass");
    };
    assert_eq!(report.renamed.len(), 1);
    assert!(names_in(&master).contains("masterLight_FRAMES-20_TOTAL-7200_mono_FILTER-L.xisf"));
}

#[test]
fn test_astrometric_solution_total_only_style() {
    let dir = tempfile::tempdir().unwrap();
    let master = dir.path().join("master");
    touch(&master, "masterLight_mono_FILTER-R.xisf");
    let mut config = RenameConfig::default();
    config.live.style = LiveTokenStyle::TotalOnly;
    let coordinator = StageCoordinator::new(dir.path(), config);
    let groups = vec![group("R", Some(20), 5025.0)];

    coordinator
        .handle(&StageEvent::new("Astrometric solution", "done"), &groups)
        .unwrap();

    assert!(names_in(&master).contains("masterLight_TOTAL-1h23m45s-20f_mono_FILTER-R.xisf"));
}

#[test]
fn test_astrometric_solution_sums_groups_of_one_filter() {
    let dir = tempfile::tempdir().unwrap();
    let master = dir.path().join("master");
    touch(&master, "masterLight_mono_FILTER-H.xisf");
    let coordinator = StageCoordinator::new(dir.path(), RenameConfig::default());
    let groups = vec![group("H", Some(10), 3000.0), group("H", Some(4), 1200.0)];

    coordinator
        .handle(&StageEvent::new("Astrometric solution", "done"), &groups)
        .unwrap();

    assert!(names_in(&master).contains("masterLight_FRAMES-14_TOTAL-4200_mono_FILTER-H.xisf"));
}

#[test]
fn test_astrometric_solution_unknown_frames_leaves_file() {
    let dir = tempfile::tempdir().unwrap();
    let master = dir.path().join("master");
    let path = touch(&master, "masterLight_mono_FILTER-S.xisf");
    let coordinator = StageCoordinator::new(dir.path(), RenameConfig::default());
    let groups = vec![GroupRecord {
        description: Some("filter = S".into()),
        total_exposure: 600.0,
        ..Default::default()
    }];

    let effect = coordinator
        .handle(&StageEvent::new("Astrometric solution", "done"), &groups)
        .unwrap();

    let StageEffect::Renamed(report) = effect else {
        panic!("expected a rename pass");
    };
    assert!(path.exists());
    assert_eq!(report.skipped_for(&SkipReason::MissingAnnotation), 1);
}

#[test]
fn test_astrometric_solution_event_group_limits_scope() {
    let dir = tempfile::tempdir().unwrap();
    let master = dir.path().join("master");
    touch(&master, "masterLight_mono_FILTER-L.xisf");
    let red = touch(&master, "masterLight_mono_FILTER-R.xisf");
    let coordinator = StageCoordinator::new(dir.path(), RenameConfig::default());
    let groups = vec![group("L", Some(20), 7200.0), group("R", Some(8), 960.0)];
    let current = group("L", Some(20), 7200.0);

    let event = StageEvent::new("Astrometric solution", "done").with_group(&current);
    let StageEffect::Renamed(report) = coordinator.handle(&event, &groups).unwrap() else {
        panic!("expected a rename pass");
    };

    assert_eq!(report.renamed.len(), 1);
    assert_eq!(report.out_of_scope, 1);
    assert!(red.exists());
}

// ---------------------------------------------------------------------------
// Integration -> Autocrop: deferred rename through the state store
// ---------------------------------------------------------------------------

#[test]
fn test_integration_then_autocrop() {
    let dir = tempfile::tempdir().unwrap();
    let master = dir.path().join("master");
    let coordinator = StageCoordinator::new(dir.path(), RenameConfig::default());

    let green = GroupRecord {
        description: Some("filter = G (15 active)".into()),
        ..Default::default()
    };
    let event = StageEvent::new("Integration", "done").with_group(&green);
    let effect = coordinator.handle(&event, &no_groups()).unwrap();
    match effect {
        StageEffect::Persisted { filter, frames } => {
            assert_eq!(filter.as_str(), "G");
            assert_eq!(frames, 15);
        }
        other => panic!("expected persisted count, got {other:?}"),
    }
    assert!(dir.path().join("custom").join("G.txt").exists());

    // Autocrop runs later, in a fresh coordinator
    touch(&master, "masterLight_FILTER-G.xisf");
    let later = StageCoordinator::new(dir.path(), RenameConfig::default());
    later
        .handle(&StageEvent::new("Autocrop", "done"), &no_groups())
        .unwrap();

    let names = names_in(&master);
    assert_eq!(names.len(), 1);
    assert!(names.contains("masterLight_STACKED-15_FILTER-G.xisf"));
}

#[test]
fn test_autocrop_without_stored_value_leaves_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = touch(&dir.path().join("master"), "masterLight_FILTER-B.xisf");
    let coordinator = StageCoordinator::new(dir.path(), RenameConfig::default());

    let effect = coordinator
        .handle(&StageEvent::new("Autocrop", "done"), &no_groups())
        .unwrap();

    let StageEffect::Renamed(report) = effect else {
        panic!("expected a rename pass");
    };
    assert!(path.exists());
    assert_eq!(report.skipped_for(&SkipReason::MissingAnnotation), 1);
}

#[test]
fn test_integration_without_group_persists_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let coordinator = StageCoordinator::new(dir.path(), RenameConfig::default());

    let effect = coordinator
        .handle(&StageEvent::new("Integration", "done"), &no_groups())
        .unwrap();

    assert!(matches!(effect, StageEffect::NotPersisted(SkipReason::NoGroup)));
    assert!(!dir.path().join("custom").exists());
}

#[test]
fn test_integration_unknown_and_zero_frames_are_distinct() {
    let dir = tempfile::tempdir().unwrap();
    let coordinator = StageCoordinator::new(dir.path(), RenameConfig::default());

    let unknown = group("L", None, 100.0);
    let effect = coordinator
        .handle(
            &StageEvent::new("Integration", "done").with_group(&unknown),
            &no_groups(),
        )
        .unwrap();
    assert!(matches!(
        effect,
        StageEffect::NotPersisted(SkipReason::UnknownActiveFrames)
    ));

    let zero = group("L", Some(0), 0.0);
    let effect = coordinator
        .handle(
            &StageEvent::new("Integration", "done").with_group(&zero),
            &no_groups(),
        )
        .unwrap();
    assert!(matches!(
        effect,
        StageEffect::NotPersisted(SkipReason::ZeroActiveFrames)
    ));
    assert!(coordinator.state_store().get(&Filter::new("L").unwrap()).is_none());
}

#[test]
fn test_astrometric_solution_unresolvable_event_group_renames_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let master = dir.path().join("master");
    let lum = touch(&master, "masterLight_mono_FILTER-L.xisf");
    let red = touch(&master, "masterLight_mono_FILTER-R.xisf");
    let coordinator = StageCoordinator::new(dir.path(), RenameConfig::default());
    let groups = vec![group("L", Some(20), 7200.0), group("R", Some(8), 960.0)];
    let current = GroupRecord {
        description: Some("group without filter (5 active)".into()),
        ..Default::default()
    };

    let event = StageEvent::new("Astrometric solution", "done").with_group(&current);
    let StageEffect::Renamed(report) = coordinator.handle(&event, &groups).unwrap() else {
        panic!("expected a rename pass");
    };

    assert!(report.is_empty());
    assert_eq!(report.out_of_scope, 0);
    assert!(lum.exists());
    assert!(red.exists());
    assert_eq!(names_in(&master).len(), 2);
}
