//! Tests for the airfield engine: path following, RF link resolution,
//! zone evaluation and the engine lifecycle.

use glam::DVec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use skylink_core::catalog;
use skylink_core::commands::Command;
use skylink_core::config::AirfieldConfig;
use skylink_core::constants::*;
use skylink_core::enums::*;
use skylink_core::error::CoreError;
use skylink_core::events::SimEvent;
use skylink_core::types::{Color, Transform};
use skylink_scene::demo::{airfield_stage, DEMO_TOWER_COUNT};
use skylink_scene::{Aabb, AntennaAttributes, SceneAccess, SpatialQuery, Stage};

use crate::engine::AirfieldEngine;
use crate::path::{remap_axes, WaypointPath};

const WAYPOINT_STEP: f64 = 1_000.0;

/// Waypoints along +X, 1000 apart, with heading growing 10 degrees per
/// waypoint. Aircraft and every stock antenna at the origin, empty tower
/// container, no volumes.
fn base_stage() -> Stage {
    base_stage_under(Transform::default())
}

/// `base_stage` with `/World` itself moved by `world`.
fn base_stage_under(world: Transform) -> Stage {
    let mut stage = Stage::new();
    stage.spawn_xform("/World", world).unwrap();
    stage.spawn_xform("/World/Waypoints", Transform::default()).unwrap();
    for (i, path) in WAYPOINT_PATHS.iter().enumerate() {
        let transform = Transform::new(
            DVec3::new(i as f64 * WAYPOINT_STEP, 0.0, 0.0),
            DVec3::new(0.0, i as f64 * 10.0, 0.0),
        );
        stage.spawn_xform(path, transform).unwrap();
    }
    stage.spawn_xform(AIRCRAFT_PATH, Transform::default()).unwrap();
    stage.spawn_xform(ANTENNA_ROOT, Transform::default()).unwrap();
    for name in catalog::names() {
        stage
            .spawn_antenna(
                &format!("{ANTENNA_ROOT}/{name}"),
                DVec3::ZERO,
                AntennaAttributes::default(),
            )
            .unwrap();
    }
    stage.spawn_xform(TOWER_CONTAINER, Transform::default()).unwrap();
    stage
}

fn antenna(name: &str) -> String {
    format!("{ANTENNA_ROOT}/{name}")
}

fn tower(name: &str) -> String {
    format!("{TOWER_CONTAINER}/{name}")
}

fn spawn_tower(stage: &mut Stage, name: &str, position: DVec3) {
    stage
        .spawn_xform(&tower(name), Transform::from_translation(position))
        .unwrap();
}

fn cube(center: DVec3, half: f64) -> Aabb {
    Aabb::from_center_half_extents(center, DVec3::splat(half))
}

/// Tower_A at 5 km behind a wall, Tower_B at 20 km in the clear.
fn rf_stage() -> Stage {
    let mut stage = base_stage();
    spawn_tower(&mut stage, "Tower_A", DVec3::new(5_000.0, 0.0, 0.0));
    spawn_tower(&mut stage, "Tower_B", DVec3::new(0.0, 20_000.0, 0.0));
    stage
        .spawn_collider("/World/Wall_A", cube(DVec3::new(2_500.0, 0.0, 0.0), 500.0))
        .unwrap();
    stage
}

fn started_engine(stage: &mut Stage) -> AirfieldEngine {
    let mut engine = AirfieldEngine::new(AirfieldConfig::default()).unwrap();
    engine.init(stage).unwrap();
    engine
}

// ---- Waypoint path ----

#[test]
fn test_progress_endpoints_land_on_first_and_last_waypoint() {
    let mut stage = base_stage();
    let mut engine = started_engine(&mut stage);

    assert_eq!(stage.world_position(AIRCRAFT_PATH), Some(DVec3::ZERO));

    assert!(engine.set_progress(&mut stage, 1.0));
    let last = stage.world_position(WAYPOINT_PATHS[7]).unwrap();
    let aircraft = stage.world_position(AIRCRAFT_PATH).unwrap();
    assert!((aircraft - last).length() < 1e-6);

    // Heading 70 on the waypoint's Y lands on the aircraft's Z.
    let rotation = stage.transform(AIRCRAFT_PATH).unwrap().rotation_euler;
    assert!((rotation - DVec3::new(0.0, 0.0, 70.0)).length() < 1e-9);
}

#[test]
fn test_path_follows_waypoints_under_moved_world() {
    let mut stage = base_stage_under(Transform::new(
        DVec3::new(10_000.0, 0.0, 0.0),
        DVec3::new(0.0, 0.0, 30.0),
    ));
    let mut engine = started_engine(&mut stage);

    let first = stage.world_position(WAYPOINT_PATHS[0]).unwrap();
    let aircraft = stage.world_position(AIRCRAFT_PATH).unwrap();
    assert!((aircraft - first).length() < 1e-6, "{aircraft} vs {first}");

    for (index, path) in WAYPOINT_PATHS.iter().enumerate() {
        assert!(engine.jump_to_waypoint(&mut stage, index));
        let waypoint = stage.world_position(path).unwrap();
        let aircraft = stage.world_position(AIRCRAFT_PATH).unwrap();
        assert!((aircraft - waypoint).length() < 1e-6, "waypoint {index}");
    }
}

#[test]
fn test_progress_is_clamped() {
    let mut stage = base_stage();
    let config = AirfieldConfig::default();
    let path = WaypointPath::capture(&stage, &config.path).unwrap();

    assert_eq!(path.interpolate(-0.5), path.interpolate(0.0));
    assert_eq!(path.interpolate(3.0), path.interpolate(1.0));

    let mut engine = started_engine(&mut stage);
    engine.set_progress(&mut stage, 1.7);
    assert_eq!(engine.progress(), 1.0);
    engine.set_progress(&mut stage, -2.0);
    assert_eq!(engine.progress(), 0.0);
}

#[test]
fn test_interpolation_stays_within_active_segment() {
    let stage = base_stage();
    let config = AirfieldConfig::default();
    let path = WaypointPath::capture(&stage, &config.path).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(99);

    for _ in 0..500 {
        let progress: f64 = rng.gen_range(0.0..=1.0);
        let (index, t) = path.segment(progress);
        assert!((0.0..=1.0).contains(&t));

        let start = path.waypoints()[index].transform.translation;
        let end = path.waypoints()[index + 1].transform.translation;
        let x = path.interpolate(progress).translation.x;
        assert!(
            x >= start.x.min(end.x) - 1e-9 && x <= start.x.max(end.x) + 1e-9,
            "progress {progress}: x {x} outside segment {index}"
        );
        // Evenly spaced waypoints make progress linear in X.
        assert!((x - progress * 7.0 * WAYPOINT_STEP).abs() < 1e-6);

        // Waypoint heading (Y) lands on the aircraft's Z.
        let heading = path.interpolate(progress).rotation_euler.z;
        let low = index as f64 * 10.0;
        assert!(heading >= low - 1e-9 && heading <= low + 10.0 + 1e-9);
    }

    let first = &path.waypoints()[0].transform;
    let last = &path.waypoints()[7].transform;
    assert_eq!(
        path.interpolate(0.0),
        Transform::new(first.translation, remap_axes(first.rotation_euler, AXIS_MAP))
    );
    let end = path.interpolate(1.0);
    assert!((end.translation - last.translation).length() < 1e-9);
    assert!((end.rotation_euler - remap_axes(last.rotation_euler, AXIS_MAP)).length() < 1e-9);
}

#[test]
fn test_jump_to_waypoint_command() {
    let mut stage = base_stage();
    let mut engine = started_engine(&mut stage);

    engine.queue_command(Command::JumpToWaypoint { index: 3 });
    let report = engine.tick(&mut stage);
    assert!((report.progress - 3.0 / 7.0).abs() < 1e-12);
    let wp = stage.world_position(WAYPOINT_PATHS[3]).unwrap();
    let aircraft = stage.world_position(AIRCRAFT_PATH).unwrap();
    assert!((aircraft - wp).length() < 1e-6);
    assert!(report
        .events
        .iter()
        .any(|e| matches!(e, SimEvent::ProgressChanged { .. })));

    // Out of range leaves everything as it was.
    engine.queue_command(Command::JumpToWaypoint { index: 8 });
    let report = engine.tick(&mut stage);
    assert!((report.progress - 3.0 / 7.0).abs() < 1e-12);
}

#[test]
fn test_progress_kept_when_aircraft_disappears() {
    let mut stage = base_stage();
    let mut engine = started_engine(&mut stage);
    engine.set_progress(&mut stage, 0.25);

    stage.remove(AIRCRAFT_PATH);
    assert!(!engine.set_progress(&mut stage, 0.75));
    assert_eq!(engine.progress(), 0.25);
}

// ---- RF link resolution ----

#[test]
fn test_clear_tower_beats_closer_blocked_tower() {
    let mut stage = rf_stage();
    let mut engine = started_engine(&mut stage);
    assert_eq!(engine.enable_rf(&stage).unwrap(), 2);

    let report = engine.tick(&mut stage);
    assert_eq!(report.lines.len(), RF_ANTENNAS.len());
    for line in &report.lines {
        assert_eq!(line.tower, tower("Tower_B"));
        assert!(!line.blocked);
        assert_eq!(line.band, SignalBand::Degraded);
        assert_eq!(line.color, Color::YELLOW);
        assert_eq!(line.start, DVec3::new(0.0, 20_000.0, 0.0));
        assert_eq!(line.end, DVec3::ZERO);
    }
}

#[test]
fn test_first_blocked_tower_kept_when_none_clear() {
    let mut stage = rf_stage();
    stage
        .spawn_collider("/World/Wall_B", cube(DVec3::new(0.0, 10_000.0, 0.0), 500.0))
        .unwrap();
    let mut engine = started_engine(&mut stage);
    engine.enable_rf(&stage).unwrap();

    let report = engine.tick(&mut stage);
    assert_eq!(report.lines.len(), 2);
    for line in &report.lines {
        assert_eq!(line.tower, tower("Tower_A"));
        assert!(line.blocked);
        assert_eq!(line.color, Color::BLOCKED);
        assert_eq!(line.width, RAY_WIDTH_MIN);
    }
}

#[test]
fn test_nearest_blocked_fallback_policy() {
    let mut stage = base_stage();
    spawn_tower(&mut stage, "Tower_A", DVec3::new(30_000.0, 0.0, 0.0));
    spawn_tower(&mut stage, "Tower_B", DVec3::new(0.0, 10_000.0, 0.0));
    stage
        .spawn_collider("/World/Wall_A", cube(DVec3::new(1_000.0, 0.0, 0.0), 500.0))
        .unwrap();
    stage
        .spawn_collider("/World/Wall_B", cube(DVec3::new(0.0, 1_000.0, 0.0), 500.0))
        .unwrap();

    let mut config = AirfieldConfig::default();
    config.rf.blocked_fallback = BlockedFallback::Nearest;
    let mut engine = AirfieldEngine::new(config).unwrap();
    engine.init(&mut stage).unwrap();
    engine.enable_rf(&stage).unwrap();

    let report = engine.tick(&mut stage);
    assert!(report.lines.iter().all(|l| l.tower == tower("Tower_B") && l.blocked));
}

#[test]
fn test_occlusion_unavailable_treats_links_as_clear() {
    let mut stage = rf_stage();
    stage.set_physics_enabled(false);
    let mut engine = started_engine(&mut stage);
    engine.enable_rf(&stage).unwrap();

    let report = engine.tick(&mut stage);
    assert!(report.events.iter().any(|e| matches!(
        e,
        SimEvent::RfEnabled {
            towers: 2,
            occlusion_available: false
        }
    )));
    for line in &report.lines {
        assert_eq!(line.tower, tower("Tower_A"));
        assert!(!line.blocked);
        assert_eq!(line.band, SignalBand::On);
        assert_eq!(line.color, Color::GREEN);
        assert_eq!(line.width, RAY_WIDTH_MAX);
    }
}

#[test]
fn test_tower_scan_ignores_non_tower_children() {
    let mut stage = rf_stage();
    stage
        .spawn_xform(&tower("Beacon_01"), Transform::default())
        .unwrap();
    let mut engine = started_engine(&mut stage);
    engine.enable_rf(&stage).unwrap();
    assert_eq!(engine.towers(), [tower("Tower_A"), tower("Tower_B")]);
}

#[test]
fn test_enable_without_towers_aborts() {
    let mut stage = base_stage();
    let mut engine = started_engine(&mut stage);

    let result = engine.enable_rf(&stage);
    assert!(matches!(result, Err(CoreError::NoTowers { .. })));
    assert!(!engine.rf_enabled());
    assert!(!engine.scheduler().is_active(FrameTask::RfVisualization));

    let report = engine.tick(&mut stage);
    assert!(report.lines.is_empty());
    assert!(report
        .events
        .iter()
        .any(|e| matches!(e, SimEvent::FeatureAborted { .. })));
}

#[test]
fn test_reenable_rescans_towers() {
    let mut stage = rf_stage();
    let mut engine = started_engine(&mut stage);
    engine.enable_rf(&stage).unwrap();

    spawn_tower(&mut stage, "Tower_C", DVec3::new(-1_000.0, 0.0, 0.0));
    engine.tick(&mut stage);
    assert_eq!(engine.towers().len(), 2);

    engine.queue_commands([Command::DisableRf, Command::EnableRf]);
    let report = engine.tick(&mut stage);
    assert_eq!(engine.towers().len(), 3);
    // The new tower is the nearest clear one.
    assert!(report.lines.iter().all(|l| l.tower == tower("Tower_C")));
    assert!(report.events.contains(&SimEvent::RfDisabled));
}

#[test]
fn test_rf_stats_counted_and_reset_each_interval() {
    let mut stage = rf_stage();
    stage
        .spawn_collider("/World/Wall_B", cube(DVec3::new(0.0, 10_000.0, 0.0), 500.0))
        .unwrap();
    let mut config = AirfieldConfig::default();
    config.rf.report_interval_ticks = 3;
    let mut engine = AirfieldEngine::new(config).unwrap();
    engine.init(&mut stage).unwrap();
    engine.enable_rf(&stage).unwrap();

    let mut stats = Vec::new();
    for tick in 1..=9u64 {
        // Every tower is occluded for the first two frames, then clear.
        stage.set_physics_enabled(tick <= 2);
        let report = engine.tick(&mut stage);
        for event in report.events {
            if let SimEvent::RfStats { blocked, clear } = event {
                stats.push((tick, blocked, clear));
            }
        }
    }

    // Reported before counting the current frame, two links per frame.
    assert_eq!(stats, vec![(3, 4, 0), (6, 0, 6), (9, 0, 6)]);
}

#[test]
fn test_failed_reenable_reports_rf_disabled() {
    let mut stage = rf_stage();
    let mut engine = started_engine(&mut stage);
    engine.enable_rf(&stage).unwrap();
    engine.tick(&mut stage);

    stage.remove(&tower("Tower_A"));
    stage.remove(&tower("Tower_B"));
    assert!(engine.enable_rf(&stage).is_err());

    let report = engine.tick(&mut stage);
    assert!(!report.rf_enabled);
    assert!(report.events.contains(&SimEvent::RfDisabled));
    assert!(report
        .events
        .iter()
        .any(|e| matches!(e, SimEvent::FeatureAborted { .. })));
}

#[test]
fn test_disable_rf_when_never_enabled_is_noop() {
    let mut stage = rf_stage();
    let mut engine = started_engine(&mut stage);
    engine.disable_rf();
    engine.disable_rf();

    let report = engine.tick(&mut stage);
    assert!(!report.rf_enabled);
    assert!(!report.events.contains(&SimEvent::RfDisabled));
    assert!(engine.scheduler().is_active(FrameTask::ZoneMonitor));
}

#[test]
fn test_disabled_rf_draws_nothing() {
    let mut stage = rf_stage();
    let mut engine = started_engine(&mut stage);
    engine.enable_rf(&stage).unwrap();
    assert_eq!(engine.tick(&mut stage).lines.len(), 2);

    engine.queue_command(Command::DisableRf);
    let report = engine.tick(&mut stage);
    assert!(report.lines.is_empty());
    assert!(engine.towers().is_empty());
}

#[test]
fn test_missing_rf_antenna_is_skipped() {
    let mut stage = rf_stage();
    stage.remove(RF_ANTENNAS[1]);
    let mut engine = started_engine(&mut stage);
    engine.enable_rf(&stage).unwrap();

    let report = engine.tick(&mut stage);
    assert_eq!(report.lines.len(), 1);
    assert_eq!(report.lines[0].antenna, RF_ANTENNAS[0]);
}

// ---- Zone evaluation ----

#[test]
fn test_blocking_and_attenuation_overlap_turns_everything_off() {
    let mut stage = base_stage();
    stage.spawn_volume(BLOCKING_VOLUME, cube(DVec3::ZERO, 100.0)).unwrap();
    stage.spawn_volume(ATTENUATION_VOLUME, cube(DVec3::ZERO, 100.0)).unwrap();
    let mut engine = started_engine(&mut stage);

    let report = engine.tick(&mut stage);
    assert_eq!(report.status.len(), catalog::ANTENNAS.len());
    for row in &report.status {
        assert_eq!(row.state, SignalState::Off);
        assert_eq!(row.zone, ZoneLabel::RfBlocking);
    }
    // First evaluation sets the baseline silently.
    assert_eq!(report.state_changes().count(), 0);
}

#[test]
fn test_state_change_reported_only_on_change() {
    let mut stage = base_stage();
    stage.spawn_volume(BLOCKING_VOLUME, cube(DVec3::ZERO, 100.0)).unwrap();
    stage.spawn_volume(ATTENUATION_VOLUME, cube(DVec3::ZERO, 100.0)).unwrap();
    let mut engine = started_engine(&mut stage);
    engine.tick(&mut stage);

    // Nothing moved, nothing to report.
    assert_eq!(engine.tick(&mut stage).state_changes().count(), 0);

    stage.remove(BLOCKING_VOLUME);
    let report = engine.tick(&mut stage);
    let changes: Vec<_> = report.state_changes().collect();
    assert_eq!(changes.len(), catalog::ANTENNAS.len());
    assert!(changes
        .iter()
        .all(|&(_, from, to)| from == SignalState::Off && to == SignalState::Degraded));
    assert_eq!(engine.tick(&mut stage).state_changes().count(), 0);
}

#[test]
fn test_secure_zone_respects_policy_lock() {
    let mut stage = base_stage();
    stage.spawn_volume(SECURE_VOLUME, cube(DVec3::ZERO, 100.0)).unwrap();
    stage.set_policy_locked(&antenna("ANT_SATCOM_PRIMARY"), true);
    let mut engine = started_engine(&mut stage);

    engine.tick(&mut stage);
    assert_eq!(
        stage.signal_state(&antenna("ANT_SATCOM_PRIMARY")),
        Some(SignalState::Off)
    );
    assert_eq!(stage.signal_state(&antenna("ANT_GNSS_1")), Some(SignalState::On));

    let report = engine.tick(&mut stage);
    let satcom = report
        .status
        .iter()
        .find(|row| row.name == "ANT_SATCOM_PRIMARY")
        .unwrap();
    assert_eq!(satcom.zone, ZoneLabel::SecureLocked);
    assert_eq!(satcom.locked_label(), "YES");
}

#[test]
fn test_outside_all_zones_is_on() {
    let mut stage = base_stage();
    stage
        .spawn_volume(BLOCKING_VOLUME, cube(DVec3::new(50_000.0, 0.0, 0.0), 100.0))
        .unwrap();
    let mut engine = started_engine(&mut stage);

    let report = engine.tick(&mut stage);
    assert!(report
        .status
        .iter()
        .all(|row| row.state == SignalState::On && row.zone == ZoneLabel::Clear));
}

#[test]
fn test_missing_antenna_is_skipped() {
    let mut stage = base_stage();
    stage.remove(&antenna("ANT_ELT"));
    let mut engine = started_engine(&mut stage);

    let report = engine.tick(&mut stage);
    assert_eq!(report.status.len(), catalog::ANTENNAS.len() - 1);
    assert!(report.status.iter().all(|row| row.name != "ANT_ELT"));
}

#[test]
fn test_status_row_defaults() {
    let mut stage = base_stage();
    let mut engine = started_engine(&mut stage);

    let report = engine.tick(&mut stage);
    let row = &report.status[0];
    assert_eq!(row.frequency_band, DEFAULT_FREQUENCY_BAND);
    assert_eq!(row.antenna_type, DEFAULT_ANTENNA_TYPE);
    assert_eq!(row.los_label(), "NO");
    assert_eq!(row.description, catalog::description(&row.name));
}

// ---- Engine lifecycle ----

#[test]
fn test_init_fails_on_missing_waypoint() {
    let mut stage = base_stage();
    stage.remove(WAYPOINT_PATHS[4]);
    let mut engine = AirfieldEngine::new(AirfieldConfig::default()).unwrap();

    let result = engine.init(&mut stage);
    assert_eq!(
        result,
        Err(CoreError::MissingEntity(WAYPOINT_PATHS[4].to_string()))
    );
    assert!(!engine.is_initialized());
    assert!(engine.scheduler().is_empty());

    let report = engine.tick(&mut stage);
    assert!(report.status.is_empty());
    assert!(report
        .events
        .iter()
        .any(|e| matches!(e, SimEvent::FeatureAborted { .. })));
}

#[test]
fn test_init_fails_on_missing_aircraft() {
    let mut stage = base_stage();
    stage.remove(AIRCRAFT_PATH);
    let mut engine = AirfieldEngine::new(AirfieldConfig::default()).unwrap();

    assert_eq!(
        engine.init(&mut stage),
        Err(CoreError::MissingEntity(AIRCRAFT_PATH.to_string()))
    );
    assert!(engine.scheduler().is_empty());
}

#[test]
fn test_invalid_config_rejected() {
    let mut config = AirfieldConfig::default();
    config.path.waypoints.truncate(1);
    assert!(AirfieldEngine::new(config).is_err());
}

#[test]
fn test_shutdown_releases_everything_and_is_idempotent() {
    let mut stage = rf_stage();
    let mut engine = started_engine(&mut stage);
    engine.enable_rf(&stage).unwrap();
    assert_eq!(engine.scheduler().len(), 2);

    engine.shutdown();
    assert!(engine.scheduler().is_empty());
    assert!(!engine.rf_enabled());
    engine.shutdown();

    let report = engine.tick(&mut stage);
    assert!(report.lines.is_empty());
    assert!(report.status.is_empty());
}

#[test]
fn test_tasks_run_in_registration_order() {
    let mut stage = rf_stage();
    let mut engine = started_engine(&mut stage);
    engine.enable_rf(&stage).unwrap();
    assert_eq!(
        engine.scheduler().active_tasks(),
        vec![FrameTask::ZoneMonitor, FrameTask::RfVisualization]
    );
}

#[test]
fn test_time_advances_per_tick() {
    let mut stage = base_stage();
    let mut engine = started_engine(&mut stage);
    for _ in 0..TICK_RATE {
        engine.tick(&mut stage);
    }
    assert_eq!(engine.time().tick, TICK_RATE as u64);
    assert!((engine.time().elapsed_secs - 1.0).abs() < 1e-9);
}

// ---- Demo airfield ----

#[test]
fn test_demo_airfield_end_to_end() {
    let mut stage = airfield_stage(42).unwrap();
    let mut engine = started_engine(&mut stage);
    assert_eq!(engine.enable_rf(&stage).unwrap(), DEMO_TOWER_COUNT);

    let mut stats_reports = 0;
    for i in 0..120u32 {
        engine.queue_command(Command::SetProgress {
            progress: f64::from(i) / 119.0,
        });
        let report = engine.tick(&mut stage);
        assert_eq!(report.status.len(), catalog::ANTENNAS.len());
        assert_eq!(report.lines.len(), RF_ANTENNAS.len());
        stats_reports += report
            .events
            .iter()
            .filter(|e| matches!(e, SimEvent::RfStats { .. }))
            .count();
    }
    assert_eq!(stats_reports, 2);
    assert_eq!(engine.progress(), 1.0);
}

#[test]
fn test_demo_zones_along_route() {
    let mut stage = airfield_stage(42).unwrap();
    let mut engine = started_engine(&mut stage);

    engine.queue_command(Command::JumpToWaypoint { index: 2 });
    let report = engine.tick(&mut stage);
    assert!(report.status.iter().all(|row| row.state == SignalState::Off));

    engine.queue_command(Command::JumpToWaypoint { index: 6 });
    let report = engine.tick(&mut stage);
    for row in &report.status {
        let expected = if row.policy_locked {
            SignalState::Off
        } else {
            SignalState::On
        };
        assert_eq!(row.state, expected, "{}", row.name);
    }
    // Unlocked antennas came back on.
    assert_eq!(
        report.state_changes().count(),
        catalog::ANTENNAS.len() - 2
    );
}

#[test]
fn test_demo_determinism_same_seed() {
    let mut stage_a = airfield_stage(5).unwrap();
    let mut stage_b = airfield_stage(5).unwrap();
    let mut engine_a = started_engine(&mut stage_a);
    let mut engine_b = started_engine(&mut stage_b);
    engine_a.enable_rf(&stage_a).unwrap();
    engine_b.enable_rf(&stage_b).unwrap();

    for i in 0..60u32 {
        let command = Command::SetProgress {
            progress: f64::from(i) / 59.0,
        };
        engine_a.queue_command(command.clone());
        engine_b.queue_command(command);
        let json_a = serde_json::to_string(&engine_a.tick(&mut stage_a)).unwrap();
        let json_b = serde_json::to_string(&engine_b.tick(&mut stage_b)).unwrap();
        assert_eq!(json_a, json_b, "reports diverged with same seed");
    }
}
