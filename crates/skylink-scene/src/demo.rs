//! Seeded demo airfield.
//!
//! Builds a complete stage with the stock entity paths: the aircraft and
//! its antennas, an eight-waypoint taxi route, zone volumes along the
//! route, a ring of towers and a few hangars that shadow them. Same seed,
//! same airfield.

use glam::DVec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use skylink_core::catalog;
use skylink_core::constants::*;
use skylink_core::types::Transform;

use crate::aabb::Aabb;
use crate::adapter::AntennaAttributes;
use crate::error::SceneResult;
use crate::stage::Stage;

/// Spacing between consecutive waypoints along the route.
const WAYPOINT_SPACING: f64 = 9_000.0;

/// Number of towers on the ring.
pub const DEMO_TOWER_COUNT: usize = 5;

/// Build the demo airfield for a seed.
pub fn airfield_stage(seed: u64) -> SceneResult<Stage> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut stage = Stage::new();

    stage.spawn_xform("/World", Transform::default())?;
    let route = spawn_waypoints(&mut stage, &mut rng)?;
    stage.spawn_xform(AIRCRAFT_PATH, route[0])?;
    spawn_antennas(&mut stage)?;
    spawn_volumes(&mut stage, &route)?;
    spawn_towers(&mut stage, &mut rng, DEMO_TOWER_COUNT)?;
    spawn_hangars(&mut stage, &mut rng, &route)?;

    Ok(stage)
}

/// Waypoints in path order. Rotation is authored as (roll, heading, pitch).
fn spawn_waypoints(stage: &mut Stage, rng: &mut ChaCha8Rng) -> SceneResult<Vec<Transform>> {
    let mut route = Vec::with_capacity(WAYPOINT_PATHS.len());
    let start_x = -WAYPOINT_SPACING * (WAYPOINT_PATHS.len() as f64 - 1.0) / 2.0;
    for (i, path) in WAYPOINT_PATHS.iter().enumerate() {
        let translation = DVec3::new(
            start_x + WAYPOINT_SPACING * i as f64,
            rng.gen_range(-1_500.0..1_500.0),
            0.0,
        );
        let heading = rng.gen_range(-20.0..20.0);
        let transform = Transform::new(translation, DVec3::new(0.0, heading, 0.0));
        stage.spawn_xform(path, transform)?;
        route.push(transform);
    }
    Ok(route)
}

/// (name, type, frequency band, requires LOS, policy locked, offset from aircraft origin)
const ANTENNA_LAYOUT: [(&str, &str, &str, bool, bool, [f64; 3]); 10] = [
    ("ANT_SATCOM_PRIMARY", "SATCOM", "Ka/Ku-band", true, true, [0.0, 0.0, 450.0]),
    ("ANT_GNSS_1", "GNSS", "L1/L5", true, false, [600.0, 0.0, 420.0]),
    ("ANT_GNSS_2", "GNSS", "L1/L5", true, false, [-600.0, 0.0, 420.0]),
    ("ANT_VHF_COMM_TOP", "VHF_COMM", "118-137 MHz", true, false, [1_200.0, 0.0, 430.0]),
    ("ANT_VHF_COMM_BOTTOM", "VHF_COMM", "118-137 MHz", true, false, [1_000.0, 0.0, -80.0]),
    ("ANT_ATC_TRANSPONDER", "TRANSPONDER", "1030/1090 MHz", true, false, [1_500.0, 0.0, -60.0]),
    ("ANT_DME", "DME", "962-1213 MHz", true, false, [-300.0, 0.0, -90.0]),
    ("ANT_WEATHER_RADAR", "RADAR", "X-band", false, false, [2_400.0, 0.0, 150.0]),
    ("ANT_HF_LONG_RANGE", "HF_COMM", "3-30 MHz", false, true, [-1_800.0, 0.0, 500.0]),
    ("ANT_ELT", "ELT", "406 MHz", false, false, [-2_200.0, 0.0, 300.0]),
];

fn spawn_antennas(stage: &mut Stage) -> SceneResult<()> {
    debug_assert_eq!(ANTENNA_LAYOUT.len(), catalog::ANTENNAS.len());
    for (name, kind, band, los, locked, offset) in ANTENNA_LAYOUT {
        let attributes = AntennaAttributes {
            signal_state: None,
            policy_locked: Some(locked),
            frequency_band: Some(band.to_string()),
            requires_los: Some(los),
            antenna_type: Some(kind.to_string()),
        };
        stage.spawn_antenna(
            &format!("{ANTENNA_ROOT}/{name}"),
            DVec3::from_array(offset),
            attributes,
        )?;
    }
    Ok(())
}

/// Blocking volume over waypoint 3, attenuation over waypoint 5 and a
/// secure zone over waypoint 7.
fn spawn_volumes(stage: &mut Stage, route: &[Transform]) -> SceneResult<()> {
    let half = DVec3::new(3_000.0, 4_000.0, 3_000.0);
    let zones = [(BLOCKING_VOLUME, 2), (ATTENUATION_VOLUME, 4), (SECURE_VOLUME, 6)];
    for (path, waypoint) in zones {
        let center = route[waypoint].translation;
        stage.spawn_volume(path, Aabb::from_center_half_extents(center, half))?;
    }
    Ok(())
}

/// Towers on a ring around the field, plus one non-tower child that the
/// tower scan must ignore.
fn spawn_towers(stage: &mut Stage, rng: &mut ChaCha8Rng, count: usize) -> SceneResult<()> {
    stage.spawn_xform(TOWER_CONTAINER, Transform::default())?;
    for i in 0..count {
        let radius = rng.gen_range(8_000.0..45_000.0);
        let angle = rng.gen_range(0.0..std::f64::consts::TAU);
        let position = DVec3::new(radius * angle.cos(), radius * angle.sin(), 3_000.0);
        stage.spawn_xform(
            &format!("{TOWER_CONTAINER}/{TOWER_PREFIX}{:02}", i + 1),
            Transform::from_translation(position),
        )?;
    }
    stage.spawn_xform(
        &format!("{TOWER_CONTAINER}/Beacon_01"),
        Transform::from_translation(DVec3::new(0.0, 0.0, 500.0)),
    )?;
    Ok(())
}

/// Hangars beside the route, tall enough to cut tower links.
fn spawn_hangars(stage: &mut Stage, rng: &mut ChaCha8Rng, route: &[Transform]) -> SceneResult<()> {
    stage.spawn_xform("/World/Hangars", Transform::default())?;
    for i in 0..3 {
        let anchor = route[rng.gen_range(0..route.len())].translation;
        let side = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
        let center = anchor + DVec3::new(rng.gen_range(-2_000.0..2_000.0), side * 6_000.0, 2_000.0);
        stage.spawn_collider(
            &format!("/World/Hangars/Hangar_{i}"),
            Aabb::from_center_half_extents(center, DVec3::new(2_500.0, 1_500.0, 2_000.0)),
        )?;
    }
    Ok(())
}
