//! Static configuration of the airfield simulation.
//!
//! Every path, threshold and color the core uses is plain data here so a
//! scene can be driven by a config file instead of compiled-in constants.
//! `Default` reproduces the stock airfield setup.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::BlockedFallback;
use crate::error::{invalid_config, CoreResult};
use crate::types::Color;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AirfieldConfig {
    pub path: PathConfig,
    pub rf: RfConfig,
    pub zones: ZoneConfig,
}

impl AirfieldConfig {
    /// Reject configurations the core cannot run with.
    pub fn validate(&self) -> CoreResult<()> {
        self.path.validate()?;
        self.rf.validate()?;
        self.zones.validate()
    }
}

/// Waypoint path following.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathConfig {
    /// Entity whose transform follows the path.
    pub moving_entity: String,
    /// Waypoint entities in path order.
    pub waypoints: Vec<String>,
    /// `axis_map[i]` is the waypoint rotation axis written to the moving entity's axis `i`.
    pub axis_map: [usize; 3],
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            moving_entity: AIRCRAFT_PATH.to_string(),
            waypoints: WAYPOINT_PATHS.iter().map(|p| p.to_string()).collect(),
            axis_map: AXIS_MAP,
        }
    }
}

impl PathConfig {
    pub fn validate(&self) -> CoreResult<()> {
        validate_axis_map(self.axis_map)
    }
}

/// Reject axis maps that are not a permutation of [0, 1, 2].
pub fn validate_axis_map(axis_map: [usize; 3]) -> CoreResult<()> {
    let mut seen = [false; 3];
    for axis in axis_map {
        if axis > 2 || seen[axis] {
            return Err(invalid_config(format!(
                "axis map {axis_map:?} is not a permutation of [0, 1, 2]"
            )));
        }
        seen[axis] = true;
    }
    Ok(())
}

/// Line colors for resolved tower links.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkColors {
    pub on: Color,
    pub degraded: Color,
    pub off: Color,
    pub blocked: Color,
}

impl Default for LinkColors {
    fn default() -> Self {
        Self {
            on: Color::GREEN,
            degraded: Color::YELLOW,
            off: Color::RED,
            blocked: Color::BLOCKED,
        }
    }
}

/// RF tower-link visualization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RfConfig {
    pub tower_container: String,
    pub tower_prefix: String,
    /// Antennas that get a link resolved and drawn each frame.
    pub antennas: Vec<String>,
    pub distance_near: f64,
    pub distance_medium: f64,
    pub width_max: f64,
    pub width_min: f64,
    pub colors: LinkColors,
    pub report_interval_ticks: u64,
    pub blocked_fallback: BlockedFallback,
}

impl Default for RfConfig {
    fn default() -> Self {
        Self {
            tower_container: TOWER_CONTAINER.to_string(),
            tower_prefix: TOWER_PREFIX.to_string(),
            antennas: RF_ANTENNAS.iter().map(|p| p.to_string()).collect(),
            distance_near: DISTANCE_NEAR,
            distance_medium: DISTANCE_MEDIUM,
            width_max: RAY_WIDTH_MAX,
            width_min: RAY_WIDTH_MIN,
            colors: LinkColors::default(),
            report_interval_ticks: RF_REPORT_INTERVAL_TICKS,
            blocked_fallback: BlockedFallback::default(),
        }
    }
}

impl RfConfig {
    pub fn validate(&self) -> CoreResult<()> {
        if !(self.distance_near > 0.0) || !(self.distance_medium > 0.0) {
            return Err(invalid_config("distance thresholds must be positive"));
        }
        if self.distance_near > self.distance_medium {
            return Err(invalid_config(format!(
                "near threshold {} exceeds medium threshold {}",
                self.distance_near, self.distance_medium
            )));
        }
        if self.width_min > self.width_max || self.width_min < 0.0 {
            return Err(invalid_config(format!(
                "line width range [{}, {}] is invalid",
                self.width_min, self.width_max
            )));
        }
        if self.report_interval_ticks == 0 {
            return Err(invalid_config("RF report interval must be at least 1 tick"));
        }
        Ok(())
    }

    /// Distance at which line width bottoms out.
    pub fn width_floor_distance(&self) -> f64 {
        self.distance_medium * WIDTH_FLOOR_FACTOR
    }
}

/// Zone volumes and the antennas evaluated against them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoneConfig {
    pub antenna_root: String,
    pub antenna_names: Vec<String>,
    pub blocking_volume: String,
    pub attenuation_volume: String,
    pub secure_volume: String,
    pub heartbeat_interval_ticks: u64,
}

impl Default for ZoneConfig {
    fn default() -> Self {
        Self {
            antenna_root: ANTENNA_ROOT.to_string(),
            antenna_names: crate::catalog::names().map(str::to_string).collect(),
            blocking_volume: BLOCKING_VOLUME.to_string(),
            attenuation_volume: ATTENUATION_VOLUME.to_string(),
            secure_volume: SECURE_VOLUME.to_string(),
            heartbeat_interval_ticks: ZONE_HEARTBEAT_TICKS,
        }
    }
}

impl ZoneConfig {
    pub fn validate(&self) -> CoreResult<()> {
        if self.heartbeat_interval_ticks == 0 {
            return Err(invalid_config("zone heartbeat interval must be at least 1 tick"));
        }
        Ok(())
    }

    /// Full scene path of a named antenna.
    pub fn antenna_path(&self, name: &str) -> String {
        format!("{}/{}", self.antenna_root, name)
    }
}
