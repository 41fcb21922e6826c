//! Fundamental geometric and simulation types.

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// World-space transform of a scene entity.
///
/// Rotation is stored as Euler angles in degrees, in the axis order of
/// whoever authored the entity (waypoints and the aircraft differ).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub translation: DVec3,
    pub rotation_euler: DVec3,
}

impl Transform {
    pub fn new(translation: DVec3, rotation_euler: DVec3) -> Self {
        Self {
            translation,
            rotation_euler,
        }
    }

    /// Transform with no rotation.
    pub fn from_translation(translation: DVec3) -> Self {
        Self {
            translation,
            rotation_euler: DVec3::ZERO,
        }
    }
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Seconds per tick at the default tick rate.
    pub fn dt(&self) -> f64 {
        crate::constants::DT
    }

    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
        self.elapsed_secs += self.dt();
    }
}

/// Packed 32-bit color with alpha in the top byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(pub u32);

impl Color {
    pub const GREEN: Color = Color(0xFF00_FF00);
    pub const YELLOW: Color = Color(0xFFFF_FF00);
    pub const RED: Color = Color(0xFFFF_0000);
    pub const BLOCKED: Color = Color(0xFFAA_0000);

    pub fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }
}

/// Format a position the way the status table shows it: `(x, y, z)` rounded to whole units.
pub fn format_position(p: DVec3) -> String {
    format!("({:.0}, {:.0}, {:.0})", p.x, p.y, p.z)
}
