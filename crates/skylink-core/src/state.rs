//! Frame report, everything the render/report sink needs after each tick.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::SimEvent;
use crate::types::{Color, SimTime};

/// Complete output of one engine tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FrameReport {
    pub time: SimTime,
    /// Current path progress (0.0 - 1.0).
    pub progress: f64,
    pub rf_enabled: bool,
    /// Tower links to draw this frame.
    pub lines: Vec<DrawLine>,
    /// Status table rows, one per resolvable antenna.
    pub status: Vec<AntennaStatusRow>,
    pub events: Vec<SimEvent>,
}

impl FrameReport {
    /// State-change events contained in this report.
    pub fn state_changes(&self) -> impl Iterator<Item = (&str, SignalState, SignalState)> {
        self.events.iter().filter_map(|event| match event {
            SimEvent::SignalStateChanged { antenna, from, to } => {
                Some((antenna.as_str(), *from, *to))
            }
            _ => None,
        })
    }
}

/// A line segment from the serving tower to the antenna.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawLine {
    pub start: DVec3,
    pub end: DVec3,
    pub color: Color,
    pub width: f64,
    /// Antenna this link belongs to.
    pub antenna: String,
    /// Serving tower.
    pub tower: String,
    pub distance: f64,
    pub blocked: bool,
    pub band: SignalBand,
}

/// One row of the antenna status table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AntennaStatusRow {
    pub name: String,
    pub state: SignalState,
    pub antenna_type: String,
    pub frequency_band: String,
    pub requires_los: bool,
    pub policy_locked: bool,
    pub zone: ZoneLabel,
    pub position: DVec3,
    /// Position as the table prints it, e.g. `(120, -40, 310)`.
    pub position_label: String,
    pub description: String,
}

impl AntennaStatusRow {
    pub fn los_label(&self) -> &'static str {
        yes_no(self.requires_los)
    }

    pub fn locked_label(&self) -> &'static str {
        yes_no(self.policy_locked)
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "YES"
    } else {
        "NO"
    }
}
