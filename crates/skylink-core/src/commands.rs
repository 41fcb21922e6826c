//! Operator commands sent from a front end to the simulation.
//!
//! Commands are queued and applied at the next tick boundary.

use serde::{Deserialize, Serialize};

/// All possible operator actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Command {
    // --- Path following ---
    /// Move the aircraft to a point along the waypoint path (0.0 - 1.0).
    SetProgress { progress: f64 },
    /// Move the aircraft onto a waypoint (0-based index).
    JumpToWaypoint { index: usize },

    // --- RF visualization ---
    /// Rescan towers and start drawing tower links.
    EnableRf,
    /// Stop drawing tower links.
    DisableRf,
}
