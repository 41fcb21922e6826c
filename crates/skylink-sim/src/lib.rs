//! Simulation engine for SKYLINK.
//!
//! Moves the aircraft along its waypoint path, resolves RF links from
//! antennas to ground towers, and evaluates zone-based antenna state once
//! per tick against any scene implementing the `skylink-scene` traits.

pub mod engine;
pub mod path;
pub mod rf;
pub mod scheduler;
pub mod zones;

pub use skylink_core as core;
pub use engine::AirfieldEngine;

#[cfg(test)]
mod tests;
