//! Enumeration types used throughout the simulation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Operational state of an antenna, persisted on the antenna entity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignalState {
    On,
    Degraded,
    Off,
    /// No evaluation has happened yet.
    #[default]
    Unknown,
}

impl SignalState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalState::On => "ON",
            SignalState::Degraded => "DEGRADED",
            SignalState::Off => "OFF",
            SignalState::Unknown => "UNKNOWN",
        }
    }

    /// Whether this is a real evaluated state rather than the pre-evaluation placeholder.
    pub fn is_known(&self) -> bool {
        !matches!(self, SignalState::Unknown)
    }
}

impl fmt::Display for SignalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Distance band of a resolved RF link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignalBand {
    /// At or inside the near threshold.
    On,
    /// At or inside the medium threshold.
    Degraded,
    /// Beyond the medium threshold.
    Off,
}

impl From<SignalBand> for SignalState {
    fn from(band: SignalBand) -> Self {
        match band {
            SignalBand::On => SignalState::On,
            SignalBand::Degraded => SignalState::Degraded,
            SignalBand::Off => SignalState::Off,
        }
    }
}

/// The three zone volumes an antenna can sit in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ZoneKind {
    Blocking,
    Attenuation,
    Secure,
}

/// Human-readable zone an antenna currently sits in, by priority.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ZoneLabel {
    #[default]
    Clear,
    RfBlocking,
    RfAttenuation,
    SecureLocked,
    SecureZone,
}

impl ZoneLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ZoneLabel::Clear => "CLEAR",
            ZoneLabel::RfBlocking => "RF BLOCKING",
            ZoneLabel::RfAttenuation => "RF ATTENUATION",
            ZoneLabel::SecureLocked => "SECURE + LOCKED",
            ZoneLabel::SecureZone => "SECURE ZONE",
        }
    }
}

impl fmt::Display for ZoneLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the RF resolver picks a tower when every candidate is occluded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockedFallback {
    /// Keep the first blocked tower in enumeration order.
    #[default]
    FirstFound,
    /// Keep the nearest blocked tower.
    Nearest,
}

/// Per-frame work items the engine can schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FrameTask {
    /// Zone-based antenna state evaluation plus status table refresh.
    ZoneMonitor,
    /// Tower link resolution and line drawing.
    RfVisualization,
}

/// Alert severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AlertLevel {
    Info,
    Warning,
}
