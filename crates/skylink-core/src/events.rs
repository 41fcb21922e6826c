//! Events emitted by the simulation for logging and UI feedback.

use serde::{Deserialize, Serialize};

use crate::enums::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    /// An antenna's stored signal state changed.
    SignalStateChanged {
        antenna: String,
        from: SignalState,
        to: SignalState,
    },
    /// The moving entity was placed at a new path progress.
    ProgressChanged { progress: f64 },
    /// RF visualization started with a fresh tower scan.
    RfEnabled {
        towers: usize,
        occlusion_available: bool,
    },
    RfDisabled,
    /// Blocked/clear link counts accumulated since the last report.
    RfStats { blocked: u32, clear: u32 },
    /// A feature could not start and was switched off.
    FeatureAborted { reason: String },
}

/// Alert for the UI alert queue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub level: AlertLevel,
    pub message: String,
    pub tick: u64,
}

impl SimEvent {
    /// Operator-facing alert for events worth surfacing; `None` for routine ones.
    pub fn to_alert(&self, tick: u64) -> Option<Alert> {
        let (level, message) = match self {
            SimEvent::SignalStateChanged { antenna, from, to } => {
                let level = if *to == SignalState::Off {
                    AlertLevel::Warning
                } else {
                    AlertLevel::Info
                };
                (level, format!("{antenna}: {from}\u{2192}{to}"))
            }
            SimEvent::FeatureAborted { reason } => (AlertLevel::Warning, reason.clone()),
            SimEvent::RfEnabled { towers, .. } => {
                (AlertLevel::Info, format!("RF visualization enabled ({towers} towers)"))
            }
            SimEvent::RfDisabled => (AlertLevel::Info, "RF visualization disabled".to_string()),
            SimEvent::ProgressChanged { .. } | SimEvent::RfStats { .. } => return None,
        };
        Some(Alert {
            level,
            message,
            tick,
        })
    }
}
