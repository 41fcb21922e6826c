//! Zone-based antenna state.
//!
//! Antenna state is a pure function of where the antenna sits right now:
//! an ordered rule list is scanned and the first rule whose zone condition
//! holds decides the state and the zone label. No rule matching means the
//! antenna is clear and ON.

use glam::DVec3;
use tracing::{debug, info};

use skylink_core::catalog;
use skylink_core::config::ZoneConfig;
use skylink_core::enums::{SignalState, ZoneKind, ZoneLabel};
use skylink_core::events::SimEvent;
use skylink_core::state::AntennaStatusRow;
use skylink_core::types::format_position;
use skylink_scene::{SceneAccess, SpatialQuery};

/// Zone membership of one antenna position plus its lock flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ZoneFacts {
    pub blocking: bool,
    pub attenuation: bool,
    pub secure: bool,
    pub policy_locked: bool,
}

impl ZoneFacts {
    /// Test `position` against every configured volume. Missing volumes contain nothing.
    pub fn gather<S: SpatialQuery + ?Sized>(
        scene: &S,
        config: &ZoneConfig,
        position: DVec3,
        policy_locked: bool,
    ) -> Self {
        Self {
            blocking: scene.bounds_contains(&config.blocking_volume, position),
            attenuation: scene.bounds_contains(&config.attenuation_volume, position),
            secure: scene.bounds_contains(&config.secure_volume, position),
            policy_locked,
        }
    }

    pub fn inside(&self, zone: ZoneKind) -> bool {
        match zone {
            ZoneKind::Blocking => self.blocking,
            ZoneKind::Attenuation => self.attenuation,
            ZoneKind::Secure => self.secure,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneCondition {
    /// Inside the zone.
    Inside(ZoneKind),
    /// Inside the zone with the antenna's policy lock set.
    InsideLocked(ZoneKind),
}

impl ZoneCondition {
    pub fn holds(&self, facts: &ZoneFacts) -> bool {
        match *self {
            ZoneCondition::Inside(zone) => facts.inside(zone),
            ZoneCondition::InsideLocked(zone) => facts.inside(zone) && facts.policy_locked,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoneRule {
    pub condition: ZoneCondition,
    pub state: SignalState,
    pub label: ZoneLabel,
}

impl ZoneRule {
    pub const fn new(condition: ZoneCondition, state: SignalState, label: ZoneLabel) -> Self {
        Self {
            condition,
            state,
            label,
        }
    }
}

/// Blocking, then attenuation, then secure-and-locked. An unlocked antenna
/// in the secure zone stays ON and is only labeled.
pub const DEFAULT_RULES: [ZoneRule; 4] = [
    ZoneRule::new(
        ZoneCondition::Inside(ZoneKind::Blocking),
        SignalState::Off,
        ZoneLabel::RfBlocking,
    ),
    ZoneRule::new(
        ZoneCondition::Inside(ZoneKind::Attenuation),
        SignalState::Degraded,
        ZoneLabel::RfAttenuation,
    ),
    ZoneRule::new(
        ZoneCondition::InsideLocked(ZoneKind::Secure),
        SignalState::Off,
        ZoneLabel::SecureLocked,
    ),
    ZoneRule::new(
        ZoneCondition::Inside(ZoneKind::Secure),
        SignalState::On,
        ZoneLabel::SecureZone,
    ),
];

/// State and label of the first matching rule, ON/CLEAR if none match.
pub fn resolve_zone(rules: &[ZoneRule], facts: &ZoneFacts) -> (SignalState, ZoneLabel) {
    rules
        .iter()
        .find(|rule| rule.condition.holds(facts))
        .map(|rule| (rule.state, rule.label))
        .unwrap_or((SignalState::On, ZoneLabel::Clear))
}

/// Per-frame antenna state evaluation and status table assembly.
#[derive(Debug)]
pub struct ZoneEvaluator {
    config: ZoneConfig,
    rules: Vec<ZoneRule>,
    frame_count: u64,
}

impl ZoneEvaluator {
    pub fn new(config: ZoneConfig) -> Self {
        Self::with_rules(config, DEFAULT_RULES.to_vec())
    }

    pub fn with_rules(config: ZoneConfig, rules: Vec<ZoneRule>) -> Self {
        Self {
            config,
            rules,
            frame_count: 0,
        }
    }

    pub fn config(&self) -> &ZoneConfig {
        &self.config
    }

    pub fn rules(&self) -> &[ZoneRule] {
        &self.rules
    }

    /// Zone facts of a named antenna, `None` if it does not resolve.
    fn facts_for<S: SceneAccess + ?Sized>(&self, scene: &S, path: &str) -> Option<ZoneFacts> {
        let position = scene.world_position(path)?;
        let attributes = scene.antenna_attributes(path)?;
        Some(ZoneFacts::gather(
            scene,
            &self.config,
            position,
            attributes.policy_locked(),
        ))
    }

    /// Evaluate every configured antenna and store its state.
    ///
    /// The state is always written. A change event is only emitted when the
    /// previously stored state was a known one and differs, so the first
    /// evaluation of an antenna sets its baseline silently. Returns how many
    /// antennas were evaluated.
    pub fn run<S: SceneAccess + ?Sized>(&mut self, scene: &mut S, events: &mut Vec<SimEvent>) -> usize {
        self.frame_count += 1;
        if self
            .frame_count
            .is_multiple_of(self.config.heartbeat_interval_ticks)
        {
            debug!("[Zones] update running (frame {})", self.frame_count);
        }

        let mut evaluated = 0;
        let mut changes = Vec::new();
        for name in &self.config.antenna_names {
            let path = self.config.antenna_path(name);
            let Some(facts) = self.facts_for(&*scene, &path) else {
                continue;
            };
            let previous = scene.antenna_attributes(&path).and_then(|a| a.signal_state);
            let (state, _) = resolve_zone(&self.rules, &facts);
            if !scene.set_signal_state(&path, state) {
                continue;
            }
            evaluated += 1;

            if let Some(previous) = previous.filter(SignalState::is_known) {
                if previous != state {
                    changes.push(format!("{name}: {previous}\u{2192}{state}"));
                    events.push(SimEvent::SignalStateChanged {
                        antenna: name.clone(),
                        from: previous,
                        to: state,
                    });
                }
            }
        }

        if !changes.is_empty() {
            info!("[Zones] state changes: {}", changes.join(", "));
        }
        evaluated
    }

    /// Display record of one antenna. Read-only.
    pub fn status_row<S: SceneAccess + ?Sized>(&self, scene: &S, name: &str) -> Option<AntennaStatusRow> {
        let path = self.config.antenna_path(name);
        let position = scene.world_position(&path)?;
        let attributes = scene.antenna_attributes(&path)?;
        let facts = ZoneFacts::gather(scene, &self.config, position, attributes.policy_locked());
        let (_, zone) = resolve_zone(&self.rules, &facts);

        Some(AntennaStatusRow {
            name: name.to_string(),
            state: attributes.signal_state(),
            antenna_type: attributes.antenna_type().to_string(),
            frequency_band: attributes.frequency_band().to_string(),
            requires_los: attributes.requires_los(),
            policy_locked: attributes.policy_locked(),
            zone,
            position,
            position_label: format_position(position),
            description: catalog::description(name).to_string(),
        })
    }

    /// Display records of every resolvable antenna, in configured order.
    pub fn status_table<S: SceneAccess + ?Sized>(&self, scene: &S) -> Vec<AntennaStatusRow> {
        self.config
            .antenna_names
            .iter()
            .filter_map(|name| self.status_row(scene, name))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn facts(blocking: bool, attenuation: bool, secure: bool, locked: bool) -> ZoneFacts {
        ZoneFacts {
            blocking,
            attenuation,
            secure,
            policy_locked: locked,
        }
    }

    #[test]
    fn test_outside_all_zones_is_on() {
        assert_eq!(
            resolve_zone(&DEFAULT_RULES, &facts(false, false, false, true)),
            (SignalState::On, ZoneLabel::Clear)
        );
    }

    #[test]
    fn test_blocking_beats_attenuation() {
        assert_eq!(
            resolve_zone(&DEFAULT_RULES, &facts(true, true, false, false)),
            (SignalState::Off, ZoneLabel::RfBlocking)
        );
        assert_eq!(
            resolve_zone(&DEFAULT_RULES, &facts(true, true, true, true)),
            (SignalState::Off, ZoneLabel::RfBlocking)
        );
    }

    #[test]
    fn test_attenuation_beats_secure_lock() {
        assert_eq!(
            resolve_zone(&DEFAULT_RULES, &facts(false, true, true, true)),
            (SignalState::Degraded, ZoneLabel::RfAttenuation)
        );
    }

    #[test]
    fn test_secure_zone_depends_on_lock() {
        assert_eq!(
            resolve_zone(&DEFAULT_RULES, &facts(false, false, true, false)),
            (SignalState::On, ZoneLabel::SecureZone)
        );
        assert_eq!(
            resolve_zone(&DEFAULT_RULES, &facts(false, false, true, true)),
            (SignalState::Off, ZoneLabel::SecureLocked)
        );
    }

    #[test]
    fn test_rules_are_data() {
        // Attenuation promoted above blocking.
        let rules = vec![DEFAULT_RULES[1], DEFAULT_RULES[0]];
        assert_eq!(
            resolve_zone(&rules, &facts(true, true, false, false)),
            (SignalState::Degraded, ZoneLabel::RfAttenuation)
        );
        assert_eq!(
            resolve_zone(&[], &facts(true, true, true, true)),
            (SignalState::On, ZoneLabel::Clear)
        );
    }
}
