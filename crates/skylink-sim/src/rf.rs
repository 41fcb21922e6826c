//! RF link resolution between aircraft antennas and ground towers.
//!
//! Each frame, every visualized antenna is served by at most one tower.
//! A tower with clear line of sight always wins over an occluded one and
//! among clear towers the nearest wins. When no tower is clear, an occluded
//! tower is kept as a fallback so the link still shows up (as blocked).
//! The resolved distance maps onto a signal band, and the band onto a line
//! color and width.

use glam::DVec3;
use tracing::{debug, info, warn};

use skylink_core::config::RfConfig;
use skylink_core::enums::{BlockedFallback, SignalBand};
use skylink_core::error::{CoreError, CoreResult};
use skylink_core::events::SimEvent;
use skylink_core::state::DrawLine;
use skylink_core::types::Color;
use skylink_scene::adapter::entity_name;
use skylink_scene::{line_of_sight, SceneAccess, SpatialQuery};

/// One tower as seen from one antenna this frame.
#[derive(Debug, Clone, PartialEq)]
pub struct TowerObservation {
    pub tower: String,
    pub position: DVec3,
    pub distance: f64,
    pub blocked: bool,
    /// Entity that cut the line of sight, if known.
    pub obstruction: Option<String>,
}

/// Blocked/clear link counts since the last report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RfStats {
    pub blocked: u32,
    pub clear: u32,
}

/// Paths of the towers under the configured container, sorted by name.
pub fn discover_towers<S: SceneAccess + ?Sized>(scene: &S, config: &RfConfig) -> Vec<String> {
    let mut towers: Vec<String> = scene
        .children(&config.tower_container)
        .into_iter()
        .filter(|path| entity_name(path).starts_with(&config.tower_prefix))
        .collect();
    towers.sort();
    towers
}

/// Observe every resolvable tower from `antenna`, in tower order.
/// Towers that do not resolve are skipped.
pub fn observe_towers<S: SpatialQuery + ?Sized>(
    scene: &S,
    antenna: DVec3,
    towers: &[String],
) -> Vec<TowerObservation> {
    towers
        .iter()
        .filter_map(|tower| {
            let Some(position) = scene.world_position(tower) else {
                debug!("tower not found: {tower}");
                return None;
            };
            let sight = line_of_sight(scene, position, antenna);
            Some(TowerObservation {
                tower: tower.clone(),
                position,
                distance: position.distance(antenna),
                blocked: !sight.clear,
                obstruction: sight.hit_path,
            })
        })
        .collect()
}

/// Pick the serving tower from observations given in tower order.
///
/// Clear towers: nearest wins. Blocked towers are only considered while no
/// clear tower has been seen, and a clear tower found later always replaces
/// them. Among blocked towers `BlockedFallback::FirstFound` keeps the first
/// one seen regardless of distance, `Nearest` keeps the nearest.
pub fn choose_serving_tower(
    observations: impl IntoIterator<Item = TowerObservation>,
    fallback: BlockedFallback,
) -> Option<TowerObservation> {
    let mut best_clear: Option<TowerObservation> = None;
    let mut fallback_blocked: Option<TowerObservation> = None;

    for obs in observations {
        if !obs.blocked {
            if best_clear.as_ref().map_or(true, |best| obs.distance < best.distance) {
                best_clear = Some(obs);
            }
        } else if best_clear.is_none() {
            let replace = match (&fallback_blocked, fallback) {
                (None, _) => true,
                (Some(_), BlockedFallback::FirstFound) => false,
                (Some(kept), BlockedFallback::Nearest) => obs.distance < kept.distance,
            };
            if replace {
                fallback_blocked = Some(obs);
            }
        }
    }

    best_clear.or(fallback_blocked)
}

/// Signal band for a link distance. Thresholds are inclusive.
pub fn classify_band(distance: f64, config: &RfConfig) -> SignalBand {
    if distance <= config.distance_near {
        SignalBand::On
    } else if distance <= config.distance_medium {
        SignalBand::Degraded
    } else {
        SignalBand::Off
    }
}

/// Line width: maximum inside the near threshold, falling linearly to the
/// minimum at 1.5x the medium threshold and staying there beyond.
pub fn line_width(distance: f64, config: &RfConfig) -> f64 {
    let floor_distance = config.width_floor_distance();
    if distance <= config.distance_near {
        return config.width_max;
    }
    if distance >= floor_distance {
        return config.width_min;
    }
    let t = ((distance - config.distance_near) / (floor_distance - config.distance_near)).clamp(0.0, 1.0);
    config.width_max - (config.width_max - config.width_min) * t
}

/// Color and width for a resolved link. Blocked links ignore the distance band.
pub fn link_style(distance: f64, blocked: bool, config: &RfConfig) -> (Color, f64) {
    if blocked {
        return (config.colors.blocked, config.width_min);
    }
    let color = match classify_band(distance, config) {
        SignalBand::On => config.colors.on,
        SignalBand::Degraded => config.colors.degraded,
        SignalBand::Off => config.colors.off,
    };
    (color, line_width(distance, config))
}

/// Tower-link visualization session state.
///
/// The tower list is scanned on `enable` and kept until `disable`; towers
/// added to the scene in between only show up after re-enabling.
#[derive(Debug)]
pub struct RfVisualizer {
    config: RfConfig,
    towers: Vec<String>,
    enabled: bool,
    frame_count: u64,
    stats: RfStats,
}

impl RfVisualizer {
    pub fn new(config: RfConfig) -> Self {
        Self {
            config,
            towers: Vec::new(),
            enabled: false,
            frame_count: 0,
            stats: RfStats::default(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn towers(&self) -> &[String] {
        &self.towers
    }

    pub fn stats(&self) -> RfStats {
        self.stats
    }

    pub fn config(&self) -> &RfConfig {
        &self.config
    }

    /// Start a session with a fresh tower scan. Fails, leaving the session
    /// disabled, when no tower is found.
    pub fn enable<S: SceneAccess + ?Sized>(&mut self, scene: &S) -> CoreResult<usize> {
        self.towers = discover_towers(scene, &self.config);
        self.frame_count = 0;
        self.stats = RfStats::default();

        if self.towers.is_empty() {
            self.enabled = false;
            warn!("[RF] no towers found under {}", self.config.tower_container);
            return Err(CoreError::NoTowers {
                container: self.config.tower_container.clone(),
            });
        }

        self.enabled = true;
        let occlusion = if scene.occlusion().is_some() {
            "occlusion active"
        } else {
            "occlusion UNAVAILABLE, all links clear"
        };
        info!("[RF] visualization enabled ({} towers, {occlusion})", self.towers.len());
        Ok(self.towers.len())
    }

    /// End the session and drop the tower cache. Returns whether a session was running.
    pub fn disable(&mut self) -> bool {
        let was_enabled = self.enabled;
        self.enabled = false;
        self.towers.clear();
        if was_enabled {
            info!("[RF] visualization disabled");
        }
        was_enabled
    }

    /// Resolve the serving tower of one antenna position.
    pub fn resolve<S: SpatialQuery + ?Sized>(&self, scene: &S, antenna: DVec3) -> Option<TowerObservation> {
        choose_serving_tower(
            observe_towers(scene, antenna, &self.towers),
            self.config.blocked_fallback,
        )
    }

    /// One frame: resolve every visualized antenna and emit its line.
    pub fn run<S: SpatialQuery + ?Sized>(
        &mut self,
        scene: &S,
        lines: &mut Vec<DrawLine>,
        events: &mut Vec<SimEvent>,
    ) {
        if !self.enabled {
            return;
        }

        self.frame_count += 1;
        if self
            .frame_count
            .is_multiple_of(self.config.report_interval_ticks)
        {
            debug!(
                "[RF] frame {}: {} blocked, {} clear",
                self.frame_count, self.stats.blocked, self.stats.clear
            );
            events.push(SimEvent::RfStats {
                blocked: self.stats.blocked,
                clear: self.stats.clear,
            });
            self.stats = RfStats::default();
        }

        for antenna in &self.config.antennas {
            let Some(antenna_pos) = scene.world_position(antenna) else {
                continue;
            };
            let Some(link) = self.resolve(scene, antenna_pos) else {
                continue;
            };

            if link.blocked {
                self.stats.blocked += 1;
            } else {
                self.stats.clear += 1;
            }

            let (color, width) = link_style(link.distance, link.blocked, &self.config);
            lines.push(DrawLine {
                start: link.position,
                end: antenna_pos,
                color,
                width,
                antenna: antenna.clone(),
                tower: link.tower,
                distance: link.distance,
                blocked: link.blocked,
                band: classify_band(link.distance, &self.config),
            });
        }
    }
}
