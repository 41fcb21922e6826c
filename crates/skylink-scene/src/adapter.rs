//! Traits the simulation uses to read and write the scene.
//!
//! The simulation never touches a concrete scene type. Anything that can
//! resolve entity positions, test volume containment and (optionally)
//! cast rays can host it.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use skylink_core::constants::{DEFAULT_ANTENNA_TYPE, DEFAULT_FREQUENCY_BAND};
use skylink_core::enums::SignalState;
use skylink_core::types::Transform;

/// Result of an occlusion ray between two points.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RaycastHit {
    pub clear: bool,
    /// Distance from the ray origin to the first obstruction.
    pub hit_distance: Option<f64>,
    /// Entity that obstructs the ray.
    pub hit_path: Option<String>,
}

impl RaycastHit {
    pub fn unobstructed() -> Self {
        Self {
            clear: true,
            hit_distance: None,
            hit_path: None,
        }
    }

    pub fn blocked(distance: f64, path: impl Into<String>) -> Self {
        Self {
            clear: false,
            hit_distance: Some(distance),
            hit_path: Some(path.into()),
        }
    }
}

/// Position, volume and occlusion queries.
pub trait SpatialQuery {
    /// World-space position of an entity, `None` if it does not resolve.
    fn world_position(&self, path: &str) -> Option<DVec3>;

    /// Whether `point` lies inside the bounds of `volume`.
    /// A volume that does not exist contains nothing.
    fn bounds_contains(&self, volume: &str, point: DVec3) -> bool;

    /// Occlusion backend, `None` when unavailable.
    fn occlusion(&self) -> Option<&dyn OcclusionQuery>;
}

/// Ray-based line-of-sight backend.
pub trait OcclusionQuery {
    /// Closest obstruction on the segment `origin -> target`.
    fn raycast_closest(&self, origin: DVec3, target: DVec3) -> RaycastHit;
}

/// Line of sight between two points. Degrades to clear when the scene has
/// no occlusion backend or the points coincide.
pub fn line_of_sight<S: SpatialQuery + ?Sized>(scene: &S, origin: DVec3, target: DVec3) -> RaycastHit {
    if origin.distance_squared(target) == 0.0 {
        return RaycastHit::unobstructed();
    }
    match scene.occlusion() {
        Some(backend) => backend.raycast_closest(origin, target),
        None => RaycastHit::unobstructed(),
    }
}

/// Authored attributes of an antenna entity. Every field is optional in
/// the scene; the accessors apply the documented defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AntennaAttributes {
    /// Defaults to `UNKNOWN` before the first evaluation.
    pub signal_state: Option<SignalState>,
    /// Externally authored, read-only for the simulation. Defaults to false.
    pub policy_locked: Option<bool>,
    /// Defaults to `N/A`.
    pub frequency_band: Option<String>,
    /// Defaults to false.
    pub requires_los: Option<bool>,
    /// Defaults to `UNKNOWN`.
    pub antenna_type: Option<String>,
}

impl AntennaAttributes {
    pub fn signal_state(&self) -> SignalState {
        self.signal_state.unwrap_or_default()
    }

    pub fn policy_locked(&self) -> bool {
        self.policy_locked.unwrap_or(false)
    }

    pub fn frequency_band(&self) -> &str {
        self.frequency_band.as_deref().unwrap_or(DEFAULT_FREQUENCY_BAND)
    }

    pub fn requires_los(&self) -> bool {
        self.requires_los.unwrap_or(false)
    }

    pub fn antenna_type(&self) -> &str {
        self.antenna_type.as_deref().unwrap_or(DEFAULT_ANTENNA_TYPE)
    }
}

/// Entity lookup and attribute/transform write-back.
pub trait SceneAccess: SpatialQuery {
    fn contains_entity(&self, path: &str) -> bool;

    /// Paths of the direct children of `container`, sorted. Empty if the
    /// container does not exist.
    fn children(&self, container: &str) -> Vec<String>;

    fn antenna_attributes(&self, path: &str) -> Option<AntennaAttributes>;

    /// Store a signal state on an antenna. Returns false if the entity is not an antenna.
    fn set_signal_state(&mut self, path: &str, state: SignalState) -> bool;

    /// Local transform of an entity.
    fn transform(&self, path: &str) -> Option<Transform>;

    /// Overwrite the local transform of an entity. Returns false if it does not resolve.
    fn write_transform(&mut self, path: &str, transform: Transform) -> bool;

    /// Express a world-space point in the parent space of `path`, the space
    /// its local translation lives in. `None` if the entity does not resolve.
    fn world_to_parent(&self, path: &str, point: DVec3) -> Option<DVec3>;
}

/// Last path segment (`/World/Towers/Tower_A` -> `Tower_A`).
pub fn entity_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Parent path, `None` for top-level entities.
pub fn parent_path(path: &str) -> Option<&str> {
    match path.rfind('/') {
        Some(0) | None => None,
        Some(idx) => Some(&path[..idx]),
    }
}
