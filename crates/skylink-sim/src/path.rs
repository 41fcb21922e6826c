//! Waypoint path following.
//!
//! A path of N waypoints is split into N-1 equal segments in progress
//! space. Progress in [0, 1] selects a segment and a blend factor inside
//! it; translation and rotation are blended component-wise. Rotation is
//! blended in the waypoints' axis order and then permuted into the moving
//! entity's axis order through the configured axis map.

use glam::DVec3;
use tracing::{debug, warn};

use skylink_core::config::{validate_axis_map, PathConfig};
use skylink_core::error::{CoreError, CoreResult};
use skylink_core::types::Transform;
use skylink_scene::SceneAccess;

/// A waypoint captured from the scene at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct Waypoint {
    pub path: String,
    /// World translation and native-axis Euler rotation.
    pub transform: Transform,
}

#[derive(Debug, Clone)]
pub struct WaypointPath {
    waypoints: Vec<Waypoint>,
    axis_map: [usize; 3],
}

/// Clamp progress into [0, 1]. NaN is treated as the path start.
pub fn clamp_progress(progress: f64) -> f64 {
    if progress.is_nan() {
        0.0
    } else {
        progress.clamp(0.0, 1.0)
    }
}

/// Reorder vector components: result axis `i` takes `v[axis_map[i]]`.
pub fn remap_axes(v: DVec3, axis_map: [usize; 3]) -> DVec3 {
    DVec3::new(v[axis_map[0]], v[axis_map[1]], v[axis_map[2]])
}

/// `a * (1 - t) + b * t`, exact at both ends.
fn blend(a: DVec3, b: DVec3, t: f64) -> DVec3 {
    a * (1.0 - t) + b * t
}

impl WaypointPath {
    pub fn new(waypoints: Vec<Waypoint>, axis_map: [usize; 3]) -> CoreResult<Self> {
        validate_axis_map(axis_map)?;
        if waypoints.len() < 2 {
            return Err(CoreError::TooFewWaypoints {
                found: waypoints.len(),
            });
        }
        Ok(Self {
            waypoints,
            axis_map,
        })
    }

    /// Capture the configured waypoints from the scene. The moving entity and
    /// every waypoint must resolve.
    pub fn capture<S: SceneAccess + ?Sized>(scene: &S, config: &PathConfig) -> CoreResult<Self> {
        if !scene.contains_entity(&config.moving_entity) {
            warn!("moving entity not found: {}", config.moving_entity);
            return Err(CoreError::MissingEntity(config.moving_entity.clone()));
        }

        let mut waypoints = Vec::with_capacity(config.waypoints.len());
        for path in &config.waypoints {
            let (Some(translation), Some(local)) =
                (scene.world_position(path), scene.transform(path))
            else {
                warn!("missing waypoint: {path}");
                return Err(CoreError::MissingEntity(path.clone()));
            };
            waypoints.push(Waypoint {
                path: path.clone(),
                transform: Transform::new(translation, local.rotation_euler),
            });
        }

        let path = Self::new(waypoints, config.axis_map)?;
        debug!("captured {} waypoints", path.len());
        Ok(path)
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    /// Always false, a path holds at least two waypoints.
    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    pub fn axis_map(&self) -> [usize; 3] {
        self.axis_map
    }

    /// Progress value that lands exactly on a waypoint.
    pub fn waypoint_progress(&self, index: usize) -> Option<f64> {
        (index < self.waypoints.len()).then(|| index as f64 / (self.waypoints.len() - 1) as f64)
    }

    /// Active segment index and blend factor for a progress value.
    pub fn segment(&self, progress: f64) -> (usize, f64) {
        let progress = clamp_progress(progress);
        let num_segments = self.waypoints.len() - 1;
        let segment_size = 1.0 / num_segments as f64;

        // progress == 1.0 falls past the last segment
        let index = ((progress / segment_size).floor() as usize).min(num_segments - 1);
        let local = ((progress - index as f64 * segment_size) / segment_size).clamp(0.0, 1.0);
        (index, local)
    }

    /// Transform of the moving entity at `progress`, rotation already in
    /// the moving entity's axis order.
    pub fn interpolate(&self, progress: f64) -> Transform {
        let (index, t) = self.segment(progress);
        let start = &self.waypoints[index].transform;
        let end = &self.waypoints[index + 1].transform;

        let translation = blend(start.translation, end.translation, t);
        let rotation = blend(start.rotation_euler, end.rotation_euler, t);
        Transform::new(translation, remap_axes(rotation, self.axis_map))
    }
}

/// Owns path progress and writes the interpolated transform to the moving entity.
#[derive(Debug, Clone)]
pub struct PathFollower {
    path: WaypointPath,
    moving_entity: String,
    progress: f64,
}

impl PathFollower {
    pub fn new(path: WaypointPath, moving_entity: impl Into<String>) -> Self {
        Self {
            path,
            moving_entity: moving_entity.into(),
            progress: 0.0,
        }
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn path(&self) -> &WaypointPath {
        &self.path
    }

    pub fn moving_entity(&self) -> &str {
        &self.moving_entity
    }

    /// Place the moving entity at `progress` (clamped). Returns false, and
    /// keeps the previous progress, when the entity cannot be written.
    pub fn set_progress<S: SceneAccess + ?Sized>(&mut self, scene: &mut S, progress: f64) -> bool {
        let progress = clamp_progress(progress);
        let mut transform = self.path.interpolate(progress);
        // Waypoints are captured in world space, the entity transform is parent-local.
        let Some(local) = scene.world_to_parent(&self.moving_entity, transform.translation) else {
            debug!("cannot move {}: entity not found", self.moving_entity);
            return false;
        };
        transform.translation = local;
        if !scene.write_transform(&self.moving_entity, transform) {
            debug!("cannot move {}: entity not found", self.moving_entity);
            return false;
        }
        self.progress = progress;
        true
    }

    /// Place the moving entity on a waypoint.
    pub fn jump_to_waypoint<S: SceneAccess + ?Sized>(&mut self, scene: &mut S, index: usize) -> bool {
        match self.path.waypoint_progress(index) {
            Some(progress) => self.set_progress(scene, progress),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn waypoint(name: &str, translation: [f64; 3], rotation: [f64; 3]) -> Waypoint {
        Waypoint {
            path: format!("/World/Waypoints/{name}"),
            transform: Transform::new(DVec3::from_array(translation), DVec3::from_array(rotation)),
        }
    }

    fn three_point_path() -> WaypointPath {
        WaypointPath::new(
            vec![
                waypoint("A", [0.0, 0.0, 0.0], [0.0, 0.0, 0.0]),
                waypoint("B", [100.0, 0.0, 0.0], [10.0, 90.0, 0.0]),
                waypoint("C", [100.0, 200.0, 50.0], [20.0, 180.0, 30.0]),
            ],
            [0, 2, 1],
        )
        .unwrap()
    }

    #[test]
    fn test_too_few_waypoints() {
        let err = WaypointPath::new(vec![waypoint("A", [0.0; 3], [0.0; 3])], [0, 1, 2]).unwrap_err();
        assert_eq!(err, CoreError::TooFewWaypoints { found: 1 });
        assert!(WaypointPath::new(Vec::new(), [0, 1, 2]).is_err());
    }

    #[test]
    fn test_new_rejects_bad_axis_map() {
        let waypoints = || {
            vec![
                waypoint("A", [0.0; 3], [0.0; 3]),
                waypoint("B", [10.0, 0.0, 0.0], [0.0, 90.0, 0.0]),
            ]
        };
        for axis_map in [[0, 3, 1], [0, 0, 1], [2, 2, 2]] {
            assert!(matches!(
                WaypointPath::new(waypoints(), axis_map),
                Err(CoreError::InvalidConfig(_))
            ));
        }
        assert!(WaypointPath::new(waypoints(), [1, 2, 0]).is_ok());
    }

    #[test]
    fn test_segment_selection() {
        let path = three_point_path();
        assert_eq!(path.segment(0.0), (0, 0.0));
        assert_eq!(path.segment(0.25), (0, 0.5));
        assert_eq!(path.segment(0.5), (1, 0.0));
        let (index, t) = path.segment(1.0);
        assert_eq!(index, 1);
        assert!((t - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_midpoint_blend_and_axis_remap() {
        let path = three_point_path();
        let mid = path.interpolate(0.25);
        assert_eq!(mid.translation, DVec3::new(50.0, 0.0, 0.0));
        // Native (5, 45, 0) -> aircraft (x, z, y) = (5, 0, 45)
        assert_eq!(mid.rotation_euler, DVec3::new(5.0, 0.0, 45.0));
    }

    #[test]
    fn test_remap_axes() {
        let v = DVec3::new(1.0, 2.0, 3.0);
        assert_eq!(remap_axes(v, [0, 1, 2]), v);
        assert_eq!(remap_axes(v, [0, 2, 1]), DVec3::new(1.0, 3.0, 2.0));
        assert_eq!(remap_axes(v, [2, 0, 1]), DVec3::new(3.0, 1.0, 2.0));
    }

    #[test]
    fn test_clamp_progress() {
        assert_eq!(clamp_progress(-0.5), 0.0);
        assert_eq!(clamp_progress(1.5), 1.0);
        assert_eq!(clamp_progress(f64::NAN), 0.0);
        assert_eq!(clamp_progress(0.3), 0.3);
    }

    #[test]
    fn test_waypoint_progress() {
        let path = three_point_path();
        assert_eq!(path.waypoint_progress(0), Some(0.0));
        assert_eq!(path.waypoint_progress(1), Some(0.5));
        assert_eq!(path.waypoint_progress(2), Some(1.0));
        assert_eq!(path.waypoint_progress(3), None);
    }
}
