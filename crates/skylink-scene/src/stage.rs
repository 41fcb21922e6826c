//! In-memory scene backed by a hecs world.
//!
//! Entities are addressed by slash-separated paths. Transforms are local
//! to the nearest ancestor entity, so antennas parented under the aircraft
//! follow it when the aircraft moves. Volumes and colliders are world-space
//! boxes.

use std::collections::BTreeMap;

use glam::{DAffine3, DQuat, DVec3, EulerRot};
use hecs::{Entity, EntityBuilder, World};

use skylink_core::enums::SignalState;
use skylink_core::types::Transform;

use crate::aabb::Aabb;
use crate::adapter::{
    parent_path, AntennaAttributes, OcclusionQuery, RaycastHit, SceneAccess, SpatialQuery,
};
use crate::description::EntityDescription;
use crate::error::{SceneError, SceneResult};

/// Scene path of an entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimPath(pub String);

/// Local transform relative to the nearest ancestor entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Xform(pub Transform);

/// Zone volume bounds, tested with `bounds_contains`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Volume(pub Aabb);

/// Solid box that obstructs line of sight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collider(pub Aabb);

pub struct Stage {
    world: World,
    index: BTreeMap<String, Entity>,
    physics_enabled: bool,
}

impl Default for Stage {
    fn default() -> Self {
        Self::new()
    }
}

impl Stage {
    /// Empty stage with the occlusion backend enabled.
    pub fn new() -> Self {
        Self {
            world: World::new(),
            index: BTreeMap::new(),
            physics_enabled: true,
        }
    }

    /// Spawn an entity from its description.
    pub fn insert(&mut self, desc: EntityDescription) -> SceneResult<Entity> {
        validate_path(&desc.path)?;
        if self.index.contains_key(&desc.path) {
            return Err(SceneError::DuplicatePath(desc.path));
        }

        let mut builder = EntityBuilder::new();
        builder.add(PrimPath(desc.path.clone()));
        builder.add(Xform(desc.transform));
        if let Some(attributes) = desc.antenna {
            builder.add(attributes);
        }
        if let Some(bounds) = desc.volume {
            builder.add(Volume(bounds));
        }
        if let Some(bounds) = desc.collider {
            builder.add(Collider(bounds));
        }

        let entity = self.world.spawn(builder.build());
        self.index.insert(desc.path, entity);
        Ok(entity)
    }

    /// Plain transform-only entity (containers, waypoints, towers, the aircraft).
    pub fn spawn_xform(&mut self, path: &str, transform: Transform) -> SceneResult<Entity> {
        self.insert(EntityDescription::xform(path, transform))
    }

    /// Antenna entity at a local offset from its parent.
    pub fn spawn_antenna(
        &mut self,
        path: &str,
        offset: DVec3,
        attributes: AntennaAttributes,
    ) -> SceneResult<Entity> {
        let mut desc = EntityDescription::xform(path, Transform::from_translation(offset));
        desc.antenna = Some(attributes);
        self.insert(desc)
    }

    pub fn spawn_volume(&mut self, path: &str, bounds: Aabb) -> SceneResult<Entity> {
        let mut desc = EntityDescription::xform(path, Transform::from_translation(bounds.center()));
        desc.volume = Some(bounds);
        self.insert(desc)
    }

    pub fn spawn_collider(&mut self, path: &str, bounds: Aabb) -> SceneResult<Entity> {
        let mut desc = EntityDescription::xform(path, Transform::from_translation(bounds.center()));
        desc.collider = Some(bounds);
        self.insert(desc)
    }

    /// Remove an entity (not its descendants). Returns false if it did not exist.
    pub fn remove(&mut self, path: &str) -> bool {
        match self.index.remove(path) {
            Some(entity) => self.world.despawn(entity).is_ok(),
            None => false,
        }
    }

    /// Toggle the occlusion backend. Disabled means every ray is clear.
    pub fn set_physics_enabled(&mut self, enabled: bool) {
        self.physics_enabled = enabled;
    }

    pub fn physics_enabled(&self) -> bool {
        self.physics_enabled
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// All entity paths, sorted.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.index.keys().map(String::as_str)
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Move an entity to a new local translation, keeping its rotation.
    pub fn set_translation(&mut self, path: &str, translation: DVec3) -> bool {
        let Some(mut transform) = self.transform(path) else {
            return false;
        };
        transform.translation = translation;
        self.write_transform(path, transform)
    }

    /// Author the policy lock flag of an antenna (the simulation only reads it).
    pub fn set_policy_locked(&mut self, path: &str, locked: bool) -> bool {
        self.with_attributes(path, |attrs| attrs.policy_locked = Some(locked))
    }

    /// Stored signal state of an antenna, `None` if the attribute is absent.
    pub fn signal_state(&self, path: &str) -> Option<SignalState> {
        self.antenna_attributes(path)?.signal_state
    }

    /// Describe every entity, sorted by path.
    pub fn entities(&self) -> Vec<EntityDescription> {
        self.index
            .iter()
            .filter_map(|(path, &entity)| {
                let transform = self.world.get::<&Xform>(entity).ok()?.0;
                Some(EntityDescription {
                    path: path.clone(),
                    transform,
                    antenna: self
                        .world
                        .get::<&AntennaAttributes>(entity)
                        .ok()
                        .map(|a| (*a).clone()),
                    volume: self.world.get::<&Volume>(entity).ok().map(|v| v.0),
                    collider: self.world.get::<&Collider>(entity).ok().map(|c| c.0),
                })
            })
            .collect()
    }

    fn with_attributes(&mut self, path: &str, f: impl FnOnce(&mut AntennaAttributes)) -> bool {
        let Some(&entity) = self.index.get(path) else {
            return false;
        };
        match self.world.get::<&mut AntennaAttributes>(entity) {
            Ok(mut attrs) => {
                f(&mut *attrs);
                true
            }
            Err(_) => false,
        }
    }

    /// Local-to-world transform of an entity, composed through its ancestors.
    fn world_affine(&self, path: &str) -> Option<DAffine3> {
        let entity = *self.index.get(path)?;
        let local = self
            .world
            .get::<&Xform>(entity)
            .map(|x| local_affine(&x.0))
            .unwrap_or(DAffine3::IDENTITY);
        Some(self.parent_affine(path)? * local)
    }

    /// World transform of the nearest ancestor entity. Intermediate path
    /// segments without an entity are identity.
    fn parent_affine(&self, path: &str) -> Option<DAffine3> {
        let mut parent = parent_path(path);
        while let Some(p) = parent {
            if self.index.contains_key(p) {
                return self.world_affine(p);
            }
            parent = parent_path(p);
        }
        Some(DAffine3::IDENTITY)
    }

    /// Volume bounds, falling back to collider bounds.
    fn bounds(&self, path: &str) -> Option<Aabb> {
        let entity = *self.index.get(path)?;
        if let Ok(volume) = self.world.get::<&Volume>(entity) {
            return Some(volume.0);
        }
        self.world.get::<&Collider>(entity).ok().map(|c| c.0)
    }
}

/// Rotation is applied X, then Y, then Z (degrees).
fn local_affine(transform: &Transform) -> DAffine3 {
    let r = transform.rotation_euler;
    let rotation = DQuat::from_euler(
        EulerRot::ZYX,
        r.z.to_radians(),
        r.y.to_radians(),
        r.x.to_radians(),
    );
    DAffine3::from_rotation_translation(rotation, transform.translation)
}

fn validate_path(path: &str) -> SceneResult<()> {
    if !path.starts_with('/') || path.len() < 2 || path.ends_with('/') || path.contains("//") {
        return Err(SceneError::InvalidPath(path.to_string()));
    }
    Ok(())
}

impl SpatialQuery for Stage {
    fn world_position(&self, path: &str) -> Option<DVec3> {
        self.world_affine(path).map(|affine| affine.translation)
    }

    fn bounds_contains(&self, volume: &str, point: DVec3) -> bool {
        self.bounds(volume).is_some_and(|b| b.contains(point))
    }

    fn occlusion(&self) -> Option<&dyn OcclusionQuery> {
        if self.physics_enabled {
            Some(self)
        } else {
            None
        }
    }
}

impl OcclusionQuery for Stage {
    fn raycast_closest(&self, origin: DVec3, target: DVec3) -> RaycastHit {
        let mut closest: Option<(f64, String)> = None;
        let mut query = self.world.query::<(&PrimPath, &Collider)>();
        for (_entity, (path, collider)) in query.iter() {
            if let Some(distance) = collider.0.segment_entry(origin, target) {
                if closest.as_ref().map_or(true, |(best, _)| distance < *best) {
                    closest = Some((distance, path.0.clone()));
                }
            }
        }
        match closest {
            Some((distance, path)) => RaycastHit::blocked(distance, path),
            None => RaycastHit::unobstructed(),
        }
    }
}

impl SceneAccess for Stage {
    fn contains_entity(&self, path: &str) -> bool {
        self.index.contains_key(path)
    }

    fn children(&self, container: &str) -> Vec<String> {
        if !self.index.contains_key(container) {
            return Vec::new();
        }
        self.index
            .keys()
            .filter(|path| parent_path(path) == Some(container))
            .cloned()
            .collect()
    }

    fn antenna_attributes(&self, path: &str) -> Option<AntennaAttributes> {
        let entity = *self.index.get(path)?;
        self.world
            .get::<&AntennaAttributes>(entity)
            .ok()
            .map(|attrs| (*attrs).clone())
    }

    fn set_signal_state(&mut self, path: &str, state: SignalState) -> bool {
        self.with_attributes(path, |attrs| attrs.signal_state = Some(state))
    }

    fn transform(&self, path: &str) -> Option<Transform> {
        let entity = *self.index.get(path)?;
        self.world.get::<&Xform>(entity).ok().map(|x| x.0)
    }

    fn world_to_parent(&self, path: &str, point: DVec3) -> Option<DVec3> {
        if !self.index.contains_key(path) {
            return None;
        }
        Some(self.parent_affine(path)?.inverse().transform_point3(point))
    }

    fn write_transform(&mut self, path: &str, transform: Transform) -> bool {
        let Some(&entity) = self.index.get(path) else {
            return false;
        };
        match self.world.get::<&mut Xform>(entity) {
            Ok(mut xform) => {
                xform.0 = transform;
                true
            }
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: DVec3, b: DVec3) -> bool {
        a.distance(b) < 1e-6
    }

    #[test]
    fn test_world_to_parent_inverts_ancestors() {
        let mut stage = Stage::new();
        stage
            .spawn_xform(
                "/World",
                Transform::new(DVec3::new(10_000.0, 0.0, 0.0), DVec3::new(0.0, 0.0, 90.0)),
            )
            .unwrap();
        stage.spawn_xform("/World/Aircraft", Transform::default()).unwrap();

        let target = DVec3::new(10_000.0, 500.0, 20.0);
        let local = stage.world_to_parent("/World/Aircraft", target).unwrap();
        stage.set_translation("/World/Aircraft", local);
        assert!(approx(stage.world_position("/World/Aircraft").unwrap(), target));

        // Top-level entities live in world space.
        assert_eq!(stage.world_to_parent("/World", target), Some(target));
        assert_eq!(stage.world_to_parent("/World/Missing", target), None);
    }

    #[test]
    fn test_duplicate_and_invalid_paths() {
        let mut stage = Stage::new();
        stage.spawn_xform("/World", Transform::default()).unwrap();
        assert!(matches!(
            stage.spawn_xform("/World", Transform::default()),
            Err(SceneError::DuplicatePath(_))
        ));
        assert!(matches!(
            stage.spawn_xform("World/x", Transform::default()),
            Err(SceneError::InvalidPath(_))
        ));
        assert!(stage.spawn_xform("/World/", Transform::default()).is_err());
    }

    #[test]
    fn test_child_follows_parent() {
        let mut stage = Stage::new();
        stage
            .spawn_xform(
                "/World/Aircraft",
                Transform::from_translation(DVec3::new(100.0, 0.0, 0.0)),
            )
            .unwrap();
        stage
            .spawn_antenna(
                "/World/Aircraft/Antennas/ANT_TOP",
                DVec3::new(10.0, 0.0, 5.0),
                AntennaAttributes::default(),
            )
            .unwrap();

        // "/World/Aircraft/Antennas" has no entity and acts as identity.
        let pos = stage.world_position("/World/Aircraft/Antennas/ANT_TOP").unwrap();
        assert!(approx(pos, DVec3::new(110.0, 0.0, 5.0)));

        stage.write_transform(
            "/World/Aircraft",
            Transform::new(DVec3::new(0.0, 50.0, 0.0), DVec3::new(0.0, 0.0, 90.0)),
        );
        let pos = stage.world_position("/World/Aircraft/Antennas/ANT_TOP").unwrap();
        assert!(approx(pos, DVec3::new(0.0, 60.0, 5.0)), "got {pos:?}");
    }

    #[test]
    fn test_children_sorted_and_direct_only() {
        let mut stage = Stage::new();
        stage.spawn_xform("/World/Towers", Transform::default()).unwrap();
        stage.spawn_xform("/World/Towers/Tower_B", Transform::default()).unwrap();
        stage.spawn_xform("/World/Towers/Tower_A", Transform::default()).unwrap();
        stage.spawn_xform("/World/Towers/Tower_A/Light", Transform::default()).unwrap();
        stage.spawn_xform("/World/TowersAnnex", Transform::default()).unwrap();

        assert_eq!(
            stage.children("/World/Towers"),
            vec!["/World/Towers/Tower_A", "/World/Towers/Tower_B"]
        );
        assert!(stage.children("/World/Missing").is_empty());
    }

    #[test]
    fn test_volume_containment() {
        let mut stage = Stage::new();
        stage
            .spawn_volume(
                "/World/Volumes/V",
                Aabb::new(DVec3::ZERO, DVec3::new(10.0, 10.0, 10.0)),
            )
            .unwrap();
        assert!(stage.bounds_contains("/World/Volumes/V", DVec3::new(5.0, 5.0, 5.0)));
        assert!(!stage.bounds_contains("/World/Volumes/V", DVec3::new(15.0, 5.0, 5.0)));
        assert!(!stage.bounds_contains("/World/Volumes/Missing", DVec3::ZERO));
        assert!(!stage.bounds_contains("/World/Volumes", DVec3::ZERO));
    }

    #[test]
    fn test_raycast_nearest_collider() {
        let mut stage = Stage::new();
        stage
            .spawn_collider(
                "/World/Hangar_Far",
                Aabb::from_center_half_extents(DVec3::new(80.0, 0.0, 0.0), DVec3::splat(5.0)),
            )
            .unwrap();
        stage
            .spawn_collider(
                "/World/Hangar_Near",
                Aabb::from_center_half_extents(DVec3::new(30.0, 0.0, 0.0), DVec3::splat(5.0)),
            )
            .unwrap();

        let hit = line_of_sight_stage(&stage, DVec3::ZERO, DVec3::new(100.0, 0.0, 0.0));
        assert!(!hit.clear);
        assert_eq!(hit.hit_path.as_deref(), Some("/World/Hangar_Near"));
        assert!((hit.hit_distance.unwrap() - 25.0).abs() < 1e-9);

        let hit = line_of_sight_stage(&stage, DVec3::ZERO, DVec3::new(0.0, 100.0, 0.0));
        assert!(hit.clear);

        stage.set_physics_enabled(false);
        assert!(stage.occlusion().is_none());
        let hit = line_of_sight_stage(&stage, DVec3::ZERO, DVec3::new(100.0, 0.0, 0.0));
        assert!(hit.clear);
    }

    fn line_of_sight_stage(stage: &Stage, a: DVec3, b: DVec3) -> RaycastHit {
        crate::adapter::line_of_sight(stage, a, b)
    }

    #[test]
    fn test_signal_state_write_back() {
        let mut stage = Stage::new();
        stage
            .spawn_antenna("/A/ANT", DVec3::ZERO, AntennaAttributes::default())
            .unwrap();
        stage.spawn_xform("/A/NotAntenna", Transform::default()).unwrap();

        assert_eq!(stage.signal_state("/A/ANT"), None);
        assert!(stage.set_signal_state("/A/ANT", SignalState::Degraded));
        assert_eq!(stage.signal_state("/A/ANT"), Some(SignalState::Degraded));
        assert!(!stage.set_signal_state("/A/NotAntenna", SignalState::On));
        assert!(!stage.set_signal_state("/A/Missing", SignalState::On));
        assert!(stage.set_policy_locked("/A/ANT", true));
        assert!(stage.antenna_attributes("/A/ANT").unwrap().policy_locked());
    }

    #[test]
    fn test_remove() {
        let mut stage = Stage::new();
        stage.spawn_xform("/World/Towers/Tower_A", Transform::default()).unwrap();
        assert!(stage.remove("/World/Towers/Tower_A"));
        assert!(!stage.remove("/World/Towers/Tower_A"));
        assert!(stage.world_position("/World/Towers/Tower_A").is_none());
        assert!(stage.is_empty());
    }
}
