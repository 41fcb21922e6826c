//! Scene access for SKYLINK.
//!
//! Defines the spatial query and entity access traits the simulation
//! consumes, and an in-memory `Stage` that implements them on top of a
//! hecs world: hierarchical transforms, axis-aligned volumes and
//! segment raycasts against box colliders.

pub use skylink_core as core;

pub mod aabb;
pub mod adapter;
pub mod demo;
pub mod description;
pub mod error;
pub mod stage;

// Re-export key types for convenience.
pub use aabb::Aabb;
pub use adapter::{
    line_of_sight, AntennaAttributes, OcclusionQuery, RaycastHit, SceneAccess, SpatialQuery,
};
pub use description::{EntityDescription, SceneDescription};
pub use error::{SceneError, SceneResult};
pub use stage::Stage;
