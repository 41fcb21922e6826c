//! JSON scene description.
//!
//! A flat list of entities, each carrying the components it has:
//!
//! ```json
//! { "physics": true,
//!   "entities": [
//!     { "path": "/World/Towers/Tower_A",
//!       "transform": { "translation": [9000.0, 0.0, 0.0], "rotation_euler": [0.0, 0.0, 0.0] } },
//!     { "path": "/World/Volumes/RF_BLOCKING_VOLUME",
//!       "volume": { "min": [0.0, 0.0, 0.0], "max": [10.0, 10.0, 10.0] } } ] }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use skylink_core::types::Transform;

use crate::aabb::Aabb;
use crate::adapter::AntennaAttributes;
use crate::error::SceneResult;
use crate::stage::Stage;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    /// Whether the occlusion backend is available.
    #[serde(default = "default_physics")]
    pub physics: bool,
    pub entities: Vec<EntityDescription>,
}

fn default_physics() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityDescription {
    pub path: String,
    #[serde(default)]
    pub transform: Transform,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub antenna: Option<AntennaAttributes>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<Aabb>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collider: Option<Aabb>,
}

impl EntityDescription {
    pub fn xform(path: &str, transform: Transform) -> Self {
        Self {
            path: path.to_string(),
            transform,
            antenna: None,
            volume: None,
            collider: None,
        }
    }
}

impl SceneDescription {
    pub fn from_json(json: &str) -> SceneResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> SceneResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> SceneResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Build a stage holding every described entity.
    pub fn into_stage(self) -> SceneResult<Stage> {
        let mut stage = Stage::new();
        stage.set_physics_enabled(self.physics);
        for entity in self.entities {
            stage.insert(entity)?;
        }
        info!(
            "loaded scene: {} entities, physics {}",
            stage.len(),
            if stage.physics_enabled() { "on" } else { "off" }
        );
        Ok(stage)
    }
}

impl From<&Stage> for SceneDescription {
    fn from(stage: &Stage) -> Self {
        Self {
            physics: stage.physics_enabled(),
            entities: stage.entities(),
        }
    }
}
