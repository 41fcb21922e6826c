//! Config and scene loading.

use std::path::Path;

use tracing::info;

use skylink_core::config::AirfieldConfig;
use skylink_scene::demo::airfield_stage;
use skylink_scene::{SceneDescription, Stage};

use crate::error::AppResult;

/// Parse and validate a RON config.
pub fn parse_config(ron: &str) -> AppResult<AirfieldConfig> {
    let config: AirfieldConfig = ron::from_str(ron)?;
    config.validate()?;
    Ok(config)
}

/// Load the config file, or the stock config when none is given.
pub fn load_config(path: Option<&Path>) -> AppResult<AirfieldConfig> {
    match path {
        Some(path) => {
            let config = parse_config(&std::fs::read_to_string(path)?)?;
            info!("loaded config from {}", path.display());
            Ok(config)
        }
        None => Ok(AirfieldConfig::default()),
    }
}

/// Load a scene description, or build the demo airfield for `seed`.
pub fn load_stage(path: Option<&Path>, seed: u64) -> AppResult<Stage> {
    match path {
        Some(path) => Ok(SceneDescription::load(path)?.into_stage()?),
        None => {
            info!("using demo airfield (seed {seed})");
            Ok(airfield_stage(seed)?)
        }
    }
}
