//! Error type shared by the simulation crates.

use thiserror::Error;

pub type CoreResult<T> = std::result::Result<T, CoreError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("waypoint path needs at least 2 waypoints, found {found}")]
    TooFewWaypoints { found: usize },

    #[error("entity not found: {0}")]
    MissingEntity(String),

    #[error("no towers found under {container}")]
    NoTowers { container: String },
}

pub fn invalid_config(msg: impl ToString) -> CoreError {
    CoreError::InvalidConfig(msg.to_string())
}
