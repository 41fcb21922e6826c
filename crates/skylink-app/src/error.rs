use skylink_core::CoreError;
use skylink_scene::SceneError;
use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error {0}")]
    IoError(#[from] std::io::Error),

    #[error("RON config error {0}")]
    RonError(#[from] ron::error::SpannedError),

    #[error("scene error {0}")]
    SceneError(#[from] SceneError),

    #[error("simulation error {0}")]
    CoreError(#[from] CoreError),

    #[error("sim loop stopped")]
    LoopStopped,
}
