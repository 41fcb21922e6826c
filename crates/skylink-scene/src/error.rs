use thiserror::Error;

pub type SceneResult<T> = std::result::Result<T, SceneError>;

#[derive(Error, Debug)]
pub enum SceneError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("duplicate entity path: {0}")]
    DuplicatePath(String),

    #[error("invalid entity path: {0}")]
    InvalidPath(String),
}
