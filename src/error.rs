use thiserror::Error;

use crate::gemini::GenerationError;
use crate::session::SessionError;
use crate::store::StorageError;

pub type AppResult<T> = core::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Generation(#[from] GenerationError),
    #[error("{0}")]
    Storage(#[from] StorageError),
    #[error("{0}")]
    Session(#[from] SessionError),
    #[error("{0}")]
    Prompt(#[from] dialoguer::Error),
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Config(String),
    #[error("{0}")]
    Usage(String),
}
