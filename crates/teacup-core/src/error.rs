//! Engine error types.

use crate::backend::{BackendError, WindowId};
use thiserror::Error;

/// Errors surfaced by the engine, windows and scene objects.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),
    #[error("Unknown font: {0}")]
    UnknownFont(String),
    #[error("Invalid style: {0}")]
    InvalidStyle(String),
    #[error("Unknown window: {0}")]
    UnknownWindow(WindowId),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
