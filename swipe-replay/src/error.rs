//! Error types for script replay.

use swipe_core::SwipeError;
use thiserror::Error;

/// Result type for replay operations.
pub type ReplayResult<T> = Result<T, ReplayError>;

/// Errors that can occur while loading or running a script.
#[derive(Debug, Error)]
pub enum ReplayError {
    /// Script file could not be read.
    #[error("Failed to read script: {0}")]
    Io(#[from] std::io::Error),

    /// Script is not valid JSON or has the wrong shape.
    #[error("Invalid script: {0}")]
    Parse(#[from] serde_json::Error),

    /// Gesture configuration was rejected.
    #[error(transparent)]
    Swipe(#[from] SwipeError),

    /// View mode needs at least one row to act as the card.
    #[error("Script has no rows")]
    EmptyScene,
}
