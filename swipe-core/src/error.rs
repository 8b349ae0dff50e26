//! Error types for swipe configuration and serialization.
//!
//! Gesture recognition itself never fails: out-of-order or malformed pointer
//! streams degrade to no-ops. Errors only surface at the edges.

use thiserror::Error;

/// Result type for swipe operations.
pub type SwipeResult<T> = Result<T, SwipeError>;

/// Errors that can occur outside of gesture recognition.
#[derive(Debug, Error)]
pub enum SwipeError {
    /// Gesture configuration is inconsistent or out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Event or config serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
