//! Pointer input events consumed by the swipe recognizers.

use serde::{Deserialize, Serialize};

/// Phase of a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerPhase {
    /// Pointer went down (finger touched).
    Down,
    /// Pointer moved while down.
    Move,
    /// Pointer released.
    Up,
    /// Sequence cancelled by the system or a competing gesture.
    Cancel,
}

/// A single event from the primary pointer.
///
/// Coordinates are absolute screen coordinates, so they stay stable while the
/// element under the pointer is being translated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    /// Phase of this event.
    pub phase: PointerPhase,
    /// X position in screen coordinates.
    pub x: f32,
    /// Y position in screen coordinates.
    pub y: f32,
    /// Monotonic timestamp in milliseconds.
    pub timestamp_ms: u64,
}

impl PointerEvent {
    /// Create a new pointer event.
    #[must_use]
    pub const fn new(phase: PointerPhase, x: f32, y: f32, timestamp_ms: u64) -> Self {
        Self {
            phase,
            x,
            y,
            timestamp_ms,
        }
    }

    /// Pointer down at a point.
    #[must_use]
    pub const fn down(x: f32, y: f32, timestamp_ms: u64) -> Self {
        Self::new(PointerPhase::Down, x, y, timestamp_ms)
    }

    /// Pointer moved to a point.
    #[must_use]
    pub const fn moved(x: f32, y: f32, timestamp_ms: u64) -> Self {
        Self::new(PointerPhase::Move, x, y, timestamp_ms)
    }

    /// Pointer released at a point.
    #[must_use]
    pub const fn up(x: f32, y: f32, timestamp_ms: u64) -> Self {
        Self::new(PointerPhase::Up, x, y, timestamp_ms)
    }

    /// Sequence cancelled.
    #[must_use]
    pub const fn cancel(x: f32, y: f32, timestamp_ms: u64) -> Self {
        Self::new(PointerPhase::Cancel, x, y, timestamp_ms)
    }

    /// Copy of this event with a different phase.
    ///
    /// Used to synthesize the cancellation sent to an element once a swipe
    /// takes ownership of the pointer.
    #[must_use]
    pub const fn with_phase(self, phase: PointerPhase) -> Self {
        Self { phase, ..self }
    }
}

/// Scroll state of a list container, forwarded by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollState {
    /// Not scrolling.
    #[default]
    Idle,
    /// Being scrolled by an active touch.
    TouchScroll,
    /// Coasting after a fling.
    Fling,
}
