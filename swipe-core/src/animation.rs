//! Animation requests handed to the host's animation engine.
//!
//! The engine is a black box: it interpolates from the element's current
//! values to the requested ones over the given duration, applying intermediate
//! values itself. When an animation was started with a ticket, the host must
//! report its completion back to the recognizer that issued it, on the same
//! thread that delivers pointer events.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::element::ElementId;
use crate::recognizer::Direction;

/// Completion token for an animation whose end the recognizer waits for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AnimationTicket(u64);

impl AnimationTicket {
    /// Raw ticket value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for AnimationTicket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Issues tickets unique within one recognizer.
#[derive(Debug, Default)]
pub(crate) struct TicketCounter {
    next: u64,
}

impl TicketCounter {
    pub(crate) fn issue(&mut self) -> AnimationTicket {
        self.next += 1;
        AnimationTicket(self.next)
    }
}

/// A visual transition requested from the animation engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Animation {
    /// Animate horizontal translation and opacity to the given values.
    Slide {
        /// Target horizontal translation in pixels.
        translation_x: f32,
        /// Target opacity.
        alpha: f32,
        /// Duration of the transition.
        duration: Duration,
    },
    /// Animate the element's height.
    Collapse {
        /// Starting height in pixels.
        from_height: f32,
        /// Final height in pixels.
        to_height: f32,
        /// Duration of the transition.
        duration: Duration,
    },
}

impl Animation {
    /// Slide back to rest, fully opaque.
    #[must_use]
    pub const fn snap_back(duration: Duration) -> Self {
        Self::Slide {
            translation_x: 0.0,
            alpha: 1.0,
            duration,
        }
    }

    /// Slide a full width off in `direction`, fading out.
    #[must_use]
    pub fn exit(direction: Direction, width: f32, duration: Duration) -> Self {
        Self::Slide {
            translation_x: direction.signum() * width,
            alpha: 0.0,
            duration,
        }
    }

    /// Collapse from `height` down to a single pixel.
    #[must_use]
    pub const fn collapse(height: f32, duration: Duration) -> Self {
        Self::Collapse {
            from_height: height,
            to_height: 1.0,
            duration,
        }
    }

    /// Duration of the transition.
    #[must_use]
    pub const fn duration(&self) -> Duration {
        match self {
            Self::Slide { duration, .. } | Self::Collapse { duration, .. } => *duration,
        }
    }
}

/// External animation engine.
pub trait AnimationEngine {
    /// Start `animation` on `element`.
    ///
    /// A started animation replaces any running animation of the same kind
    /// on that element. When `ticket` is present the host must later pass it
    /// to the issuing recognizer's `on_animation_end`.
    fn start(&mut self, element: ElementId, animation: Animation, ticket: Option<AnimationTicket>);
}
