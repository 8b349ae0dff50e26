//! # Swipe Recognizer
//!
//! The gesture state machine shared by the single-element and list
//! variants. It knows nothing about views: it consumes pointer events and
//! reports what the caller should render and decide.
//!
//! ```text
//! Down ──(dismissable)──▶ Tracking ──(|dx| > slop)──▶ Swiping
//!                            │                          │
//!                            └────────── Up ────────────┴──▶ Dismiss(dir) | Cancel
//! ```
//!
//! At most one session exists at a time. Only the primary pointer is
//! considered.

use serde::{Deserialize, Serialize};

use crate::config::SwipeConfig;
use crate::event::PointerEvent;
use crate::velocity::{Velocity, VelocityTracker};

/// Horizontal direction of a dismissal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Towards negative x.
    Left,
    /// Towards positive x.
    Right,
}

impl Direction {
    /// Direction of a signed horizontal quantity; non-positive is left.
    #[must_use]
    pub fn from_sign(value: f32) -> Self {
        if value > 0.0 {
            Self::Right
        } else {
            Self::Left
        }
    }

    /// `-1.0` for left, `1.0` for right.
    #[must_use]
    pub const fn signum(self) -> f32 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }
}

/// Outcome of a release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", content = "direction", rename_all = "lowercase")]
pub enum Decision {
    /// Commit the dismissal, exiting towards the direction.
    Dismiss(Direction),
    /// Snap back to rest.
    Cancel,
}

/// Live transform to apply while swiping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SwipeFrame {
    /// Horizontal translation in pixels.
    pub translation_x: f32,
    /// Opacity in `[0, 1]`.
    pub alpha: f32,
}

/// Result of feeding a move event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragOutcome {
    /// No session is tracking velocity; the event is not ours.
    Ignored,
    /// Tracking, but the slop gate has not been crossed.
    Tracking,
    /// Swiping; `started` is true for the event that crossed the gate.
    Swiping {
        /// Whether this event entered the swiping state.
        started: bool,
        /// Transform to render.
        frame: SwipeFrame,
    },
}

/// Result of feeding a release event to an active session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Release {
    /// Dismiss or cancel.
    pub decision: Decision,
    /// Whether the session had entered the swiping state.
    pub was_swiping: bool,
    /// Final horizontal displacement from the press.
    pub displacement: f32,
    /// Velocity at release.
    pub velocity: Velocity,
}

/// Rules that differ between the single-element and list variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecognizerKind {
    /// One element; any qualifying release dismisses.
    Element,
    /// Rows of a list; moves must be mostly horizontal, release only
    /// dismisses after swiping was entered, and the live translation starts
    /// from the slop edge so the row does not jump.
    List,
}

#[derive(Debug, Clone, Copy)]
struct Session {
    down_x: f32,
    down_y: f32,
    swiping: bool,
    swiping_slop: f32,
    translation_x: f32,
}

/// Stateful swipe classifier.
#[derive(Debug, Clone)]
pub struct SwipeTracker {
    config: SwipeConfig,
    kind: RecognizerKind,
    /// Cached target width; 1 until resolved so divisions are always safe.
    width: f32,
    session: Option<Session>,
    velocity: VelocityTracker,
}

impl SwipeTracker {
    /// Create a tracker.
    #[must_use]
    pub fn new(config: SwipeConfig, kind: RecognizerKind) -> Self {
        Self {
            config,
            kind,
            width: 1.0,
            session: None,
            velocity: VelocityTracker::new(),
        }
    }

    /// Configuration in use.
    #[must_use]
    pub const fn config(&self) -> &SwipeConfig {
        &self.config
    }

    /// Which rule set this tracker applies.
    #[must_use]
    pub const fn kind(&self) -> RecognizerKind {
        self.kind
    }

    /// Cached target width.
    #[must_use]
    pub const fn width(&self) -> f32 {
        self.width
    }

    /// Resolve the target width if it has not been measured yet.
    ///
    /// `measure` is only called while the cached width is below 2, i.e.
    /// before the target has been laid out. The result is clamped to at
    /// least 1.
    pub fn resolve_width(&mut self, measure: impl FnOnce() -> f32) -> f32 {
        if self.width < 2.0 {
            let measured = measure();
            self.width = if measured.is_finite() {
                measured.max(1.0)
            } else {
                1.0
            };
        }
        self.width
    }

    /// Forget the cached width so the next event measures again.
    pub fn invalidate_width(&mut self) {
        self.width = 1.0;
    }

    /// Whether a session is tracking velocity.
    #[must_use]
    pub const fn is_tracking(&self) -> bool {
        self.session.is_some()
    }

    /// Whether the active session is swiping.
    #[must_use]
    pub fn is_swiping(&self) -> bool {
        self.session.is_some_and(|s| s.swiping)
    }

    /// Current live translation of the active session.
    #[must_use]
    pub fn translation_x(&self) -> f32 {
        self.session.map_or(0.0, |s| s.translation_x)
    }

    /// Begin a session at a dismissable press.
    ///
    /// Any previous session is discarded.
    pub fn press(&mut self, event: &PointerEvent) {
        self.velocity.clear();
        self.velocity.add(event);
        self.session = Some(Session {
            down_x: event.x,
            down_y: event.y,
            swiping: false,
            swiping_slop: 0.0,
            translation_x: 0.0,
        });
    }

    /// Feed a move event.
    pub fn drag(&mut self, event: &PointerEvent) -> DragOutcome {
        let Some(session) = self.session.as_mut() else {
            return DragOutcome::Ignored;
        };

        self.velocity.add(event);
        let dx = event.x - session.down_x;
        let dy = event.y - session.down_y;

        let mut started = false;
        if !session.swiping && dx.abs() > self.config.touch_slop {
            let directional = match self.kind {
                RecognizerKind::Element => true,
                RecognizerKind::List => dy.abs() < dx.abs() / 2.0,
            };
            if directional {
                session.swiping = true;
                started = true;
                if self.kind == RecognizerKind::List {
                    session.swiping_slop = self.config.touch_slop.copysign(dx);
                }
                tracing::debug!(dx, dy, "Swipe started");
            }
        }

        if !session.swiping {
            return DragOutcome::Tracking;
        }

        session.translation_x = dx - session.swiping_slop;
        DragOutcome::Swiping {
            started,
            frame: SwipeFrame {
                translation_x: session.translation_x,
                alpha: fade_alpha(dx, self.width),
            },
        }
    }

    /// Feed a release event, ending the session.
    ///
    /// Returns `None` when no session was tracking velocity.
    pub fn release(&mut self, event: &PointerEvent) -> Option<Release> {
        let session = self.session.take()?;

        self.velocity.add(event);
        let velocity = self.velocity.velocity();
        self.velocity.clear();

        let displacement = event.x - session.down_x;
        let decision = decide(
            &self.config,
            self.width,
            displacement,
            velocity,
            self.kind == RecognizerKind::Element || session.swiping,
        );
        tracing::debug!(displacement, vx = velocity.x, vy = velocity.y, ?decision, "Swipe released");

        Some(Release {
            decision,
            was_swiping: session.swiping,
            displacement,
            velocity,
        })
    }

    /// Abandon the session without a decision.
    ///
    /// Returns whether a session existed.
    pub fn cancel(&mut self) -> bool {
        self.velocity.clear();
        self.session.take().is_some()
    }
}

/// Opacity for a displacement: fully opaque at rest, transparent at half the
/// width.
#[must_use]
pub fn fade_alpha(displacement: f32, width: f32) -> f32 {
    (1.0 - 2.0 * displacement.abs() / width.max(1.0)).clamp(0.0, 1.0)
}

/// Release decision rule.
///
/// Evaluated in order: past half the width dismisses towards the
/// displacement; otherwise a mostly-horizontal fling inside the velocity
/// window dismisses towards the fling; otherwise cancel. `eligible` false
/// always cancels.
#[must_use]
pub fn decide(
    config: &SwipeConfig,
    width: f32,
    displacement: f32,
    velocity: Velocity,
    eligible: bool,
) -> Decision {
    if !eligible {
        return Decision::Cancel;
    }

    let vx = velocity.x.abs();
    let vy = velocity.y.abs();

    if displacement.abs() > width / 2.0 {
        Decision::Dismiss(Direction::from_sign(displacement))
    } else if config.min_fling_velocity <= vx && vx <= config.max_fling_velocity && vy < vx {
        Decision::Dismiss(Direction::from_sign(velocity.x))
    } else {
        Decision::Cancel
    }
}
