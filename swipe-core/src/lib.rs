//! # Saorsa Swipe Core
//!
//! Swipe-to-dismiss gesture recognition for cards, independent of any UI
//! toolkit. The host feeds pointer events in and renders what the
//! recognizers ask for.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                       swipe-core                         │
//! ├──────────────────────────────────────────────────────────┤
//! │  SwipeDismissView        │  SwipeDismissList             │
//! │  - one element + token   │  - hit-test realized rows     │
//! │  - slide, collapse,      │  - batched removals via       │
//! │    notify, restore       │    JoinBarrier, descending    │
//! ├──────────────────────────────────────────────────────────┤
//! │  SwipeTracker: slop gate, live frame, release decision   │
//! │  VelocityTracker: least-squares fling estimate           │
//! ├──────────────────────────────────────────────────────────┤
//! │  Host seams: ElementHost, ListHost, AnimationEngine      │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything runs on the thread that delivers pointer events. Animation
//! completions come back through `on_animation_end` on that same thread.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod animation;
pub mod barrier;
pub mod config;
pub mod element;
pub mod error;
pub mod event;
pub mod host;
pub mod list;
pub mod recognizer;
pub mod velocity;
pub mod view;

pub use animation::{Animation, AnimationEngine, AnimationTicket};
pub use barrier::JoinBarrier;
pub use config::{PlatformConstants, SwipeConfig};
pub use element::{ElementId, Rect};
pub use error::{SwipeError, SwipeResult};
pub use event::{PointerEvent, PointerPhase, ScrollState};
pub use host::{hit_test, ElementHost, ListHost};
pub use list::{ListDismissCallbacks, PendingRemoval, SwipeDismissList};
pub use recognizer::{
    decide, fade_alpha, Decision, Direction, DragOutcome, RecognizerKind, Release, SwipeFrame,
    SwipeTracker,
};
pub use velocity::{Velocity, VelocityTracker};
pub use view::{DismissCallbacks, SwipeDismissView};

/// Swipe core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
