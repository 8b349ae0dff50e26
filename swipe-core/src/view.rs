//! Swipe-to-dismiss for a single element.
//!
//! Each dismissal runs two animations: the element slides off and fades,
//! then its height collapses. The dismiss callback fires once the collapse
//! completes, after which the element's presentation is restored so the
//! host can reuse it.

use std::collections::HashMap;

use crate::animation::{Animation, AnimationEngine, AnimationTicket, TicketCounter};
use crate::config::SwipeConfig;
use crate::element::ElementId;
use crate::event::{PointerEvent, PointerPhase};
use crate::host::{reset_transform, ElementHost};
use crate::recognizer::{Decision, DragOutcome, RecognizerKind, SwipeTracker};

/// Caller hooks for a dismissable element carrying a token of type `T`.
pub trait DismissCallbacks<T> {
    /// Whether the element may currently be swiped away.
    fn can_dismiss(&mut self, token: &T) -> bool;

    /// The element was swiped away and its exit animation has finished.
    fn on_dismiss(&mut self, element: ElementId, token: &T);
}

#[derive(Debug, Clone, Copy)]
enum ExitStage {
    Sliding,
    Collapsing { original_height: f32 },
}

/// Swipe-to-dismiss recognizer bound to one element.
#[derive(Debug)]
pub struct SwipeDismissView<T, C> {
    element: ElementId,
    token: T,
    callbacks: C,
    tracker: SwipeTracker,
    paused: bool,
    tickets: TicketCounter,
    exits: HashMap<AnimationTicket, ExitStage>,
}

impl<T, C: DismissCallbacks<T>> SwipeDismissView<T, C> {
    /// Create a recognizer for `element`, reporting `token` to `callbacks`.
    #[must_use]
    pub fn new(element: ElementId, token: T, config: SwipeConfig, callbacks: C) -> Self {
        Self {
            element,
            token,
            callbacks,
            tracker: SwipeTracker::new(config, RecognizerKind::Element),
            paused: false,
            tickets: TicketCounter::default(),
            exits: HashMap::new(),
        }
    }

    /// The element this recognizer drives.
    #[must_use]
    pub const fn element(&self) -> ElementId {
        self.element
    }

    /// The token reported on dismissal.
    #[must_use]
    pub const fn token(&self) -> &T {
        &self.token
    }

    /// The caller hooks.
    #[must_use]
    pub const fn callbacks(&self) -> &C {
        &self.callbacks
    }

    /// Mutable access to the caller hooks.
    pub fn callbacks_mut(&mut self) -> &mut C {
        &mut self.callbacks
    }

    /// Whether gesture watching is paused.
    #[must_use]
    pub const fn is_paused(&self) -> bool {
        self.paused
    }

    /// Whether a session is tracking the pointer.
    #[must_use]
    pub const fn is_tracking(&self) -> bool {
        self.tracker.is_tracking()
    }

    /// Whether the element is being swiped.
    #[must_use]
    pub fn is_swiping(&self) -> bool {
        self.tracker.is_swiping()
    }

    /// Number of exit animations still running.
    #[must_use]
    pub fn exits_in_flight(&self) -> usize {
        self.exits.len()
    }

    /// Forget the cached element width, e.g. after a relayout.
    pub fn invalidate_width(&mut self) {
        self.tracker.invalidate_width();
    }

    /// Resume or pause watching for swipes.
    ///
    /// Pausing abandons the active session and puts the element back to
    /// rest, so resuming starts clean.
    pub fn set_enabled<H: ElementHost + ?Sized>(&mut self, enabled: bool, host: &mut H) {
        self.paused = !enabled;
        if self.paused && self.tracker.cancel() {
            tracing::debug!(element = %self.element, "Swipe abandoned by pause");
            reset_transform(host, self.element);
        }
    }

    /// Handle a pointer event. Returns whether the event was consumed.
    pub fn on_touch<H>(&mut self, event: &PointerEvent, host: &mut H) -> bool
    where
        H: ElementHost + AnimationEngine + ?Sized,
    {
        let element = self.element;
        self.tracker.resolve_width(|| host.width(element));

        match event.phase {
            PointerPhase::Down => self.on_down(event, host),
            PointerPhase::Move => self.on_move(event, host),
            PointerPhase::Up => {
                self.on_up(event, host);
                false
            }
            PointerPhase::Cancel => {
                if self.tracker.cancel() {
                    reset_transform(host, element);
                }
                false
            }
        }
    }

    fn on_down<H>(&mut self, event: &PointerEvent, host: &mut H) -> bool
    where
        H: ElementHost + ?Sized,
    {
        if self.paused {
            return false;
        }

        if self.callbacks.can_dismiss(&self.token) {
            self.tracker.press(event);
        } else {
            self.tracker.cancel();
            tracing::debug!(element = %self.element, "Element not dismissable");
        }

        host.forward_touch(self.element, event);
        true
    }

    fn on_move<H>(&mut self, event: &PointerEvent, host: &mut H) -> bool
    where
        H: ElementHost + ?Sized,
    {
        match self.tracker.drag(event) {
            DragOutcome::Swiping { started, frame } => {
                if started {
                    host.disallow_intercept(self.element);
                    host.cancel_touch(self.element, &event.with_phase(PointerPhase::Cancel));
                }
                host.set_translation_x(self.element, frame.translation_x);
                host.set_alpha(self.element, frame.alpha);
                true
            }
            DragOutcome::Tracking | DragOutcome::Ignored => false,
        }
    }

    fn on_up<H>(&mut self, event: &PointerEvent, host: &mut H)
    where
        H: AnimationEngine + ?Sized,
    {
        let Some(release) = self.tracker.release(event) else {
            return;
        };
        let duration = self.tracker.config().animation_duration;

        match release.decision {
            Decision::Dismiss(direction) => {
                let ticket = self.tickets.issue();
                self.exits.insert(ticket, ExitStage::Sliding);
                tracing::info!(element = %self.element, ?direction, "Dismissing element");
                host.start(
                    self.element,
                    Animation::exit(direction, self.tracker.width(), duration),
                    Some(ticket),
                );
            }
            Decision::Cancel => {
                host.start(self.element, Animation::snap_back(duration), None);
            }
        }
    }

    /// Handle completion of an animation this recognizer started.
    ///
    /// Returns false for tickets it does not know, which are ignored.
    pub fn on_animation_end<H>(&mut self, ticket: AnimationTicket, host: &mut H) -> bool
    where
        H: ElementHost + AnimationEngine + ?Sized,
    {
        let Some(stage) = self.exits.remove(&ticket) else {
            tracing::debug!(%ticket, "Ignoring unknown animation completion");
            return false;
        };

        match stage {
            ExitStage::Sliding => {
                let original_height = host.height(self.element);
                let next = self.tickets.issue();
                self.exits
                    .insert(next, ExitStage::Collapsing { original_height });
                host.start(
                    self.element,
                    Animation::collapse(original_height, self.tracker.config().animation_duration),
                    Some(next),
                );
            }
            ExitStage::Collapsing { original_height } => {
                self.callbacks.on_dismiss(self.element, &self.token);
                reset_transform(host, self.element);
                host.set_height(self.element, original_height);
            }
        }
        true
    }
}
