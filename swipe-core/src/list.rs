//! # List Swipe-to-Dismiss
//!
//! Swipe-to-dismiss for the rows of a scrolling list.
//!
//! A press is first hit-tested against the realized rows. The row under
//! the pointer then goes through the same recognizer as a single element,
//! with a stricter rule set (see [`RecognizerKind::List`]).
//!
//! Several rows may be animating out at once. Reporting each removal as it
//! finishes would shift the positions of the rows still animating, so
//! removals are coalesced: every committed dismissal joins a
//! [`JoinBarrier`], and only when the last exit animation finishes are all
//! positions reported together, sorted in descending order so they can be
//! removed by index one after another.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::animation::{Animation, AnimationEngine, AnimationTicket, TicketCounter};
use crate::barrier::JoinBarrier;
use crate::config::SwipeConfig;
use crate::element::ElementId;
use crate::event::{PointerEvent, PointerPhase, ScrollState};
use crate::host::{hit_test, reset_transform, ElementHost, ListHost};
use crate::recognizer::{Decision, Direction, DragOutcome, RecognizerKind, SwipeTracker};

/// Caller hooks for a list whose rows can be swiped away.
pub trait ListDismissCallbacks {
    /// Whether the row at `position` may currently be swiped away.
    fn can_dismiss(&mut self, position: usize) -> bool;

    /// Rows were swiped away. `positions` is sorted in descending order.
    fn on_dismiss(&mut self, container: ElementId, positions: &[usize]);
}

/// A row whose exit animation finished while its batch is still open.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PendingRemoval {
    /// Adapter position at the time of the swipe.
    pub position: usize,
    /// The row element.
    pub element: ElementId,
}

/// The row a press landed on.
#[derive(Debug, Clone, Copy)]
struct DownTarget {
    element: ElementId,
    /// `None` once invalidated by a flushed batch.
    position: Option<usize>,
}

#[derive(Debug, Clone, Copy)]
enum RowExit {
    Sliding {
        element: ElementId,
        position: usize,
    },
    Collapsing(PendingRemoval),
}

impl RowExit {
    const fn element(&self) -> ElementId {
        match self {
            Self::Sliding { element, .. } | Self::Collapsing(PendingRemoval { element, .. }) => {
                *element
            }
        }
    }
}

/// Swipe-to-dismiss recognizer for a list container.
#[derive(Debug)]
pub struct SwipeDismissList<C> {
    container: ElementId,
    callbacks: C,
    tracker: SwipeTracker,
    paused: bool,
    down: Option<DownTarget>,
    tickets: TicketCounter,
    exits: HashMap<AnimationTicket, RowExit>,
    batch: JoinBarrier<PendingRemoval>,
}

impl<C: ListDismissCallbacks> SwipeDismissList<C> {
    /// Create a recognizer for the list `container`.
    #[must_use]
    pub fn new(container: ElementId, config: SwipeConfig, callbacks: C) -> Self {
        Self {
            container,
            callbacks,
            tracker: SwipeTracker::new(config, RecognizerKind::List),
            paused: false,
            down: None,
            tickets: TicketCounter::default(),
            exits: HashMap::new(),
            batch: JoinBarrier::new(),
        }
    }

    /// The list container.
    #[must_use]
    pub const fn container(&self) -> ElementId {
        self.container
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

    /// Whether a row is being swiped.
    #[must_use]
    pub fn is_swiping(&self) -> bool {
        self.tracker.is_swiping()
    }

    /// The row the current press resolved to, if any.
    #[must_use]
    pub fn down_element(&self) -> Option<ElementId> {
        self.down.map(|d| d.element)
    }

    /// The adapter position of the current press, unless invalidated.
    #[must_use]
    pub fn down_position(&self) -> Option<usize> {
        self.down.and_then(|d| d.position)
    }

    /// Number of dismissals whose exit animations have not finished.
    #[must_use]
    pub const fn dismissals_in_flight(&self) -> usize {
        self.batch.outstanding()
    }

    /// Number of finished removals waiting for the batch to close.
    #[must_use]
    pub fn pending_removals(&self) -> usize {
        self.batch.pending()
    }

    /// Forget the cached container width, e.g. after a relayout.
    pub fn invalidate_width(&mut self) {
        self.tracker.invalidate_width();
    }

    /// Resume or pause watching for swipes.
    ///
    /// Pausing abandons the active session and puts its row back to rest,
    /// so resuming starts clean. Dismissals already committed keep running.
    pub fn set_enabled<H: ElementHost + ?Sized>(&mut self, enabled: bool, host: &mut H) {
        self.paused = !enabled;
        if !self.paused {
            return;
        }

        let was_swiping = self.tracker.is_swiping();
        self.tracker.cancel();
        if let Some(down) = self.down.take() {
            if was_swiping {
                reset_transform(host, down.element);
            }
            tracing::debug!(row = %down.element, "Swipe abandoned by pause");
        }
    }

    /// Forwarded scroll state: swipes are paused while the user drags the
    /// list, so a scroll is never mistaken for a swipe.
    pub fn on_scroll_state_changed<H: ElementHost + ?Sized>(
        &mut self,
        state: ScrollState,
        host: &mut H,
    ) {
        self.set_enabled(state != ScrollState::TouchScroll, host);
    }

    /// Handle a pointer event delivered to the container. Returns whether
    /// the event was consumed.
    pub fn on_touch<H>(&mut self, event: &PointerEvent, host: &mut H) -> bool
    where
        H: ListHost + AnimationEngine + ?Sized,
    {
        self.tracker.resolve_width(|| host.container_width());

        match event.phase {
            PointerPhase::Down => self.on_down(event, host),
            PointerPhase::Move => self.on_move(event, host),
            PointerPhase::Up => self.on_up(event, host),
            PointerPhase::Cancel => {
                self.on_cancel(host);
                false
            }
        }
    }

    fn on_down<H>(&mut self, event: &PointerEvent, host: &mut H) -> bool
    where
        H: ListHost + ?Sized,
    {
        if self.paused {
            return false;
        }

        self.tracker.cancel();
        self.down = None;

        match hit_test(host, event.x, event.y) {
            // A row sliding or collapsing out has already left the list.
            Some(element) if self.is_exiting(element) => {
                tracing::debug!(row = %element, "Press hit a row that is being dismissed");
            }
            Some(element) => {
                let position = host.position_for(element);
                match position {
                    Some(position) if self.callbacks.can_dismiss(position) => {
                        self.tracker.press(event);
                        self.down = Some(DownTarget {
                            element,
                            position: Some(position),
                        });
                    }
                    _ => tracing::debug!(row = %element, ?position, "Row not dismissable"),
                }
            }
            None => tracing::debug!(x = event.x, y = event.y, "Press hit no row"),
        }

        host.forward_touch(self.container, event);
        true
    }

    fn on_move<H>(&mut self, event: &PointerEvent, host: &mut H) -> bool
    where
        H: ListHost + ?Sized,
    {
        if self.paused {
            return false;
        }
        let Some(down) = self.down else {
            return false;
        };

        match self.tracker.drag(event) {
            DragOutcome::Swiping { started, frame } => {
                if started {
                    host.disallow_intercept(self.container);
                    host.cancel_touch(self.container, &event.with_phase(PointerPhase::Cancel));
                }
                host.set_translation_x(down.element, frame.translation_x);
                host.set_alpha(down.element, frame.alpha);
                true
            }
            DragOutcome::Tracking | DragOutcome::Ignored => false,
        }
    }

    fn on_up<H>(&mut self, event: &PointerEvent, host: &mut H) -> bool
    where
        H: ListHost + AnimationEngine + ?Sized,
    {
        let Some(release) = self.tracker.release(event) else {
            return false;
        };
        let down = self.down.take();

        match (release.decision, down) {
            (
                Decision::Dismiss(direction),
                Some(DownTarget {
                    element,
                    position: Some(position),
                }),
            ) => self.dismiss(element, position, direction, host),
            (_, Some(down)) => {
                host.start(
                    down.element,
                    Animation::snap_back(self.tracker.config().animation_duration),
                    None,
                );
            }
            (_, None) => {}
        }

        // A completed swipe must not also register as a click on the row.
        release.was_swiping
    }

    fn on_cancel<H>(&mut self, host: &mut H)
    where
        H: ElementHost + ?Sized,
    {
        if !self.tracker.cancel() {
            return;
        }
        if let Some(down) = self.down.take() {
            reset_transform(host, down.element);
        }
    }

    fn is_exiting(&self, element: ElementId) -> bool {
        self.exits.values().any(|exit| exit.element() == element)
    }

    fn dismiss<H>(&mut self, element: ElementId, position: usize, direction: Direction, host: &mut H)
    where
        H: AnimationEngine + ?Sized,
    {
        self.batch.enter();
        let ticket = self.tickets.issue();
        self.exits.insert(ticket, RowExit::Sliding { element, position });

        tracing::info!(row = %element, position, ?direction, "Dismissing row");
        host.start(
            element,
            Animation::exit(
                direction,
                self.tracker.width(),
                self.tracker.config().animation_duration,
            ),
            Some(ticket),
        );
    }

    /// Handle completion of an animation this recognizer started.
    ///
    /// Returns false for tickets it does not know, which are ignored.
    pub fn on_animation_end<H>(&mut self, ticket: AnimationTicket, host: &mut H) -> bool
    where
        H: ListHost + AnimationEngine + ?Sized,
    {
        let Some(exit) = self.exits.remove(&ticket) else {
            tracing::debug!(%ticket, "Ignoring unknown animation completion");
            return false;
        };

        match exit {
            RowExit::Sliding { element, position } => {
                let height = host.height(element);
                let next = self.tickets.issue();
                self.exits
                    .insert(next, RowExit::Collapsing(PendingRemoval { position, element }));
                host.start(
                    element,
                    Animation::collapse(height, self.tracker.config().animation_duration),
                    Some(next),
                );
            }
            RowExit::Collapsing(removal) => {
                if let Some(batch) = self.batch.complete(removal) {
                    self.flush(batch, host);
                }
            }
        }
        true
    }

    fn flush<H>(&mut self, mut batch: Vec<PendingRemoval>, host: &mut H)
    where
        H: ListHost + ?Sized,
    {
        batch.sort_by(|a, b| b.position.cmp(&a.position));
        let positions: Vec<usize> = batch.iter().map(|r| r.position).collect();

        tracing::info!(?positions, "Flushing dismiss batch");
        self.callbacks.on_dismiss(self.container, &positions);

        // A release still in flight must not dismiss a position that no
        // longer exists.
        if let Some(down) = self.down.as_mut() {
            down.position = None;
        }

        // The rows are gone from the data set; they stay collapsed until the
        // host recycles them.
        for removal in &batch {
            reset_transform(host, removal.element);
            host.set_height(removal.element, 0.0);
        }

        host.dispatch_cancel();
    }
}
