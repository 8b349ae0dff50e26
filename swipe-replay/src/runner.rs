//! Runs a script through a recognizer and collects the outcome.

use std::collections::HashSet;

use serde::Serialize;
use swipe_core::{
    AnimationTicket, DismissCallbacks, ElementId, ListDismissCallbacks, PointerEvent, ScrollState,
    SwipeConfig, SwipeDismissList, SwipeDismissView,
};

use crate::error::{ReplayError, ReplayResult};
use crate::host::{SimRow, SimulatedHost, TouchStats};
use crate::script::{Mode, Script, Step};

/// Records dismissals for the report.
#[derive(Debug, Default)]
pub struct ReplayCallbacks {
    locked: HashSet<usize>,
    dismissed: Vec<Vec<usize>>,
}

impl ListDismissCallbacks for ReplayCallbacks {
    fn can_dismiss(&mut self, position: usize) -> bool {
        !self.locked.contains(&position)
    }

    fn on_dismiss(&mut self, _container: ElementId, positions: &[usize]) {
        tracing::info!(?positions, "Rows dismissed");
        self.dismissed.push(positions.to_vec());
    }
}

impl DismissCallbacks<usize> for ReplayCallbacks {
    fn can_dismiss(&mut self, position: &usize) -> bool {
        !self.locked.contains(position)
    }

    fn on_dismiss(&mut self, element: ElementId, position: &usize) {
        tracing::info!(%element, position, "Card dismissed");
        self.dismissed.push(vec![*position]);
    }
}

enum Recognizer {
    View(SwipeDismissView<usize, ReplayCallbacks>),
    List(SwipeDismissList<ReplayCallbacks>),
}

impl Recognizer {
    fn on_touch(&mut self, event: &PointerEvent, host: &mut SimulatedHost) -> bool {
        match self {
            Self::View(view) => view.on_touch(event, host),
            Self::List(list) => list.on_touch(event, host),
        }
    }

    fn on_animation_end(&mut self, ticket: AnimationTicket, host: &mut SimulatedHost) {
        match self {
            Self::View(view) => view.on_animation_end(ticket, host),
            Self::List(list) => list.on_animation_end(ticket, host),
        };
    }

    fn set_enabled(&mut self, enabled: bool, host: &mut SimulatedHost) {
        match self {
            Self::View(view) => view.set_enabled(enabled, host),
            Self::List(list) => list.set_enabled(enabled, host),
        }
    }

    fn on_scroll_state_changed(&mut self, state: ScrollState, host: &mut SimulatedHost) {
        match self {
            Self::View(view) => view.set_enabled(state != ScrollState::TouchScroll, host),
            Self::List(list) => list.on_scroll_state_changed(state, host),
        }
    }

    fn into_dismissed(self) -> Vec<Vec<usize>> {
        match self {
            Self::View(mut view) => std::mem::take(&mut view.callbacks_mut().dismissed),
            Self::List(mut list) => std::mem::take(&mut list.callbacks_mut().dismissed),
        }
    }
}

/// Outcome of a replay.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// Whether each pointer event was consumed, in script order.
    pub consumed: Vec<bool>,
    /// Dismissal reports, one entry per callback.
    pub dismissed: Vec<Vec<usize>>,
    /// Final presentation of every row.
    pub rows: Vec<SimRow>,
    /// Host-side touch plumbing counters.
    pub touches: TouchStats,
    /// Virtual time once every animation settled.
    pub finished_at_ms: u64,
}

/// Replay `script` with `config`.
///
/// Pointer events advance virtual time to their timestamp before delivery.
/// After the last step, time runs on until every animation has finished.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or a view script has
/// no card.
pub fn run(script: &Script, config: SwipeConfig) -> ReplayResult<Report> {
    config.validate()?;

    let mut host = SimulatedHost::from_script(script);
    let callbacks = ReplayCallbacks {
        locked: script.locked.iter().copied().collect(),
        dismissed: Vec::new(),
    };

    let mut recognizer = match script.mode {
        Mode::View => {
            let card = host.rows().first().ok_or(ReplayError::EmptyScene)?;
            Recognizer::View(SwipeDismissView::new(card.id, card.position, config, callbacks))
        }
        Mode::List => Recognizer::List(SwipeDismissList::new(host.container(), config, callbacks)),
    };

    tracing::info!(mode = ?script.mode, steps = script.steps.len(), "Replaying script");

    let mut consumed = Vec::new();
    for step in &script.steps {
        match step {
            Step::Pointer(event) => {
                deliver(&mut recognizer, &mut host, event.timestamp_ms);
                let handled = recognizer.on_touch(event, &mut host);
                tracing::debug!(phase = ?event.phase, x = event.x, y = event.y, handled, "Pointer");
                consumed.push(handled);
            }
            Step::Advance { ms } => {
                let until = host.now_ms() + ms;
                deliver(&mut recognizer, &mut host, until);
            }
            Step::Scroll { state } => recognizer.on_scroll_state_changed(*state, &mut host),
            Step::Enable => recognizer.set_enabled(true, &mut host),
            Step::Disable => recognizer.set_enabled(false, &mut host),
        }
    }

    // Collapses start when slides finish, so keep going until nothing runs.
    while let Some(deadline) = host.next_deadline() {
        deliver(&mut recognizer, &mut host, deadline);
    }

    Ok(Report {
        consumed,
        dismissed: recognizer.into_dismissed(),
        rows: host.rows().to_vec(),
        touches: host.stats(),
        finished_at_ms: host.now_ms(),
    })
}

/// Run the clock up to `until_ms`, stopping at every animation deadline on
/// the way so follow-on animations start when their predecessor ended.
fn deliver(recognizer: &mut Recognizer, host: &mut SimulatedHost, until_ms: u64) {
    while let Some(deadline) = host.next_deadline().filter(|d| *d <= until_ms) {
        for ticket in host.advance_to(deadline) {
            recognizer.on_animation_end(ticket, host);
        }
    }
    for ticket in host.advance_to(until_ms) {
        recognizer.on_animation_end(ticket, host);
    }
}
