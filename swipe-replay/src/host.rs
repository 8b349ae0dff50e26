//! Simulated host: rows with live presentation and a frame-clocked
//! animation engine driven by virtual time.

use serde::Serialize;
use swipe_core::{
    Animation, AnimationEngine, AnimationTicket, ElementHost, ElementId, ListHost, PointerEvent,
    Rect,
};

use crate::script::Script;

/// A row and its current presentation.
#[derive(Debug, Clone, Serialize)]
pub struct SimRow {
    /// Row element.
    #[serde(skip)]
    pub id: ElementId,
    /// Adapter position.
    pub position: usize,
    /// Bounds in container coordinates.
    pub bounds: Rect,
    /// Horizontal translation.
    pub translation_x: f32,
    /// Opacity.
    pub alpha: f32,
    /// Current height.
    pub height: f32,
}

#[derive(Debug, Clone, Copy)]
struct Running {
    element: ElementId,
    animation: Animation,
    from: (f32, f32),
    started_ms: u64,
    ticket: Option<AnimationTicket>,
}

impl Running {
    #[allow(clippy::cast_possible_truncation)] // Durations are a few hundred ms
    fn ends_ms(&self) -> u64 {
        self.started_ms + self.animation.duration().as_millis() as u64
    }

    #[allow(clippy::cast_precision_loss)]
    fn progress(&self, now_ms: u64) -> f32 {
        let total = self.ends_ms() - self.started_ms;
        if total == 0 {
            return 1.0;
        }
        (now_ms.saturating_sub(self.started_ms) as f32 / total as f32).min(1.0)
    }

    fn same_kind(&self, element: ElementId, animation: &Animation) -> bool {
        self.element == element
            && std::mem::discriminant(&self.animation) == std::mem::discriminant(animation)
    }
}

fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}

/// Counters of host-side touch plumbing.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct TouchStats {
    /// Presses handed to default handling.
    pub forwarded: usize,
    /// Synthesized cancellations delivered to elements.
    pub cancelled: usize,
    /// Times a swipe claimed the pointer from its ancestors.
    pub intercepts_disallowed: usize,
    /// Container-wide cancellations after dismiss batches.
    pub container_cancels: usize,
}

/// In-memory host for replaying scripts.
#[derive(Debug)]
pub struct SimulatedHost {
    container: ElementId,
    bounds: Rect,
    rows: Vec<SimRow>,
    now_ms: u64,
    running: Vec<Running>,
    interrupted: Vec<AnimationTicket>,
    stats: TouchStats,
}

impl SimulatedHost {
    /// Build the scene described by a script.
    #[must_use]
    pub fn from_script(script: &Script) -> Self {
        let rows: Vec<SimRow> = script
            .rows
            .iter()
            .enumerate()
            .map(|(position, bounds)| SimRow {
                id: ElementId::new(),
                position,
                bounds: *bounds,
                translation_x: 0.0,
                alpha: 1.0,
                height: bounds.height,
            })
            .collect();

        let bounds = if script.container.is_empty() {
            let width = rows
                .iter()
                .map(|r| r.bounds.x + r.bounds.width)
                .fold(0.0_f32, f32::max);
            let height = rows
                .iter()
                .map(|r| r.bounds.y + r.bounds.height)
                .fold(0.0_f32, f32::max);
            Rect::new(script.container.x, script.container.y, width, height)
        } else {
            script.container
        };

        Self {
            container: ElementId::new(),
            bounds,
            rows,
            now_ms: 0,
            running: Vec::new(),
            interrupted: Vec::new(),
            stats: TouchStats::default(),
        }
    }

    /// The container element.
    #[must_use]
    pub const fn container(&self) -> ElementId {
        self.container
    }

    /// All rows.
    #[must_use]
    pub fn rows(&self) -> &[SimRow] {
        &self.rows
    }

    /// Current virtual time.
    #[must_use]
    pub const fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Touch plumbing counters.
    #[must_use]
    pub const fn stats(&self) -> TouchStats {
        self.stats
    }

    /// Number of animations still running.
    #[must_use]
    pub fn running(&self) -> usize {
        self.running.len()
    }

    /// End time of the earliest running animation.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.running.iter().map(Running::ends_ms).min()
    }

    fn row_mut(&mut self, element: ElementId) -> Option<&mut SimRow> {
        self.rows.iter_mut().find(|r| r.id == element)
    }

    fn row(&self, element: ElementId) -> Option<&SimRow> {
        self.rows.iter().find(|r| r.id == element)
    }

    /// Move virtual time forward, applying animation frames.
    ///
    /// Returns the tickets of animations that finished or were interrupted,
    /// interrupted ones first, then in order of completion.
    pub fn advance_to(&mut self, now_ms: u64) -> Vec<AnimationTicket> {
        self.now_ms = self.now_ms.max(now_ms);
        let now = self.now_ms;

        let mut finished: Vec<(u64, AnimationTicket)> = Vec::new();
        let mut still_running = Vec::with_capacity(self.running.len());

        for run in std::mem::take(&mut self.running) {
            let progress = run.progress(now);
            self.apply(&run, progress);
            if progress >= 1.0 {
                if let Some(ticket) = run.ticket {
                    finished.push((run.ends_ms(), ticket));
                }
            } else {
                still_running.push(run);
            }
        }
        self.running = still_running;
        finished.sort_unstable();

        let mut tickets = std::mem::take(&mut self.interrupted);
        tickets.extend(finished.into_iter().map(|(_, ticket)| ticket));
        tickets
    }

    fn apply(&mut self, run: &Running, progress: f32) {
        let Some(row) = self.row_mut(run.element) else {
            return;
        };
        match run.animation {
            Animation::Slide {
                translation_x,
                alpha,
                ..
            } => {
                row.translation_x = lerp(run.from.0, translation_x, progress);
                row.alpha = lerp(run.from.1, alpha, progress);
            }
            Animation::Collapse {
                from_height,
                to_height,
                ..
            } => {
                row.height = lerp(from_height, to_height, progress);
            }
        }
    }
}

impl ElementHost for SimulatedHost {
    fn width(&self, element: ElementId) -> f32 {
        self.row(element).map_or(self.bounds.width, |r| r.bounds.width)
    }

    fn height(&self, element: ElementId) -> f32 {
        self.row(element).map_or(self.bounds.height, |r| r.height)
    }

    fn set_translation_x(&mut self, element: ElementId, translation_x: f32) {
        if let Some(row) = self.row_mut(element) {
            row.translation_x = translation_x;
        }
    }

    fn set_alpha(&mut self, element: ElementId, alpha: f32) {
        if let Some(row) = self.row_mut(element) {
            row.alpha = alpha;
        }
    }

    fn set_height(&mut self, element: ElementId, height: f32) {
        if let Some(row) = self.row_mut(element) {
            row.height = height;
        }
    }

    fn disallow_intercept(&mut self, _element: ElementId) {
        self.stats.intercepts_disallowed += 1;
    }

    fn cancel_touch(&mut self, _element: ElementId, _cancel: &PointerEvent) {
        self.stats.cancelled += 1;
    }

    fn forward_touch(&mut self, _element: ElementId, _event: &PointerEvent) {
        self.stats.forwarded += 1;
    }
}

impl ListHost for SimulatedHost {
    fn origin_on_screen(&self) -> (f32, f32) {
        (self.bounds.x, self.bounds.y)
    }

    fn container_width(&self) -> f32 {
        self.bounds.width
    }

    fn child_count(&self) -> usize {
        self.rows.len()
    }

    fn child_at(&self, index: usize) -> Option<(ElementId, Rect)> {
        self.rows.get(index).map(|r| (r.id, r.bounds))
    }

    fn position_for(&self, element: ElementId) -> Option<usize> {
        self.row(element).map(|r| r.position)
    }

    fn dispatch_cancel(&mut self) {
        self.stats.container_cancels += 1;
    }
}

impl AnimationEngine for SimulatedHost {
    fn start(&mut self, element: ElementId, animation: Animation, ticket: Option<AnimationTicket>) {
        // A new animation of the same kind supersedes the old one, whose
        // completion still fires.
        let (superseded, kept): (Vec<Running>, Vec<Running>) = std::mem::take(&mut self.running)
            .into_iter()
            .partition(|run| run.same_kind(element, &animation));
        self.running = kept;
        self.interrupted
            .extend(superseded.iter().filter_map(|run| run.ticket));

        let from = self.row(element).map_or((0.0, 1.0), |row| match animation {
            Animation::Slide { .. } => (row.translation_x, row.alpha),
            Animation::Collapse { .. } => (row.height, row.height),
        });

        tracing::trace!(%element, ?animation, ?ticket, now_ms = self.now_ms, "Animation started");
        self.running.push(Running {
            element,
            animation,
            from,
            started_ms: self.now_ms,
            ticket,
        });
    }
}
