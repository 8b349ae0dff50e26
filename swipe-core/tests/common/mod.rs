//! Shared test fixtures: a recording host and recording callbacks.

#![allow(dead_code)]

use std::collections::HashSet;

use swipe_core::{
    Animation, AnimationEngine, AnimationTicket, DismissCallbacks, ElementHost, ElementId,
    ListDismissCallbacks, ListHost, PointerEvent, Rect,
};

/// A realized row (or a lone card) with its live presentation.
#[derive(Debug, Clone)]
pub struct Row {
    pub id: ElementId,
    pub bounds: Rect,
    pub position: usize,
    pub translation_x: f32,
    pub alpha: f32,
    pub height: f32,
}

/// An animation the recognizer asked for.
#[derive(Debug, Clone, Copy)]
pub struct Started {
    pub element: ElementId,
    pub animation: Animation,
    pub ticket: Option<AnimationTicket>,
}

/// Host that records every request and applies presentation changes to
/// its rows.
#[derive(Debug)]
pub struct RecordingHost {
    pub container: ElementId,
    pub origin: (f32, f32),
    pub width: f32,
    pub rows: Vec<Row>,
    pub started: Vec<Started>,
    pub forwarded: Vec<(ElementId, PointerEvent)>,
    pub cancelled: Vec<(ElementId, PointerEvent)>,
    pub intercept_disallowed: Vec<ElementId>,
    pub container_cancels: usize,
}

pub const ROW_WIDTH: f32 = 400.0;
pub const ROW_HEIGHT: f32 = 80.0;

impl RecordingHost {
    /// A list at `origin` with one row per position, stacked top to bottom.
    pub fn list(origin: (f32, f32), positions: &[usize]) -> Self {
        let rows = positions
            .iter()
            .enumerate()
            .map(|(index, &position)| {
                #[allow(clippy::cast_precision_loss)]
                let top = index as f32 * ROW_HEIGHT;
                Row {
                    id: ElementId::new(),
                    bounds: Rect::new(0.0, top, ROW_WIDTH, ROW_HEIGHT),
                    position,
                    translation_x: 0.0,
                    alpha: 1.0,
                    height: ROW_HEIGHT,
                }
            })
            .collect();

        Self {
            container: ElementId::new(),
            origin,
            width: ROW_WIDTH,
            rows,
            started: Vec::new(),
            forwarded: Vec::new(),
            cancelled: Vec::new(),
            intercept_disallowed: Vec::new(),
            container_cancels: 0,
        }
    }

    /// A host holding a single card at the screen origin.
    pub fn single() -> Self {
        Self::list((0.0, 0.0), &[0])
    }

    pub fn row(&self, position: usize) -> &Row {
        self.rows
            .iter()
            .find(|r| r.position == position)
            .expect("row for position")
    }

    pub fn row_by_id(&self, id: ElementId) -> &Row {
        self.rows.iter().find(|r| r.id == id).expect("row for id")
    }

    fn row_mut(&mut self, id: ElementId) -> Option<&mut Row> {
        self.rows.iter_mut().find(|r| r.id == id)
    }

    /// Screen-space centre of the row at `position`.
    pub fn centre_of(&self, position: usize) -> (f32, f32) {
        let bounds = self.row(position).bounds;
        (
            self.origin.0 + bounds.x + bounds.width / 2.0,
            self.origin.1 + bounds.y + bounds.height / 2.0,
        )
    }

    /// Tickets of every ticketed animation started so far, in start order.
    pub fn tickets(&self) -> Vec<AnimationTicket> {
        self.started.iter().filter_map(|s| s.ticket).collect()
    }

    /// The ticket of the most recent animation started on `element`.
    pub fn last_ticket_for(&self, element: ElementId) -> AnimationTicket {
        self.started
            .iter()
            .rev()
            .filter(|s| s.element == element)
            .find_map(|s| s.ticket)
            .expect("ticketed animation for element")
    }

    pub fn last_started(&self) -> Started {
        *self.started.last().expect("an animation was started")
    }
}

impl ElementHost for RecordingHost {
    fn width(&self, element: ElementId) -> f32 {
        self.rows
            .iter()
            .find(|r| r.id == element)
            .map_or(self.width, |r| r.bounds.width)
    }

    fn height(&self, element: ElementId) -> f32 {
        self.rows
            .iter()
            .find(|r| r.id == element)
            .map_or(0.0, |r| r.height)
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

    fn disallow_intercept(&mut self, element: ElementId) {
        self.intercept_disallowed.push(element);
    }

    fn cancel_touch(&mut self, element: ElementId, cancel: &PointerEvent) {
        self.cancelled.push((element, *cancel));
    }

    fn forward_touch(&mut self, element: ElementId, event: &PointerEvent) {
        self.forwarded.push((element, *event));
    }
}

impl ListHost for RecordingHost {
    fn origin_on_screen(&self) -> (f32, f32) {
        self.origin
    }

    fn container_width(&self) -> f32 {
        self.width
    }

    fn child_count(&self) -> usize {
        self.rows.len()
    }

    fn child_at(&self, index: usize) -> Option<(ElementId, Rect)> {
        self.rows.get(index).map(|r| (r.id, r.bounds))
    }

    fn position_for(&self, element: ElementId) -> Option<usize> {
        self.rows.iter().find(|r| r.id == element).map(|r| r.position)
    }

    fn dispatch_cancel(&mut self) {
        self.container_cancels += 1;
    }
}

impl AnimationEngine for RecordingHost {
    fn start(&mut self, element: ElementId, animation: Animation, ticket: Option<AnimationTicket>) {
        // Jump straight to the end values; completion is reported by the test.
        match animation {
            Animation::Slide {
                translation_x,
                alpha,
                ..
            } => {
                self.set_translation_x(element, translation_x);
                self.set_alpha(element, alpha);
            }
            Animation::Collapse { to_height, .. } => self.set_height(element, to_height),
        }
        self.started.push(Started {
            element,
            animation,
            ticket,
        });
    }
}

/// Records list dismissals.
#[derive(Debug, Default)]
pub struct ListRecorder {
    pub blocked: HashSet<usize>,
    pub asked: Vec<usize>,
    pub batches: Vec<Vec<usize>>,
    pub containers: Vec<ElementId>,
}

impl ListDismissCallbacks for ListRecorder {
    fn can_dismiss(&mut self, position: usize) -> bool {
        self.asked.push(position);
        !self.blocked.contains(&position)
    }

    fn on_dismiss(&mut self, container: ElementId, positions: &[usize]) {
        self.containers.push(container);
        self.batches.push(positions.to_vec());
    }
}

/// Records single-card dismissals.
#[derive(Debug)]
pub struct CardRecorder {
    pub dismissable: bool,
    pub asked: usize,
    pub dismissed: Vec<(ElementId, String)>,
}

impl Default for CardRecorder {
    fn default() -> Self {
        Self {
            dismissable: true,
            asked: 0,
            dismissed: Vec::new(),
        }
    }
}

impl DismissCallbacks<String> for CardRecorder {
    fn can_dismiss(&mut self, _token: &String) -> bool {
        self.asked += 1;
        self.dismissable
    }

    fn on_dismiss(&mut self, element: ElementId, token: &String) {
        self.dismissed.push((element, token.clone()));
    }
}

/// A horizontal drag from `(x, y)` by `dx`, in `steps` moves 10 ms apart,
/// starting at `t0`. Returns the down event and the moves.
pub fn drag(x: f32, y: f32, dx: f32, steps: u32, t0: u64) -> (PointerEvent, Vec<PointerEvent>) {
    let down = PointerEvent::down(x, y, t0);
    let moves = (1..=steps)
        .map(|i| {
            #[allow(clippy::cast_precision_loss)]
            let fraction = i as f32 / steps as f32;
            PointerEvent::moved(x + dx * fraction, y, t0 + u64::from(i) * 10)
        })
        .collect();
    (down, moves)
}
