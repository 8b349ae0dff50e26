//! Host seams: the view layer the recognizers drive.
//!
//! The recognizers never own views. They receive the host by mutable
//! reference with every event and every animation completion, and tell it
//! what to render.

use crate::element::{ElementId, Rect};
use crate::event::PointerEvent;

/// Live presentation and touch plumbing for interactive elements.
pub trait ElementHost {
    /// Current laid-out width of an element.
    fn width(&self, element: ElementId) -> f32;

    /// Current laid-out height of an element.
    fn height(&self, element: ElementId) -> f32;

    /// Set the horizontal translation of an element.
    fn set_translation_x(&mut self, element: ElementId, translation_x: f32);

    /// Set the opacity of an element.
    fn set_alpha(&mut self, element: ElementId, alpha: f32);

    /// Set the height of an element.
    fn set_height(&mut self, element: ElementId, height: f32);

    /// Stop the element's ancestors from intercepting the rest of this
    /// pointer sequence (scrolling, paging).
    fn disallow_intercept(&mut self, element: ElementId);

    /// Deliver a synthesized cancellation so the element drops its pressed
    /// or selected state.
    fn cancel_touch(&mut self, element: ElementId, cancel: &PointerEvent);

    /// Let the element run its own default handling of `event` (press
    /// highlighting, click detection).
    fn forward_touch(&mut self, element: ElementId, event: &PointerEvent);
}

/// A scrolling list container whose realized rows can be hit-tested.
pub trait ListHost: ElementHost {
    /// Screen position of the container's top-left corner.
    fn origin_on_screen(&self) -> (f32, f32);

    /// Width of the container.
    fn container_width(&self) -> f32;

    /// Number of currently realized rows.
    fn child_count(&self) -> usize;

    /// Realized row at `index` and its bounds in container coordinates.
    fn child_at(&self, index: usize) -> Option<(ElementId, Rect)>;

    /// Adapter position of a realized row.
    fn position_for(&self, element: ElementId) -> Option<usize>;

    /// Send a cancellation to the whole container after a dismiss batch,
    /// clearing any pressed state the removed rows left behind.
    fn dispatch_cancel(&mut self);
}

/// Put an element back to rest: no translation, fully opaque.
pub(crate) fn reset_transform<H: ElementHost + ?Sized>(host: &mut H, element: ElementId) {
    host.set_translation_x(element, 0.0);
    host.set_alpha(element, 1.0);
}

/// Find the first realized row containing a screen-space point.
///
/// Rows are scanned in realization order, so the cost is proportional to
/// the number of on-screen rows.
pub fn hit_test<H: ListHost + ?Sized>(host: &H, screen_x: f32, screen_y: f32) -> Option<ElementId> {
    let (origin_x, origin_y) = host.origin_on_screen();
    let (x, y) = (screen_x - origin_x, screen_y - origin_y);

    (0..host.child_count())
        .filter_map(|index| host.child_at(index))
        .find(|(_, bounds)| bounds.contains(x, y))
        .map(|(element, _)| element)
}
