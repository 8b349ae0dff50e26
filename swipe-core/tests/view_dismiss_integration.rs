//! Single-Card Swipe Integration Tests
//!
//! Tests the full swipe-to-dismiss flow for one card:
//! - Displacement and fling dismissals
//! - Snap-back on short releases and taps
//! - Exit animation chain (slide → collapse → callback → restore)
//! - Pause and explicit cancel handling

mod common;

use common::{drag, CardRecorder, RecordingHost, ROW_HEIGHT, ROW_WIDTH};
use swipe_core::{Animation, PointerEvent, PointerPhase, SwipeConfig, SwipeDismissView};

fn card(host: &RecordingHost) -> SwipeDismissView<String, CardRecorder> {
    SwipeDismissView::new(
        host.rows[0].id,
        "card-42".to_string(),
        SwipeConfig::default(),
        CardRecorder::default(),
    )
}

// ============================================================================
// Dismissal
// ============================================================================

#[test]
fn test_drag_past_half_width_dismisses_right() {
    let mut host = RecordingHost::single();
    let mut view = card(&host);
    let element = view.element();

    let (down, moves) = drag(100.0, 40.0, 250.0, 5, 0);
    assert!(view.on_touch(&down, &mut host));
    for event in &moves {
        assert!(view.on_touch(event, &mut host));
    }
    assert!(view.is_swiping());
    assert!((host.row_by_id(element).translation_x - 250.0).abs() < f32::EPSILON);
    assert!(host.row_by_id(element).alpha.abs() < f32::EPSILON);

    // Pointer rests before release, so only displacement counts.
    assert!(!view.on_touch(&PointerEvent::up(350.0, 40.0, 200), &mut host));
    assert!(!view.is_tracking());

    let exit = host.last_started();
    assert_eq!(
        exit.animation,
        Animation::exit(
            swipe_core::Direction::Right,
            ROW_WIDTH,
            SwipeConfig::default().animation_duration
        )
    );
    assert_eq!(view.exits_in_flight(), 1);

    // Slide finished: the card collapses.
    let slide = exit.ticket.expect("exit slide has a ticket");
    assert!(view.on_animation_end(slide, &mut host));
    let collapse = host.last_started();
    assert!(matches!(
        collapse.animation,
        Animation::Collapse { from_height, to_height, .. }
            if (from_height - ROW_HEIGHT).abs() < f32::EPSILON && (to_height - 1.0).abs() < f32::EPSILON
    ));
    assert!(view.callbacks().dismissed.is_empty());

    // Collapse finished: callback, then presentation restored.
    let collapse_ticket = collapse.ticket.expect("collapse has a ticket");
    assert!(view.on_animation_end(collapse_ticket, &mut host));
    assert_eq!(view.callbacks().dismissed, vec![(element, "card-42".to_string())]);

    let row = host.row_by_id(element);
    assert!(row.translation_x.abs() < f32::EPSILON);
    assert!((row.alpha - 1.0).abs() < f32::EPSILON);
    assert!((row.height - ROW_HEIGHT).abs() < f32::EPSILON);
    assert_eq!(view.exits_in_flight(), 0);
}

#[test]
fn test_fling_dismisses_left() {
    let mut host = RecordingHost::single();
    let mut view = card(&host);

    let (down, moves) = drag(300.0, 40.0, -60.0, 3, 0);
    view.on_touch(&down, &mut host);
    for event in &moves {
        view.on_touch(event, &mut host);
    }
    view.on_touch(&PointerEvent::up(220.0, 40.0, 40), &mut host);

    let exit = host.last_started();
    assert!(exit.ticket.is_some());
    assert!(matches!(
        exit.animation,
        Animation::Slide { translation_x, alpha, .. }
            if (translation_x + ROW_WIDTH).abs() < f32::EPSILON && alpha.abs() < f32::EPSILON
    ));
}

#[test]
fn test_steep_drag_still_swipes_single_card() {
    let mut host = RecordingHost::single();
    let mut view = card(&host);

    view.on_touch(&PointerEvent::down(100.0, 40.0, 0), &mut host);
    assert!(view.on_touch(&PointerEvent::moved(130.0, 100.0, 10), &mut host));
    assert!(view.is_swiping());
}

// ============================================================================
// Cancel paths
// ============================================================================

#[test]
fn test_tap_never_dismisses() {
    let mut host = RecordingHost::single();
    let mut view = card(&host);

    for round in 0..3u64 {
        let t = round * 1000;
        assert!(view.on_touch(&PointerEvent::down(200.0, 40.0, t), &mut host));
        assert!(!view.on_touch(&PointerEvent::up(200.0, 40.0, t + 50), &mut host));
    }

    assert!(view.callbacks().dismissed.is_empty());
    assert_eq!(view.exits_in_flight(), 0);
    // Every release snapped back without waiting for completion.
    assert!(host.started.iter().all(|s| s.ticket.is_none()));
    assert_eq!(host.forwarded.len(), 3);
}

#[test]
fn test_short_slow_release_snaps_back() {
    let mut host = RecordingHost::single();
    let mut view = card(&host);
    let element = view.element();

    let (down, moves) = drag(200.0, 40.0, 60.0, 6, 0);
    view.on_touch(&down, &mut host);
    for event in &moves {
        view.on_touch(event, &mut host);
    }
    view.on_touch(&PointerEvent::up(260.0, 40.0, 300), &mut host);

    let started = host.last_started();
    assert_eq!(started.animation, Animation::snap_back(SwipeConfig::default().animation_duration));
    assert!(started.ticket.is_none());
    let row = host.row_by_id(element);
    assert!(row.translation_x.abs() < f32::EPSILON);
    assert!((row.alpha - 1.0).abs() < f32::EPSILON);
}

#[test]
fn test_explicit_cancel_restores_identity() {
    let mut host = RecordingHost::single();
    let mut view = card(&host);
    let element = view.element();

    let (down, moves) = drag(100.0, 40.0, 120.0, 4, 0);
    view.on_touch(&down, &mut host);
    for event in &moves {
        view.on_touch(event, &mut host);
    }
    assert!(host.row_by_id(element).translation_x > 0.0);

    assert!(!view.on_touch(&PointerEvent::cancel(220.0, 40.0, 50), &mut host));
    let row = host.row_by_id(element);
    assert!(row.translation_x.abs() < f32::EPSILON);
    assert!((row.alpha - 1.0).abs() < f32::EPSILON);
    assert!(host.started.is_empty());
    assert!(!view.is_tracking());

    // The release that follows is a no-op.
    assert!(!view.on_touch(&PointerEvent::up(220.0, 40.0, 60), &mut host));
    assert!(host.started.is_empty());
}

// ============================================================================
// Gesture ownership
// ============================================================================

#[test]
fn test_swipe_takes_pointer_ownership() {
    let mut host = RecordingHost::single();
    let mut view = card(&host);
    let element = view.element();

    view.on_touch(&PointerEvent::down(100.0, 40.0, 0), &mut host);
    assert!(!view.on_touch(&PointerEvent::moved(104.0, 40.0, 10), &mut host));
    assert!(host.intercept_disallowed.is_empty());

    assert!(view.on_touch(&PointerEvent::moved(130.0, 40.0, 20), &mut host));
    assert_eq!(host.intercept_disallowed, vec![element]);
    assert_eq!(host.cancelled.len(), 1);
    assert_eq!(host.cancelled[0].0, element);
    assert_eq!(host.cancelled[0].1.phase, PointerPhase::Cancel);

    // Ownership is only asserted once per session.
    view.on_touch(&PointerEvent::moved(150.0, 40.0, 30), &mut host);
    assert_eq!(host.intercept_disallowed.len(), 1);
}

#[test]
fn test_not_dismissable_passes_through() {
    let mut host = RecordingHost::single();
    let mut view = card(&host);
    view.callbacks_mut().dismissable = false;

    assert!(view.on_touch(&PointerEvent::down(100.0, 40.0, 0), &mut host));
    assert_eq!(view.callbacks().asked, 1);
    assert!(!view.is_tracking());
    assert_eq!(host.forwarded.len(), 1);

    assert!(!view.on_touch(&PointerEvent::moved(350.0, 40.0, 10), &mut host));
    assert!(!view.on_touch(&PointerEvent::up(390.0, 40.0, 20), &mut host));
    assert!(host.started.is_empty());
}

// ============================================================================
// Pause and stale completions
// ============================================================================

#[test]
fn test_paused_press_not_consumed() {
    let mut host = RecordingHost::single();
    let mut view = card(&host);

    view.set_enabled(false, &mut host);
    assert!(view.is_paused());
    assert!(!view.on_touch(&PointerEvent::down(100.0, 40.0, 0), &mut host));
    assert!(!view.is_tracking());
    assert_eq!(view.callbacks().asked, 0);
    assert!(host.forwarded.is_empty());
}

#[test]
fn test_pause_mid_swipe_discards_session() {
    let mut host = RecordingHost::single();
    let mut view = card(&host);
    let element = view.element();

    let (down, moves) = drag(100.0, 40.0, 260.0, 4, 0);
    view.on_touch(&down, &mut host);
    for event in &moves {
        view.on_touch(event, &mut host);
    }

    view.set_enabled(false, &mut host);
    assert!(host.row_by_id(element).translation_x.abs() < f32::EPSILON);
    view.set_enabled(true, &mut host);

    // The release from before the pause does nothing.
    assert!(!view.on_touch(&PointerEvent::up(360.0, 40.0, 300), &mut host));
    assert!(host.started.is_empty());
    assert!(view.callbacks().dismissed.is_empty());
}

#[test]
fn test_unknown_ticket_ignored() {
    let mut host = RecordingHost::single();
    let mut view = card(&host);

    // Produce a real ticket on another recognizer so the value is plausible.
    let mut other = card(&host);
    let (down, moves) = drag(100.0, 40.0, 300.0, 3, 0);
    other.on_touch(&down, &mut host);
    for event in &moves {
        other.on_touch(event, &mut host);
    }
    other.on_touch(&PointerEvent::up(400.0, 40.0, 500), &mut host);
    let foreign = host.last_started().ticket.expect("ticket");

    assert!(!view.on_animation_end(foreign, &mut host));
    assert!(view.callbacks().dismissed.is_empty());
}
