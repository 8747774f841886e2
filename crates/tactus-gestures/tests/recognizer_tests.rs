//! Integration tests against the public recognizer API, driving raw
//! [`TouchEvent`]s without the test robot.

use std::cell::RefCell;
use std::rc::Rc;

use tactus_geometry::Point;
use tactus_gestures::{
    GestureCallbacks, GestureConfig, GestureKind, GestureRecognizer, TouchEvent, TouchPhase,
};

fn start(time_ms: u64, contacts: &[(u64, f32, f32)]) -> TouchEvent {
    TouchEvent::sampled(TouchPhase::Start, time_ms, contacts.iter().copied())
}

fn movement(time_ms: u64, contacts: &[(u64, f32, f32)]) -> TouchEvent {
    TouchEvent::sampled(TouchPhase::Move, time_ms, contacts.iter().copied())
}

fn end(time_ms: u64, contacts: &[(u64, f32, f32)]) -> TouchEvent {
    TouchEvent::sampled(TouchPhase::End, time_ms, contacts.iter().copied())
}

#[test]
fn idle_snapshot_is_neutral() {
    let recognizer = GestureRecognizer::new(GestureConfig::default());
    let state = recognizer.state();

    assert!(!state.is_active);
    assert_eq!(state.kind, GestureKind::None);
    assert_eq!(state.delta, Point::ZERO);
    assert_eq!(state.scale, 1.0);
}

#[test]
fn armed_session_is_active_but_undetermined() {
    let mut recognizer = GestureRecognizer::new(GestureConfig::default());
    recognizer.handle_event(&start(0, &[(0, 100.0, 100.0)]));

    let state = recognizer.state();
    assert!(state.is_active);
    assert_eq!(state.kind, GestureKind::None);
    assert_eq!(state.start_time_ms, 0);
    assert_eq!(state.start_points.len(), 1);
    assert_eq!(state.start_points[0].position, Point::new(100.0, 100.0));
}

#[test]
fn pan_snapshot_tracks_cumulative_delta_and_velocity() {
    let mut recognizer = GestureRecognizer::new(GestureConfig::default());
    recognizer.handle_event(&start(0, &[(0, 100.0, 100.0)]));
    recognizer.handle_event(&movement(10, &[(0, 120.0, 100.0)]));
    recognizer.handle_event(&movement(20, &[(0, 140.0, 110.0)]));

    let state = recognizer.state();
    assert_eq!(state.kind, GestureKind::Pan);
    assert_eq!(state.delta, Point::new(40.0, 10.0));
    // 40px over 20ms along x.
    assert!((state.velocity.x - 2.0).abs() < 1e-6);
}

#[test]
fn pan_move_payload_matches_snapshot() {
    let seen: Rc<RefCell<Vec<(f32, f32)>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let callbacks =
        GestureCallbacks::new().on_pan_move(move |dx, dy, _| sink.borrow_mut().push((dx, dy)));

    let mut recognizer = GestureRecognizer::with_callbacks(GestureConfig::default(), callbacks);
    recognizer.handle_event(&start(0, &[(0, 0.0, 0.0)]));
    recognizer.handle_event(&movement(10, &[(0, 30.0, 0.0)]));
    recognizer.handle_event(&movement(20, &[(0, 45.0, -5.0)]));

    assert_eq!(seen.borrow().as_slice(), &[(30.0, 0.0), (45.0, -5.0)]);
}

#[test]
fn missing_handlers_are_not_an_error() {
    let mut recognizer = GestureRecognizer::new(GestureConfig::default());

    recognizer.handle_event(&start(0, &[(0, 100.0, 100.0)]));
    recognizer.handle_event(&movement(16, &[(0, 200.0, 100.0)]));
    recognizer.handle_event(&end(32, &[]));
    recognizer.advance(1_000);

    assert!(!recognizer.is_active());
}

#[test]
fn set_callbacks_replaces_the_table() {
    let first = Rc::new(RefCell::new(0u32));
    let second = Rc::new(RefCell::new(0u32));

    let sink = Rc::clone(&first);
    let mut recognizer = GestureRecognizer::with_callbacks(
        GestureConfig::default(),
        GestureCallbacks::new().on_tap(move |_| *sink.borrow_mut() += 1),
    );

    let sink = Rc::clone(&second);
    recognizer.set_callbacks(GestureCallbacks::new().on_tap(move |_| *sink.borrow_mut() += 1));

    recognizer.handle_event(&start(0, &[(0, 100.0, 100.0)]));
    recognizer.handle_event(&end(50, &[]));
    recognizer.advance(1_000);

    assert_eq!(*first.borrow(), 0);
    assert_eq!(*second.borrow(), 1);
}

#[test]
fn custom_thresholds_are_honored() {
    let presses = Rc::new(RefCell::new(0u32));
    let pans = Rc::new(RefCell::new(0u32));

    let press_sink = Rc::clone(&presses);
    let pan_sink = Rc::clone(&pans);
    let config = GestureConfig::new()
        .with_long_press_timeout_ms(200)
        .with_move_threshold(50.0);
    let mut recognizer = GestureRecognizer::with_callbacks(
        config,
        GestureCallbacks::new()
            .on_long_press(move |_| *press_sink.borrow_mut() += 1)
            .on_pan_start(move |_| *pan_sink.borrow_mut() += 1),
    );

    // 30px of travel is under the raised 50px threshold.
    recognizer.handle_event(&start(0, &[(0, 100.0, 100.0)]));
    recognizer.handle_event(&movement(50, &[(0, 130.0, 100.0)]));
    assert_eq!(*pans.borrow(), 0);

    // The shortened long-press window fires at 200ms.
    recognizer.advance(200);
    assert_eq!(*presses.borrow(), 1);
}

#[test]
fn timer_fire_after_session_reset_is_a_no_op() {
    let presses = Rc::new(RefCell::new(0u32));
    let sink = Rc::clone(&presses);
    let mut recognizer = GestureRecognizer::with_callbacks(
        GestureConfig::default(),
        GestureCallbacks::new().on_long_press(move |_| *sink.borrow_mut() += 1),
    );

    recognizer.handle_event(&start(0, &[(0, 100.0, 100.0)]));
    recognizer.reset();
    // Even a generous pump can't resurrect the cancelled deadline.
    recognizer.advance(10_000);

    assert_eq!(*presses.borrow(), 0);
}

#[test]
fn double_tap_beats_the_pending_single_tap() {
    let taps = Rc::new(RefCell::new(0u32));
    let doubles = Rc::new(RefCell::new(0u32));

    let tap_sink = Rc::clone(&taps);
    let double_sink = Rc::clone(&doubles);
    let mut recognizer = GestureRecognizer::with_callbacks(
        GestureConfig::default(),
        GestureCallbacks::new()
            .on_tap(move |_| *tap_sink.borrow_mut() += 1)
            .on_double_tap(move |_| *double_sink.borrow_mut() += 1),
    );

    recognizer.handle_event(&start(0, &[(0, 100.0, 100.0)]));
    recognizer.handle_event(&end(40, &[]));
    recognizer.handle_event(&start(140, &[(0, 101.0, 99.0)]));
    recognizer.handle_event(&end(180, &[]));
    recognizer.advance(2_000);

    assert_eq!(*taps.borrow(), 0);
    assert_eq!(*doubles.borrow(), 1);
}

#[test]
fn pinch_with_zero_initial_span_reports_unit_scale() {
    let scales: Rc<RefCell<Vec<f32>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&scales);
    let mut recognizer = GestureRecognizer::with_callbacks(
        GestureConfig::default(),
        GestureCallbacks::new().on_pinch_move(move |_, scale, _| sink.borrow_mut().push(scale)),
    );

    // Both contacts sampled at the same position: span starts at zero.
    recognizer.handle_event(&start(0, &[(0, 100.0, 100.0), (1, 100.0, 100.0)]));
    recognizer.handle_event(&movement(
        16,
        &[(0, 50.0, 100.0), (1, 150.0, 100.0)],
    ));

    assert_eq!(scales.borrow().as_slice(), &[1.0]);
}

#[test]
fn pinch_end_reports_last_confirmed_scale() {
    let ends: Rc<RefCell<Vec<f32>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&ends);
    let mut recognizer = GestureRecognizer::with_callbacks(
        GestureConfig::default(),
        GestureCallbacks::new().on_pinch_end(move |scale| sink.borrow_mut().push(scale)),
    );

    recognizer.handle_event(&start(0, &[(0, 100.0, 100.0), (1, 200.0, 100.0)]));
    recognizer.handle_event(&movement(
        16,
        &[(0, 75.0, 100.0), (1, 225.0, 100.0)],
    ));
    recognizer.handle_event(&end(32, &[(1, 225.0, 100.0)]));

    assert_eq!(ends.borrow().as_slice(), &[1.5]);
}

#[test]
fn events_for_unknown_sessions_are_ignored() {
    let mut recognizer = GestureRecognizer::new(GestureConfig::default());

    // Move/end without any start: nothing to classify, nothing to panic on.
    recognizer.handle_event(&movement(10, &[(0, 100.0, 100.0)]));
    recognizer.handle_event(&end(20, &[]));

    assert!(!recognizer.is_active());
    assert_eq!(recognizer.state().kind, GestureKind::None);
}

#[test]
fn cancel_mid_pan_leaves_no_observable_trace() {
    let ends = Rc::new(RefCell::new(0u32));
    let sink = Rc::clone(&ends);
    let mut recognizer = GestureRecognizer::with_callbacks(
        GestureConfig::default(),
        GestureCallbacks::new().on_pan_end(move |_| *sink.borrow_mut() += 1),
    );

    recognizer.handle_event(&start(0, &[(0, 100.0, 100.0)]));
    recognizer.handle_event(&movement(16, &[(0, 200.0, 100.0)]));
    recognizer.handle_event(&TouchEvent::sampled(TouchPhase::Cancel, 32, std::iter::empty::<(u64, f32, f32)>()));
    recognizer.advance(2_000);

    assert_eq!(*ends.borrow(), 0);
    assert!(!recognizer.is_active());
    assert_eq!(recognizer.state().velocity.x, 0.0);
}
