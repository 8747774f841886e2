//! Scripted walkthrough of the recognizer: feeds a tap, a double-tap, a
//! long-press, a pan and a pinch through one instance and prints what it
//! classified. Run with `cargo run --example gesture_showcase`.

use tactus_geometry::Point;
use tactus_gestures::{
    GestureCallbacks, GestureConfig, GestureRecognizer, TouchEvent, TouchPhase,
};

fn event(phase: TouchPhase, time_ms: u64, contacts: &[(u64, f32, f32)]) -> TouchEvent {
    TouchEvent::sampled(phase, time_ms, contacts.iter().copied())
}

fn main() {
    let callbacks = GestureCallbacks::new()
        .on_tap(|p| println!("tap at ({}, {})", p.position.x, p.position.y))
        .on_double_tap(|p| println!("double-tap at ({}, {})", p.position.x, p.position.y))
        .on_long_press(|p| println!("long-press at ({}, {})", p.position.x, p.position.y))
        .on_pan_start(|p| println!("pan started from ({}, {})", p.position.x, p.position.y))
        .on_pan_move(|dx, dy, v| println!("  pan by ({dx}, {dy}), velocity ({}, {})", v.x, v.y))
        .on_pan_end(|v| println!("pan ended, fling velocity ({}, {})", v.x, v.y))
        .on_pinch_start(|c: Point, span| println!("pinch candidate at ({}, {}), span {span}", c.x, c.y))
        .on_pinch_move(|_, scale, span| println!("  pinch scale {scale:.2}, span {span}"))
        .on_pinch_end(|scale| println!("pinch ended at scale {scale:.2}"));

    let mut recognizer = GestureRecognizer::with_callbacks(GestureConfig::default(), callbacks);

    // Tap: press and release quickly, then wait out the double-tap window.
    recognizer.handle_event(&event(TouchPhase::Start, 0, &[(0, 100.0, 100.0)]));
    recognizer.handle_event(&event(TouchPhase::End, 50, &[]));
    recognizer.advance(400);

    // Double-tap: two quick presses at the same spot.
    recognizer.handle_event(&event(TouchPhase::Start, 1_000, &[(0, 100.0, 100.0)]));
    recognizer.handle_event(&event(TouchPhase::End, 1_050, &[]));
    recognizer.handle_event(&event(TouchPhase::Start, 1_150, &[(0, 102.0, 101.0)]));
    recognizer.handle_event(&event(TouchPhase::End, 1_200, &[]));

    // Long-press: hold still past the 500ms window.
    recognizer.handle_event(&event(TouchPhase::Start, 2_000, &[(0, 60.0, 60.0)]));
    recognizer.advance(2_600);
    recognizer.handle_event(&event(TouchPhase::End, 2_650, &[]));

    // Pan: drag right past the movement threshold.
    recognizer.handle_event(&event(TouchPhase::Start, 3_000, &[(0, 0.0, 0.0)]));
    for step in 1..=5u64 {
        let x = step as f32 * 30.0;
        recognizer.handle_event(&event(TouchPhase::Move, 3_000 + step * 16, &[(0, x, 0.0)]));
    }
    recognizer.handle_event(&event(TouchPhase::End, 3_100, &[]));

    // Pinch: spread two fingers to double the span.
    recognizer.handle_event(&event(
        TouchPhase::Start,
        4_000,
        &[(0, 100.0, 100.0), (1, 200.0, 100.0)],
    ));
    recognizer.handle_event(&event(
        TouchPhase::Move,
        4_050,
        &[(0, 50.0, 100.0), (1, 250.0, 100.0)],
    ));
    recognizer.handle_event(&event(TouchPhase::End, 4_100, &[(1, 250.0, 100.0)]));
}
