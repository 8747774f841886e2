//! Robot-style driver for recognizer tests
//!
//! Owns a [`GestureRecognizer`] wired to a recorded gesture stream, tracks
//! the active contact set, and synthesizes full-contact-set events the way
//! a real input surface would. Tests script interactions through the verbs
//! (`tap_at`, `pan`, `pinch`, ...) or the low-level `touch_*` calls, then
//! assert on the recorded [`GestureLog`] entries.
//!
//! # Example
//!
//! ```
//! use tactus_testing::GestureRobot;
//!
//! let mut robot = GestureRobot::new();
//! robot.tap_at(100.0, 100.0);
//! robot.settle();
//! assert_eq!(robot.taps().len(), 1);
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use tactus_geometry::Point;
use tactus_gestures::{
    GestureCallbacks, GestureConfig, GestureRecognizer, GestureState, PointerId, TouchEvent,
    TouchPhase, TouchPoint, Velocity,
};

/// One recorded callback invocation, in emission order.
#[derive(Clone, Debug, PartialEq)]
pub enum GestureLog {
    Tap(TouchPoint),
    DoubleTap(TouchPoint),
    LongPress(TouchPoint),
    PanStart(TouchPoint),
    PanMove {
        dx: f32,
        dy: f32,
        velocity: Velocity,
    },
    PanEnd(Velocity),
    PinchStart {
        center: Point,
        span: f32,
    },
    PinchMove {
        center: Point,
        scale: f32,
        span: f32,
    },
    PinchEnd(f32),
}

/// Milliseconds the high-level verbs hold a contact down for a plain tap.
const TAP_HOLD_MS: u64 = 50;

/// Frame-ish step used between synthesized move events.
const MOVE_STEP_MS: u64 = 16;

/// Scripted driver around one recognizer instance.
pub struct GestureRobot {
    recognizer: GestureRecognizer,
    log: Rc<RefCell<Vec<GestureLog>>>,
    contacts: Vec<(PointerId, f32, f32)>,
    now_ms: u64,
}

impl Default for GestureRobot {
    fn default() -> Self {
        Self::new()
    }
}

impl GestureRobot {
    pub fn new() -> Self {
        Self::with_config(GestureConfig::default())
    }

    pub fn with_config(config: GestureConfig) -> Self {
        let log: Rc<RefCell<Vec<GestureLog>>> = Rc::new(RefCell::new(Vec::new()));
        let callbacks = recording_callbacks(&log);
        Self {
            recognizer: GestureRecognizer::with_callbacks(config, callbacks),
            log,
            contacts: Vec::new(),
            now_ms: 0,
        }
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn state(&self) -> GestureState {
        self.recognizer.state()
    }

    pub fn recognizer_mut(&mut self) -> &mut GestureRecognizer {
        &mut self.recognizer
    }

    /// Lets `ms` milliseconds pass, firing any recognizer deadline that
    /// comes due along the way.
    pub fn advance_ms(&mut self, ms: u64) {
        self.now_ms += ms;
        self.recognizer.advance(self.now_ms);
    }

    /// Advances far enough that every pending timing window (tap
    /// confirmation, long-press) has elapsed.
    pub fn settle(&mut self) {
        let config = *self.recognizer.config();
        let quiet = config
            .double_tap_timeout_ms
            .max(config.long_press_timeout_ms)
            + 1;
        self.advance_ms(quiet);
    }

    // Low-level contact control ------------------------------------------

    pub fn touch_down(&mut self, id: PointerId, x: f32, y: f32) {
        self.contacts.retain(|(cid, _, _)| *cid != id);
        self.contacts.push((id, x, y));
        self.emit(TouchPhase::Start);
    }

    pub fn touch_move(&mut self, id: PointerId, x: f32, y: f32) {
        for contact in &mut self.contacts {
            if contact.0 == id {
                contact.1 = x;
                contact.2 = y;
            }
        }
        self.emit(TouchPhase::Move);
    }

    pub fn touch_up(&mut self, id: PointerId) {
        self.contacts.retain(|(cid, _, _)| *cid != id);
        self.emit(TouchPhase::End);
    }

    /// Host-side cancellation: all contacts are dropped at once.
    pub fn cancel(&mut self) {
        self.contacts.clear();
        self.emit(TouchPhase::Cancel);
    }

    /// Delivers a raw event as-is, bypassing contact tracking. For
    /// malformed-input tests.
    pub fn inject(&mut self, event: &TouchEvent) {
        self.recognizer.handle_event(event);
    }

    fn emit(&mut self, phase: TouchPhase) {
        let event = TouchEvent::sampled(phase, self.now_ms, self.contacts.iter().copied());
        self.recognizer.handle_event(&event);
    }

    // High-level interaction verbs ---------------------------------------

    /// Quick press and release at one spot. Does not advance past the
    /// double-tap window; call [`settle`](Self::settle) to let the tap
    /// confirm, or chain another tap to form a double-tap.
    pub fn tap_at(&mut self, x: f32, y: f32) {
        self.touch_down(0, x, y);
        self.advance_ms(TAP_HOLD_MS);
        self.touch_up(0);
    }

    /// Two quick taps at the same spot, then settles.
    pub fn double_tap_at(&mut self, x: f32, y: f32) {
        self.tap_at(x, y);
        self.advance_ms(100);
        self.tap_at(x, y);
        self.settle();
    }

    /// Press, hold past the long-press window, release.
    pub fn long_press_at(&mut self, x: f32, y: f32) {
        self.touch_down(0, x, y);
        let hold = self.recognizer.config().long_press_timeout_ms + 50;
        self.advance_ms(hold);
        self.touch_up(0);
    }

    /// Drags one contact from `from` to `to` in `steps` linear moves.
    pub fn pan(&mut self, from: Point, to: Point, steps: u32) {
        self.touch_down(0, from.x, from.y);
        for step in 1..=steps.max(1) {
            self.advance_ms(MOVE_STEP_MS);
            let t = step as f32 / steps.max(1) as f32;
            self.touch_move(0, from.x + (to.x - from.x) * t, from.y + (to.y - from.y) * t);
        }
        self.advance_ms(MOVE_STEP_MS);
        self.touch_up(0);
    }

    /// Two-finger gesture from `(a_from, b_from)` to `(a_to, b_to)` in
    /// `steps` linear moves, lifting both fingers at the end.
    pub fn pinch(&mut self, a_from: Point, b_from: Point, a_to: Point, b_to: Point, steps: u32) {
        self.touch_down(0, a_from.x, a_from.y);
        self.touch_down(1, b_from.x, b_from.y);
        for step in 1..=steps.max(1) {
            self.advance_ms(MOVE_STEP_MS);
            let t = step as f32 / steps.max(1) as f32;
            self.touch_move(0, a_from.x + (a_to.x - a_from.x) * t, a_from.y + (a_to.y - a_from.y) * t);
            self.touch_move(1, b_from.x + (b_to.x - b_from.x) * t, b_from.y + (b_to.y - b_from.y) * t);
        }
        self.advance_ms(MOVE_STEP_MS);
        self.touch_up(0);
        self.touch_up(1);
    }

    // Recorded gesture stream --------------------------------------------

    pub fn events(&self) -> Vec<GestureLog> {
        self.log.borrow().clone()
    }

    pub fn take_events(&mut self) -> Vec<GestureLog> {
        self.log.borrow_mut().drain(..).collect()
    }

    pub fn clear_events(&mut self) {
        self.log.borrow_mut().clear();
    }

    pub fn taps(&self) -> Vec<TouchPoint> {
        self.filter(|e| match e {
            GestureLog::Tap(p) => Some(*p),
            _ => None,
        })
    }

    pub fn double_taps(&self) -> Vec<TouchPoint> {
        self.filter(|e| match e {
            GestureLog::DoubleTap(p) => Some(*p),
            _ => None,
        })
    }

    pub fn long_presses(&self) -> Vec<TouchPoint> {
        self.filter(|e| match e {
            GestureLog::LongPress(p) => Some(*p),
            _ => None,
        })
    }

    pub fn pan_starts(&self) -> Vec<TouchPoint> {
        self.filter(|e| match e {
            GestureLog::PanStart(p) => Some(*p),
            _ => None,
        })
    }

    pub fn pan_moves(&self) -> Vec<(f32, f32, Velocity)> {
        self.filter(|e| match e {
            GestureLog::PanMove { dx, dy, velocity } => Some((*dx, *dy, *velocity)),
            _ => None,
        })
    }

    pub fn pan_ends(&self) -> Vec<Velocity> {
        self.filter(|e| match e {
            GestureLog::PanEnd(v) => Some(*v),
            _ => None,
        })
    }

    pub fn pinch_starts(&self) -> Vec<(Point, f32)> {
        self.filter(|e| match e {
            GestureLog::PinchStart { center, span } => Some((*center, *span)),
            _ => None,
        })
    }

    pub fn pinch_moves(&self) -> Vec<(Point, f32, f32)> {
        self.filter(|e| match e {
            GestureLog::PinchMove {
                center,
                scale,
                span,
            } => Some((*center, *scale, *span)),
            _ => None,
        })
    }

    pub fn pinch_ends(&self) -> Vec<f32> {
        self.filter(|e| match e {
            GestureLog::PinchEnd(s) => Some(*s),
            _ => None,
        })
    }

    fn filter<T>(&self, f: impl Fn(&GestureLog) -> Option<T>) -> Vec<T> {
        self.log.borrow().iter().filter_map(f).collect()
    }

    // Assertions ---------------------------------------------------------

    /// Panics unless the recorded stream is empty.
    pub fn assert_no_events(&self) {
        let events = self.log.borrow();
        assert!(
            events.is_empty(),
            "expected no gestures, got {:?}",
            events.as_slice()
        );
    }

    /// Panics unless the recorded stream equals `expected` exactly.
    pub fn assert_events(&self, expected: &[GestureLog]) {
        let events = self.log.borrow();
        assert_eq!(events.as_slice(), expected);
    }
}

fn recording_callbacks(log: &Rc<RefCell<Vec<GestureLog>>>) -> GestureCallbacks {
    let push = |log: &Rc<RefCell<Vec<GestureLog>>>| {
        let log = Rc::clone(log);
        move |entry: GestureLog| log.borrow_mut().push(entry)
    };

    let tap = push(log);
    let double_tap = push(log);
    let long_press = push(log);
    let pan_start = push(log);
    let pan_move = push(log);
    let pan_end = push(log);
    let pinch_start = push(log);
    let pinch_move = push(log);
    let pinch_end = push(log);

    GestureCallbacks::new()
        .on_tap(move |p| tap(GestureLog::Tap(p)))
        .on_double_tap(move |p| double_tap(GestureLog::DoubleTap(p)))
        .on_long_press(move |p| long_press(GestureLog::LongPress(p)))
        .on_pan_start(move |p| pan_start(GestureLog::PanStart(p)))
        .on_pan_move(move |dx, dy, velocity| pan_move(GestureLog::PanMove { dx, dy, velocity }))
        .on_pan_end(move |v| pan_end(GestureLog::PanEnd(v)))
        .on_pinch_start(move |center, span| pinch_start(GestureLog::PinchStart { center, span }))
        .on_pinch_move(move |center, scale, span| {
            pinch_move(GestureLog::PinchMove {
                center,
                scale,
                span,
            })
        })
        .on_pinch_end(move |s| pinch_end(GestureLog::PinchEnd(s)))
}
