//! Gesture classification state machine.
//!
//! One recognizer instance serves one input surface. It consumes normalized
//! [`TouchEvent`]s, consults the velocity tracker and the timer queue, and
//! reports recognized gestures through the caller's [`GestureCallbacks`].
//!
//! Time is caller-driven: `handle_event` makes time pass up to the event's
//! timestamp and `advance` pumps it between events so the tap-confirmation
//! and long-press deadlines can fire. An event arriving exactly at a
//! deadline wins the tie: it cancels the timer before the fire is
//! observed, so a release "at" the long-press deadline still suppresses the
//! long-press.

use crate::callbacks::GestureCallbacks;
use crate::config::GestureConfig;
use crate::input::types::{PointerId, TouchEvent, TouchList, TouchPhase, TouchPoint};
use crate::timer::TimerQueue;
use crate::velocity_tracker::{Velocity, VelocityTracker};
use smallvec::SmallVec;
use tactus_geometry::Point;

/// Which gesture the recognizer has committed to for the current session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GestureKind {
    None,
    Tap,
    DoubleTap,
    LongPress,
    Pan,
    Pinch,
}

/// Internal classifier phase. `Idle` is both the initial state and the
/// terminal state between sessions; the `Resolved*` phases keep a session
/// inert until every contact lifts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Idle,
    ArmedSingle,
    PinchCandidate,
    Panning,
    Pinching,
    ResolvedLongPress,
    ResolvedDoubleTap,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TimerKey {
    LongPress,
    TapConfirm,
}

/// The only state that survives across otherwise-independent touch
/// sessions: candidate taps waiting out their confirmation windows. Each
/// candidate fires at its own deadline unless a matching follow-up contact
/// upgrades it to a double-tap first; a non-matching follow-up leaves it
/// untouched.
#[derive(Clone, Copy, Debug, PartialEq)]
struct PendingTap {
    time_ms: u64,
    point: TouchPoint,
}

/// Read-only snapshot of the recognizer's gesture state.
#[derive(Clone, Debug, PartialEq)]
pub struct GestureState {
    pub is_active: bool,
    pub kind: GestureKind,
    pub start_time_ms: u64,
    pub start_points: TouchList,
    pub current_points: TouchList,
    /// Cumulative pan offset from the press point.
    pub delta: Point,
    /// Current pinch ratio; 1.0 means unchanged.
    pub scale: f32,
    pub velocity: Velocity,
}

/// Classifies touch event streams into tap, double-tap, long-press, pan and
/// pinch gestures.
///
/// All mutable state lives inside the instance; construct one per input
/// surface and keep it for the surface's lifetime.
pub struct GestureRecognizer {
    config: GestureConfig,
    callbacks: GestureCallbacks,
    phase: Phase,
    start_time_ms: u64,
    start_points: TouchList,
    current_points: TouchList,
    delta: Point,
    scale: f32,
    /// The two contacts that began the pinch; a third finger never joins.
    pinch_ids: Option<(PointerId, PointerId)>,
    initial_span: f32,
    velocity: VelocityTracker,
    timers: TimerQueue<TimerKey>,
    /// Oldest first; the confirmation timer is always armed for the front.
    pending_taps: SmallVec<[PendingTap; 2]>,
}

impl GestureRecognizer {
    pub fn new(config: GestureConfig) -> Self {
        Self::with_callbacks(config, GestureCallbacks::new())
    }

    pub fn with_callbacks(config: GestureConfig, callbacks: GestureCallbacks) -> Self {
        Self {
            config,
            callbacks,
            phase: Phase::Idle,
            start_time_ms: 0,
            start_points: TouchList::new(),
            current_points: TouchList::new(),
            delta: Point::ZERO,
            scale: 1.0,
            pinch_ids: None,
            initial_span: 0.0,
            velocity: VelocityTracker::new(),
            timers: TimerQueue::new(),
            pending_taps: SmallVec::new(),
        }
    }

    /// Replaces the handler table wholesale.
    pub fn set_callbacks(&mut self, callbacks: GestureCallbacks) {
        self.callbacks = callbacks;
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    pub fn is_active(&self) -> bool {
        self.phase != Phase::Idle
    }

    /// Snapshot of the current gesture state.
    pub fn state(&self) -> GestureState {
        GestureState {
            is_active: self.is_active(),
            kind: self.kind(),
            start_time_ms: self.start_time_ms,
            start_points: self.start_points.clone(),
            current_points: self.current_points.clone(),
            delta: self.delta,
            scale: self.scale,
            velocity: self.velocity.velocity(),
        }
    }

    fn kind(&self) -> GestureKind {
        match self.phase {
            // Armed phases are gesture candidates, not commitments.
            Phase::Idle | Phase::ArmedSingle | Phase::PinchCandidate => GestureKind::None,
            Phase::Panning => GestureKind::Pan,
            Phase::Pinching => GestureKind::Pinch,
            Phase::ResolvedLongPress => GestureKind::LongPress,
            Phase::ResolvedDoubleTap => GestureKind::DoubleTap,
        }
    }

    /// Makes time pass without an input event, firing any deadline that is
    /// now due. Hosts call this from their frame/event loop. Loops because
    /// confirming one tap may re-arm the timer for the next queued
    /// candidate, whose deadline can also already be due.
    pub fn advance(&mut self, now_ms: u64) {
        loop {
            let fired = self.timers.fire_due(now_ms);
            if fired.is_empty() {
                return;
            }
            for key in fired {
                self.on_timer(key);
            }
        }
    }

    /// Feeds one normalized input event to the classifier.
    pub fn handle_event(&mut self, event: &TouchEvent) {
        // Deadlines strictly before the event fire first; a deadline shared
        // with the event's timestamp loses to the event.
        loop {
            let fired = self.timers.fire_before(event.time_ms);
            if fired.is_empty() {
                break;
            }
            for key in fired {
                self.on_timer(key);
            }
        }

        match event.phase {
            TouchPhase::Start => self.on_start(event),
            TouchPhase::Move => self.on_move(event),
            TouchPhase::End => self.on_end(event),
            TouchPhase::Cancel => self.on_cancel(),
        }
    }

    /// Forces the recognizer back to idle: all timers cleared, pending-tap
    /// memory dropped, nothing emitted. Idempotent; hosts call this when
    /// the surface is torn down or abandons in-flight gestures.
    pub fn reset(&mut self) {
        self.timers.cancel_all();
        self.pending_taps.clear();
        self.clear_session();
    }

    fn on_start(&mut self, event: &TouchEvent) {
        match event.touches.len() {
            0 => {}
            1 => self.on_single_start(event),
            2 => self.on_double_start(event),
            _ => {
                // Extra fingers never join or replace a tracked pair.
                self.current_points = event.touches.clone();
            }
        }
    }

    fn on_single_start(&mut self, event: &TouchEvent) {
        let touch = event.touches[0];

        // Double-tap check runs against the most recent candidate only. A
        // contact that fails it leaves every pending confirmation running
        // at its original deadline.
        if let Some(pending) = self.pending_taps.last().copied() {
            let within_window =
                event.time_ms.saturating_sub(pending.time_ms) <= self.config.double_tap_timeout_ms;
            let within_slop =
                touch.position.distance_to(pending.point.position) <= self.config.move_threshold;
            if within_window && within_slop {
                // The second contact-down beats the matched tap's
                // confirmation timer; that pending single tap dies here.
                self.pending_taps.pop();
                if self.pending_taps.is_empty() {
                    self.timers.cancel(TimerKey::TapConfirm);
                }
                self.begin_session(event);
                self.set_phase(Phase::ResolvedDoubleTap);
                log::debug!("double-tap at {:?}", touch.position);
                if let Some(cb) = self.callbacks.on_double_tap.as_mut() {
                    cb(touch);
                }
                return;
            }
        }

        self.begin_session(event);
        self.set_phase(Phase::ArmedSingle);
        self.velocity.reset();
        self.velocity.add_sample(event.time_ms, touch.position);
        self.timers.schedule(
            TimerKey::LongPress,
            event.time_ms + self.config.long_press_timeout_ms,
        );
    }

    fn on_double_start(&mut self, event: &TouchEvent) {
        if self.phase == Phase::ResolvedDoubleTap {
            // Terminal for the session; nothing else can start.
            self.current_points = event.touches.clone();
            return;
        }

        // No tap or double-tap path exists for a two-finger start; any
        // pending tap confirmations keep running toward their deadlines.

        // A second finger landing mid-pan or mid-press re-arms the session
        // as a pinch candidate. The abandoned pan gets no end event.
        self.timers.cancel(TimerKey::LongPress);
        self.begin_session(event);
        self.set_phase(Phase::PinchCandidate);

        let (a, b) = (event.touches[0], event.touches[1]);
        self.pinch_ids = Some((a.id, b.id));
        self.initial_span = a.position.distance_to(b.position);

        let center = a.position.midpoint(b.position);
        let span = self.initial_span;
        log::debug!("pinch candidate, center {:?} span {}", center, span);
        if let Some(cb) = self.callbacks.on_pinch_start.as_mut() {
            cb(center, span);
        }
    }

    fn on_move(&mut self, event: &TouchEvent) {
        if event.touches.is_empty() {
            if self.phase != Phase::Idle {
                log::warn!("move event with no contacts during an active session; cancelling");
                self.on_cancel();
            }
            return;
        }

        self.current_points = event.touches.clone();

        match self.phase {
            Phase::Idle | Phase::ResolvedDoubleTap => {}
            Phase::ResolvedLongPress => {
                // The long-press result stands; no retroactive pan.
            }
            Phase::ArmedSingle => self.on_armed_move(event),
            Phase::Panning => self.on_pan_move(event),
            Phase::PinchCandidate | Phase::Pinching => self.on_pinch_move(event),
        }
    }

    fn on_armed_move(&mut self, event: &TouchEvent) {
        let Some(touch) = self.tracked_touch(event) else {
            return;
        };
        self.velocity.add_sample(event.time_ms, touch.position);

        let origin = self.start_points[0];
        self.delta = touch.position - origin.position;
        if self.delta.magnitude() > self.config.move_threshold {
            self.timers.cancel(TimerKey::LongPress);
            self.set_phase(Phase::Panning);
            log::debug!("pan start at {:?}", origin.position);
            if let Some(cb) = self.callbacks.on_pan_start.as_mut() {
                cb(origin);
            }
            let (delta, velocity) = (self.delta, self.velocity.velocity());
            if let Some(cb) = self.callbacks.on_pan_move.as_mut() {
                cb(delta.x, delta.y, velocity);
            }
        }
    }

    fn on_pan_move(&mut self, event: &TouchEvent) {
        let Some(touch) = self.tracked_touch(event) else {
            return;
        };
        self.velocity.add_sample(event.time_ms, touch.position);
        self.delta = touch.position - self.start_points[0].position;

        let (delta, velocity) = (self.delta, self.velocity.velocity());
        if let Some(cb) = self.callbacks.on_pan_move.as_mut() {
            cb(delta.x, delta.y, velocity);
        }
    }

    fn on_pinch_move(&mut self, event: &TouchEvent) {
        let Some((a, b)) = self.tracked_pair(event) else {
            return;
        };

        let span = a.position.distance_to(b.position);
        if self.phase == Phase::PinchCandidate
            && (span - self.initial_span).abs() > self.config.pinch_threshold
        {
            self.set_phase(Phase::Pinching);
        }
        if self.phase != Phase::Pinching {
            return;
        }

        self.scale = if self.initial_span > 0.0 {
            span / self.initial_span
        } else {
            1.0
        };
        let center = a.position.midpoint(b.position);
        let scale = self.scale;
        if let Some(cb) = self.callbacks.on_pinch_move.as_mut() {
            cb(center, scale, span);
        }
    }

    fn on_end(&mut self, event: &TouchEvent) {
        // The event carries the *remaining* contacts; the lifted finger's
        // last known position lives in the pre-lift contact set.
        let last_points = std::mem::replace(&mut self.current_points, event.touches.clone());

        match self.phase {
            Phase::Idle => {}
            Phase::ArmedSingle => self.on_armed_end(event, &last_points),
            Phase::Panning => {
                if self.tracked_touch(event).is_none() {
                    let velocity = self.velocity.velocity();
                    log::debug!("pan end, velocity {:?}", velocity);
                    if let Some(cb) = self.callbacks.on_pan_end.as_mut() {
                        cb(velocity);
                    }
                    self.clear_session();
                }
            }
            Phase::Pinching => {
                if self.tracked_pair(event).is_none() {
                    let scale = self.scale;
                    log::debug!("pinch end, scale {}", scale);
                    if let Some(cb) = self.callbacks.on_pinch_end.as_mut() {
                        cb(scale);
                    }
                    self.clear_session();
                }
            }
            Phase::PinchCandidate => {
                // Threshold never exceeded: a two-finger tap is not a
                // recognized gesture.
                if self.tracked_pair(event).is_none() {
                    self.clear_session();
                }
            }
            Phase::ResolvedLongPress | Phase::ResolvedDoubleTap => {
                if event.touches.is_empty() {
                    self.clear_session();
                }
            }
        }
    }

    fn on_armed_end(&mut self, event: &TouchEvent, last_points: &TouchList) {
        if self.tracked_touch(event).is_some() {
            // Some other contact lifted; the tracked finger is still down.
            return;
        }
        self.timers.cancel(TimerKey::LongPress);

        if event.touches.is_empty() {
            let elapsed = event.time_ms.saturating_sub(self.start_time_ms);
            if elapsed < self.config.tap_timeout_ms {
                // Candidate tap: remember it and give a follow-up contact
                // one double-tap window to upgrade it.
                let origin = self.start_points[0];
                let release = last_points
                    .iter()
                    .find(|t| t.id == origin.id)
                    .copied()
                    .unwrap_or(origin);
                self.pending_taps.push(PendingTap {
                    time_ms: event.time_ms,
                    point: release,
                });
                // The timer tracks the oldest candidate; later ones get
                // their turn as the queue drains.
                let front = self.pending_taps[0];
                self.timers.schedule(
                    TimerKey::TapConfirm,
                    front.time_ms + self.config.double_tap_timeout_ms,
                );
            }
        }
        self.clear_session();
    }

    fn on_cancel(&mut self) {
        // A cancel is not a clean end: no end events for in-flight
        // gestures, and no tap may fire for a cancelled surface.
        log::trace!("cancel in {:?}", self.phase);
        self.timers.cancel_all();
        self.pending_taps.clear();
        self.clear_session();
    }

    fn on_timer(&mut self, key: TimerKey) {
        match key {
            TimerKey::LongPress => {
                // Stale fires are no-ops; only an undisturbed armed single
                // contact resolves as a long-press.
                if self.phase != Phase::ArmedSingle {
                    return;
                }
                let touch = self.start_points[0];
                self.set_phase(Phase::ResolvedLongPress);
                log::debug!("long-press at {:?}", touch.position);
                if let Some(cb) = self.callbacks.on_long_press.as_mut() {
                    cb(touch);
                }
            }
            TimerKey::TapConfirm => {
                if self.pending_taps.is_empty() {
                    return;
                }
                let pending = self.pending_taps.remove(0);
                log::debug!("tap at {:?}", pending.point.position);
                if let Some(cb) = self.callbacks.on_tap.as_mut() {
                    cb(pending.point);
                }
                if let Some(next) = self.pending_taps.first() {
                    self.timers.schedule(
                        TimerKey::TapConfirm,
                        next.time_ms + self.config.double_tap_timeout_ms,
                    );
                }
            }
        }
    }

    fn begin_session(&mut self, event: &TouchEvent) {
        self.start_time_ms = event.time_ms;
        self.start_points = event.touches.clone();
        self.current_points = event.touches.clone();
        self.delta = Point::ZERO;
        self.scale = 1.0;
        self.pinch_ids = None;
        self.initial_span = 0.0;
    }

    /// Back to idle. Leaves the pending-tap memory and its confirmation
    /// timer alone; only cancel/reset may kill those.
    fn clear_session(&mut self) {
        self.timers.cancel(TimerKey::LongPress);
        self.set_phase(Phase::Idle);
        self.start_points.clear();
        self.current_points.clear();
        self.delta = Point::ZERO;
        self.scale = 1.0;
        self.pinch_ids = None;
        self.initial_span = 0.0;
        self.velocity.reset();
    }

    fn set_phase(&mut self, phase: Phase) {
        if self.phase != phase {
            log::trace!("phase {:?} -> {:?}", self.phase, phase);
            self.phase = phase;
        }
    }

    fn tracked_touch(&self, event: &TouchEvent) -> Option<TouchPoint> {
        let id = self.start_points.first()?.id;
        event.find(id)
    }

    fn tracked_pair(&self, event: &TouchEvent) -> Option<(TouchPoint, TouchPoint)> {
        let (a, b) = self.pinch_ids?;
        Some((event.find(a)?, event.find(b)?))
    }
}
