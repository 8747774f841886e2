//! The caller's handler table.
//!
//! A fixed record of optional handlers rather than a pub/sub registry: the
//! handler set is small and known, so invocation is a conditional call.
//! Missing handlers are simply not called.

use crate::input::types::TouchPoint;
use crate::velocity_tracker::Velocity;
use tactus_geometry::Point;

type PointHandler = Box<dyn FnMut(TouchPoint)>;
type PanMoveHandler = Box<dyn FnMut(f32, f32, Velocity)>;
type PanEndHandler = Box<dyn FnMut(Velocity)>;
type PinchStartHandler = Box<dyn FnMut(Point, f32)>;
type PinchMoveHandler = Box<dyn FnMut(Point, f32, f32)>;
type PinchEndHandler = Box<dyn FnMut(f32)>;

/// Optional gesture handlers, set at construction or replaced wholesale
/// via [`crate::GestureRecognizer::set_callbacks`]. All handlers are
/// invoked synchronously on the thread that delivers input events.
#[derive(Default)]
pub struct GestureCallbacks {
    pub(crate) on_tap: Option<PointHandler>,
    pub(crate) on_double_tap: Option<PointHandler>,
    pub(crate) on_long_press: Option<PointHandler>,
    pub(crate) on_pan_start: Option<PointHandler>,
    pub(crate) on_pan_move: Option<PanMoveHandler>,
    pub(crate) on_pan_end: Option<PanEndHandler>,
    pub(crate) on_pinch_start: Option<PinchStartHandler>,
    pub(crate) on_pinch_move: Option<PinchMoveHandler>,
    pub(crate) on_pinch_end: Option<PinchEndHandler>,
}

impl GestureCallbacks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discrete tap, delivered at the release point once the double-tap
    /// window has elapsed without a second contact.
    pub fn on_tap(mut self, handler: impl FnMut(TouchPoint) + 'static) -> Self {
        self.on_tap = Some(Box::new(handler));
        self
    }

    /// Second tap landing inside the double-tap window and slop.
    pub fn on_double_tap(mut self, handler: impl FnMut(TouchPoint) + 'static) -> Self {
        self.on_double_tap = Some(Box::new(handler));
        self
    }

    /// Stationary hold past the long-press timeout, delivered at the
    /// original press point.
    pub fn on_long_press(mut self, handler: impl FnMut(TouchPoint) + 'static) -> Self {
        self.on_long_press = Some(Box::new(handler));
        self
    }

    /// Single contact committed to a pan; carries the original press point.
    pub fn on_pan_start(mut self, handler: impl FnMut(TouchPoint) + 'static) -> Self {
        self.on_pan_start = Some(Box::new(handler));
        self
    }

    /// Cumulative pan delta from the press point plus the current trailing
    /// velocity estimate.
    pub fn on_pan_move(mut self, handler: impl FnMut(f32, f32, Velocity) + 'static) -> Self {
        self.on_pan_move = Some(Box::new(handler));
        self
    }

    /// Pan released; the velocity seeds caller-side momentum.
    pub fn on_pan_end(mut self, handler: impl FnMut(Velocity) + 'static) -> Self {
        self.on_pan_end = Some(Box::new(handler));
        self
    }

    /// Two contacts down: announces the pinch *candidate* with the initial
    /// centroid and span, before any threshold is crossed.
    pub fn on_pinch_start(mut self, handler: impl FnMut(Point, f32) + 'static) -> Self {
        self.on_pinch_start = Some(Box::new(handler));
        self
    }

    /// Confirmed pinch update: centroid, scale ratio and current span.
    pub fn on_pinch_move(mut self, handler: impl FnMut(Point, f32, f32) + 'static) -> Self {
        self.on_pinch_move = Some(Box::new(handler));
        self
    }

    /// Confirmed pinch ended; carries the final scale ratio.
    pub fn on_pinch_end(mut self, handler: impl FnMut(f32) + 'static) -> Self {
        self.on_pinch_end = Some(Box::new(handler));
        self
    }
}

impl std::fmt::Debug for GestureCallbacks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GestureCallbacks")
            .field("on_tap", &self.on_tap.is_some())
            .field("on_double_tap", &self.on_double_tap.is_some())
            .field("on_long_press", &self.on_long_press.is_some())
            .field("on_pan_start", &self.on_pan_start.is_some())
            .field("on_pan_move", &self.on_pan_move.is_some())
            .field("on_pan_end", &self.on_pan_end.is_some())
            .field("on_pinch_start", &self.on_pinch_start.is_some())
            .field("on_pinch_move", &self.on_pinch_move.is_some())
            .field("on_pinch_end", &self.on_pinch_end.is_some())
            .finish()
    }
}
