//! Multi-touch gesture recognition for Tactus
//!
//! Classifies a raw stream of touch events into discrete gestures (tap,
//! double-tap, long-press) and continuous gestures (pan, pinch), reporting
//! each through an optional callback table. The recognizer is
//! single-threaded and caller-driven: feed it [`TouchEvent`]s via
//! [`GestureRecognizer::handle_event`] and pump time via
//! [`GestureRecognizer::advance`] so its tap-confirmation and long-press
//! deadlines can fire.

pub mod callbacks;
pub mod clock;
pub mod config;
pub mod input;
pub mod recognizer;
pub mod timer;
pub mod velocity_tracker;

pub use callbacks::GestureCallbacks;
pub use clock::{Clock, MonotonicClock};
pub use config::GestureConfig;
pub use input::sampler::sample_contacts;
pub use input::types::{PointerId, TouchEvent, TouchList, TouchPhase, TouchPoint};
pub use recognizer::{GestureKind, GestureRecognizer, GestureState};
pub use timer::TimerQueue;
pub use velocity_tracker::{Velocity, VelocityTracker};

pub mod prelude {
    pub use crate::callbacks::GestureCallbacks;
    pub use crate::config::GestureConfig;
    pub use crate::input::prelude::*;
    pub use crate::recognizer::{GestureKind, GestureRecognizer, GestureState};
    pub use crate::velocity_tracker::Velocity;
}
