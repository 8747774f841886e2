//! Velocity tracking for momentum hand-off.
//!
//! Keeps a short trailing window of recent positions for the reference
//! contact and reports the secant-line velocity between the oldest and
//! newest surviving samples. Intentionally cheap and bounded in cost: no
//! filtering, no curve fitting.

use smallvec::SmallVec;
use tactus_geometry::Point;

/// Only samples within the last 100ms contribute to the estimate.
const HORIZON_MS: u64 = 100;

/// Inline sample capacity; at typical input rates the horizon never holds
/// more than this many samples.
const HISTORY_SIZE: usize = 20;

/// Instantaneous velocity in pixels per millisecond.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Velocity {
    pub x: f32,
    pub y: f32,
}

impl Velocity {
    pub const ZERO: Velocity = Velocity { x: 0.0, y: 0.0 };
}

#[derive(Clone, Copy, Debug)]
struct SampleAtTime {
    time_ms: u64,
    position: Point,
}

/// 2D velocity tracker over a fixed trailing window.
///
/// `add_sample` prunes anything older than the horizon, so the estimate
/// always reflects the tail of the gesture rather than its whole history.
#[derive(Clone, Default)]
pub struct VelocityTracker {
    samples: SmallVec<[SampleAtTime; HISTORY_SIZE]>,
}

impl VelocityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the reference contact's position at the given time.
    pub fn add_sample(&mut self, time_ms: u64, position: Point) {
        let cutoff = time_ms.saturating_sub(HORIZON_MS);
        self.samples.retain(|s| s.time_ms >= cutoff);
        self.samples.push(SampleAtTime { time_ms, position });
    }

    /// Secant-line velocity between the oldest and newest samples still in
    /// the window, in px/ms. Zero when fewer than two samples remain or the
    /// time span is zero.
    pub fn velocity(&self) -> Velocity {
        let (first, last) = match (self.samples.first(), self.samples.last()) {
            (Some(first), Some(last)) if self.samples.len() >= 2 => (first, last),
            _ => return Velocity::ZERO,
        };

        let span_ms = last.time_ms.saturating_sub(first.time_ms);
        if span_ms == 0 {
            return Velocity::ZERO;
        }

        let delta = last.position - first.position;
        Velocity {
            x: delta.x / span_ms as f32,
            y: delta.y / span_ms as f32,
        }
    }

    /// Clears all tracked samples.
    pub fn reset(&mut self) {
        self.samples.clear();
    }
}
