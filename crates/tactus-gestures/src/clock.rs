//! Clock abstraction for hosts that drive the recognizer from wall time.
//!
//! The recognizer itself only ever sees explicit millisecond timestamps,
//! which keeps tests deterministic. Hosts running against real input can
//! use [`MonotonicClock`] to produce those timestamps.

use web_time::Instant;

/// Provides timing information for a recognizer host.
pub trait Clock {
    /// Milliseconds elapsed on this clock's timeline.
    fn now_ms(&self) -> u64;
}

/// Monotonic wall clock measured from its construction instant.
#[derive(Clone, Debug)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monotonic_never_goes_backwards() {
        let clock = MonotonicClock::new();
        let a = clock.now_ms();
        let b = clock.now_ms();
        assert!(b >= a);
    }
}
