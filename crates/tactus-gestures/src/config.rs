//! Gesture timing and threshold configuration.
//!
//! The timing windows and distance thresholds below are shared by every
//! gesture path so tap, pan and pinch disambiguation stays consistent: a
//! movement small enough to keep a tap alive is also small enough not to
//! start a pan.
//!
//! # DPI Considerations
//!
//! Distance values are in logical pixels. For very high-density touch
//! screens, scale `move_threshold`/`pinch_threshold` by the device's DPI
//! factor before constructing the config. The defaults work well for
//! typical desktop/mobile displays.

/// Maximum press duration for a release to count as a tap candidate.
pub const TAP_TIMEOUT_MS: u64 = 300;

/// Window after a tap candidate in which a second contact at the same
/// location upgrades it to a double-tap. The single tap is only confirmed
/// once this window elapses.
pub const DOUBLE_TAP_TIMEOUT_MS: u64 = 300;

/// Hold duration after which a stationary contact resolves as a long-press.
pub const LONG_PRESS_TIMEOUT_MS: u64 = 500;

/// Movement threshold in logical pixels.
///
/// If a contact moves more than this distance from its press position the
/// session commits to a pan and the tap/long-press paths are cancelled.
/// Large enough to ignore finger jitter, small enough to feel responsive
/// (Android's ViewConfiguration touch slop is in the same range).
pub const MOVE_THRESHOLD: f32 = 10.0;

/// Minimum change in inter-contact span, in logical pixels, before a
/// two-finger session starts reporting pinch ratios. Keeps resting fingers
/// from producing jitter-triggered zoom.
pub const PINCH_THRESHOLD: f32 = 20.0;

/// Per-frame velocity decay factor for momentum scrolling.
///
/// Informational only: the recognizer reports the release velocity as-is
/// and callers implementing momentum apply this decay themselves.
pub const MAX_VELOCITY_DECAY: f32 = 0.95;

/// Immutable recognizer thresholds, supplied once at construction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureConfig {
    pub tap_timeout_ms: u64,
    pub double_tap_timeout_ms: u64,
    pub long_press_timeout_ms: u64,
    pub move_threshold: f32,
    pub pinch_threshold: f32,
    pub max_velocity_decay: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            tap_timeout_ms: TAP_TIMEOUT_MS,
            double_tap_timeout_ms: DOUBLE_TAP_TIMEOUT_MS,
            long_press_timeout_ms: LONG_PRESS_TIMEOUT_MS,
            move_threshold: MOVE_THRESHOLD,
            pinch_threshold: PINCH_THRESHOLD,
            max_velocity_decay: MAX_VELOCITY_DECAY,
        }
    }
}

impl GestureConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tap_timeout_ms(mut self, timeout: u64) -> Self {
        self.tap_timeout_ms = timeout;
        self
    }

    pub fn with_double_tap_timeout_ms(mut self, timeout: u64) -> Self {
        self.double_tap_timeout_ms = timeout;
        self
    }

    pub fn with_long_press_timeout_ms(mut self, timeout: u64) -> Self {
        self.long_press_timeout_ms = timeout;
        self
    }

    pub fn with_move_threshold(mut self, threshold: f32) -> Self {
        self.move_threshold = threshold;
        self
    }

    pub fn with_pinch_threshold(mut self, threshold: f32) -> Self {
        self.pinch_threshold = threshold;
        self
    }

    pub fn with_max_velocity_decay(mut self, decay: f32) -> Self {
        self.max_velocity_decay = decay;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_constants() {
        let config = GestureConfig::default();
        assert_eq!(config.tap_timeout_ms, TAP_TIMEOUT_MS);
        assert_eq!(config.double_tap_timeout_ms, DOUBLE_TAP_TIMEOUT_MS);
        assert_eq!(config.long_press_timeout_ms, LONG_PRESS_TIMEOUT_MS);
        assert_eq!(config.move_threshold, MOVE_THRESHOLD);
        assert_eq!(config.pinch_threshold, PINCH_THRESHOLD);
        assert_eq!(config.max_velocity_decay, MAX_VELOCITY_DECAY);
    }

    #[test]
    fn test_overrides_are_independent() {
        let config = GestureConfig::new()
            .with_long_press_timeout_ms(800)
            .with_move_threshold(4.0);
        assert_eq!(config.long_press_timeout_ms, 800);
        assert_eq!(config.move_threshold, 4.0);
        assert_eq!(config.tap_timeout_ms, TAP_TIMEOUT_MS);
    }
}
