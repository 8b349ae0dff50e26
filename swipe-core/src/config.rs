//! Gesture configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{SwipeError, SwipeResult};

/// Touch slop at density 1.0, in pixels.
pub const DEFAULT_TOUCH_SLOP: f32 = 8.0;
/// Minimum fling velocity at density 1.0, in pixels per second.
pub const DEFAULT_MIN_FLING_VELOCITY: f32 = 50.0;
/// Maximum fling velocity at density 1.0, in pixels per second.
pub const DEFAULT_MAX_FLING_VELOCITY: f32 = 8000.0;
/// Duration of short UI animations.
pub const DEFAULT_ANIMATION_DURATION: Duration = Duration::from_millis(200);

/// Source of platform gesture constants.
///
/// Implemented by the host windowing layer. Values are read once, when a
/// recognizer is constructed.
pub trait PlatformConstants {
    /// Distance a pointer may wander before a drag is considered intentional.
    fn scaled_touch_slop(&self) -> f32;
    /// Slowest fling, in pixels per second.
    fn scaled_min_fling_velocity(&self) -> f32;
    /// Fastest fling, in pixels per second.
    fn scaled_max_fling_velocity(&self) -> f32;
    /// Duration of a short animation.
    fn short_animation_duration(&self) -> Duration;
}

/// Thresholds used by the swipe recognizers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwipeConfig {
    /// Slop distance in pixels.
    pub touch_slop: f32,
    /// Minimum fling velocity in pixels per second.
    pub min_fling_velocity: f32,
    /// Maximum fling velocity in pixels per second.
    pub max_fling_velocity: f32,
    /// Duration of the exit, snap-back and collapse animations.
    #[serde(with = "duration_ms")]
    pub animation_duration: Duration,
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self {
            touch_slop: DEFAULT_TOUCH_SLOP,
            min_fling_velocity: DEFAULT_MIN_FLING_VELOCITY,
            max_fling_velocity: DEFAULT_MAX_FLING_VELOCITY,
            animation_duration: DEFAULT_ANIMATION_DURATION,
        }
    }
}

impl SwipeConfig {
    /// Default constants scaled for a display density (1.0 = baseline).
    #[must_use]
    pub fn for_density(density: f32) -> Self {
        Self {
            touch_slop: DEFAULT_TOUCH_SLOP * density,
            min_fling_velocity: DEFAULT_MIN_FLING_VELOCITY * density,
            max_fling_velocity: DEFAULT_MAX_FLING_VELOCITY * density,
            animation_duration: DEFAULT_ANIMATION_DURATION,
        }
    }

    /// Read constants from the platform.
    #[must_use]
    pub fn from_platform(platform: &impl PlatformConstants) -> Self {
        Self {
            touch_slop: platform.scaled_touch_slop(),
            min_fling_velocity: platform.scaled_min_fling_velocity(),
            max_fling_velocity: platform.scaled_max_fling_velocity(),
            animation_duration: platform.short_animation_duration(),
        }
    }

    /// Set the slop distance.
    #[must_use]
    pub fn with_touch_slop(mut self, touch_slop: f32) -> Self {
        self.touch_slop = touch_slop;
        self
    }

    /// Set the fling velocity window.
    #[must_use]
    pub fn with_fling_velocity(mut self, min: f32, max: f32) -> Self {
        self.min_fling_velocity = min;
        self.max_fling_velocity = max;
        self
    }

    /// Set the animation duration.
    #[must_use]
    pub fn with_animation_duration(mut self, duration: Duration) -> Self {
        self.animation_duration = duration;
        self
    }

    /// Check that the thresholds are usable.
    ///
    /// # Errors
    ///
    /// Returns [`SwipeError::InvalidConfig`] for non-finite or negative
    /// values, an inverted fling window, or a zero animation duration.
    pub fn validate(&self) -> SwipeResult<()> {
        let fields = [
            ("touch_slop", self.touch_slop),
            ("min_fling_velocity", self.min_fling_velocity),
            ("max_fling_velocity", self.max_fling_velocity),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(SwipeError::InvalidConfig(format!(
                    "{name} must be a finite non-negative number, got {value}"
                )));
            }
        }

        if self.min_fling_velocity > self.max_fling_velocity {
            return Err(SwipeError::InvalidConfig(format!(
                "min_fling_velocity ({}) exceeds max_fling_velocity ({})",
                self.min_fling_velocity, self.max_fling_velocity
            )));
        }

        if self.animation_duration.is_zero() {
            return Err(SwipeError::InvalidConfig(
                "animation_duration must be non-zero".to_string(),
            ));
        }

        Ok(())
    }

    /// Deserialize a configuration from JSON and validate it.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the values are invalid.
    pub fn from_json(json: &str) -> SwipeResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}

mod duration_ms {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    #[allow(clippy::cast_possible_truncation)] // Animation durations are far below u64::MAX ms
    pub(super) fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_millis() as u64)
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_millis)
    }
}
