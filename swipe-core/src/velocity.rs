//! # Velocity Tracking
//!
//! Estimates pointer velocity from timestamped samples.
//!
//! Only the recent past matters for a fling: samples older than
//! [`HORIZON_MS`] relative to the newest sample are ignored, and a pause
//! longer than [`STOPPED_MS`] between two samples discards everything before
//! the pause. Velocity per axis is the least-squares slope of position over
//! time across the remaining samples.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::event::PointerEvent;

/// Maximum number of samples retained.
pub const HISTORY_SIZE: usize = 20;

/// Samples older than this (relative to the newest) are ignored.
pub const HORIZON_MS: u64 = 100;

/// A gap longer than this between samples means the pointer stopped.
pub const STOPPED_MS: u64 = 40;

/// Pointer velocity in pixels per second.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Velocity {
    /// Horizontal velocity (positive = rightwards).
    pub x: f32,
    /// Vertical velocity (positive = downwards).
    pub y: f32,
}

#[derive(Debug, Clone, Copy)]
struct Sample {
    x: f32,
    y: f32,
    timestamp_ms: u64,
}

/// Accumulates pointer samples for the active gesture session.
///
/// The sample buffer is allocated once and reused across sessions via
/// [`VelocityTracker::clear`].
#[derive(Debug, Clone)]
pub struct VelocityTracker {
    samples: VecDeque<Sample>,
}

impl VelocityTracker {
    /// Create an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self {
            samples: VecDeque::with_capacity(HISTORY_SIZE),
        }
    }

    /// Add a pointer sample.
    ///
    /// Samples that go back in time are dropped.
    pub fn add(&mut self, event: &PointerEvent) {
        if let Some(last) = self.samples.back() {
            if event.timestamp_ms < last.timestamp_ms {
                return;
            }
            if event.timestamp_ms - last.timestamp_ms > STOPPED_MS {
                self.samples.clear();
            }
        }

        if self.samples.len() == HISTORY_SIZE {
            self.samples.pop_front();
        }
        self.samples.push_back(Sample {
            x: event.x,
            y: event.y,
            timestamp_ms: event.timestamp_ms,
        });
    }

    /// Compute the current velocity.
    ///
    /// Returns zero when fewer than two samples fall within the horizon.
    #[must_use]
    #[allow(clippy::cast_precision_loss)] // Relative times are a few hundred ms at most
    pub fn velocity(&self) -> Velocity {
        let Some(newest) = self.samples.back() else {
            return Velocity::default();
        };

        let recent = || {
            self.samples
                .iter()
                .filter(move |s| newest.timestamp_ms - s.timestamp_ms <= HORIZON_MS)
                .map(move |s| {
                    let age_secs = (newest.timestamp_ms - s.timestamp_ms) as f32 / 1000.0;
                    (-age_secs, s.x, s.y)
                })
        };

        let count = recent().count();
        if count < 2 {
            return Velocity::default();
        }

        let samples = count as f32;
        let (sum_t, sum_x, sum_y) = recent()
            .fold((0.0_f32, 0.0_f32, 0.0_f32), |(st, sx, sy), (time, px, py)| {
                (st + time, sx + px, sy + py)
            });
        let (mean_t, mean_x, mean_y) = (sum_t / samples, sum_x / samples, sum_y / samples);

        let (var_t, cov_x, cov_y) =
            recent().fold((0.0_f32, 0.0_f32, 0.0_f32), |(vt, cx, cy), (time, px, py)| {
                let dt = time - mean_t;
                (vt + dt * dt, cx + dt * (px - mean_x), cy + dt * (py - mean_y))
            });

        if var_t <= f32::EPSILON {
            return Velocity::default();
        }

        Velocity {
            x: cov_x / var_t,
            y: cov_y / var_t,
        }
    }

    /// Number of retained samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether no samples are retained.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Forget all samples, keeping the buffer.
    pub fn clear(&mut self) {
        self.samples.clear();
    }
}

impl Default for VelocityTracker {
    fn default() -> Self {
        Self::new()
    }
}
