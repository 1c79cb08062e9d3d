//! Frame timing utilities
//!
//! The simulation scales every per-frame delta by the elapsed time of the
//! frame. A [`Clock`] hands out that elapsed time; [`FrameTimer`] reads the
//! wall clock, [`FixedClock`] returns a constant step for headless runs and
//! tests.

use std::time::{Duration, Instant};

/// Source of per-frame elapsed time.
pub trait Clock {
    /// Seconds elapsed since the previous call.
    fn delta(&mut self) -> f32;
}

/// Wall-clock frame timer
pub struct FrameTimer {
    last_frame: Instant,
    delta: Duration,
    frame_count: u64,
}

impl FrameTimer {
    /// Create a new frame timer
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            delta: Duration::ZERO,
            frame_count: 0,
        }
    }

    /// Call once per frame to update timing
    pub fn tick(&mut self) {
        let now = Instant::now();
        self.delta = now - self.last_frame;
        self.last_frame = now;
        self.frame_count += 1;
    }

    /// Get delta time in seconds
    pub fn delta_secs(&self) -> f32 {
        self.delta.as_secs_f32()
    }

    /// Get total frame count
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for FrameTimer {
    fn delta(&mut self) -> f32 {
        self.tick();
        self.delta_secs()
    }
}

/// Clock that advances by the same step every frame.
#[derive(Clone, Copy, Debug)]
pub struct FixedClock {
    step: f32,
    elapsed: f64,
}

impl FixedClock {
    /// Create a clock with the given step in seconds. Negative steps count as zero.
    pub fn new(step: f32) -> Self {
        Self {
            step: step.max(0.0),
            elapsed: 0.0,
        }
    }

    /// Total simulated time handed out so far.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }
}

impl Default for FixedClock {
    fn default() -> Self {
        Self::new(1.0 / 60.0)
    }
}

impl Clock for FixedClock {
    fn delta(&mut self) -> f32 {
        self.elapsed += self.step as f64;
        self.step
    }
}
