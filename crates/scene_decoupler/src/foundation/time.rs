//! Time management utilities

use std::time::{Duration, Instant};

/// Frame timer
///
/// Measures wall time between [`update`](Self::update) calls, or advances by a
/// fixed step when one is configured.
pub struct Timer {
    last_frame: Instant,
    fixed_step: Option<f32>,
    delta_time: f32,
    total_time: f32,
    frame_count: u64,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    /// Create a wall-clock timer
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            fixed_step: None,
            delta_time: 0.0,
            total_time: 0.0,
            frame_count: 0,
        }
    }

    /// Create a timer that advances by `step` seconds per frame
    pub fn fixed(step: f32) -> Self {
        Self {
            fixed_step: Some(step),
            ..Self::new()
        }
    }

    /// Update the timer (should be called once per frame)
    pub fn update(&mut self) {
        let now = Instant::now();
        let delta = self
            .fixed_step
            .unwrap_or_else(|| now.duration_since(self.last_frame).as_secs_f32());
        self.last_frame = now;
        self.advance(delta);
    }

    /// Record a frame of exactly `delta` seconds
    pub fn advance(&mut self, delta: f32) {
        self.delta_time = delta;
        self.total_time += delta;
        self.frame_count += 1;
    }

    /// Wall time since the last update
    pub fn since_last_frame(&self) -> Duration {
        self.last_frame.elapsed()
    }

    /// Get the time since the last frame in seconds
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Get the total elapsed time since timer creation
    pub fn total_time(&self) -> f32 {
        self.total_time
    }

    /// Get the current frame count
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Whether the timer uses a fixed step
    pub fn is_fixed(&self) -> bool {
        self.fixed_step.is_some()
    }

    /// Get the average FPS since timer creation
    #[allow(clippy::cast_precision_loss)]
    pub fn average_fps(&self) -> f32 {
        if self.total_time > 0.0 {
            self.frame_count as f32 / self.total_time
        } else {
            0.0
        }
    }
}
