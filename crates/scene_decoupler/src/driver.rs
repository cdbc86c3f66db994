//! Frame driver
//!
//! Ticks a [`FrameBroadcaster`] exactly once per frame with the time elapsed
//! since the previous frame. The driver only holds a broadcaster handle, so
//! listeners are free to borrow the registry while they run.

use crate::core::config::FrameConfig;
use crate::foundation::time::Timer;
use crate::frame::FrameBroadcaster;
use std::time::Duration;

/// Host-side frame loop
pub struct FrameDriver {
    timer: Timer,
    frame_budget: Option<Duration>,
    max_frames: Option<u64>,
}

impl FrameDriver {
    /// Create a driver from configuration
    pub fn new(config: &FrameConfig) -> Self {
        let timer = config.fixed_delta.map_or_else(Timer::new, Timer::fixed);
        let frame_budget = config
            .target_fps
            .filter(|fps| *fps > 0)
            .map(|fps| Duration::from_secs_f64(1.0 / f64::from(fps)));

        log::debug!(
            "Frame driver: target_fps={:?}, fixed_delta={:?}, max_frames={:?}",
            config.target_fps,
            config.fixed_delta,
            config.max_frames
        );

        Self {
            timer,
            frame_budget,
            max_frames: config.max_frames,
        }
    }

    /// Run one frame and return the delta passed to listeners
    pub fn tick(&mut self, frames: &FrameBroadcaster) -> f32 {
        if let Some(budget) = self.frame_budget {
            let spent = self.timer.since_last_frame();
            if spent < budget {
                std::thread::sleep(budget - spent);
            }
        }

        self.timer.update();
        let delta_time = self.timer.delta_time();
        frames.broadcast(delta_time);
        delta_time
    }

    /// Run exactly `count` frames
    pub fn run_for(&mut self, frames: &FrameBroadcaster, count: u64) {
        for _ in 0..count {
            self.tick(frames);
        }
    }

    /// Run frames while `keep_running` returns true
    ///
    /// The predicate is checked before each frame. A configured
    /// `max_frames` limit also ends the loop. Returns the number of frames run.
    pub fn run_while<F>(&mut self, frames: &FrameBroadcaster, mut keep_running: F) -> u64
    where
        F: FnMut(&Timer) -> bool,
    {
        let start = self.timer.frame_count();
        while keep_running(&self.timer) {
            if self
                .max_frames
                .is_some_and(|max| self.timer.frame_count() - start >= max)
            {
                break;
            }
            self.tick(frames);
        }

        let ran = self.timer.frame_count() - start;
        log::info!(
            "Frame loop finished after {} frames ({:.1} fps average)",
            ran,
            self.timer.average_fps()
        );
        ran
    }

    /// Frame timer
    pub fn timer(&self) -> &Timer {
        &self.timer
    }
}
