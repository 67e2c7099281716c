//! Frame timing.
//!
//! The simulation advances by a fixed step every frame, whatever the wall
//! clock says. [`FrameClock`] hands out that step and keeps an FPS estimate
//! for the window title and debug logs.
//!
//! # Example
//!
//! ```
//! use embers::time::FrameClock;
//!
//! let mut clock = FrameClock::new(0.01);
//! let dt = clock.tick();
//! assert_eq!(dt, 0.01);
//! assert_eq!(clock.frame(), 1);
//! ```

use std::time::{Duration, Instant};

/// Default simulation step in seconds.
pub const FIXED_STEP: f32 = 0.01;

/// Fixed-step frame clock with FPS tracking.
#[derive(Debug)]
pub struct FrameClock {
    /// Seconds of simulated time per frame.
    step: f32,
    /// Frames ticked so far.
    frame_count: u64,
    /// Last FPS estimate.
    fps: f32,
    /// Frame count at the last FPS refresh.
    fps_frame_count: u64,
    /// When the FPS estimate was last refreshed.
    fps_update_time: Instant,
    /// How often to refresh the FPS estimate.
    fps_update_interval: Duration,
}

impl FrameClock {
    /// Create a clock that advances the simulation by `step` per frame.
    pub fn new(step: f32) -> Self {
        Self::starting_at(step, Instant::now())
    }

    fn starting_at(step: f32, now: Instant) -> Self {
        Self {
            step,
            frame_count: 0,
            fps: 0.0,
            fps_frame_count: 0,
            fps_update_time: now,
            fps_update_interval: Duration::from_millis(500),
        }
    }

    /// Count a frame and return the simulation step.
    pub fn tick(&mut self) -> f32 {
        self.tick_at(Instant::now())
    }

    /// Like [`tick`](Self::tick) with an explicit timestamp.
    ///
    /// Returns the same fixed step whatever `now` is; `now` only feeds the
    /// FPS estimate.
    pub fn tick_at(&mut self, now: Instant) -> f32 {
        self.frame_count += 1;

        let since = now.saturating_duration_since(self.fps_update_time);
        if since >= self.fps_update_interval {
            let frames = self.frame_count - self.fps_frame_count;
            self.fps = frames as f32 / since.as_secs_f32();
            self.fps_frame_count = self.frame_count;
            self.fps_update_time = now;
            log::debug!("{:.1} fps over {} frames", self.fps, frames);
        }

        self.step
    }

    /// Simulation step per frame.
    #[inline]
    pub fn step(&self) -> f32 {
        self.step
    }

    /// Frames ticked since creation.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Simulated seconds since creation.
    #[inline]
    pub fn simulated(&self) -> f32 {
        self.frame_count as f32 * self.step
    }

    /// Latest FPS estimate (0 until the first refresh).
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(FIXED_STEP)
    }
}
