//! Frame timing and loop pacing

use std::time::{Duration, Instant};

/// Weight of the newest frame in the smoothed frame time
const SMOOTHING: f64 = 0.1;

/// Frame clock feeding the statistics overlay
///
/// Ticked once per completed frame, after presentation.
#[derive(Debug, Clone)]
pub struct Timer {
    started: Instant,
    last_tick: Instant,
    frame_time: Duration,
    smoothed_ms: f64,
    frames: u64,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    /// Start the clock now
    pub fn new() -> Self {
        let now = Instant::now();
        Self { started: now, last_tick: now, frame_time: Duration::ZERO, smoothed_ms: 0.0, frames: 0 }
    }

    /// Record the end of a frame
    pub fn tick(&mut self) {
        let now = Instant::now();
        self.frame_time = now - self.last_tick;
        self.last_tick = now;
        self.frames += 1;

        let ms = self.frame_time.as_secs_f64() * 1000.0;
        self.smoothed_ms =
            if self.frames == 1 { ms } else { SMOOTHING.mul_add(ms - self.smoothed_ms, self.smoothed_ms) };
    }

    /// Duration of the last completed frame
    pub const fn frame_time(&self) -> Duration {
        self.frame_time
    }

    /// Frame time averaged over recent frames, in milliseconds
    pub const fn smoothed_frame_ms(&self) -> f64 {
        self.smoothed_ms
    }

    /// Time since the clock started
    pub fn elapsed(&self) -> Duration {
        self.last_tick - self.started
    }

    /// Completed frames
    pub const fn frame_count(&self) -> u64 {
        self.frames
    }

    /// Rate implied by the last frame alone
    pub fn current_fps(&self) -> f64 {
        let secs = self.frame_time.as_secs_f64();
        if secs > 0.0 { secs.recip() } else { 0.0 }
    }

    /// Rate over the whole run
    #[allow(clippy::cast_precision_loss)]
    pub fn average_fps(&self) -> f64 {
        let secs = self.elapsed().as_secs_f64();
        if secs > 0.0 { self.frames as f64 / secs } else { 0.0 }
    }
}

/// Fixed end-of-iteration delay so the loop does not busy-spin
///
/// This is not a frame limiter: the delay is constant regardless of how long
/// the frame took.
#[derive(Debug, Clone, Copy)]
pub struct FramePacer {
    interval: Duration,
}

impl FramePacer {
    /// Create a pacer sleeping `interval_ms` milliseconds per iteration
    pub const fn from_millis(interval_ms: u64) -> Self {
        Self { interval: Duration::from_millis(interval_ms) }
    }

    /// The configured delay
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Sleep for the configured delay; a zero interval returns immediately
    pub fn pace(&self) {
        if !self.interval.is_zero() {
            std::thread::sleep(self.interval);
        }
    }
}
