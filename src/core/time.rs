//! Frame timing

use std::time::{Duration, Instant};

/// Tracks time between frames
#[derive(Debug)]
pub struct Time {
    /// When the clock was created
    start: Instant,
    /// When the previous frame began
    last_frame: Instant,
    /// Time elapsed between the last two frames
    delta: Duration,
    /// Frames counted so far
    frame_count: u64,
}

impl Time {
    /// Create a new clock starting now
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last_frame: now,
            delta: Duration::ZERO,
            frame_count: 0,
        }
    }

    /// Advance to a new frame
    pub fn update(&mut self) {
        let now = Instant::now();
        self.delta = now - self.last_frame;
        self.last_frame = now;
        self.frame_count += 1;
    }

    /// Advance by a fixed step, used by the headless loop
    pub fn advance(&mut self, step: Duration) {
        self.delta = step;
        self.last_frame += step;
        self.frame_count += 1;
    }

    /// Duration of the last frame
    pub fn delta(&self) -> Duration {
        self.delta
    }

    /// Duration of the last frame in seconds
    pub fn delta_seconds(&self) -> f32 {
        self.delta.as_secs_f32()
    }

    /// Time since the clock was created
    pub fn elapsed(&self) -> Duration {
        self.last_frame - self.start
    }

    /// Number of frames advanced
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_step_advance() {
        let mut time = Time::new();
        time.advance(Duration::from_millis(16));
        time.advance(Duration::from_millis(16));

        assert_eq!(time.frame_count(), 2);
        assert_eq!(time.delta(), Duration::from_millis(16));
        assert_eq!(time.elapsed(), Duration::from_millis(32));
    }
}
