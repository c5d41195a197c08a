//! Frame clock for the game loop.

use std::time::{Duration, Instant};

/// Measures the wall-clock delta between frames from a monotonic clock.
///
/// The simulation is frame-coupled: whatever `delta_seconds` reports is fed
/// straight into the lane advance, so displacement per real second is
/// independent of frame rate.
#[derive(Debug)]
pub struct Time {
    /// Time of the last frame.
    last_frame: Instant,
    /// Duration of the last frame.
    delta: Duration,
    /// Frame count since start.
    frame_count: u64,
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}

impl Time {
    /// Create a new clock starting now.
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    fn starting_at(now: Instant) -> Self {
        Self {
            last_frame: now,
            delta: Duration::ZERO,
            frame_count: 0,
        }
    }

    /// Update timing at the start of a new frame.
    pub fn update(&mut self) {
        self.update_at(Instant::now());
    }

    /// Update timing as if the frame started at `now`.
    pub fn update_at(&mut self, now: Instant) {
        self.delta = now.saturating_duration_since(self.last_frame);
        self.last_frame = now;
        self.frame_count += 1;
    }

    /// Get the delta time in seconds.
    pub fn delta_seconds(&self) -> f32 {
        self.delta.as_secs_f32()
    }

    /// Get the delta time as a Duration.
    pub fn delta(&self) -> Duration {
        self.delta
    }

    /// Get the current frame count.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delta_is_time_since_previous_frame() {
        let start = Instant::now();
        let mut time = Time::starting_at(start);
        time.update_at(start + Duration::from_millis(100));
        time.update_at(start + Duration::from_millis(250));
        assert_eq!(time.delta(), Duration::from_millis(150));
        assert_eq!(time.frame_count(), 2);
    }

    #[test]
    fn delta_is_zero_before_first_frame() {
        let time = Time::new();
        assert_eq!(time.delta_seconds(), 0.0);
        assert_eq!(time.frame_count(), 0);
    }

    #[test]
    fn clock_going_backwards_yields_zero_delta() {
        let start = Instant::now();
        let mut time = Time::starting_at(start + Duration::from_millis(10));
        time.update_at(start);
        assert_eq!(time.delta(), Duration::ZERO);
    }
}
