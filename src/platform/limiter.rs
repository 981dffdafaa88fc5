//! Frame-rate limiter
//!
//! Blocks the driving thread until the next frame is due. Simulation code
//! never calls this; only the outer loop does.

use std::thread;
use std::time::{Duration, Instant};

/// Frames averaged for the FPS readout
const FPS_WINDOW: usize = 60;

/// Paces a loop to a fixed target rate
#[derive(Debug)]
pub struct FrameLimiter {
    frame_budget: Duration,
    last_frame: Instant,
    frame_times: [Option<Instant>; FPS_WINDOW],
    frame_index: usize,
}

impl FrameLimiter {
    pub fn new(target_hz: u32) -> Self {
        Self {
            frame_budget: Duration::from_secs(1) / target_hz.max(1),
            last_frame: Instant::now(),
            frame_times: [None; FPS_WINDOW],
            frame_index: 0,
        }
    }

    pub fn frame_budget(&self) -> Duration {
        self.frame_budget
    }

    /// Sleep for whatever is left of the current frame budget.
    /// Returns how long it slept (zero if the frame overran).
    pub fn wait(&mut self) -> Duration {
        let elapsed = self.last_frame.elapsed();
        let slept = self.frame_budget.saturating_sub(elapsed);
        if !slept.is_zero() {
            thread::sleep(slept);
        }

        let now = Instant::now();
        self.last_frame = now;
        self.frame_times[self.frame_index] = Some(now);
        self.frame_index = (self.frame_index + 1) % FPS_WINDOW;
        slept
    }

    /// Average frames per second over the last window (0 until it fills)
    pub fn fps(&self) -> u32 {
        // Oldest entry is the one about to be overwritten
        let oldest = self.frame_times[self.frame_index];
        let newest = self.frame_times[(self.frame_index + FPS_WINDOW - 1) % FPS_WINDOW];
        match (oldest, newest) {
            (Some(oldest), Some(newest)) => {
                let elapsed = newest.duration_since(oldest).as_secs_f64();
                if elapsed > 0.0 {
                    ((FPS_WINDOW - 1) as f64 / elapsed).round() as u32
                } else {
                    0
                }
            }
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_budget() {
        let limiter = FrameLimiter::new(50);
        assert_eq!(limiter.frame_budget(), Duration::from_millis(20));
    }

    #[test]
    fn test_wait_paces_frames() {
        let mut limiter = FrameLimiter::new(100);
        let start = Instant::now();
        for _ in 0..5 {
            limiter.wait();
        }
        // Five 10 ms frames; sleep may overshoot but never undershoot
        assert!(start.elapsed() >= Duration::from_millis(40));
    }

    #[test]
    fn test_no_sleep_after_overrun() {
        let mut limiter = FrameLimiter::new(1000);
        thread::sleep(Duration::from_millis(5));
        assert_eq!(limiter.wait(), Duration::ZERO);
    }

    #[test]
    fn test_fps_zero_until_window_fills() {
        let mut limiter = FrameLimiter::new(1000);
        limiter.wait();
        assert_eq!(limiter.fps(), 0);
    }
}
