//! Millisecond clock sources
//!
//! The simulation only reads time to gate obstacle spawning. Any source
//! works as long as it never goes backwards.

use std::time::Instant;

/// Monotonic, non-decreasing milliseconds since an arbitrary epoch
pub trait Clock {
    fn now_ms(&mut self) -> u64;
}

/// Wall clock, measured from construction
#[derive(Debug, Clone)]
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&mut self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

/// Deterministic clock that moves exactly one tick per `advance()`
///
/// Time is derived from the tick count, so fractional milliseconds
/// (16.67 ms at 60 Hz) never accumulate rounding drift.
#[derive(Debug, Clone)]
pub struct TickClock {
    ticks: u64,
    rate_hz: u32,
}

impl TickClock {
    pub fn new(rate_hz: u32) -> Self {
        Self {
            ticks: 0,
            rate_hz: rate_hz.max(1),
        }
    }

    pub fn advance(&mut self) {
        self.ticks += 1;
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

impl Clock for TickClock {
    fn now_ms(&mut self) -> u64 {
        self.ticks * 1000 / self.rate_hz as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_clock_60hz() {
        let mut clock = TickClock::new(60);
        assert_eq!(clock.now_ms(), 0);
        for _ in 0..90 {
            clock.advance();
        }
        assert_eq!(clock.now_ms(), 1500);
        clock.advance();
        assert_eq!(clock.now_ms(), 1516);
        assert_eq!(clock.ticks(), 91);
    }

    #[test]
    fn test_system_clock_monotonic() {
        let mut clock = SystemClock::new();
        let a = clock.now_ms();
        let b = clock.now_ms();
        assert!(b >= a);
    }
}
