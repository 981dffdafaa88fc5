//! Platform abstraction layer
//!
//! Handles the parts of the loop that touch the host:
//! - Time (wall clock or deterministic tick clock)
//! - Frame pacing (the only place the driving thread sleeps)

pub mod clock;
pub mod limiter;

pub use clock::{Clock, SystemClock, TickClock};
pub use limiter::FrameLimiter;
