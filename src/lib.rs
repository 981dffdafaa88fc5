//! Flappy Sim - fixed-tick obstacle-avoidance simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, obstacles, collisions, game state)
//! - `config`: World constants, loaded from JSON and validated before play
//! - `platform`: Clock sources and the frame-rate limiter
//!
//! Rendering, audio and asset loading live outside this crate. Each tick
//! produces a [`sim::RenderSnapshot`] for whoever draws the frame.

pub mod config;
pub mod platform;
pub mod sim;

pub use config::{ConfigError, WorldConfig};
pub use sim::{RenderSnapshot, Simulation, SimulationState, TickInput};

/// Game configuration constants
pub mod consts {
    /// Target tick rate (Hz); the simulation is tick-coupled
    pub const TICK_RATE_HZ: u32 = 60;

    /// Number of actor animation frames (down, mid, up flap)
    pub const ACTOR_ANIM_FRAMES: u8 = 3;

    /// Ticks between animation frame advances (advance when counter exceeds this)
    pub const FLAP_COOLDOWN: u32 = 5;

    /// Rotation multiplier: degrees per unit of vertical velocity
    pub const ROTATION_PER_VELOCITY: f32 = -2.0;

    /// Fixed orientation once the run is over (nose down)
    pub const NOSE_DOWN_DEG: f32 = -90.0;

    /// Ground band offset wraps to zero past this magnitude
    pub const GROUND_SCROLL_WRAP: f32 = 35.0;
}
