//! World configuration
//!
//! Every tunable constant of the simulation lives here. Values are fixed for
//! the lifetime of a run; they are loaded (optionally from JSON) and validated
//! once before the loop starts.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised while loading or validating a [`WorldConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config field `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Fixed world constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    // === World ===
    /// World width in units
    pub width: f32,
    /// World height in units
    pub height: f32,
    /// Height of the ground band at the bottom of the world
    pub ground_height: f32,

    // === Actor ===
    /// Initial top-left corner of the actor
    pub actor_start: Vec2,
    /// Actor bounding box size
    pub actor_size: Vec2,
    /// Velocity added each tick while running
    pub gravity: f32,
    /// Maximum downward velocity
    pub terminal_velocity: f32,
    /// Velocity set by a jump (negative = upward)
    pub jump_impulse: f32,
    /// Number of animation frames the actor cycles through
    pub anim_frames: u8,
    /// Ticks between animation frame advances
    pub flap_cooldown: u32,

    // === Obstacles ===
    /// Horizontal scroll per tick
    pub scroll_speed: f32,
    /// Minimum time between two spawned pairs (strictly exceeded)
    pub spawn_interval_ms: u64,
    /// Total vertical opening between the upper and lower obstacle
    pub obstacle_gap: f32,
    /// Size of each obstacle rectangle
    pub obstacle_size: Vec2,
    /// Gap center offset is drawn uniformly from `-offset_range..=offset_range`
    pub offset_range: i32,

    // === Timing ===
    /// Fixed tick rate
    pub tick_rate_hz: u32,
    /// Seed for the obstacle offset RNG
    pub seed: u64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 480.0,
            height: 640.0,
            ground_height: 64.0,

            actor_start: Vec2::new(100.0, 320.0),
            actor_size: Vec2::new(34.0, 24.0),
            gravity: 0.6,
            terminal_velocity: 8.0,
            jump_impulse: -10.0,
            anim_frames: ACTOR_ANIM_FRAMES,
            flap_cooldown: FLAP_COOLDOWN,

            scroll_speed: 4.0,
            spawn_interval_ms: 1500,
            obstacle_gap: 150.0,
            obstacle_size: Vec2::new(80.0, 400.0),
            offset_range: 100,

            tick_rate_hz: TICK_RATE_HZ,
            seed: 0,
        }
    }
}

impl WorldConfig {
    /// Y coordinate of the top of the ground band
    #[inline]
    pub fn ground_line(&self) -> f32 {
        self.height - self.ground_height
    }

    /// Vertical midpoint of the world (obstacle gaps are centered around it)
    #[inline]
    pub fn mid_y(&self) -> f32 {
        (self.height / 2.0).floor()
    }

    /// Duration of one tick in milliseconds
    #[inline]
    pub fn tick_ms(&self) -> f64 {
        1000.0 / self.tick_rate_hz as f64
    }

    /// Reject configurations the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn invalid(field: &'static str, reason: &'static str) -> Result<(), ConfigError> {
            Err(ConfigError::Invalid { field, reason })
        }

        // Written as negated comparisons so NaN is rejected too
        if !(self.width > 0.0) {
            return invalid("width", "must be positive");
        }
        if !(self.height > 0.0) {
            return invalid("height", "must be positive");
        }
        if !(self.ground_height >= 0.0) || self.ground_height >= self.height {
            return invalid("ground_height", "must lie within the world height");
        }
        if !(self.actor_size.x > 0.0) || !(self.actor_size.y > 0.0) {
            return invalid("actor_size", "must be positive");
        }
        if !(self.actor_start.y >= 0.0) || self.actor_start.y + self.actor_size.y >= self.ground_line() {
            return invalid("actor_start", "actor must start between the ceiling and the ground");
        }
        if !(self.gravity >= 0.0) {
            return invalid("gravity", "must not be negative");
        }
        if !(self.terminal_velocity > 0.0) {
            return invalid("terminal_velocity", "must be positive");
        }
        if !(self.jump_impulse < 0.0) {
            return invalid("jump_impulse", "must be negative (upward)");
        }
        if self.anim_frames == 0 {
            return invalid("anim_frames", "must be at least 1");
        }
        if !(self.scroll_speed >= 0.0) {
            return invalid("scroll_speed", "must not be negative");
        }
        if !(self.obstacle_gap > 0.0) {
            return invalid("obstacle_gap", "must be positive");
        }
        if !(self.obstacle_size.x > 0.0) || !(self.obstacle_size.y > 0.0) {
            return invalid("obstacle_size", "must be positive");
        }
        if self.offset_range < 0 {
            return invalid("offset_range", "must not be negative");
        }
        if self.tick_rate_hz == 0 {
            return invalid("tick_rate_hz", "must be positive");
        }
        Ok(())
    }

    /// Parse a JSON document (missing fields take their defaults) and validate it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded world config from {}", path.as_ref().display());
        Ok(config)
    }
}
