//! The controllable actor: vertical physics, debounced jump, flap animation

use serde::{Deserialize, Serialize};

use super::rect::Rect;
use super::state::SimulationState;
use crate::config::WorldConfig;
use crate::consts::*;

/// The player's actor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    /// Bounding box (x stays fixed, y is integrated)
    pub rect: Rect,
    /// Vertical velocity (positive = downward)
    pub vel: f32,
    /// Current animation frame
    pub anim_index: u8,
    /// Ticks since the last animation frame change
    pub anim_counter: u32,
    /// Set while the jump input is held after a press (one impulse per press)
    jump_latched: bool,
}

impl Actor {
    pub fn new(config: &WorldConfig) -> Self {
        Self {
            rect: Rect {
                pos: config.actor_start,
                size: config.actor_size,
            },
            vel: 0.0,
            anim_index: 0,
            anim_counter: 0,
            jump_latched: false,
        }
    }

    /// Put the actor back at its start position, at rest
    pub fn reset(&mut self, config: &WorldConfig) {
        self.rect.pos = config.actor_start;
        self.vel = 0.0;
    }

    /// Edge detector: true only on the first tick the input is held
    #[inline]
    pub fn jump_pressed(&self, jump_held: bool) -> bool {
        jump_held && !self.jump_latched
    }

    #[inline]
    pub fn is_jump_latched(&self) -> bool {
        self.jump_latched
    }

    /// Advance the actor by `dt_ticks` fixed ticks
    ///
    /// Gravity, position and jumps only apply while `Running`. Position stops
    /// once the bottom edge reaches the ground line; the collision evaluator
    /// turns that contact into the end of the run. A jump press replaces the
    /// velocity with the impulse after integration, so it shows immediately.
    /// The press latch follows the input in every state, so a button held
    /// through a restart is not a fresh press.
    pub fn advance(
        &mut self,
        dt_ticks: u32,
        jump_held: bool,
        state: SimulationState,
        config: &WorldConfig,
    ) {
        if state == SimulationState::Running {
            let ground = config.ground_line();
            for _ in 0..dt_ticks {
                self.vel = (self.vel + config.gravity).min(config.terminal_velocity);
                if self.rect.bottom() < ground {
                    self.rect.pos.y += self.vel;
                }
            }
            if self.jump_pressed(jump_held) {
                self.vel = config.jump_impulse;
            }
        }
        self.jump_latched = jump_held;

        if state == SimulationState::Over {
            return;
        }
        for _ in 0..dt_ticks {
            self.anim_counter += 1;
            if self.anim_counter > config.flap_cooldown {
                self.anim_counter = 0;
                self.anim_index = (self.anim_index + 1) % config.anim_frames;
            }
        }
    }

    /// Sprite rotation in degrees (counter-clockwise positive)
    pub fn rotation_deg(&self, state: SimulationState) -> f32 {
        match state {
            SimulationState::Over => NOSE_DOWN_DEG,
            _ => self.vel * ROTATION_PER_VELOCITY,
        }
    }
}
