//! Obstacle pairs and the timed spawner
//!
//! A pair is an upper and a lower rectangle sharing one x coordinate, with a
//! fixed vertical gap centered on a randomized offset from the world midpoint.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use super::state::SimulationState;
use crate::config::WorldConfig;

/// Which half of a pair an obstacle is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleRole {
    Upper,
    Lower,
}

/// One obstacle rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub rect: Rect,
    pub role: ObstacleRole,
}

/// An upper/lower obstacle pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstaclePair {
    pub id: u32,
    pub upper: Obstacle,
    pub lower: Obstacle,
}

impl ObstaclePair {
    /// Build a pair at `x` whose gap is centered on `center_y`
    pub fn new(id: u32, x: f32, center_y: f32, config: &WorldConfig) -> Self {
        let half_gap = config.obstacle_gap / 2.0;
        let size = config.obstacle_size;
        Self {
            id,
            upper: Obstacle {
                rect: Rect::new(x, center_y - half_gap - size.y, size.x, size.y),
                role: ObstacleRole::Upper,
            },
            lower: Obstacle {
                rect: Rect::new(x, center_y + half_gap, size.x, size.y),
                role: ObstacleRole::Lower,
            },
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.lower.rect.left()
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.lower.rect.right()
    }

    /// Y of the upper obstacle's bottom edge
    #[inline]
    pub fn gap_top(&self) -> f32 {
        self.upper.rect.bottom()
    }

    /// Y of the lower obstacle's top edge
    #[inline]
    pub fn gap_bottom(&self) -> f32 {
        self.lower.rect.top()
    }

    /// Both halves, upper first
    pub fn obstacles(&self) -> [&Obstacle; 2] {
        [&self.upper, &self.lower]
    }

    /// Shift the pair left; both halves move together
    pub fn scroll(&mut self, dx: f32) {
        self.upper.rect.pos.x -= dx;
        self.lower.rect.pos.x -= dx;
    }
}

/// Active obstacle pairs in spawn order (leftmost first)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObstacleSet {
    pairs: Vec<ObstaclePair>,
}

impl ObstacleSet {
    pub fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    pub fn push(&mut self, pair: ObstaclePair) {
        self.pairs.push(pair);
    }

    /// The pair used for scoring: the oldest one still on screen
    pub fn nearest(&self) -> Option<&ObstaclePair> {
        self.pairs.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ObstaclePair> {
        self.pairs.iter()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn clear(&mut self) {
        self.pairs.clear();
    }

    /// Scroll every pair left and retire those fully past the left boundary.
    /// No-op outside `Running`. Returns the number of retired pairs.
    pub fn advance_all(&mut self, state: SimulationState, config: &WorldConfig) -> usize {
        if state != SimulationState::Running {
            return 0;
        }
        for pair in &mut self.pairs {
            pair.scroll(config.scroll_speed);
        }
        let before = self.pairs.len();
        self.pairs.retain(|p| p.right() >= 0.0);
        before - self.pairs.len()
    }
}

/// True when strictly more than `spawn_interval_ms` has elapsed since the last spawn
#[inline]
pub fn spawn_due(now_ms: u64, last_spawn_ms: u64, spawn_interval_ms: u64) -> bool {
    now_ms.saturating_sub(last_spawn_ms) > spawn_interval_ms
}

/// Emits obstacle pairs at a fixed time interval
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Spawner {
    /// Clock time of the last spawn (or of arming)
    pub last_spawn_ms: u64,
    next_id: u32,
}

impl Default for Spawner {
    fn default() -> Self {
        Self::new()
    }
}

impl Spawner {
    pub fn new() -> Self {
        Self {
            last_spawn_ms: 0,
            next_id: 1,
        }
    }

    /// Start the interval countdown from `now_ms`
    pub fn arm(&mut self, now_ms: u64) {
        self.last_spawn_ms = now_ms;
    }

    /// Spawn at most one pair at the right edge of the world if the interval
    /// has elapsed. No-op outside `Running`.
    pub fn maybe_spawn(
        &mut self,
        state: SimulationState,
        now_ms: u64,
        rng: &mut impl Rng,
        config: &WorldConfig,
    ) -> Option<ObstaclePair> {
        if state != SimulationState::Running
            || !spawn_due(now_ms, self.last_spawn_ms, config.spawn_interval_ms)
        {
            return None;
        }

        let offset = rng.random_range(-config.offset_range..=config.offset_range);
        let id = self.next_id;
        self.next_id += 1;
        self.last_spawn_ms = now_ms;

        log::debug!("Spawned obstacle pair {} at {} ms (offset {})", id, now_ms, offset);
        Some(ObstaclePair::new(
            id,
            config.width,
            config.mid_y() + offset as f32,
            config,
        ))
    }
}
