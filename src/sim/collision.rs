//! Collision detection and pass-through scoring
//!
//! Tests the actor against every active obstacle and the world bounds, and
//! credits at most one point per obstacle pair.

use serde::{Deserialize, Serialize};

use super::actor::Actor;
use super::obstacle::ObstacleSet;
use super::state::ScoreState;
use crate::config::WorldConfig;

/// What ended a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndCause {
    /// Actor rectangle overlapped an obstacle
    Obstacle,
    /// Actor top edge went above the world
    Ceiling,
    /// Actor bottom edge reached the ground line
    Ground,
}

impl EndCause {
    /// Ground contact also drops the running flag
    #[inline]
    pub fn clears_running(self) -> bool {
        self == EndCause::Ground
    }
}

/// Result of one evaluation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollisionOutcome {
    /// Any terminal contact this tick
    pub collided: bool,
    /// A pair was credited this tick
    pub scored: bool,
    /// Most significant contact (ground wins over obstacle over ceiling)
    pub cause: Option<EndCause>,
}

/// Check collisions and update pass-through scoring
pub fn evaluate(
    actor: &Actor,
    obstacles: &ObstacleSet,
    score: &mut ScoreState,
    config: &WorldConfig,
) -> CollisionOutcome {
    let rect = &actor.rect;

    let hit_obstacle = obstacles
        .iter()
        .flat_map(|pair| pair.obstacles())
        .any(|o| rect.intersects(&o.rect));
    let hit_ceiling = rect.top() < 0.0;
    let hit_ground = rect.bottom() >= config.ground_line();

    let cause = if hit_ground {
        Some(EndCause::Ground)
    } else if hit_obstacle {
        Some(EndCause::Obstacle)
    } else if hit_ceiling {
        Some(EndCause::Ceiling)
    } else {
        None
    };

    let mut scored = false;
    if let Some(nearest) = obstacles.nearest() {
        if !score.pending_pass && rect.strictly_within_x(&nearest.lower.rect) {
            score.pending_pass = true;
        }
        if score.pending_pass && rect.left() > nearest.right() {
            score.score += 1;
            score.pending_pass = false;
            scored = true;
            log::debug!("Passed pair {}, score {}", nearest.id, score.score);
        }
    }

    CollisionOutcome {
        collided: cause.is_some(),
        scored,
        cause,
    }
}
