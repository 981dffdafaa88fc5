//! Immutable per-tick render snapshot
//!
//! Copies everything a renderer needs out of the simulation so drawing never
//! holds a reference into live state. A snapshot always describes a fully
//! settled tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::EndCause;
use super::obstacle::ObstacleRole;
use super::rect::Rect;
use super::state::{SimulationContext, SimulationState, Transition};

/// What a sprite depicts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpriteKind {
    Actor,
    ObstacleUpper,
    ObstacleLower,
}

impl From<ObstacleRole> for SpriteKind {
    fn from(role: ObstacleRole) -> Self {
        match role {
            ObstacleRole::Upper => SpriteKind::ObstacleUpper,
            ObstacleRole::Lower => SpriteKind::ObstacleLower,
        }
    }
}

/// One drawable entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderDescriptor {
    pub kind: SpriteKind,
    /// Top-left position
    pub position: Vec2,
    pub size: Vec2,
    /// Degrees, counter-clockwise positive
    pub rotation_deg: f32,
    /// Animation frame (always 0 for obstacles)
    pub frame_index: u8,
}

impl RenderDescriptor {
    fn obstacle(kind: SpriteKind, rect: &Rect) -> Self {
        Self {
            kind,
            position: rect.pos,
            size: rect.size,
            rotation_deg: 0.0,
            frame_index: 0,
        }
    }
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderSnapshot {
    pub tick: u64,
    pub actor: RenderDescriptor,
    /// Obstacles in spawn order (upper before lower within a pair)
    pub obstacles: Vec<RenderDescriptor>,
    pub score: u32,
    pub best: u32,
    pub state: SimulationState,
    pub end_cause: Option<EndCause>,
    /// Set only after a ground ending: the running flag is already down
    pub restart_eligible: bool,
    /// State changes that happened during this tick
    pub transitions: Vec<Transition>,
    /// Horizontal offset of the ground band
    pub ground_offset: f32,
}

impl RenderSnapshot {
    /// Copy the drawable state out of the context
    pub fn capture(ctx: &SimulationContext) -> Self {
        let state = ctx.state();
        let actor = &ctx.actor;

        let obstacles = ctx
            .obstacles
            .iter()
            .flat_map(|pair| pair.obstacles())
            .map(|o| RenderDescriptor::obstacle(o.role.into(), &o.rect))
            .collect();

        Self {
            tick: ctx.tick_count,
            actor: RenderDescriptor {
                kind: SpriteKind::Actor,
                position: actor.rect.pos,
                size: actor.rect.size,
                rotation_deg: actor.rotation_deg(state),
                frame_index: actor.anim_index,
            },
            obstacles,
            score: ctx.score.score,
            best: ctx.score.best,
            state,
            end_cause: ctx.machine.end_cause(),
            restart_eligible: ctx.machine.restart_eligible(),
            transitions: Vec::new(),
            ground_offset: ctx.ground_offset,
        }
    }

    /// Serialize for an out-of-process renderer
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WorldConfig;
    use crate::sim::obstacle::ObstaclePair;

    #[test]
    fn test_capture_idle() {
        let config = WorldConfig::default();
        let ctx = SimulationContext::new(&config);
        let snap = RenderSnapshot::capture(&ctx);
        assert_eq!(snap.state, SimulationState::Idle);
        assert_eq!(snap.actor.kind, SpriteKind::Actor);
        assert_eq!(snap.actor.position, config.actor_start);
        assert!(snap.obstacles.is_empty());
        assert_eq!(snap.end_cause, None);
        assert!(!snap.restart_eligible);
        assert!(snap.transitions.is_empty());
    }

    #[test]
    fn test_capture_obstacles_tagged() {
        let config = WorldConfig::default();
        let mut ctx = SimulationContext::new(&config);
        ctx.obstacles.push(ObstaclePair::new(1, 300.0, 320.0, &config));
        ctx.obstacles.push(ObstaclePair::new(2, 480.0, 250.0, &config));

        let snap = RenderSnapshot::capture(&ctx);
        let kinds: Vec<_> = snap.obstacles.iter().map(|d| d.kind).collect();
        assert_eq!(
            kinds,
            vec![
                SpriteKind::ObstacleUpper,
                SpriteKind::ObstacleLower,
                SpriteKind::ObstacleUpper,
                SpriteKind::ObstacleLower,
            ]
        );
        assert_eq!(snap.obstacles[2].position.x, 480.0);
    }

    #[test]
    fn test_snapshot_is_detached() {
        let config = WorldConfig::default();
        let mut ctx = SimulationContext::new(&config);
        let snap = RenderSnapshot::capture(&ctx);
        ctx.actor.rect.pos.y = 10.0;
        assert_eq!(snap.actor.position.y, 320.0);
    }

    #[test]
    fn test_json_output() {
        let config = WorldConfig::default();
        let ctx = SimulationContext::new(&config);
        let json = RenderSnapshot::capture(&ctx).to_json().unwrap();
        assert!(json.contains("\"state\":\"Idle\""));
        let back: RenderSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.actor.position, config.actor_start);
        assert!(back.obstacles.is_empty());
    }

    #[test]
    fn test_json_without_actor_is_an_error() {
        let config = WorldConfig::default();
        let ctx = SimulationContext::new(&config);
        let mut value: serde_json::Value =
            serde_json::from_str(&RenderSnapshot::capture(&ctx).to_json().unwrap()).unwrap();
        value.as_object_mut().unwrap().remove("actor");
        assert!(serde_json::from_value::<RenderSnapshot>(value).is_err());
    }
}
