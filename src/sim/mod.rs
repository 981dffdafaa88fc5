//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed tick only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod actor;
pub mod collision;
pub mod obstacle;
pub mod rect;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use actor::Actor;
pub use collision::{CollisionOutcome, EndCause, evaluate};
pub use obstacle::{Obstacle, ObstaclePair, ObstacleRole, ObstacleSet, Spawner, spawn_due};
pub use rect::Rect;
pub use snapshot::{RenderDescriptor, RenderSnapshot, SpriteKind};
pub use state::{GameStateMachine, ScoreState, SimulationContext, SimulationState, Transition};
pub use tick::{Simulation, TickEvents, TickInput, tick};
