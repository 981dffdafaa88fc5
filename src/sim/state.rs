//! Game state and core simulation types
//!
//! `SimulationContext` owns every piece of mutable simulation state. It is
//! passed by exclusive reference through the tick; nothing is shared or static.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::actor::Actor;
use super::collision::{CollisionOutcome, EndCause};
use super::obstacle::{ObstacleSet, Spawner};
use crate::config::WorldConfig;
use crate::consts::GROUND_SCROLL_WRAP;

/// Current phase of the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SimulationState {
    /// Waiting for the first jump; nothing moves
    #[default]
    Idle,
    /// Full simulation active
    Running,
    /// Frozen until an explicit restart
    Over,
}

/// Score bookkeeping
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreState {
    /// Pairs passed this run
    pub score: u32,
    /// Actor is inside the nearest pair's span and not yet credited
    pub pending_pass: bool,
    /// Best score seen during this process
    pub best: u32,
}

impl ScoreState {
    /// Fold the current score into the best score
    pub fn roll_best(&mut self) {
        self.best = self.best.max(self.score);
    }

    /// Start a new run: keep `best`, clear the rest
    pub fn reset(&mut self) {
        self.roll_best();
        self.score = 0;
        self.pending_pass = false;
    }
}

/// A state change performed by the machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Transition {
    Started,
    Ended(EndCause),
    Restarted,
}

/// Idle -> Running -> Over -> Idle
///
/// Also tracks the "running" flag separately from the state: ground contact
/// clears it on the way into `Over`, while obstacle and ceiling contact leave
/// it set until the restart.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateMachine {
    state: SimulationState,
    running_flag: bool,
    end_cause: Option<EndCause>,
}

impl GameStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn state(&self) -> SimulationState {
        self.state
    }

    /// Whether the run flag is still raised (true in `Running`, and in `Over`
    /// after a non-ground ending)
    #[inline]
    pub fn running_flag(&self) -> bool {
        self.running_flag
    }

    /// Why the last run ended (set while `Over`)
    #[inline]
    pub fn end_cause(&self) -> Option<EndCause> {
        self.end_cause
    }

    /// Ground endings leave the machine ready for an immediate restart
    pub fn restart_eligible(&self) -> bool {
        self.state == SimulationState::Over && !self.running_flag
    }

    /// Idle -> Running. Returns false (no-op) from any other state.
    pub fn start(&mut self) -> bool {
        if self.state != SimulationState::Idle {
            return false;
        }
        self.state = SimulationState::Running;
        self.running_flag = true;
        true
    }

    /// Running -> Over. Returns false (no-op) from any other state.
    pub fn end(&mut self, cause: EndCause) -> bool {
        if self.state != SimulationState::Running {
            return false;
        }
        self.state = SimulationState::Over;
        self.end_cause = Some(cause);
        if cause.clears_running() {
            self.running_flag = false;
        }
        true
    }

    /// Over -> Idle. Returns false (no-op) from any other state.
    pub fn restart(&mut self) -> bool {
        if self.state != SimulationState::Over {
            return false;
        }
        self.state = SimulationState::Idle;
        self.running_flag = false;
        self.end_cause = None;
        true
    }
}

/// All mutable simulation state
#[derive(Debug, Clone)]
pub struct SimulationContext {
    pub actor: Actor,
    pub obstacles: ObstacleSet,
    pub spawner: Spawner,
    pub score: ScoreState,
    pub machine: GameStateMachine,
    /// Ground band scroll offset (visual only)
    pub ground_offset: f32,
    /// Ticks processed since creation
    pub tick_count: u64,
    /// Obstacle offset RNG
    pub rng: Pcg32,
}

impl SimulationContext {
    pub fn new(config: &WorldConfig) -> Self {
        Self {
            actor: Actor::new(config),
            obstacles: ObstacleSet::new(),
            spawner: Spawner::new(),
            score: ScoreState::default(),
            machine: GameStateMachine::new(),
            ground_offset: 0.0,
            tick_count: 0,
            rng: Pcg32::seed_from_u64(config.seed),
        }
    }

    #[inline]
    pub fn state(&self) -> SimulationState {
        self.machine.state()
    }

    /// Input-driven transitions: a jump press starts an idle run, the restart
    /// action resets a finished one. Everything else is a no-op.
    pub fn apply_input(
        &mut self,
        jump_pressed: bool,
        restart: bool,
        now_ms: u64,
        config: &WorldConfig,
    ) -> Option<Transition> {
        match self.state() {
            SimulationState::Idle if jump_pressed => {
                self.machine.start();
                self.spawner.arm(now_ms);
                log::info!("Run started at {} ms", now_ms);
                Some(Transition::Started)
            }
            SimulationState::Over if restart => {
                self.restart(config);
                Some(Transition::Restarted)
            }
            _ => None,
        }
    }

    /// Feed a collision result back into the machine
    pub fn apply_outcome(&mut self, outcome: CollisionOutcome) -> Option<Transition> {
        let cause = outcome.cause?;
        if !self.machine.end(cause) {
            return None;
        }
        self.score.roll_best();
        log::info!(
            "Run over ({:?}) with score {} (best {})",
            cause,
            self.score.score,
            self.score.best
        );
        Some(Transition::Ended(cause))
    }

    /// Over -> Idle: actor back to start, obstacles cleared, score rolled into best
    pub fn restart(&mut self, config: &WorldConfig) {
        if !self.machine.restart() {
            return;
        }
        self.score.reset();
        self.actor.reset(config);
        self.obstacles.clear();
        self.ground_offset = 0.0;
        log::info!("Restarted (best {})", self.score.best);
    }

    /// Scroll the ground band, wrapping its offset
    pub fn scroll_ground(&mut self, config: &WorldConfig) {
        if self.state() != SimulationState::Running {
            return;
        }
        self.ground_offset -= config.scroll_speed;
        if self.ground_offset.abs() > GROUND_SCROLL_WRAP {
            self.ground_offset = 0.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::obstacle::ObstaclePair;

    #[test]
    fn test_machine_legal_transitions() {
        let mut m = GameStateMachine::new();
        assert_eq!(m.state(), SimulationState::Idle);
        assert!(!m.end(EndCause::Obstacle));
        assert!(!m.restart());

        assert!(m.start());
        assert_eq!(m.state(), SimulationState::Running);
        assert!(!m.start());
        assert!(!m.restart());

        assert!(m.end(EndCause::Obstacle));
        assert_eq!(m.state(), SimulationState::Over);
        assert!(!m.start());

        assert!(m.restart());
        assert_eq!(m.state(), SimulationState::Idle);
        assert_eq!(m.end_cause(), None);
    }

    #[test]
    fn test_ground_clears_running_flag() {
        let mut m = GameStateMachine::new();
        m.start();
        m.end(EndCause::Ground);
        assert_eq!(m.state(), SimulationState::Over);
        assert!(!m.running_flag());
        assert!(m.restart_eligible());
    }

    #[test]
    fn test_obstacle_and_ceiling_keep_running_flag() {
        for cause in [EndCause::Obstacle, EndCause::Ceiling] {
            let mut m = GameStateMachine::new();
            m.start();
            m.end(cause);
            assert_eq!(m.state(), SimulationState::Over);
            assert!(m.running_flag());
            assert!(!m.restart_eligible());
            assert_eq!(m.end_cause(), Some(cause));
        }
    }

    #[test]
    fn test_score_reset_rolls_best() {
        let mut score = ScoreState {
            score: 7,
            pending_pass: true,
            best: 3,
        };
        score.reset();
        assert_eq!(score, ScoreState { score: 0, pending_pass: false, best: 7 });

        score.score = 2;
        score.reset();
        assert_eq!(score.best, 7);
    }

    #[test]
    fn test_context_restart_resets_everything() {
        let config = WorldConfig::default();
        let mut ctx = SimulationContext::new(&config);
        assert_eq!(ctx.apply_input(true, false, 0, &config), Some(Transition::Started));

        ctx.actor.rect.pos.y = 500.0;
        ctx.actor.vel = 5.0;
        ctx.obstacles.push(ObstaclePair::new(1, 200.0, 320.0, &config));
        ctx.score.score = 4;

        // Restart is ignored while running
        assert_eq!(ctx.apply_input(false, true, 10, &config), None);

        let outcome = CollisionOutcome {
            collided: true,
            scored: false,
            cause: Some(EndCause::Obstacle),
        };
        assert_eq!(ctx.apply_outcome(outcome), Some(Transition::Ended(EndCause::Obstacle)));
        assert_eq!(ctx.score.best, 4);

        // Jump in Over does nothing
        assert_eq!(ctx.apply_input(true, false, 20, &config), None);
        assert_eq!(ctx.state(), SimulationState::Over);

        assert_eq!(ctx.apply_input(false, true, 30, &config), Some(Transition::Restarted));
        assert_eq!(ctx.state(), SimulationState::Idle);
        assert_eq!(ctx.score.score, 0);
        assert_eq!(ctx.score.best, 4);
        assert!(ctx.obstacles.is_empty());
        assert_eq!(ctx.actor.rect.pos, config.actor_start);
        assert_eq!(ctx.actor.vel, 0.0);
    }

    #[test]
    fn test_start_arms_spawner() {
        let config = WorldConfig::default();
        let mut ctx = SimulationContext::new(&config);
        ctx.apply_input(true, false, 4321, &config);
        assert_eq!(ctx.spawner.last_spawn_ms, 4321);
    }

    #[test]
    fn test_ground_scroll_wraps() {
        let config = WorldConfig::default();
        let mut ctx = SimulationContext::new(&config);
        ctx.scroll_ground(&config);
        assert_eq!(ctx.ground_offset, 0.0, "ground is frozen while idle");

        ctx.machine.start();
        let mut offsets = Vec::new();
        for _ in 0..10 {
            ctx.scroll_ground(&config);
            offsets.push(ctx.ground_offset);
        }
        // -4, -8, ... -32, then -36 wraps to 0
        assert_eq!(offsets[7], -32.0);
        assert_eq!(offsets[8], 0.0);
        assert_eq!(offsets[9], -4.0);
    }
}
