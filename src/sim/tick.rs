//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically. The order of
//! the steps below is fixed:
//! 1. sample input and clock
//! 2. input-driven state transitions (start, restart)
//! 3. while running: actor, spawner + scroll, collision/score
//! 4. feed the collision result back into the state machine
//! 5. capture the render snapshot

use super::collision::{CollisionOutcome, evaluate};
use super::snapshot::RenderSnapshot;
use super::state::{SimulationContext, SimulationState, Transition};
use crate::config::{ConfigError, WorldConfig};

/// Autopilot aims the actor's bottom edge this far above the gap's lower lip
const AUTOPILOT_MARGIN: f32 = 30.0;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Jump button held (key or pointer); debounced by the actor
    pub jump: bool,
    /// Restart action (only honored while Over)
    pub restart: bool,
    /// Demo mode - the autopilot plays the game
    pub autopilot: bool,
}

/// What happened during one tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickEvents {
    /// Collision and scoring result (default when not running)
    pub outcome: CollisionOutcome,
    /// State changes in the order they happened
    pub transitions: Vec<Transition>,
}

/// Advance the simulation by one fixed tick
pub fn tick(
    ctx: &mut SimulationContext,
    input: &TickInput,
    now_ms: u64,
    config: &WorldConfig,
) -> TickEvents {
    let mut input = input.clone();
    if input.autopilot {
        autopilot(ctx, config, &mut input);
    }
    let input = &input;

    ctx.tick_count += 1;
    let mut events = TickEvents::default();

    let jump_pressed = ctx.actor.jump_pressed(input.jump);
    events
        .transitions
        .extend(ctx.apply_input(jump_pressed, input.restart, now_ms, config));

    let state = ctx.state();
    ctx.actor.advance(1, input.jump, state, config);

    if state == SimulationState::Running {
        if let Some(pair) = ctx.spawner.maybe_spawn(state, now_ms, &mut ctx.rng, config) {
            ctx.obstacles.push(pair);
        }
        let retired = ctx.obstacles.advance_all(state, config);
        if retired > 0 {
            log::trace!("Retired {} obstacle pair(s), {} active", retired, ctx.obstacles.len());
        }
        ctx.scroll_ground(config);
        events.outcome = evaluate(&ctx.actor, &ctx.obstacles, &mut ctx.score, config);
    }

    events.transitions.extend(ctx.apply_outcome(events.outcome));
    events
}

/// Pick inputs for demo mode
///
/// Holds the actor just above the lower lip of the next gap: press when
/// falling below the target line, release otherwise so each press is a
/// distinct edge. Restarts automatically after a crash.
fn autopilot(ctx: &SimulationContext, config: &WorldConfig, input: &mut TickInput) {
    let actor = &ctx.actor;
    let can_press = !actor.is_jump_latched();

    match ctx.state() {
        SimulationState::Idle => {
            input.jump = can_press;
        }
        SimulationState::Over => {
            input.jump = false;
            input.restart = true;
        }
        SimulationState::Running => {
            let lip = ctx
                .obstacles
                .iter()
                .find(|pair| pair.right() > actor.rect.left())
                .map(|pair| pair.gap_bottom())
                .unwrap_or(config.mid_y() + config.obstacle_gap / 2.0);
            let target = lip - AUTOPILOT_MARGIN;
            input.jump = can_press && actor.vel > 0.0 && actor.rect.bottom() > target;
        }
    }
}

/// A configured simulation: world constants plus the state they drive
#[derive(Debug, Clone)]
pub struct Simulation {
    config: WorldConfig,
    ctx: SimulationContext,
}

impl Simulation {
    /// Validate `config` and build a fresh idle simulation
    pub fn new(config: WorldConfig) -> Result<Self, ConfigError> {
        if let Err(e) = config.validate() {
            log::error!("Rejected world config: {}", e);
            return Err(e);
        }
        let ctx = SimulationContext::new(&config);
        log::info!("Simulation initialized with seed: {}", config.seed);
        Ok(Self { config, ctx })
    }

    /// Run one tick and return the settled frame, tagged with the
    /// transitions that tick caused
    pub fn tick(&mut self, input: &TickInput, now_ms: u64) -> RenderSnapshot {
        let events = tick(&mut self.ctx, input, now_ms, &self.config);
        let mut snap = self.snapshot();
        snap.transitions = events.transitions;
        snap
    }

    pub fn snapshot(&self) -> RenderSnapshot {
        RenderSnapshot::capture(&self.ctx)
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn context(&self) -> &SimulationContext {
        &self.ctx
    }

    #[inline]
    pub fn state(&self) -> SimulationState {
        self.ctx.state()
    }
}
