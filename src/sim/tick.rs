//! Fixed timestep simulation tick
//!
//! One call advances the run by exactly one step. The order of the phases is
//! part of the game's feel and is pinned by the tests below.

use super::clock::WallClock;
use super::collision::{self, PassOutcome};
use super::effects;
use super::hostile;
use super::input::InputState;
use super::player;
use super::progression;
use super::state::{Bounds, Bullet, GameState};
use crate::consts::{MAX_SUBSTEPS, SIM_STEP_MS};

/// Advance the game state by one fixed step
///
/// `now` is the host's wall clock for this step; frame-counted timers move by
/// one regardless of it. Ticks outside the `Playing` phase are ignored.
pub fn tick(state: &mut GameState, input: &InputState, now: WallClock) {
    if !state.is_playing() {
        return;
    }
    state.now = now;
    state.time_ticks += 1;

    progression::spawn_hazards(state, now);
    player::update(state, input, now);
    hostile::update(state, now);
    advance_projectiles(state);
    advance_asteroids(state);

    if collision::resolve(state, now) == PassOutcome::RunEnded {
        effects::decay(state);
        return;
    }

    // Progression runs after collisions so a threshold kill upgrades the tier on the same step
    progression::advance_tier(state);
    progression::recharge_special(state);

    effects::decay(state);
}

fn step_bullets(bullets: &mut Vec<Bullet>, bounds: Bounds) {
    for b in bullets.iter_mut() {
        b.pos += b.vel;
        b.life = b.life.saturating_sub(1);
    }
    // Expired shots are gone before collisions run, so a zero-life bullet never lands
    bullets.retain(|b| b.life > 0 && bounds.contains(b.pos));
}

fn advance_projectiles(state: &mut GameState) {
    step_bullets(&mut state.bullets, state.bounds);
    step_bullets(&mut state.hostile_bullets, state.bounds);
}

fn advance_asteroids(state: &mut GameState) {
    for a in state.asteroids.iter_mut() {
        a.pos += a.vel;
        a.rotation += a.rotation_speed;
    }
    let bounds = state.bounds;
    let margin = state.tuning.offscreen_margin;
    state
        .asteroids
        .retain(|a| bounds.contains_with_margin(a.pos, margin));
}

/// Fixed-step driver for hosts with a variable frame rate
///
/// Accumulates elapsed host time and runs whole simulation steps, capped per
/// frame so a stalled tab cannot trigger a catch-up spiral.
#[derive(Debug, Clone, Default)]
pub struct Stepper {
    accumulator: f64,
    last: Option<WallClock>,
}

impl Stepper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one host frame; returns the number of steps run
    pub fn advance(&mut self, state: &mut GameState, input: &InputState, now: WallClock) -> u32 {
        let dt = match self.last {
            Some(last) => now.since(last).clamp(0.0, 100.0),
            None => SIM_STEP_MS,
        };
        self.last = Some(now);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_STEP_MS && substeps < MAX_SUBSTEPS {
            tick(state, input, now);
            self.accumulator -= SIM_STEP_MS;
            substeps += 1;
        }
        substeps
    }

    /// Forget accumulated time (after a pause or restart)
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
        self.last = None;
    }
}
