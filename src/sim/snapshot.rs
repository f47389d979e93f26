//! Read-only views handed to the presentation layer after each step

use std::collections::VecDeque;

use serde::Serialize;

use super::effects::{Particle, Trail};
use super::progression::special_progress;
use super::state::{
    Asteroid, Bullet, GamePhase, GameState, HealPickup, Hostile, Player, Tier,
};

/// Everything the HUD draws
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HudSnapshot {
    pub phase: GamePhase,
    pub score: u64,
    pub time_secs: f32,
    pub hearts: u8,
    pub max_hearts: u8,
    pub tier: u8,
    /// Dash recharge in [0, 1]
    pub dash_ready: f32,
    /// Special charge in [0, 1]
    pub special_progress: f32,
    pub special_ready: bool,
    /// Special only exists from tier two
    pub special_unlocked: bool,
    /// Tier banner text while its timer runs
    pub announcement: Option<&'static str>,
    /// Player blink state during invulnerability
    pub player_visible: bool,
    pub shake: f32,
}

impl HudSnapshot {
    pub fn capture(state: &GameState) -> Self {
        let player = state.player.as_ref();
        let (score, time_secs) = match (state.phase, state.final_result) {
            (GamePhase::GameOver, Some(result)) => (result.score, result.time_secs),
            _ => (state.score, state.elapsed_secs()),
        };
        Self {
            phase: state.phase,
            score,
            time_secs,
            hearts: player.map_or(0, |p| p.hearts),
            max_hearts: state.tuning.player_max_hearts,
            tier: state.tier.number(),
            dash_ready: player.map_or(0.0, |p| {
                p.dash.fraction(state.now, state.tuning.dash_cooldown_ms)
            }),
            special_progress: special_progress(state),
            special_ready: player.is_some_and(|p| p.special_ready),
            special_unlocked: state.tier >= Tier::Two,
            announcement: state
                .announcement
                .is_active()
                .then(|| state.tier.announcement())
                .filter(|text| !text.is_empty()),
            player_visible: player.is_some_and(|p| p.is_visible()),
            shake: state.shake_amplitude(),
        }
    }
}

/// Borrowed entity collections for drawing
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RenderView<'a> {
    pub player: Option<&'a Player>,
    pub asteroids: &'a [Asteroid],
    pub hostiles: &'a [Hostile],
    pub bullets: &'a [Bullet],
    pub hostile_bullets: &'a [Bullet],
    pub pickups: &'a [HealPickup],
    pub particles: &'a [Particle],
    pub trails: &'a VecDeque<Trail>,
}

impl<'a> RenderView<'a> {
    pub fn of(state: &'a GameState) -> Self {
        Self {
            player: state.player.as_ref(),
            asteroids: &state.asteroids,
            hostiles: &state.hostiles,
            bullets: &state.bullets,
            hostile_bullets: &state.hostile_bullets,
            pickups: &state.pickups,
            particles: &state.particles,
            trails: &state.trails,
        }
    }

    /// Number of drawable gameplay entities
    pub fn entity_count(&self) -> usize {
        usize::from(self.player.is_some())
            + self.asteroids.len()
            + self.hostiles.len()
            + self.bullets.len()
            + self.hostile_bullets.len()
            + self.pickups.len()
    }
}
