//! Hostile AI: homing steering and ranged attacks

use glam::Vec2;

use super::clock::WallClock;
use super::progression::level_factor;
use super::spawn;
use super::state::{GameState, Hostile, Tier};
use crate::consts::HOSTILE_PULSE_RATE;
use crate::{bearing, ease_angle, unit};

impl Hostile {
    /// Turn toward the target and move along the new facing at `speed`
    pub fn steer(&mut self, target: Vec2, turn_rate: f32, speed: f32) {
        self.angle = ease_angle(self.angle, bearing(self.pos, target), turn_rate);
        self.vel = unit(self.angle) * speed;
        self.pos += self.vel;
        self.pulse += HOSTILE_PULSE_RATE;
    }
}

/// Extra speed from elapsed time slices and from total kills; never decreases during a run
pub fn speed_bonus(state: &GameState) -> f32 {
    let t = &state.tuning;
    level_factor(state.elapsed_ms(), t) as f32 * t.hostile_speed_inc
        + state.kills as f32 * t.hostile_kill_speed_inc
}

/// Steer every hostile toward the player and let armed ones shoot
pub fn update(state: &mut GameState, now: WallClock) {
    let Some(target) = state.player.as_ref().map(|p| p.pos) else {
        return;
    };
    let bonus = speed_bonus(state);
    let armed = state.tier >= Tier::Two;
    let tuning = &state.tuning;

    for hostile in state.hostiles.iter_mut() {
        let speed = hostile.speed + bonus;
        hostile.steer(target, tuning.hostile_rot_speed, speed);

        if armed && hostile.attack.try_trigger(now, tuning.hostile_attack_interval_ms) {
            state
                .hostile_bullets
                .push(spawn::hostile_bullet(hostile.pos, target, tuning));
        }
    }
}
