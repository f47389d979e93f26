//! Player controller
//!
//! Turns the held-input snapshot into thrust, dash, fire and special-ability
//! actions, then integrates the craft's motion for one step.

use glam::Vec2;

use super::clock::WallClock;
use super::collision::award;
use super::effects;
use super::input::{InputCode, InputState};
use super::spawn;
use super::state::{GameState, Palette, Tier};
use crate::consts::FACING_DEADZONE;
use crate::{ease_angle, heading, unit};

/// Thrust vector for the held directions (diagonals are not normalized)
pub fn thrust(input: &InputState, accel: f32) -> Vec2 {
    let mut a = Vec2::ZERO;
    if input.is_pressed(InputCode::MoveUp) {
        a.y -= accel;
    }
    if input.is_pressed(InputCode::MoveDown) {
        a.y += accel;
    }
    if input.is_pressed(InputCode::MoveLeft) {
        a.x -= accel;
    }
    if input.is_pressed(InputCode::MoveRight) {
        a.x += accel;
    }
    a
}

/// Fire the radial blast if the player may
///
/// Requires a live player, tier two or higher and a ready charge. Clears the
/// charge, destroys every asteroid and hostile strictly inside the blast
/// radius (scoring them as kills) and wipes all hostile bullets.
pub fn activate_special(state: &mut GameState) -> bool {
    if state.tier < Tier::Two {
        return false;
    }
    let Some(player) = state.player.as_mut() else {
        return false;
    };
    if !player.special_ready {
        return false;
    }

    player.special_ready = false;
    player.special_charge = 0;
    let origin = player.pos;
    let radius = state.tuning.blast_radius;
    state.shake.set(state.tuning.blast_shake_frames);

    let mut rocks = Vec::new();
    state.asteroids.retain(|a| {
        let inside = a.pos.distance(origin) < radius;
        if inside {
            rocks.push(a.pos);
        }
        !inside
    });
    let mut downed = Vec::new();
    state.hostiles.retain(|h| {
        let inside = h.pos.distance(origin) < radius;
        if inside {
            downed.push(h.pos);
        }
        !inside
    });
    state.hostile_bullets.clear();

    for pos in &rocks {
        let points = state.tuning.points_asteroid;
        award(state, points);
        effects::explosion(state, *pos, Palette::Yellow);
    }
    for pos in &downed {
        let points = state.tuning.points_hostile;
        award(state, points);
        state.kills += 1;
        effects::explosion(state, *pos, Palette::Red);
    }
    effects::radial_burst(state, origin);

    log::debug!(
        "Radial blast cleared {} asteroids and {} hostiles",
        rocks.len(),
        downed.len()
    );
    true
}

/// One step of player control and motion
pub fn update(state: &mut GameState, input: &InputState, now: WallClock) {
    let Some(player) = state.player.as_mut() else {
        return;
    };
    player.invuln.tick();
    player.accel = thrust(input, state.tuning.player_accel);

    if input.is_pressed(InputCode::Special) {
        activate_special(state);
    }

    let tuning = &state.tuning;
    let Some(player) = state.player.as_mut() else {
        return;
    };

    if input.is_pressed(InputCode::Dash) && player.dash.try_trigger(now, tuning.dash_cooldown_ms) {
        let dir = if player.accel != Vec2::ZERO {
            heading(player.accel)
        } else {
            player.angle
        };
        player.vel += unit(dir) * tuning.dash_impulse;
        player.dash_active.set(tuning.dash_duration_frames);
        state.shake.set(tuning.dash_shake_frames);
    }

    if input.is_pressed(InputCode::Fire) && player.fire.try_trigger(now, tuning.bullet_cooldown_ms) {
        state.bullets.push(spawn::player_bullet(player, tuning));
        player.vel -= unit(player.angle) * tuning.bullet_recoil;
    }

    // Add then damp; order matters for the movement feel
    player.vel = (player.vel + player.accel) * tuning.player_friction;
    player.pos += player.vel;

    if player.vel.x.abs() > FACING_DEADZONE || player.vel.y.abs() > FACING_DEADZONE {
        player.angle = ease_angle(player.angle, heading(player.vel), tuning.player_rot_speed);
    }

    player.dash_active.tick();
    player.pos = state.bounds.clamp_circle(player.pos, player.radius);

    effects::emit_trail(state);
}
