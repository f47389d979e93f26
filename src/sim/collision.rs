//! Collision detection and damage resolution
//!
//! Every test is circle-vs-circle. Player-vs-hazard contact (hostile bodies and
//! asteroids) shrinks the radius sum by a fixed margin so grazes do not count;
//! bullet tests use the plain geometric overlap.

use super::clock::WallClock;
use super::effects;
use super::state::{Circle, GameEvent, GamePhase, GameState, Palette, RunResult};
use crate::{bearing, unit};

/// What a player-hit did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    /// No player, or still invulnerable
    Ignored,
    /// Lost a heart and respawned at center
    Damaged,
    /// Lost the last heart; the run is over
    Fatal,
}

/// Whether the collision pass ran to completion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassOutcome {
    Continue,
    RunEnded,
}

/// Plain circle overlap
#[inline]
pub fn overlaps(a: &impl Circle, b: &impl Circle) -> bool {
    a.center().distance(b.center()) < a.radius() + b.radius()
}

/// Forgiving overlap: radius sum reduced by `margin`
#[inline]
pub fn contact(a: &impl Circle, b: &impl Circle, margin: f32) -> bool {
    a.center().distance(b.center()) < a.radius() + b.radius() - margin
}

/// Apply one hit to the player
///
/// No-op while invulnerable. Otherwise costs a heart, starts the grace window,
/// shakes the camera and moves the player back to the center at rest. Losing
/// the last heart ends the run.
pub fn player_hit(state: &mut GameState) -> HitOutcome {
    let center = state.bounds.center();
    let Some(player) = state.player.as_mut() else {
        return HitOutcome::Ignored;
    };
    if player.invuln.is_active() {
        return HitOutcome::Ignored;
    }

    player.hearts = player.hearts.saturating_sub(1);
    player.invuln.set(state.tuning.invuln_frames);
    let hit_pos = player.pos;
    let hearts = player.hearts;
    player.pos = center;
    player.vel = glam::Vec2::ZERO;
    player.accel = glam::Vec2::ZERO;

    state.shake.set(state.tuning.hit_shake_frames);
    effects::explosion(state, hit_pos, Palette::Blue);
    state.events.push(GameEvent::PlayerHit { hearts });
    log::debug!("Player hit, {} hearts left", hearts);

    if hearts == 0 {
        finish_run(state);
        return HitOutcome::Fatal;
    }
    HitOutcome::Damaged
}

/// Capture the final result, remove the player and signal game over once
fn finish_run(state: &mut GameState) {
    let result = RunResult {
        score: state.score,
        time_secs: state.elapsed_secs(),
    };
    state.player = None;
    state.phase = GamePhase::GameOver;
    state.final_result = Some(result);
    state.events.push(GameEvent::GameOver {
        score: result.score,
        time_secs: result.time_secs,
    });
    log::info!(
        "Game over: {} points in {:.1}s (tier {}, {} kills)",
        result.score,
        result.time_secs,
        state.tier.number(),
        state.kills
    );
}

/// What a player bullet struck
enum Target {
    Asteroid(glam::Vec2),
    Hostile(glam::Vec2),
}

/// Award points to the score and the special-ability charge
pub fn award(state: &mut GameState, points: u64) {
    state.score += points;
    if let Some(player) = state.player.as_mut() {
        player.special_charge += points;
    }
}

/// Player bullets against asteroids, then hostiles; first hit consumes the bullet
pub fn resolve_bullets(state: &mut GameState) {
    let asteroids = &mut state.asteroids;
    let hostiles = &mut state.hostiles;
    let mut hits = Vec::new();

    state.bullets.retain(|b| {
        if let Some(i) = asteroids.iter().position(|a| overlaps(b, a)) {
            hits.push(Target::Asteroid(asteroids.remove(i).pos));
            return false;
        }
        if let Some(i) = hostiles.iter().position(|h| overlaps(b, h)) {
            hits.push(Target::Hostile(hostiles.remove(i).pos));
            return false;
        }
        true
    });

    for hit in hits {
        match hit {
            Target::Asteroid(pos) => {
                let points = state.tuning.points_asteroid;
                award(state, points);
                effects::explosion(state, pos, Palette::Yellow);
            }
            Target::Hostile(pos) => {
                let points = state.tuning.points_hostile;
                award(state, points);
                state.kills += 1;
                effects::explosion(state, pos, Palette::Red);
            }
        }
    }
}

/// Heal pickups: collected only when the player is missing health; expired ones vanish
pub fn resolve_pickups(state: &mut GameState, now: WallClock) {
    let max_hearts = state.tuning.player_max_hearts;
    let mut collected = Vec::new();

    if let Some(player) = state.player.as_mut() {
        state.pickups.retain(|h| {
            if player.hearts < max_hearts && overlaps(h, &*player) {
                player.hearts += 1;
                collected.push((h.pos, player.hearts));
                return false;
            }
            !h.is_expired(now)
        });
    }

    for (pos, hearts) in collected {
        effects::explosion(state, pos, Palette::Red);
        state.events.push(GameEvent::Healed { hearts });
    }
}

/// Hostile bullets against the player; a touching bullet is always consumed
fn resolve_hostile_bullets(state: &mut GameState) -> PassOutcome {
    let mut i = 0;
    while i < state.hostile_bullets.len() {
        let Some(player) = state.player.as_ref() else {
            return PassOutcome::RunEnded;
        };
        if overlaps(&state.hostile_bullets[i], player) {
            state.hostile_bullets.remove(i);
            if player_hit(state) == HitOutcome::Fatal {
                return PassOutcome::RunEnded;
            }
            continue;
        }
        i += 1;
    }
    PassOutcome::Continue
}

/// Hostile bodies against the player: hit, then knock the player away from the hostile
fn resolve_hostile_contact(state: &mut GameState) -> PassOutcome {
    let margin = state.tuning.contact_margin;
    let knockback = state.tuning.hostile_knockback;
    for i in 0..state.hostiles.len() {
        let Some(player) = state.player.as_ref() else {
            return PassOutcome::RunEnded;
        };
        let hostile = &state.hostiles[i];
        if !contact(hostile, player, margin) {
            continue;
        }
        let source = hostile.pos;
        if player_hit(state) == HitOutcome::Fatal {
            return PassOutcome::RunEnded;
        }
        // Measured after the hit, so a respawned player is pushed from center
        if let Some(player) = state.player.as_mut() {
            player.vel += unit(bearing(source, player.pos)) * knockback;
        }
    }
    PassOutcome::Continue
}

/// Asteroids against the player: hit, and the asteroid bounces straight back
fn resolve_asteroid_contact(state: &mut GameState) -> PassOutcome {
    let margin = state.tuning.contact_margin;
    for i in 0..state.asteroids.len() {
        let Some(player) = state.player.as_ref() else {
            return PassOutcome::RunEnded;
        };
        if !contact(&state.asteroids[i], player, margin) {
            continue;
        }
        let outcome = player_hit(state);
        let asteroid = &mut state.asteroids[i];
        asteroid.vel = -asteroid.vel;
        if outcome == HitOutcome::Fatal {
            return PassOutcome::RunEnded;
        }
    }
    PassOutcome::Continue
}

/// Full collision pass in a fixed order
pub fn resolve(state: &mut GameState, now: WallClock) -> PassOutcome {
    if state.player.is_none() {
        return PassOutcome::RunEnded;
    }
    resolve_pickups(state, now);
    resolve_bullets(state);

    let passes: [fn(&mut GameState) -> PassOutcome; 3] = [
        resolve_hostile_bullets,
        resolve_hostile_contact,
        resolve_asteroid_contact,
    ];
    for pass in passes {
        if pass(state) == PassOutcome::RunEnded {
            return PassOutcome::RunEnded;
        }
    }
    PassOutcome::Continue
}
