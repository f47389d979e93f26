//! Entity factories
//!
//! Stateless constructors for every spawnable entity. Randomness comes only
//! from the RNG passed in, so the same seed always yields the same entities.

use glam::Vec2;
use rand::Rng;
use std::f32::consts::TAU;

use super::clock::{Cooldown, WallClock};
use super::state::{Asteroid, Bounds, Bullet, HealPickup, Hostile, Player, Tier};
use crate::consts::HEAL_SPAWN_INSET;
use crate::tuning::Tuning;
use crate::{bearing, unit};

/// Uniform sample in `[min, max)`; tolerates `min == max`
#[inline]
fn uniform(rng: &mut impl Rng, min: f32, max: f32) -> f32 {
    min + (max - min) * rng.random::<f32>()
}

/// Random point just outside one of the four screen edges
pub fn edge_point(rng: &mut impl Rng, bounds: Bounds, radius: f32) -> Vec2 {
    match rng.random_range(0..4) {
        0 => Vec2::new(rng.random::<f32>() * bounds.width, -radius),
        1 => Vec2::new(bounds.width + radius, rng.random::<f32>() * bounds.height),
        2 => Vec2::new(rng.random::<f32>() * bounds.width, bounds.height + radius),
        _ => Vec2::new(-radius, rng.random::<f32>() * bounds.height),
    }
}

/// Point near the screen center, jittered by up to a quarter of the screen each way
fn near_center(rng: &mut impl Rng, bounds: Bounds) -> Vec2 {
    let jitter = Vec2::new(
        (rng.random::<f32>() - 0.5) * bounds.width * 0.5,
        (rng.random::<f32>() - 0.5) * bounds.height * 0.5,
    );
    bounds.center() + jitter
}

/// Irregular outline: evenly spaced spokes at 80-120% of the base radius
fn asteroid_outline(rng: &mut impl Rng, radius: f32, min: u32, max: u32) -> Vec<Vec2> {
    let count = rng.random_range(min..=max);
    (0..count)
        .map(|i| {
            let theta = i as f32 / count as f32 * TAU;
            unit(theta) * radius * uniform(rng, 0.8, 1.2)
        })
        .collect()
}

/// New asteroid drifting in from an edge toward the middle of the screen
pub fn asteroid(rng: &mut impl Rng, bounds: Bounds, tuning: &Tuning, tier: Tier) -> Asteroid {
    let radius = uniform(rng, tuning.asteroid_min_radius, tuning.asteroid_max_radius);
    let pos = edge_point(rng, bounds, radius);
    let target = near_center(rng, bounds);
    let (min_speed, max_speed) = tuning.asteroid_speed_band(tier.number());
    let speed = uniform(rng, min_speed, max_speed);
    let vertices = asteroid_outline(
        rng,
        radius,
        tuning.asteroid_min_vertices,
        tuning.asteroid_max_vertices,
    );

    Asteroid {
        pos,
        vel: unit(bearing(pos, target)) * speed,
        radius,
        rotation: rng.random::<f32>() * TAU,
        rotation_speed: (rng.random::<f32>() - 0.5) * crate::consts::ASTEROID_MAX_SPIN * 2.0,
        vertices,
    }
}

/// New hostile at an edge; its first attack is delayed by a random jitter
pub fn hostile(rng: &mut impl Rng, bounds: Bounds, tuning: &Tuning, now: WallClock) -> Hostile {
    let radius = tuning.hostile_radius;
    let pos = edge_point(rng, bounds, radius);
    let angle = rng.random::<f32>() * TAU;
    let jitter = rng.random::<f64>() * tuning.hostile_attack_jitter_ms;

    Hostile {
        pos,
        vel: Vec2::ZERO,
        radius,
        angle,
        speed: tuning.hostile_initial_speed,
        pulse: 0.0,
        attack: Cooldown::primed_at(now.offset(jitter)),
    }
}

/// Player shot along the craft's facing
pub fn player_bullet(player: &Player, tuning: &Tuning) -> Bullet {
    Bullet {
        pos: player.pos,
        vel: unit(player.angle) * tuning.bullet_speed,
        radius: tuning.bullet_radius,
        life: tuning.bullet_life,
    }
}

/// Hostile shot aimed at a fixed target point
pub fn hostile_bullet(from: Vec2, target: Vec2, tuning: &Tuning) -> Bullet {
    Bullet {
        pos: from,
        vel: unit(bearing(from, target)) * tuning.hostile_bullet_speed,
        radius: tuning.hostile_bullet_radius,
        life: tuning.hostile_bullet_life,
    }
}

/// Heal pickup placed somewhere inside the screen, away from the edges
pub fn heal_pickup(rng: &mut impl Rng, bounds: Bounds, tuning: &Tuning, now: WallClock) -> HealPickup {
    let inset = HEAL_SPAWN_INSET;
    let pos = Vec2::new(
        rng.random::<f32>() * (bounds.width - 2.0 * inset).max(0.0) + inset,
        rng.random::<f32>() * (bounds.height - 2.0 * inset).max(0.0) + inset,
    );
    HealPickup {
        pos,
        radius: tuning.heal_radius,
        spawned_at: now,
        lifetime_ms: tuning.heal_lifetime_ms,
    }
}
