//! Visual side effects: explosion particles, blast bursts, engine trails
//!
//! Nothing here feeds back into gameplay. Particle and trail lifetimes are
//! frame counted, and all randomness comes from the state's `fx_rng`.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{GameEvent, GameState, Palette};
use crate::consts::*;
use crate::unit;

/// Maximum live particles
pub const MAX_PARTICLES: usize = 512;
/// Maximum live trail puffs
pub const MAX_TRAILS: usize = 256;

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub palette: Palette,
    /// Which of the palette's four shades to draw
    pub shade: u8,
    pub life: u32,
    pub max_life: u32,
}

/// Engine exhaust puff left behind the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trail {
    pub pos: Vec2,
    pub size: f32,
    pub life: u32,
    pub max_life: u32,
}

/// Burst of particles at `pos`, plus an event for the presentation layer
pub fn explosion(state: &mut GameState, pos: Vec2, palette: Palette) {
    state.events.push(GameEvent::Explosion { pos, palette });

    let room = MAX_PARTICLES.saturating_sub(state.particles.len());
    for _ in 0..PARTICLE_COUNT.min(room) {
        let rng = &mut state.fx_rng;
        let vel = Vec2::new(
            (rng.random::<f32>() - 0.5) * PARTICLE_SPREAD,
            (rng.random::<f32>() - 0.5) * PARTICLE_SPREAD,
        );
        state.particles.push(Particle {
            pos,
            vel,
            radius: rng.random::<f32>() * 3.0 + 1.0,
            palette,
            shade: rng.random_range(0..4),
            life: PARTICLE_LIFE,
            max_life: PARTICLE_LIFE,
        });
    }
}

/// Ring of particles flying outward from the blast center
pub fn radial_burst(state: &mut GameState, pos: Vec2) {
    state.events.push(GameEvent::RadialBlast { pos });

    let room = MAX_PARTICLES.saturating_sub(state.particles.len());
    for i in 0..BURST_PARTICLES.min(room) {
        let theta = i as f32 / BURST_PARTICLES as f32 * std::f32::consts::TAU;
        state.particles.push(Particle {
            pos,
            vel: unit(theta) * BURST_SPEED,
            radius: 5.0,
            palette: Palette::Cyan,
            shade: 0,
            life: PARTICLE_LIFE,
            max_life: PARTICLE_LIFE,
        });
    }
}

/// Maybe drop an exhaust puff behind the player (always while dashing)
pub fn emit_trail(state: &mut GameState) {
    let Some(player) = state.player.as_ref() else {
        return;
    };
    let roll: f32 = state.fx_rng.random();
    if roll >= TRAIL_CHANCE && !player.is_dashing() {
        return;
    }
    if state.trails.len() >= MAX_TRAILS {
        state.trails.pop_front();
    }
    let pos = player.pos - unit(player.angle) * player.radius;
    let size = state.fx_rng.random::<f32>() * 4.0 + 2.0;
    state.trails.push_back(Trail {
        pos,
        size,
        life: TRAIL_LIFE,
        max_life: TRAIL_LIFE,
    });
}

/// Advance frame-counted visuals by one step
pub fn decay(state: &mut GameState) {
    for p in state.particles.iter_mut() {
        p.pos += p.vel;
        p.life = p.life.saturating_sub(1);
    }
    state.particles.retain(|p| p.life > 0);

    for t in state.trails.iter_mut() {
        t.life = t.life.saturating_sub(1);
    }
    state.trails.retain(|t| t.life > 0);

    state.shake.tick();
    state.announcement.tick();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::clock::WallClock;

    #[test]
    fn test_explosion_emits_event_and_particles() {
        let mut state = GameState::new(3);
        explosion(&mut state, Vec2::new(10.0, 10.0), Palette::Yellow);
        assert_eq!(state.particles.len(), PARTICLE_COUNT);
        assert_eq!(
            state.events,
            vec![GameEvent::Explosion {
                pos: Vec2::new(10.0, 10.0),
                palette: Palette::Yellow
            }]
        );
        for p in &state.particles {
            assert!(p.vel.x.abs() <= PARTICLE_SPREAD / 2.0);
            assert!(p.shade < 4);
        }
    }

    #[test]
    fn test_particles_expire_after_life() {
        let mut state = GameState::new(3);
        radial_burst(&mut state, Vec2::ZERO);
        assert_eq!(state.particles.len(), BURST_PARTICLES);
        for _ in 0..PARTICLE_LIFE {
            decay(&mut state);
        }
        assert!(state.particles.is_empty());
    }

    #[test]
    fn test_particle_cap() {
        let mut state = GameState::new(3);
        for _ in 0..100 {
            radial_burst(&mut state, Vec2::ZERO);
        }
        assert_eq!(state.particles.len(), MAX_PARTICLES);
    }

    #[test]
    fn test_trail_always_emitted_while_dashing() {
        let mut state = GameState::new(3);
        state.start(WallClock(0.0));
        if let Some(p) = state.player.as_mut() {
            p.dash_active.set(100);
        }
        for _ in 0..50 {
            emit_trail(&mut state);
        }
        assert_eq!(state.trails.len(), 50);
    }

    #[test]
    fn test_trail_cap_drops_oldest() {
        let mut state = GameState::new(3);
        state.start(WallClock(0.0));
        if let Some(p) = state.player.as_mut() {
            p.dash_active.set(1000);
        }
        emit_trail(&mut state);
        if let Some(first) = state.trails.front_mut() {
            first.life = 1;
        }
        for _ in 0..MAX_TRAILS + 10 {
            emit_trail(&mut state);
        }
        assert_eq!(state.trails.len(), MAX_TRAILS);
        assert!(state.trails.iter().all(|t| t.life == TRAIL_LIFE));
    }

    #[test]
    fn test_decay_ticks_frame_timers() {
        let mut state = GameState::new(3);
        state.shake.set(2);
        state.announcement.set(1);
        decay(&mut state);
        assert_eq!(state.shake.get(), 1);
        assert_eq!(state.announcement.get(), 0);
    }
}
