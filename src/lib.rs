//! Floating Dodge - a 2D arcade survival shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, steering, collisions, progression)
//! - `tuning`: Data-driven game balance
//! - `best_score`: Best-score persistence adapter
//! - `web`: Browser host glue (wasm32 only)

pub mod best_score;
pub mod error;
pub mod sim;
pub mod tuning;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use best_score::BestScore;
pub use error::TuningError;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
///
/// Speeds and accelerations are in pixels per simulation step; durations
/// suffixed `_MS` are wall-clock milliseconds, `_FRAMES` are simulation steps.
pub mod consts {
    /// Fixed simulation rate (one step per display refresh)
    pub const SIM_HZ: u32 = 60;
    /// Fixed simulation timestep in milliseconds
    pub const SIM_STEP_MS: f64 = 1000.0 / SIM_HZ as f64;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Default playfield size
    pub const DEFAULT_WIDTH: f32 = 1280.0;
    pub const DEFAULT_HEIGHT: f32 = 720.0;

    /// Player craft
    pub const PLAYER_RADIUS: f32 = 15.0;
    pub const PLAYER_ACCEL: f32 = 0.5;
    pub const PLAYER_FRICTION: f32 = 0.96;
    pub const PLAYER_ROT_SPEED: f32 = 0.15;
    pub const PLAYER_MAX_HEARTS: u8 = 3;
    /// Speed below which the craft keeps its current facing
    pub const FACING_DEADZONE: f32 = 0.1;
    pub const INVULN_FRAMES: u32 = 90;
    /// Blink period while invulnerable (visible for the first half)
    pub const BLINK_PERIOD_FRAMES: u32 = 10;

    /// Dash
    pub const DASH_IMPULSE: f32 = 12.0;
    pub const DASH_COOLDOWN_MS: f64 = 1500.0;
    pub const DASH_DURATION_FRAMES: u32 = 15;

    /// Player bullets
    pub const BULLET_SPEED: f32 = 12.0;
    pub const BULLET_RADIUS: f32 = 3.0;
    pub const BULLET_LIFE: u32 = 60;
    pub const BULLET_COOLDOWN_MS: f64 = 150.0;
    pub const BULLET_RECOIL: f32 = 0.5;

    /// Hostiles
    pub const HOSTILE_RADIUS: f32 = 16.0;
    pub const HOSTILE_INITIAL_SPEED: f32 = 1.5;
    pub const HOSTILE_ROT_SPEED: f32 = 0.05;
    /// Speed bonus per elapsed time slice
    pub const HOSTILE_SPEED_INC: f32 = 0.1;
    /// Speed bonus per hostile killed
    pub const HOSTILE_KILL_SPEED_INC: f32 = 0.02;
    pub const HOSTILE_PULSE_RATE: f32 = 0.05;
    pub const HOSTILE_MAX_COUNT: usize = 5;
    pub const HOSTILE_SPAWN_START_MS: f64 = 5000.0;
    pub const HOSTILE_SPAWN_FAST_MS: f64 = 3000.0;
    /// Elapsed run time after which hostiles spawn at the fast interval
    pub const HOSTILE_FAST_AFTER_MS: f64 = 30_000.0;
    pub const HOSTILE_ATTACK_INTERVAL_MS: f64 = 2000.0;
    /// Upper bound of the random first-attack delay
    pub const HOSTILE_ATTACK_JITTER_MS: f64 = 2000.0;
    pub const HOSTILE_KNOCKBACK: f32 = 10.0;

    /// Hostile bullets
    pub const HOSTILE_BULLET_SPEED: f32 = 5.0;
    pub const HOSTILE_BULLET_RADIUS: f32 = 4.0;
    pub const HOSTILE_BULLET_LIFE: u32 = 180;

    /// Asteroids
    pub const ASTEROID_MIN_RADIUS: f32 = 15.0;
    pub const ASTEROID_MAX_RADIUS: f32 = 45.0;
    pub const ASTEROID_MIN_SPEED: f32 = 1.0;
    pub const ASTEROID_MAX_SPEED: f32 = 3.0;
    pub const ASTEROID_MIN_VERTICES: u32 = 8;
    pub const ASTEROID_MAX_VERTICES: u32 = 12;
    pub const ASTEROID_MAX_SPIN: f32 = 0.025;
    /// Distance past the screen edge before an asteroid is culled
    pub const OFFSCREEN_MARGIN: f32 = 150.0;

    /// Asteroid spawn pacing
    pub const INITIAL_SPAWN_INTERVAL_MS: f64 = 1500.0;
    pub const MIN_SPAWN_INTERVAL_MS: f64 = 300.0;
    pub const SPAWN_DECREMENT_INTERVAL_MS: f64 = 10_000.0;
    pub const SPAWN_DECREMENT_AMOUNT_MS: f64 = 100.0;

    /// Radius reduction for player-vs-hazard contact tests
    pub const CONTACT_MARGIN: f32 = 4.0;

    /// Scoring
    pub const POINTS_ASTEROID: u64 = 10;
    pub const POINTS_HOSTILE: u64 = 50;

    /// Progression
    pub const LEVEL_UP_KILLS: u32 = 10;
    pub const LEVEL_3_KILLS_TOTAL: u32 = 25;
    pub const LEVEL_TEXT_FRAMES: u32 = 180;

    /// Radial blast
    pub const BLAST_RADIUS: f32 = 250.0;
    pub const BLAST_POINTS_RECHARGE: u64 = 500;

    /// Heal pickups
    pub const HEAL_RADIUS: f32 = 12.0;
    pub const HEAL_LIFETIME_MS: f64 = 8000.0;
    pub const HEAL_SPAWN_CHANCE: f64 = 0.002;
    /// Inset from the screen edge for pickup placement
    pub const HEAL_SPAWN_INSET: f32 = 50.0;

    /// Camera shake durations
    pub const SCREEN_SHAKE_DURATION: u32 = 15;
    pub const TIER_SHAKE_FRAMES: u32 = 30;
    pub const BLAST_SHAKE_FRAMES: u32 = 30;
    pub const DASH_SHAKE_FRAMES: u32 = 5;
    /// Shake offset in pixels per remaining shake frame
    pub const SHAKE_AMPLITUDE_PER_FRAME: f32 = 0.8;

    /// Visual effects
    pub const PARTICLE_COUNT: usize = 12;
    pub const PARTICLE_LIFE: u32 = 40;
    pub const PARTICLE_SPREAD: f32 = 12.0;
    pub const BURST_PARTICLES: usize = 60;
    pub const BURST_SPEED: f32 = 15.0;
    pub const TRAIL_LIFE: u32 = 20;
    pub const TRAIL_CHANCE: f32 = 0.7;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Signed shortest rotation that turns `from` onto `to`
#[inline]
pub fn angle_delta(from: f32, to: f32) -> f32 {
    normalize_angle(to - from)
}

/// Heading of a vector in radians (0 = +x, y grows downward on screen)
#[inline]
pub fn heading(v: Vec2) -> f32 {
    v.y.atan2(v.x)
}

/// Bearing from one point toward another
#[inline]
pub fn bearing(from: Vec2, to: Vec2) -> f32 {
    heading(to - from)
}

/// Unit vector for an angle
#[inline]
pub fn unit(theta: f32) -> Vec2 {
    Vec2::new(theta.cos(), theta.sin())
}

/// Ease `current` toward `target` by a fraction of the shortest turn
#[inline]
pub fn ease_angle(current: f32, target: f32, rate: f32) -> f32 {
    normalize_angle(current + angle_delta(current, target) * rate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_normalize_angle_wraps() {
        // 3π lands on the ±π seam; f32 rounding decides the sign
        assert!((normalize_angle(3.0 * PI).abs() - PI).abs() < 1e-5);
        assert!((normalize_angle(3.0 * PI + 0.1) - (-PI + 0.1)).abs() < 1e-5);
        assert!((normalize_angle(-3.0 * PI / 2.0) - PI / 2.0).abs() < 1e-5);
        assert_eq!(normalize_angle(0.5), 0.5);
    }

    #[test]
    fn test_angle_delta_takes_short_way() {
        // From just below +π to just above -π is a small positive turn
        let d = angle_delta(PI - 0.1, -PI + 0.1);
        assert!((d - 0.2).abs() < 1e-4, "got {d}");
        let d = angle_delta(-PI + 0.1, PI - 0.1);
        assert!((d + 0.2).abs() < 1e-4, "got {d}");
    }

    #[test]
    fn test_ease_angle_moves_fractionally() {
        let eased = ease_angle(0.0, 1.0, 0.25);
        assert!((eased - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_bearing_and_unit() {
        let b = bearing(Vec2::ZERO, Vec2::new(0.0, 10.0));
        assert!((b - PI / 2.0).abs() < 1e-6);
        let u = unit(b);
        assert!((u - Vec2::new(0.0, 1.0)).length() < 1e-6);
    }
}
