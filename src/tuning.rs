//! Data-driven game balance
//!
//! [`Tuning`] mirrors every gameplay constant in [`crate::consts`]. A JSON
//! document can override any subset of fields; missing keys fall back to the
//! compile-time defaults, so the tier curve always keeps its shape.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::TuningError;

/// Runtime-tunable gameplay values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player ===
    pub player_radius: f32,
    pub player_accel: f32,
    pub player_friction: f32,
    pub player_rot_speed: f32,
    pub player_max_hearts: u8,
    pub invuln_frames: u32,

    // === Dash ===
    pub dash_impulse: f32,
    pub dash_cooldown_ms: f64,
    pub dash_duration_frames: u32,

    // === Player bullets ===
    pub bullet_speed: f32,
    pub bullet_radius: f32,
    pub bullet_life: u32,
    pub bullet_cooldown_ms: f64,
    pub bullet_recoil: f32,

    // === Hostiles ===
    pub hostile_radius: f32,
    pub hostile_initial_speed: f32,
    pub hostile_rot_speed: f32,
    pub hostile_speed_inc: f32,
    pub hostile_kill_speed_inc: f32,
    pub hostile_max_count: usize,
    pub hostile_spawn_start_ms: f64,
    pub hostile_spawn_fast_ms: f64,
    pub hostile_fast_after_ms: f64,
    pub hostile_attack_interval_ms: f64,
    pub hostile_attack_jitter_ms: f64,
    pub hostile_knockback: f32,
    pub hostile_bullet_speed: f32,
    pub hostile_bullet_radius: f32,
    pub hostile_bullet_life: u32,

    // === Asteroids ===
    pub asteroid_min_radius: f32,
    pub asteroid_max_radius: f32,
    pub asteroid_min_speed: f32,
    pub asteroid_max_speed: f32,
    /// Speed band multiplier for tiers 1, 2 and 3
    pub asteroid_tier_speed_scale: [f32; 3],
    pub asteroid_min_vertices: u32,
    pub asteroid_max_vertices: u32,
    pub offscreen_margin: f32,
    pub initial_spawn_interval_ms: f64,
    pub min_spawn_interval_ms: f64,
    pub spawn_decrement_interval_ms: f64,
    pub spawn_decrement_amount_ms: f64,

    // === Combat ===
    pub contact_margin: f32,
    pub points_asteroid: u64,
    pub points_hostile: u64,

    // === Progression ===
    pub level_up_kills: u32,
    pub level_3_kills_total: u32,
    pub level_text_frames: u32,

    // === Radial blast ===
    pub blast_radius: f32,
    pub blast_points_recharge: u64,

    // === Heal pickups ===
    pub heal_radius: f32,
    pub heal_lifetime_ms: f64,
    pub heal_spawn_chance: f64,

    // === Camera shake ===
    pub hit_shake_frames: u32,
    pub tier_shake_frames: u32,
    pub blast_shake_frames: u32,
    pub dash_shake_frames: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_radius: PLAYER_RADIUS,
            player_accel: PLAYER_ACCEL,
            player_friction: PLAYER_FRICTION,
            player_rot_speed: PLAYER_ROT_SPEED,
            player_max_hearts: PLAYER_MAX_HEARTS,
            invuln_frames: INVULN_FRAMES,

            dash_impulse: DASH_IMPULSE,
            dash_cooldown_ms: DASH_COOLDOWN_MS,
            dash_duration_frames: DASH_DURATION_FRAMES,

            bullet_speed: BULLET_SPEED,
            bullet_radius: BULLET_RADIUS,
            bullet_life: BULLET_LIFE,
            bullet_cooldown_ms: BULLET_COOLDOWN_MS,
            bullet_recoil: BULLET_RECOIL,

            hostile_radius: HOSTILE_RADIUS,
            hostile_initial_speed: HOSTILE_INITIAL_SPEED,
            hostile_rot_speed: HOSTILE_ROT_SPEED,
            hostile_speed_inc: HOSTILE_SPEED_INC,
            hostile_kill_speed_inc: HOSTILE_KILL_SPEED_INC,
            hostile_max_count: HOSTILE_MAX_COUNT,
            hostile_spawn_start_ms: HOSTILE_SPAWN_START_MS,
            hostile_spawn_fast_ms: HOSTILE_SPAWN_FAST_MS,
            hostile_fast_after_ms: HOSTILE_FAST_AFTER_MS,
            hostile_attack_interval_ms: HOSTILE_ATTACK_INTERVAL_MS,
            hostile_attack_jitter_ms: HOSTILE_ATTACK_JITTER_MS,
            hostile_knockback: HOSTILE_KNOCKBACK,
            hostile_bullet_speed: HOSTILE_BULLET_SPEED,
            hostile_bullet_radius: HOSTILE_BULLET_RADIUS,
            hostile_bullet_life: HOSTILE_BULLET_LIFE,

            asteroid_min_radius: ASTEROID_MIN_RADIUS,
            asteroid_max_radius: ASTEROID_MAX_RADIUS,
            asteroid_min_speed: ASTEROID_MIN_SPEED,
            asteroid_max_speed: ASTEROID_MAX_SPEED,
            asteroid_tier_speed_scale: [1.0, 1.15, 1.3],
            asteroid_min_vertices: ASTEROID_MIN_VERTICES,
            asteroid_max_vertices: ASTEROID_MAX_VERTICES,
            offscreen_margin: OFFSCREEN_MARGIN,
            initial_spawn_interval_ms: INITIAL_SPAWN_INTERVAL_MS,
            min_spawn_interval_ms: MIN_SPAWN_INTERVAL_MS,
            spawn_decrement_interval_ms: SPAWN_DECREMENT_INTERVAL_MS,
            spawn_decrement_amount_ms: SPAWN_DECREMENT_AMOUNT_MS,

            contact_margin: CONTACT_MARGIN,
            points_asteroid: POINTS_ASTEROID,
            points_hostile: POINTS_HOSTILE,

            level_up_kills: LEVEL_UP_KILLS,
            level_3_kills_total: LEVEL_3_KILLS_TOTAL,
            level_text_frames: LEVEL_TEXT_FRAMES,

            blast_radius: BLAST_RADIUS,
            blast_points_recharge: BLAST_POINTS_RECHARGE,

            heal_radius: HEAL_RADIUS,
            heal_lifetime_ms: HEAL_LIFETIME_MS,
            heal_spawn_chance: HEAL_SPAWN_CHANCE,

            hit_shake_frames: SCREEN_SHAKE_DURATION,
            tier_shake_frames: TIER_SHAKE_FRAMES,
            blast_shake_frames: BLAST_SHAKE_FRAMES,
            dash_shake_frames: DASH_SHAKE_FRAMES,
        }
    }
}

impl Tuning {
    /// Parse a JSON override document and validate the result
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read and parse a JSON override file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| TuningError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning overrides from {}", path.display());
        Ok(tuning)
    }

    /// Check the constraints the simulation relies on
    pub fn validate(&self) -> Result<(), TuningError> {
        fn invalid(field: &'static str, reason: &'static str) -> Result<(), TuningError> {
            Err(TuningError::Invalid { field, reason })
        }

        if !(self.player_friction > 0.0 && self.player_friction <= 1.0) {
            return invalid("player_friction", "must be in (0, 1]");
        }
        if self.player_max_hearts == 0 {
            return invalid("player_max_hearts", "must be at least 1");
        }
        let radii = [
            ("player_radius", self.player_radius),
            ("bullet_radius", self.bullet_radius),
            ("hostile_radius", self.hostile_radius),
            ("hostile_bullet_radius", self.hostile_bullet_radius),
            ("asteroid_min_radius", self.asteroid_min_radius),
            ("heal_radius", self.heal_radius),
            ("blast_radius", self.blast_radius),
        ];
        for (field, value) in radii {
            if value <= 0.0 {
                return invalid(field, "must be positive");
            }
        }
        if self.asteroid_max_radius < self.asteroid_min_radius {
            return invalid("asteroid_max_radius", "must not be below asteroid_min_radius");
        }
        if self.asteroid_max_speed < self.asteroid_min_speed {
            return invalid("asteroid_max_speed", "must not be below asteroid_min_speed");
        }
        if self.asteroid_min_vertices < 3 {
            return invalid("asteroid_min_vertices", "a polygon needs at least 3 vertices");
        }
        if self.asteroid_max_vertices < self.asteroid_min_vertices {
            return invalid(
                "asteroid_max_vertices",
                "must not be below asteroid_min_vertices",
            );
        }
        if self.spawn_decrement_interval_ms <= 0.0 {
            return invalid("spawn_decrement_interval_ms", "must be positive");
        }
        if self.min_spawn_interval_ms > self.initial_spawn_interval_ms {
            return invalid(
                "min_spawn_interval_ms",
                "must not exceed initial_spawn_interval_ms",
            );
        }
        if self.dash_cooldown_ms <= 0.0 {
            return invalid("dash_cooldown_ms", "must be positive");
        }
        if self.level_up_kills == 0 || self.level_3_kills_total <= self.level_up_kills {
            return invalid(
                "level_3_kills_total",
                "tier thresholds must be positive and increasing",
            );
        }
        if self.blast_points_recharge == 0 {
            return invalid("blast_points_recharge", "must be positive");
        }
        if !(0.0..=1.0).contains(&self.heal_spawn_chance) {
            return invalid("heal_spawn_chance", "must be a probability");
        }
        Ok(())
    }

    /// Asteroid speed band `(min, max)` for a tier (1-based)
    pub fn asteroid_speed_band(&self, tier: u8) -> (f32, f32) {
        let idx = (tier.clamp(1, 3) - 1) as usize;
        let scale = self.asteroid_tier_speed_scale[idx];
        (self.asteroid_min_speed * scale, self.asteroid_max_speed * scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "player_max_hearts": 5, "blast_radius": 300.0 }"#)
            .expect("valid override");
        assert_eq!(tuning.player_max_hearts, 5);
        assert_eq!(tuning.blast_radius, 300.0);
        assert_eq!(tuning.player_friction, PLAYER_FRICTION);
        assert_eq!(tuning.level_up_kills, LEVEL_UP_KILLS);
    }

    #[test]
    fn test_rejects_bad_friction() {
        let err = Tuning::from_json(r#"{ "player_friction": 1.5 }"#).unwrap_err();
        assert!(matches!(
            err,
            TuningError::Invalid {
                field: "player_friction",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_non_increasing_tiers() {
        let err =
            Tuning::from_json(r#"{ "level_up_kills": 10, "level_3_kills_total": 10 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { .. }));
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            Tuning::from_json("not json"),
            Err(TuningError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Tuning::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, TuningError::Io { .. }));
    }

    #[test]
    fn test_speed_band_scales_with_tier() {
        let tuning = Tuning::default();
        let (lo1, hi1) = tuning.asteroid_speed_band(1);
        let (lo3, hi3) = tuning.asteroid_speed_band(3);
        assert_eq!((lo1, hi1), (ASTEROID_MIN_SPEED, ASTEROID_MAX_SPEED));
        assert!(lo3 > lo1 && hi3 > hi1);
        // Out-of-range tiers clamp rather than panic
        assert_eq!(tuning.asteroid_speed_band(0), (lo1, hi1));
    }
}
