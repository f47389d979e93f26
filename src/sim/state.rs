//! Game state and core simulation types
//!
//! Everything a run owns lives in [`GameState`]; there is no ambient state, so
//! independent instances can run side by side.

use std::collections::VecDeque;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::clock::{Cooldown, FrameCounter, WallClock};
use super::effects::{Particle, Trail};
use crate::consts::{BLINK_PERIOD_FRAMES, DEFAULT_HEIGHT, DEFAULT_WIDTH, SHAKE_AMPLITUDE_PER_FRAME};
use crate::tuning::Tuning;

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for `start`
    Idle,
    /// Active gameplay
    Playing,
    /// Run ended; ticks are ignored until the next `start`
    GameOver,
}

/// Difficulty tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tier {
    One = 1,
    Two = 2,
    Three = 3,
}

impl Tier {
    pub fn number(self) -> u8 {
        self as u8
    }

    /// Banner text shown when the tier is reached
    pub fn announcement(self) -> &'static str {
        match self {
            Tier::One => "",
            Tier::Two => "MONSTER FIREWALL BREACHED - RADIAL BLAST UNLOCKED [Q]",
            Tier::Three => "BIO-RESTORE CORE ONLINE - INTEGRITY HEARTS DETECTED",
        }
    }
}

/// Playfield size in pixels; origin is the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Strictly inside the visible area
    pub fn contains(&self, pos: Vec2) -> bool {
        pos.x > 0.0 && pos.x < self.width && pos.y > 0.0 && pos.y < self.height
    }

    /// Inside the visible area grown by `margin` on every side
    pub fn contains_with_margin(&self, pos: Vec2, margin: f32) -> bool {
        pos.x > -margin
            && pos.x < self.width + margin
            && pos.y > -margin
            && pos.y < self.height + margin
    }

    /// Clamp a circle's center so the circle stays on screen
    pub fn clamp_circle(&self, pos: Vec2, radius: f32) -> Vec2 {
        Vec2::new(
            pos.x.min(self.width - radius).max(radius),
            pos.y.min(self.height - radius).max(radius),
        )
    }
}

/// Anything with a collision circle
pub trait Circle {
    fn center(&self) -> Vec2;
    fn radius(&self) -> f32;
}

/// The player's craft
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    pub accel: Vec2,
    /// Facing angle (radians)
    pub angle: f32,
    pub radius: f32,
    pub dash: Cooldown,
    pub dash_active: FrameCounter,
    pub fire: Cooldown,
    pub hearts: u8,
    pub invuln: FrameCounter,
    pub special_ready: bool,
    /// Points earned since the special was last used
    pub special_charge: u64,
}

impl Player {
    pub fn new(pos: Vec2, tuning: &Tuning) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            accel: Vec2::ZERO,
            angle: -std::f32::consts::FRAC_PI_2, // Nose up
            radius: tuning.player_radius,
            dash: Cooldown::ready_now(),
            dash_active: FrameCounter::ZERO,
            fire: Cooldown::ready_now(),
            hearts: tuning.player_max_hearts,
            invuln: FrameCounter::ZERO,
            special_ready: false,
            special_charge: 0,
        }
    }

    /// Blink state while invulnerable; derived purely from the counter
    pub fn is_visible(&self) -> bool {
        self.invuln.get() % BLINK_PERIOD_FRAMES < BLINK_PERIOD_FRAMES / 2
    }

    pub fn is_dashing(&self) -> bool {
        self.dash_active.is_active()
    }
}

/// A drifting rock
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asteroid {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub rotation: f32,
    pub rotation_speed: f32,
    /// Outline in local space (unrotated, centered on `pos`)
    pub vertices: Vec<Vec2>,
}

/// A homing enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hostile {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub angle: f32,
    /// Base speed before time and kill bonuses
    pub speed: f32,
    /// Animation phase for the glow pulse
    pub pulse: f32,
    pub attack: Cooldown,
}

/// A projectile; used for both player and hostile shots
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Remaining life in ticks
    pub life: u32,
}

/// Restores one heart when collected
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealPickup {
    pub pos: Vec2,
    pub radius: f32,
    pub spawned_at: WallClock,
    pub lifetime_ms: f64,
}

impl HealPickup {
    pub fn is_expired(&self, now: WallClock) -> bool {
        now.since(self.spawned_at) >= self.lifetime_ms
    }
}

macro_rules! impl_circle {
    ($($ty:ty),*) => {
        $(impl Circle for $ty {
            #[inline]
            fn center(&self) -> Vec2 {
                self.pos
            }
            #[inline]
            fn radius(&self) -> f32 {
                self.radius
            }
        })*
    };
}

impl_circle!(Player, Asteroid, Hostile, Bullet, HealPickup);

/// Color family for explosion particles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Palette {
    /// Player hit
    Blue,
    /// Hostile destroyed or heart collected
    Red,
    /// Asteroid destroyed
    Yellow,
    /// Radial blast
    Cyan,
}

/// Side effects emitted during a tick for the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Explosion { pos: Vec2, palette: Palette },
    RadialBlast { pos: Vec2 },
    PlayerHit { hearts: u8 },
    Healed { hearts: u8 },
    TierReached(Tier),
    GameOver { score: u64, time_secs: f32 },
}

/// Final score and flight time of a finished run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    pub score: u64,
    pub time_secs: f32,
}

/// Mixed into the seed for the cosmetic stream
const FX_SEED_MIX: u64 = 0x9E37_79B9_7F4A_7C15;

/// Complete simulation context
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Gameplay RNG (spawns, pickups)
    pub rng: Pcg32,
    /// Cosmetic RNG (particles, trails); never affects gameplay
    pub fx_rng: Pcg32,
    pub tuning: Tuning,
    /// Override waiting for the next `start`
    pub pending_tuning: Option<Tuning>,
    pub bounds: Bounds,
    pub phase: GamePhase,
    pub tier: Tier,
    pub score: u64,
    /// Cumulative hostiles destroyed this run
    pub kills: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub started_at: WallClock,
    /// Timestamp of the latest tick
    pub now: WallClock,
    pub player: Option<Player>,
    pub asteroids: Vec<Asteroid>,
    pub hostiles: Vec<Hostile>,
    pub bullets: Vec<Bullet>,
    pub hostile_bullets: Vec<Bullet>,
    pub pickups: Vec<HealPickup>,
    pub last_asteroid_spawn: WallClock,
    pub last_hostile_spawn: WallClock,
    pub shake: FrameCounter,
    /// Tier banner timer
    pub announcement: FrameCounter,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    pub trails: VecDeque<Trail>,
    pub events: Vec<GameEvent>,
    pub final_result: Option<RunResult>,
}

impl GameState {
    /// Create an idle game state with default tuning and playfield
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default(), Bounds::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning, bounds: Bounds) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            fx_rng: Pcg32::seed_from_u64(seed ^ FX_SEED_MIX),
            tuning,
            pending_tuning: None,
            bounds,
            phase: GamePhase::Idle,
            tier: Tier::One,
            score: 0,
            kills: 0,
            time_ticks: 0,
            started_at: WallClock::default(),
            now: WallClock::default(),
            player: None,
            asteroids: Vec::new(),
            hostiles: Vec::new(),
            bullets: Vec::new(),
            hostile_bullets: Vec::new(),
            pickups: Vec::new(),
            last_asteroid_spawn: WallClock::default(),
            last_hostile_spawn: WallClock::default(),
            shake: FrameCounter::ZERO,
            announcement: FrameCounter::ZERO,
            particles: Vec::new(),
            trails: VecDeque::new(),
            events: Vec::new(),
            final_result: None,
        }
    }

    /// Reset all run state and begin accepting ticks
    ///
    /// Both RNG streams are reseeded, so every run on an instance replays the
    /// same way for its seed.
    pub fn start(&mut self, now: WallClock) {
        if let Some(tuning) = self.pending_tuning.take() {
            self.tuning = tuning;
        }
        self.rng = Pcg32::seed_from_u64(self.seed);
        self.fx_rng = Pcg32::seed_from_u64(self.seed ^ FX_SEED_MIX);
        self.phase = GamePhase::Playing;
        self.tier = Tier::One;
        self.score = 0;
        self.kills = 0;
        self.time_ticks = 0;
        self.started_at = now;
        self.now = now;
        self.player = Some(Player::new(self.bounds.center(), &self.tuning));
        self.asteroids.clear();
        self.hostiles.clear();
        self.bullets.clear();
        self.hostile_bullets.clear();
        self.pickups.clear();
        self.last_asteroid_spawn = now;
        self.last_hostile_spawn = now;
        self.shake = FrameCounter::ZERO;
        self.announcement = FrameCounter::ZERO;
        self.particles.clear();
        self.trails.clear();
        self.events.clear();
        self.final_result = None;
        log::info!("Run started (seed {}, {}x{})", self.seed, self.bounds.width, self.bounds.height);
    }

    /// Hold a tuning override until the next `start`; a live run keeps its values
    pub fn queue_tuning(&mut self, tuning: Tuning) {
        self.pending_tuning = Some(tuning);
    }

    /// Resize the playfield (host window resize)
    pub fn set_bounds(&mut self, bounds: Bounds) {
        self.bounds = bounds;
    }

    /// Milliseconds since the run started
    pub fn elapsed_ms(&self) -> f64 {
        self.now.since(self.started_at).max(0.0)
    }

    pub fn elapsed_secs(&self) -> f32 {
        (self.elapsed_ms() / 1000.0) as f32
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    /// Take the events emitted since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Current camera shake offset magnitude in pixels
    pub fn shake_amplitude(&self) -> f32 {
        self.shake.get() as f32 * SHAKE_AMPLITUDE_PER_FRAME
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_idle() {
        let state = GameState::new(1);
        assert_eq!(state.phase, GamePhase::Idle);
        assert!(state.player.is_none());
    }

    #[test]
    fn test_start_places_player_at_center() {
        let mut state = GameState::new(1);
        state.start(WallClock(500.0));
        let player = state.player.as_ref().expect("player spawned");
        assert_eq!(player.pos, state.bounds.center());
        assert_eq!(player.hearts, state.tuning.player_max_hearts);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.elapsed_ms(), 0.0);
    }

    #[test]
    fn test_queued_tuning_waits_for_next_run() {
        let mut state = GameState::new(1);
        state.start(WallClock(0.0));
        let tuning = Tuning::from_json(r#"{"player_max_hearts": 1}"#).expect("valid");
        state.queue_tuning(tuning);
        assert_eq!(state.tuning.player_max_hearts, Tuning::default().player_max_hearts);
        let player = state.player.as_ref().expect("alive");
        assert!(player.hearts <= state.tuning.player_max_hearts);

        state.start(WallClock(1000.0));
        assert_eq!(state.tuning.player_max_hearts, 1);
        assert!(state.pending_tuning.is_none());
        assert_eq!(state.player.as_ref().map(|p| p.hearts), Some(1));
    }

    #[test]
    fn test_blink_is_function_of_counter() {
        let mut player = Player::new(Vec2::ZERO, &Tuning::default());
        let pattern: Vec<bool> = (0..10)
            .map(|n| {
                player.invuln.set(n);
                player.is_visible()
            })
            .collect();
        assert_eq!(
            pattern,
            [true, true, true, true, true, false, false, false, false, false]
        );
    }

    #[test]
    fn test_bounds_clamp_circle() {
        let b = Bounds::new(100.0, 50.0);
        assert_eq!(b.clamp_circle(Vec2::new(-5.0, 60.0), 10.0), Vec2::new(10.0, 40.0));
        assert!(b.contains_with_margin(Vec2::new(-100.0, 0.0), 150.0));
        assert!(!b.contains(Vec2::new(0.0, 10.0)));
    }

    #[test]
    fn test_heal_pickup_expiry() {
        let pickup = HealPickup {
            pos: Vec2::ZERO,
            radius: 12.0,
            spawned_at: WallClock(1000.0),
            lifetime_ms: 500.0,
        };
        assert!(!pickup.is_expired(WallClock(1499.0)));
        assert!(pickup.is_expired(WallClock(1500.0)));
    }
}
