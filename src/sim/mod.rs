//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (insertion order, removals preserve it)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod clock;
pub mod collision;
pub mod effects;
pub mod hostile;
pub mod input;
pub mod player;
pub mod progression;
pub mod snapshot;
pub mod spawn;
pub mod state;
pub mod tick;

pub use clock::{Cooldown, FrameCounter, WallClock};
pub use effects::{Particle, Trail};
pub use input::{InputCode, InputState};
pub use snapshot::{HudSnapshot, RenderView};
pub use state::{
    Asteroid, Bounds, Bullet, Circle, GameEvent, GamePhase, GameState, HealPickup, Hostile,
    Palette, Player, RunResult, Tier,
};
pub use tick::{Stepper, tick};
