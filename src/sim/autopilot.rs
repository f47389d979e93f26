//! Demo autopilot
//!
//! Produces an input snapshot from the current state so the game can play
//! itself: attract mode on the web build, headless runs natively, and long
//! soak tests. Purely a function of the state, so it stays deterministic.

use glam::Vec2;

use super::input::{InputCode, InputState};
use super::state::{Circle, GameState, Tier};

/// Threats closer than this (edge to edge) are evaded
const DANGER_RADIUS: f32 = 160.0;
/// Threats closer than this trigger a dash
const PANIC_RADIUS: f32 = 40.0;
/// Distance from center considered "home"
const HOME_RADIUS: f32 = 60.0;
/// Axis component below which no key is held
const STEER_DEADBAND: f32 = 0.3;

fn gap_to(c: &impl Circle, from: Vec2, radius: f32) -> (Vec2, f32) {
    (c.center(), c.center().distance(from) - c.radius() - radius)
}

/// Closest hazard edge-to-edge: `(position, gap)`
fn nearest_threat(state: &GameState, from: Vec2, radius: f32) -> Option<(Vec2, f32)> {
    state
        .asteroids
        .iter()
        .map(|a| gap_to(a, from, radius))
        .chain(state.hostiles.iter().map(|h| gap_to(h, from, radius)))
        .chain(state.hostile_bullets.iter().map(|b| gap_to(b, from, radius)))
        .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
}

/// Hazards the radial blast would clear right now
fn in_blast_range(state: &GameState, origin: Vec2) -> usize {
    let r = state.tuning.blast_radius;
    state
        .asteroids
        .iter()
        .filter(|a| a.pos.distance(origin) < r)
        .count()
        + state
            .hostiles
            .iter()
            .filter(|h| h.pos.distance(origin) < r)
            .count()
}

/// Decide what to press this step
pub fn drive(state: &GameState) -> InputState {
    let mut input = InputState::default();
    let Some(player) = state.player.as_ref() else {
        return input;
    };
    input.set(InputCode::Fire, true);

    let threat = nearest_threat(state, player.pos, player.radius);
    let wanted = match threat {
        Some((pos, gap)) if gap < DANGER_RADIUS => (player.pos - pos).normalize_or_zero(),
        _ => {
            // Hurt and safe: go for the heart
            let hurt = player.hearts < state.tuning.player_max_hearts;
            let goal = match state.pickups.first() {
                Some(pickup) if hurt => pickup.pos,
                _ => state.bounds.center(),
            };
            let to_goal = goal - player.pos;
            if to_goal.length() > HOME_RADIUS {
                to_goal.normalize_or_zero()
            } else {
                Vec2::ZERO
            }
        }
    };

    input.set(InputCode::MoveLeft, wanted.x < -STEER_DEADBAND);
    input.set(InputCode::MoveRight, wanted.x > STEER_DEADBAND);
    input.set(InputCode::MoveUp, wanted.y < -STEER_DEADBAND);
    input.set(InputCode::MoveDown, wanted.y > STEER_DEADBAND);

    if let Some((_, gap)) = threat {
        let dash_ready = player.dash.is_ready(state.now, state.tuning.dash_cooldown_ms);
        input.set(InputCode::Dash, gap < PANIC_RADIUS && dash_ready);
    }

    if state.tier >= Tier::Two && player.special_ready && in_blast_range(state, player.pos) >= 2 {
        input.set(InputCode::Special, true);
    }

    input
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::clock::WallClock;
    use crate::sim::state::Asteroid;

    fn playing() -> GameState {
        let mut state = GameState::new(17);
        state.start(WallClock(0.0));
        state
    }

    fn rock(pos: Vec2) -> Asteroid {
        Asteroid {
            pos,
            vel: Vec2::ZERO,
            radius: 20.0,
            rotation: 0.0,
            rotation_speed: 0.0,
            vertices: Vec::new(),
        }
    }

    #[test]
    fn test_no_player_no_input() {
        let mut state = playing();
        state.player = None;
        assert!(!drive(&state).any());
    }

    #[test]
    fn test_idles_at_center_and_fires() {
        let state = playing();
        let input = drive(&state);
        assert!(input.is_pressed(InputCode::Fire));
        assert!(!input.is_pressed(InputCode::MoveLeft));
        assert!(!input.is_pressed(InputCode::MoveRight));
        assert!(!input.is_pressed(InputCode::Special));
    }

    #[test]
    fn test_flees_nearby_threat() {
        let mut state = playing();
        let center = state.bounds.center();
        state.asteroids.push(rock(center + Vec2::new(100.0, 0.0)));
        let input = drive(&state);
        assert!(input.is_pressed(InputCode::MoveLeft));
        assert!(!input.is_pressed(InputCode::MoveRight));
        assert!(!input.is_pressed(InputCode::Dash));
    }

    #[test]
    fn test_dashes_when_cornered() {
        let mut state = playing();
        let center = state.bounds.center();
        state.asteroids.push(rock(center + Vec2::new(0.0, 50.0)));
        let input = drive(&state);
        assert!(input.is_pressed(InputCode::Dash));
        assert!(input.is_pressed(InputCode::MoveUp));
    }

    #[test]
    fn test_blasts_crowd_when_ready() {
        let mut state = playing();
        state.tier = Tier::Two;
        if let Some(p) = state.player.as_mut() {
            p.special_ready = true;
        }
        let center = state.bounds.center();
        state.asteroids.push(rock(center + Vec2::new(200.0, 0.0)));
        assert!(!drive(&state).is_pressed(InputCode::Special));
        state.asteroids.push(rock(center + Vec2::new(-200.0, 0.0)));
        assert!(drive(&state).is_pressed(InputCode::Special));
    }
}
