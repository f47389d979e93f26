//! Difficulty curve: tier transitions, spawn pacing and special recharge

use rand::Rng;

use super::clock::WallClock;
use super::spawn;
use super::state::{GameEvent, GameState, Tier};
use crate::tuning::Tuning;

/// Number of whole time slices elapsed; drives both asteroid pacing and hostile speed
pub fn level_factor(elapsed_ms: f64, tuning: &Tuning) -> u32 {
    (elapsed_ms.max(0.0) / tuning.spawn_decrement_interval_ms).floor() as u32
}

/// Asteroid spawn interval, stepping down each slice to a floor
pub fn asteroid_spawn_interval(elapsed_ms: f64, tuning: &Tuning) -> f64 {
    let reduced = tuning.initial_spawn_interval_ms
        - level_factor(elapsed_ms, tuning) as f64 * tuning.spawn_decrement_amount_ms;
    reduced.max(tuning.min_spawn_interval_ms)
}

/// Hostile spawn interval: slow start, then a fixed faster pace
pub fn hostile_spawn_interval(elapsed_ms: f64, tuning: &Tuning) -> f64 {
    if elapsed_ms > tuning.hostile_fast_after_ms {
        tuning.hostile_spawn_fast_ms
    } else {
        tuning.hostile_spawn_start_ms
    }
}

/// Spawn whatever hazards and pickups are due this step
pub fn spawn_hazards(state: &mut GameState, now: WallClock) {
    let elapsed = state.elapsed_ms();

    if now.since(state.last_asteroid_spawn) > asteroid_spawn_interval(elapsed, &state.tuning) {
        let asteroid = spawn::asteroid(&mut state.rng, state.bounds, &state.tuning, state.tier);
        log::debug!("Asteroid spawned at ({:.0}, {:.0})", asteroid.pos.x, asteroid.pos.y);
        state.asteroids.push(asteroid);
        state.last_asteroid_spawn = now;
    }

    if now.since(state.last_hostile_spawn) > hostile_spawn_interval(elapsed, &state.tuning)
        && state.hostiles.len() < state.tuning.hostile_max_count
    {
        let hostile = spawn::hostile(&mut state.rng, state.bounds, &state.tuning, now);
        log::debug!("Hostile spawned ({} live)", state.hostiles.len() + 1);
        state.hostiles.push(hostile);
        state.last_hostile_spawn = now;
    }

    if heal_wanted(state) && state.rng.random::<f64>() < state.tuning.heal_spawn_chance {
        let pickup = spawn::heal_pickup(&mut state.rng, state.bounds, &state.tuning, now);
        log::debug!("Heal pickup spawned at ({:.0}, {:.0})", pickup.pos.x, pickup.pos.y);
        state.pickups.push(pickup);
    }
}

/// Tier three, player hurt, and no pickup already on the field
fn heal_wanted(state: &GameState) -> bool {
    state.tier >= Tier::Three
        && state.pickups.is_empty()
        && state
            .player
            .as_ref()
            .is_some_and(|p| p.hearts < state.tuning.player_max_hearts)
}

/// Advance at most one tier based on cumulative kills
pub fn advance_tier(state: &mut GameState) -> Option<Tier> {
    let t = &state.tuning;
    let next = match state.tier {
        Tier::One if state.kills >= t.level_up_kills => Tier::Two,
        Tier::Two if state.kills >= t.level_3_kills_total => Tier::Three,
        _ => return None,
    };

    state.tier = next;
    state.announcement.set(t.level_text_frames);
    state.shake.set(t.tier_shake_frames);

    if next == Tier::Two {
        let recharge = t.blast_points_recharge;
        if let Some(player) = state.player.as_mut() {
            player.special_ready = true;
            player.special_charge = recharge;
        }
    }

    state.events.push(GameEvent::TierReached(next));
    log::info!("Tier {} reached after {} kills", next.number(), state.kills);
    Some(next)
}

/// Flag the special as ready once enough points have been banked since last use
pub fn recharge_special(state: &mut GameState) {
    if state.tier < Tier::Two {
        return;
    }
    let threshold = state.tuning.blast_points_recharge;
    if let Some(player) = state.player.as_mut() {
        if !player.special_ready && player.special_charge >= threshold {
            player.special_ready = true;
            log::debug!("Radial blast recharged");
        }
    }
}

/// Special charge progress in [0, 1]
pub fn special_progress(state: &GameState) -> f32 {
    match state.player.as_ref() {
        Some(p) if p.special_ready => 1.0,
        Some(p) => (p.special_charge as f64 / state.tuning.blast_points_recharge as f64).min(1.0) as f32,
        None => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn playing() -> GameState {
        let mut state = GameState::new(21);
        state.start(WallClock(0.0));
        state
    }

    #[test]
    fn test_asteroid_interval_steps_down_to_floor() {
        let t = Tuning::default();
        assert_eq!(asteroid_spawn_interval(0.0, &t), t.initial_spawn_interval_ms);
        assert_eq!(
            asteroid_spawn_interval(t.spawn_decrement_interval_ms - 1.0, &t),
            t.initial_spawn_interval_ms
        );
        assert_eq!(
            asteroid_spawn_interval(t.spawn_decrement_interval_ms * 2.0, &t),
            t.initial_spawn_interval_ms - 2.0 * t.spawn_decrement_amount_ms
        );
        assert_eq!(asteroid_spawn_interval(1.0e9, &t), t.min_spawn_interval_ms);
    }

    #[test]
    fn test_hostile_interval_switches_after_threshold() {
        let t = Tuning::default();
        assert_eq!(hostile_spawn_interval(t.hostile_fast_after_ms, &t), t.hostile_spawn_start_ms);
        assert_eq!(
            hostile_spawn_interval(t.hostile_fast_after_ms + 1.0, &t),
            t.hostile_spawn_fast_ms
        );
    }

    #[test]
    fn test_asteroid_spawns_when_interval_exceeded() {
        let mut state = playing();
        let interval = state.tuning.initial_spawn_interval_ms;
        state.now = WallClock(interval);
        spawn_hazards(&mut state, WallClock(interval));
        assert!(state.asteroids.is_empty());
        state.now = WallClock(interval + 1.0);
        spawn_hazards(&mut state, WallClock(interval + 1.0));
        assert_eq!(state.asteroids.len(), 1);
        assert_eq!(state.last_asteroid_spawn, WallClock(interval + 1.0));
    }

    #[test]
    fn test_hostile_spawn_respects_cap() {
        let mut state = playing();
        let mut now = 0.0;
        for _ in 0..20 {
            now += state.tuning.hostile_spawn_start_ms + 1.0;
            state.now = WallClock(now);
            spawn_hazards(&mut state, WallClock(now));
        }
        assert_eq!(state.hostiles.len(), state.tuning.hostile_max_count);
    }

    #[test]
    fn test_heal_spawn_is_gated() {
        let mut tuning = Tuning::default();
        tuning.heal_spawn_chance = 1.0;
        let mut state = GameState::with_tuning(8, tuning, Default::default());
        state.start(WallClock(0.0));

        // Tier too low
        state.tier = Tier::Two;
        if let Some(p) = state.player.as_mut() {
            p.hearts = 1;
        }
        spawn_hazards(&mut state, WallClock(1.0));
        assert!(state.pickups.is_empty());

        // Full health
        state.tier = Tier::Three;
        if let Some(p) = state.player.as_mut() {
            p.hearts = state.tuning.player_max_hearts;
        }
        spawn_hazards(&mut state, WallClock(2.0));
        assert!(state.pickups.is_empty());

        // Hurt at tier three: exactly one pickup, never two
        if let Some(p) = state.player.as_mut() {
            p.hearts = 1;
        }
        spawn_hazards(&mut state, WallClock(3.0));
        spawn_hazards(&mut state, WallClock(4.0));
        assert_eq!(state.pickups.len(), 1);
    }

    #[test]
    fn test_exact_threshold_unlocks_special_with_recharge_charge() {
        let mut state = playing();
        state.kills = state.tuning.level_up_kills;
        assert_eq!(advance_tier(&mut state), Some(Tier::Two));

        let p = state.player.as_ref().expect("alive");
        assert!(p.special_ready);
        assert_eq!(p.special_charge, state.tuning.blast_points_recharge);
        assert_eq!(state.announcement.get(), state.tuning.level_text_frames);
        assert_eq!(state.events, vec![GameEvent::TierReached(Tier::Two)]);
    }

    #[test]
    fn test_one_tier_per_step_and_no_repeats() {
        let mut state = playing();
        state.kills = 100;
        assert_eq!(advance_tier(&mut state), Some(Tier::Two));
        assert_eq!(advance_tier(&mut state), Some(Tier::Three));
        assert_eq!(advance_tier(&mut state), None);
        assert_eq!(state.tier, Tier::Three);
        let announced = state
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::TierReached(_)))
            .count();
        assert_eq!(announced, 2);
    }

    #[test]
    fn test_below_threshold_stays() {
        let mut state = playing();
        state.kills = state.tuning.level_up_kills - 1;
        assert_eq!(advance_tier(&mut state), None);
        assert_eq!(state.tier, Tier::One);
    }

    #[test]
    fn test_recharge_needs_tier_two_and_points() {
        let mut state = playing();
        let threshold = state.tuning.blast_points_recharge;
        if let Some(p) = state.player.as_mut() {
            p.special_charge = threshold;
        }
        recharge_special(&mut state);
        assert!(!state.player.as_ref().expect("alive").special_ready);

        state.tier = Tier::Two;
        if let Some(p) = state.player.as_mut() {
            p.special_charge = threshold - 1;
        }
        recharge_special(&mut state);
        assert!(!state.player.as_ref().expect("alive").special_ready);
        assert!((special_progress(&state) - (threshold - 1) as f32 / threshold as f32).abs() < 1e-6);

        if let Some(p) = state.player.as_mut() {
            p.special_charge = threshold;
        }
        recharge_special(&mut state);
        assert!(state.player.as_ref().expect("alive").special_ready);
        assert_eq!(special_progress(&state), 1.0);
    }

    proptest! {
        #[test]
        fn prop_asteroid_interval_bounded_and_non_increasing(a in 0.0f64..1.0e7, b in 0.0f64..1.0e7) {
            let t = Tuning::default();
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let early = asteroid_spawn_interval(lo, &t);
            let late = asteroid_spawn_interval(hi, &t);
            prop_assert!(late <= early);
            prop_assert!(late >= t.min_spawn_interval_ms);
            prop_assert!(early <= t.initial_spawn_interval_ms);
        }

        #[test]
        fn prop_tier_never_regresses(kills in proptest::collection::vec(0u32..60, 1..40)) {
            let mut state = playing();
            let mut last = state.tier;
            for k in kills {
                state.kills = state.kills.max(k);
                advance_tier(&mut state);
                prop_assert!(state.tier >= last);
                last = state.tier;
            }
        }
    }
}
