//! The two time domains of the simulation
//!
//! Frame timers ([`FrameCounter`]) advance once per step and are tied to the
//! fixed step rate. Wall-clock timers ([`WallClock`], [`Cooldown`]) compare host
//! timestamps in milliseconds and do not care how many steps ran in between.
//! Keeping them as separate types prevents mixing frames with milliseconds.

use serde::{Deserialize, Serialize};

/// Host timestamp in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
pub struct WallClock(pub f64);

impl WallClock {
    #[inline]
    pub fn ms(self) -> f64 {
        self.0
    }

    /// Milliseconds elapsed since `earlier` (negative if `earlier` is in the future)
    #[inline]
    pub fn since(self, earlier: WallClock) -> f64 {
        self.0 - earlier.0
    }

    /// Timestamp shifted by `ms`
    #[inline]
    pub fn offset(self, ms: f64) -> Self {
        Self(self.0 + ms)
    }
}

/// Countdown measured in simulation steps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FrameCounter(u32);

impl FrameCounter {
    pub const ZERO: FrameCounter = FrameCounter(0);

    pub fn new(frames: u32) -> Self {
        Self(frames)
    }

    /// Remaining frames
    #[inline]
    pub fn get(self) -> u32 {
        self.0
    }

    #[inline]
    pub fn is_active(self) -> bool {
        self.0 > 0
    }

    /// Restart the countdown
    pub fn set(&mut self, frames: u32) {
        self.0 = frames;
    }

    /// Advance one step; saturates at zero
    pub fn tick(&mut self) {
        self.0 = self.0.saturating_sub(1);
    }
}

/// Wall-clock gate: open once more than the cooldown has passed since the last trigger
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Cooldown {
    last: Option<WallClock>,
}

impl Cooldown {
    /// A gate that has never fired (immediately ready)
    pub fn ready_now() -> Self {
        Self { last: None }
    }

    /// A gate that behaves as if it last fired at `at` (may be in the future)
    pub fn primed_at(at: WallClock) -> Self {
        Self { last: Some(at) }
    }

    pub fn last(&self) -> Option<WallClock> {
        self.last
    }

    pub fn is_ready(&self, now: WallClock, cooldown_ms: f64) -> bool {
        match self.last {
            None => true,
            Some(last) => now.since(last) > cooldown_ms,
        }
    }

    pub fn trigger(&mut self, now: WallClock) {
        self.last = Some(now);
    }

    /// Fire the gate if it is open; returns whether it fired
    pub fn try_trigger(&mut self, now: WallClock, cooldown_ms: f64) -> bool {
        if self.is_ready(now, cooldown_ms) {
            self.trigger(now);
            true
        } else {
            false
        }
    }

    /// Recharge progress in [0, 1]
    pub fn fraction(&self, now: WallClock, cooldown_ms: f64) -> f32 {
        match self.last {
            None => 1.0,
            Some(last) => (now.since(last) / cooldown_ms).clamp(0.0, 1.0) as f32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_counter_saturates() {
        let mut c = FrameCounter::new(2);
        c.tick();
        c.tick();
        c.tick();
        assert_eq!(c.get(), 0);
        assert!(!c.is_active());
    }

    #[test]
    fn test_cooldown_is_strictly_greater() {
        let mut cd = Cooldown::ready_now();
        assert!(cd.try_trigger(WallClock(100.0), 50.0));
        assert!(!cd.is_ready(WallClock(150.0), 50.0));
        assert!(cd.is_ready(WallClock(150.1), 50.0));
    }

    #[test]
    fn test_cooldown_primed_in_future() {
        let cd = Cooldown::primed_at(WallClock(1000.0));
        assert!(!cd.is_ready(WallClock(500.0), 0.0));
        assert_eq!(cd.fraction(WallClock(500.0), 100.0), 0.0);
    }

    #[test]
    fn test_cooldown_fraction() {
        let cd = Cooldown::primed_at(WallClock(0.0));
        assert!((cd.fraction(WallClock(750.0), 1500.0) - 0.5).abs() < 1e-6);
        assert_eq!(cd.fraction(WallClock(9999.0), 1500.0), 1.0);
        assert_eq!(Cooldown::ready_now().fraction(WallClock(0.0), 1500.0), 1.0);
    }
}
