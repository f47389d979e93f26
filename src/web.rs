//! Browser host glue (wasm32 only)
//!
//! The page owns the canvas, drawing and the `requestAnimationFrame` loop; it
//! forwards key events and timestamps here and reads back JSON snapshots.

use wasm_bindgen::prelude::*;

use crate::best_score::BestScore;
use crate::sim::{
    Bounds, GameEvent, GameState, HudSnapshot, InputState, RenderView, Stepper, WallClock,
    autopilot,
};
use crate::tuning::Tuning;

#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialised".into());
    }
    log::info!("Floating Dodge starting...");
}

fn js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Game instance exported to JavaScript
#[wasm_bindgen]
pub struct WebGame {
    state: GameState,
    stepper: Stepper,
    input: InputState,
    best: BestScore,
    autopilot: bool,
    events: Vec<GameEvent>,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32) -> WebGame {
        let seed = (js_sys::Math::random() * u32::MAX as f64) as u64;
        WebGame {
            state: GameState::with_tuning(seed, Tuning::default(), Bounds::new(width, height)),
            stepper: Stepper::new(),
            input: InputState::default(),
            best: BestScore::load(),
            autopilot: false,
            events: Vec::new(),
        }
    }

    /// Replace tuning values from a JSON override document; applies from the next run
    pub fn set_tuning(&mut self, json: &str) -> Result<(), JsValue> {
        let tuning = Tuning::from_json(json).map_err(js_err)?;
        self.state.queue_tuning(tuning);
        Ok(())
    }

    /// Begin a new run at host time `now` (ms)
    pub fn start(&mut self, now: f64) {
        self.state.start(WallClock(now));
        self.stepper.reset();
        self.input.clear();
        self.events.clear();
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.state.set_bounds(Bounds::new(width, height));
    }

    /// Forward a `KeyboardEvent.code`; returns true when the key is bound
    pub fn key(&mut self, code: &str, pressed: bool) -> bool {
        self.input.apply_key(code, pressed)
    }

    /// Let the game play itself (attract mode)
    pub fn set_autopilot(&mut self, enabled: bool) {
        self.autopilot = enabled;
    }

    /// Window lost focus: drop held keys and stale frame time
    pub fn blur(&mut self) {
        self.input.clear();
        self.stepper.reset();
        log::info!("Input cleared (window blur)");
    }

    /// Run the simulation for one animation frame; returns steps taken
    pub fn frame(&mut self, now: f64) -> u32 {
        let input = if self.autopilot {
            autopilot::drive(&self.state)
        } else {
            self.input
        };
        let steps = self.stepper.advance(&mut self.state, &input, WallClock(now));

        for event in self.state.drain_events() {
            if let GameEvent::GameOver { score, .. } = event {
                if !self.autopilot && self.best.record(score) {
                    self.best.save();
                }
            }
            self.events.push(event);
        }
        steps
    }

    pub fn is_playing(&self) -> bool {
        self.state.is_playing()
    }

    pub fn best_score(&self) -> f64 {
        self.best.value as f64
    }

    pub fn hud_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&HudSnapshot::capture(&self.state)).map_err(js_err)
    }

    pub fn render_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&RenderView::of(&self.state)).map_err(js_err)
    }

    /// Events since the last call (explosions, hits, tier changes, game over)
    pub fn take_events_json(&mut self) -> Result<String, JsValue> {
        let events = std::mem::take(&mut self.events);
        serde_json::to_string(&events).map_err(js_err)
    }
}
