//! Floating Dodge entry point
//!
//! The browser build is driven from JavaScript through `floating_dodge::web`.
//! Natively this runs a headless autopilot session, which is handy for
//! balancing tuning files and checking determinism for a seed.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use clap::Parser;
    use std::path::PathBuf;

    use floating_dodge::consts::{SIM_HZ, SIM_STEP_MS};
    use floating_dodge::sim::{
        Bounds, GameEvent, GameState, HudSnapshot, WallClock, autopilot, tick,
    };
    use floating_dodge::{BestScore, Tuning};

    /// Headless autopilot run of the simulation core
    #[derive(Parser, Debug)]
    #[command(name = "floating-dodge")]
    #[command(about = "Run a headless autopilot session and print the final HUD as JSON")]
    pub struct Cli {
        /// Run seed
        #[arg(long, default_value_t = 1)]
        pub seed: u64,
        /// Simulated seconds before the run is cut off
        #[arg(long, default_value_t = 120.0, value_parser = positive_seconds)]
        pub seconds: f64,
        /// JSON file with tuning overrides
        #[arg(long)]
        pub tuning: Option<PathBuf>,
        /// JSON file holding the best score; updated when beaten
        #[arg(long)]
        pub best: Option<PathBuf>,
    }

    fn positive_seconds(raw: &str) -> Result<f64, String> {
        let seconds: f64 = raw.parse().map_err(|e| format!("{e}"))?;
        if seconds > 0.0 && seconds.is_finite() {
            Ok(seconds)
        } else {
            Err(format!("{raw} is not a positive number of seconds"))
        }
    }

    pub fn run() -> i32 {
        let args = Cli::parse();

        let tuning = match &args.tuning {
            Some(path) => match Tuning::load(path) {
                Ok(tuning) => tuning,
                Err(e) => {
                    log::error!("{e}");
                    return 1;
                }
            },
            None => Tuning::default(),
        };

        log::info!("Floating Dodge (native) starting: seed {}, {} s", args.seed, args.seconds);

        let mut state = GameState::with_tuning(args.seed, tuning, Bounds::default());
        state.start(WallClock(0.0));

        let steps = (args.seconds * SIM_HZ as f64).ceil() as u64;
        for step in 1..=steps {
            let input = autopilot::drive(&state);
            tick(&mut state, &input, WallClock(step as f64 * SIM_STEP_MS));

            for event in state.drain_events() {
                match event {
                    GameEvent::PlayerHit { hearts } => log::debug!("Player hit, {hearts} hearts left"),
                    GameEvent::Healed { hearts } => log::debug!("Player healed to {hearts} hearts"),
                    _ => {}
                }
            }
            if !state.is_playing() {
                break;
            }
        }

        let hud = HudSnapshot::capture(&state);
        log::info!(
            "Run finished: score {}, {:.1} s, tier {}, {} kills, {} hearts",
            hud.score,
            hud.time_secs,
            hud.tier,
            state.kills,
            hud.hearts
        );
        match serde_json::to_string_pretty(&hud) {
            Ok(json) => println!("{json}"),
            Err(e) => log::warn!("Could not serialize summary: {e}"),
        }

        if let Some(path) = &args.best {
            let mut best = BestScore::load_from(path);
            if best.record(hud.score) {
                best.save_to(path);
            }
        }
        0
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    std::process::exit(native::run());
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is web::wasm_main, this is just to satisfy the compiler
}
