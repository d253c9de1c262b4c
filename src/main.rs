//! Paddle Duel headless runner
//!
//! Plays a seeded AI-vs-AI match at the fixed tick rate without a display and
//! prints the final snapshot as JSON.
//!
//! Usage: `paddle-duel [seed] [config.json]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use paddle_duel::SimConfig;
    use paddle_duel::sim::{Court, GameEvent, MatchState, TickInput, tick};

    /// Give up on matches that somehow never end (one hour of play)
    const MAX_TICKS: u64 = 60 * 60 * 30;

    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(0xC0FFEE_u64);
    let config = match args.next() {
        Some(path) => load_config(&path),
        None => SimConfig::default(),
    };

    log::info!("Paddle Duel (headless) starting, seed {seed}");

    let mut state = MatchState::new(Court::new(320, 480), config, seed);
    let input = TickInput::default();
    let mut rallies = 0u32;

    while state.is_running() && state.time_ticks < MAX_TICKS {
        tick(&mut state, &input);
        for event in &state.events {
            match event {
                GameEvent::PaddleHit => rallies += 1,
                GameEvent::Miss | GameEvent::Win => {
                    log::info!(
                        "{:?} after {} ticks: red {} / blue {} lives",
                        event,
                        state.time_ticks,
                        state.red.lives(),
                        state.blue.lives()
                    );
                }
                GameEvent::WallHit => {}
            }
        }
    }

    log::info!(
        "Match finished after {} ticks ({:.1}s), {} paddle hits, winner {:?}",
        state.time_ticks,
        state.time_ticks as f32 / state.config.ticks_per_second as f32,
        rallies,
        state.winner()
    );

    match serde_json::to_string_pretty(&state.snapshot()) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to serialize snapshot: {e}"),
    }
}

/// Read a JSON config, falling back to defaults on any problem
#[cfg(not(target_arch = "wasm32"))]
fn load_config(path: &str) -> paddle_duel::SimConfig {
    use paddle_duel::SimConfig;

    let json = match std::fs::read_to_string(path) {
        Ok(json) => json,
        Err(e) => {
            log::warn!("Could not read {path}: {e}, using default config");
            return SimConfig::default();
        }
    };

    match SimConfig::from_json(&json) {
        Ok(config) => {
            log::info!("Loaded config from {path}");
            config
        }
        Err(e) => {
            log::warn!("Invalid config {path}: {e}, using default config");
            SimConfig::default()
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The core is embedded by a host page; there is nothing to run standalone
}
