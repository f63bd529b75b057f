//! Gridiron Blitz headless runner
//!
//! Plays one drive with the demo quarterback and logs what happens.
//! `GRIDIRON_SETTINGS` points at a settings JSON file, `GRIDIRON_SEED`
//! fixes the catch RNG.

use gridiron_blitz::cues::dispatch_cues;
use gridiron_blitz::sim::{GameEvent, GameState, GameStatus, TickInput, tick};
use gridiron_blitz::{AudioCue, CueSink, HapticCue, Settings};

/// Simulated frame length (60 fps)
const FRAME_DT: f32 = 1.0 / 60.0;
/// Give up after ten minutes of game time
const MAX_FRAMES: u32 = 60 * 600;

/// Presentation stand-in: cues go to the log
struct LogSink;

impl CueSink for LogSink {
    fn play(&mut self, cue: AudioCue) {
        log::debug!("audio: {}", cue.as_str());
    }

    fn haptic(&mut self, cue: HapticCue) {
        log::debug!("haptic: {}", cue.as_str());
    }
}

fn load_settings() -> Settings {
    let Ok(path) = std::env::var("GRIDIRON_SETTINGS") else {
        return Settings::default();
    };
    match Settings::load(&path) {
        Ok(settings) => settings,
        Err(e) => {
            log::warn!("Ignoring settings at {}: {}", path, e);
            Settings::default()
        }
    }
}

fn new_game() -> GameState {
    let seed = std::env::var("GRIDIRON_SEED")
        .ok()
        .and_then(|s| s.parse::<u64>().ok());
    match seed {
        Some(seed) => {
            log::info!("Game initialized with seed: {}", seed);
            GameState::new(seed)
        }
        None => GameState::from_entropy(),
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Gridiron Blitz starting...");

    let mut state = new_game().with_settings(load_settings());
    let mut sink = LogSink;
    let mut input = TickInput {
        start: true,
        idle_mode: true,
        ..Default::default()
    };

    for _ in 0..MAX_FRAMES {
        tick(&mut state, &input, FRAME_DT);
        input.start = false;

        let events = state.drain_events();
        dispatch_cues(&events, &mut sink);
        for event in &events {
            match event {
                GameEvent::Snap { .. } => {
                    log::info!(
                        "{} at {:.0}",
                        state.drive.down_and_distance(),
                        state.drive.line_of_scrimmage
                    );
                }
                GameEvent::Throw {
                    receiver, target, ..
                } => {
                    log::info!(
                        "Pass to receiver {} aimed at ({:.1}, {:.1})",
                        receiver,
                        target.x,
                        target.y
                    );
                }
                GameEvent::GameOver(summary) => log::info!("{}", summary.message()),
                _ => {}
            }
        }

        if state.drive.status == GameStatus::GameOver && !state.drive.cutscene.is_active() {
            break;
        }
    }

    match serde_json::to_string_pretty(&state.summary()) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to serialize drive summary: {}", e),
    }
}
