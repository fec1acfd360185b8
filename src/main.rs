//! Tilt Pong headless runner
//!
//! Plays a match without a window and prints the final state. Sides left
//! to human control stand still, so the default mode is CPU vs CPU.
//! Usage: `tilt-pong [settings.json] [seed] [demo|cpu|pvp]`

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use tilt_pong::sim::{Match, MaterialTable, RoundPhase, Side};
    use tilt_pong::{MatchMode, Settings};

    /// Host frame rate
    const FRAME_DT: f32 = 1.0 / 60.0;
    /// Simulated match length (seconds)
    const MATCH_SECONDS: f32 = 120.0;

    /// Runner holding the match and host-side bookkeeping
    struct Game {
        state: Match,
        last_phase: RoundPhase,
        last_scores: (u32, u32),
        events_seen: u32,
    }

    impl Game {
        fn new(settings: Settings, seed: u64) -> tilt_pong::Result<Self> {
            let state = Match::new(settings, MaterialTable::default(), seed)?;
            Ok(Self {
                last_phase: state.phase(),
                last_scores: (0, 0),
                state,
                events_seen: 0,
            })
        }

        /// Advance one host frame and report anything interesting
        fn update(&mut self) {
            let had_message = self.state.last_event_message().is_some();
            self.state.advance(FRAME_DT);

            if !had_message && self.state.last_event_message().is_some() {
                self.events_seen += 1;
            }

            let scores = (
                self.state.player(Side::Left).score,
                self.state.player(Side::Right).score,
            );
            if scores != self.last_scores {
                log::info!("Score {} - {}", scores.0, scores.1);
                self.last_scores = scores;
            }

            let phase = self.state.phase();
            if phase != self.last_phase {
                log::debug!("Phase {:?} -> {:?}", self.last_phase, phase);
                self.last_phase = phase;
            }
        }
    }

    fn load_settings(path: Option<&str>) -> tilt_pong::Result<Settings> {
        let Some(path) = path else {
            return Ok(Settings::with_mode(MatchMode::Demo));
        };
        match std::fs::read_to_string(path) {
            Ok(json) => Settings::from_json(&json),
            Err(e) => {
                log::warn!("Couldn't read {}: {} - using defaults", path, e);
                Ok(Settings::with_mode(MatchMode::Demo))
            }
        }
    }

    pub fn run() {
        env_logger::init();
        log::info!("Tilt Pong (headless) starting...");

        let args: Vec<String> = std::env::args().skip(1).collect();
        let mut settings = match load_settings(args.first().map(String::as_str)) {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("{}", e);
                std::process::exit(1);
            }
        };
        let seed = args
            .get(1)
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(0x5eed);

        // The runner has no input devices, so Demo unless asked otherwise
        settings.mode = match args.get(2) {
            Some(name) => MatchMode::from_str(name).unwrap_or_else(|| {
                log::warn!("Unknown mode {} - using Demo", name);
                MatchMode::Demo
            }),
            None => MatchMode::Demo,
        };

        let mut game = match Game::new(settings, seed) {
            Ok(game) => game,
            Err(e) => {
                log::error!("{}", e);
                std::process::exit(1);
            }
        };
        let frames = (MATCH_SECONDS / FRAME_DT) as u32;
        for _ in 0..frames {
            game.update();
        }

        log::info!(
            "Match over after {} ticks: {} - {} ({} events)",
            game.state.time_ticks,
            game.last_scores.0,
            game.last_scores.1,
            game.events_seen
        );

        match game.state.snapshot().to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => {
                log::error!("Failed to serialize snapshot: {}", e);
                std::process::exit(1);
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    native::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Headless runner is native only
}
