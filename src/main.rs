//! Corners entry point
//!
//! Native builds run a headless session at the fixed timestep and log every
//! event. The browser build drives the session through `corners::web`.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use corners::consts::*;
    use corners::sim::{GameEvent, Layout, Session, TickInput, tick};
    use corners::{ConfigError, Settings};

    /// Headless game holding the session and the frame accumulator
    struct Game {
        session: Session,
        accumulator: f32,
        input: TickInput,
    }

    impl Game {
        fn new(settings: Settings) -> Result<Self, ConfigError> {
            Ok(Self {
                session: Session::new(settings, Layout::standard())?,
                accumulator: 0.0,
                input: TickInput {
                    start: true,
                    ..Default::default()
                },
            })
        }

        /// Run simulation ticks for one frame
        fn update(&mut self, dt: f32) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let input = self.input.clone();
                tick(&mut self.session, &input, SIM_DT);
                self.accumulator -= SIM_DT;
                substeps += 1;

                // Clear one-shot inputs after processing
                self.input.start = false;
                self.input.force_roll = None;
            }

            for event in self.session.drain_events() {
                match event {
                    GameEvent::DieFlicker { .. } => log::trace!("{:?}", event),
                    _ => log::info!("{:?}", event),
                }
            }
        }
    }

    pub fn run() -> Result<(), ConfigError> {
        let settings = match std::env::args().nth(1) {
            Some(path) => Settings::load_from_path(std::path::Path::new(&path))?,
            None => {
                log::info!("Using default settings");
                Settings::default()
            }
        };

        let mut game = Game::new(settings)?;
        // Humans stand still in the start zone; the computer actors play
        let frame = 1.0 / 60.0;
        let mut frames = 0u64;
        while game.session.state().game_over().is_none() {
            game.update(frame);
            frames += 1;
        }

        let state = game.session.state();
        log::info!(
            "Finished after {} rounds ({:.1}s simulated, {} frames): {:?}",
            state.round_number(),
            state.time_secs(),
            frames,
            game.session.outcome()
        );
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Corners (headless) starting...");
    if let Err(e) = headless::run() {
        log::error!("{}", e);
        let mut source = std::error::Error::source(&e);
        while let Some(cause) = source {
            log::error!("  caused by: {}", cause);
            source = cause.source();
        }
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is corners::web::wasm_main, this is just to satisfy the compiler
}
