//! Asteroid Run entry point
//!
//! On wasm32 the library's `WebGame` is the entry point. Natively this is a
//! headless runner: the autopilot flies one or more sessions and the
//! results are logged (or printed as JSON).

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::PathBuf;

    use anyhow::{Context, Result};
    use clap::Parser;
    use serde::Serialize;

    use asteroid_run::persistence::{FileStore, MemoryStore, ScoreStore};
    use asteroid_run::sim::{SessionStats, TickInput};
    use asteroid_run::{Session, Tuning, platform};

    /// Frame length the runner feeds the session
    const FRAME_DT: f32 = 1.0 / 60.0;

    #[derive(Parser, Debug)]
    #[command(name = "asteroid-run")]
    #[command(about = "Fly autopilot sessions through the asteroid field headlessly")]
    struct Cli {
        /// Seed of the first run (later runs use seed + n); defaults to the clock
        #[arg(long)]
        seed: Option<u64>,
        /// Number of sessions to fly
        #[arg(long, default_value_t = 1)]
        runs: u32,
        /// Stop a run that is still alive after this many simulated seconds
        #[arg(long, default_value_t = 300.0)]
        max_seconds: f32,
        /// JSON tuning file (partial files fill in defaults)
        #[arg(long)]
        tuning: Option<PathBuf>,
        /// Best-score file (defaults to the platform data directory)
        #[arg(long)]
        store: Option<PathBuf>,
        /// Keep the best score in memory only
        #[arg(long)]
        no_save: bool,
        /// Print one JSON summary line per run
        #[arg(long)]
        json: bool,
    }

    #[derive(Debug, Serialize)]
    struct RunSummary {
        seed: u64,
        distance: u32,
        seconds: f32,
        destroyed: bool,
        new_best: bool,
        best: u32,
        stats: SessionStats,
    }

    pub fn run() -> Result<()> {
        platform::init_logging();
        let cli = Cli::parse();

        let tuning = match &cli.tuning {
            Some(path) => Tuning::load(path)
                .with_context(|| format!("loading tuning from {}", path.display()))?,
            None => Tuning::default(),
        };

        let store: Box<dyn ScoreStore> = if cli.no_save {
            Box::new(MemoryStore::new())
        } else if let Some(path) = &cli.store {
            Box::new(FileStore::new(path))
        } else {
            platform::default_store()
        };

        let mut session = Session::new(tuning, store);
        let first_seed = cli.seed.unwrap_or_else(platform::clock_seed);
        let input = TickInput {
            idle_mode: true,
            ..Default::default()
        };

        for n in 0..cli.runs {
            let seed = first_seed.wrapping_add(u64::from(n));
            session.start(seed);

            let mut seconds = 0.0;
            while !session.is_game_over() && seconds < cli.max_seconds {
                session.update(FRAME_DT, &input);
                seconds += FRAME_DT;
            }

            let summary = summarize(&session, seed)?;
            if cli.json {
                println!("{}", serde_json::to_string(&summary)?);
            } else {
                log::info!(
                    "Run {}/{}: seed {seed} distance {}{} ({:.1}s, {} hits, {} grazes)",
                    n + 1,
                    cli.runs,
                    summary.distance,
                    if summary.new_best { " (BEST)" } else { "" },
                    summary.seconds,
                    summary.stats.hits,
                    summary.stats.grazes,
                );
            }
        }

        log::info!("Best flight distance: {}", session.best().best_distance);
        Ok(())
    }

    fn summarize(session: &Session, seed: u64) -> Result<RunSummary> {
        let state = session.game().context("session has no running game")?;
        Ok(RunSummary {
            seed,
            distance: state.score(),
            seconds: state.elapsed,
            destroyed: state.is_game_over(),
            new_best: session.results.new_best,
            best: session.best().best_distance,
            stats: state.stats.clone(),
        })
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    headless::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is `asteroid_run::web::wasm_main`
}
