//! Hoppy Bunny entry point
//!
//! Native builds run the game headless on autopilot: useful for soak-testing
//! the simulation and the high-score file. The browser build drives
//! `hoppy_bunny::Scene` from its own frame loop.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::PathBuf;

    use anyhow::{Context, Result};
    use clap::Parser;

    use hoppy_bunny::feedback::LogSink;
    use hoppy_bunny::layout::{SceneLayout, TemplateLibrary};
    use hoppy_bunny::persistence::{JsonFileStore, KeyValueStore, MemoryStore};
    use hoppy_bunny::sim::GamePhase;
    use hoppy_bunny::{Scene, Settings, Tuning, platform};

    #[derive(Parser, Debug)]
    #[command(name = "hoppy-bunny", about = "Run Hoppy Bunny headless on autopilot")]
    struct Args {
        /// RNG seed for obstacle heights
        #[arg(long, default_value_t = 1)]
        seed: u64,

        /// Number of runs to play
        #[arg(long, default_value_t = 3)]
        runs: u32,

        /// Tick limit per run
        #[arg(long, default_value_t = 60 * 60 * 5)]
        max_ticks: u32,

        /// Tuning JSON (defaults if omitted)
        #[arg(long)]
        tuning: Option<PathBuf>,

        /// Scene layout JSON (stock level if omitted)
        #[arg(long)]
        layout: Option<PathBuf>,

        /// Obstacle template library JSON (stock templates if omitted)
        #[arg(long)]
        templates: Option<PathBuf>,

        /// High score file (in-memory if omitted)
        #[arg(long)]
        store: Option<PathBuf>,
    }

    fn open_store(path: Option<PathBuf>) -> Box<dyn KeyValueStore> {
        let Some(path) = path else {
            return Box::new(MemoryStore::new());
        };
        match JsonFileStore::open(&path) {
            Ok(store) => Box::new(store),
            Err(e) => {
                log::warn!(
                    "Cannot open {}: {e}; high score will not persist",
                    path.display()
                );
                Box::new(MemoryStore::new())
            }
        }
    }

    pub fn run() -> Result<()> {
        platform::init_logging();
        let args = Args::parse();

        let tuning = match &args.tuning {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("reading {}", path.display()))?;
                Tuning::from_json(&json)?
            }
            None => Tuning::default(),
        };
        let layout = match &args.layout {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("reading {}", path.display()))?;
                SceneLayout::from_json(&json)?
            }
            None => SceneLayout::default(),
        };

        let library = match &args.templates {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("reading {}", path.display()))?;
                TemplateLibrary::from_json(&json)?
            }
            None => TemplateLibrary::default(),
        };

        let store = open_store(args.store);
        let mut scene = Scene::new(
            layout,
            &library,
            tuning,
            Settings::load(),
            store,
            args.seed,
        )
        .context("building scene")?;
        scene.set_autopilot(true);

        let mut sink = LogSink;
        for run in 1..=args.runs {
            let mut ticks = 0;
            while scene.phase() == GamePhase::Active && ticks < args.max_ticks {
                let frame_dt = scene.state().tuning.fixed_dt;
                ticks += scene.update(frame_dt);
                scene.dispatch_feedback(&mut sink);
            }

            log::info!(
                "Run {run}: {} point(s) in {ticks} ticks, best {}",
                scene.score(),
                scene.displayed_high_score()
            );

            if run < args.runs && !scene.select_restart() {
                // Tick limit reached while still alive
                scene.restart();
            }
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    headless::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Browser hosts construct `Scene` directly
    hoppy_bunny::platform::init_logging();
}
