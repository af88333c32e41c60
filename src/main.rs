use std::io;
use std::panic;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use grid_snake::app::GameController;
use grid_snake::config::{GameConfig, FRAME_INTERVAL, THEME};
use grid_snake::input::InputHandler;
use grid_snake::logging::init_file_logging;
use grid_snake::renderer;
use grid_snake::score::{FileScoreStore, MemoryScoreStore, ScoreStore};
use grid_snake::terminal_runtime::{cleanup_terminal_best_effort, TerminalSession};
use grid_snake::ui::hud::HudInfo;
use tracing::info;

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// JSON file with game settings; missing keys keep their defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Board side length in cells.
    #[arg(long = "grid-size")]
    grid_size: Option<u16>,

    /// Simulation speed in ticks per second.
    #[arg(long)]
    speed: Option<f64>,

    /// Seed for food placement, for reproducible games.
    #[arg(long)]
    seed: Option<u64>,

    /// Where the best score is kept.
    #[arg(long = "score-file", conflicts_with = "no_save")]
    score_file: Option<PathBuf>,

    /// Keep the best score in memory only.
    #[arg(long = "no-save")]
    no_save: bool,

    /// Append diagnostics to this file (filter with RUST_LOG).
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_file_logging(path)?;
    }

    let config =
        load_config(&cli).map_err(|error| io::Error::new(io::ErrorKind::InvalidInput, error))?;
    let store: Box<dyn ScoreStore> = if cli.no_save {
        Box::new(MemoryScoreStore::default())
    } else {
        Box::new(
            cli.score_file
                .clone()
                .map_or_else(FileScoreStore::at_default_location, FileScoreStore::new),
        )
    };

    let controller = GameController::new(config, store, cli.seed)
        .map_err(|error| io::Error::new(io::ErrorKind::InvalidInput, error))?;

    install_panic_hook();
    run(controller)
}

fn load_config(cli: &Cli) -> Result<GameConfig, grid_snake::error::ConfigError> {
    let mut config = match &cli.config {
        Some(path) => GameConfig::from_json_file(path)?,
        None => GameConfig::default(),
    };

    if let Some(grid_size) = cli.grid_size {
        config.grid_size = grid_size;
    }
    if let Some(speed) = cli.speed {
        config.ticks_per_second = speed;
    }

    config.validate()?;
    Ok(config)
}

fn run<S: ScoreStore>(mut controller: GameController<S>) -> io::Result<()> {
    let mut session = TerminalSession::enter()?;
    let mut input = InputHandler::new();
    let mut last_frame = Instant::now();
    info!("terminal session started");

    loop {
        let hud = HudInfo {
            ticks_per_second: controller.clock().ticks_per_second(),
            theme: &THEME,
        };
        session
            .terminal_mut()
            .draw(|frame| renderer::render(frame, &controller.snapshot(), &hud))?;

        // Wait for the first event of the frame, then drain whatever queued up.
        let mut timeout = FRAME_INTERVAL;
        let mut quit = false;
        while let Some(game_input) = input.poll_input(timeout)? {
            if !controller.handle_input(game_input) {
                quit = true;
                break;
            }
            timeout = Duration::ZERO;
        }
        if quit {
            break;
        }

        let now = Instant::now();
        controller.advance(now.duration_since(last_frame));
        last_frame = now;
    }

    info!(best = controller.snapshot().best_score, "quitting");
    Ok(())
}

fn install_panic_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        let _ = cleanup_terminal_best_effort();
        default_hook(panic_info);
    }));
}
