//! # Delve Main Entry Point
//!
//! Parses the command line, sets up logging, and runs the macroquad game loop.

use clap::Parser;
use delve::{
    render_rows, DelveError, DelveResult, EntityKind, GameConfig, GameState, InputHandler,
    MacroquadDisplay, PlayerInput, GAME_FIELD_HEIGHT, GAME_FIELD_WIDTH, TARGET_FRAME_MS,
};
use log::{info, log_enabled, trace};
use macroquad::prelude::*;
use std::path::PathBuf;
use std::time::Instant;
#[cfg(feature = "dev-tools")]
use tracing::Level;

/// Command line arguments for Delve.
#[derive(Parser, Debug)]
#[command(name = "delve")]
#[command(about = "A grid-based dungeon crawler with pursuing hostiles")]
#[command(version)]
struct Args {
    /// Random seed for level generation (random if omitted)
    #[arg(short, long)]
    seed: Option<u64>,

    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Hostile ticks between pursuit target reevaluations
    #[arg(long)]
    reeval_interval: Option<u32>,

    /// Milliseconds between hostile updates
    #[arg(long)]
    hostile_interval_ms: Option<u64>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn window_conf() -> Conf {
    let tile_size = MacroquadDisplay::new().tile_size;
    Conf {
        window_title: "Delve".to_string(),
        window_width: ((GAME_FIELD_WIDTH + 4) as f32 * tile_size) as i32,
        window_height: (GAME_FIELD_HEIGHT as f32 * tile_size + 140.0) as i32,
        window_resizable: false,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() -> DelveResult<()> {
    let args = Args::parse();

    // Initialize logging
    initialize_logging(&args.log_level)?;

    info!("Starting Delve v{}", delve::VERSION);

    let config = build_config(&args)?;
    run_game(config).await
}

/// Initializes the logging system based on the specified log level.
fn initialize_logging(log_level: &str) -> DelveResult<()> {
    #[cfg(feature = "dev-tools")]
    {
        let level = match log_level.to_lowercase().as_str() {
            "error" => Level::ERROR,
            "warn" => Level::WARN,
            "info" => Level::INFO,
            "debug" => Level::DEBUG,
            "trace" => Level::TRACE,
            _ => Level::INFO,
        };

        tracing_subscriber::fmt()
            .with_max_level(level)
            .with_target(false)
            .init();
    }

    #[cfg(not(feature = "dev-tools"))]
    {
        let level: log::LevelFilter = log_level
            .parse()
            .map_err(|_| DelveError::InvalidConfig(format!("unknown log level '{log_level}'")))?;

        env_logger::Builder::new()
            .filter_level(level)
            .parse_default_env()
            .try_init()
            .map_err(|e| DelveError::InvalidState(e.to_string()))?;
    }

    Ok(())
}

/// Merges the config file, if any, with command line overrides.
fn build_config(args: &Args) -> DelveResult<GameConfig> {
    let mut config = match &args.config {
        Some(path) => GameConfig::load_from_file(path)?,
        None => GameConfig::new(::rand::random()),
    };

    if let Some(seed) = args.seed {
        config.generation.seed = seed;
    }
    if let Some(interval) = args.reeval_interval {
        config.simulation.reeval_interval = interval;
    }
    if let Some(ms) = args.hostile_interval_ms {
        config.simulation.hostile_update_interval_ms = ms;
    }

    config.validate()?;
    info!("Using seed {}", config.generation.seed);
    Ok(config)
}

/// Main game loop: input, hostile tick when due, draw.
async fn run_game(config: GameConfig) -> DelveResult<()> {
    let mut game_state = GameState::new(config)?;
    let input_handler = InputHandler::new();
    let mut display = MacroquadDisplay::new();

    display.add_message(format!("Wave {} begins", game_state.wave));

    loop {
        let mut encounters: Vec<EntityKind> = Vec::new();

        match input_handler.get_input() {
            Some(PlayerInput::Quit) => {
                info!("Player quit the game");
                break;
            }
            Some(PlayerInput::Regenerate) => {
                game_state.start_wave();
                display.add_message(format!("Wave {} begins", game_state.wave));
            }
            Some(PlayerInput::Move(direction)) => {
                game_state.move_player(direction, &mut |kind: EntityKind| encounters.push(kind));
            }
            None => {}
        }

        if let Some(report) =
            game_state.update_if_due(Instant::now(), &mut |kind: EntityKind| encounters.push(kind))
        {
            if log_enabled!(log::Level::Trace) && !report.is_empty() {
                let rows = report.changed_rows();
                let lines =
                    render_rows(&game_state.grid, &game_state.registry, rows.iter().copied());
                for (y, line) in rows.iter().zip(lines) {
                    trace!("{y:>2} |{line}|");
                }
            }
        }

        for kind in encounters {
            display.add_message(kind.name().to_string());
        }

        display.render_game(&game_state);

        let frame_ms = get_frame_time() * 1000.0;
        if frame_ms > TARGET_FRAME_MS as f32 {
            trace!("Slow frame: {frame_ms:.1} ms");
        }
        next_frame().await;
    }

    info!("Game loop ended");
    Ok(())
}
