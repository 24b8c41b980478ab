use anyhow::{Context, Result};
use chess_core::engine::config::EngineConfig;
use chess_core::engine::search::MinimaxEngine;
use chess_core::engine::{Move, Searcher};
use chess_core::logic::game::{GameState, GameStatus};
use chess_core::logic::narrative::NarrativeCounters;
use clap::Parser;
use log::info;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

/// Lets the engine play both sides and prints a JSON summary of the game.
#[derive(Parser, Debug)]
#[command(name = "chess_ai", version)]
struct Args {
    /// Search depth in plies; overrides the config file.
    #[arg(short, long)]
    depth: Option<u8>,

    /// JSON engine config; missing fields keep their defaults.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Stop after this many plies if nobody has won.
    #[arg(long, default_value_t = 200)]
    max_moves: usize,
}

#[derive(Serialize)]
struct GameSummary {
    status: GameStatus,
    plies: usize,
    counters: NarrativeCounters,
    moves: Vec<Move>,
    final_position: String,
}

fn load_config(args: &Args) -> Result<EngineConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            EngineConfig::load_from_json(&json)
                .with_context(|| format!("parsing {}", path.display()))?
        }
        None => EngineConfig::default(),
    };
    if let Some(depth) = args.depth {
        config.depth = depth;
    }
    Ok(config)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut engine = MinimaxEngine::new(Arc::new(load_config(&args)?));
    info!(
        "engine depth {}, pruning {}",
        engine.config().depth,
        engine.config().alpha_beta
    );
    let mut game = GameState::new();

    while game.move_log().len() < args.max_moves {
        let side = game.whose_turn();
        let Some((mv, _)) = engine.search(&mut game, side) else {
            break;
        };
        game.try_move(mv.from, mv.to)
            .with_context(|| format!("engine chose {mv} for {side}"))?;
    }

    let status = game.checkmate_stalemate_checker();
    if !status.is_over() {
        info!("no result after {} plies", game.move_log().len());
        game.log_summary();
    }
    info!("knights moved {} times", game.get_number_of_moves_the_knights_made());

    let summary = GameSummary {
        status,
        plies: game.move_log().len(),
        counters: *game.narrative(),
        moves: game.move_log().iter().map(|record| record.mv).collect(),
        final_position: game.board().to_diagram(),
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
