//! Batched self-play between two move strategies.
//!
//! ```bash
//! selfplay --games 10000 --x heuristic --o random --seed 7
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};
use twist_core::{Mark, Position};
use twist_sim::{init_tracing, GameRecord, GameStats, Strategy};

#[derive(Parser, Debug)]
#[command(name = "selfplay", version, about = "Play Tic-Tac-Twist against itself")]
struct Args {
    /// Number of games to play
    #[arg(short, long, default_value_t = 1000)]
    games: u64,

    /// Strategy for X
    #[arg(long, value_enum, default_value_t = Strategy::Heuristic)]
    x: Strategy,

    /// Strategy for O
    #[arg(long, value_enum, default_value_t = Strategy::Heuristic)]
    o: Strategy,

    /// Give up on a game after this many plies
    #[arg(long, default_value_t = 200)]
    max_plies: u32,

    /// RNG seed (the run is reproducible for a fixed seed)
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Seconds between progress lines
    #[arg(long, default_value_t = 5)]
    log_interval: u64,
}

fn play_game(args: &Args, rng: &mut StdRng) -> Result<GameRecord> {
    let mut position = Position::new();
    let mut record = GameRecord::new();

    while record.plies < args.max_plies {
        let strategy = match position.turn() {
            Mark::X => args.x,
            Mark::O => args.o,
        };
        let Some(pos) = strategy.pick(&position, rng) else {
            break;
        };
        let outcome = position
            .apply_move(pos.index())
            .with_context(|| format!("{strategy:?} picked cell {pos}"))?;
        record.record_move(&outcome);
    }
    Ok(record)
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();
    info!(games = args.games, x = ?args.x, o = ?args.o, seed = args.seed, "starting self-play");

    // Set up SIGINT handler for graceful shutdown
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || r.store(false, Ordering::SeqCst))
        .context("setting Ctrl-C handler")?;

    let mut rng = StdRng::seed_from_u64(args.seed);
    let mut stats = GameStats::new();

    for game in 0..args.games {
        if !running.load(Ordering::SeqCst) {
            info!(played = game, "interrupted");
            break;
        }
        let record = play_game(&args, &mut rng)?;
        debug!(game, plies = record.plies, status = ?record.status, "game over");
        stats.record(&record);

        if stats.should_log(args.log_interval) {
            stats.log_progress();
        }
    }

    println!("{stats}");
    Ok(())
}
