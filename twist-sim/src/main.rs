//! Tic-Tac-Twist state-space explorer
//!
//! Walks every position reachable from the empty board and checks the rule
//! invariants along the way: nobody holds more than three marks, board and
//! queues agree, and no game can end in a draw. Exits non-zero when an
//! invariant fails.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{info, warn};
use twist_core::Position;
use twist_sim::{format_elapsed, init_tracing, Explorer};

/// Enumerate the Tic-Tac-Twist game graph
#[derive(Parser, Debug)]
#[command(name = "explore", version, about, long_about = None)]
struct Args {
    /// Cells to play before exploring, e.g. "4,0,8"
    #[arg(long, value_delimiter = ',')]
    from: Vec<usize>,
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let mut root = Position::new();
    for &cell in &args.from {
        root.apply_move(cell)
            .with_context(|| format!("opening move {cell}"))?;
    }
    info!(board = %root.board(), turn = %root.turn(), "exploring");

    // Set up SIGINT handler for graceful shutdown
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || r.store(false, Ordering::SeqCst))
        .context("setting Ctrl-C handler")?;

    let start = Instant::now();
    let report = Explorer::new().with_stop_flag(running).explore(root);

    println!("{report}");
    println!("Time: {}", format_elapsed(start.elapsed()));

    if report.interrupted {
        warn!("exploration was interrupted; counts are partial");
    }
    let violations = report.violations();
    if !violations.is_empty() {
        for violation in &violations {
            warn!("invariant violated: {violation}");
        }
        bail!("{} invariant(s) violated", violations.len());
    }
    info!("all invariants hold");
    Ok(())
}
