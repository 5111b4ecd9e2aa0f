//! Move choice for self-play.

use clap::ValueEnum;
use rand::Rng;
use twist_core::{choose_move, Pos, Position};

/// How a simulated player picks its cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Strategy {
    /// Win, else block, else a random empty cell (the in-game computer)
    Heuristic,
    /// Any empty cell, uniformly
    Random,
}

impl Strategy {
    /// Cell to play for the side to move, or `None` once the game is over.
    pub fn pick<R: Rng + ?Sized>(self, position: &Position, rng: &mut R) -> Option<Pos> {
        if position.is_terminal() {
            return None;
        }
        match self {
            Strategy::Heuristic => {
                let mark = position.turn();
                choose_move(position.board(), mark, mark.opponent(), rng)
            }
            Strategy::Random => {
                let moves = position.legal_moves();
                if moves.is_empty() {
                    None
                } else {
                    Some(moves[rng.random_range(0..moves.len())])
                }
            }
        }
    }
}
