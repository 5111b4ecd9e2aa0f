//! Heuristic computer opponent.
//!
//! One tier only: take a win, else block the opponent's win, else pick a
//! random empty cell. Lines are scanned in `WIN_LINES` order, which decides
//! ties between several winning or blocking cells.

use rand::Rng;
use tracing::debug;

use crate::win::WIN_LINES;
use crate::{Board, Mark, Pos};

/// The empty cell of the first line holding exactly two of `mark` and one
/// empty cell.
pub fn find_line_completion(board: &Board, mark: Mark) -> Option<Pos> {
    WIN_LINES.iter().find_map(|line| {
        let owned = line.iter().filter(|&&pos| board.get(pos) == Some(mark)).count();
        let empty = line.iter().copied().find(|&pos| board.is_empty(pos));
        match (owned, empty) {
            (2, Some(pos)) => Some(pos),
            _ => None,
        }
    })
}

/// Pick a move for `self_mark`: win, block, or a uniformly random empty cell.
/// Returns `None` only when the board has no empty cell.
pub fn choose_move<R: Rng + ?Sized>(
    board: &Board,
    self_mark: Mark,
    opponent: Mark,
    rng: &mut R,
) -> Option<Pos> {
    if let Some(pos) = find_line_completion(board, self_mark) {
        debug!(%pos, "ai takes win");
        return Some(pos);
    }
    if let Some(pos) = find_line_completion(board, opponent) {
        debug!(%pos, "ai blocks");
        return Some(pos);
    }

    let empties = board.empty_cells();
    if empties.is_empty() {
        return None;
    }
    let pos = empties[rng.random_range(0..empties.len())];
    debug!(%pos, "ai random move");
    Some(pos)
}
