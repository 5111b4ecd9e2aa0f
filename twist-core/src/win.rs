//! Win detection.
//!
//! Lines are scanned in a fixed priority order: rows top-to-bottom, columns
//! left-to-right, main diagonal, anti-diagonal. The FIFO rule can leave
//! more than one line complete at once; only the first in this order is
//! reported.

use serde::Serialize;

use crate::{Board, Mark, Pos};

/// The 8 winning lines: 3 rows, 3 columns, 2 diagonals.
pub const WIN_LINES: [[Pos; 3]; 8] = [
    [Pos(0), Pos(1), Pos(2)], // Row 0
    [Pos(3), Pos(4), Pos(5)], // Row 1
    [Pos(6), Pos(7), Pos(8)], // Row 2
    [Pos(0), Pos(3), Pos(6)], // Col 0
    [Pos(1), Pos(4), Pos(7)], // Col 1
    [Pos(2), Pos(5), Pos(8)], // Col 2
    [Pos(0), Pos(4), Pos(8)], // Main diagonal
    [Pos(2), Pos(4), Pos(6)], // Anti-diagonal
];

/// Bitmasks for winning lines, same order as `WIN_LINES`.
const WIN_MASKS: [u16; 8] = [
    0b000_000_111, // Row 0: cells 0,1,2
    0b000_111_000, // Row 1: cells 3,4,5
    0b111_000_000, // Row 2: cells 6,7,8
    0b001_001_001, // Col 0: cells 0,3,6
    0b010_010_010, // Col 1: cells 1,4,7
    0b100_100_100, // Col 2: cells 2,5,8
    0b100_010_001, // Main diagonal: cells 0,4,8
    0b001_010_100, // Anti-diagonal: cells 2,4,6
];

/// A completed line.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WinInfo {
    pub mark: Mark,
    /// Index into `WIN_LINES` (0-7).
    pub line_index: usize,
    pub cells: [Pos; 3],
}

/// Every completed line on the board, in priority order.
pub fn completed_lines(board: &Board) -> impl Iterator<Item = WinInfo> {
    let x_mask = board.mask(Mark::X);
    let o_mask = board.mask(Mark::O);

    WIN_MASKS
        .into_iter()
        .enumerate()
        .filter_map(move |(line_index, win_mask)| {
            let mark = if x_mask & win_mask == win_mask {
                Mark::X
            } else if o_mask & win_mask == win_mask {
                Mark::O
            } else {
                return None;
            };
            Some(WinInfo {
                mark,
                line_index,
                cells: WIN_LINES[line_index],
            })
        })
}

/// The first completed line, if any.
pub fn evaluate(board: &Board) -> Option<WinInfo> {
    completed_lines(board).next()
}

/// No completed line and no empty cell.
pub fn is_draw(board: &Board) -> bool {
    evaluate(board).is_none() && board.is_full()
}
