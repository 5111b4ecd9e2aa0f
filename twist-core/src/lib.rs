//! Tic-Tac-Twist game logic with a bit-packed board.
//!
//! Tic-Tac-Twist is tic-tac-toe with a FIFO piece limit: each player keeps
//! at most three marks on the board, and placing a fourth removes that
//! player's oldest mark before the win check runs.
//!
//! # Board Encoding (32-bit)
//!
//! ```text
//! Bits 0-17:  Board state (9 cells × 2 bits per cell)
//! Bits 18-31: Unused (zero)
//!
//! Each cell (2 bits): 0 = empty, 1 = X, 2 = O
//!
//! Cell indices (row-major order):
//!   (0,0)=0  (0,1)=1  (0,2)=2
//!   (1,0)=3  (1,1)=4  (1,2)=5
//!   (2,0)=6  (2,1)=7  (2,2)=8
//! ```
//!
//! # Position Key (64-bit)
//!
//! ```text
//! Bits 0-13:  X queue (bits 0-1 length, then 3 × 4-bit cells, oldest first)
//! Bits 14-27: O queue (same layout)
//! Bit 28:     Turn (0 = X, 1 = O)
//! Bits 29-63: Unused (zero)
//! ```
//!
//! The board is fully determined by the two queues, so the key identifies
//! a position (board, queues, turn and status) uniquely.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub mod ai;
pub mod config;
pub mod error;
pub mod fifo;
pub mod game;
pub mod history;
pub mod present;
pub mod session;
pub mod win;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use ai::choose_move;
pub use config::{GameConfig, Mode};
pub use error::{Error, MoveRejection, Result};
pub use fifo::{FifoTracker, PieceQueue, PIECE_LIMIT};
pub use game::{Command, GameState, GameStatus, MoveOutcome, Position};
pub use history::{History, Snapshot};
pub use present::{Effect, Presenter};
pub use session::Session;
pub use win::{evaluate, WinInfo, WIN_LINES};

/// Player identifier.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum Mark {
    X = 1,
    O = 2,
}

impl Mark {
    /// Get the opponent mark.
    #[inline]
    pub fn opponent(self) -> Mark {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    /// Convert from cell bits (1 or 2) to Mark.
    #[inline]
    pub fn from_bits(bits: u8) -> Option<Mark> {
        match bits {
            1 => Some(Mark::X),
            2 => Some(Mark::O),
            _ => None,
        }
    }

    /// Zero-based index (X = 0, O = 1) for per-player tables.
    #[inline]
    pub fn index(self) -> usize {
        self as usize - 1
    }

    /// Both marks, X first.
    pub fn all() -> impl Iterator<Item = Mark> {
        [Mark::X, Mark::O].into_iter()
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mark::X => f.write_str("X"),
            Mark::O => f.write_str("O"),
        }
    }
}

/// Position on the 3x3 board (0-8).
///
/// Layout:
/// ```text
///   0 1 2
///   3 4 5
///   6 7 8
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Pos(pub u8);

impl Pos {
    /// Image of each position under the 8 symmetries of the square.
    /// `TRANSFORMS[t][p]` is where position `p` lands under transform `t`.
    const TRANSFORMS: [[u8; 9]; 8] = [
        [0, 1, 2, 3, 4, 5, 6, 7, 8], // Identity
        [6, 3, 0, 7, 4, 1, 8, 5, 2], // Rotate 90°
        [8, 7, 6, 5, 4, 3, 2, 1, 0], // Rotate 180°
        [2, 5, 8, 1, 4, 7, 0, 3, 6], // Rotate 270°
        [2, 1, 0, 5, 4, 3, 8, 7, 6], // Reflect horizontal (flip left-right)
        [6, 7, 8, 3, 4, 5, 0, 1, 2], // Reflect vertical (flip top-bottom)
        [0, 3, 6, 1, 4, 7, 2, 5, 8], // Reflect main diagonal
        [8, 5, 2, 7, 4, 1, 6, 3, 0], // Reflect anti-diagonal
    ];

    /// Number of symmetry transforms.
    pub const SYMMETRIES: usize = 8;

    /// Create a position from a raw cell index, rejecting anything past 8.
    #[inline]
    pub fn new(index: usize) -> Option<Pos> {
        if index < 9 {
            Some(Pos(index as u8))
        } else {
            None
        }
    }

    /// Create a position from row and column (0-2 each).
    #[inline]
    pub fn from_row_col(row: u8, col: u8) -> Pos {
        debug_assert!(row < 3 && col < 3);
        Pos(row * 3 + col)
    }

    /// Get the row (0-2).
    #[inline]
    pub fn row(self) -> u8 {
        self.0 / 3
    }

    /// Get the column (0-2).
    #[inline]
    pub fn col(self) -> u8 {
        self.0 % 3
    }

    /// Cell index as usize.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Check if this is a valid position (0-8).
    #[inline]
    pub fn is_valid(self) -> bool {
        self.0 < 9
    }

    /// Map this position through symmetry transform `t` (0-7).
    #[inline]
    pub fn transform(self, t: usize) -> Pos {
        Pos(Self::TRANSFORMS[t][self.0 as usize])
    }

    /// Iterate over all 9 positions.
    pub fn all() -> impl Iterator<Item = Pos> {
        (0..9).map(Pos)
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Compact board state - fits in a single u32.
///
/// See module documentation for encoding details. The board only stores
/// marks; which mark is oldest lives in [`FifoTracker`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct Board(pub u32);

impl Board {
    /// Bits per cell.
    const CELL_BITS: u32 = 2;
    /// Mask for a single cell (0b11).
    const CELL_MASK: u32 = 0b11;

    /// Create a new empty board.
    #[inline]
    pub const fn new() -> Board {
        Board(0)
    }

    /// Get the raw u32 encoding.
    #[inline]
    pub fn to_u32(self) -> u32 {
        self.0
    }

    /// Get the 2 bits for a cell at the given position.
    #[inline]
    fn cell_bits(&self, pos: Pos) -> u32 {
        (self.0 >> (pos.0 as u32 * Self::CELL_BITS)) & Self::CELL_MASK
    }

    /// Get the mark at a position, if any.
    #[inline]
    pub fn get(&self, pos: Pos) -> Option<Mark> {
        Mark::from_bits(self.cell_bits(pos) as u8)
    }

    /// Put a mark on a cell, replacing whatever was there.
    /// Does NOT validate - caller must ensure the move is legal.
    #[inline]
    pub fn set(&mut self, pos: Pos, mark: Mark) {
        let shift = pos.0 as u32 * Self::CELL_BITS;
        self.0 = (self.0 & !(Self::CELL_MASK << shift)) | ((mark as u32) << shift);
    }

    /// Empty a cell.
    #[inline]
    pub fn clear(&mut self, pos: Pos) {
        let shift = pos.0 as u32 * Self::CELL_BITS;
        self.0 &= !(Self::CELL_MASK << shift);
    }

    /// Check if a cell is empty.
    #[inline]
    pub fn is_empty(&self, pos: Pos) -> bool {
        self.cell_bits(pos) == 0
    }

    /// Number of occupied cells.
    pub fn occupied(&self) -> usize {
        Pos::all().filter(|&pos| !self.is_empty(pos)).count()
    }

    /// True when all 9 cells hold a mark.
    pub fn is_full(&self) -> bool {
        self.occupied() == 9
    }

    /// Empty cells in index order.
    pub fn empty_cells(&self) -> Vec<Pos> {
        Pos::all().filter(|&pos| self.is_empty(pos)).collect()
    }

    /// Bitmask with bit `i` set when `mark` occupies cell `i`.
    #[inline]
    pub fn mask(&self, mark: Mark) -> u16 {
        let mut mask = 0u16;
        for pos in 0..9u8 {
            if self.cell_bits(Pos(pos)) == mark as u32 {
                mask |= 1 << pos;
            }
        }
        mask
    }

    /// The board as a plain array, for presentation.
    pub fn cells(&self) -> [Option<Mark>; 9] {
        let mut cells = [None; 9];
        for pos in Pos::all() {
            cells[pos.index()] = self.get(pos);
        }
        cells
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..3 {
            if row > 0 {
                writeln!(f)?;
            }
            for col in 0..3 {
                let ch = match self.get(Pos::from_row_col(row, col)) {
                    Some(Mark::X) => 'X',
                    Some(Mark::O) => 'O',
                    None => '.',
                };
                write!(f, "{ch}")?;
            }
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = Error;

    /// Parse 9 cells in row-major order. `X`/`O` are marks, `.`, `-`, `_`
    /// and spaces are empty; `/` and newlines separate rows and are skipped.
    fn from_str(s: &str) -> Result<Board> {
        let mut board = Board::new();
        let mut count = 0usize;
        for ch in s.chars().filter(|c| *c != '/' && *c != '\n') {
            let cell = match ch {
                'X' | 'x' => Some(Mark::X),
                'O' | 'o' => Some(Mark::O),
                '.' | '-' | '_' | ' ' => None,
                other => {
                    return Err(Error::InvalidBoard {
                        input: s.to_string(),
                        reason: format!("unexpected character '{other}'"),
                    })
                }
            };
            if count >= 9 {
                return Err(Error::InvalidBoard {
                    input: s.to_string(),
                    reason: "more than 9 cells".to_string(),
                });
            }
            if let Some(mark) = cell {
                board.set(Pos(count as u8), mark);
            }
            count += 1;
        }
        if count != 9 {
            return Err(Error::InvalidBoard {
                input: s.to_string(),
                reason: format!("expected 9 cells, got {count}"),
            });
        }
        Ok(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mark_opponent() {
        assert_eq!(Mark::X.opponent(), Mark::O);
        assert_eq!(Mark::O.opponent(), Mark::X);
    }

    #[test]
    fn test_mark_from_bits() {
        assert_eq!(Mark::from_bits(0), None);
        assert_eq!(Mark::from_bits(1), Some(Mark::X));
        assert_eq!(Mark::from_bits(2), Some(Mark::O));
        assert_eq!(Mark::from_bits(3), None);
    }

    #[test]
    fn test_pos_new_rejects_out_of_range() {
        assert_eq!(Pos::new(0), Some(Pos(0)));
        assert_eq!(Pos::new(8), Some(Pos(8)));
        assert_eq!(Pos::new(9), None);
        assert_eq!(Pos::new(usize::MAX), None);
    }

    #[test]
    fn test_pos_row_col() {
        for i in 0..9 {
            let pos = Pos(i);
            assert_eq!(Pos::from_row_col(pos.row(), pos.col()), pos);
        }
    }

    #[test]
    fn test_transforms_are_permutations() {
        for t in 0..Pos::SYMMETRIES {
            let mut seen = [false; 9];
            for pos in Pos::all() {
                seen[pos.transform(t).index()] = true;
            }
            assert!(seen.iter().all(|&s| s), "transform {t} is not a permutation");
        }
    }

    #[test]
    fn test_center_invariant() {
        for t in 0..Pos::SYMMETRIES {
            assert_eq!(Pos(4).transform(t), Pos(4));
        }
    }

    #[test]
    fn test_board_empty() {
        let board = Board::new();
        assert_eq!(board.0, 0);
        for pos in Pos::all() {
            assert!(board.is_empty(pos));
            assert_eq!(board.get(pos), None);
        }
        assert_eq!(board.occupied(), 0);
        assert_eq!(board.empty_cells().len(), 9);
    }

    #[test]
    fn test_board_set_clear() {
        let mut board = Board::new();
        board.set(Pos(4), Mark::X);
        board.set(Pos(8), Mark::O);
        assert_eq!(board.get(Pos(4)), Some(Mark::X));
        assert_eq!(board.get(Pos(8)), Some(Mark::O));
        assert_eq!(board.occupied(), 2);

        board.clear(Pos(4));
        assert!(board.is_empty(Pos(4)));
        assert_eq!(board.get(Pos(8)), Some(Mark::O));
    }

    #[test]
    fn test_board_set_overwrites() {
        let mut board = Board::new();
        board.set(Pos(0), Mark::X);
        board.set(Pos(0), Mark::O);
        assert_eq!(board.get(Pos(0)), Some(Mark::O));
        assert_eq!(board.0, 0b10);
    }

    #[test]
    fn test_board_masks() {
        let board: Board = "XO./.X./O..".parse().unwrap();
        assert_eq!(board.mask(Mark::X), 0b000_010_001);
        assert_eq!(board.mask(Mark::O), 0b001_000_010);
    }

    #[test]
    fn test_board_parse_display_roundtrip() {
        let board: Board = "XO./.X./O..".parse().unwrap();
        assert_eq!(board.to_string(), "XO.\n.X.\nO..");
        let again: Board = board.to_string().parse().unwrap();
        assert_eq!(again, board);
    }

    #[test]
    fn test_board_parse_errors() {
        assert!(matches!("XO".parse::<Board>(), Err(Error::InvalidBoard { .. })));
        assert!(matches!("XOZ......".parse::<Board>(), Err(Error::InvalidBoard { .. })));
        assert!(matches!("..........".parse::<Board>(), Err(Error::InvalidBoard { .. })));
    }

    #[test]
    fn test_board_cells_array() {
        let board: Board = "X...O...X".parse().unwrap();
        let cells = board.cells();
        assert_eq!(cells[0], Some(Mark::X));
        assert_eq!(cells[4], Some(Mark::O));
        assert_eq!(cells[8], Some(Mark::X));
        assert_eq!(cells.iter().filter(|c| c.is_none()).count(), 6);
    }
}
