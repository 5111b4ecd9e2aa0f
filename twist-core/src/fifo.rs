//! FIFO piece tracking.
//!
//! Each mark owns a queue of the cells it occupies, oldest first. A queue
//! never holds more than [`PIECE_LIMIT`] cells: pushing onto a full queue
//! evicts the oldest cell, and [`FifoTracker::place`] clears that cell on
//! the board in the same step.

use crate::{Board, Mark, Pos};

/// Maximum number of live marks per player.
pub const PIECE_LIMIT: usize = 3;

/// A fixed-size queue of occupied cells (no heap allocation).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct PieceQueue {
    cells: [Pos; PIECE_LIMIT],
    len: u8,
}

impl PieceQueue {
    /// Create an empty queue.
    #[inline]
    pub const fn new() -> PieceQueue {
        PieceQueue {
            cells: [Pos(0); PIECE_LIMIT],
            len: 0,
        }
    }

    /// Number of cells held.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len as usize
    }

    /// Check if empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Check if at the piece limit.
    #[inline]
    pub const fn is_full(&self) -> bool {
        self.len as usize == PIECE_LIMIT
    }

    /// The cell that will be evicted next, if any.
    #[inline]
    pub fn oldest(&self) -> Option<Pos> {
        self.as_slice().first().copied()
    }

    /// Cells oldest first.
    #[inline]
    pub fn as_slice(&self) -> &[Pos] {
        &self.cells[..self.len as usize]
    }

    /// Iterate over cells, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = Pos> + '_ {
        self.as_slice().iter().copied()
    }

    /// Check whether the queue holds a cell.
    pub fn contains(&self, pos: Pos) -> bool {
        self.as_slice().contains(&pos)
    }

    /// Append a cell. When the queue is already full the oldest cell is
    /// dropped and returned.
    pub fn push(&mut self, pos: Pos) -> Option<Pos> {
        let evicted = if self.is_full() {
            let oldest = self.cells[0];
            self.cells.copy_within(1.., 0);
            self.len -= 1;
            Some(oldest)
        } else {
            None
        };
        self.cells[self.len as usize] = pos;
        self.len += 1;
        evicted
    }

    /// Map every cell through symmetry transform `t`, keeping the order.
    pub fn transform(&self, t: usize) -> PieceQueue {
        let mut out = *self;
        for cell in &mut out.cells[..self.len as usize] {
            *cell = cell.transform(t);
        }
        out
    }

    /// Pack into 14 bits: length in bits 0-1, then one nibble per cell.
    pub(crate) fn pack(&self) -> u64 {
        let mut bits = self.len as u64;
        for (i, pos) in self.iter().enumerate() {
            bits |= (pos.0 as u64) << (2 + 4 * i);
        }
        bits
    }
}

impl Default for PieceQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-mark piece queues.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct FifoTracker {
    queues: [PieceQueue; 2],
}

impl FifoTracker {
    /// Both queues empty.
    pub const fn new() -> FifoTracker {
        FifoTracker {
            queues: [PieceQueue::new(), PieceQueue::new()],
        }
    }

    /// The queue belonging to `mark`.
    #[inline]
    pub fn queue(&self, mark: Mark) -> &PieceQueue {
        &self.queues[mark.index()]
    }

    /// Put `mark` on `pos` and enforce the piece limit, clearing the evicted
    /// cell on the board. Returns the evicted cell.
    /// Does NOT validate - caller must ensure the cell is empty.
    pub fn place(&mut self, board: &mut Board, pos: Pos, mark: Mark) -> Option<Pos> {
        board.set(pos, mark);
        let evicted = self.queues[mark.index()].push(pos);
        if let Some(old) = evicted {
            board.clear(old);
        }
        evicted
    }

    /// Rebuild the board these queues describe.
    pub fn to_board(&self) -> Board {
        let mut board = Board::new();
        for mark in Mark::all() {
            for pos in self.queue(mark).iter() {
                board.set(pos, mark);
            }
        }
        board
    }

    /// Map both queues through symmetry transform `t`.
    pub fn transform(&self, t: usize) -> FifoTracker {
        FifoTracker {
            queues: [self.queues[0].transform(t), self.queues[1].transform(t)],
        }
    }

    /// Check the tracker against a board: no cell claimed twice, and the
    /// board holds exactly the queued cells.
    pub fn matches(&self, board: &Board) -> bool {
        let mut seen = 0u16;
        for mark in Mark::all() {
            let queue = self.queue(mark);
            if queue.len() > PIECE_LIMIT {
                return false;
            }
            for pos in queue.iter() {
                if !pos.is_valid() || seen & (1 << pos.0) != 0 {
                    return false;
                }
                seen |= 1 << pos.0;
            }
        }
        self.to_board() == *board
    }

    /// Pack both queues into 28 bits (X in the low half).
    pub(crate) fn pack(&self) -> u64 {
        self.queues[0].pack() | (self.queues[1].pack() << 14)
    }
}
