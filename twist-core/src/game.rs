//! Game state machine.
//!
//! [`Position`] is the rules engine: board, FIFO queues, turn and status,
//! all `Copy`. [`GameState`] wraps a position with the status banner and the
//! undo history, and is the single owner of everything a running game needs.

use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::error::{Error, MoveRejection, Result};
use crate::history::{History, Snapshot};
use crate::present::Effect;
use crate::win::{self, WinInfo};
use crate::{Board, FifoTracker, Mark, Pos};

/// Where the game stands.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum GameStatus {
    InProgress,
    Won(WinInfo),
    Draw,
}

impl GameStatus {
    /// Won or drawn.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }
}

/// What a single accepted move did.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct MoveOutcome {
    pub pos: Pos,
    pub mark: Mark,
    /// The mover's oldest cell, cleared to respect the piece limit.
    pub evicted: Option<Pos>,
    pub status: GameStatus,
}

/// A playable position: board, FIFO queues, side to move and status.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Position {
    board: Board,
    fifo: FifoTracker,
    turn: Mark,
    status: GameStatus,
}

impl Position {
    /// Bit position for the turn in the position key.
    const TURN_BIT: u32 = 28;

    /// Empty board, X to move.
    pub const fn new() -> Position {
        Position {
            board: Board::new(),
            fifo: FifoTracker::new(),
            turn: Mark::X,
            status: GameStatus::InProgress,
        }
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn fifo(&self) -> &FifoTracker {
        &self.fifo
    }

    /// Side to move. After a win this still names the winner.
    #[inline]
    pub fn turn(&self) -> Mark {
        self.turn
    }

    #[inline]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Validate a raw cell index for the side to move.
    pub fn check(&self, index: usize) -> Result<Pos> {
        if self.is_terminal() {
            return Err(Error::invalid_move(index, MoveRejection::GameOver));
        }
        let pos = Pos::new(index)
            .ok_or_else(|| Error::invalid_move(index, MoveRejection::OutOfRange))?;
        if !self.board.is_empty(pos) {
            return Err(Error::invalid_move(index, MoveRejection::Occupied));
        }
        Ok(pos)
    }

    /// Place the side to move on `pos`, evict its oldest mark if over the
    /// limit, then evaluate the post-eviction board.
    /// Does NOT validate - use [`Position::apply_move`] for untrusted input.
    pub fn play(&mut self, pos: Pos) -> MoveOutcome {
        debug_assert!(!self.is_terminal() && self.board.is_empty(pos));
        let mark = self.turn;
        let evicted = self.fifo.place(&mut self.board, pos, mark);

        self.status = match win::evaluate(&self.board) {
            Some(win) => GameStatus::Won(win),
            None if self.board.is_full() => GameStatus::Draw,
            None => {
                self.turn = mark.opponent();
                GameStatus::InProgress
            }
        };

        MoveOutcome {
            pos,
            mark,
            evicted,
            status: self.status,
        }
    }

    /// Validate and play.
    pub fn apply_move(&mut self, index: usize) -> Result<MoveOutcome> {
        let pos = self.check(index)?;
        Ok(self.play(pos))
    }

    /// Empty cells, or nothing once the game is over.
    pub fn legal_moves(&self) -> Vec<Pos> {
        if self.is_terminal() {
            Vec::new()
        } else {
            self.board.empty_cells()
        }
    }

    /// Status banner for this position.
    pub fn banner(&self) -> String {
        match self.status {
            GameStatus::InProgress => format!("{}’s turn", self.turn),
            GameStatus::Won(win) => format!("{} wins! 🎉", win.mark),
            GameStatus::Draw => "Draw! 🤝".to_string(),
        }
    }

    /// Unique key: both queues in order plus the turn.
    /// See the crate documentation for the layout.
    pub fn key(&self) -> u64 {
        self.fifo.pack() | self.turn_bit()
    }

    /// Minimum key across the 8 symmetries of the board.
    pub fn canonical_key(&self) -> u64 {
        (0..Pos::SYMMETRIES)
            .map(|t| self.fifo.transform(t).pack() | self.turn_bit())
            .min()
            .unwrap_or_else(|| self.key())
    }

    #[inline]
    fn turn_bit(&self) -> u64 {
        ((self.turn == Mark::O) as u64) << Self::TURN_BIT
    }

    /// Board and queues agree, and the status matches the board.
    pub fn is_consistent(&self) -> bool {
        if !self.fifo.matches(&self.board) {
            return false;
        }
        match self.status {
            GameStatus::InProgress => {
                win::evaluate(&self.board).is_none() && !self.board.is_full()
            }
            GameStatus::Won(win) => {
                win::evaluate(&self.board) == Some(win) && win.mark == self.turn
            }
            GameStatus::Draw => win::is_draw(&self.board),
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new()
    }
}

/// Input actions.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Command {
    SelectCell(usize),
    Undo,
    Reset,
}

/// A running game: live position, banner and undo history.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct GameState {
    position: Position,
    message: String,
    history: History,
}

impl GameState {
    /// Fresh game, X to move.
    pub fn new() -> GameState {
        let position = Position::new();
        GameState {
            message: position.banner(),
            position,
            history: History::new(),
        }
    }

    #[inline]
    pub fn position(&self) -> &Position {
        &self.position
    }

    #[inline]
    pub fn board(&self) -> &Board {
        self.position.board()
    }

    #[inline]
    pub fn turn(&self) -> Mark {
        self.position.turn()
    }

    #[inline]
    pub fn status(&self) -> GameStatus {
        self.position.status()
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.position.is_terminal()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    /// Copy of the live state.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            position: self.position,
            message: self.message.clone(),
        }
    }

    /// Play the side to move on `index`. Rejected moves change nothing.
    #[instrument(level = "debug", skip(self), fields(turn = %self.position.turn()))]
    pub fn select_cell(&mut self, index: usize) -> Result<MoveOutcome> {
        let pos = self.position.check(index)?;
        self.history.push(self.snapshot());

        let outcome = self.position.play(pos);
        self.message = self.position.banner();

        if let Some(evicted) = outcome.evicted {
            debug!(mark = %outcome.mark, %evicted, "evicted oldest piece");
        }
        match outcome.status {
            GameStatus::Won(win) => {
                info!(mark = %win.mark, line = win.line_index, "game won");
            }
            GameStatus::Draw => info!("game drawn"),
            GameStatus::InProgress => {}
        }
        Ok(outcome)
    }

    /// Restore the state from before the last move.
    pub fn undo(&mut self) -> Result<()> {
        let snapshot = self.history.pop().ok_or(Error::NothingToUndo)?;
        self.position = snapshot.position;
        self.message = snapshot.message;
        debug!(remaining = self.history.len(), "undo");
        Ok(())
    }

    /// Back to the initial position with an empty history.
    pub fn reset(&mut self) {
        *self = GameState::new();
        debug!("reset");
    }

    /// Run a command and describe what the presenter should show.
    pub fn apply_command(&mut self, command: Command) -> Result<Vec<Effect>> {
        match command {
            Command::SelectCell(index) => {
                let outcome = self.select_cell(index)?;
                let mut effects = vec![self.render()];
                if let GameStatus::Won(win) = outcome.status {
                    effects.push(Effect::highlight(&win));
                    effects.push(Effect::Celebrate);
                }
                Ok(effects)
            }
            Command::Undo => {
                self.undo()?;
                Ok(vec![self.render(), Effect::ClearHighlight])
            }
            Command::Reset => {
                self.reset();
                Ok(vec![self.render(), Effect::ClearHighlight])
            }
        }
    }

    /// Full redraw of the current state.
    pub fn render(&self) -> Effect {
        Effect::Render {
            cells: self.position.board().cells(),
            message: self.message.clone(),
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
