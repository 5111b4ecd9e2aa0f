//! Error types for twist-core

use std::fmt;

use thiserror::Error;

/// Why a cell selection was refused.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum MoveRejection {
    /// Index outside 0-8.
    OutOfRange,
    /// Target cell already holds a mark.
    Occupied,
    /// The game already ended.
    GameOver,
    /// Human input while the computer is to move.
    NotYourTurn,
}

impl fmt::Display for MoveRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            MoveRejection::OutOfRange => "position is out of bounds (must be 0-8)",
            MoveRejection::Occupied => "position is already occupied",
            MoveRejection::GameOver => "game already over",
            MoveRejection::NotYourTurn => "it is the computer's turn",
        };
        f.write_str(text)
    }
}

/// Main error type for the twist-core crate
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid move at {index}: {reason}")]
    InvalidMove { index: usize, reason: MoveRejection },

    #[error("nothing to undo")]
    NothingToUndo,

    #[error("invalid board '{input}': {reason}")]
    InvalidBoard { input: String, reason: String },

    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },
}

impl Error {
    pub(crate) fn invalid_move(index: usize, reason: MoveRejection) -> Self {
        Error::InvalidMove { index, reason }
    }

    /// Rejected commands leave the game untouched; the caller may ignore them.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::InvalidMove { .. } | Error::NothingToUndo)
    }

    /// The rejection reason for an invalid move.
    pub fn rejection(&self) -> Option<MoveRejection> {
        match self {
            Error::InvalidMove { reason, .. } => Some(*reason),
            _ => None,
        }
    }
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;
