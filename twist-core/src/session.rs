//! Session driver: human input, mode toggle and the computer's reply.
//!
//! The computer never moves inside the state machine. After a human move
//! that leaves the computer to play, the session marks a reply as
//! scheduled; the host (a JS timer, a loop, a test) later calls
//! [`Session::run_ai_turn`], which re-checks everything at execution time
//! and feeds the chosen cell back through [`Command::SelectCell`].

use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, instrument};

use crate::ai;
use crate::config::{GameConfig, Mode};
use crate::error::{Error, MoveRejection, Result};
use crate::game::{Command, GameState};
use crate::present::Effect;
use crate::Mark;

/// Seed used when the configuration leaves it open and the host offers none.
const FALLBACK_SEED: u64 = 0x7457_6973_7421;

/// One game plus everything needed to drive it.
#[derive(Clone, Debug)]
pub struct Session {
    game: GameState,
    config: GameConfig,
    rng: StdRng,
    ai_scheduled: bool,
}

impl Session {
    /// New game. The AI's RNG is seeded from `config.seed`.
    pub fn new(config: GameConfig) -> Session {
        let rng = StdRng::seed_from_u64(config.seed.unwrap_or(FALLBACK_SEED));
        Session::with_rng(config, rng)
    }

    /// New game with a caller-supplied RNG. If the computer plays X its
    /// opening move is scheduled right away.
    pub fn with_rng(config: GameConfig, rng: StdRng) -> Session {
        let mut session = Session {
            game: GameState::new(),
            config,
            rng,
            ai_scheduled: false,
        };
        session.schedule_ai();
        session
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn mode(&self) -> Mode {
        self.config.mode
    }

    /// Switch between two-player and computer play. Switching to the
    /// computer while it is the computer's turn schedules its reply;
    /// switching away cancels one.
    pub fn set_mode(&mut self, mode: Mode) {
        debug!(%mode, "mode changed");
        self.config.mode = mode;
        self.schedule_ai();
    }

    pub fn ai_delay(&self) -> Duration {
        self.config.ai_delay()
    }

    /// Whether the computer's reply is scheduled and still waiting.
    pub fn ai_pending(&self) -> bool {
        self.ai_scheduled
    }

    fn is_ai_turn(&self) -> bool {
        self.config.mode == Mode::VsComputer
            && !self.game.is_terminal()
            && self.game.turn() == self.config.ai_mark
    }

    /// Human selection of a cell.
    #[instrument(level = "debug", skip(self))]
    pub fn select_cell(&mut self, index: usize) -> Result<Vec<Effect>> {
        if self.is_ai_turn() {
            return Err(Error::InvalidMove {
                index,
                reason: MoveRejection::NotYourTurn,
            });
        }
        let effects = self.game.apply_command(Command::SelectCell(index))?;
        if self.is_ai_turn() {
            debug!("ai reply scheduled");
            self.ai_scheduled = true;
        }
        Ok(effects)
    }

    /// Play the scheduled computer reply. Returns `Ok(None)` when the reply
    /// no longer applies: nothing scheduled, game over, mode switched, or
    /// not the computer's turn.
    pub fn run_ai_turn(&mut self) -> Result<Option<Vec<Effect>>> {
        if !std::mem::take(&mut self.ai_scheduled) {
            return Ok(None);
        }
        if !self.is_ai_turn() {
            debug!("scheduled ai reply skipped");
            return Ok(None);
        }

        let ai_mark = self.config.ai_mark;
        let Some(pos) = ai::choose_move(self.game.board(), ai_mark, ai_mark.opponent(), &mut self.rng)
        else {
            return Ok(None);
        };
        debug!(%pos, mark = %ai_mark, "ai move");
        self.game.apply_command(Command::SelectCell(pos.index())).map(Some)
    }

    /// Arm the computer's reply if it is the computer's turn, e.g. after
    /// undoing only its last move.
    pub fn schedule_ai(&mut self) -> bool {
        self.ai_scheduled = self.is_ai_turn();
        self.ai_scheduled
    }

    /// Undo one move, human or computer, and cancel any scheduled reply.
    pub fn undo(&mut self) -> Result<Vec<Effect>> {
        let effects = self.game.apply_command(Command::Undo)?;
        self.ai_scheduled = false;
        Ok(effects)
    }

    /// Fresh game with the same configuration.
    pub fn reset(&mut self) -> Vec<Effect> {
        self.game.reset();
        self.schedule_ai();
        vec![self.game.render(), Effect::ClearHighlight]
    }

    /// Mark the person plays when facing the computer.
    pub fn human_mark(&self) -> Mark {
        self.config.human_mark()
    }
}
