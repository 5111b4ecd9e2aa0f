//! WASM bindings for twist-core
//!
//! Provides a JavaScript-friendly API for the game. Every state-changing
//! call returns the list of effects for the page to draw, for example:
//!
//! ```js
//! const game = new WasmGame({ mode: "vsComputer" });
//! draw(game.selectCell(4));
//! if (game.aiPending()) setTimeout(() => draw(game.runAiTurn()), game.aiDelayMs());
//! ```

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::{Effect, Error, GameConfig, Mode, Session};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = Math)]
    fn random() -> f64;
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsError> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsError::new(&e.to_string()))
}

fn effects_to_js(effects: Result<Vec<Effect>, Error>) -> Result<JsValue, JsError> {
    let effects = effects.map_err(|e| JsError::new(&e.to_string()))?;
    to_js(&effects)
}

/// WASM-friendly wrapper around a game session
#[wasm_bindgen]
pub struct WasmGame {
    inner: Session,
}

#[wasm_bindgen]
impl WasmGame {
    /// Create a game from an optional config object
    /// (`{ mode, aiMark, aiDelayMs, seed }`, every key optional).
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<WasmGame, JsError> {
        let mut config: GameConfig = if config.is_undefined() || config.is_null() {
            GameConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config).map_err(|e| {
                JsError::new(
                    &Error::InvalidConfig {
                        message: e.to_string(),
                    }
                    .to_string(),
                )
            })?
        };
        if config.seed.is_none() {
            config.seed = Some((random() * u32::MAX as f64) as u64);
        }
        Ok(WasmGame {
            inner: Session::new(config),
        })
    }

    /// Human click on a cell (0-8). Throws on an invalid move.
    #[wasm_bindgen(js_name = selectCell)]
    pub fn select_cell(&mut self, index: usize) -> Result<JsValue, JsError> {
        effects_to_js(self.inner.select_cell(index))
    }

    /// Undo one move. Throws when there is nothing to undo.
    pub fn undo(&mut self) -> Result<JsValue, JsError> {
        effects_to_js(self.inner.undo())
    }

    /// Start over with the same settings
    pub fn reset(&mut self) -> Result<JsValue, JsError> {
        to_js(&self.inner.reset())
    }

    /// Whether the computer's reply is waiting to be run
    #[wasm_bindgen(js_name = aiPending)]
    pub fn ai_pending(&self) -> bool {
        self.inner.ai_pending()
    }

    /// Run the scheduled computer reply. Returns `null` when it was skipped.
    #[wasm_bindgen(js_name = runAiTurn)]
    pub fn run_ai_turn(&mut self) -> Result<JsValue, JsError> {
        match self.inner.run_ai_turn() {
            Ok(Some(effects)) => to_js(&effects),
            Ok(None) => Ok(JsValue::NULL),
            Err(e) => Err(JsError::new(&e.to_string())),
        }
    }

    /// Re-arm the computer's reply (e.g. after undoing only its move)
    #[wasm_bindgen(js_name = scheduleAi)]
    pub fn schedule_ai(&mut self) -> bool {
        self.inner.schedule_ai()
    }

    /// Switch mode: "twoPlayer" or "vsComputer" ("ai" also accepted)
    #[wasm_bindgen(js_name = setMode)]
    pub fn set_mode(&mut self, mode: &str) -> Result<(), JsError> {
        let mode: Mode = mode.parse().map_err(|e: Error| JsError::new(&e.to_string()))?;
        self.inner.set_mode(mode);
        Ok(())
    }

    /// Pause the page should wait before `runAiTurn`
    #[wasm_bindgen(js_name = aiDelayMs)]
    pub fn ai_delay_ms(&self) -> u32 {
        self.inner.ai_delay().as_millis().min(u32::MAX as u128) as u32
    }

    /// Cells as 9 numbers: 0 (empty), 1 (X), 2 (O)
    pub fn cells(&self) -> Vec<u8> {
        self.inner
            .game()
            .board()
            .cells()
            .iter()
            .map(|cell| cell.map_or(0, |mark| mark as u8))
            .collect()
    }

    /// Current status banner
    pub fn message(&self) -> String {
        self.inner.game().message().to_string()
    }

    /// Current status: `{ kind: "inProgress" | "won" | "draw", ... }`
    pub fn status(&self) -> Result<JsValue, JsError> {
        to_js(&self.inner.game().status())
    }

    /// Side to move (1 = X, 2 = O)
    pub fn turn(&self) -> u8 {
        self.inner.game().turn() as u8
    }

    /// Cell each player will lose on their next placement, or -1
    #[wasm_bindgen(js_name = nextEviction)]
    pub fn next_eviction(&self, mark: u8) -> i32 {
        let Some(mark) = crate::Mark::from_bits(mark) else {
            return -1;
        };
        let queue = self.inner.game().position().fifo().queue(mark);
        match queue.oldest() {
            Some(pos) if queue.is_full() => pos.0 as i32,
            _ => -1,
        }
    }

    #[wasm_bindgen(js_name = canUndo)]
    pub fn can_undo(&self) -> bool {
        self.inner.game().can_undo()
    }

    /// Redraw effects for the current state (initial paint)
    pub fn render(&self) -> Result<JsValue, JsError> {
        to_js(&[self.inner.game().render()])
    }
}
