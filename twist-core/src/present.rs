//! Presentation effects.
//!
//! Commands return a list of [`Effect`]s. The core never reads anything
//! back from the presenter, so any renderer (DOM, terminal, test recorder)
//! can consume them.

use serde::Serialize;

use crate::{Mark, Pos, WinInfo};

/// An instruction for the presentation layer.
#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Effect {
    /// Redraw every cell and the status banner.
    Render {
        cells: [Option<Mark>; 9],
        message: String,
    },
    /// Strike through the winning line.
    HighlightWinLine { line_index: usize, cells: [Pos; 3] },
    /// Remove any win-line strike.
    ClearHighlight,
    /// Celebrate a win.
    Celebrate,
}

impl Effect {
    pub(crate) fn highlight(win: &WinInfo) -> Effect {
        Effect::HighlightWinLine {
            line_index: win.line_index,
            cells: win.cells,
        }
    }

    /// Route this effect to the matching presenter call.
    pub fn present<P: Presenter + ?Sized>(&self, presenter: &mut P) {
        match self {
            Effect::Render { cells, message } => presenter.render(cells, message),
            Effect::HighlightWinLine { line_index, cells } => {
                presenter.highlight_win_line(*line_index, *cells)
            }
            Effect::ClearHighlight => presenter.clear_highlight(),
            Effect::Celebrate => presenter.celebrate(),
        }
    }
}

/// Apply effects in order.
pub fn present_all<P: Presenter + ?Sized>(effects: &[Effect], presenter: &mut P) {
    for effect in effects {
        effect.present(presenter);
    }
}

/// Something that draws the game.
pub trait Presenter {
    fn render(&mut self, cells: &[Option<Mark>; 9], message: &str);
    fn highlight_win_line(&mut self, line_index: usize, cells: [Pos; 3]);
    fn clear_highlight(&mut self);
    fn celebrate(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
    }

    impl Presenter for Recorder {
        fn render(&mut self, cells: &[Option<Mark>; 9], message: &str) {
            let filled = cells.iter().filter(|c| c.is_some()).count();
            self.calls.push(format!("render {filled} {message}"));
        }

        fn highlight_win_line(&mut self, line_index: usize, _cells: [Pos; 3]) {
            self.calls.push(format!("highlight {line_index}"));
        }

        fn clear_highlight(&mut self) {
            self.calls.push("clear".into());
        }

        fn celebrate(&mut self) {
            self.calls.push("celebrate".into());
        }
    }

    #[test]
    fn test_present_all_routes_in_order() {
        let mut cells = [None; 9];
        cells[0] = Some(Mark::X);
        let effects = vec![
            Effect::Render {
                cells,
                message: "O’s turn".into(),
            },
            Effect::HighlightWinLine {
                line_index: 6,
                cells: [Pos(0), Pos(4), Pos(8)],
            },
            Effect::Celebrate,
            Effect::ClearHighlight,
        ];
        let mut recorder = Recorder::default();
        present_all(&effects, &mut recorder);
        assert_eq!(
            recorder.calls,
            vec!["render 1 O’s turn", "highlight 6", "celebrate", "clear"]
        );
    }

    #[test]
    fn test_effect_json_shape() {
        let effect = Effect::HighlightWinLine {
            line_index: 0,
            cells: [Pos(0), Pos(1), Pos(2)],
        };
        let json = serde_json::to_value(&effect).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"type": "highlightWinLine", "lineIndex": 0, "cells": [0, 1, 2]})
        );
        let json = serde_json::to_value(Effect::Celebrate).unwrap();
        assert_eq!(json, serde_json::json!({"type": "celebrate"}));
    }
}
