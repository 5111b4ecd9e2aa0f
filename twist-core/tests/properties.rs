//! Randomized play checks
//!
//! Plays many seeded games and checks after every move that:
//! - No player ever holds more than three cells
//! - Board, queues and status agree
//! - Turns alternate until the game ends
//! - Undo restores the exact previous state

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use twist_core::{
    choose_move, GameConfig, GameState, GameStatus, Mark, Mode, Position, Session, PIECE_LIMIT,
};

const GAMES: u64 = 200;
const MAX_PLIES: usize = 60;

fn random_cell(game: &GameState, rng: &mut StdRng) -> usize {
    let moves = game.position().legal_moves();
    moves[rng.random_range(0..moves.len())].index()
}

#[test]
fn test_random_play_keeps_invariants() {
    for seed in 0..GAMES {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut game = GameState::new();

        for ply in 0..MAX_PLIES {
            if game.is_terminal() {
                break;
            }
            let mover = game.turn();
            let before_x = game.board().mask(Mark::X).count_ones();
            let before_o = game.board().mask(Mark::O).count_ones();

            let outcome = game.select_cell(random_cell(&game, &mut rng)).unwrap();
            let position = game.position();

            assert!(position.is_consistent(), "seed {seed} ply {ply}");
            for mark in Mark::all() {
                assert!(position.fifo().queue(mark).len() <= PIECE_LIMIT);
                assert!(game.board().mask(mark).count_ones() as usize <= PIECE_LIMIT);
            }
            assert_ne!(game.status(), GameStatus::Draw, "seed {seed}: draw reached");
            assert!(game.board().occupied() <= 2 * PIECE_LIMIT);

            // Eviction happens exactly when the mover already had three marks.
            let had = if mover == Mark::X { before_x } else { before_o };
            assert_eq!(outcome.evicted.is_some(), had as usize == PIECE_LIMIT);

            match game.status() {
                GameStatus::InProgress => assert_eq!(game.turn(), mover.opponent()),
                GameStatus::Won(win) => {
                    assert_eq!(win.mark, mover);
                    assert_eq!(game.turn(), mover);
                }
                GameStatus::Draw => unreachable!(),
            }
        }
    }
}

#[test]
fn test_undo_is_exact_inverse() {
    for seed in 0..GAMES {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut game = GameState::new();

        for _ in 0..MAX_PLIES {
            if game.is_terminal() {
                break;
            }
            let before = game.clone();
            let cell = random_cell(&game, &mut rng);
            game.select_cell(cell).unwrap();
            assert_eq!(game.history().len(), before.history().len() + 1);

            let mut undone = game.clone();
            undone.undo().unwrap();
            assert_eq!(undone, before, "seed {seed}: undo of cell {cell}");
        }

        // Unwinding everything returns to a fresh game.
        while game.can_undo() {
            game.undo().unwrap();
        }
        assert_eq!(game, GameState::new());
    }
}

#[test]
fn test_keys_identify_positions() {
    let mut rng = StdRng::seed_from_u64(99);
    let mut seen = std::collections::HashMap::new();

    for _ in 0..GAMES {
        let mut position = Position::new();
        for _ in 0..MAX_PLIES {
            if position.is_terminal() {
                break;
            }
            let moves = position.legal_moves();
            position.play(moves[rng.random_range(0..moves.len())]);
            let previous = seen.entry(position.key()).or_insert(position);
            assert_eq!(*previous, position);
            assert!(position.canonical_key() <= position.key());
        }
    }
}

#[test]
fn test_ai_vs_ai_games_end_without_draws() {
    let mut wins = [0u32; 2];
    for seed in 0..GAMES {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut position = Position::new();
        for _ in 0..MAX_PLIES {
            if position.is_terminal() {
                break;
            }
            let mark = position.turn();
            let pos = choose_move(position.board(), mark, mark.opponent(), &mut rng)
                .expect("the board always has an empty cell");
            position.play(pos);
            assert!(position.is_consistent());
        }
        if let GameStatus::Won(win) = position.status() {
            wins[win.mark.index()] += 1;
        }
        assert_ne!(position.status(), GameStatus::Draw);
    }
    assert!(wins.iter().sum::<u32>() > 0);
}

#[test]
fn test_session_against_computer() {
    for seed in 0..50 {
        let mut rng = StdRng::seed_from_u64(seed + 1000);
        let mut session = Session::new(GameConfig::vs_computer().with_seed(seed));
        assert_eq!(session.mode(), Mode::VsComputer);

        for _ in 0..MAX_PLIES {
            if session.game().is_terminal() {
                break;
            }
            assert_eq!(session.game().turn(), session.human_mark());
            let cell = random_cell(session.game(), &mut rng);
            session.select_cell(cell).unwrap();
            if session.game().is_terminal() {
                assert!(!session.ai_pending());
                break;
            }
            assert!(session.ai_pending());
            assert!(session.run_ai_turn().unwrap().is_some());
            assert!(session.game().position().is_consistent());
        }
    }
}
