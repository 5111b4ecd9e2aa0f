//! Exhaustive breadth-first exploration of every reachable position.
//!
//! Positions are deduplicated by [`Position::key`], which covers both FIFO
//! queues in order and the side to move, so two boards that look alike but
//! evict differently are distinct nodes. Symmetric duplicates are counted
//! separately through [`Position::canonical_key`].

use std::collections::{HashSet, VecDeque};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};
use twist_core::{evaluate, GameStatus, Mark, Position, PIECE_LIMIT};

use crate::stats::format_elapsed;

/// Expanded positions between progress lines.
const LOG_EVERY: u64 = 50_000;

/// Tallies gathered by a full exploration.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExploreReport {
    /// Distinct positions, the root included
    pub positions: u64,
    /// Distinct positions up to the 8 board symmetries
    pub canonical: u64,
    /// Moves examined (edges of the game graph)
    pub transitions: u64,
    /// Moves that cleared the mover's oldest mark
    pub evictions: u64,
    /// Moves that would have completed a line had the eviction not broken it
    pub broken_wins: u64,
    /// Won positions, indexed by [`Mark::index`]
    pub wins: [u64; 2],
    pub draws: u64,
    /// Positions whose board, queues and status disagree
    pub inconsistent: u64,
    /// Most marks on the board at once
    pub max_occupied: usize,
    /// Longest shortest path from the root, in plies
    pub max_depth: u32,
    /// Stopped before the frontier was exhausted
    pub interrupted: bool,
}

impl ExploreReport {
    pub fn terminals(&self) -> u64 {
        self.wins.iter().sum::<u64>() + self.draws
    }

    /// Rule invariants the explored graph broke. Empty when all hold.
    pub fn violations(&self) -> Vec<String> {
        let mut out = Vec::new();
        if self.draws > 0 {
            out.push(format!("{} drawn positions reached", self.draws));
        }
        if self.max_occupied > 2 * PIECE_LIMIT {
            out.push(format!("{} marks on the board at once", self.max_occupied));
        }
        if self.inconsistent > 0 {
            out.push(format!("{} inconsistent positions", self.inconsistent));
        }
        out
    }
}

impl fmt::Display for ExploreReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Positions:      {}", self.positions)?;
        writeln!(f, "  canonical:    {}", self.canonical)?;
        writeln!(f, "Transitions:    {}", self.transitions)?;
        writeln!(f, "  evictions:    {}", self.evictions)?;
        writeln!(f, "  broken wins:  {}", self.broken_wins)?;
        writeln!(f, "Terminals:      {}", self.terminals())?;
        writeln!(f, "  X wins:       {}", self.wins[Mark::X.index()])?;
        writeln!(f, "  O wins:       {}", self.wins[Mark::O.index()])?;
        writeln!(f, "  draws:        {}", self.draws)?;
        writeln!(f, "Max occupied:   {}", self.max_occupied)?;
        write!(f, "Max depth:      {}", self.max_depth)
    }
}

/// Breadth-first walker over the game graph.
#[derive(Default)]
pub struct Explorer {
    seen: HashSet<u64>,
    canonical: HashSet<u64>,
    frontier: VecDeque<(Position, u32)>,
    report: ExploreReport,
    stop: Option<Arc<AtomicBool>>,
}

impl Explorer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop early once `running` turns false (e.g. from a SIGINT handler).
    pub fn with_stop_flag(mut self, running: Arc<AtomicBool>) -> Self {
        self.stop = Some(running);
        self
    }

    fn stopped(&self) -> bool {
        self.stop
            .as_ref()
            .is_some_and(|running| !running.load(Ordering::SeqCst))
    }

    /// Walk everything reachable from `root`.
    pub fn explore(mut self, root: Position) -> ExploreReport {
        let start = Instant::now();
        self.visit(root, 0);
        let mut expanded = 0u64;

        while let Some((position, depth)) = self.frontier.pop_front() {
            if self.stopped() {
                warn!(remaining = self.frontier.len() + 1, "exploration interrupted");
                self.report.interrupted = true;
                break;
            }
            self.expand(&position, depth);
            expanded += 1;

            if expanded % LOG_EVERY == 0 {
                info!(
                    elapsed = %format_elapsed(start.elapsed()),
                    positions = self.report.positions,
                    frontier = self.frontier.len(),
                    depth,
                    "progress"
                );
            }
        }

        debug!(elapsed = ?start.elapsed(), "exploration finished");
        self.report
    }

    fn expand(&mut self, position: &Position, depth: u32) {
        let mover = position.turn();
        for pos in position.legal_moves() {
            self.report.transitions += 1;

            let mut completed = *position.board();
            completed.set(pos, mover);
            let would_win = evaluate(&completed).is_some();

            let mut next = *position;
            let outcome = next.play(pos);
            if outcome.evicted.is_some() {
                self.report.evictions += 1;
                if would_win && !outcome.status.is_terminal() {
                    self.report.broken_wins += 1;
                }
            }
            self.visit(next, depth + 1);
        }
    }

    fn visit(&mut self, position: Position, depth: u32) {
        if !self.seen.insert(position.key()) {
            return;
        }
        let report = &mut self.report;
        report.positions += 1;
        if self.canonical.insert(position.canonical_key()) {
            report.canonical += 1;
        }
        report.max_depth = report.max_depth.max(depth);
        report.max_occupied = report.max_occupied.max(position.board().occupied());
        if !position.is_consistent() {
            warn!(key = position.key(), board = %position.board(), "inconsistent position");
            report.inconsistent += 1;
        }

        match position.status() {
            GameStatus::InProgress => self.frontier.push_back((position, depth)),
            GameStatus::Won(win) => report.wins[win.mark.index()] += 1,
            GameStatus::Draw => report.draws += 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_state_space() {
        let report = Explorer::new().explore(Position::new());
        assert!(!report.interrupted);
        assert_eq!(report.positions, 128_170);
        assert_eq!(report.canonical, 16_030);
        assert_eq!(report.wins, [6_768, 5_328]);
        assert_eq!(report.draws, 0);
        assert_eq!(report.transitions, 369_801);
        assert_eq!(report.evictions, 296_352);
        assert_eq!(report.broken_wins, 63_936);
        assert_eq!(report.max_occupied, 6);
        assert_eq!(report.max_depth, 7);
        assert!(report.violations().is_empty());
    }

    #[test]
    fn test_terminal_root_is_not_expanded() {
        let mut root = Position::new();
        for i in [0, 3, 1, 4, 2] {
            root.apply_move(i).unwrap();
        }
        let report = Explorer::new().explore(root);
        assert_eq!(report.positions, 1);
        assert_eq!(report.transitions, 0);
        assert_eq!(report.wins, [1, 0]);
    }

    #[test]
    fn test_stop_flag() {
        let running = Arc::new(AtomicBool::new(false));
        let report = Explorer::new()
            .with_stop_flag(running)
            .explore(Position::new());
        assert!(report.interrupted);
        assert_eq!(report.positions, 1);
    }

    #[test]
    fn test_violations_reported() {
        let report = ExploreReport {
            draws: 2,
            max_occupied: 7,
            ..ExploreReport::default()
        };
        assert_eq!(report.violations().len(), 2);
    }
}
