//! Self-play statistics tracking.

use std::fmt;
use std::time::{Duration, Instant};

use twist_core::{GameStatus, Mark, MoveOutcome};

/// Format a duration as `hh:mm:ss`.
pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
}

/// Result of one self-play game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameRecord {
    pub status: GameStatus,
    pub plies: u32,
    pub evictions: u32,
}

impl GameRecord {
    pub fn new() -> Self {
        Self {
            status: GameStatus::InProgress,
            plies: 0,
            evictions: 0,
        }
    }

    /// Account for one accepted move.
    pub fn record_move(&mut self, outcome: &MoveOutcome) {
        self.plies += 1;
        self.evictions += outcome.evicted.is_some() as u32;
        self.status = outcome.status;
    }
}

impl Default for GameRecord {
    fn default() -> Self {
        Self::new()
    }
}

/// Statistics collected over a batch of games.
#[derive(Debug, Default)]
pub struct GameStats {
    pub games: u64,
    /// Wins, indexed by [`Mark::index`]
    pub wins: [u64; 2],
    pub draws: u64,
    /// Games cut off by the ply cap
    pub unfinished: u64,
    pub total_plies: u64,
    pub total_evictions: u64,
    pub longest_game: u32,
    /// Games won on the first ply that could possibly win (the fifth)
    pub fastest_wins: u64,

    start_time: Option<Instant>,
    last_log_time: Option<Instant>,
}

impl GameStats {
    pub fn new() -> Self {
        Self {
            start_time: Some(Instant::now()),
            last_log_time: Some(Instant::now()),
            ..Default::default()
        }
    }

    /// Record a finished (or capped) game.
    pub fn record(&mut self, game: &GameRecord) {
        self.games += 1;
        self.total_plies += game.plies as u64;
        self.total_evictions += game.evictions as u64;
        self.longest_game = self.longest_game.max(game.plies);
        match game.status {
            GameStatus::Won(win) => {
                self.wins[win.mark.index()] += 1;
                if game.plies == 5 {
                    self.fastest_wins += 1;
                }
            }
            GameStatus::Draw => self.draws += 1,
            GameStatus::InProgress => self.unfinished += 1,
        }
    }

    pub fn average_plies(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.total_plies as f64 / self.games as f64
        }
    }

    /// Share of games won by `mark`, in percent.
    pub fn win_rate(&self, mark: Mark) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            100.0 * self.wins[mark.index()] as f64 / self.games as f64
        }
    }

    /// Games per second since creation.
    pub fn games_per_sec(&self) -> f64 {
        match self.start_time {
            Some(start) if start.elapsed().as_secs_f64() > 0.0 => {
                self.games as f64 / start.elapsed().as_secs_f64()
            }
            _ => 0.0,
        }
    }

    /// Check if we should log progress
    pub fn should_log(&self, interval_secs: u64) -> bool {
        self.last_log_time
            .map_or(true, |last| last.elapsed().as_secs() >= interval_secs)
    }

    /// Log progress and reset log timer
    pub fn log_progress(&mut self) {
        let elapsed = self.start_time.map(|s| s.elapsed()).unwrap_or_default();
        tracing::info!(
            elapsed = %format_elapsed(elapsed),
            games = self.games,
            x_wins = self.wins[Mark::X.index()],
            o_wins = self.wins[Mark::O.index()],
            unfinished = self.unfinished,
            rate = format_args!("{:.0}/s", self.games_per_sec()),
            "progress"
        );
        self.last_log_time = Some(Instant::now());
    }
}

impl fmt::Display for GameStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Games played:   {}", self.games)?;
        for mark in Mark::all() {
            writeln!(
                f,
                "  {mark} wins:      {} ({:.1}%)",
                self.wins[mark.index()],
                self.win_rate(mark)
            )?;
        }
        writeln!(f, "  draws:        {}", self.draws)?;
        writeln!(f, "  unfinished:   {}", self.unfinished)?;
        writeln!(f, "Average plies:  {:.2}", self.average_plies())?;
        writeln!(f, "Longest game:   {}", self.longest_game)?;
        writeln!(f, "5-ply wins:     {}", self.fastest_wins)?;
        write!(f, "Evictions:      {}", self.total_evictions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use twist_core::Position;

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(Duration::from_secs(0)), "00:00:00");
        assert_eq!(format_elapsed(Duration::from_secs(3_725)), "01:02:05");
    }

    #[test]
    fn test_record_games() {
        let mut position = Position::new();
        let mut game = GameRecord::new();
        for i in [0, 3, 1, 4, 2] {
            let outcome = position.apply_move(i).unwrap();
            game.record_move(&outcome);
        }
        assert_eq!(game.plies, 5);
        assert_eq!(game.evictions, 0);

        let mut stats = GameStats::new();
        stats.record(&game);
        stats.record(&GameRecord {
            plies: 40,
            evictions: 34,
            ..GameRecord::new()
        });

        assert_eq!(stats.games, 2);
        assert_eq!(stats.wins, [1, 0]);
        assert_eq!(stats.unfinished, 1);
        assert_eq!(stats.fastest_wins, 1);
        assert_eq!(stats.longest_game, 40);
        assert_eq!(stats.total_evictions, 34);
        assert!((stats.average_plies() - 22.5).abs() < 1e-9);
        assert!((stats.win_rate(Mark::X) - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_summary_lists_both_marks() {
        let text = GameStats::new().to_string();
        assert!(text.contains("X wins"));
        assert!(text.contains("O wins"));
    }
}
