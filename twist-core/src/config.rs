//! Game configuration.
//!
//! Deserializes from the camelCase object a page hands to the WASM binding:
//!
//! ```json
//! { "mode": "vsComputer", "aiMark": "O", "aiDelayMs": 300, "seed": 42 }
//! ```
//!
//! Every key is optional.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::Mark;

/// Default pause before the computer replies.
pub const DEFAULT_AI_DELAY_MS: u64 = 300;

/// Who controls the marks.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default, Serialize, Deserialize)]
pub enum Mode {
    /// Both marks played by people at the same screen.
    #[default]
    #[serde(rename = "twoPlayer", alias = "2p")]
    TwoPlayer,
    /// One mark played by the heuristic AI.
    #[serde(rename = "vsComputer", alias = "ai")]
    VsComputer,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::TwoPlayer => f.write_str("twoPlayer"),
            Mode::VsComputer => f.write_str("vsComputer"),
        }
    }
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Mode> {
        match s {
            "twoPlayer" | "2p" => Ok(Mode::TwoPlayer),
            "vsComputer" | "ai" => Ok(Mode::VsComputer),
            other => Err(Error::InvalidConfig {
                message: format!("unknown mode '{other}' (expected 'twoPlayer' or 'vsComputer')"),
            }),
        }
    }
}

/// Settings for a [`Session`](crate::Session).
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct GameConfig {
    pub mode: Mode,
    /// Mark played by the computer in `VsComputer` mode.
    pub ai_mark: Mark,
    pub ai_delay_ms: u64,
    /// Seed for the AI's random fallback. `None` lets the host pick one.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            mode: Mode::TwoPlayer,
            ai_mark: Mark::O,
            ai_delay_ms: DEFAULT_AI_DELAY_MS,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Single-player game against the computer playing O.
    pub fn vs_computer() -> GameConfig {
        GameConfig {
            mode: Mode::VsComputer,
            ..GameConfig::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> GameConfig {
        self.seed = Some(seed);
        self
    }

    pub fn ai_delay(&self) -> Duration {
        Duration::from_millis(self.ai_delay_ms)
    }

    /// Mark the person plays in `VsComputer` mode.
    pub fn human_mark(&self) -> Mark {
        self.ai_mark.opponent()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GameConfig::default();
        assert_eq!(config.mode, Mode::TwoPlayer);
        assert_eq!(config.ai_mark, Mark::O);
        assert_eq!(config.human_mark(), Mark::X);
        assert_eq!(config.ai_delay(), Duration::from_millis(300));
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_deserialize_partial() {
        let config: GameConfig = serde_json::from_str(r#"{"mode": "vsComputer", "seed": 9}"#).unwrap();
        assert_eq!(config, GameConfig::vs_computer().with_seed(9));
    }

    #[test]
    fn test_deserialize_legacy_mode_alias() {
        let config: GameConfig = serde_json::from_str(r#"{"mode": "ai", "aiDelayMs": 0}"#).unwrap();
        assert_eq!(config.mode, Mode::VsComputer);
        assert_eq!(config.ai_delay_ms, 0);
    }

    #[test]
    fn test_deserialize_rejects_unknown_keys() {
        assert!(serde_json::from_str::<GameConfig>(r#"{"difficulty": "hard"}"#).is_err());
        assert!(serde_json::from_str::<GameConfig>(r#"{"aiMark": "Z"}"#).is_err());
    }

    #[test]
    fn test_mode_from_str() {
        assert_eq!("vsComputer".parse::<Mode>().unwrap(), Mode::VsComputer);
        assert_eq!("ai".parse::<Mode>().unwrap(), Mode::VsComputer);
        assert_eq!("twoPlayer".parse::<Mode>().unwrap(), Mode::TwoPlayer);
        assert!(matches!("solo".parse::<Mode>(), Err(Error::InvalidConfig { .. })));
        assert_eq!(Mode::VsComputer.to_string().parse::<Mode>().unwrap(), Mode::VsComputer);
    }
}
