//! Environment configuration
//!
//! Loaded from JSON (every field optional) or built in code.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_STICKY_ACTION_PROB;
use crate::error::{Error, Result};

/// Which game an environment runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameKind {
    Asterix,
    #[default]
    Breakout,
}

impl GameKind {
    pub const ALL: [GameKind; 2] = [GameKind::Asterix, GameKind::Breakout];

    pub fn as_str(&self) -> &'static str {
        match self {
            GameKind::Asterix => "asterix",
            GameKind::Breakout => "breakout",
        }
    }
}

impl FromStr for GameKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "asterix" => Ok(GameKind::Asterix),
            "breakout" => Ok(GameKind::Breakout),
            _ => Err(Error::UnknownGame(s.to_string())),
        }
    }
}

impl fmt::Display for GameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Environment settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvConfig {
    pub game: GameKind,
    /// Chance that the previous action is repeated instead of the requested one
    pub sticky_action_prob: f64,
    /// Periodic speed-ups (Asterix only)
    pub difficulty_ramping: bool,
    /// RNG seed; drawn at random when absent
    pub seed: Option<u64>,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            game: GameKind::default(),
            sticky_action_prob: DEFAULT_STICKY_ACTION_PROB,
            difficulty_ramping: true,
            seed: None,
        }
    }
}

impl EnvConfig {
    /// Defaults for the given game
    pub fn new(game: GameKind) -> Self {
        Self {
            game,
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_sticky_action_prob(mut self, prob: f64) -> Self {
        self.sticky_action_prob = prob;
        self
    }

    pub fn with_difficulty_ramping(mut self, ramping: bool) -> Self {
        self.difficulty_ramping = ramping;
        self
    }

    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        let p = self.sticky_action_prob;
        if !p.is_finite() || !(0.0..=1.0).contains(&p) {
            return Err(Error::InvalidStickyProbability(p));
        }
        Ok(())
    }
}
