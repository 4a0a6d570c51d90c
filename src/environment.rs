//! Environment wrapper
//!
//! Owns one game and the single RNG that drives it. Adds sticky actions:
//! on each step, with probability `sticky_action_prob` the previous action
//! is repeated instead of the requested one.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::action::{Action, NUM_ACTIONS};
use crate::config::{EnvConfig, GameKind};
use crate::consts::N_CHANNELS;
use crate::error::Result;
use crate::sim::{Asterix, Breakout, Game, Observation};

#[derive(Debug, Clone)]
enum GameInstance {
    Asterix(Asterix),
    Breakout(Breakout),
}

/// A configured game plus sticky-action handling
#[derive(Debug, Clone)]
pub struct Environment {
    game: GameInstance,
    kind: GameKind,
    sticky_action_prob: f64,
    last_action: Action,
    seed: u64,
}

impl Environment {
    /// Build an environment from a validated config
    pub fn new(config: &EnvConfig) -> Result<Self> {
        config.validate()?;

        let seed = config.seed.unwrap_or_else(|| rand::rng().random());
        let rng = Pcg32::seed_from_u64(seed);
        let game = match config.game {
            GameKind::Asterix => {
                GameInstance::Asterix(Asterix::new(rng, config.difficulty_ramping))
            }
            GameKind::Breakout => GameInstance::Breakout(Breakout::new(rng)),
        };

        log::info!(
            "{} environment: seed={seed}, sticky_action_prob={}, ramping={}",
            config.game,
            config.sticky_action_prob,
            config.difficulty_ramping
        );

        Ok(Self {
            game,
            kind: config.game,
            sticky_action_prob: config.sticky_action_prob,
            last_action: Action::Noop,
            seed,
        })
    }

    /// Default settings for a game looked up by name
    pub fn from_name(name: &str, seed: u64) -> Result<Self> {
        Self::new(&EnvConfig::new(name.parse()?).with_seed(seed))
    }

    pub fn kind(&self) -> GameKind {
        self.kind
    }

    pub fn game_name(&self) -> &'static str {
        self.kind.as_str()
    }

    /// Seed the environment RNG was built from
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn sticky_action_prob(&self) -> f64 {
        self.sticky_action_prob
    }

    /// Whether the game speeds up over an episode (only Asterix can)
    pub fn difficulty_ramping(&self) -> bool {
        match &self.game {
            GameInstance::Asterix(g) => g.ramping(),
            GameInstance::Breakout(_) => false,
        }
    }

    /// Action applied on the most recent step
    pub fn last_action(&self) -> Action {
        self.last_action
    }

    /// Size of the full action space
    pub fn num_actions(&self) -> usize {
        NUM_ACTIONS
    }

    fn game(&self) -> &dyn Game {
        match &self.game {
            GameInstance::Asterix(g) => g,
            GameInstance::Breakout(g) => g,
        }
    }

    fn game_mut(&mut self) -> &mut dyn Game {
        match &mut self.game {
            GameInstance::Asterix(g) => g,
            GameInstance::Breakout(g) => g,
        }
    }

    fn rng_mut(&mut self) -> &mut Pcg32 {
        match &mut self.game {
            GameInstance::Asterix(g) => g.rng_mut(),
            GameInstance::Breakout(g) => g.rng_mut(),
        }
    }
}

impl Game for Environment {
    fn name(&self) -> &'static str {
        self.game_name()
    }

    fn reset(&mut self) {
        self.last_action = Action::Noop;
        self.game_mut().reset();
    }

    fn step(&mut self, action: Action) -> (u32, bool) {
        // The sticky draw happens every step, terminal or not
        let draw: f64 = self.rng_mut().random();
        let action = if draw < self.sticky_action_prob {
            self.last_action
        } else {
            action
        };
        self.last_action = action;
        self.game_mut().step(action)
    }

    fn state(&self) -> Observation {
        self.game().state()
    }

    fn difficulty_ramp(&self) -> Option<u32> {
        self.game().difficulty_ramp()
    }

    fn minimal_action_set(&self) -> Vec<u8> {
        self.game().minimal_action_set()
    }

    fn channels(&self) -> [&'static str; N_CHANNELS] {
        self.game().channels()
    }

    fn is_terminal(&self) -> bool {
        self.game().is_terminal()
    }
}
