//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One discrete action per step
//! - Seeded RNG owned by each game instance
//! - Stable iteration order (by entity slot)
//! - No rendering or platform dependencies

pub mod asterix;
pub mod breakout;
pub mod observation;

pub use asterix::{Asterix, AsterixState, Entity, MAX_ENTITIES};
pub use breakout::{BrickGrid, Breakout, BreakoutState};
pub use observation::{Observation, Plane};

use crate::action::Action;
use crate::consts::{GRID_SIZE, N_CHANNELS};

/// Uniform interface shared by every game
pub trait Game {
    /// Short lowercase game name
    fn name(&self) -> &'static str;

    /// Return to the start state of a new episode
    fn reset(&mut self);

    /// Advance one step, returning `(reward, terminal)`
    fn step(&mut self, action: Action) -> (u32, bool);

    /// Advance one step from a raw action code. Unmapped codes act as no-ops.
    fn act(&mut self, code: i64) -> (u32, bool) {
        self.step(Action::from_code(code).unwrap_or(Action::Noop))
    }

    /// Render the current state
    fn state(&self) -> Observation;

    /// Current difficulty level, if the game ramps
    fn difficulty_ramp(&self) -> Option<u32>;

    /// Action codes with a distinct effect, in code order
    fn minimal_action_set(&self) -> Vec<u8>;

    /// Channel names in channel order
    fn channels(&self) -> [&'static str; N_CHANNELS];

    fn is_terminal(&self) -> bool;

    fn state_shape(&self) -> [usize; 3] {
        [N_CHANNELS, GRID_SIZE, GRID_SIZE]
    }
}

/// Codes for a list of actions
pub(crate) fn action_codes(actions: &[Action]) -> Vec<u8> {
    actions.iter().map(|a| a.code()).collect()
}
