//! MinAtar - miniature arcade environments for reinforcement learning
//!
//! Core modules:
//! - `sim`: Deterministic simulation (Asterix, Breakout, observation grid)
//! - `random`: Sampling primitives shared by both games
//! - `action`: Canonical action codes
//! - `environment`: Sticky-action wrapper with a per-environment RNG
//! - `config`: Serializable environment configuration

pub mod action;
pub mod config;
pub mod environment;
pub mod error;
pub mod random;
pub mod sim;

pub use action::{Action, NUM_ACTIONS};
pub use config::{EnvConfig, GameKind};
pub use environment::Environment;
pub use error::{Error, Result};
pub use sim::{Asterix, Breakout, Game, Observation};

/// Game configuration constants
pub mod consts {
    /// Width and height of every game board
    pub const GRID_SIZE: usize = 10;
    /// Largest valid coordinate on either axis
    pub const GRID_MAX: i32 = GRID_SIZE as i32 - 1;
    /// Number of observation channels (same for both games)
    pub const N_CHANNELS: usize = 4;

    /// Default probability of repeating the previous action
    pub const DEFAULT_STICKY_ACTION_PROB: f64 = 0.1;
}

/// Clamp a grid coordinate into `[lo, hi]`
#[inline]
pub(crate) fn clamp_coord(v: i32, lo: i32, hi: i32) -> i32 {
    v.max(lo).min(hi)
}

/// True if `v` is a valid row/column index
#[inline]
pub(crate) fn in_bounds(v: i32) -> bool {
    (0..=consts::GRID_MAX).contains(&v)
}
