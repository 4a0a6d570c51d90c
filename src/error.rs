//! Errors for environment construction and configuration.
//!
//! Stepping a game never fails; only building one from user input can.

use thiserror::Error;

/// Convenience alias
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Game name that matches no known game
    #[error("unknown game `{0}` (expected one of: asterix, breakout)")]
    UnknownGame(String),

    /// Sticky-action probability outside `[0, 1]`
    #[error("sticky action probability must be in [0, 1], got {0}")]
    InvalidStickyProbability(f64),

    /// Malformed or mistyped JSON
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
}
