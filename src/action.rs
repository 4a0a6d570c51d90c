//! Canonical action codes
//!
//! Both games share one action space. Codes outside `0..=5` are accepted
//! by the engines and behave like [`Action::Noop`].

use serde::{Deserialize, Serialize};

/// Size of the full action space
pub const NUM_ACTIONS: usize = 6;

/// A player action, in canonical code order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Action {
    #[default]
    Noop = 0,
    Left = 1,
    Up = 2,
    Right = 3,
    Down = 4,
    Fire = 5,
}

impl Action {
    /// All actions ordered by code
    pub const ALL: [Action; NUM_ACTIONS] = [
        Action::Noop,
        Action::Left,
        Action::Up,
        Action::Right,
        Action::Down,
        Action::Fire,
    ];

    /// Map a raw integer code to an action (None if unmapped)
    pub fn from_code(code: i64) -> Option<Self> {
        usize::try_from(code)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
    }

    pub fn code(self) -> u8 {
        self as u8
    }

    /// One-letter symbol used in action maps
    pub fn symbol(self) -> char {
        match self {
            Action::Noop => 'n',
            Action::Left => 'l',
            Action::Up => 'u',
            Action::Right => 'r',
            Action::Down => 'd',
            Action::Fire => 'f',
        }
    }

    pub fn from_symbol(c: char) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.symbol() == c)
    }
}

impl From<Action> for i64 {
    fn from(action: Action) -> Self {
        action as i64
    }
}
