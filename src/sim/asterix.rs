//! Asterix: dodge enemies, collect treasure
//!
//! The player moves freely along the four cardinal directions. Enemies and
//! treasure enter from the left or right edge, one per row. Picking up
//! treasure gives +1; touching an enemy ends the episode. When ramping is
//! enabled, spawn rate and movement speed increase periodically.

use glam::IVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::{Game, Observation, action_codes};
use crate::action::Action;
use crate::consts::{GRID_MAX, N_CHANNELS};
use crate::random::{choice, sample};
use crate::{clamp_coord, in_bounds};

/// Capacity of the entity table (one slot per playable row)
pub const MAX_ENTITIES: usize = 8;
/// Steps between difficulty ramp events
pub const RAMP_INTERVAL: i32 = 100;
/// Steps between spawns at the start of an episode
pub const INIT_SPAWN_SPEED: i32 = 10;
/// Steps between entity moves at the start of an episode
pub const INIT_MOVE_INTERVAL: i32 = 5;

/// Weights for `[enemy, treasure]`
const TREASURE_WEIGHTS: [f64; 2] = [2.0 / 3.0, 1.0 / 3.0];
const PLAYER_START: IVec2 = IVec2::new(5, 5);
// Rows 0 and 9 are never entered by the player
const PLAYER_MIN_Y: i32 = 1;
const PLAYER_MAX_Y: i32 = GRID_MAX - 1;

pub const CHANNEL_PLAYER: usize = 0;
pub const CHANNEL_ENEMY: usize = 1;
pub const CHANNEL_TRAIL: usize = 2;
pub const CHANNEL_TREASURE: usize = 3;
pub const CHANNELS: [&str; N_CHANNELS] = ["player", "enemy", "trail", "treasure"];

const MINIMAL_ACTIONS: [Action; 5] = [
    Action::Noop,
    Action::Left,
    Action::Up,
    Action::Right,
    Action::Down,
];

/// An enemy or treasure crossing the board horizontally
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub pos: IVec2,
    /// Travelling left-to-right
    pub moving_right: bool,
    pub is_treasure: bool,
}

impl Entity {
    fn dx(&self) -> i32 {
        if self.moving_right { 1 } else { -1 }
    }

    /// Column one cell behind the entity, if it is on the board
    pub fn trail_x(&self) -> Option<i32> {
        let x = self.pos.x - self.dx();
        in_bounds(x).then_some(x)
    }
}

/// Everything that evolves during an Asterix episode (the RNG excepted)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AsterixState {
    pub player: IVec2,
    /// Entity table; slot `i` always holds row `i + 1`
    pub entities: [Option<Entity>; MAX_ENTITIES],
    pub spawn_speed: i32,
    pub spawn_timer: i32,
    pub move_speed: i32,
    pub move_timer: i32,
    pub ramp_timer: i32,
    pub ramp_index: u32,
    pub terminal: bool,
}

impl Default for AsterixState {
    fn default() -> Self {
        Self {
            player: PLAYER_START,
            entities: [None; MAX_ENTITIES],
            spawn_speed: INIT_SPAWN_SPEED,
            spawn_timer: INIT_SPAWN_SPEED,
            move_speed: INIT_MOVE_INTERVAL,
            move_timer: INIT_MOVE_INTERVAL,
            ramp_timer: RAMP_INTERVAL,
            ramp_index: 0,
            terminal: false,
        }
    }
}

impl AsterixState {
    /// Number of occupied slots
    pub fn occupied(&self) -> usize {
        self.entities.iter().flatten().count()
    }

    /// Move every entity one cell, dropping those that leave the board
    fn advance_entities(&mut self) {
        for slot in &mut self.entities {
            if let Some(entity) = slot.as_mut() {
                entity.pos.x += entity.dx();
            }
            if slot.is_some_and(|e| !in_bounds(e.pos.x)) {
                *slot = None;
            }
        }
    }

    /// Resolve every entity on the player's cell.
    ///
    /// Treasure is consumed for +1 each; any enemy sets terminal. All slots
    /// are visited, so reward and terminal can both be reported.
    fn resolve_collisions(&mut self) -> (u32, bool) {
        let mut reward = 0;
        let mut terminal = false;
        for slot in &mut self.entities {
            let Some(entity) = *slot else { continue };
            if entity.pos != self.player {
                continue;
            }
            if entity.is_treasure {
                *slot = None;
                reward += 1;
            } else {
                terminal = true;
            }
        }
        (reward, terminal)
    }

    /// Advance the ramp countdown, applying a ramp event once it has run out
    fn ramp(&mut self) {
        if self.spawn_speed <= 1 && self.move_speed <= 1 {
            return;
        }
        if self.ramp_timer >= 0 {
            self.ramp_timer -= 1;
            return;
        }
        // Movement speeds up on every other event only
        if self.move_speed > 1 && self.ramp_index % 2 == 1 {
            self.move_speed -= 1;
        }
        if self.spawn_speed > 1 {
            self.spawn_speed -= 1;
        }
        self.ramp_index += 1;
        self.ramp_timer = RAMP_INTERVAL;
        log::debug!(
            "asterix ramp {}: spawn_speed={} move_speed={}",
            self.ramp_index,
            self.spawn_speed,
            self.move_speed
        );
    }

    fn render(&self) -> Observation {
        let mut obs = Observation::new();
        obs.set_at(CHANNEL_PLAYER, self.player.y, self.player.x);
        for entity in self.entities.iter().flatten() {
            let channel = if entity.is_treasure {
                CHANNEL_TREASURE
            } else {
                CHANNEL_ENEMY
            };
            obs.set_at(channel, entity.pos.y, entity.pos.x);
            if let Some(back_x) = entity.trail_x() {
                obs.set_at(CHANNEL_TRAIL, entity.pos.y, back_x);
            }
        }
        obs
    }
}

/// Apply a movement action, keeping the player inside its allowed area
fn move_player(pos: IVec2, action: Action) -> IVec2 {
    match action {
        Action::Left => IVec2::new(clamp_coord(pos.x - 1, 0, GRID_MAX), pos.y),
        Action::Right => IVec2::new(clamp_coord(pos.x + 1, 0, GRID_MAX), pos.y),
        Action::Up => IVec2::new(pos.x, clamp_coord(pos.y - 1, PLAYER_MIN_Y, PLAYER_MAX_Y)),
        Action::Down => IVec2::new(pos.x, clamp_coord(pos.y + 1, PLAYER_MIN_Y, PLAYER_MAX_Y)),
        Action::Noop | Action::Fire => pos,
    }
}

/// The Asterix game, owning its RNG
#[derive(Debug, Clone)]
pub struct Asterix<R = Pcg32> {
    state: AsterixState,
    ramping: bool,
    rng: R,
}

impl Asterix<Pcg32> {
    /// Create a game driven by a PCG generator seeded with `seed`
    pub fn from_seed(seed: u64, ramping: bool) -> Self {
        Self::new(Pcg32::seed_from_u64(seed), ramping)
    }
}

impl<R: Rng> Asterix<R> {
    pub fn new(rng: R, ramping: bool) -> Self {
        Self {
            state: AsterixState::default(),
            ramping,
            rng,
        }
    }

    /// Read-only view of the simulation state
    pub fn snapshot(&self) -> &AsterixState {
        &self.state
    }

    /// Whether ramp events are enabled
    pub fn ramping(&self) -> bool {
        self.ramping
    }

    /// The game's generator (shared with wrappers that need extra draws)
    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    /// Spawn an enemy or treasure in the first free slot (no-op when full)
    fn spawn_entity(&mut self) {
        let Some(slot) = self.state.entities.iter().position(Option::is_none) else {
            return;
        };

        let moving_right = choice(&[true, false], &mut self.rng);
        let is_treasure = sample(&TREASURE_WEIGHTS, &mut self.rng) == 1;
        let x = if moving_right { 0 } else { GRID_MAX };
        let entity = Entity {
            pos: IVec2::new(x, slot as i32 + 1),
            moving_right,
            is_treasure,
        };
        log::trace!("asterix spawn slot {slot}: {entity:?}");
        self.state.entities[slot] = Some(entity);
    }
}

impl<R: Rng> Game for Asterix<R> {
    fn name(&self) -> &'static str {
        "asterix"
    }

    fn reset(&mut self) {
        self.state = AsterixState::default();
    }

    fn step(&mut self, action: Action) -> (u32, bool) {
        if self.state.terminal {
            return (0, true);
        }

        // Spawn enemy if timer is up
        if self.state.spawn_timer == 0 {
            self.spawn_entity();
            self.state.spawn_timer = self.state.spawn_speed;
        }

        self.state.player = move_player(self.state.player, action);

        if self.state.move_timer == 0 {
            self.state.move_timer = self.state.move_speed;
            self.state.advance_entities();
        }

        let (reward, terminal) = self.state.resolve_collisions();
        self.state.terminal = terminal;

        self.state.spawn_timer -= 1;
        self.state.move_timer -= 1;

        if self.ramping {
            self.state.ramp();
        }

        (reward, terminal)
    }

    fn state(&self) -> Observation {
        self.state.render()
    }

    fn difficulty_ramp(&self) -> Option<u32> {
        Some(self.state.ramp_index)
    }

    fn minimal_action_set(&self) -> Vec<u8> {
        action_codes(&MINIMAL_ACTIONS)
    }

    fn channels(&self) -> [&'static str; N_CHANNELS] {
        CHANNELS
    }

    fn is_terminal(&self) -> bool {
        self.state.terminal
    }
}
