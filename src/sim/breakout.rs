//! Breakout: bounce a ball off a paddle to clear bricks
//!
//! The paddle sits on the bottom row. The ball travels only along
//! diagonals and reflects off walls and bricks; each brick broken gives +1.
//! When every brick is gone three fresh rows are added. The episode ends when
//! the ball reaches the bottom row without being caught by the paddle.

use glam::IVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::{Game, Observation, Plane, action_codes};
use crate::action::Action;
use crate::consts::{GRID_MAX, GRID_SIZE, N_CHANNELS};
use crate::clamp_coord;
use crate::random::choice;

/// Rows filled with bricks at the start and on every refill
pub const BRICK_ROWS: std::ops::RangeInclusive<usize> = 1..=3;
/// Bricks in a full refill
pub const FULL_BRICK_COUNT: usize = 3 * GRID_SIZE;

const BALL_START_Y: i32 = 3;
const PADDLE_START: i32 = 4;
/// Possible `(x, dx)` starts; the ball always begins moving down
const BALL_STARTS: [(i32, i32); 2] = [(0, 1), (GRID_MAX, -1)];

pub const CHANNEL_PADDLE: usize = 0;
pub const CHANNEL_BALL: usize = 1;
pub const CHANNEL_TRAIL: usize = 2;
pub const CHANNEL_BRICK: usize = 3;
pub const CHANNELS: [&str; N_CHANNELS] = ["paddle", "ball", "trail", "brick"];

const MINIMAL_ACTIONS: [Action; 3] = [Action::Noop, Action::Left, Action::Right];

/// Brick occupancy, indexed `[row][column]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BrickGrid {
    cells: Plane,
}

impl BrickGrid {
    /// A grid with the standard three rows filled
    pub fn full() -> Self {
        let mut grid = Self::default();
        grid.refill();
        grid
    }

    /// Set every cell of the brick rows
    pub fn refill(&mut self) {
        for row in BRICK_ROWS {
            self.cells[row] = [true; GRID_SIZE];
        }
    }

    /// Brick at signed coordinates (off-board reads as empty)
    pub fn get(&self, y: i32, x: i32) -> bool {
        match (usize::try_from(y), usize::try_from(x)) {
            (Ok(y), Ok(x)) if y < GRID_SIZE && x < GRID_SIZE => self.cells[y][x],
            _ => false,
        }
    }

    /// Remove a brick, returning whether one was there
    pub fn clear(&mut self, y: i32, x: i32) -> bool {
        let hit = self.get(y, x);
        if hit {
            self.cells[y as usize][x as usize] = false;
        }
        hit
    }

    pub fn count(&self) -> usize {
        self.cells.iter().flatten().filter(|&&b| b).count()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().flatten().all(|&b| !b)
    }

    pub fn as_plane(&self) -> &Plane {
        &self.cells
    }
}

/// Everything that evolves during a Breakout episode (the RNG excepted)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakoutState {
    pub ball: IVec2,
    /// Diagonal velocity, each component ±1
    pub velocity: IVec2,
    /// Ball position before the last step (trail)
    pub last: IVec2,
    /// Paddle column on the bottom row
    pub paddle: i32,
    pub bricks: BrickGrid,
    pub terminal: bool,
}

impl BreakoutState {
    /// Start state for a ball entering at `x` moving horizontally by `dx`
    pub fn new(x: i32, dx: i32) -> Self {
        let ball = IVec2::new(x, BALL_START_Y);
        Self {
            ball,
            velocity: IVec2::new(dx, 1),
            last: ball,
            paddle: PADDLE_START,
            bricks: BrickGrid::full(),
            terminal: false,
        }
    }

    /// Move the ball one cell and resolve collisions, returning `(reward, terminal)`.
    ///
    /// Walls are resolved first, then exactly one of: ceiling, brick straight
    /// ahead, brick on the diagonal, bottom row.
    fn move_ball(&mut self) -> (u32, bool) {
        let IVec2 { x, y } = self.ball;
        let IVec2 { x: mut dx, y: mut dy } = self.velocity;
        let mut nx = x + dx;
        let mut ny = y + dy;
        let mut reward = 0;
        let mut terminal = false;

        // Side walls
        if nx < 0 {
            nx = 1;
            dx = -dx;
        } else if nx > GRID_MAX {
            nx = GRID_MAX - 1;
            dx = -dx;
        }

        if ny < 0 {
            ny = 0;
            dy = -dy;
        } else if self.bricks.clear(ny, x) {
            log::trace!("breakout brick ({ny}, {x}) cleared");
            reward = 1;
            nx = x;
            ny = y;
            dy = -dy;
        } else if self.bricks.clear(ny, nx) {
            log::trace!("breakout brick ({ny}, {nx}) cleared diagonally");
            reward = 1;
            nx = x;
            ny = y;
            dx = -dx;
            dy = -dy;
        } else if ny == GRID_MAX {
            if self.bricks.is_empty() {
                log::debug!("breakout board cleared, refilling bricks");
                self.bricks.refill();
            }
            if nx == self.paddle {
                dy = -dy;
                ny = y;
            } else if x == self.paddle {
                // Caught on the paddle's edge: bounce back the way it came
                dx = -dx;
                dy = -dy;
                ny = y;
            } else {
                terminal = true;
            }
        }

        self.ball = IVec2::new(nx, ny);
        self.velocity = IVec2::new(dx, dy);
        (reward, terminal)
    }

    fn render(&self) -> Observation {
        let mut obs = Observation::new();
        obs.set_at(CHANNEL_BALL, self.ball.y, self.ball.x);
        obs.set_at(CHANNEL_PADDLE, GRID_MAX, self.paddle);
        obs.set_at(CHANNEL_TRAIL, self.last.y, self.last.x);
        obs.copy_plane(CHANNEL_BRICK, self.bricks.as_plane());
        obs
    }
}

fn move_paddle(pos: i32, action: Action) -> i32 {
    match action {
        Action::Left => clamp_coord(pos - 1, 0, GRID_MAX),
        Action::Right => clamp_coord(pos + 1, 0, GRID_MAX),
        _ => pos,
    }
}

/// The Breakout game, owning its RNG
#[derive(Debug, Clone)]
pub struct Breakout<R = Pcg32> {
    state: BreakoutState,
    rng: R,
}

impl Breakout<Pcg32> {
    /// Create a game driven by a PCG generator seeded with `seed`
    pub fn from_seed(seed: u64) -> Self {
        Self::new(Pcg32::seed_from_u64(seed))
    }
}

impl<R: Rng> Breakout<R> {
    /// Create a game and draw its first start position from `rng`
    pub fn new(mut rng: R) -> Self {
        let state = Self::start_state(&mut rng);
        Self { state, rng }
    }

    fn start_state(rng: &mut R) -> BreakoutState {
        let (x, dx) = choice(&BALL_STARTS, rng);
        BreakoutState::new(x, dx)
    }

    /// Read-only view of the simulation state
    pub fn snapshot(&self) -> &BreakoutState {
        &self.state
    }

    /// The game's generator (shared with wrappers that need extra draws)
    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }
}

impl<R: Rng> Game for Breakout<R> {
    fn name(&self) -> &'static str {
        "breakout"
    }

    fn reset(&mut self) {
        self.state = Self::start_state(&mut self.rng);
    }

    fn step(&mut self, action: Action) -> (u32, bool) {
        if self.state.terminal {
            return (0, true);
        }

        self.state.paddle = move_paddle(self.state.paddle, action);
        self.state.last = self.state.ball;

        let (reward, terminal) = self.state.move_ball();
        self.state.terminal = terminal;
        (reward, terminal)
    }

    fn state(&self) -> Observation {
        self.state.render()
    }

    fn difficulty_ramp(&self) -> Option<u32> {
        None
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
