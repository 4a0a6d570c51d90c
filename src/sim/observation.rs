//! Multi-channel boolean occupancy grid
//!
//! Layout is channel-major: `cells[channel][row][column]`.

use serde::{Deserialize, Serialize};

use crate::consts::{GRID_SIZE, N_CHANNELS};

/// One channel of the grid, indexed `[row][column]`
pub type Plane = [[bool; GRID_SIZE]; GRID_SIZE];

/// Rendered game state handed to agents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Observation {
    cells: [Plane; N_CHANNELS],
}

impl Observation {
    /// An all-false grid
    pub fn new() -> Self {
        Self::default()
    }

    /// `[channels, rows, columns]`
    pub fn shape(&self) -> [usize; 3] {
        [N_CHANNELS, GRID_SIZE, GRID_SIZE]
    }

    /// Read one cell. Out-of-range indices read as false.
    pub fn get(&self, channel: usize, y: usize, x: usize) -> bool {
        self.cells
            .get(channel)
            .and_then(|plane| plane.get(y))
            .and_then(|row| row.get(x))
            .copied()
            .unwrap_or(false)
    }

    /// Mark one cell as occupied
    ///
    /// # Panics
    /// Panics if any index is out of range.
    pub fn set(&mut self, channel: usize, y: usize, x: usize) {
        self.cells[channel][y][x] = true;
    }

    /// Mark a cell from signed grid coordinates, ignoring off-board cells
    pub(crate) fn set_at(&mut self, channel: usize, y: i32, x: i32) {
        if let (Ok(y), Ok(x)) = (usize::try_from(y), usize::try_from(x))
            && y < GRID_SIZE
            && x < GRID_SIZE
        {
            self.cells[channel][y][x] = true;
        }
    }

    /// Overwrite a whole channel
    pub(crate) fn copy_plane(&mut self, channel: usize, plane: &Plane) {
        self.cells[channel] = *plane;
    }

    pub fn channel(&self, channel: usize) -> &Plane {
        &self.cells[channel]
    }

    /// Number of set cells in a channel
    pub fn count(&self, channel: usize) -> usize {
        self.cells[channel]
            .iter()
            .flatten()
            .filter(|&&cell| cell)
            .count()
    }

    /// Flatten to channel-major 0/1 bytes
    pub fn to_flat(&self) -> Vec<u8> {
        self.cells
            .iter()
            .flatten()
            .flatten()
            .map(|&cell| u8::from(cell))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get() {
        let mut obs = Observation::new();
        obs.set(2, 9, 0);
        assert!(obs.get(2, 9, 0));
        assert!(!obs.get(2, 0, 9));
        assert!(!obs.get(7, 0, 0));
        assert_eq!(obs.count(2), 1);
        assert_eq!(obs.count(0), 0);
    }

    #[test]
    fn test_set_at_ignores_off_board() {
        let mut obs = Observation::new();
        obs.set_at(1, -1, 3);
        obs.set_at(1, 3, 10);
        obs.set_at(1, 10, 3);
        obs.set_at(1, 3, -1);
        assert_eq!(obs.count(1), 0);
        obs.set_at(1, 3, 9);
        assert!(obs.get(1, 3, 9));
    }

    #[test]
    fn test_flat_layout() {
        let mut obs = Observation::new();
        obs.set(1, 2, 3);
        let flat = obs.to_flat();
        assert_eq!(obs.shape(), [N_CHANNELS, GRID_SIZE, GRID_SIZE]);
        assert_eq!(flat.len(), obs.shape().iter().product::<usize>());
        let idx = GRID_SIZE * GRID_SIZE + 2 * GRID_SIZE + 3;
        assert_eq!(flat[idx], 1);
        assert_eq!(flat.iter().map(|&b| b as usize).sum::<usize>(), 1);
    }
}
