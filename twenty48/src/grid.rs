use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Width and height of the playing field.
pub const GRID_SIZE: usize = 4;

/// The 4x4 playing field.
///
/// Every cell holds either 0 (empty) or a power of two. Equality is
/// cell-by-cell value comparison, which is how the engine detects whether
/// a move had any effect.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    cells: [[u32; GRID_SIZE]; GRID_SIZE],
}

impl Grid {
    /// A grid with every cell empty.
    pub fn empty() -> Self {
        Grid {
            cells: [[0; GRID_SIZE]; GRID_SIZE],
        }
    }

    /// Creates a grid from explicit cell values, row-major.
    pub fn from_cells(cells: [[u32; GRID_SIZE]; GRID_SIZE]) -> Self {
        Grid { cells }
    }

    pub fn cells(&self) -> &[[u32; GRID_SIZE]; GRID_SIZE] {
        &self.cells
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [[u32; GRID_SIZE]; GRID_SIZE] {
        &mut self.cells
    }

    pub fn get(&self, row: usize, col: usize) -> u32 {
        self.cells[row][col]
    }

    pub fn is_empty_at(&self, row: usize, col: usize) -> bool {
        self.cells[row][col] == 0
    }

    /// The coordinates of all empty cells, in row-major order.
    pub fn empty_cells(&self) -> Vec<(usize, usize)> {
        let mut empty = Vec::new();
        for (i, row) in self.cells.iter().enumerate() {
            for (j, &value) in row.iter().enumerate() {
                if value == 0 {
                    empty.push((i, j));
                }
            }
        }
        empty
    }

    /// The largest value currently on the grid.
    pub fn max_value(&self) -> u32 {
        self.cells.iter().flatten().copied().max().unwrap_or(0)
    }

    /// Clears the grid and seeds it with two starting tiles.
    pub fn reset(&mut self, rng: &mut StdRng) {
        self.cells = [[0; GRID_SIZE]; GRID_SIZE];
        self.spawn_tile(rng);
        self.spawn_tile(rng);
    }

    /// Places a new tile into a uniformly chosen empty cell: a 2 with
    /// probability 0.9, else a 4. On a full grid this does nothing.
    pub fn spawn_tile(&mut self, rng: &mut StdRng) {
        if let Some(&(i, j)) = self.empty_cells().choose(rng) {
            self.cells[i][j] = if rng.gen_bool(0.9) { 2 } else { 4 };
        }
    }

    /// Remaps the grid a quarter turn clockwise: `new[i][j] = old[N-1-j][i]`.
    ///
    /// Four applications return the grid to its original orientation exactly.
    pub fn rotate_clockwise(&mut self) {
        let old = self.cells;
        for i in 0..GRID_SIZE {
            for j in 0..GRID_SIZE {
                self.cells[i][j] = old[GRID_SIZE - 1 - j][i];
            }
        }
    }

    /// Is there any legal move left?
    ///
    /// True if any cell is empty, or if any cell equals its right or bottom
    /// neighbor. The scan covers the boundary row and column as well.
    pub fn has_moves(&self) -> bool {
        if !self.empty_cells().is_empty() {
            return true;
        }
        for i in 0..GRID_SIZE {
            for j in 0..GRID_SIZE {
                let value = self.cells[i][j];
                if j + 1 < GRID_SIZE && self.cells[i][j + 1] == value {
                    return true;
                }
                if i + 1 < GRID_SIZE && self.cells[i + 1][j] == value {
                    return true;
                }
            }
        }
        false
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::empty()
    }
}
