use crate::grid::Grid;

/// B3/S23 transition for a single cell.
#[inline]
pub fn next_state(alive: bool, neighbors: u8) -> bool {
    matches!((alive, neighbors), (true, 2) | (true, 3) | (false, 3))
}

/// Live grid plus the scratch buffer the next generation is built in.
#[derive(Debug, Clone)]
pub struct Life {
    grid: Grid,
    scratch: Vec<u8>,
    generation: u64,
}

impl Life {
    pub fn new(grid: Grid) -> Self {
        let scratch = vec![0; grid.len()];
        Self {
            grid,
            scratch,
            generation: 0,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Swap in a reallocated grid. The scratch buffer follows the new shape.
    pub fn replace_grid(&mut self, grid: Grid) {
        self.scratch = vec![0; grid.len()];
        self.grid = grid;
    }

    /// Advance one generation. Every cell is computed from the current grid
    /// into scratch before anything is written back.
    pub fn step(&mut self) {
        let (rows, cols) = self.grid.shape();
        if self.grid.is_empty() {
            return;
        }

        for row in 0..rows {
            for col in 0..cols {
                let idx = row * cols + col;
                let alive = self.grid.cells()[idx] != 0;
                let neighbors = self.grid.live_neighbors(row, col);
                self.scratch[idx] = next_state(alive, neighbors) as u8;
            }
        }

        self.grid.cells_mut().copy_from_slice(&self.scratch);
        self.generation += 1;
    }
}
