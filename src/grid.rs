use rand::Rng;

/// Number of cells needed to cover `extent` pixels at `cell_size` pixels per cell.
pub fn cells_for(extent: u32, cell_size: u32) -> usize {
    extent.div_ceil(cell_size.max(1)) as usize
}

/// Grid shape `(rows, cols)` covering a viewport of `width × height` pixels.
pub fn shape_for_viewport(width: u32, height: u32, cell_size: u32) -> (usize, usize) {
    (cells_for(height, cell_size), cells_for(width, cell_size))
}

/// Dense row-major cell grid. Cells are 0 (dead) or 1 (alive).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<u8>,
}

impl Grid {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![0; rows * cols],
        }
    }

    /// Fresh grid where every cell is alive with probability `density`.
    pub fn seeded<R: Rng + ?Sized>(rows: usize, cols: usize, density: f64, rng: &mut R) -> Self {
        let mut grid = Self::new(rows, cols);
        for cell in &mut grid.cells {
            *cell = seed_cell(density, rng);
        }
        grid
    }

    /// New grid of shape `rows × cols` that keeps the overlap with `old`
    /// and seeds every cell outside that overlap.
    pub fn resized_from<R: Rng + ?Sized>(
        old: &Grid,
        rows: usize,
        cols: usize,
        density: f64,
        rng: &mut R,
    ) -> Self {
        let copy_rows = old.rows.min(rows);
        let copy_cols = old.cols.min(cols);

        let mut grid = Self::new(rows, cols);
        for row in 0..rows {
            for col in 0..cols {
                let idx = row * cols + col;
                grid.cells[idx] = if row < copy_rows && col < copy_cols {
                    old.cells[old.index(row, col)]
                } else {
                    seed_cell(density, rng)
                };
            }
        }
        grid
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    #[cfg(test)]
    pub fn is_alive(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols && self.cells[self.index(row, col)] != 0
    }

    #[cfg(test)]
    pub fn set(&mut self, row: usize, col: usize, alive: bool) {
        if row < self.rows && col < self.cols {
            let idx = self.index(row, col);
            self.cells[idx] = alive as u8;
        }
    }

    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [u8] {
        &mut self.cells
    }

    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&c| c != 0).count()
    }

    /// Live cells among the 8 neighbours of `(row, col)`, wrapping on both axes.
    #[inline]
    pub fn live_neighbors(&self, row: usize, col: usize) -> u8 {
        let (rows, cols) = (self.rows, self.cols);
        let top = ((row + rows - 1) % rows) * cols;
        let middle = row * cols;
        let bottom = ((row + 1) % rows) * cols;
        let left = (col + cols - 1) % cols;
        let right = (col + 1) % cols;

        let c = &self.cells;
        c[top + left]
            + c[top + col]
            + c[top + right]
            + c[middle + left]
            + c[middle + right]
            + c[bottom + left]
            + c[bottom + col]
            + c[bottom + right]
    }

    /// Iterate over live cells as `(row, col)`.
    pub fn live_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &c)| c != 0)
            .map(move |(i, _)| (i / cols, i % cols))
    }
}

fn seed_cell<R: Rng + ?Sized>(density: f64, rng: &mut R) -> u8 {
    (rng.gen::<f64>() < density) as u8
}
