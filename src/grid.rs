use std::hash::Hash;
use std::hash::Hasher;

use thiserror::Error;

use crate::rules;

/// Name given to grids that weren't read from a file.
pub const DEFAULT_NAME: &str = "Unnamed Board";

/// Offsets of the 8 cells surrounding a cell, as `(row, col)`.
const NEIGHBORHOOD: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

#[derive(Error, Debug, PartialEq, Eq)]
pub enum GridError {
    #[error("Invalid dimensions {rows}x{cols}: grids need at least one row and one column")]
    InvalidDimension { rows: usize, cols: usize },

    #[error("Expected {expected} cells for a {rows}x{cols} grid, found {found}")]
    CellCount {
        rows: usize,
        cols: usize,
        expected: usize,
        found: usize,
    },

    #[error("Cell ({row}, {col}) is out of bounds for a {rows}x{cols} grid")]
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
}

/// A fixed size rectangle of live and dead cells.
///
/// Cells are stored row-major. A `Grid` is never modified once built: stepping the simulation
/// with [`Grid::next_generation`] allocates a fresh grid.
///
/// Equality only looks at the dimensions and the cells. The name is a display label.
#[derive(Debug, Clone)]
pub struct Grid {
    name: String,
    rows: usize,
    cols: usize,
    cells: Vec<bool>,
}

impl Grid {
    /// Create an all-dead grid
    pub fn new(rows: usize, cols: usize) -> Result<Self, GridError> {
        Ok(Self {
            name: DEFAULT_NAME.to_string(),
            rows,
            cols,
            cells: Self::dead_cells(rows, cols)?,
        })
    }

    /// Create a grid from row-major `cells`, which must hold exactly `rows * cols` entries.
    pub fn from_cells(
        name: impl Into<String>,
        rows: usize,
        cols: usize,
        cells: Vec<bool>,
    ) -> Result<Self, GridError> {
        let n = Self::cell_count(rows, cols)?;

        if cells.len() != n {
            return Err(GridError::CellCount {
                rows,
                cols,
                expected: n,
                found: cells.len(),
            });
        }

        Ok(Self {
            name: name.into(),
            rows,
            cols,
            cells,
        })
    }

    fn cell_count(rows: usize, cols: usize) -> Result<usize, GridError> {
        if rows == 0 || cols == 0 {
            return Err(GridError::InvalidDimension { rows, cols });
        }

        match rows.checked_mul(cols) {
            Some(n) if n <= isize::MAX as usize => Ok(n),
            _ => Err(GridError::InvalidDimension { rows, cols }),
        }
    }

    /// Allocate `rows * cols` dead cells. Sizes the allocator can't satisfy are
    /// `InvalidDimension`.
    pub(crate) fn dead_cells(rows: usize, cols: usize) -> Result<Vec<bool>, GridError> {
        let n = Self::cell_count(rows, cols)?;

        let mut cells = Vec::new();
        cells
            .try_reserve_exact(n)
            .map_err(|_| GridError::InvalidDimension { rows, cols })?;
        cells.resize(n, false);

        Ok(cells)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the same grid under a different name
    pub fn with_name(self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Whether the cell at `(row, col)` is alive.
    pub fn cell_at(&self, row: usize, col: usize) -> Result<bool, GridError> {
        self.check_bounds(row, col)?;

        Ok(self.cells[self.xy_from(row, col)])
    }

    /// Number of live cells in the grid
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    /// Number of live cells among the 8 cells around `(row, col)`. Cells past the edge of the
    /// grid count as dead.
    pub fn live_neighbors(&self, row: usize, col: usize) -> Result<u8, GridError> {
        self.check_bounds(row, col)?;

        Ok(self.count_neighbors(row, col))
    }

    /// Compute the next generation under B3/S23.
    ///
    /// Every count is taken against `self`, and the result is written to a new buffer, so the
    /// two generations never alias.
    pub fn next_generation(&self) -> Grid {
        let mut cells = vec![false; self.cells.len()];

        for (n, cell) in cells.iter_mut().enumerate() {
            let (row, col) = self.xy_to(n);
            let neighbors = self.count_neighbors(row, col);

            *cell = rules::next_state(self.cells[n], neighbors);
        }

        Grid {
            name: self.name.clone(),
            rows: self.rows,
            cols: self.cols,
            cells,
        }
    }

    /// Cell for cell comparison. Grids of different dimensions are never equal.
    pub fn equals(&self, other: &Grid) -> bool {
        self == other
    }

    /// Iterate over the rows of the grid, top to bottom
    pub fn iter_rows(&self) -> impl Iterator<Item = &[bool]> {
        self.cells.chunks_exact(self.cols)
    }

    fn count_neighbors(&self, row: usize, col: usize) -> u8 {
        let mut n = 0;

        for (dr, dc) in NEIGHBORHOOD {
            let (Some(r), Some(c)) = (row.checked_add_signed(dr), col.checked_add_signed(dc))
            else {
                continue;
            };

            if r < self.rows && c < self.cols && self.cells[self.xy_from(r, c)] {
                n += 1;
            }
        }

        n
    }

    fn check_bounds(&self, row: usize, col: usize) -> Result<(), GridError> {
        if row >= self.rows || col >= self.cols {
            return Err(GridError::OutOfBounds {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }

        Ok(())
    }

    fn xy_to(&self, n: usize) -> (usize, usize) {
        (n / self.cols, n % self.cols)
    }

    fn xy_from(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }
}

impl PartialEq for Grid {
    fn eq(&self, other: &Self) -> bool {
        self.rows == other.rows && self.cols == other.cols && self.cells == other.cells
    }
}

impl Eq for Grid {}

impl Hash for Grid {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rows.hash(state);
        self.cols.hash(state);
        self.cells.hash(state);
    }
}
