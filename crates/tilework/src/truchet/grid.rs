//! Grid synthesis: one boolean state per cell.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{GridParams, GridPattern, automaton};
use crate::geometry::Point;

/// Largest grid [`synthesize`] will fill.
pub const MAX_CELLS: usize = 1 << 24;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CheckerboardParams {
    /// Block edge length in cells; 0 behaves like 1
    pub size: usize,
}

impl Default for CheckerboardParams {
    fn default() -> Self {
        Self { size: 1 }
    }
}

/// Cell states laid out row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    pub width: f64,
    pub height: f64,
    pub spacing: f64,
    pub rows: usize,
    pub cols: usize,
    pub states: Vec<bool>,
}

/// One cell of a [`Grid`] with its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridCell {
    pub row: usize,
    pub col: usize,
    pub origin: Point,
    pub state: bool,
}

impl Grid {
    pub fn empty(params: &GridParams) -> Self {
        Self {
            width: params.width,
            height: params.height,
            spacing: params.spacing,
            rows: 0,
            cols: 0,
            states: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn state(&self, row: usize, col: usize) -> Option<bool> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.states.get(row * self.cols + col).copied()
    }

    /// Cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = GridCell> + '_ {
        self.states.iter().enumerate().map(move |(i, &state)| {
            let row = i / self.cols;
            let col = i % self.cols;
            GridCell {
                row,
                col,
                origin: Point::new(col as f64 * self.spacing, row as f64 * self.spacing),
                state,
            }
        })
    }
}

/// Rows and columns needed to cover `width` x `height` at `spacing`.
///
/// Returns `None` for non-positive or non-finite input, and when the grid
/// would need more than [`MAX_CELLS`] cells.
pub fn dimensions(width: f64, height: f64, spacing: f64) -> Option<(usize, usize)> {
    let valid = |v: f64| v.is_finite() && v > 0.0;
    if !(valid(width) && valid(height) && valid(spacing)) {
        return None;
    }
    // Float to int casts saturate, so overflow shows up in the product.
    let rows = (height / spacing).ceil() as usize;
    let cols = (width / spacing).ceil() as usize;
    match rows.checked_mul(cols) {
        Some(n) if n <= MAX_CELLS => Some((rows, cols)),
        _ => None,
    }
}

/// Produce the cell states for `params`.
pub fn synthesize<R: Rng + ?Sized>(params: &GridParams, rng: &mut R) -> Grid {
    let Some((rows, cols)) = dimensions(params.width, params.height, params.spacing) else {
        tracing::warn!(
            width = params.width,
            height = params.height,
            spacing = params.spacing,
            "grid is empty or too large; no cells"
        );
        return Grid::empty(params);
    };

    let states = match params.pattern {
        GridPattern::Checkerboard => checkerboard(params.checkerboard.size, rows, cols),
        GridPattern::Eac => automaton::run(&params.eac, rows, cols, rng),
        GridPattern::Random => (0..rows * cols).map(|_| rng.random::<f64>() > 0.5).collect(),
    };
    if states.len() != rows * cols {
        return Grid::empty(params);
    }

    Grid {
        width: params.width,
        height: params.height,
        spacing: params.spacing,
        rows,
        cols,
        states,
    }
}

/// Blocks of `size` x `size` cells, the first block clear.
fn checkerboard(size: usize, rows: usize, cols: usize) -> Vec<bool> {
    let size = size.max(1);
    let mut states = Vec::with_capacity(rows * cols);

    let mut row_start = false;
    let mut i = 0;
    for _ in 0..rows {
        let mut state = row_start;
        i += 1;
        if i >= size {
            row_start = !row_start;
            i = 0;
        }

        let mut j = 0;
        for _ in 0..cols {
            states.push(state);
            j += 1;
            if j >= size {
                state = !state;
                j = 0;
            }
        }
    }
    states
}
