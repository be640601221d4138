//! Grid cursor for keyboard card selection.

use crate::types::{Direction, GRID_COLUMNS, GRID_ROWS};

/// Highlighted cell on the card grid. Moves clamp at the edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GridCursor {
    row: usize,
    col: usize,
}

impl GridCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn col(&self) -> usize {
        self.col
    }

    /// Deck position under the cursor (row-major)
    pub fn position(&self) -> usize {
        self.row * GRID_COLUMNS + self.col
    }

    pub fn move_by(&mut self, direction: Direction) {
        match direction {
            Direction::Up => self.row = self.row.saturating_sub(1),
            Direction::Down => self.row = (self.row + 1).min(GRID_ROWS - 1),
            Direction::Left => self.col = self.col.saturating_sub(1),
            Direction::Right => self.col = (self.col + 1).min(GRID_COLUMNS - 1),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
