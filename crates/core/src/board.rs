//! Board module - the grid of settled blocks
//!
//! The board is a 10x20 grid where each cell is empty or holds the kind of the
//! piece that left a block there. Storage is a flat row-major array, created
//! empty and never resized.
//!
//! Coordinates: (x, y) with x in 0..10 (left to right) and y in 0..20 (top to
//! bottom). Every grid access goes through a range check; an out-of-range
//! coordinate can never index the array.
//!
//! Placement rule: a piece is valid only if all four of its cells are inside
//! the grid and empty. There are no hidden rows above the top edge, so a cell
//! with y < 0 is rejected just like one past the floor.

use arrayvec::ArrayVec;

use crate::tetromino::Tetromino;
use crate::types::{Cell, BOARD_HEIGHT, BOARD_WIDTH};

const WIDTH: usize = BOARD_WIDTH as usize;
const HEIGHT: usize = BOARD_HEIGHT as usize;

/// Total number of cells on the board
const BOARD_SIZE: usize = WIDTH * HEIGHT;

/// Row indices removed by one clear, top to bottom.
pub type ClearedRows = ArrayVec<usize, HEIGHT>;

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if Self::in_bounds(x, y) {
            Some((y as usize) * WIDTH + (x as usize))
        } else {
            None
        }
    }

    #[inline(always)]
    fn in_bounds(x: i8, y: i8) -> bool {
        x >= 0 && (x as usize) < WIDTH && y >= 0 && (y as usize) < HEIGHT
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// In bounds and empty.
    pub fn is_cell_free(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(None))
    }

    /// In bounds and filled.
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Whether every cell of `piece` is inside the grid and unoccupied.
    pub fn is_valid_position(&self, piece: &Tetromino) -> bool {
        piece
            .coords()
            .iter()
            .all(|&(x, y)| self.is_cell_free(x, y))
    }

    /// Write the piece's kind into each of its four cells.
    ///
    /// The position must be valid; if it is not, nothing is written and
    /// `false` is returned.
    pub fn merge(&mut self, piece: &Tetromino) -> bool {
        if !self.is_valid_position(piece) {
            return false;
        }
        for (x, y) in piece.coords() {
            self.set(x, y, Some(piece.kind));
        }
        true
    }

    fn row(&self, y: usize) -> &[Cell] {
        let start = y * WIDTH;
        &self.cells[start..start + WIDTH]
    }

    /// Rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks_exact(WIDTH)
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        y < HEIGHT && self.row(y).iter().all(|cell| cell.is_some())
    }

    /// Check if a row has no blocks at all (false when out of range)
    pub fn row_is_empty(&self, y: usize) -> bool {
        y < HEIGHT && self.row(y).iter().all(|cell| cell.is_none())
    }

    /// Indices of all full rows, top to bottom.
    pub fn filled_rows(&self) -> ClearedRows {
        (0..HEIGHT).filter(|&y| self.is_row_full(y)).collect()
    }

    /// Remove every full row in one pass and compact the rest downward.
    ///
    /// Rows above a removed row drop by the number of removed rows beneath
    /// them, and that many empty rows appear at the top. Returns the removed
    /// row indices (as they were before the clear), top to bottom. After this
    /// call no full row remains.
    pub fn clear_full_rows(&mut self) -> ClearedRows {
        let mut cleared = ClearedRows::new();
        let mut write_y = HEIGHT;

        // Two pointers, bottom-up: kept rows are copied down to write_y.
        for read_y in (0..HEIGHT).rev() {
            if self.is_row_full(read_y) {
                cleared.push(read_y);
                continue;
            }
            write_y -= 1;
            if write_y != read_y {
                let src = read_y * WIDTH;
                self.cells.copy_within(src..src + WIDTH, write_y * WIDTH);
            }
        }

        self.cells[..write_y * WIDTH].fill(None);

        cleared.reverse();
        cleared
    }

    /// Clear full rows and report how many went, as one event.
    pub fn clear_lines(&mut self) -> usize {
        self.clear_full_rows().len()
    }

    pub fn count_filled_cells(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Topmost row holding any block, or None for an empty board.
    pub fn highest_filled_row(&self) -> Option<usize> {
        (0..HEIGHT).find(|&y| !self.row_is_empty(y))
    }

    /// Whether the stack has reached the top row.
    pub fn top_row_occupied(&self) -> bool {
        !self.row_is_empty(0)
    }

    /// Get a reference to the internal cells array (row-major)
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
