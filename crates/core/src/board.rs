//! Board module - the committed grid and the collision authority
//!
//! The board is a 10x20 grid where each cell is empty or holds the kind (and
//! so the color) of the piece that locked there. Storage is a flat row-major
//! array, so a `Board` is `Copy` and every transition can work on a fresh
//! value without touching the previous one.
//!
//! Coordinates are `(row, col)`: row 0 is the top, col 0 the left edge.
//! Rows above the board (negative) are legal during spawn and always empty.

use crate::pieces::Shape;
use crate::types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
pub const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

const WIDTH: usize = BOARD_WIDTH as usize;
const HEIGHT: usize = BOARD_HEIGHT as usize;

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    /// Flat array of cells, row-major order (row * WIDTH + col)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    #[inline(always)]
    fn index(row: i8, col: i8) -> Option<usize> {
        if row < 0 || row >= BOARD_HEIGHT as i8 || col < 0 || col >= BOARD_WIDTH as i8 {
            return None;
        }
        Some((row as usize) * WIDTH + (col as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at (row, col); `None` if out of bounds
    pub fn get(&self, row: i8, col: i8) -> Option<Cell> {
        Self::index(row, col).map(|idx| self.cells[idx])
    }

    /// Set cell at (row, col). Returns false if out of bounds.
    pub fn set(&mut self, row: i8, col: i8, cell: Cell) -> bool {
        match Self::index(row, col) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Fill every cell of a row with one kind
    pub fn fill_row(&mut self, row: usize, kind: PieceKind) {
        if row < HEIGHT {
            self.cells[row * WIDTH..(row + 1) * WIDTH].fill(Some(kind));
        }
    }

    /// Check if position is within bounds and filled
    pub fn is_occupied(&self, row: i8, col: i8) -> bool {
        matches!(self.get(row, col), Some(Some(_)))
    }

    /// Check if a row has no empty cell
    pub fn is_row_full(&self, row: usize) -> bool {
        row < HEIGHT && self.row(row).iter().all(|cell| cell.is_some())
    }

    /// One row of cells, left to right
    pub fn row(&self, row: usize) -> &[Cell] {
        &self.cells[row * WIDTH..(row + 1) * WIDTH]
    }

    /// Rows from top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks_exact(WIDTH)
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of filled cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Whether `shape` anchored at (row, col) fits.
    ///
    /// Fails when an occupied shape cell leaves the columns `[0, width)`,
    /// reaches row `height` or below, or lands on a filled cell. Cells above
    /// the top edge are treated as empty.
    pub fn can_place(&self, shape: &Shape, row: i8, col: i8) -> bool {
        shape.filled_cells().all(|(dr, dc)| {
            let r = row as i16 + dr as i16;
            let c = col as i16 + dc as i16;
            if c < 0 || c >= BOARD_WIDTH as i16 || r >= BOARD_HEIGHT as i16 {
                return false;
            }
            r < 0 || self.cells[(r as usize) * WIDTH + c as usize].is_none()
        })
    }

    /// Copy of this board with `shape` written in at (row, col).
    ///
    /// Cells above the top edge are dropped. Callers check [`Board::can_place`]
    /// first; out-of-range cells are skipped rather than wrapped.
    pub fn merged(&self, shape: &Shape, row: i8, col: i8) -> Board {
        let mut next = *self;
        for (dr, dc) in shape.filled_cells() {
            let r = row.saturating_add(dr);
            if r < 0 {
                continue;
            }
            next.set(r, col.saturating_add(dc), Some(shape.kind()));
        }
        next
    }

    /// Copy of this board with every full row removed and the same number of
    /// empty rows added on top. Returns the new board and the cleared count.
    ///
    /// Non-full rows keep their relative order. Two-pointer pass, bottom up.
    pub fn cleared_full_rows(&self) -> (Board, usize) {
        let mut next = *self;
        let mut write_row = HEIGHT;

        for read_row in (0..HEIGHT).rev() {
            if self.is_row_full(read_row) {
                continue;
            }
            write_row -= 1;
            if write_row != read_row {
                let src = read_row * WIDTH;
                next.cells.copy_within(src..src + WIDTH, write_row * WIDTH);
            }
        }

        next.cells[..write_row * WIDTH].fill(None);
        (next, write_row)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
