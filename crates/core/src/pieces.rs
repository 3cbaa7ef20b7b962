//! Pieces module - shape catalog and matrix rotation
//!
//! Every piece is a small occupancy matrix (at most 4x4) tagged with its kind.
//! Rotation builds a new matrix; catalog shapes are never modified.

use crate::types::PieceKind;

/// Largest matrix side of any catalog shape (the I bar)
pub const MAX_SHAPE_DIM: usize = 4;

/// Occupancy matrix of a piece plus its color tag.
///
/// Cells outside `rows x cols` are always empty, so two shapes compare equal
/// exactly when their visible matrices match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    kind: PieceKind,
    rows: u8,
    cols: u8,
    cells: [[bool; MAX_SHAPE_DIM]; MAX_SHAPE_DIM],
}

impl Shape {
    /// Canonical catalog shape for a kind
    pub fn of(kind: PieceKind) -> Self {
        match kind {
            PieceKind::I => Self::from_rows(kind, &[&[1, 1, 1, 1]]),
            PieceKind::O => Self::from_rows(kind, &[&[1, 1], &[1, 1]]),
            PieceKind::T => Self::from_rows(kind, &[&[0, 1, 0], &[1, 1, 1]]),
            PieceKind::S => Self::from_rows(kind, &[&[1, 1, 0], &[0, 1, 1]]),
            PieceKind::Z => Self::from_rows(kind, &[&[0, 1, 1], &[1, 1, 0]]),
            PieceKind::J => Self::from_rows(kind, &[&[1, 0, 0], &[1, 1, 1]]),
            PieceKind::L => Self::from_rows(kind, &[&[0, 0, 1], &[1, 1, 1]]),
        }
    }

    /// Build a shape from rows of 0/1 values.
    ///
    /// Rows must be non-empty, rectangular and at most 4x4; catalog data is
    /// the only caller.
    fn from_rows(kind: PieceKind, rows: &[&[u8]]) -> Self {
        debug_assert!(!rows.is_empty() && rows.len() <= MAX_SHAPE_DIM);
        let cols = rows[0].len();
        debug_assert!(rows.iter().all(|r| r.len() == cols) && cols <= MAX_SHAPE_DIM);

        let mut cells = [[false; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
        for (r, row) in rows.iter().enumerate() {
            for (c, &v) in row.iter().enumerate() {
                cells[r][c] = v != 0;
            }
        }
        Self {
            kind,
            rows: rows.len() as u8,
            cols: cols as u8,
            cells,
        }
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    /// Matrix height
    pub fn rows(&self) -> u8 {
        self.rows
    }

    /// Matrix width
    pub fn cols(&self) -> u8 {
        self.cols
    }

    /// Whether the matrix cell at (row, col) is occupied. Out of range is empty.
    pub fn is_filled(&self, row: usize, col: usize) -> bool {
        row < self.rows as usize && col < self.cols as usize && self.cells[row][col]
    }

    /// Offsets `(d_row, d_col)` of occupied cells, row-major
    pub fn filled_cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        (0..self.rows as usize).flat_map(move |r| {
            (0..self.cols as usize)
                .filter(move |&c| self.cells[r][c])
                .map(move |c| (r as i8, c as i8))
        })
    }

    /// Rotate 90° clockwise.
    ///
    /// `rotated[i][j] = self[rows - 1 - j][i]`; a non-square matrix swaps its
    /// dimensions.
    pub fn rotated_cw(&self) -> Self {
        let rows = self.rows as usize;
        let cols = self.cols as usize;
        let mut cells = [[false; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
        for (i, out_row) in cells.iter_mut().enumerate().take(cols) {
            for (j, out) in out_row.iter_mut().enumerate().take(rows) {
                *out = self.cells[rows - 1 - j][i];
            }
        }
        Self {
            kind: self.kind,
            rows: self.cols,
            cols: self.rows,
            cells,
        }
    }

    /// Number of occupied cells (4 for every catalog shape)
    pub fn cell_count(&self) -> usize {
        self.filled_cells().count()
    }
}

/// Catalog shape for a kind (free-function form of [`Shape::of`])
pub fn get_shape(kind: PieceKind) -> Shape {
    Shape::of(kind)
}
