//! Game state module - one immutable value per moment of play
//!
//! [`GameState`] bundles board, active piece, score and status. Every
//! transition returns a whole new value and leaves `self` alone, so a failed
//! move is simply "no new state" and tests compare before/after snapshots
//! directly.

use crate::board::Board;
use crate::pieces::Shape;
use crate::snapshot::GameSnapshot;
use crate::types::{GameStatus, PieceKind, BOARD_WIDTH, POINTS_PER_LINE};

/// The piece currently under control.
///
/// `row`/`col` anchor the top-left corner of the shape's bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub shape: Shape,
    pub row: i8,
    pub col: i8,
}

impl ActivePiece {
    /// Catalog shape at the spawn anchor: row 0, horizontally centered
    pub fn spawn(kind: PieceKind) -> Self {
        let shape = Shape::of(kind);
        Self {
            shape,
            row: 0,
            col: (BOARD_WIDTH / 2) as i8 - (shape.cols() / 2) as i8,
        }
    }

    pub fn kind(&self) -> PieceKind {
        self.shape.kind()
    }

    /// Whether this piece fits on `board` where it stands
    pub fn fits(&self, board: &Board) -> bool {
        board.can_place(&self.shape, self.row, self.col)
    }

    /// Absolute (row, col) of every occupied cell, including rows above the board
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.shape
            .filled_cells()
            .map(move |(dr, dc)| (self.row + dr, self.col + dc))
    }

    fn shifted(&self, d_row: i8, d_col: i8) -> Self {
        Self {
            row: self.row + d_row,
            col: self.col + d_col,
            ..*self
        }
    }

    fn rotated(&self) -> Self {
        Self {
            shape: self.shape.rotated_cw(),
            ..*self
        }
    }
}

/// Result of a one-row drop attempt (soft drop or gravity tick)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DropOutcome {
    /// Nothing to drop: no active piece, or the game is not running
    Ignored,
    /// The piece moved down one row
    Moved,
    /// The piece could not move and was merged into the board
    Locked { lines_cleared: u32 },
}

/// Complete engine state: board, active piece, score and status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameState {
    board: Board,
    active: Option<ActivePiece>,
    score: u32,
    status: GameStatus,
}

impl GameState {
    /// Empty board, no piece, `NotStarted`
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            active: None,
            score: 0,
            status: GameStatus::NotStarted,
        }
    }

    /// Fresh running game with `kind` spawned (or already over if it cannot spawn).
    pub fn started(kind: PieceKind) -> Self {
        Self {
            status: GameStatus::Running,
            ..Self::new()
        }
        .spawned(kind)
    }

    /// Assemble a state from parts, e.g. a prepared board for a puzzle or a test.
    ///
    /// The active piece is taken as given; callers are expected to pass one that fits.
    pub fn from_parts(
        board: Board,
        active: Option<ActivePiece>,
        score: u32,
        status: GameStatus,
    ) -> Self {
        let active = if status.is_running() { active } else { None };
        Self {
            board,
            active,
            score,
            status,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status.is_running()
    }

    /// Running with no active piece: a lock happened and the next spawn is due
    pub fn awaiting_spawn(&self) -> bool {
        self.is_running() && self.active.is_none()
    }

    /// Place a new `kind` piece at the spawn anchor.
    ///
    /// A blocked spawn ends the game: status becomes `GameOver` and no piece is
    /// set. Only valid while running with no active piece; otherwise `self` is
    /// returned unchanged.
    pub fn spawned(&self, kind: PieceKind) -> Self {
        if !self.awaiting_spawn() {
            return *self;
        }
        let piece = ActivePiece::spawn(kind);
        if piece.fits(&self.board) {
            Self {
                active: Some(piece),
                ..*self
            }
        } else {
            Self {
                active: None,
                status: GameStatus::GameOver,
                ..*self
            }
        }
    }

    /// Shift the active piece sideways. `None` if illegal or not running.
    pub fn translated(&self, d_col: i8) -> Option<Self> {
        let moved = self.playable_piece()?.shifted(0, d_col);
        self.with_piece_if_fits(moved)
    }

    /// Rotate the active piece clockwise in place, without wall kicks.
    pub fn rotated(&self) -> Option<Self> {
        let turned = self.playable_piece()?.rotated();
        self.with_piece_if_fits(turned)
    }

    /// Drop the active piece one row, locking it if it cannot move.
    ///
    /// Lock merges the piece into the board, clears full rows and adds
    /// `POINTS_PER_LINE` per cleared row. The returned state has no active
    /// piece; spawning the next one is up to the caller.
    pub fn dropped(&self) -> (Self, DropOutcome) {
        let Some(piece) = self.playable_piece() else {
            return (*self, DropOutcome::Ignored);
        };

        if let Some(next) = self.with_piece_if_fits(piece.shifted(1, 0)) {
            return (next, DropOutcome::Moved);
        }

        let merged = self.board.merged(&piece.shape, piece.row, piece.col);
        let (board, cleared) = merged.cleared_full_rows();
        let lines_cleared = cleared as u32;
        let next = Self {
            board,
            active: None,
            score: self
                .score
                .saturating_add(lines_cleared.saturating_mul(POINTS_PER_LINE)),
            status: self.status,
        };
        (next, DropOutcome::Locked { lines_cleared })
    }

    /// Read-only view for rendering, with the active piece composited on top
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::from_state(self)
    }

    fn playable_piece(&self) -> Option<ActivePiece> {
        if self.is_running() {
            self.active
        } else {
            None
        }
    }

    fn with_piece_if_fits(&self, piece: ActivePiece) -> Option<Self> {
        piece.fits(&self.board).then(|| Self {
            active: Some(piece),
            ..*self
        })
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
