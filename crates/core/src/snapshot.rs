//! Render snapshot - what a host needs to draw one frame.

use crate::state::{ActivePiece, GameState};
use crate::types::{Cell, GameStatus, BOARD_HEIGHT, BOARD_WIDTH};

/// Composited grid type: locked cells with the active piece drawn over them
pub type Grid = [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    /// Board with the active piece overlaid (not merged into the state)
    pub grid: Grid,
    pub active: Option<ActivePiece>,
    pub score: u32,
    pub status: GameStatus,
}

impl GameSnapshot {
    pub fn from_state(state: &GameState) -> Self {
        let mut grid: Grid = [[None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
        for (row, cells) in state.board().rows().enumerate() {
            grid[row].copy_from_slice(cells);
        }

        let active = state.active();
        if let Some(piece) = active {
            for (row, col) in piece.cells() {
                if row >= 0 && row < BOARD_HEIGHT as i8 && col >= 0 && col < BOARD_WIDTH as i8 {
                    grid[row as usize][col as usize] = Some(piece.kind());
                }
            }
        }

        Self {
            grid,
            active,
            score: state.score(),
            status: state.status(),
        }
    }

    pub fn playable(&self) -> bool {
        self.status.is_running()
    }

    pub fn cell(&self, row: usize, col: usize) -> Cell {
        self.grid
            .get(row)
            .and_then(|r| r.get(col))
            .copied()
            .flatten()
    }

    /// One line per row: `.` for empty, the kind letter otherwise.
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity((BOARD_WIDTH as usize + 1) * BOARD_HEIGHT as usize);
        for row in &self.grid {
            for cell in row {
                match cell {
                    Some(kind) => out.push_str(&kind.as_str().to_uppercase()),
                    None => out.push('.'),
                }
            }
            out.push('\n');
        }
        out
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        GameState::new().snapshot()
    }
}
