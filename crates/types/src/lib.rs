//! Core types module - shared data structures and constants
//!
//! Pure data with no dependencies, shared by the engine, the input layer and
//! the terminal view.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9, left to right)
//! - **Height**: 20 rows (indexed 0-19, top to bottom)
//! - **Cell size**: 15 surface units per cell, for hosts that size a canvas
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds and are defaults, not rules; hosts may
//! override them through the engine's `Timing`.
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `GRAVITY_INTERVAL_MS` | 500 | One automatic drop per interval |
//! | `SPAWN_DELAY_MS` | 100 | Pause between a lock and the next spawn |
//!
//! # Examples
//!
//! ```
//! use block_game_types::{GameAction, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let piece = PieceKind::T;
//! assert_eq!(piece.as_str(), "t");
//! assert_eq!(piece.color_hex(), "#a000f0");
//!
//! assert_ne!(GameAction::Start, GameAction::Rotate);
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Presentation size of one cell, in host surface units
pub const CELL_SIZE: u16 = 15;

/// Gravity interval (one row per 500ms)
pub const GRAVITY_INTERVAL_MS: u32 = 500;

/// Delay between a lock and the next spawn, so the locked cells render first
pub const SPAWN_DELAY_MS: u32 = 100;

/// Points awarded per cleared row
pub const POINTS_PER_LINE: u32 = 100;

/// Minimum displacement along the dominant axis for a swipe to count
pub const MIN_SWIPE_DISTANCE: f32 = 30.0;

/// Size of the host rendering surface for a given cell size: (width, height).
pub const fn surface_size(cell_size: u16) -> (u16, u16) {
    (
        BOARD_WIDTH as u16 * cell_size,
        BOARD_HEIGHT as u16 * cell_size,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presentation_defaults() {
        assert_eq!(CELL_SIZE, 15);
        assert_eq!(surface_size(CELL_SIZE), (150, 300));
        assert_eq!(GRAVITY_INTERVAL_MS, 500);
        assert_eq!(SPAWN_DELAY_MS, 100);
        assert_eq!(POINTS_PER_LINE, 100);
    }

    #[test]
    fn kind_names_are_distinct_lowercase() {
        for (i, a) in PieceKind::ALL.iter().enumerate() {
            assert_eq!(a.as_str(), a.as_str().to_lowercase());
            for b in &PieceKind::ALL[i + 1..] {
                assert_ne!(a.as_str(), b.as_str());
            }
        }
    }

    #[test]
    fn catalog_colors_are_distinct() {
        for (i, a) in PieceKind::ALL.iter().enumerate() {
            for b in &PieceKind::ALL[i + 1..] {
                assert_ne!(a.rgb(), b.rgb(), "{:?} and {:?} share a color", a, b);
            }
        }
    }

    #[test]
    fn rgb_matches_hex() {
        assert_eq!(PieceKind::I.rgb(), (0x00, 0xf0, 0xf0));
        assert_eq!(PieceKind::L.rgb(), (0xf0, 0xa0, 0x00));
    }
}

/// The seven piece kinds of the catalog
///
/// The kind doubles as the color tag of a locked cell:
/// - **I**: Cyan, horizontal bar
/// - **O**: Yellow, 2x2 square
/// - **T**: Purple, T-shaped
/// - **S**: Green
/// - **Z**: Red
/// - **J**: Blue
/// - **L**: Orange
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds, in catalog order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }

    /// Canonical color as a CSS-style hex string
    pub fn color_hex(&self) -> &'static str {
        match self {
            PieceKind::I => "#00f0f0",
            PieceKind::O => "#f0f000",
            PieceKind::T => "#a000f0",
            PieceKind::S => "#00f000",
            PieceKind::Z => "#f00000",
            PieceKind::J => "#0000f0",
            PieceKind::L => "#f0a000",
        }
    }

    /// Canonical color as (r, g, b)
    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            PieceKind::I => (0x00, 0xf0, 0xf0),
            PieceKind::O => (0xf0, 0xf0, 0x00),
            PieceKind::T => (0xa0, 0x00, 0xf0),
            PieceKind::S => (0x00, 0xf0, 0x00),
            PieceKind::Z => (0xf0, 0x00, 0x00),
            PieceKind::J => (0x00, 0x00, 0xf0),
            PieceKind::L => (0xf0, 0xa0, 0x00),
        }
    }
}

/// Lifecycle of one game
///
/// `NotStarted -> Running` on start, `Running -> GameOver` when a spawn is
/// blocked. Only a new start leaves `GameOver`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameStatus {
    #[default]
    NotStarted,
    Running,
    GameOver,
}

impl GameStatus {
    pub fn is_running(&self) -> bool {
        matches!(self, GameStatus::Running)
    }
}

/// Logical commands accepted by the engine
///
/// Both keyboard and swipe input reduce to these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Drop piece one row (locks it if blocked)
    SoftDrop,
    /// Rotate piece 90° clockwise
    Rotate,
    /// Start a new game (also "play again" after game over)
    Start,
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Cell filled with the color of the given kind
pub type Cell = Option<PieceKind>;
