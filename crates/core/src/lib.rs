//! Core game logic module - pure, deterministic, and testable
//!
//! All the rules of the falling-block game live here, with no dependency on
//! terminals, input devices or wall-clock time:
//!
//! - **Deterministic**: piece choice comes from an injected [`PieceSource`]
//! - **Synchronous**: the host reports elapsed time; nothing here sleeps or spawns timers
//! - **Atomic transitions**: [`GameState`] is an immutable value replaced wholesale
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 grid, placement checks, merge and line clearing
//! - [`pieces`]: the seven-shape catalog and clockwise matrix rotation
//! - [`rng`]: piece sources (seeded LCG, scripted sequence, closures)
//! - [`state`]: the immutable game state and its transitions
//! - [`game`]: the controller (lifecycle, gravity, spawn delay, events)
//! - [`snapshot`]: composited view for rendering
//!
//! # Game Rules
//!
//! - Pieces spawn at row 0, horizontally centered; a blocked spawn ends the game
//! - Left/right moves and clockwise rotation are applied only if they fit (no wall kicks)
//! - A piece that cannot move down locks; full rows clear for 100 points each
//! - Gravity drops the piece one row every 500ms of host time
//!
//! # Example
//!
//! ```
//! use block_game_core::{DropOutcome, Game, PieceSequence};
//! use block_game_types::{GameStatus, PieceKind};
//!
//! let mut game = Game::with_source(PieceSequence::repeat(PieceKind::O));
//! game.start();
//! assert_eq!(game.status(), GameStatus::Running);
//!
//! assert!(game.move_left());
//! assert_eq!(game.soft_drop(), DropOutcome::Moved);
//!
//! // One second of host time = two gravity ticks.
//! game.advance(1000);
//! assert_eq!(game.active().unwrap().row, 3);
//! ```

pub mod board;
pub mod game;
pub mod pieces;
pub mod rng;
pub mod snapshot;
pub mod state;

pub use block_game_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use game::{Game, GameEvent, Timing, EVENT_CAPACITY};
pub use pieces::{get_shape, Shape};
pub use rng::{PieceSequence, PieceSource, SimpleRng};
pub use snapshot::{GameSnapshot, Grid};
pub use state::{ActivePiece, DropOutcome, GameState};
