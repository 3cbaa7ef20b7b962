//! Terminal front end for the block game.
//!
//! Renders into a plain framebuffer rather than through a widget toolkit, so
//! the aspect ratio of a board cell (2 columns per cell) stays under control.
//!
//! - [`fb`]: framebuffer and cell styles
//! - [`game_view`]: snapshot to framebuffer, plus on-screen button hit testing
//! - [`screen`]: terminal session and diffed output

pub mod fb;
pub mod game_view;
pub mod screen;

pub use block_game_core as core;
pub use block_game_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{Button, GameView, Viewport};
pub use screen::{changed_runs, write_changes, write_full, Screen};
