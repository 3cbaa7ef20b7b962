//! Input module (engine-facing).
//!
//! Independent of any UI framework beyond crossterm's event types. Maps key
//! presses and swipe gestures into [`crate::types::GameAction`]s:
//!
//! - [`map`]: one action per key press
//! - [`swipe`]: start/end displacement classification
//! - [`handler`]: crossterm event stream to [`InputEvent`]s (mouse drags as swipes)

pub mod handler;
pub mod map;
pub mod swipe;

pub use block_game_types as types;

pub use handler::{InputEvent, InputHandler, DEFAULT_CELL_PX};
pub use map::{handle_key_event, should_quit};
pub use swipe::{classify_swipe, Point, SwipeTracker};
