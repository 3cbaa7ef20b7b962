//! Terminal input handler.
//!
//! Turns raw crossterm events into [`InputEvent`]s: key presses go through the
//! key map, a left-button drag is classified as a swipe, and a press/release
//! that moved too little to be a swipe is reported as a click at the press
//! position so the view can hit-test its on-screen buttons.

use crossterm::event::{Event, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};

use crate::map::{handle_key_event, should_quit};
use crate::swipe::{Point, SwipeTracker};
use crate::types::GameAction;

/// Approximate pixel size of one terminal cell (width, height).
///
/// Mouse positions arrive in cells; scaling them lets the swipe threshold keep
/// its touch-screen meaning (about 4 columns or 2 rows).
pub const DEFAULT_CELL_PX: (f32, f32) = (8.0, 16.0);

/// What the host should do with an input event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Action(GameAction),
    /// Press and release without a swipe; position of the press, in terminal cells
    Click { column: u16, row: u16 },
    Resize,
    Quit,
}

#[derive(Debug, Clone)]
pub struct InputHandler {
    swipe: SwipeTracker,
    cell_px: (f32, f32),
    pressed_at: Option<(u16, u16)>,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::with_cell_px(DEFAULT_CELL_PX)
    }

    pub fn with_cell_px(cell_px: (f32, f32)) -> Self {
        Self {
            swipe: SwipeTracker::new(),
            cell_px,
            pressed_at: None,
        }
    }

    pub fn handle_event(&mut self, event: &Event) -> Option<InputEvent> {
        match event {
            Event::Key(key) => {
                // Terminal auto-repeat is ignored: one move per press.
                if key.kind != KeyEventKind::Press {
                    return None;
                }
                if should_quit(*key) {
                    return Some(InputEvent::Quit);
                }
                handle_key_event(*key).map(InputEvent::Action)
            }
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Resize(_, _) => Some(InputEvent::Resize),
            _ => None,
        }
    }

    fn handle_mouse(&mut self, mouse: &MouseEvent) -> Option<InputEvent> {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.swipe.begin(self.to_point(mouse.column, mouse.row));
                self.pressed_at = Some((mouse.column, mouse.row));
                None
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let (column, row) = self.pressed_at.take()?;
                let event = match self.swipe.end(self.to_point(mouse.column, mouse.row)) {
                    Some(action) => InputEvent::Action(action),
                    None => InputEvent::Click { column, row },
                };
                Some(event)
            }
            _ => None,
        }
    }

    fn to_point(&self, column: u16, row: u16) -> Point {
        Point::new(column as f32 * self.cell_px.0, row as f32 * self.cell_px.1)
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
