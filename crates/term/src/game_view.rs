//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). Besides the board it draws a side panel and
//! a row of clickable controls under the board; [`GameView::hit_test`] maps a
//! click back to the control's action using the same layout.

use crate::core::GameSnapshot;
use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};
use crate::types::{GameAction, GameStatus, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

const SCREEN_BG: Rgb = Rgb::new(0, 0, 0);
const BOARD_BG: Rgb = Rgb::new(15, 23, 42);
const BORDER_FG: Rgb = Rgb::new(51, 65, 85);
const TEXT_FG: Rgb = Rgb::new(220, 220, 220);
const SCORE_FG: Rgb = Rgb::new(250, 204, 21);
const GAME_OVER_FG: Rgb = Rgb::new(239, 68, 68);
const BUTTON_BG: Rgb = Rgb::new(51, 65, 85);
const ROTATE_BG: Rgb = Rgb::new(126, 34, 206);
const START_BG: Rgb = Rgb::new(22, 163, 74);

/// Rows under the board frame used by the controls: gap, button row, drop row.
const CONTROLS_H: u16 = 3;

/// Gap between side-by-side buttons.
const BUTTON_GAP: u16 = 2;

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// One clickable control, a single row tall.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Button {
    pub x: u16,
    pub y: u16,
    pub w: u16,
    pub label: &'static str,
    pub action: GameAction,
}

impl Button {
    pub fn contains(&self, column: u16, row: u16) -> bool {
        row == self.y && column >= self.x && column < self.x.saturating_add(self.w)
    }
}

/// Where things land for one viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Layout {
    frame_x: u16,
    frame_y: u16,
    frame_w: u16,
    frame_h: u16,
}

/// A lightweight terminal renderer for the game.
#[derive(Debug, Clone)]
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self::new(2, 1)
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    /// Size of the bordered board in terminal cells: (width, height)
    pub fn frame_size(&self) -> (u16, u16) {
        (
            BOARD_WIDTH as u16 * self.cell_w + 2,
            BOARD_HEIGHT as u16 * self.cell_h + 2,
        )
    }

    fn layout(&self, viewport: Viewport) -> Layout {
        let (frame_w, frame_h) = self.frame_size();
        Layout {
            frame_x: viewport.width.saturating_sub(frame_w) / 2,
            frame_y: viewport.height.saturating_sub(frame_h + CONTROLS_H) / 2,
            frame_w,
            frame_h,
        }
    }

    /// Controls shown for `status`, positioned for `viewport`.
    ///
    /// While running: left, rotate, right, then a full-width drop button.
    /// Otherwise a single start button ("Play Again" after a game over).
    pub fn buttons(&self, status: GameStatus, viewport: Viewport) -> Vec<Button> {
        let l = self.layout(viewport);
        let row = l.frame_y + l.frame_h + 1;

        if !status.is_running() {
            let label = if status == GameStatus::GameOver {
                "Play Again"
            } else {
                "Start Game"
            };
            return vec![Button {
                x: l.frame_x,
                y: row,
                w: l.frame_w,
                label,
                action: GameAction::Start,
            }];
        }

        let w = l.frame_w.saturating_sub(2 * BUTTON_GAP) / 3;
        let step = w + BUTTON_GAP;
        vec![
            Button {
                x: l.frame_x,
                y: row,
                w,
                label: "◀",
                action: GameAction::MoveLeft,
            },
            Button {
                x: l.frame_x + step,
                y: row,
                w,
                label: "↻",
                action: GameAction::Rotate,
            },
            Button {
                x: l.frame_x + 2 * step,
                y: row,
                w,
                label: "▶",
                action: GameAction::MoveRight,
            },
            Button {
                x: l.frame_x,
                y: row + 1,
                w: l.frame_w,
                label: "▼",
                action: GameAction::SoftDrop,
            },
        ]
    }

    /// The action of the control under (column, row), if any.
    pub fn hit_test(
        &self,
        status: GameStatus,
        viewport: Viewport,
        column: u16,
        row: u16,
    ) -> Option<GameAction> {
        self.buttons(status, viewport)
            .into_iter()
            .find(|b| b.contains(column, row))
            .map(|b| b.action)
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.fill(Cell {
            ch: ' ',
            style: CellStyle::new(TEXT_FG, SCREEN_BG),
        });

        let l = self.layout(viewport);

        self.draw_border(fb, l, CellStyle::new(BORDER_FG, SCREEN_BG));

        let empty = CellStyle::new(Rgb::new(40, 50, 70), BOARD_BG).dim();
        for (row, cells) in snap.grid.iter().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                match cell {
                    Some(kind) => self.draw_block(fb, l, row as u16, col as u16, *kind),
                    None => self.fill_cell(fb, l, row as u16, col as u16, '·', empty),
                }
            }
        }

        for button in self.buttons(snap.status, viewport) {
            draw_button(fb, &button);
        }

        self.draw_side_panel(fb, snap, viewport, l);

        match snap.status {
            GameStatus::GameOver => self.draw_banner(
                fb,
                l,
                "GAME OVER",
                CellStyle::new(GAME_OVER_FG, SCREEN_BG).bold(),
            ),
            GameStatus::NotStarted => self.draw_banner(
                fb,
                l,
                "PRESS ENTER",
                CellStyle::new(TEXT_FG, SCREEN_BG).bold(),
            ),
            GameStatus::Running => {}
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, l: Layout, style: CellStyle) {
        let (x, y, w, h) = (l.frame_x, l.frame_y, l.frame_w, l.frame_h);

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);
        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn draw_block(&self, fb: &mut FrameBuffer, l: Layout, row: u16, col: u16, kind: PieceKind) {
        let style = CellStyle::new(Rgb::from(kind.rgb()), BOARD_BG).bold();
        self.fill_cell(fb, l, row, col, '█', style);
    }

    fn fill_cell(
        &self,
        fb: &mut FrameBuffer,
        l: Layout,
        row: u16,
        col: u16,
        ch: char,
        style: CellStyle,
    ) {
        let px = l.frame_x + 1 + col * self.cell_w;
        let py = l.frame_y + 1 + row * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        l: Layout,
    ) {
        let panel_x = l.frame_x.saturating_add(l.frame_w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 10 {
            return;
        }

        let label = CellStyle::new(TEXT_FG, SCREEN_BG).bold();
        let value = CellStyle::new(TEXT_FG, SCREEN_BG);
        let hint = value.dim();

        let mut y = l.frame_y;
        fb.put_str(panel_x, y, "SCORE", label);
        y += 1;
        fb.put_u32(panel_x, y, snap.score, CellStyle::new(SCORE_FG, SCREEN_BG).bold());
        y += 2;

        fb.put_str(panel_x, y, "STATUS", label);
        y += 1;
        let status = match snap.status {
            GameStatus::NotStarted => "ready",
            GameStatus::Running => "playing",
            GameStatus::GameOver => "over",
        };
        fb.put_str(panel_x, y, status, value);
        y += 2;

        fb.put_str(panel_x, y, "KEYS", label);
        for line in ["←/→ move", "↑ rotate", "↓ drop", "⏎ start", "q quit", "swipe ok"] {
            y += 1;
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, line, hint);
        }
    }

    fn draw_banner(&self, fb: &mut FrameBuffer, l: Layout, text: &str, style: CellStyle) {
        let y = l.frame_y + l.frame_h / 2;
        let text_w = text.chars().count() as u16;
        let x = l.frame_x + l.frame_w.saturating_sub(text_w) / 2;
        fb.put_str(x, y, text, style);
    }
}

fn draw_button(fb: &mut FrameBuffer, button: &Button) {
    let bg = match button.action {
        GameAction::Start => START_BG,
        GameAction::Rotate => ROTATE_BG,
        _ => BUTTON_BG,
    };
    let style = CellStyle::new(Rgb::new(255, 255, 255), bg).bold();
    fb.fill_rect(button.x, button.y, button.w, 1, ' ', style);

    let label_w = button.label.chars().count() as u16;
    let x = button.x + button.w.saturating_sub(label_w) / 2;
    fb.put_str(x, button.y, button.label, style);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_running_buttons_fill_frame_width() {
        let view = GameView::default();
        let buttons = view.buttons(GameStatus::Running, Viewport::new(22, 25));
        assert_eq!(buttons.len(), 4);
        // three 6-wide buttons with 2-column gaps span the 22-column frame
        assert_eq!((buttons[0].x, buttons[0].w), (0, 6));
        assert_eq!(buttons[2].x + buttons[2].w, 22);
        assert_eq!(buttons[3].w, 22);
        assert_eq!(buttons[3].y, buttons[0].y + 1);
    }

    #[test]
    fn test_idle_has_single_start_button() {
        let view = GameView::default();
        let buttons = view.buttons(GameStatus::GameOver, Viewport::new(22, 25));
        assert_eq!(buttons.len(), 1);
        assert_eq!(buttons[0].label, "Play Again");
        assert_eq!(buttons[0].action, GameAction::Start);
    }

    #[test]
    fn test_button_contains() {
        let b = Button {
            x: 4,
            y: 2,
            w: 3,
            label: "x",
            action: GameAction::Rotate,
        };
        assert!(b.contains(4, 2));
        assert!(b.contains(6, 2));
        assert!(!b.contains(7, 2));
        assert!(!b.contains(5, 3));
    }
}
