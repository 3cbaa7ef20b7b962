//! Terminal block game (default binary).
//!
//! Keyboard, mouse swipes and clicks on the on-screen buttons all reduce to
//! game actions. The engine has no clock of its own; this loop measures
//! elapsed time and hands it to `Game::advance`.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{event, terminal};

use block_game::core::Game;
use block_game::input::{InputEvent, InputHandler};
use block_game::term::{FrameBuffer, GameView, Screen, Viewport};
use block_game::{Config, EventLog};

/// Upper bound on how long one loop iteration waits for input.
const FRAME: Duration = Duration::from_millis(16);

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = Config::load(&args)?;
    let log = match &config.log_path {
        Some(path) => Some(EventLog::open(path)?),
        None => None,
    };

    let mut screen = Screen::stdout();
    let result = screen.enter().and_then(|()| run(&mut screen, &config, log));

    // Always try to restore terminal state.
    let _ = screen.leave();
    result
}

fn run(screen: &mut Screen, config: &Config, mut log: Option<EventLog>) -> Result<()> {
    let mut game = Game::new(config.seed).with_timing(config.timing);
    let view = GameView::default();
    let mut input = InputHandler::new();
    let mut frame = FrameBuffer::new(0, 0);

    let mut last = Instant::now();
    let mut dirty = true;

    loop {
        let (w, h) = terminal::size().unwrap_or((80, 24));
        let viewport = Viewport::new(w, h);

        if dirty {
            view.render_into(&game.snapshot(), viewport, &mut frame);
            screen.present(&frame)?;
            dirty = false;
        }

        if event::poll(FRAME)? {
            match input.handle_event(&event::read()?) {
                Some(InputEvent::Quit) => break,
                Some(InputEvent::Action(action)) => dirty |= game.apply_action(action),
                Some(InputEvent::Click { column, row }) => {
                    if let Some(action) = view.hit_test(game.status(), viewport, column, row) {
                        dirty |= game.apply_action(action);
                    }
                }
                Some(InputEvent::Resize) => {
                    screen.invalidate();
                    dirty = true;
                }
                None => {}
            }
        }

        // Whole milliseconds only; the remainder carries into the next frame.
        let elapsed_ms = last.elapsed().as_millis().min(u32::MAX as u128) as u32;
        last += Duration::from_millis(elapsed_ms as u64);
        dirty |= game.advance(elapsed_ms);

        let dropped = game.take_dropped_events();
        let events = game.take_events();
        if let Some(log) = log.as_mut() {
            log.record_dropped(dropped)?;
            for ev in events {
                log.record(ev)?;
            }
        }
    }

    if let Some(log) = log.as_mut() {
        log.flush()?;
    }
    Ok(())
}
