//! Game loop controller - lifecycle, gravity and spawn pacing
//!
//! [`Game`] owns the current [`GameState`], the piece source and two timers.
//! It has no clock of its own: the host reports elapsed time through
//! [`Game::advance`], or drives [`Game::gravity_tick`] / [`Game::spawn_next`]
//! directly. Every transition either completes or leaves the state as it was.
//!
//! Entering `GameOver` clears both timers in the same call that sets the
//! status, so no later tick can act on a finished game.

use arrayvec::ArrayVec;

use crate::rng::{PieceSource, SimpleRng};
use crate::snapshot::GameSnapshot;
use crate::state::{ActivePiece, DropOutcome, GameState};
use crate::types::{GameAction, GameStatus, PieceKind, GRAVITY_INTERVAL_MS, SPAWN_DELAY_MS};

/// Pacing parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    /// Time between automatic one-row drops
    pub gravity_interval_ms: u32,
    /// Pause between a lock and the next spawn (0 = spawn inside the lock)
    pub spawn_delay_ms: u32,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            gravity_interval_ms: GRAVITY_INTERVAL_MS,
            spawn_delay_ms: SPAWN_DELAY_MS,
        }
    }
}

/// Notable transitions, queued for the host (event log, sound, etc.).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Started,
    Spawned { kind: PieceKind },
    Locked {
        kind: PieceKind,
        lines_cleared: u32,
        score: u32,
    },
    GameOver { score: u32 },
}

/// Events kept between two `take_events` calls. On overflow the oldest is
/// evicted and counted in [`Game::take_dropped_events`].
pub const EVENT_CAPACITY: usize = 16;

/// The engine: state plus piece source plus pacing.
#[derive(Debug, Clone)]
pub struct Game<S = SimpleRng> {
    state: GameState,
    source: S,
    timing: Timing,
    /// Time accumulated toward the next gravity tick
    gravity_elapsed_ms: u32,
    /// Time left before the pending spawn, if a lock is waiting for one
    spawn_in_ms: Option<u32>,
    events: ArrayVec<GameEvent, EVENT_CAPACITY>,
    events_dropped: u32,
}

impl Game<SimpleRng> {
    /// New game (not started) with the seeded LCG as piece source
    pub fn new(seed: u32) -> Self {
        Self::with_source(SimpleRng::new(seed))
    }
}

impl Default for Game<SimpleRng> {
    fn default() -> Self {
        Self::new(1)
    }
}

impl<S: PieceSource> Game<S> {
    pub fn with_source(source: S) -> Self {
        Self::from_state(GameState::new(), source)
    }

    /// Resume from an existing state. A running state without a piece spawns
    /// on the next `advance` or `spawn_next`.
    pub fn from_state(state: GameState, source: S) -> Self {
        Self {
            state,
            source,
            timing: Timing::default(),
            gravity_elapsed_ms: 0,
            spawn_in_ms: None,
            events: ArrayVec::new(),
            events_dropped: 0,
        }
    }

    pub fn with_timing(mut self, timing: Timing) -> Self {
        self.timing = timing;
        self
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn status(&self) -> GameStatus {
        self.state.status()
    }

    pub fn score(&self) -> u32 {
        self.state.score()
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.state.active()
    }

    pub fn timing(&self) -> Timing {
        self.timing
    }

    /// Milliseconds until the pending spawn, if one is scheduled
    pub fn pending_spawn_ms(&self) -> Option<u32> {
        self.spawn_in_ms
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.state.snapshot()
    }

    /// Reset board, score and status together and spawn the first piece.
    ///
    /// Allowed from any status; this is also "play again".
    pub fn start(&mut self) {
        self.gravity_elapsed_ms = 0;
        self.spawn_in_ms = None;
        self.push_event(GameEvent::Started);

        let kind = self.source.next_kind();
        self.state = GameState::started(kind);
        self.after_spawn(kind);
    }

    pub fn move_left(&mut self) -> bool {
        self.commit(self.state.translated(-1))
    }

    pub fn move_right(&mut self) -> bool {
        self.commit(self.state.translated(1))
    }

    /// Clockwise rotation; rejected silently when it does not fit.
    pub fn rotate(&mut self) -> bool {
        self.commit(self.state.rotated())
    }

    /// Player-requested one-row drop; same transition as a gravity tick.
    pub fn soft_drop(&mut self) -> DropOutcome {
        self.step_down()
    }

    /// Automatic one-row drop.
    pub fn gravity_tick(&mut self) -> DropOutcome {
        self.step_down()
    }

    /// Spawn the next piece now, skipping any remaining delay.
    ///
    /// Returns false when there is nothing to spawn for, or when the spawn is
    /// blocked (which ends the game).
    pub fn spawn_next(&mut self) -> bool {
        if !self.state.awaiting_spawn() {
            return false;
        }
        self.spawn_in_ms = None;
        self.gravity_elapsed_ms = 0;

        let kind = self.source.next_kind();
        self.state = self.state.spawned(kind);
        self.after_spawn(kind)
    }

    /// Let `elapsed_ms` of host time pass.
    ///
    /// Fires the pending spawn once its delay runs out and one gravity tick per
    /// full interval while a piece is active. Gravity does not accumulate while
    /// a spawn is pending. Returns true if the state changed.
    pub fn advance(&mut self, elapsed_ms: u32) -> bool {
        let mut budget = elapsed_ms;
        let mut changed = false;

        while self.state.is_running() {
            if let Some(remaining) = self.spawn_in_ms {
                if budget < remaining {
                    self.spawn_in_ms = Some(remaining - budget);
                    break;
                }
                budget -= remaining;
                self.spawn_in_ms = None;
                self.spawn_next();
                changed = true;
                continue;
            }

            if self.state.active().is_none() {
                // Running without a piece and nothing scheduled: resumed state.
                changed |= self.spawn_next();
                if self.state.active().is_none() {
                    break;
                }
                continue;
            }

            let interval = self.timing.gravity_interval_ms.max(1);
            let until_tick = interval.saturating_sub(self.gravity_elapsed_ms).max(1);
            if budget < until_tick {
                self.gravity_elapsed_ms += budget;
                break;
            }
            budget -= until_tick;
            self.gravity_elapsed_ms = 0;
            changed |= self.step_down() != DropOutcome::Ignored;
        }

        changed
    }

    /// Apply a logical action. Moves are ignored unless the game is running.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_left(),
            GameAction::MoveRight => self.move_right(),
            GameAction::Rotate => self.rotate(),
            GameAction::SoftDrop => self.soft_drop() != DropOutcome::Ignored,
            GameAction::Start => {
                self.start();
                true
            }
        }
    }

    /// Drain queued events.
    pub fn take_events(&mut self) -> ArrayVec<GameEvent, EVENT_CAPACITY> {
        std::mem::take(&mut self.events)
    }

    /// Events evicted from a full queue since the last call, then reset.
    pub fn take_dropped_events(&mut self) -> u32 {
        std::mem::take(&mut self.events_dropped)
    }

    fn commit(&mut self, next: Option<GameState>) -> bool {
        match next {
            Some(state) => {
                self.state = state;
                true
            }
            None => false,
        }
    }

    fn step_down(&mut self) -> DropOutcome {
        let Some(piece) = self.state.active() else {
            return DropOutcome::Ignored;
        };

        let (next, outcome) = self.state.dropped();
        self.state = next;

        if let DropOutcome::Locked { lines_cleared } = outcome {
            self.push_event(GameEvent::Locked {
                kind: piece.kind(),
                lines_cleared,
                score: self.state.score(),
            });
            self.gravity_elapsed_ms = 0;
            if self.timing.spawn_delay_ms == 0 {
                self.spawn_next();
            } else {
                self.spawn_in_ms = Some(self.timing.spawn_delay_ms);
            }
        }

        outcome
    }

    fn after_spawn(&mut self, kind: PieceKind) -> bool {
        if self.state.active().is_some() {
            self.push_event(GameEvent::Spawned { kind });
            true
        } else {
            // Blocked spawn: the state is already GameOver, stop the clock with it.
            self.spawn_in_ms = None;
            self.gravity_elapsed_ms = 0;
            self.push_event(GameEvent::GameOver {
                score: self.state.score(),
            });
            false
        }
    }

    fn push_event(&mut self, event: GameEvent) {
        if self.events.is_full() {
            self.events.remove(0);
            self.events_dropped += 1;
        }
        self.events.push(event);
    }
}
