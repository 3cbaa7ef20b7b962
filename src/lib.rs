//! Block Game (workspace facade crate).
//!
//! Re-exports the engine, input and terminal crates under one name and adds
//! the host-side pieces the binary needs: configuration and the event log.

pub mod config;
pub mod event_log;

pub use block_game_core as core;
pub use block_game_input as input;
pub use block_game_term as term;
pub use block_game_types as types;

pub use config::Config;
pub use event_log::{EventLog, LogEvent};
