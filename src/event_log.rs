//! JSON-lines event log.
//!
//! One object per [`GameEvent`], e.g.
//! `{"type":"locked","piece":"t","linesCleared":1,"score":100,"ts":1700000000000}`.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::core::GameEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum LogEvent {
    Started,
    Spawned {
        piece: &'static str,
    },
    #[serde(rename_all = "camelCase")]
    Locked {
        piece: &'static str,
        lines_cleared: u32,
        score: u32,
    },
    GameOver {
        score: u32,
    },
    /// Engine events evicted before they were drained
    EventsDropped {
        count: u32,
    },
}

impl From<GameEvent> for LogEvent {
    fn from(event: GameEvent) -> Self {
        match event {
            GameEvent::Started => Self::Started,
            GameEvent::Spawned { kind } => Self::Spawned {
                piece: kind.as_str(),
            },
            GameEvent::Locked {
                kind,
                lines_cleared,
                score,
            } => Self::Locked {
                piece: kind.as_str(),
                lines_cleared,
                score,
            },
            GameEvent::GameOver { score } => Self::GameOver { score },
        }
    }
}

#[derive(Serialize)]
struct Record {
    #[serde(flatten)]
    event: LogEvent,
    /// Unix time in milliseconds
    ts: u64,
}

/// Appends records to a writer, one line each.
pub struct EventLog<W: Write = File> {
    out: W,
    buf: Vec<u8>,
}

impl EventLog<File> {
    /// Open `path` for appending, creating it if needed.
    pub fn open(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("failed to open event log {}", path.display()))?;
        Ok(Self::new(file))
    }
}

impl<W: Write> EventLog<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            buf: Vec::with_capacity(256),
        }
    }

    pub fn record(&mut self, event: GameEvent) -> Result<()> {
        self.record_at(now_ms(), event)
    }

    pub fn record_at(&mut self, ts: u64, event: GameEvent) -> Result<()> {
        self.write_record(ts, event.into())
    }

    /// Note a gap of `count` lost engine events. Zero writes nothing.
    pub fn record_dropped(&mut self, count: u32) -> Result<()> {
        if count == 0 {
            return Ok(());
        }
        self.write_record(now_ms(), LogEvent::EventsDropped { count })
    }

    fn write_record(&mut self, ts: u64, event: LogEvent) -> Result<()> {
        self.buf.clear();
        serde_json::to_writer(&mut self.buf, &Record { event, ts })?;
        self.buf.push(b'\n');
        self.out.write_all(&self.buf)?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
