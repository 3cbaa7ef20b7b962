//! Swipe gestures: start point + end point -> at most one action.
//!
//! The dominant axis decides the direction. Horizontal swipes move, a
//! downward swipe soft-drops, an upward swipe rotates. Anything shorter than
//! the minimum distance on its dominant axis is not a swipe.

use crate::types::{GameAction, MIN_SWIPE_DISTANCE};

/// A point in host surface units (pixels for touch screens)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Classify a displacement (`dy > 0` is downward).
///
/// Ties between the axes count as vertical. Distances must strictly exceed
/// `min_distance`.
pub fn classify_swipe(dx: f32, dy: f32, min_distance: f32) -> Option<GameAction> {
    if dx.abs() > dy.abs() {
        if dx.abs() <= min_distance {
            return None;
        }
        Some(if dx > 0.0 {
            GameAction::MoveRight
        } else {
            GameAction::MoveLeft
        })
    } else {
        if dy.abs() <= min_distance {
            return None;
        }
        Some(if dy > 0.0 {
            GameAction::SoftDrop
        } else {
            GameAction::Rotate
        })
    }
}

/// Tracks one gesture at a time.
#[derive(Debug, Clone)]
pub struct SwipeTracker {
    start: Option<Point>,
    min_distance: f32,
}

impl SwipeTracker {
    pub fn new() -> Self {
        Self::with_min_distance(MIN_SWIPE_DISTANCE)
    }

    pub fn with_min_distance(min_distance: f32) -> Self {
        Self {
            start: None,
            min_distance,
        }
    }

    pub fn min_distance(&self) -> f32 {
        self.min_distance
    }

    /// Record where the gesture started (a new start replaces an unfinished one)
    pub fn begin(&mut self, at: Point) {
        self.start = Some(at);
    }

    pub fn is_tracking(&self) -> bool {
        self.start.is_some()
    }

    /// Finish the gesture and classify it. `None` without a recorded start.
    pub fn end(&mut self, at: Point) -> Option<GameAction> {
        let start = self.start.take()?;
        classify_swipe(at.x - start.x, at.y - start.y, self.min_distance)
    }

    /// Displacement from the recorded start, without ending the gesture
    pub fn displacement(&self, at: Point) -> Option<(f32, f32)> {
        self.start.map(|s| (at.x - s.x, at.y - s.y))
    }

    pub fn cancel(&mut self) {
        self.start = None;
    }
}

impl Default for SwipeTracker {
    fn default() -> Self {
        Self::new()
    }
}
