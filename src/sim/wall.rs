//! Wall storage and collision behavior tags
//!
//! A wall is an axis-aligned rectangle normalized to (x_min, y_min, x_max,
//! y_max). Walls degenerate on one axis are valid segments exposing a single
//! face on that axis; walls degenerate on both axes are noise and dropped.

use serde::{Deserialize, Serialize};

use crate::tolerance::DEGENERATE_SPAN;

/// What a wall does to the trajectory when struck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Behavior {
    /// Terminates the run at the impact point.
    Stop,
    /// Flips the direction component perpendicular to the struck face.
    Reflect,
    /// Records the crossing and continues unchanged.
    PassThrough,
}

impl Behavior {
    /// Rank for simultaneous hits: `Stop` > `Reflect` > `PassThrough`.
    ///
    /// Kept as an explicit function rather than a derived ordering so the
    /// rule is auditable independently of the geometry code.
    #[inline]
    pub fn precedence(self) -> u8 {
        match self {
            Self::Stop => 2,
            Self::Reflect => 1,
            Self::PassThrough => 0,
        }
    }

    /// Whether this behavior interrupts travel (stop or reflect).
    #[inline]
    pub fn is_blocking(self) -> bool {
        !matches!(self, Self::PassThrough)
    }
}

/// An axis-aligned rectangular obstacle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    pub x_min: f64,
    pub y_min: f64,
    pub x_max: f64,
    pub y_max: f64,
    pub behavior: Behavior,
}

impl Wall {
    /// Build a wall from two opposite corners in any order.
    ///
    /// Returns `None` when both spans are effectively zero; such input is
    /// noise, not a validation failure.
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64, behavior: Behavior) -> Option<Self> {
        if (x1 - x2).abs() < DEGENERATE_SPAN && (y1 - y2).abs() < DEGENERATE_SPAN {
            return None;
        }
        Some(Self {
            x_min: x1.min(x2),
            y_min: y1.min(y2),
            x_max: x1.max(x2),
            y_max: y1.max(y2),
            behavior,
        })
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }
}

/// Immutable obstacle set for one simulation run.
///
/// Walls can only be added; nothing removes or mutates them once a run begins.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WallStore {
    walls: Vec<Wall>,
}

impl WallStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a wall given two opposite corners in any order.
    ///
    /// Zero-area input is silently discarded.
    pub fn add_wall(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, behavior: Behavior) {
        match Wall::new(x1, y1, x2, y2, behavior) {
            Some(wall) => self.walls.push(wall),
            None => log::trace!("ignoring zero-area wall at ({x1}, {y1})"),
        }
    }

    pub fn walls(&self) -> &[Wall] {
        &self.walls
    }

    pub fn len(&self) -> usize {
        self.walls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.walls.is_empty()
    }
}

impl FromIterator<Wall> for WallStore {
    fn from_iter<I: IntoIterator<Item = Wall>>(iter: I) -> Self {
        Self {
            walls: iter.into_iter().collect(),
        }
    }
}
