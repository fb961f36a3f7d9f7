//! Play-area containment.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Rectangular play area.
///
/// Edges are inclusive: a point exactly on an edge is still inside.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelBounds {
    /// Smallest x inside the play area.
    pub left: f32,
    /// Largest x inside the play area.
    pub right: f32,
    /// Largest y inside the play area.
    pub top: f32,
    /// Smallest y inside the play area.
    pub bottom: f32,
}

impl Default for LevelBounds {
    fn default() -> Self {
        Self {
            left: -9.0,
            right: 9.0,
            top: 5.5,
            bottom: -5.5,
        }
    }
}

impl LevelBounds {
    /// Creates bounds from the four edges.
    #[must_use]
    pub const fn new(left: f32, right: f32, top: f32, bottom: f32) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }

    /// Returns `true` when `position` lies outside any of the four edges.
    #[must_use]
    pub fn is_out_of_bounds(&self, position: Vec2) -> bool {
        position.x < self.left
            || position.x > self.right
            || position.y < self.bottom
            || position.y > self.top
    }

    /// Returns `true` when `position` has reached or passed the top edge.
    #[must_use]
    pub fn reached_top(&self, position: Vec2) -> bool {
        position.y >= self.top
    }

    /// Checks the edges are not inverted.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvertedBounds`] when `left > right` or
    /// `bottom > top`, or an edge is NaN.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.left <= self.right && self.bottom <= self.top {
            Ok(())
        } else {
            Err(ConfigError::InvertedBounds {
                left: self.left,
                right: self.right,
                bottom: self.bottom,
                top: self.top,
            })
        }
    }
}
