//! Common ECS components

use glam::Vec2;

use crate::grid::Direction;

/// Continuous placement of an entity that moves on the tile grid.
///
/// Written by the entity's grid mover each frame; read by anything that
/// presents the entity (rendering, audio, game logic).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GridBody {
    /// Position in world space
    pub position: Vec2,
    /// Direction of the current leg, `Direction::None` when resting
    pub direction: Direction,
}

impl GridBody {
    /// Create a resting body at a world position
    #[must_use]
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            direction: Direction::None,
        }
    }

    /// Check if the body is between two tiles
    #[must_use]
    pub fn is_moving(&self) -> bool {
        self.direction.is_some()
    }
}

/// Name component for debugging
#[derive(Debug, Clone)]
pub struct Name(pub String);

impl Name {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}
