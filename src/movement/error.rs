//! Movement errors

use hecs::Entity;

/// Errors that can occur when attaching a mover to an entity
#[derive(Debug, Clone, PartialEq)]
pub enum MovementError {
    /// The entity does not exist or has no `GridBody`
    MissingEntity(String),
    /// The entity's position is not on any tile
    OffGrid {
        /// World x coordinate
        x: f32,
        /// World y coordinate
        y: f32,
    },
    /// Speed is negative or not finite
    InvalidSpeed(f32),
}

impl MovementError {
    pub(crate) fn missing(entity: Entity) -> Self {
        Self::MissingEntity(format!("{entity:?}"))
    }
}

impl std::fmt::Display for MovementError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingEntity(e) => write!(f, "Entity {e} has no grid body"),
            Self::OffGrid { x, y } => write!(f, "Position ({x}, {y}) is outside the grid"),
            Self::InvalidSpeed(speed) => write!(f, "Invalid speed: {speed}"),
        }
    }
}

impl std::error::Error for MovementError {}
