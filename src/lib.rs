//! Tile-grid movement and pathfinding built in Rust
//!
//! This crate provides:
//! - Tile grids with static walls and dynamic obstacles
//! - Breadth-first shortest paths over passable tiles
//! - Smooth tile-to-tile movement of ECS entities with deferred turns
//! - Destination-seeking, random and keyboard-driven movement policies
//! - Synchronous named events for movement and key input

pub mod ai;
pub mod core;
pub mod ecs;
pub mod grid;
pub mod input;
pub mod movement;

// Re-exports for convenience
pub use glam;
pub use hecs;
pub use winit;

/// Prelude module for common imports
pub mod prelude {
    pub use crate::ai::{Path, PathFinder, find_path};
    pub use crate::core::{EventEmitter, MovementConfig, MovementEvent, NamedEvent};
    pub use crate::ecs::{GridBody, Name, World};
    pub use crate::grid::{Direction, TileGrid, TileIndex, TileMap};
    pub use crate::input::{Input, KeyBindings, KeyEvent, TriggerMode};
    pub use crate::movement::{
        DirectionRequest, GridMover, KeyboardControlledGridMover, MoveContext, MovementError,
        MovementPolicy, RandomGridMover, TargetGridMover, WanderMode,
    };
    pub use glam::Vec2;
    pub use winit::keyboard::KeyCode;
}
