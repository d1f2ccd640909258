//! Per-call access to the grid and the entity world

use crate::ecs::World;
use crate::grid::TileGrid;

/// Everything a mover touches during a call.
///
/// The grid is only read; the world is written through the moving entity's
/// `GridBody`.
pub struct MoveContext<'a> {
    /// Grid being moved on
    pub grid: &'a dyn TileGrid,
    /// World holding the moving entities
    pub world: &'a mut World,
}

impl<'a> MoveContext<'a> {
    /// Bundle a grid and a world
    pub fn new(grid: &'a dyn TileGrid, world: &'a mut World) -> Self {
        Self { grid, world }
    }
}
