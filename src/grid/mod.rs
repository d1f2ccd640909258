//! Tile grid module
//!
//! Tile addressing, directions, and the grid collaborator interface.

mod index;
mod map;

pub use index::{Direction, TileIndex};
pub use map::{Tile, TileGrid, TileMap};
