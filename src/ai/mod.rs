//! AI and navigation module
//!
//! Provides the passable-tile graph and breadth-first pathfinding.

mod adjacency;
mod pathfinding;

pub use adjacency::{AdjacencyList, Neighbors};
pub use pathfinding::{Path, PathFinder, find_path};
