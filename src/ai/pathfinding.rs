//! Breadth-first pathfinding on a tile grid
//!
//! Shortest routes by hop count for agents that move one tile at a time.

use std::collections::VecDeque;

use glam::Vec2;

use super::AdjacencyList;
use crate::grid::{TileGrid, TileIndex};

/// Route between two tiles.
///
/// Holds every tile after the source up to and including the target, in
/// travel order. An empty path means there is nowhere to go.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Path {
    tiles: VecDeque<TileIndex>,
}

impl Path {
    /// Create an empty path
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if the path has no steps left
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Number of steps left
    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Next tile to move to, without consuming it
    #[must_use]
    pub fn peek(&self) -> Option<TileIndex> {
        self.tiles.front().copied()
    }

    /// Consume the next tile to move to
    pub fn pop_front(&mut self) -> Option<TileIndex> {
        self.tiles.pop_front()
    }

    /// Last tile of the path
    #[must_use]
    pub fn destination(&self) -> Option<TileIndex> {
        self.tiles.back().copied()
    }

    /// Check if the path passes through `index`
    #[must_use]
    pub fn contains(&self, index: TileIndex) -> bool {
        self.tiles.contains(&index)
    }

    /// Drop all remaining steps
    pub fn clear(&mut self) {
        self.tiles.clear();
    }

    /// Iterate over the remaining steps in travel order
    pub fn iter(&self) -> impl Iterator<Item = TileIndex> + '_ {
        self.tiles.iter().copied()
    }

    /// Tile centres of the remaining steps in world coordinates
    #[must_use]
    pub fn waypoints(&self, grid: &dyn TileGrid) -> Vec<Vec2> {
        self.iter().map(|index| grid.position_of(index)).collect()
    }

    /// World distance covered by the remaining steps, starting at the first one
    #[must_use]
    pub fn world_length(&self, grid: &dyn TileGrid) -> f32 {
        self.waypoints(grid)
            .windows(2)
            .map(|pair| pair[0].distance(pair[1]))
            .sum()
    }
}

impl FromIterator<TileIndex> for Path {
    fn from_iter<I: IntoIterator<Item = TileIndex>>(iter: I) -> Self {
        Self {
            tiles: iter.into_iter().collect(),
        }
    }
}

/// Breadth-first search over the passable tiles of a grid.
///
/// The adjacency snapshot is rebuilt on every call, so results always reflect
/// the grid as it is now. Scratch buffers are reused between calls but their
/// contents are reset each time; no search state carries over.
///
/// Among several shortest routes, the one returned is the one discovered
/// first when neighbours are expanded left, up, right, down.
#[derive(Debug, Default)]
pub struct PathFinder {
    adjacency: AdjacencyList,
    /// Visited marker per tile, row-major
    visited: Vec<bool>,
    /// Parent of each explored tile, row-major
    parents: Vec<Option<TileIndex>>,
    /// Pending (tile, parent) pairs
    queue: VecDeque<(TileIndex, TileIndex)>,
    columns: usize,
}

impl PathFinder {
    /// Create a new pathfinder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Find a shortest route from `source` to `target`.
    ///
    /// Returns an empty path when the endpoints are equal, either index is
    /// invalid for `grid`, or `target` cannot be reached.
    pub fn find_path(&mut self, grid: &dyn TileGrid, source: TileIndex, target: TileIndex) -> Path {
        if source == target || !grid.is_index_valid(source) || !grid.is_index_valid(target) {
            return Path::new();
        }

        self.reset(grid);

        let mut last_explored = None;
        let mut explored = 0usize;
        self.queue.push_back((source, source));

        while let Some((current, parent)) = self.queue.pop_front() {
            let slot = self.slot(current);
            if self.visited[slot] {
                continue;
            }

            self.visited[slot] = true;
            self.parents[slot] = Some(parent);
            last_explored = Some(current);
            explored += 1;

            if current == target {
                break;
            }

            for &neighbor in self.adjacency.neighbors_of(current) {
                if !self.visited[self.slot(neighbor)] {
                    self.queue.push_back((neighbor, current));
                }
            }
        }

        log::trace!("BFS {source} -> {target}: explored {explored} tiles");

        if last_explored != Some(target) {
            return Path::new();
        }

        self.reconstruct(source, target)
    }

    /// All tiles reachable from `source`, in discovery order, excluding `source`.
    pub fn reachable_from(&mut self, grid: &dyn TileGrid, source: TileIndex) -> Vec<TileIndex> {
        if !grid.is_index_valid(source) {
            return Vec::new();
        }

        self.reset(grid);

        let mut reachable = Vec::new();
        let source_slot = self.slot(source);
        self.visited[source_slot] = true;
        self.queue.push_back((source, source));

        while let Some((current, _)) = self.queue.pop_front() {
            for &neighbor in self.adjacency.neighbors_of(current) {
                let slot = self.slot(neighbor);
                if !self.visited[slot] {
                    self.visited[slot] = true;
                    reachable.push(neighbor);
                    self.queue.push_back((neighbor, current));
                }
            }
        }

        reachable
    }

    fn reset(&mut self, grid: &dyn TileGrid) {
        self.adjacency.generate(grid);

        let (rows, columns) = grid.size_in_tiles();
        let tile_count = rows * columns;
        self.columns = columns;
        self.visited.clear();
        self.visited.resize(tile_count, false);
        self.parents.clear();
        self.parents.resize(tile_count, None);
        self.queue.clear();
    }

    /// Row-major slot of a valid index
    fn slot(&self, index: TileIndex) -> usize {
        index.row as usize * self.columns + index.column as usize
    }

    fn reconstruct(&self, source: TileIndex, target: TileIndex) -> Path {
        let mut tiles = Vec::new();
        let mut current = target;

        while current != source {
            tiles.push(current);
            match self.parents[self.slot(current)] {
                Some(parent) => current = parent,
                None => return Path::new(),
            }
        }

        tiles.into_iter().rev().collect()
    }
}

/// Find a path with a one-off pathfinder
#[must_use]
pub fn find_path(grid: &dyn TileGrid, source: TileIndex, target: TileIndex) -> Path {
    PathFinder::new().find_path(grid, source, target)
}
