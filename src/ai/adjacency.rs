//! Passable-neighbour graph derived from a tile grid

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::grid::{Direction, TileGrid, TileIndex};

/// Neighbours of a single tile (at most four)
pub type Neighbors = SmallVec<[TileIndex; 4]>;

/// Snapshot mapping each passable tile to its passable orthogonal neighbours.
///
/// Neighbours are listed left, up, right, down. The snapshot is not kept live:
/// call [`AdjacencyList::generate`] again after the grid changes.
#[derive(Debug, Clone, Default)]
pub struct AdjacencyList {
    entries: FxHashMap<TileIndex, Neighbors>,
}

impl AdjacencyList {
    /// Create an empty adjacency list
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the list from the current state of `grid`.
    ///
    /// Collidable tiles and tiles holding an active obstacle get no entry and
    /// never appear as anyone's neighbour.
    pub fn generate(&mut self, grid: &dyn TileGrid) {
        self.entries.clear();

        let (rows, columns) = grid.size_in_tiles();
        for row in 0..rows {
            for column in 0..columns {
                let index = TileIndex::new(row as i32, column as i32);
                if !grid.is_passable(index) {
                    continue;
                }

                let neighbors = Direction::CARDINALS
                    .into_iter()
                    .map(|direction| index.neighbor(direction))
                    .filter(|neighbor| grid.is_passable(*neighbor))
                    .collect();
                self.entries.insert(index, neighbors);
            }
        }
    }

    /// Passable neighbours of `index`; empty if it has no entry
    #[must_use]
    pub fn neighbors_of(&self, index: TileIndex) -> &[TileIndex] {
        self.entries
            .get(&index)
            .map(|neighbors| neighbors.as_slice())
            .unwrap_or(&[])
    }

    /// Check if `index` is a node of the graph
    #[must_use]
    pub fn contains(&self, index: TileIndex) -> bool {
        self.entries.contains_key(&index)
    }

    /// Number of passable tiles
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no tile is passable
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
