//! Tile grid collaborator and an in-memory tile map

use glam::Vec2;
use rustc_hash::FxHashSet;

use super::TileIndex;

/// A single grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    /// Address of this tile
    pub index: TileIndex,
    /// Static collidability flag
    pub collidable: bool,
}

impl Tile {
    /// Check if the tile blocks traversal on its own
    #[must_use]
    pub const fn is_collidable(&self) -> bool {
        self.collidable
    }
}

/// Read-only view of a tile grid consumed by the movement core.
///
/// Rendering and obstacle bookkeeping belong to the implementor; movers and
/// the pathfinder only ever query.
pub trait TileGrid {
    /// Grid dimensions as (rows, columns)
    fn size_in_tiles(&self) -> (usize, usize);

    /// Get the tile at `index`, if it exists
    fn tile(&self, index: TileIndex) -> Option<&Tile>;

    /// Check if a dynamic obstacle currently occupies `index`
    fn has_active_obstacle(&self, index: TileIndex) -> bool;

    /// Tile containing a world position
    fn index_of(&self, position: Vec2) -> Option<TileIndex>;

    /// World position of the centre of a tile
    fn position_of(&self, index: TileIndex) -> Vec2;

    /// Check if `index` addresses a cell of this grid
    fn is_index_valid(&self, index: TileIndex) -> bool {
        let (rows, columns) = self.size_in_tiles();
        index.row >= 0
            && index.column >= 0
            && (index.row as usize) < rows
            && (index.column as usize) < columns
    }

    /// Check if an entity may enter `index`
    fn is_passable(&self, index: TileIndex) -> bool {
        self.is_index_valid(index)
            && self.tile(index).is_some_and(|tile| !tile.is_collidable())
            && !self.has_active_obstacle(index)
    }
}

/// A rectangular tile map stored in row-major order
#[derive(Debug, Clone)]
pub struct TileMap {
    /// Height in tiles
    rows: usize,
    /// Width in tiles
    columns: usize,
    /// Edge length of a tile in world units
    tile_size: f32,
    /// World position of the top-left corner
    origin: Vec2,
    tiles: Vec<Tile>,
    /// Tiles currently occupied by dynamic obstacles
    obstacles: FxHashSet<TileIndex>,
}

impl TileMap {
    /// Create a new map (all tiles passable)
    #[must_use]
    pub fn new(rows: usize, columns: usize, tile_size: f32) -> Self {
        let tiles = (0..rows)
            .flat_map(|row| {
                (0..columns).map(move |column| Tile {
                    index: TileIndex::new(row as i32, column as i32),
                    collidable: false,
                })
            })
            .collect();

        Self {
            rows,
            columns,
            tile_size,
            origin: Vec2::ZERO,
            tiles,
            obstacles: FxHashSet::default(),
        }
    }

    /// Place the map's top-left corner at `origin`
    #[must_use]
    pub fn with_origin(mut self, origin: Vec2) -> Self {
        self.origin = origin;
        self
    }

    /// Edge length of a tile in world units
    #[must_use]
    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    /// World position of the top-left corner
    #[must_use]
    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    /// Set a tile's collidability. Invalid indices are ignored.
    pub fn set_collidable(&mut self, index: TileIndex, collidable: bool) {
        if let Some(slot) = self.slot(index) {
            self.tiles[slot].collidable = collidable;
        }
    }

    /// Mark `index` as occupied by an obstacle.
    ///
    /// Returns `false` if the index is invalid or already occupied.
    pub fn add_obstacle(&mut self, index: TileIndex) -> bool {
        self.is_index_valid(index) && self.obstacles.insert(index)
    }

    /// Clear the obstacle on `index`, returning whether there was one
    pub fn remove_obstacle(&mut self, index: TileIndex) -> bool {
        self.obstacles.remove(&index)
    }

    /// Iterate over all tiles in row-major order
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    fn slot(&self, index: TileIndex) -> Option<usize> {
        self.is_index_valid(index)
            .then(|| index.row as usize * self.columns + index.column as usize)
    }
}

impl TileGrid for TileMap {
    fn size_in_tiles(&self) -> (usize, usize) {
        (self.rows, self.columns)
    }

    fn tile(&self, index: TileIndex) -> Option<&Tile> {
        self.slot(index).map(|slot| &self.tiles[slot])
    }

    fn has_active_obstacle(&self, index: TileIndex) -> bool {
        self.obstacles.contains(&index)
    }

    fn index_of(&self, position: Vec2) -> Option<TileIndex> {
        let local = (position - self.origin) / self.tile_size;
        let index = TileIndex::new(local.y.floor() as i32, local.x.floor() as i32);
        self.is_index_valid(index).then_some(index)
    }

    fn position_of(&self, index: TileIndex) -> Vec2 {
        self.origin
            + Vec2::new(
                (index.column as f32 + 0.5) * self.tile_size,
                (index.row as f32 + 0.5) * self.tile_size,
            )
    }
}
