//! Tile addressing and grid directions

use glam::Vec2;

/// Discrete (row, column) address of a grid cell.
///
/// Indices are signed so that neighbours of border tiles can be expressed;
/// whether an index is valid depends on the grid it is used with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TileIndex {
    /// Row (grows downward)
    pub row: i32,
    /// Column (grows to the right)
    pub column: i32,
}

impl TileIndex {
    /// Create a new tile index
    #[must_use]
    pub const fn new(row: i32, column: i32) -> Self {
        Self { row, column }
    }

    /// Index of the orthogonal neighbour in `direction`.
    ///
    /// `Direction::None` yields the index itself.
    #[must_use]
    pub const fn neighbor(self, direction: Direction) -> Self {
        let (row, column) = direction.offset();
        Self {
            row: self.row + row,
            column: self.column + column,
        }
    }

    /// Number of orthogonal steps between two indices
    #[must_use]
    pub const fn manhattan_distance(self, other: Self) -> u32 {
        self.row.abs_diff(other.row) + self.column.abs_diff(other.column)
    }
}

impl From<(i32, i32)> for TileIndex {
    fn from((row, column): (i32, i32)) -> Self {
        Self::new(row, column)
    }
}

impl std::fmt::Display for TileIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

/// Movement direction on the grid.
///
/// Doubles as a motion command and, via `None`, as the "not moving" sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    /// Towards lower columns
    Left,
    /// Towards higher columns
    Right,
    /// Towards lower rows
    Up,
    /// Towards higher rows
    Down,
    /// No direction
    #[default]
    None,
}

impl Direction {
    /// The four movable directions, in neighbour enumeration order.
    ///
    /// Path tie-breaks depend on this order, so it must stay fixed.
    pub const CARDINALS: [Self; 4] = [Self::Left, Self::Up, Self::Right, Self::Down];

    /// The direction pointing the opposite way
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::None => Self::None,
        }
    }

    /// (row, column) offset of one step in this direction
    #[must_use]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Self::Left => (0, -1),
            Self::Right => (0, 1),
            Self::Up => (-1, 0),
            Self::Down => (1, 0),
            Self::None => (0, 0),
        }
    }

    /// World-space unit vector (y grows downward, like rows)
    #[must_use]
    pub fn unit_vector(self) -> Vec2 {
        let (row, column) = self.offset();
        Vec2::new(column as f32, row as f32)
    }

    /// Check if this is an actual movement direction
    #[must_use]
    pub const fn is_some(self) -> bool {
        !matches!(self, Self::None)
    }

    /// Direction of the single step leading from `from` to `to`.
    ///
    /// Returns `None` unless the two indices are orthogonally adjacent.
    #[must_use]
    pub fn between(from: TileIndex, to: TileIndex) -> Option<Self> {
        Self::CARDINALS
            .into_iter()
            .find(|direction| from.neighbor(*direction) == to)
    }
}
