//! Closed set of movement policies
//!
//! Lets a game keep differently-driven entities in one collection and tick
//! them uniformly.

use super::{GridMover, KeyboardControlledGridMover, MoveContext, RandomGridMover, TargetGridMover};
use crate::grid::TileIndex;

/// A grid mover together with what drives it.
#[derive(Debug)]
pub enum MovementPolicy {
    /// Walks to a chosen destination
    Target(TargetGridMover),
    /// Wanders at random
    Random(RandomGridMover),
    /// Follows bound keys
    Keyboard(KeyboardControlledGridMover),
}

impl MovementPolicy {
    /// Advance movement, returning the tile reached this frame if any
    pub fn update(&mut self, ctx: &mut MoveContext<'_>, delta_time: f32) -> Option<TileIndex> {
        match self {
            Self::Target(mover) => mover.update(ctx, delta_time),
            Self::Random(mover) => mover.update(ctx, delta_time),
            Self::Keyboard(mover) => mover.update(ctx, delta_time),
        }
    }

    /// Shared movement engine
    #[must_use]
    pub fn mover(&self) -> &GridMover {
        match self {
            Self::Target(mover) => mover.mover(),
            Self::Random(mover) => mover.mover(),
            Self::Keyboard(mover) => mover.mover(),
        }
    }

    pub fn mover_mut(&mut self) -> &mut GridMover {
        match self {
            Self::Target(mover) => mover.mover_mut(),
            Self::Random(mover) => mover.mover_mut(),
            Self::Keyboard(mover) => mover.mover_mut(),
        }
    }

    /// Short name for logs
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Target(_) => "target",
            Self::Random(_) => "random",
            Self::Keyboard(_) => "keyboard",
        }
    }
}

impl From<TargetGridMover> for MovementPolicy {
    fn from(mover: TargetGridMover) -> Self {
        Self::Target(mover)
    }
}

impl From<RandomGridMover> for MovementPolicy {
    fn from(mover: RandomGridMover) -> Self {
        Self::Random(mover)
    }
}

impl From<KeyboardControlledGridMover> for MovementPolicy {
    fn from(mover: KeyboardControlledGridMover) -> Self {
        Self::Keyboard(mover)
    }
}
