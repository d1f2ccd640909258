//! Destination-seeking movement
//!
//! A [`TargetGridMover`] walks its entity to a destination tile along a
//! breadth-first shortest path, one leg per tile arrival.

use super::{ArrivalHandler, DirectionRequest, GridMover, MoveContext, MovementError};
use crate::ai::{Path, PathFinder};
use crate::core::{ListenerId, MovementConfig, MovementEvent};
use crate::grid::{Direction, TileGrid, TileIndex};

// ============================================================================
// Path Follower
// ============================================================================

/// Feeds a planned path into a [`GridMover`] one step per arrival.
///
/// Never retries on its own: an unreachable destination yields an empty path,
/// and a step found blocked drops what is left of the path.
#[derive(Debug, Default)]
pub(crate) struct PathFollower {
    pathfinder: PathFinder,
    destination: Option<TileIndex>,
    /// Steps still to take, next first
    path: Path,
    /// Destination changed mid-leg; plan again at the next arrival
    replan_pending: bool,
    paused: bool,
}

impl PathFollower {
    pub(crate) fn set_destination(&mut self, mover: &mut GridMover, ctx: &mut MoveContext<'_>, index: TileIndex) {
        if !ctx.grid.is_index_valid(index) {
            log::debug!("Ignoring destination {index} outside the grid");
            return;
        }
        if self.destination == Some(index) {
            return;
        }

        self.destination = Some(index);
        if mover.is_moving() {
            log::debug!("Destination {index} set mid-leg; replanning on arrival");
            self.replan_pending = true;
            return;
        }

        self.plan(ctx.grid, mover.current_tile());
        self.advance(mover, ctx);
    }

    /// Plan again from the mover's tile, or at the next arrival if moving
    pub(crate) fn replan(&mut self, mover: &mut GridMover, ctx: &mut MoveContext<'_>) {
        if mover.is_moving() {
            self.replan_pending = true;
            return;
        }
        self.plan(ctx.grid, mover.current_tile());
        self.advance(mover, ctx);
    }

    pub(crate) fn pause(&mut self) {
        self.paused = true;
    }

    pub(crate) fn resume(&mut self, mover: &mut GridMover, ctx: &mut MoveContext<'_>) {
        self.paused = false;
        if self.replan_pending && !mover.is_moving() {
            self.plan(ctx.grid, mover.current_tile());
        }
        self.advance(mover, ctx);
    }

    pub(crate) fn clear(&mut self) {
        self.destination = None;
        self.path.clear();
        self.replan_pending = false;
    }

    pub(crate) fn is_paused(&self) -> bool {
        self.paused
    }

    pub(crate) fn destination(&self) -> Option<TileIndex> {
        self.destination
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    pub(crate) fn reachable_from(&mut self, grid: &dyn TileGrid, source: TileIndex) -> Vec<TileIndex> {
        self.pathfinder.reachable_from(grid, source)
    }

    fn plan(&mut self, grid: &dyn TileGrid, from: TileIndex) {
        self.replan_pending = false;
        let Some(destination) = self.destination else {
            self.path.clear();
            return;
        };

        self.path = self.pathfinder.find_path(grid, from, destination);
        if self.path.is_empty() && from != destination {
            log::debug!("No route from {from} to {destination}");
        } else {
            log::debug!("Planned {} steps from {from} to {destination}", self.path.len());
        }
    }

    /// Issue the next path step if idle and not paused
    fn advance(&mut self, mover: &mut GridMover, ctx: &mut MoveContext<'_>) {
        if self.paused || mover.is_moving() {
            return;
        }

        let current = mover.current_tile();
        let Some(next) = self.path.peek() else {
            return;
        };

        let direction = match Direction::between(current, next) {
            Some(direction) => direction,
            None => {
                log::debug!("{current} is off the planned route; replanning");
                self.plan(ctx.grid, current);
                match self.path.peek().and_then(|next| Direction::between(current, next)) {
                    Some(direction) => direction,
                    None => return,
                }
            }
        };

        match mover.request_direction_change(ctx, direction) {
            DirectionRequest::Started => {
                self.path.pop_front();
            }
            DirectionRequest::Blocked => {
                log::debug!("Route through {} is blocked; dropping path", current.neighbor(direction));
                self.path.clear();
            }
            DirectionRequest::Deferred | DirectionRequest::Ignored => {}
        }
    }
}

impl ArrivalHandler for PathFollower {
    fn on_adjacent_tile_reached(&mut self, mover: &mut GridMover, ctx: &mut MoveContext<'_>, tile: TileIndex) {
        if self.destination == Some(tile) {
            mover.emit(MovementEvent::DestinationReached {
                entity: mover.entity(),
                tile,
            });
        }

        if self.replan_pending {
            self.plan(ctx.grid, tile);
        }

        self.advance(mover, ctx);
    }
}

// ============================================================================
// Target Grid Mover
// ============================================================================

/// Moves an entity to a chosen destination tile.
#[derive(Debug)]
pub struct TargetGridMover {
    mover: GridMover,
    follower: PathFollower,
}

impl TargetGridMover {
    /// Attach to `entity` with no destination.
    ///
    /// # Errors
    ///
    /// See [`GridMover::new`]
    pub fn new(ctx: &mut MoveContext<'_>, entity: hecs::Entity, speed: f32) -> Result<Self, MovementError> {
        Ok(Self {
            mover: GridMover::new(ctx, entity, speed)?,
            follower: PathFollower::default(),
        })
    }

    /// Attach to `entity` using configured speed
    ///
    /// # Errors
    ///
    /// See [`GridMover::new`]
    pub fn from_config(
        ctx: &mut MoveContext<'_>,
        entity: hecs::Entity,
        config: &MovementConfig,
    ) -> Result<Self, MovementError> {
        Self::new(ctx, entity, config.speed)
    }

    /// Head for `index`.
    ///
    /// Invalid indices are ignored and re-setting the current destination does
    /// nothing. While a leg is in progress the new route is planned when that
    /// leg ends.
    pub fn set_destination(&mut self, ctx: &mut MoveContext<'_>, index: TileIndex) {
        self.follower.set_destination(&mut self.mover, ctx, index);
    }

    /// Plan a fresh route to the current destination.
    ///
    /// Use this after the grid changes; routes are never retried automatically.
    pub fn replan(&mut self, ctx: &mut MoveContext<'_>) {
        self.follower.replan(&mut self.mover, ctx);
    }

    /// Forget the destination; the current leg still finishes
    pub fn clear_destination(&mut self) {
        self.follower.clear();
    }

    /// Advance movement, returning the tile reached this frame if any
    pub fn update(&mut self, ctx: &mut MoveContext<'_>, delta_time: f32) -> Option<TileIndex> {
        self.mover.update_with(ctx, delta_time, &mut self.follower)
    }

    /// Stop issuing steps once the current leg ends
    pub fn pause(&mut self) {
        self.follower.pause();
    }

    /// Continue along the path
    pub fn resume(&mut self, ctx: &mut MoveContext<'_>) {
        self.follower.resume(&mut self.mover, ctx);
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.follower.is_paused()
    }

    /// Call `callback` with the tile each time the destination is reached
    pub fn on_destination_reached(&mut self, mut callback: impl FnMut(TileIndex) + 'static) -> ListenerId {
        self.mover.subscribe(MovementEvent::DESTINATION_REACHED, move |event| {
            if let MovementEvent::DestinationReached { tile, .. } = event {
                callback(*tile);
            }
        })
    }

    #[must_use]
    pub fn destination(&self) -> Option<TileIndex> {
        self.follower.destination()
    }

    /// Steps not yet taken
    #[must_use]
    pub fn remaining_path(&self) -> &Path {
        self.follower.path()
    }

    #[must_use]
    pub fn mover(&self) -> &GridMover {
        &self.mover
    }

    pub fn mover_mut(&mut self) -> &mut GridMover {
        &mut self.mover
    }
}
