//! Random wandering
//!
//! A [`RandomGridMover`] keeps its entity on the move without a goal. In
//! [`WanderMode::Step`] it picks a fresh direction at every tile, avoiding
//! U-turns unless stuck in a dead end. In [`WanderMode::Advanced`] it picks a
//! random reachable tile and walks a shortest path there before choosing again.

use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::target::PathFollower;
use super::{ArrivalHandler, GridMover, MoveContext, MovementError};
use crate::core::MovementConfig;
use crate::grid::{Direction, TileIndex};

/// How a random mover chooses where to go
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum WanderMode {
    /// One random direction per tile
    #[default]
    Step,
    /// Random reachable destination, reached by pathfinding
    Advanced,
}

#[derive(Debug)]
struct Wanderer {
    rng: ChaCha8Rng,
    active: bool,
    mode: WanderMode,
    follower: PathFollower,
}

impl Wanderer {
    fn new(rng: ChaCha8Rng, mode: WanderMode) -> Self {
        Self {
            rng,
            active: false,
            mode,
            follower: PathFollower::default(),
        }
    }

    /// Choose and issue the next move if idle
    fn wander(&mut self, mover: &mut GridMover, ctx: &mut MoveContext<'_>) {
        if !self.active || mover.is_moving() {
            return;
        }

        match self.mode {
            WanderMode::Step => self.step(mover, ctx),
            WanderMode::Advanced => self.roam(mover, ctx),
        }
    }

    fn step(&mut self, mover: &mut GridMover, ctx: &mut MoveContext<'_>) {
        let current = mover.current_tile();
        let open: SmallVec<[Direction; 4]> = Direction::CARDINALS
            .into_iter()
            .filter(|direction| ctx.grid.is_passable(current.neighbor(*direction)))
            .collect();

        let reverse = mover.last_direction().opposite();
        let onward: SmallVec<[Direction; 4]> = open.iter().copied().filter(|d| *d != reverse).collect();
        let candidates = if onward.is_empty() { &open } else { &onward };

        let Some(&direction) = candidates.choose(&mut self.rng) else {
            log::debug!("{:?} is boxed in at {current}", mover.entity());
            return;
        };

        log::debug!("{:?} wanders {direction:?} from {current}", mover.entity());
        mover.request_direction_change(ctx, direction);
    }

    fn roam(&mut self, mover: &mut GridMover, ctx: &mut MoveContext<'_>) {
        let current = mover.current_tile();
        let reachable = self.follower.reachable_from(ctx.grid, current);

        let Some(&destination) = reachable.choose(&mut self.rng) else {
            log::debug!("{:?} has nowhere to roam from {current}", mover.entity());
            return;
        };

        log::debug!("{:?} roams towards {destination}", mover.entity());
        self.follower.clear();
        self.follower.set_destination(mover, ctx, destination);
    }
}

impl ArrivalHandler for Wanderer {
    fn on_adjacent_tile_reached(&mut self, mover: &mut GridMover, ctx: &mut MoveContext<'_>, tile: TileIndex) {
        if !self.active {
            return;
        }

        if self.mode == WanderMode::Advanced {
            self.follower.on_adjacent_tile_reached(mover, ctx, tile);
        }

        // Advanced mode only picks again once the route is done or dropped
        self.wander(mover, ctx);
    }
}

/// Wanders an entity around the grid.
#[derive(Debug)]
pub struct RandomGridMover {
    mover: GridMover,
    wanderer: Wanderer,
}

impl RandomGridMover {
    /// Attach to `entity` with an entropy-seeded generator.
    ///
    /// # Errors
    ///
    /// See [`GridMover::new`]
    pub fn new(ctx: &mut MoveContext<'_>, entity: hecs::Entity, speed: f32) -> Result<Self, MovementError> {
        Ok(Self {
            mover: GridMover::new(ctx, entity, speed)?,
            wanderer: Wanderer::new(ChaCha8Rng::from_entropy(), WanderMode::Step),
        })
    }

    /// Attach to `entity` with a fixed seed, for reproducible walks
    ///
    /// # Errors
    ///
    /// See [`GridMover::new`]
    pub fn with_seed(
        ctx: &mut MoveContext<'_>,
        entity: hecs::Entity,
        speed: f32,
        seed: u64,
    ) -> Result<Self, MovementError> {
        Ok(Self {
            mover: GridMover::new(ctx, entity, speed)?,
            wanderer: Wanderer::new(ChaCha8Rng::seed_from_u64(seed), WanderMode::Step),
        })
    }

    /// Attach using configured speed, seed and wander mode
    ///
    /// # Errors
    ///
    /// See [`GridMover::new`]
    pub fn from_config(
        ctx: &mut MoveContext<'_>,
        entity: hecs::Entity,
        config: &MovementConfig,
    ) -> Result<Self, MovementError> {
        let mut wanderer = Self::with_seed(ctx, entity, config.speed, config.random_seed)?;
        wanderer.set_mode(config.wander_mode);
        Ok(wanderer)
    }

    /// Start wandering, issuing a first move if idle
    pub fn start_movement(&mut self, ctx: &mut MoveContext<'_>) {
        self.wanderer.active = true;
        self.wanderer.wander(&mut self.mover, ctx);
    }

    /// Stop once the current leg ends
    pub fn stop_movement(&mut self) {
        self.wanderer.active = false;
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.wanderer.active
    }

    /// Switch wander mode; an advanced route in progress is abandoned
    pub fn set_mode(&mut self, mode: WanderMode) {
        self.wanderer.mode = mode;
        self.wanderer.follower.clear();
    }

    #[must_use]
    pub fn mode(&self) -> WanderMode {
        self.wanderer.mode
    }

    /// Current roaming destination in advanced mode
    #[must_use]
    pub fn destination(&self) -> Option<TileIndex> {
        self.wanderer.follower.destination()
    }

    /// Advance movement, returning the tile reached this frame if any
    pub fn update(&mut self, ctx: &mut MoveContext<'_>, delta_time: f32) -> Option<TileIndex> {
        self.mover.update_with(ctx, delta_time, &mut self.wanderer)
    }

    #[must_use]
    pub fn mover(&self) -> &GridMover {
        &self.mover
    }

    pub fn mover_mut(&mut self) -> &mut GridMover {
        &mut self.mover
    }
}
