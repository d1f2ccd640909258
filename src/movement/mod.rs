//! Grid movement
//!
//! [`GridMover`] moves an entity tile by tile; the policies decide where it
//! goes next:
//! - [`TargetGridMover`]: shortest path to a destination
//! - [`RandomGridMover`]: random wandering
//! - [`KeyboardControlledGridMover`]: bound keys
//!
//! All calls take a [`MoveContext`] carrying the grid and the entity world.

mod context;
mod error;
mod grid_mover;
mod keyboard;
mod policy;
mod random;
mod target;

pub use context::MoveContext;
pub use error::MovementError;
pub use grid_mover::{ArrivalHandler, DirectionRequest, GridMover};
pub use keyboard::KeyboardControlledGridMover;
pub use policy::MovementPolicy;
pub use random::{RandomGridMover, WanderMode};
pub use target::TargetGridMover;
