//! Tile-to-tile movement engine shared by all movement policies
//!
//! A [`GridMover`] is either *idle*, resting on a tile centre, or *moving*
//! along one leg towards the centre of an adjacent tile. Direction changes
//! requested mid-leg are buffered and applied on arrival, so an entity never
//! turns between tiles.

use hecs::Entity;

use super::{MoveContext, MovementError};
use crate::core::{EventEmitter, ListenerId, MovementEvent};
use crate::ecs::GridBody;
use crate::grid::{Direction, TileIndex};

/// Outcome of [`GridMover::request_direction_change`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectionRequest {
    /// A new leg started
    Started,
    /// The mover is mid-leg; the request will be applied on arrival
    Deferred,
    /// The neighbouring tile is blocked or off the grid
    Blocked,
    /// Nothing to do (`Direction::None`, or the entity is gone)
    Ignored,
}

/// Reaction of a movement policy to its mover reaching a tile.
///
/// Invoked synchronously from [`GridMover::update_with`] after the
/// `adjacent_tile_reached` event, while the mover is idle on `tile`.
pub trait ArrivalHandler {
    /// Called once per completed leg.
    fn on_adjacent_tile_reached(&mut self, mover: &mut GridMover, ctx: &mut MoveContext<'_>, tile: TileIndex);
}

impl ArrivalHandler for () {
    fn on_adjacent_tile_reached(&mut self, _mover: &mut GridMover, _ctx: &mut MoveContext<'_>, _tile: TileIndex) {}
}

/// Moves one entity across the grid in discrete legs.
#[derive(Debug)]
pub struct GridMover {
    /// Entity being moved
    entity: Entity,
    /// World units per second
    speed: f32,
    /// Direction of the current leg, `None` when idle
    direction: Direction,
    /// Direction of the most recent leg
    last_direction: Direction,
    /// Tile the entity rests on, or departed from while moving
    current_tile: TileIndex,
    /// Tile being approached; `Some` exactly while moving
    target_tile: Option<TileIndex>,
    /// Request buffered during a leg
    deferred: Option<Direction>,
    events: EventEmitter<MovementEvent>,
}

impl GridMover {
    /// Attach a mover to `entity`, snapping it onto the centre of its tile.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity has no `GridBody`, stands outside the
    /// grid, or `speed` is negative or not finite
    pub fn new(ctx: &mut MoveContext<'_>, entity: Entity, speed: f32) -> Result<Self, MovementError> {
        if !speed.is_finite() || speed < 0.0 {
            return Err(MovementError::InvalidSpeed(speed));
        }
        let current_tile = Self::settle(ctx, entity)?;

        Ok(Self {
            entity,
            speed,
            direction: Direction::None,
            last_direction: Direction::None,
            current_tile,
            target_tile: None,
            deferred: None,
            events: EventEmitter::new(),
        })
    }

    /// Snap an entity onto its tile centre and return the tile
    fn settle(ctx: &mut MoveContext<'_>, entity: Entity) -> Result<TileIndex, MovementError> {
        let mut body = ctx
            .world
            .get_mut::<GridBody>(entity)
            .map_err(|_| MovementError::missing(entity))?;
        let tile = ctx
            .grid
            .index_of(body.position)
            .ok_or_else(|| MovementError::OffGrid {
                x: body.position.x,
                y: body.position.y,
            })?;

        body.position = ctx.grid.position_of(tile);
        body.direction = Direction::None;
        Ok(tile)
    }

    /// Ask the entity to move one tile in `direction`.
    ///
    /// While idle the leg starts immediately if the neighbouring tile is
    /// passable; otherwise an `obstacle_hit` event fires and nothing changes.
    /// While moving the request replaces any earlier buffered one and is
    /// applied on arrival. `Direction::None` discards a buffered request.
    pub fn request_direction_change(&mut self, ctx: &mut MoveContext<'_>, direction: Direction) -> DirectionRequest {
        if !direction.is_some() {
            self.deferred = None;
            return DirectionRequest::Ignored;
        }

        if self.is_moving() {
            self.deferred = Some(direction);
            return DirectionRequest::Deferred;
        }

        let next = self.current_tile.neighbor(direction);
        if !ctx.grid.is_passable(next) {
            log::debug!(
                "{:?} blocked moving {direction:?} from {} into {next}",
                self.entity,
                self.current_tile
            );
            self.events.emit(&MovementEvent::ObstacleHit {
                entity: self.entity,
                tile: next,
                direction,
            });
            return DirectionRequest::Blocked;
        }

        match ctx.world.get_mut::<GridBody>(self.entity) {
            Ok(mut body) => body.direction = direction,
            Err(_) => {
                log::warn!("{:?} has no grid body; request ignored", self.entity);
                return DirectionRequest::Ignored;
            }
        }

        self.direction = direction;
        self.last_direction = direction;
        self.target_tile = Some(next);
        self.events.emit(&MovementEvent::DirectionChanged {
            entity: self.entity,
            direction,
        });
        DirectionRequest::Started
    }

    /// Advance the current leg by `delta_time` seconds.
    ///
    /// Returns the tile reached, if the leg completed during this call.
    pub fn update(&mut self, ctx: &mut MoveContext<'_>, delta_time: f32) -> Option<TileIndex> {
        self.update_with(ctx, delta_time, &mut ())
    }

    /// Advance the current leg, letting `handler` react to an arrival.
    ///
    /// At most one tile boundary is crossed per call: displacement beyond the
    /// target centre is discarded. On arrival the entity snaps onto the centre,
    /// the mover goes idle, `adjacent_tile_reached` fires, `handler` runs, and
    /// finally any buffered request is re-issued.
    pub fn update_with(
        &mut self,
        ctx: &mut MoveContext<'_>,
        delta_time: f32,
        handler: &mut dyn ArrivalHandler,
    ) -> Option<TileIndex> {
        let target = self.target_tile?;
        let destination = ctx.grid.position_of(target);
        let step = self.speed * delta_time.max(0.0);

        {
            let Ok(mut body) = ctx.world.get_mut::<GridBody>(self.entity) else {
                log::warn!("{:?} vanished mid-leg; mover reset", self.entity);
                self.halt();
                return None;
            };

            let distance = body.position.distance(destination);
            if step < distance {
                body.position += self.direction.unit_vector() * step;
                return None;
            }

            body.position = destination;
            body.direction = Direction::None;
        }

        self.current_tile = target;
        self.target_tile = None;
        self.direction = Direction::None;
        self.events.emit(&MovementEvent::AdjacentTileReached {
            entity: self.entity,
            tile: target,
        });

        handler.on_adjacent_tile_reached(self, ctx, target);

        if let Some(direction) = self.deferred.take() {
            self.request_direction_change(ctx, direction);
        }

        Some(target)
    }

    /// Drop the current leg and any buffered request without moving the entity
    fn halt(&mut self) {
        self.target_tile = None;
        self.direction = Direction::None;
        self.deferred = None;
    }

    /// Move a different entity from now on.
    ///
    /// The mover resets to idle on the new entity's tile and fires
    /// `target_changed`. Switching to the current entity does nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if the new entity has no `GridBody` or stands outside
    /// the grid; the mover is left unchanged in that case
    pub fn set_entity(&mut self, ctx: &mut MoveContext<'_>, entity: Entity) -> Result<(), MovementError> {
        if entity == self.entity {
            return Ok(());
        }

        let tile = Self::settle(ctx, entity)?;
        if let Ok(mut body) = ctx.world.get_mut::<GridBody>(self.entity) {
            body.direction = Direction::None;
        }

        let previous = std::mem::replace(&mut self.entity, entity);
        self.current_tile = tile;
        self.last_direction = Direction::None;
        self.halt();

        log::debug!("Mover switched from {previous:?} to {entity:?} at {tile}");
        self.events.emit(&MovementEvent::TargetChanged {
            previous,
            current: entity,
        });
        Ok(())
    }

    /// Set travel speed in world units per second.
    ///
    /// Negative or non-finite values are ignored.
    pub fn set_speed(&mut self, speed: f32) {
        if !speed.is_finite() || speed < 0.0 {
            log::warn!("Ignoring invalid mover speed {speed}");
            return;
        }
        self.speed = speed;
    }

    /// Travel speed in world units per second
    #[must_use]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Entity being moved
    #[must_use]
    pub fn entity(&self) -> Entity {
        self.entity
    }

    /// Check if a leg is in progress
    #[must_use]
    pub fn is_moving(&self) -> bool {
        self.target_tile.is_some()
    }

    /// Direction of the current leg (`None` when idle)
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Direction of the most recent leg, even after arriving
    #[must_use]
    pub fn last_direction(&self) -> Direction {
        self.last_direction
    }

    /// Tile the entity rests on, or the tile it is leaving
    #[must_use]
    pub fn current_tile(&self) -> TileIndex {
        self.current_tile
    }

    /// Tile being approached, if moving
    #[must_use]
    pub fn target_tile(&self) -> Option<TileIndex> {
        self.target_tile
    }

    /// Request waiting for the end of the current leg
    #[must_use]
    pub fn pending_direction(&self) -> Option<Direction> {
        self.deferred
    }

    /// Subscribe to movement events called `name`
    pub fn subscribe(&mut self, name: &'static str, listener: impl FnMut(&MovementEvent) + 'static) -> ListenerId {
        self.events.subscribe(name, listener)
    }

    /// Remove a movement event listener
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.events.unsubscribe(id)
    }

    pub(crate) fn emit(&mut self, event: MovementEvent) {
        self.events.emit(&event);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;

    use super::*;
    use crate::ecs::World;
    use crate::grid::{TileGrid, TileMap};

    fn spawn_at(world: &mut World, map: &TileMap, tile: TileIndex) -> Entity {
        world.spawn_body("walker", GridBody::new(map.position_of(tile)))
    }

    fn record(mover: &mut GridMover, name: &'static str) -> Rc<RefCell<Vec<MovementEvent>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        mover.subscribe(name, move |event| sink.borrow_mut().push(*event));
        log
    }

    #[derive(Default)]
    struct Recorder {
        arrivals: Vec<(TileIndex, bool)>,
    }

    impl ArrivalHandler for Recorder {
        fn on_adjacent_tile_reached(&mut self, mover: &mut GridMover, _ctx: &mut MoveContext<'_>, tile: TileIndex) {
            self.arrivals.push((tile, mover.is_moving()));
        }
    }

    #[test]
    fn test_new_snaps_to_tile_centre() {
        let map = TileMap::new(3, 3, 1.0);
        let mut world = World::new();
        let entity = world.spawn_body("walker", GridBody::new(Vec2::new(1.2, 0.7)));
        let mut ctx = MoveContext::new(&map, &mut world);

        let mover = GridMover::new(&mut ctx, entity, 1.0).unwrap();

        assert_eq!(mover.current_tile(), TileIndex::new(0, 1));
        assert!(!mover.is_moving());
        assert_eq!(mover.direction(), Direction::None);
        assert_eq!(world.body(entity).unwrap().position, Vec2::new(1.5, 0.5));
    }

    #[test]
    fn test_new_rejects_bad_preconditions() {
        let map = TileMap::new(3, 3, 1.0);
        let mut world = World::new();
        let bare = world.spawn(());
        let outside = world.spawn_body("lost", GridBody::new(Vec2::new(-4.0, 1.0)));
        let fine = spawn_at(&mut world, &map, TileIndex::new(1, 1));
        let mut ctx = MoveContext::new(&map, &mut world);

        assert!(matches!(
            GridMover::new(&mut ctx, bare, 1.0),
            Err(MovementError::MissingEntity(_))
        ));
        assert!(matches!(
            GridMover::new(&mut ctx, outside, 1.0),
            Err(MovementError::OffGrid { .. })
        ));
        assert!(matches!(
            GridMover::new(&mut ctx, fine, f32::NAN),
            Err(MovementError::InvalidSpeed(_))
        ));
        assert!(matches!(
            GridMover::new(&mut ctx, fine, -2.0),
            Err(MovementError::InvalidSpeed(_))
        ));
    }

    #[test]
    fn test_leg_interpolates_then_snaps() {
        let map = TileMap::new(3, 3, 1.0);
        let mut world = World::new();
        let entity = spawn_at(&mut world, &map, TileIndex::new(0, 0));
        let mut ctx = MoveContext::new(&map, &mut world);
        let mut mover = GridMover::new(&mut ctx, entity, 1.0).unwrap();
        let arrivals = record(&mut mover, MovementEvent::ADJACENT_TILE_REACHED);

        assert_eq!(
            mover.request_direction_change(&mut ctx, Direction::Right),
            DirectionRequest::Started
        );
        assert_eq!(mover.target_tile(), Some(TileIndex::new(0, 1)));
        assert_eq!(ctx.world.body(entity).unwrap().direction, Direction::Right);

        for expected_x in [0.75, 1.0, 1.25] {
            assert_eq!(mover.update(&mut ctx, 0.25), None);
            let body = ctx.world.body(entity).unwrap();
            assert_eq!(body.position, Vec2::new(expected_x, 0.5));
            assert!(mover.is_moving());
        }

        assert_eq!(mover.update(&mut ctx, 0.25), Some(TileIndex::new(0, 1)));
        let body = ctx.world.body(entity).unwrap();
        assert_eq!(body.position, Vec2::new(1.5, 0.5));
        assert_eq!(body.direction, Direction::None);
        assert!(!mover.is_moving());
        assert_eq!(mover.direction(), Direction::None);
        assert_eq!(mover.last_direction(), Direction::Right);
        assert_eq!(mover.current_tile(), TileIndex::new(0, 1));
        assert_eq!(
            *arrivals.borrow(),
            vec![MovementEvent::AdjacentTileReached {
                entity,
                tile: TileIndex::new(0, 1)
            }]
        );
    }

    #[test]
    fn test_blocked_request_leaves_state_unchanged() {
        let mut map = TileMap::new(3, 3, 1.0);
        map.set_collidable(TileIndex::new(1, 2), true);
        map.add_obstacle(TileIndex::new(0, 1));
        let mut world = World::new();
        let entity = spawn_at(&mut world, &map, TileIndex::new(1, 1));
        let mut ctx = MoveContext::new(&map, &mut world);
        let mut mover = GridMover::new(&mut ctx, entity, 1.0).unwrap();
        let hits = record(&mut mover, MovementEvent::OBSTACLE_HIT);
        let turns = record(&mut mover, MovementEvent::DIRECTION_CHANGED);
        let before = ctx.world.body(entity).unwrap();

        assert_eq!(
            mover.request_direction_change(&mut ctx, Direction::Right),
            DirectionRequest::Blocked
        );

        assert_eq!(ctx.world.body(entity).unwrap(), before);
        assert!(!mover.is_moving());
        assert_eq!(mover.direction(), Direction::None);
        assert_eq!(mover.current_tile(), TileIndex::new(1, 1));
        assert_eq!(
            *hits.borrow(),
            vec![MovementEvent::ObstacleHit {
                entity,
                tile: TileIndex::new(1, 2),
                direction: Direction::Right
            }]
        );

        // Obstacles block the same way collidable tiles do
        assert_eq!(
            mover.request_direction_change(&mut ctx, Direction::Up),
            DirectionRequest::Blocked
        );
        assert_eq!(hits.borrow().len(), 2);
        assert!(turns.borrow().is_empty());
        assert_eq!(mover.update(&mut ctx, 1.0), None);
    }

    #[test]
    fn test_grid_edge_blocks() {
        let map = TileMap::new(2, 2, 1.0);
        let mut world = World::new();
        let entity = spawn_at(&mut world, &map, TileIndex::new(0, 0));
        let mut ctx = MoveContext::new(&map, &mut world);
        let mut mover = GridMover::new(&mut ctx, entity, 1.0).unwrap();
        let hits = record(&mut mover, MovementEvent::OBSTACLE_HIT);

        assert_eq!(
            mover.request_direction_change(&mut ctx, Direction::Left),
            DirectionRequest::Blocked
        );
        assert_eq!(
            mover.request_direction_change(&mut ctx, Direction::Up),
            DirectionRequest::Blocked
        );
        assert_eq!(hits.borrow().len(), 2);
    }

    #[test]
    fn test_request_while_moving_waits_for_arrival() {
        let map = TileMap::new(3, 3, 1.0);
        let mut world = World::new();
        let entity = spawn_at(&mut world, &map, TileIndex::new(0, 0));
        let mut ctx = MoveContext::new(&map, &mut world);
        let mut mover = GridMover::new(&mut ctx, entity, 1.0).unwrap();
        let turns = record(&mut mover, MovementEvent::DIRECTION_CHANGED);

        mover.request_direction_change(&mut ctx, Direction::Right);
        assert_eq!(mover.update(&mut ctx, 0.5), None);

        assert_eq!(
            mover.request_direction_change(&mut ctx, Direction::Down),
            DirectionRequest::Deferred
        );
        assert_eq!(mover.direction(), Direction::Right);
        assert_eq!(mover.pending_direction(), Some(Direction::Down));

        assert_eq!(mover.update(&mut ctx, 0.25), None);
        assert_eq!(mover.direction(), Direction::Right);
        assert_eq!(ctx.world.body(entity).unwrap().position, Vec2::new(1.25, 0.5));

        assert_eq!(mover.update(&mut ctx, 0.25), Some(TileIndex::new(0, 1)));
        assert_eq!(mover.direction(), Direction::Down);
        assert_eq!(mover.target_tile(), Some(TileIndex::new(1, 1)));
        assert_eq!(mover.pending_direction(), None);
        assert_eq!(turns.borrow().len(), 2);
    }

    #[test]
    fn test_buffered_request_blocked_on_arrival() {
        let mut map = TileMap::new(3, 3, 1.0);
        map.set_collidable(TileIndex::new(0, 1), true);
        let mut world = World::new();
        let entity = spawn_at(&mut world, &map, TileIndex::new(1, 0));
        let mut ctx = MoveContext::new(&map, &mut world);
        let mut mover = GridMover::new(&mut ctx, entity, 1.0).unwrap();
        let hits = record(&mut mover, MovementEvent::OBSTACLE_HIT);
        let turns = record(&mut mover, MovementEvent::DIRECTION_CHANGED);

        mover.request_direction_change(&mut ctx, Direction::Right);
        assert_eq!(
            mover.request_direction_change(&mut ctx, Direction::Up),
            DirectionRequest::Deferred
        );
        assert_eq!(mover.update(&mut ctx, 0.5), None);
        assert!(hits.borrow().is_empty());

        assert_eq!(mover.update(&mut ctx, 0.5), Some(TileIndex::new(1, 1)));

        assert!(!mover.is_moving());
        assert_eq!(mover.direction(), Direction::None);
        assert_eq!(mover.pending_direction(), None);
        assert_eq!(ctx.world.body(entity).unwrap().position, Vec2::new(1.5, 1.5));
        assert_eq!(
            *hits.borrow(),
            vec![MovementEvent::ObstacleHit {
                entity,
                tile: TileIndex::new(0, 1),
                direction: Direction::Up
            }]
        );
        assert_eq!(turns.borrow().len(), 1);

        assert_eq!(mover.update(&mut ctx, 1.0), None);
        assert_eq!(hits.borrow().len(), 1);
    }

    #[test]
    fn test_unsubscribed_listener_stays_silent() {
        let map = TileMap::new(1, 2, 1.0);
        let mut world = World::new();
        let entity = spawn_at(&mut world, &map, TileIndex::new(0, 0));
        let mut ctx = MoveContext::new(&map, &mut world);
        let mut mover = GridMover::new(&mut ctx, entity, 1.0).unwrap();
        let hits = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&hits);
        let id = mover.subscribe(MovementEvent::OBSTACLE_HIT, move |_| *counter.borrow_mut() += 1);

        mover.request_direction_change(&mut ctx, Direction::Up);
        assert!(mover.unsubscribe(id));
        mover.request_direction_change(&mut ctx, Direction::Down);

        assert_eq!(*hits.borrow(), 1);
    }

    #[test]
    fn test_last_buffered_request_wins() {
        let map = TileMap::new(3, 3, 1.0);
        let mut world = World::new();
        let entity = spawn_at(&mut world, &map, TileIndex::new(1, 1));
        let mut ctx = MoveContext::new(&map, &mut world);
        let mut mover = GridMover::new(&mut ctx, entity, 1.0).unwrap();

        mover.request_direction_change(&mut ctx, Direction::Left);
        mover.request_direction_change(&mut ctx, Direction::Up);
        mover.request_direction_change(&mut ctx, Direction::Down);
        mover.update(&mut ctx, 1.0);

        assert_eq!(mover.current_tile(), TileIndex::new(1, 0));
        assert_eq!(mover.direction(), Direction::Down);
    }

    #[test]
    fn test_none_request_discards_buffer() {
        let map = TileMap::new(3, 3, 1.0);
        let mut world = World::new();
        let entity = spawn_at(&mut world, &map, TileIndex::new(1, 1));
        let mut ctx = MoveContext::new(&map, &mut world);
        let mut mover = GridMover::new(&mut ctx, entity, 1.0).unwrap();

        assert_eq!(
            mover.request_direction_change(&mut ctx, Direction::None),
            DirectionRequest::Ignored
        );
        mover.request_direction_change(&mut ctx, Direction::Left);
        mover.request_direction_change(&mut ctx, Direction::Up);
        mover.request_direction_change(&mut ctx, Direction::None);
        mover.update(&mut ctx, 1.0);

        assert!(!mover.is_moving());
        assert_eq!(mover.current_tile(), TileIndex::new(1, 0));
    }

    #[test]
    fn test_large_delta_crosses_single_boundary() {
        let map = TileMap::new(1, 5, 1.0);
        let mut world = World::new();
        let entity = spawn_at(&mut world, &map, TileIndex::new(0, 0));
        let mut ctx = MoveContext::new(&map, &mut world);
        let mut mover = GridMover::new(&mut ctx, entity, 1.0).unwrap();

        mover.request_direction_change(&mut ctx, Direction::Right);
        mover.request_direction_change(&mut ctx, Direction::Right);

        assert_eq!(mover.update(&mut ctx, 100.0), Some(TileIndex::new(0, 1)));
        // Follow-up leg has started but not advanced
        assert!(mover.is_moving());
        assert_eq!(ctx.world.body(entity).unwrap().position, Vec2::new(1.5, 0.5));

        assert_eq!(mover.update(&mut ctx, 100.0), Some(TileIndex::new(0, 2)));
        assert!(!mover.is_moving());
    }

    #[test]
    fn test_handler_runs_while_idle_on_arrival() {
        let map = TileMap::new(2, 2, 1.0);
        let mut world = World::new();
        let entity = spawn_at(&mut world, &map, TileIndex::new(0, 0));
        let mut ctx = MoveContext::new(&map, &mut world);
        let mut mover = GridMover::new(&mut ctx, entity, 2.0).unwrap();
        let mut recorder = Recorder::default();

        mover.request_direction_change(&mut ctx, Direction::Down);
        assert_eq!(mover.update_with(&mut ctx, 0.25, &mut recorder), None);
        assert_eq!(
            mover.update_with(&mut ctx, 0.25, &mut recorder),
            Some(TileIndex::new(1, 0))
        );

        assert_eq!(recorder.arrivals, vec![(TileIndex::new(1, 0), false)]);
    }

    #[test]
    fn test_set_entity_resets_and_notifies() {
        let map = TileMap::new(3, 3, 1.0);
        let mut world = World::new();
        let first = spawn_at(&mut world, &map, TileIndex::new(0, 0));
        let second = world.spawn_body("second", GridBody::new(Vec2::new(2.9, 2.1)));
        let mut ctx = MoveContext::new(&map, &mut world);
        let mut mover = GridMover::new(&mut ctx, first, 1.0).unwrap();
        let changes = record(&mut mover, MovementEvent::TARGET_CHANGED);

        mover.request_direction_change(&mut ctx, Direction::Right);
        mover.request_direction_change(&mut ctx, Direction::Down);
        mover.update(&mut ctx, 0.5);

        mover.set_entity(&mut ctx, second).unwrap();

        assert_eq!(mover.entity(), second);
        assert!(!mover.is_moving());
        assert_eq!(mover.pending_direction(), None);
        assert_eq!(mover.current_tile(), TileIndex::new(2, 2));
        assert_eq!(ctx.world.body(second).unwrap().position, Vec2::new(2.5, 2.5));
        assert_eq!(ctx.world.body(first).unwrap().direction, Direction::None);
        assert_eq!(
            *changes.borrow(),
            vec![MovementEvent::TargetChanged {
                previous: first,
                current: second
            }]
        );

        // Same entity again is a no-op
        mover.set_entity(&mut ctx, second).unwrap();
        assert_eq!(changes.borrow().len(), 1);
    }

    #[test]
    fn test_set_entity_failure_keeps_mover() {
        let map = TileMap::new(3, 3, 1.0);
        let mut world = World::new();
        let entity = spawn_at(&mut world, &map, TileIndex::new(1, 1));
        let bare = world.spawn(());
        let mut ctx = MoveContext::new(&map, &mut world);
        let mut mover = GridMover::new(&mut ctx, entity, 1.0).unwrap();

        assert!(mover.set_entity(&mut ctx, bare).is_err());
        assert_eq!(mover.entity(), entity);
        assert_eq!(mover.current_tile(), TileIndex::new(1, 1));
    }

    #[test]
    fn test_vanished_entity_resets_mover() {
        let map = TileMap::new(3, 3, 1.0);
        let mut world = World::new();
        let entity = spawn_at(&mut world, &map, TileIndex::new(1, 1));
        let mut mover = {
            let mut ctx = MoveContext::new(&map, &mut world);
            let mut mover = GridMover::new(&mut ctx, entity, 1.0).unwrap();
            mover.request_direction_change(&mut ctx, Direction::Up);
            mover
        };

        world.despawn(entity).unwrap();
        let mut ctx = MoveContext::new(&map, &mut world);

        assert_eq!(mover.update(&mut ctx, 1.0), None);
        assert!(!mover.is_moving());
    }

    #[test]
    fn test_set_speed_ignores_invalid_values() {
        let map = TileMap::new(1, 1, 1.0);
        let mut world = World::new();
        let entity = spawn_at(&mut world, &map, TileIndex::new(0, 0));
        let mut ctx = MoveContext::new(&map, &mut world);
        let mut mover = GridMover::new(&mut ctx, entity, 1.0).unwrap();

        mover.set_speed(3.0);
        mover.set_speed(-1.0);
        mover.set_speed(f32::INFINITY);

        assert_eq!(mover.speed(), 3.0);
    }
}
