//! Named Event Emitter for Decoupled Communication
//!
//! This module provides a synchronous publish/subscribe channel that lets
//! movers notify rendering or game-logic layers without direct coupling.
//! Listeners subscribe to an event *name* and are invoked immediately, on the
//! calling thread, at the point where the event occurs.
//!
//! # Design Principles
//!
//! - **Type Safety**: Payloads are strongly typed enums (`MovementEvent`, `KeyEvent`)
//! - **Ordering**: Listeners for a name run in subscription order
//! - **Explicit Ownership**: Emitters are plain values owned by their producer,
//!   never process-wide state, so tests can build and drive their own
//!
//! # Example
//!
//! ```ignore
//! let mut events: EventEmitter<MovementEvent> = EventEmitter::new();
//! let id = events.subscribe(MovementEvent::ADJACENT_TILE_REACHED, |event| {
//!     if let MovementEvent::AdjacentTileReached { tile, .. } = event {
//!         log::info!("arrived at {tile}");
//!     }
//! });
//!
//! events.emit(&MovementEvent::AdjacentTileReached { entity, tile });
//! events.unsubscribe(id);
//! ```

use std::any::Any;
use std::fmt;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicU64, Ordering};

use hecs::Entity;
use rustc_hash::FxHashMap;

use crate::grid::{Direction, TileIndex};

// ============================================================================
// Event Types
// ============================================================================

/// Events that can be routed through an [`EventEmitter`] by name.
pub trait NamedEvent {
    /// Name listeners subscribe to.
    fn name(&self) -> &'static str;
}

/// Movement lifecycle notifications.
///
/// Emitted by grid movers and the policies built on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum MovementEvent {
    /// The mover started a leg in a new direction.
    DirectionChanged {
        /// The moving entity
        entity: Entity,
        /// Direction of the new leg
        direction: Direction,
    },

    /// The entity arrived at the centre of an adjacent tile.
    AdjacentTileReached {
        /// The moving entity
        entity: Entity,
        /// Tile now occupied
        tile: TileIndex,
    },

    /// A direction request was refused because the next tile is blocked.
    ObstacleHit {
        /// The entity that tried to move
        entity: Entity,
        /// The blocked (or out of bounds) tile
        tile: TileIndex,
        /// The refused direction
        direction: Direction,
    },

    /// The mover switched to controlling another entity.
    TargetChanged {
        /// Entity controlled before the switch
        previous: Entity,
        /// Entity controlled from now on
        current: Entity,
    },

    /// A path-following mover reached its destination.
    DestinationReached {
        /// The moving entity
        entity: Entity,
        /// The destination tile
        tile: TileIndex,
    },
}

impl MovementEvent {
    /// Name of [`MovementEvent::DirectionChanged`]
    pub const DIRECTION_CHANGED: &'static str = "direction_changed";
    /// Name of [`MovementEvent::AdjacentTileReached`]
    pub const ADJACENT_TILE_REACHED: &'static str = "adjacent_tile_reached";
    /// Name of [`MovementEvent::ObstacleHit`]
    pub const OBSTACLE_HIT: &'static str = "obstacle_hit";
    /// Name of [`MovementEvent::TargetChanged`]
    pub const TARGET_CHANGED: &'static str = "target_changed";
    /// Name of [`MovementEvent::DestinationReached`]
    pub const DESTINATION_REACHED: &'static str = "destination_reached";
}

impl NamedEvent for MovementEvent {
    fn name(&self) -> &'static str {
        match self {
            Self::DirectionChanged { .. } => Self::DIRECTION_CHANGED,
            Self::AdjacentTileReached { .. } => Self::ADJACENT_TILE_REACHED,
            Self::ObstacleHit { .. } => Self::OBSTACLE_HIT,
            Self::TargetChanged { .. } => Self::TARGET_CHANGED,
            Self::DestinationReached { .. } => Self::DESTINATION_REACHED,
        }
    }
}

// ============================================================================
// Event Emitter
// ============================================================================

/// Global counter for listener ids
static NEXT_LISTENER_ID: AtomicU64 = AtomicU64::new(1);

/// Handle returned by [`EventEmitter::subscribe`], used to unsubscribe.
///
/// Ids are unique across all emitters, so an id never matches a listener on
/// an emitter that did not issue it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

impl ListenerId {
    fn next() -> Self {
        Self(NEXT_LISTENER_ID.fetch_add(1, Ordering::Relaxed))
    }
}

type Listener<E> = Box<dyn FnMut(&E)>;

struct Subscription<E> {
    id: ListenerId,
    /// Listener expires once this owner is dropped
    owner: Option<Weak<dyn Any>>,
    listener: Listener<E>,
}

impl<E> Subscription<E> {
    fn is_live(&self) -> bool {
        self.owner.as_ref().is_none_or(|owner| owner.strong_count() > 0)
    }
}

/// Synchronous emitter keyed by event name.
///
/// # Performance
///
/// - Subscribe: O(1) amortized
/// - Unsubscribe: O(n) in the number of listeners
/// - Emit: O(k) in the listeners of that name
pub struct EventEmitter<E> {
    listeners: FxHashMap<&'static str, Vec<Subscription<E>>>,
}

impl<E: NamedEvent> EventEmitter<E> {
    /// Create an emitter with no listeners.
    #[must_use]
    pub fn new() -> Self {
        Self {
            listeners: FxHashMap::default(),
        }
    }

    /// Register `listener` for events called `name`.
    ///
    /// Listeners of the same name run in the order they were subscribed.
    pub fn subscribe(&mut self, name: &'static str, listener: impl FnMut(&E) + 'static) -> ListenerId {
        self.insert(name, None, Box::new(listener))
    }

    /// Register a listener that lives only as long as `owner`.
    ///
    /// The listener receives the owner alongside each event. Once the last
    /// strong reference to `owner` is dropped the listener is removed without
    /// an explicit [`unsubscribe`](Self::unsubscribe).
    pub fn subscribe_owned<T: 'static>(
        &mut self,
        name: &'static str,
        owner: &Rc<T>,
        mut listener: impl FnMut(&T, &E) + 'static,
    ) -> ListenerId {
        let weak = Rc::downgrade(owner);
        let token: Weak<dyn Any> = weak.clone();
        self.insert(
            name,
            Some(token),
            Box::new(move |event| {
                if let Some(owner) = weak.upgrade() {
                    listener(&owner, event);
                }
            }),
        )
    }

    fn insert(&mut self, name: &'static str, owner: Option<Weak<dyn Any>>, listener: Listener<E>) -> ListenerId {
        let id = ListenerId::next();
        self.listeners.entry(name).or_default().push(Subscription {
            id,
            owner,
            listener,
        });
        id
    }

    /// Remove a listener, returning whether it was registered here.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        for listeners in self.listeners.values_mut() {
            if let Some(position) = listeners.iter().position(|subscription| subscription.id == id) {
                listeners.remove(position);
                return true;
            }
        }
        false
    }

    /// Deliver `event` to every live listener subscribed to its name.
    pub fn emit(&mut self, event: &E) {
        if let Some(listeners) = self.listeners.get_mut(event.name()) {
            listeners.retain(Subscription::is_live);
            for subscription in listeners.iter_mut() {
                (subscription.listener)(event);
            }
        }
    }

    /// Number of live listeners subscribed to `name`.
    #[must_use]
    pub fn listener_count(&self, name: &str) -> usize {
        self.listeners
            .get(name)
            .map_or(0, |listeners| listeners.iter().filter(|s| s.is_live()).count())
    }
}

impl<E: NamedEvent> Default for EventEmitter<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for EventEmitter<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counts: FxHashMap<&str, usize> = self
            .listeners
            .iter()
            .map(|(name, listeners)| (*name, listeners.len()))
            .collect();
        f.debug_struct("EventEmitter").field("listeners", &counts).finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
