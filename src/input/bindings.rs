//! Key Bindings for Grid Movement
//!
//! Maps physical keys to grid directions so movement code never looks at raw
//! key codes, and selects which key transition issues a command.
//!
//! # Example
//!
//! ```ignore
//! let mut bindings = KeyBindings::default();
//!
//! // Rebind a key
//! bindings.bind(Direction::Up, KeyCode::KeyW);
//!
//! if let Some(direction) = bindings.direction_for(KeyCode::KeyW) {
//!     mover.request_direction_change(&mut ctx, direction);
//! }
//! ```

use serde::{Deserialize, Serialize};
use winit::keyboard::KeyCode;

use super::KeyEvent;
use crate::grid::Direction;

// ============================================================================
// Trigger Mode
// ============================================================================

/// Which key transition turns into a movement command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TriggerMode {
    /// Keys are not listened to
    None,
    /// Act when a key goes down
    #[default]
    OnKeyDown,
    /// Act when a key is released
    OnKeyUp,
    /// Act every frame while a key is held
    OnKeyHeld,
}

impl TriggerMode {
    /// Name of the [`KeyEvent`] this mode listens to, if any
    #[must_use]
    pub const fn event_name(self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::OnKeyDown => Some(KeyEvent::KEY_DOWN),
            Self::OnKeyUp => Some(KeyEvent::KEY_UP),
            Self::OnKeyHeld => Some(KeyEvent::KEY_HELD),
        }
    }
}

// ============================================================================
// Key Bindings
// ============================================================================

/// One key per movement direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBindings {
    /// Key that moves left
    pub left: KeyCode,
    /// Key that moves right
    pub right: KeyCode,
    /// Key that moves up
    pub up: KeyCode,
    /// Key that moves down
    pub down: KeyCode,
}

impl KeyBindings {
    /// Create bindings from four keys
    #[must_use]
    pub const fn new(left: KeyCode, right: KeyCode, up: KeyCode, down: KeyCode) -> Self {
        Self {
            left,
            right,
            up,
            down,
        }
    }

    /// WASD layout
    #[must_use]
    pub const fn wasd() -> Self {
        Self::new(KeyCode::KeyA, KeyCode::KeyD, KeyCode::KeyW, KeyCode::KeyS)
    }

    /// Bind a key to a direction.
    ///
    /// `Direction::None` cannot be bound and is ignored.
    pub fn bind(&mut self, direction: Direction, key: KeyCode) {
        match direction {
            Direction::Left => self.left = key,
            Direction::Right => self.right = key,
            Direction::Up => self.up = key,
            Direction::Down => self.down = key,
            Direction::None => {}
        }
    }

    /// Get the key bound to a direction
    #[must_use]
    pub fn key_for(&self, direction: Direction) -> Option<KeyCode> {
        match direction {
            Direction::Left => Some(self.left),
            Direction::Right => Some(self.right),
            Direction::Up => Some(self.up),
            Direction::Down => Some(self.down),
            Direction::None => None,
        }
    }

    /// Resolve a key to a direction; unbound keys give `None`.
    ///
    /// If one key is bound to several directions, the first of left, right,
    /// up, down wins.
    #[must_use]
    pub fn direction_for(&self, key: KeyCode) -> Option<Direction> {
        [
            (self.left, Direction::Left),
            (self.right, Direction::Right),
            (self.up, Direction::Up),
            (self.down, Direction::Down),
        ]
        .into_iter()
        .find_map(|(bound, direction)| (bound == key).then_some(direction))
    }
}

impl Default for KeyBindings {
    /// Arrow keys
    fn default() -> Self {
        Self::new(
            KeyCode::ArrowLeft,
            KeyCode::ArrowRight,
            KeyCode::ArrowUp,
            KeyCode::ArrowDown,
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
