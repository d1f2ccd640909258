//! Core engine module
//!
//! Contains event routing and movement configuration

mod config;
mod events;

pub use config::{ConfigError, MovementConfig};
pub use events::{EventEmitter, ListenerId, MovementEvent, NamedEvent};
