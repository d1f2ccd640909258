//! Input handling module
//!
//! Provides key state tracking, key event publishing, and direction bindings.

mod bindings;
mod state;

pub use bindings::{KeyBindings, TriggerMode};
pub use state::{Input, InputId, KeyEvent};
