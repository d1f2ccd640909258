//! Input handling

use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use rustc_hash::FxHashSet;
use winit::event::ElementState;
use winit::keyboard::KeyCode;

use crate::core::{EventEmitter, ListenerId, NamedEvent};

/// Key transition published by [`Input`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEvent {
    /// Key went down this frame
    Down(KeyCode),
    /// Key was released this frame
    Up(KeyCode),
    /// Key is still held at the end of the frame
    Held(KeyCode),
}

impl KeyEvent {
    /// Name of [`KeyEvent::Down`]
    pub const KEY_DOWN: &'static str = "key_down";
    /// Name of [`KeyEvent::Up`]
    pub const KEY_UP: &'static str = "key_up";
    /// Name of [`KeyEvent::Held`]
    pub const KEY_HELD: &'static str = "key_held";

    /// The key involved
    #[must_use]
    pub fn key(&self) -> KeyCode {
        match self {
            Self::Down(key) | Self::Up(key) | Self::Held(key) => *key,
        }
    }
}

impl NamedEvent for KeyEvent {
    fn name(&self) -> &'static str {
        match self {
            Self::Down(_) => Self::KEY_DOWN,
            Self::Up(_) => Self::KEY_UP,
            Self::Held(_) => Self::KEY_HELD,
        }
    }
}

/// Global counter for input ids
static NEXT_INPUT_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of an [`Input`], used to tell key sources apart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InputId(u64);

/// Input state manager.
///
/// Tracks key state and publishes transitions to subscribers. It is an
/// ordinary value: the windowing layer feeds it real key events, tests feed
/// it synthetic ones.
#[derive(Debug)]
pub struct Input {
    id: InputId,
    /// Currently pressed keys, in press order
    pressed_keys: Vec<KeyCode>,
    /// Keys that were just pressed this frame
    just_pressed_keys: FxHashSet<KeyCode>,
    /// Keys that were just released this frame
    just_released_keys: FxHashSet<KeyCode>,
    /// Key event listeners
    events: EventEmitter<KeyEvent>,
}

impl Input {
    /// Create a new input manager
    pub fn new() -> Self {
        Self {
            id: InputId(NEXT_INPUT_ID.fetch_add(1, Ordering::Relaxed)),
            pressed_keys: Vec::new(),
            just_pressed_keys: FxHashSet::default(),
            just_released_keys: FxHashSet::default(),
            events: EventEmitter::new(),
        }
    }

    /// Call once per frame, after the frame's key events were processed.
    ///
    /// Publishes a `key_held` event for every key still down, then clears
    /// per-frame state.
    pub fn update(&mut self) {
        for &key in &self.pressed_keys {
            self.events.emit(&KeyEvent::Held(key));
        }
        self.just_pressed_keys.clear();
        self.just_released_keys.clear();
    }

    /// Process a keyboard event.
    ///
    /// Auto-repeat presses of a key that is already down are not republished.
    pub fn process_keyboard(&mut self, key_code: KeyCode, state: ElementState) {
        match state {
            ElementState::Pressed => {
                if !self.pressed_keys.contains(&key_code) {
                    self.just_pressed_keys.insert(key_code);
                    self.pressed_keys.push(key_code);
                    self.events.emit(&KeyEvent::Down(key_code));
                }
            }
            ElementState::Released => {
                if let Some(position) = self.pressed_keys.iter().position(|k| *k == key_code) {
                    self.pressed_keys.remove(position);
                    self.just_released_keys.insert(key_code);
                    self.events.emit(&KeyEvent::Up(key_code));
                }
            }
        }
    }

    /// Subscribe to key events called `name` (see [`KeyEvent`] constants)
    pub fn subscribe(&mut self, name: &'static str, listener: impl FnMut(&KeyEvent) + 'static) -> ListenerId {
        self.events.subscribe(name, listener)
    }

    /// Subscribe a listener that is dropped together with `owner`
    pub fn subscribe_owned<T: 'static>(
        &mut self,
        name: &'static str,
        owner: &Rc<T>,
        listener: impl FnMut(&T, &KeyEvent) + 'static,
    ) -> ListenerId {
        self.events.subscribe_owned(name, owner, listener)
    }

    /// Identity of this input
    #[must_use]
    pub fn id(&self) -> InputId {
        self.id
    }

    /// Remove a key event listener
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.events.unsubscribe(id)
    }

    /// Number of listeners subscribed to `name`
    pub fn listener_count(&self, name: &str) -> usize {
        self.events.listener_count(name)
    }

    /// Check if a key is currently pressed
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.pressed_keys.contains(&key)
    }

    /// Check if a key was just pressed this frame
    pub fn is_key_just_pressed(&self, key: KeyCode) -> bool {
        self.just_pressed_keys.contains(&key)
    }

    /// Check if a key was just released this frame
    pub fn is_key_just_released(&self, key: KeyCode) -> bool {
        self.just_released_keys.contains(&key)
    }
}

impl Default for Input {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    fn record(input: &mut Input, name: &'static str) -> Rc<RefCell<Vec<KeyEvent>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        input.subscribe(name, move |event| sink.borrow_mut().push(*event));
        log
    }

    #[test]
    fn test_press_and_release_publish_once() {
        let mut input = Input::new();
        let downs = record(&mut input, KeyEvent::KEY_DOWN);
        let ups = record(&mut input, KeyEvent::KEY_UP);

        input.process_keyboard(KeyCode::ArrowLeft, ElementState::Pressed);
        // Auto-repeat
        input.process_keyboard(KeyCode::ArrowLeft, ElementState::Pressed);
        assert!(input.is_key_pressed(KeyCode::ArrowLeft));
        assert!(input.is_key_just_pressed(KeyCode::ArrowLeft));

        input.process_keyboard(KeyCode::ArrowLeft, ElementState::Released);
        assert!(!input.is_key_pressed(KeyCode::ArrowLeft));
        assert!(input.is_key_just_released(KeyCode::ArrowLeft));

        assert_eq!(*downs.borrow(), vec![KeyEvent::Down(KeyCode::ArrowLeft)]);
        assert_eq!(*ups.borrow(), vec![KeyEvent::Up(KeyCode::ArrowLeft)]);
    }

    #[test]
    fn test_release_without_press_is_ignored() {
        let mut input = Input::new();
        let ups = record(&mut input, KeyEvent::KEY_UP);

        input.process_keyboard(KeyCode::KeyQ, ElementState::Released);

        assert!(ups.borrow().is_empty());
        assert!(!input.is_key_just_released(KeyCode::KeyQ));
    }

    #[test]
    fn test_update_publishes_held_keys_in_press_order() {
        let mut input = Input::new();
        let held = record(&mut input, KeyEvent::KEY_HELD);

        input.process_keyboard(KeyCode::KeyW, ElementState::Pressed);
        input.process_keyboard(KeyCode::KeyA, ElementState::Pressed);
        input.update();

        assert_eq!(
            *held.borrow(),
            vec![KeyEvent::Held(KeyCode::KeyW), KeyEvent::Held(KeyCode::KeyA)]
        );
        assert!(!input.is_key_just_pressed(KeyCode::KeyW));
        assert!(input.is_key_pressed(KeyCode::KeyW));
    }

    #[test]
    fn test_unsubscribe_detaches_listener() {
        let mut input = Input::new();
        let id = input.subscribe(KeyEvent::KEY_DOWN, |_| {});
        assert_eq!(input.listener_count(KeyEvent::KEY_DOWN), 1);

        assert!(input.unsubscribe(id));
        assert_eq!(input.listener_count(KeyEvent::KEY_DOWN), 0);
    }

    #[test]
    fn test_inputs_have_distinct_ids() {
        let first = Input::new();
        let second = Input::default();

        assert_ne!(first.id(), second.id());
        assert_eq!(first.id(), first.id());
    }
}
