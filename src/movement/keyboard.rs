//! Keyboard-driven movement
//!
//! The mover listens to an [`Input`] handed to it rather than to a global key
//! source. Keys delivered by the listener are queued and turned into direction
//! requests on the next [`KeyboardControlledGridMover::update`].
//!
//! The listener only holds a weak reference to the mover's key queue, so it
//! expires when the mover is dropped or moves to another input.

use std::cell::RefCell;
use std::rc::Rc;

use winit::keyboard::KeyCode;

use super::{DirectionRequest, GridMover, MoveContext, MovementError};
use crate::core::{ListenerId, MovementConfig};
use crate::grid::TileIndex;
use crate::input::{Input, InputId, KeyBindings, TriggerMode};

/// Moves an entity in response to bound keys.
#[derive(Debug)]
pub struct KeyboardControlledGridMover {
    mover: GridMover,
    bindings: KeyBindings,
    trigger: TriggerMode,
    /// Attached input and our subscription on it
    attachment: Option<(InputId, ListenerId)>,
    /// Keys delivered since the last update; owns the listener's lifetime
    inbox: Rc<RefCell<Vec<KeyCode>>>,
}

impl KeyboardControlledGridMover {
    /// Attach to `entity` with arrow-key bindings, not yet listening to input.
    ///
    /// # Errors
    ///
    /// See [`GridMover::new`]
    pub fn new(ctx: &mut MoveContext<'_>, entity: hecs::Entity, speed: f32) -> Result<Self, MovementError> {
        Ok(Self {
            mover: GridMover::new(ctx, entity, speed)?,
            bindings: KeyBindings::default(),
            trigger: TriggerMode::None,
            attachment: None,
            inbox: Rc::new(RefCell::new(Vec::new())),
        })
    }

    /// Attach to `entity` and start listening with the configured trigger
    ///
    /// # Errors
    ///
    /// See [`GridMover::new`]
    pub fn from_config(
        ctx: &mut MoveContext<'_>,
        input: &mut Input,
        entity: hecs::Entity,
        config: &MovementConfig,
    ) -> Result<Self, MovementError> {
        let mut mover = Self::new(ctx, entity, config.speed)?;
        mover.set_trigger_mode(input, config.trigger_mode);
        Ok(mover)
    }

    /// Listen to `input` for the key transition named by `mode`.
    ///
    /// Any previous subscription is removed first, so exactly one listener is
    /// registered afterwards (none for [`TriggerMode::None`]).
    pub fn set_trigger_mode(&mut self, input: &mut Input, mode: TriggerMode) {
        self.detach(input);
        self.trigger = mode;

        if let Some(name) = mode.event_name() {
            let id = input.subscribe_owned(name, &self.inbox, |inbox, event| inbox.borrow_mut().push(event.key()));
            self.attachment = Some((input.id(), id));
        }
        log::debug!("{:?} now triggered by {mode:?}", self.mover.entity());
    }

    /// Stop listening and drop queued keys.
    ///
    /// The subscription is removed from `input` if that is the input the mover
    /// is attached to. A listener left on any other input expires with the old
    /// key queue, which is replaced here.
    pub fn detach(&mut self, input: &mut Input) {
        if let Some((owner, id)) = self.attachment.take() {
            if owner == input.id() {
                input.unsubscribe(id);
            } else {
                log::debug!("{:?} leaves {owner:?} for {:?}", self.mover.entity(), input.id());
            }
        }
        self.trigger = TriggerMode::None;
        self.inbox = Rc::new(RefCell::new(Vec::new()));
    }

    /// Input the mover currently listens to
    #[must_use]
    pub fn attached_input(&self) -> Option<InputId> {
        self.attachment.map(|(owner, _)| owner)
    }

    #[must_use]
    pub fn trigger_mode(&self) -> TriggerMode {
        self.trigger
    }

    /// Turn a key into a direction request; unbound keys give `None`
    pub fn handle_key(&mut self, ctx: &mut MoveContext<'_>, key: KeyCode) -> Option<DirectionRequest> {
        let direction = self.bindings.direction_for(key)?;
        Some(self.mover.request_direction_change(ctx, direction))
    }

    /// Apply queued keys in arrival order, then advance movement
    pub fn update(&mut self, ctx: &mut MoveContext<'_>, delta_time: f32) -> Option<TileIndex> {
        let keys: Vec<KeyCode> = self.inbox.borrow_mut().drain(..).collect();
        for key in keys {
            self.handle_key(ctx, key);
        }
        self.mover.update(ctx, delta_time)
    }

    #[must_use]
    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    pub fn set_bindings(&mut self, bindings: KeyBindings) {
        self.bindings = bindings;
    }

    #[must_use]
    pub fn mover(&self) -> &GridMover {
        &self.mover
    }

    pub fn mover_mut(&mut self) -> &mut GridMover {
        &mut self.mover
    }
}
