//! Per-sprite controllers: logical actions bound to physical keys.
//!
//! Each action slot tracks two flags. `held` follows the key state;
//! `pressed` is an edge that is set on a down transition and only cleared
//! by [`Controller::clear_pressed`] at the start of the next tick, so a key
//! pressed and released inside one tick is still seen.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::input::{InputEvent, Key};

/// Logical actions a sprite can be driven by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Up,
    Down,
    Left,
    Right,
    Jump,
    Use,
}

impl Action {
    pub const ALL: [Action; 6] = [
        Action::Up,
        Action::Down,
        Action::Left,
        Action::Right,
        Action::Jump,
        Action::Use,
    ];

    /// The key bound to this action when nothing overrides it.
    pub fn default_key(self) -> Key {
        match self {
            Action::Up => Key::Up,
            Action::Down => Key::Down,
            Action::Left => Key::Left,
            Action::Right => Key::Right,
            Action::Jump => Key::Space,
            Action::Use => Key::Enter,
        }
    }

    /// Movement in cells for the direction actions.
    pub fn direction(self) -> Option<(i64, i64)> {
        match self {
            Action::Up => Some((0, -1)),
            Action::Down => Some((0, 1)),
            Action::Left => Some((-1, 0)),
            Action::Right => Some((1, 0)),
            Action::Jump | Action::Use => None,
        }
    }
}

/// State of one action slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeySlot {
    pub key: Option<Key>,
    pub held: bool,
    pub pressed: bool,
}

/// A fixed table of action slots plus the CPU flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Controller {
    slots: [KeySlot; Action::ALL.len()],
    /// CPU-driven sprites ignore the keyboard during simulation.
    pub cpu: bool,
}

impl Default for Controller {
    fn default() -> Self {
        let mut slots = [KeySlot::default(); Action::ALL.len()];
        for (slot, action) in slots.iter_mut().zip(Action::ALL) {
            slot.key = Some(action.default_key());
        }
        Self { slots, cpu: false }
    }
}

impl Controller {
    /// A controller with no keys bound.
    pub fn unbound() -> Self {
        Self {
            slots: [KeySlot::default(); Action::ALL.len()],
            cpu: false,
        }
    }

    /// Default bindings with the given overrides applied.
    pub fn with_bindings(bindings: &BTreeMap<Action, Key>) -> Self {
        let mut controller = Self::default();
        for (&action, &key) in bindings {
            controller.bind(action, Some(key));
        }
        controller
    }

    pub fn bind(&mut self, action: Action, key: Option<Key>) {
        self.slots[action as usize].key = key;
    }

    pub fn slot(&self, action: Action) -> &KeySlot {
        &self.slots[action as usize]
    }

    pub fn is_held(&self, action: Action) -> bool {
        self.slot(action).held
    }

    pub fn is_pressed(&self, action: Action) -> bool {
        self.slot(action).pressed
    }

    /// Clear every `pressed` edge. Called once at the start of each tick.
    pub fn clear_pressed(&mut self) {
        for slot in &mut self.slots {
            slot.pressed = false;
        }
    }

    /// Apply a key event to every slot bound to that key.
    pub fn apply(&mut self, event: InputEvent) {
        let (key, down) = match event {
            InputEvent::KeyDown(key) => (key, true),
            InputEvent::KeyUp(key) => (key, false),
            InputEvent::Quit => return,
        };

        for slot in self.slots.iter_mut().filter(|s| s.key == Some(key)) {
            if down && !slot.held {
                slot.pressed = true;
            }
            slot.held = down;
        }
    }

    /// The first direction action pressed this tick, in `Action::ALL` order.
    pub fn pressed_direction(&self) -> Option<(i64, i64)> {
        Action::ALL
            .iter()
            .filter(|&&action| self.is_pressed(action))
            .find_map(|action| action.direction())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bindings() {
        let controller = Controller::default();
        assert_eq!(controller.slot(Action::Up).key, Some(Key::Up));
        assert_eq!(controller.slot(Action::Jump).key, Some(Key::Space));
        assert!(!controller.cpu);
    }

    #[test]
    fn test_with_bindings_overrides_defaults() {
        let bindings = BTreeMap::from([(Action::Up, Key::W)]);
        let controller = Controller::with_bindings(&bindings);

        assert_eq!(controller.slot(Action::Up).key, Some(Key::W));
        assert_eq!(controller.slot(Action::Down).key, Some(Key::Down));
    }

    #[test]
    fn test_down_sets_held_and_pressed() {
        let mut controller = Controller::default();
        controller.apply(InputEvent::KeyDown(Key::Left));

        assert!(controller.is_held(Action::Left));
        assert!(controller.is_pressed(Action::Left));
        assert!(!controller.is_pressed(Action::Right));
    }

    #[test]
    fn test_press_and_release_in_one_tick_keeps_edge() {
        let mut controller = Controller::default();
        controller.clear_pressed();
        controller.apply(InputEvent::KeyDown(Key::Space));
        controller.apply(InputEvent::KeyUp(Key::Space));

        assert!(!controller.is_held(Action::Jump));
        assert!(controller.is_pressed(Action::Jump));

        controller.clear_pressed();
        assert!(!controller.is_pressed(Action::Jump));
    }

    #[test]
    fn test_repeat_down_is_not_a_new_edge() {
        let mut controller = Controller::default();
        controller.apply(InputEvent::KeyDown(Key::Up));
        controller.clear_pressed();
        controller.apply(InputEvent::KeyDown(Key::Up));

        assert!(controller.is_held(Action::Up));
        assert!(!controller.is_pressed(Action::Up));
    }

    #[test]
    fn test_one_key_bound_to_two_actions() {
        let mut controller = Controller::default();
        controller.bind(Action::Use, Some(Key::Space));
        controller.apply(InputEvent::KeyDown(Key::Space));

        assert!(controller.is_pressed(Action::Jump));
        assert!(controller.is_pressed(Action::Use));
    }

    #[test]
    fn test_unbound_ignores_keys() {
        let mut controller = Controller::unbound();
        controller.apply(InputEvent::KeyDown(Key::Up));
        assert!(!controller.is_held(Action::Up));
    }

    #[test]
    fn test_pressed_direction() {
        let mut controller = Controller::default();
        assert_eq!(controller.pressed_direction(), None);

        controller.apply(InputEvent::KeyDown(Key::Space));
        assert_eq!(controller.pressed_direction(), None);

        controller.apply(InputEvent::KeyDown(Key::Right));
        assert_eq!(controller.pressed_direction(), Some((1, 0)));
    }
}
