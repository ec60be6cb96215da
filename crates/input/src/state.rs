use crate::action::Action;
use crate::bindings::{Binding, Bindings, Control, Key};
use crate::pointer::Pointer;
use glam::Vec3;
use std::collections::HashSet;

/// Live input: held keys, pointer position and the binding table.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    bindings: Bindings,
    held: HashSet<Key>,
    pub pointer: Pointer,
}

impl InputState {
    pub fn new(bindings: Bindings) -> Self {
        Self {
            bindings,
            ..Default::default()
        }
    }

    pub fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    /// Record a key transition. Returns the action bound to the key when
    /// it is pressed.
    pub fn set_key(&mut self, key: Key, pressed: bool) -> Option<Action> {
        if pressed {
            self.held.insert(key);
        } else {
            self.held.remove(&key);
        }
        match self.bindings.lookup(key)? {
            Binding::Press(action) if pressed => {
                tracing::trace!(?key, ?action, "key action");
                Some(action)
            }
            _ => None,
        }
    }

    /// A primary click.
    pub fn click(&self) -> Action {
        Action::Shoot
    }

    pub fn is_held(&self, control: Control) -> bool {
        self.bindings.keys_for(control).any(|k| self.held.contains(&k))
    }

    /// Sum of held movement controls. Not normalised; opposite keys cancel.
    pub fn movement(&self) -> Vec3 {
        Control::ALL
            .iter()
            .filter(|c| self.is_held(**c))
            .map(|c| c.direction())
            .sum()
    }

    /// Forget every held key, e.g. when the window loses focus.
    pub fn release_all(&mut self) {
        self.held.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn held_keys_drive_movement() {
        let mut s = InputState::default();
        assert_eq!(s.movement(), Vec3::ZERO);
        assert_eq!(s.set_key(Key::W, true), None);
        assert_eq!(s.movement(), Vec3::Z);
        s.set_key(Key::A, true);
        assert_eq!(s.movement(), Vec3::new(1.0, 0.0, 1.0));
        s.set_key(Key::W, false);
        assert_eq!(s.movement(), Vec3::X);
    }

    #[test]
    fn opposite_keys_cancel() {
        let mut s = InputState::default();
        s.set_key(Key::ArrowUp, true);
        s.set_key(Key::S, true);
        assert_eq!(s.movement(), Vec3::ZERO);
    }

    #[test]
    fn arrow_and_letter_count_once() {
        let mut s = InputState::default();
        s.set_key(Key::W, true);
        s.set_key(Key::ArrowUp, true);
        assert_eq!(s.movement(), Vec3::Z);
        s.set_key(Key::W, false);
        assert_eq!(s.movement(), Vec3::Z);
    }

    #[test]
    fn presses_yield_actions_releases_do_not() {
        let mut s = InputState::default();
        assert_eq!(s.set_key(Key::Space, true), Some(Action::Shoot));
        // Auto-repeat fires again.
        assert_eq!(s.set_key(Key::Space, true), Some(Action::Shoot));
        assert_eq!(s.set_key(Key::Space, false), None);
        assert_eq!(s.set_key(Key::R, true), Some(Action::Restart));
        assert_eq!(s.set_key(Key::F1, true), Some(Action::ToggleInspector));
    }

    #[test]
    fn click_shoots() {
        assert_eq!(InputState::default().click(), Action::Shoot);
    }

    #[test]
    fn release_all_stops_movement() {
        let mut s = InputState::default();
        s.set_key(Key::D, true);
        s.release_all();
        assert_eq!(s.movement(), Vec3::ZERO);
    }
}
