use crate::action::Action;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Platform-neutral key names. Front ends translate their own key codes
/// into these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    W,
    A,
    S,
    D,
    R,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Space,
    F1,
}

/// A held movement control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Control {
    Forward,
    Back,
    Left,
    Right,
}

impl Control {
    pub const ALL: [Control; 4] = [Control::Forward, Control::Back, Control::Left, Control::Right];

    /// World-space contribution while held. Forward is +Z and left is +X,
    /// matching a camera that sits behind the hippo looking down +Z.
    pub fn direction(self) -> Vec3 {
        match self {
            Control::Forward => Vec3::Z,
            Control::Back => Vec3::NEG_Z,
            Control::Left => Vec3::X,
            Control::Right => Vec3::NEG_X,
        }
    }
}

/// What a key does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Binding {
    /// Held for as long as the key is down.
    Hold(Control),
    /// Fired on every press, including auto-repeat.
    Press(Action),
}

/// Key-to-binding table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bindings {
    entries: Vec<(Key, Binding)>,
}

impl Default for Bindings {
    fn default() -> Self {
        use Binding::*;
        Self {
            entries: vec![
                (Key::W, Hold(Control::Forward)),
                (Key::ArrowUp, Hold(Control::Forward)),
                (Key::S, Hold(Control::Back)),
                (Key::ArrowDown, Hold(Control::Back)),
                (Key::A, Hold(Control::Left)),
                (Key::ArrowLeft, Hold(Control::Left)),
                (Key::D, Hold(Control::Right)),
                (Key::ArrowRight, Hold(Control::Right)),
                (Key::Space, Press(Action::Shoot)),
                (Key::R, Press(Action::Restart)),
                (Key::F1, Press(Action::ToggleInspector)),
            ],
        }
    }
}

impl Bindings {
    pub fn lookup(&self, key: Key) -> Option<Binding> {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, b)| *b)
    }

    /// Rebind `key`, replacing any existing binding for it.
    pub fn bind(&mut self, key: Key, binding: Binding) {
        self.entries.retain(|(k, _)| *k != key);
        self.entries.push((key, binding));
    }

    /// Keys that drive `control`.
    pub fn keys_for(&self, control: Control) -> impl Iterator<Item = Key> + '_ {
        self.entries.iter().filter_map(move |(k, b)| match b {
            Binding::Hold(c) if *c == control => Some(*k),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wasd_and_arrows_share_controls() {
        let b = Bindings::default();
        assert_eq!(b.lookup(Key::W), b.lookup(Key::ArrowUp));
        assert_eq!(b.lookup(Key::D), Some(Binding::Hold(Control::Right)));
        assert_eq!(b.keys_for(Control::Left).count(), 2);
    }

    #[test]
    fn space_shoots() {
        assert_eq!(
            Bindings::default().lookup(Key::Space),
            Some(Binding::Press(Action::Shoot))
        );
    }

    #[test]
    fn rebinding_replaces() {
        let mut b = Bindings::default();
        b.bind(Key::Space, Binding::Press(Action::Noop));
        assert_eq!(b.lookup(Key::Space), Some(Binding::Press(Action::Noop)));
        assert_eq!(b.keys_for(Control::Forward).count(), 2);
    }

    #[test]
    fn left_is_positive_x() {
        assert_eq!(Control::Left.direction(), Vec3::X);
        assert_eq!(Control::Right.direction(), Vec3::NEG_X);
    }
}
