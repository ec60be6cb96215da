use serde::{Deserialize, Serialize};

/// A discrete game action produced by a key press or click.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Fire a water shot from the hippo's mouth.
    Shoot,
    /// Start a fresh round.
    Restart,
    /// Show or hide the debug inspector.
    ToggleInspector,
    /// Bound input with nothing to do.
    Noop,
}

impl Action {
    /// Whether the action should still fire once the round is over.
    pub fn allowed_after_game_over(self) -> bool {
        !matches!(self, Action::Shoot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shooting_stops_at_game_over() {
        assert!(!Action::Shoot.allowed_after_game_over());
        assert!(Action::Restart.allowed_after_game_over());
        assert!(Action::ToggleInspector.allowed_after_game_over());
    }
}
