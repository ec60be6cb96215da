use grove_kernel::{Scoreboard, World};
use serde::Serialize;

/// Numbers shown on screen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Hud {
    pub score: u32,
    pub fruits: u32,
    pub enemies_defeated: u32,
    /// Health bar fill in `[0, 100]`.
    pub health_percent: f32,
    pub game_over: bool,
}

impl Hud {
    pub fn from_world(world: &World) -> Self {
        Self::from_scoreboard(world.scoreboard(), world.config().hippo.max_health)
    }

    pub fn from_scoreboard(board: &Scoreboard, max_health: i32) -> Self {
        let max = max_health.max(1) as f32;
        Self {
            score: board.score,
            fruits: board.fruits,
            enemies_defeated: board.enemies_defeated,
            health_percent: (board.health as f32 / max * 100.0).clamp(0.0, 100.0),
            game_over: board.game_over,
        }
    }

    /// Game-over banner, if the round has ended.
    pub fn final_score_line(&self) -> Option<String> {
        self.game_over.then(|| format!("Final Score: {}", self.score))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grove_kernel::GameConfig;

    #[test]
    fn fresh_round_is_full_health() {
        let hud = Hud::from_world(&World::new(GameConfig::default(), 1));
        assert_eq!(hud.health_percent, 100.0);
        assert_eq!(hud.score, 0);
        assert!(hud.final_score_line().is_none());
    }

    #[test]
    fn health_is_a_percentage_of_max() {
        let mut config = GameConfig::default();
        config.hippo.max_health = 200;
        let hud = Hud::from_world(&World::new(config, 1));
        assert_eq!(hud.health_percent, 100.0);
    }

    fn board(health: i32, game_over: bool) -> Scoreboard {
        Scoreboard {
            score: 37,
            fruits: 3,
            enemies_defeated: 2,
            health,
            game_over,
            time: 12.0,
            terrain_phase: 0.0,
        }
    }

    #[test]
    fn overkill_health_clamps_to_empty() {
        let hud = Hud::from_scoreboard(&board(-15, true), 100);
        assert_eq!(hud.health_percent, 0.0);
    }

    #[test]
    fn game_over_shows_final_score() {
        let hud = Hud::from_scoreboard(&board(0, true), 100);
        assert_eq!(hud.final_score_line().as_deref(), Some("Final Score: 37"));
        let running = Hud::from_scoreboard(&board(40, false), 100);
        assert_eq!(running.health_percent, 40.0);
        assert!(running.final_score_line().is_none());
    }
}
