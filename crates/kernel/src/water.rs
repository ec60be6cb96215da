use crate::config::WaterConfig;
use glam::Vec3;
use grove_common::EntityId;
use serde::{Deserialize, Serialize};

/// A blob of water spat by the hippo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaterShot {
    pub id: EntityId,
    pub position: Vec3,
    /// Displacement per tick.
    pub velocity: Vec3,
    /// Ticks left before the shot evaporates.
    pub life: u32,
}

impl WaterShot {
    pub fn launch(id: EntityId, start: Vec3, dir: Vec3, cfg: &WaterConfig) -> Self {
        Self {
            id,
            position: start,
            velocity: dir * cfg.speed,
            life: cfg.lifetime_ticks,
        }
    }

    /// Move one tick. Returns false once the shot has run out of life.
    pub fn advance(&mut self) -> bool {
        self.position += self.velocity;
        self.life = self.life.saturating_sub(1);
        self.life > 0
    }
}
