use crate::config::EnemyConfig;
use glam::Vec3;
use grove_common::EntityId;
use grove_common::math::{heading, planar_direction};
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

/// A creature that walks straight at the hippo and bites when close.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: EntityId,
    pub position: Vec3,
    pub yaw: f32,
    pub health: i32,
    /// Distance covered per tick.
    pub speed: f32,
    /// Seconds until the next bite lands.
    pub attack_cooldown: f32,
}

impl Enemy {
    /// Spawn on a random point of the ring around the origin.
    pub fn on_ring(rng: &mut fastrand::Rng, cfg: &EnemyConfig) -> Self {
        let id = EntityId::from_rng(rng);
        let angle = rng.f32() * TAU;
        let distance = cfg.spawn_min_distance + rng.f32() * cfg.spawn_distance_jitter;
        Self {
            id,
            position: Vec3::new(angle.cos() * distance, 0.0, angle.sin() * distance),
            yaw: 0.0,
            health: cfg.health,
            speed: cfg.base_speed + rng.f32() * cfg.speed_jitter,
            attack_cooldown: 0.0,
        }
    }

    /// Walk one tick toward `target`, turning to face it. `index` is the
    /// enemy's slot in the pack and offsets its bob so they don't move in
    /// lockstep.
    pub fn chase(&mut self, target: Vec3, time: f32, index: usize, cfg: &EnemyConfig) {
        let dir = planar_direction(self.position, target);
        self.position += dir * self.speed;
        self.yaw = heading(dir);
        self.position.y = (time * cfg.bob_frequency + index as f32).sin() * cfg.bob_amplitude;
    }

    /// Count the attack cooldown down while in range of `target`.
    ///
    /// Returns true when a bite lands this tick.
    pub fn try_bite(&mut self, target: Vec3, dt: f32, cfg: &EnemyConfig) -> bool {
        if self.position.distance(target) >= cfg.attack_range {
            return false;
        }
        self.attack_cooldown -= dt;
        if self.attack_cooldown <= 0.0 {
            self.attack_cooldown = cfg.attack_cooldown_secs;
            return true;
        }
        false
    }

    /// Point water shots are tested against.
    pub fn body_centre(&self, cfg: &EnemyConfig) -> Vec3 {
        self.position + Vec3::Y * cfg.body_height
    }

    /// Take one point of damage. Returns true if the enemy is down.
    pub fn soak(&mut self) -> bool {
        self.health -= 1;
        self.health <= 0
    }
}
