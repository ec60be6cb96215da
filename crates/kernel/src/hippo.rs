use crate::config::{HippoConfig, WaterConfig};
use glam::Vec3;
use grove_common::math::{heading, lerp, yaw_forward};
use serde::{Deserialize, Serialize};

/// The player character.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hippo {
    pub position: Vec3,
    /// Rotation about +Y; zero faces +Z.
    pub yaw: f32,
}

impl Default for Hippo {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            yaw: 0.0,
        }
    }
}

impl Hippo {
    pub fn forward(&self) -> Vec3 {
        yaw_forward(self.yaw)
    }

    /// Apply one tick of movement. `movement` is the raw key vector
    /// (x: left positive, z: forward positive); a zero vector leaves the
    /// hippo untouched.
    ///
    /// Returns whether the hippo moved.
    pub fn steer(&mut self, movement: Vec3, time: f32, cfg: &HippoConfig) -> bool {
        let dir = Vec3::new(movement.x, 0.0, movement.z).normalize_or_zero();
        if dir == Vec3::ZERO {
            return false;
        }

        // Turning is a plain lerp on the angle; crossing the ±π seam takes
        // the long way round.
        self.yaw = lerp(self.yaw, heading(dir), cfg.turn_rate);
        self.position += self.forward() * cfg.move_speed;
        self.position.y = (time * cfg.bob_frequency).sin() * cfg.bob_amplitude;
        self.position.x = self.position.x.clamp(-cfg.bounds, cfg.bounds);
        self.position.z = self.position.z.clamp(-cfg.bounds, cfg.bounds);
        true
    }

    /// Launch point and unit direction for a water shot.
    pub fn muzzle(&self, cfg: &WaterConfig) -> (Vec3, Vec3) {
        let mut dir = self.forward();
        dir.y = cfg.lift;
        let dir = dir.normalize();
        let start = self.position + Vec3::Y * cfg.muzzle_height + dir * cfg.muzzle_offset;
        (start, dir)
    }
}
