use crate::config::TreeConfig;
use glam::Vec3;
use grove_common::EntityId;
use serde::{Deserialize, Serialize};

/// Static scenery. Trees never move and nothing collides with them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    pub id: EntityId,
    pub position: Vec3,
}

/// Scatter trees over the map, discarding any that land in the clearing
/// around the origin. Fewer than `cfg.attempts` trees may come back.
pub fn scatter(rng: &mut fastrand::Rng, cfg: &TreeConfig) -> Vec<Tree> {
    let mut trees = Vec::with_capacity(cfg.attempts);
    for _ in 0..cfg.attempts {
        let x = (rng.f32() - 0.5) * 2.0 * cfg.half_extent;
        let z = (rng.f32() - 0.5) * 2.0 * cfg.half_extent;
        if x.abs() > cfg.clearing || z.abs() > cfg.clearing {
            trees.push(Tree {
                id: EntityId::from_rng(rng),
                position: Vec3::new(x, 0.0, z),
            });
        }
    }
    trees
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clearing_stays_empty() {
        let cfg = TreeConfig::default();
        let mut rng = fastrand::Rng::with_seed(77);
        let trees = scatter(&mut rng, &cfg);
        assert!(trees.len() <= cfg.attempts);
        for t in &trees {
            assert!(t.position.x.abs() > cfg.clearing || t.position.z.abs() > cfg.clearing);
            assert!(t.position.x.abs() <= cfg.half_extent);
        }
    }

    #[test]
    fn whole_map_clearing_yields_no_trees() {
        let cfg = TreeConfig {
            attempts: 30,
            half_extent: 5.0,
            clearing: 10.0,
        };
        let mut rng = fastrand::Rng::with_seed(1);
        assert!(scatter(&mut rng, &cfg).is_empty());
    }
}
