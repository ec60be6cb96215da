use crate::config::FruitConfig;
use glam::Vec3;
use grove_common::{Color, EntityId};
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FruitKind {
    Apple,
    Orange,
    Banana,
    Berry,
}

impl FruitKind {
    pub const ALL: [Self; 4] = [Self::Apple, Self::Orange, Self::Banana, Self::Berry];

    pub fn color(self) -> Color {
        match self {
            Self::Apple => Color::from_hex(0xff0000),
            Self::Orange => Color::from_hex(0xffa500),
            Self::Banana => Color::from_hex(0xffff00),
            Self::Berry => Color::from_hex(0xff00ff),
        }
    }

    pub fn radius(self) -> f32 {
        match self {
            Self::Apple => 0.3,
            Self::Orange => 0.35,
            Self::Banana => 0.25,
            Self::Berry => 0.28,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Apple => "apple",
            Self::Orange => "orange",
            Self::Banana => "banana",
            Self::Berry => "berry",
        }
    }
}

/// A collectible hovering above the ground.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fruit {
    pub id: EntityId,
    pub kind: FruitKind,
    pub position: Vec3,
    /// Current rotation about +Y.
    pub spin: f32,
    pub bob_speed: f32,
    pub bob_offset: f32,
    pub spin_speed: f32,
}

impl Fruit {
    /// Roll a fruit of random kind somewhere in the spawn square.
    pub fn random(rng: &mut fastrand::Rng, cfg: &FruitConfig) -> Self {
        let id = EntityId::from_rng(rng);
        let x = (rng.f32() - 0.5) * 2.0 * cfg.spawn_half_extent;
        let z = (rng.f32() - 0.5) * 2.0 * cfg.spawn_half_extent;
        let kind = FruitKind::ALL[rng.usize(..FruitKind::ALL.len())];
        Self {
            id,
            kind,
            position: Vec3::new(x, cfg.hover_height, z),
            spin: 0.0,
            bob_speed: rng.f32() * 2.0 + 1.0,
            bob_offset: rng.f32() * TAU,
            spin_speed: rng.f32() * 0.05 + 0.02,
        }
    }

    /// Advance the hover and spin animation to `time`.
    pub fn animate(&mut self, time: f32, cfg: &FruitConfig) {
        let phase = time * self.bob_speed + self.bob_offset;
        self.position.y = cfg.hover_height + phase.sin() * cfg.bob_amplitude;
        self.spin += self.spin_speed;
    }

    pub fn touches(&self, point: Vec3, cfg: &FruitConfig) -> bool {
        self.position.distance(point) < cfg.pickup_radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_fruit_within_ranges() {
        let cfg = FruitConfig::default();
        let mut rng = fastrand::Rng::with_seed(3);
        for _ in 0..200 {
            let f = Fruit::random(&mut rng, &cfg);
            assert!(f.position.x.abs() <= cfg.spawn_half_extent);
            assert!(f.position.z.abs() <= cfg.spawn_half_extent);
            assert_eq!(f.position.y, cfg.hover_height);
            assert!((1.0..3.0).contains(&f.bob_speed));
            assert!((0.0..TAU).contains(&f.bob_offset));
            assert!((0.02..0.07).contains(&f.spin_speed));
        }
    }

    #[test]
    fn bob_stays_in_band() {
        let cfg = FruitConfig::default();
        let mut rng = fastrand::Rng::with_seed(11);
        let mut f = Fruit::random(&mut rng, &cfg);
        for i in 0..500 {
            f.animate(i as f32 * 0.05, &cfg);
            assert!((f.position.y - cfg.hover_height).abs() <= cfg.bob_amplitude + 1e-6);
        }
        assert!(f.spin > 0.0);
    }

    #[test]
    fn pickup_radius() {
        let cfg = FruitConfig::default();
        let mut rng = fastrand::Rng::with_seed(1);
        let f = Fruit::random(&mut rng, &cfg);
        assert!(f.touches(f.position + Vec3::X, &cfg));
        assert!(!f.touches(f.position + Vec3::X * 2.0, &cfg));
    }

    #[test]
    fn all_kinds_have_distinct_colours() {
        let colors: Vec<Color> = FruitKind::ALL.iter().map(|k| k.color()).collect();
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
