//! Tunable game constants.
//!
//! Every number the update rules use lives here so a round can be re-tuned
//! from a YAML file without touching code. Missing keys fall back to the
//! defaults below.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Errors from loading or saving a [`GameConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Fixed simulation ticks per second.
    pub tick_rate: f32,
    pub hippo: HippoConfig,
    pub fruit: FruitConfig,
    pub enemy: EnemyConfig,
    pub water: WaterConfig,
    pub terrain: TerrainConfig,
    pub trees: TreeConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HippoConfig {
    pub max_health: i32,
    /// Distance covered per tick while a direction is held.
    pub move_speed: f32,
    /// Fraction of the remaining turn applied per tick.
    pub turn_rate: f32,
    /// Half-width of the square play area.
    pub bounds: f32,
    pub bob_frequency: f32,
    pub bob_amplitude: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FruitConfig {
    pub initial_count: usize,
    pub spawn_half_extent: f32,
    pub hover_height: f32,
    pub bob_amplitude: f32,
    pub pickup_radius: f32,
    pub score: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    pub initial_count: usize,
    /// Random spawns stop once this many enemies are alive.
    pub max_count: usize,
    pub spawn_min_distance: f32,
    pub spawn_distance_jitter: f32,
    pub base_speed: f32,
    pub speed_jitter: f32,
    pub health: i32,
    pub attack_range: f32,
    pub attack_damage: i32,
    pub attack_cooldown_secs: f32,
    pub respawn_delay_secs: f32,
    /// Chance per tick of an extra enemy joining.
    pub random_spawn_chance: f32,
    pub score: u32,
    pub bob_frequency: f32,
    pub bob_amplitude: f32,
    /// Height of the body centre above the enemy's feet; water shots aim
    /// for the body.
    pub body_height: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaterConfig {
    pub speed: f32,
    pub lifetime_ticks: u32,
    /// Upward component added to the firing direction before normalising.
    pub lift: f32,
    pub muzzle_height: f32,
    pub muzzle_offset: f32,
    pub hit_radius: f32,
}

/// Largest terrain grid `validate` accepts.
pub const MAX_TERRAIN_SEGMENTS: u32 = 1024;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    pub size: f32,
    pub segments: u32,
    /// Phase advance per tick.
    pub phase_step: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
    pub attempts: usize,
    pub half_extent: f32,
    /// Trees are kept out of the square of this half-width around the origin.
    pub clearing: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tick_rate: 60.0,
            hippo: HippoConfig::default(),
            fruit: FruitConfig::default(),
            enemy: EnemyConfig::default(),
            water: WaterConfig::default(),
            terrain: TerrainConfig::default(),
            trees: TreeConfig::default(),
        }
    }
}

impl Default for HippoConfig {
    fn default() -> Self {
        Self {
            max_health: 100,
            move_speed: 0.15,
            turn_rate: 0.08,
            bounds: 90.0,
            bob_frequency: 5.0,
            bob_amplitude: 0.1,
        }
    }
}

impl Default for FruitConfig {
    fn default() -> Self {
        Self {
            initial_count: 20,
            spawn_half_extent: 40.0,
            hover_height: 1.0,
            bob_amplitude: 0.3,
            pickup_radius: 1.5,
            score: 10,
        }
    }
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            initial_count: 10,
            max_count: 15,
            spawn_min_distance: 30.0,
            spawn_distance_jitter: 20.0,
            base_speed: 0.03,
            speed_jitter: 0.02,
            health: 3,
            attack_range: 2.0,
            attack_damage: 5,
            attack_cooldown_secs: 1.0,
            respawn_delay_secs: 2.0,
            random_spawn_chance: 0.001,
            score: 50,
            bob_frequency: 3.0,
            bob_amplitude: 0.2,
            body_height: 0.5,
        }
    }
}

impl Default for WaterConfig {
    fn default() -> Self {
        Self {
            speed: 0.5,
            lifetime_ticks: 100,
            lift: 0.1,
            muzzle_height: 1.0,
            muzzle_offset: 1.5,
            hit_radius: 1.0,
        }
    }
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            size: 200.0,
            segments: 50,
            phase_step: 0.003,
        }
    }
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            attempts: 50,
            half_extent: 75.0,
            clearing: 10.0,
        }
    }
}

impl GameConfig {
    /// Seconds covered by one simulation tick.
    pub fn tick_seconds(&self) -> f32 {
        1.0 / self.tick_rate
    }

    /// Load a config from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let data = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml(&data)
    }

    pub fn from_yaml(data: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(data)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Save the config as YAML.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        std::fs::write(path, self.to_yaml()?)?;
        Ok(())
    }

    /// Reject values the update rules cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.tick_rate > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "tick_rate must be positive, got {}",
                self.tick_rate
            )));
        }
        if !(1..=MAX_TERRAIN_SEGMENTS).contains(&self.terrain.segments) {
            return Err(ConfigError::Invalid(format!(
                "terrain.segments must be between 1 and {MAX_TERRAIN_SEGMENTS}, got {}",
                self.terrain.segments
            )));
        }
        if self.hippo.max_health <= 0 {
            return Err(ConfigError::Invalid("hippo.max_health must be positive".into()));
        }
        if self.enemy.health <= 0 {
            return Err(ConfigError::Invalid("enemy.health must be positive".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let c = GameConfig::default();
        assert!(c.validate().is_ok());
        assert_eq!(c.hippo.max_health, 100);
        assert_eq!(c.enemy.max_count, 15);
    }

    #[test]
    fn tick_seconds_matches_rate() {
        let c = GameConfig::default();
        assert!((c.tick_seconds() - 1.0 / 60.0).abs() < 1e-9);
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let c = GameConfig::from_yaml("enemy:\n  health: 5\n").unwrap();
        assert_eq!(c.enemy.health, 5);
        assert_eq!(c.enemy.attack_damage, 5);
        assert_eq!(c.fruit.initial_count, 20);
    }

    #[test]
    fn yaml_round_trip() {
        let mut c = GameConfig::default();
        c.water.speed = 0.75;
        let yaml = c.to_yaml().unwrap();
        let back = GameConfig::from_yaml(&yaml).unwrap();
        assert_eq!(back, c);
    }

    #[test]
    fn rejects_zero_tick_rate() {
        let err = GameConfig::from_yaml("tick_rate: 0.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_huge_terrain() {
        let err = GameConfig::from_yaml("terrain:\n  segments: 4294967295\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        let mut c = GameConfig::default();
        c.terrain.segments = MAX_TERRAIN_SEGMENTS;
        assert!(c.validate().is_ok());
        c.terrain.segments = 0;
        assert!(c.validate().is_err());
    }

    #[test]
    fn save_and_load() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        let c = GameConfig::default();
        c.save(tmp.path()).unwrap();
        assert_eq!(GameConfig::load(tmp.path()).unwrap(), c);
    }
}
