use crate::atmosphere::Atmosphere;
use crate::config::GameConfig;
use crate::enemy::Enemy;
use crate::fruit::{Fruit, FruitKind};
use crate::hippo::Hippo;
use crate::terrain::Terrain;
use crate::tree::{self, Tree};
use crate::water::WaterShot;
use glam::Vec3;
use grove_common::EntityId;
use serde::{Deserialize, Serialize};

/// What sort of thing an entity is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Fruit,
    Enemy,
    WaterShot,
    Tree,
}

/// An event record produced by every gameplay change.
///
/// The log feeds the HUD, the inspector and debug output. Draining it is
/// the consumer's job; the world only appends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Spawned {
        id: EntityId,
        kind: EntityKind,
        position: Vec3,
    },
    ShotFired {
        id: EntityId,
    },
    ShotExpired {
        id: EntityId,
    },
    FruitCollected {
        id: EntityId,
        kind: FruitKind,
        score: u32,
    },
    EnemyHit {
        id: EntityId,
        shot: EntityId,
        health: i32,
    },
    EnemyDefeated {
        id: EntityId,
        score: u32,
    },
    HippoDamaged {
        by: EntityId,
        health: i32,
    },
    GameOver {
        score: u32,
    },
    Restarted {
        seed: u64,
    },
    /// Simulation advanced one tick with the given seed.
    Stepped {
        tick: u64,
        seed: u64,
    },
}

/// Score, health and clocks for the current round.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scoreboard {
    pub score: u32,
    pub fruits: u32,
    pub enemies_defeated: u32,
    pub health: i32,
    pub game_over: bool,
    /// Seconds since the round started.
    pub time: f32,
    pub terrain_phase: f32,
}

impl Scoreboard {
    fn fresh(max_health: i32) -> Self {
        Self {
            score: 0,
            fruits: 0,
            enemies_defeated: 0,
            health: max_health,
            game_over: false,
            time: 0.0,
            terrain_phase: 0.0,
        }
    }
}

/// Everything a single tick needs from the player.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TickInput {
    /// Raw movement keys (x: left positive, z: forward positive).
    pub movement: Vec3,
    /// Whether a shot was requested since the previous tick.
    pub fire: bool,
}

/// The authoritative game state.
///
/// All mutations go through explicit operations. Each collection is the
/// only owner of its entities, so removing an entity from play and from
/// tracking is one and the same operation.
///
/// Randomness comes from a generator reseeded from `seed` every tick; given
/// the same starting seed and the same inputs, a round plays out
/// identically.
#[derive(Debug, Clone)]
pub struct World {
    config: GameConfig,
    scoreboard: Scoreboard,
    hippo: Hippo,
    fruits: Vec<Fruit>,
    enemies: Vec<Enemy>,
    shots: Vec<WaterShot>,
    trees: Vec<Tree>,
    terrain: Terrain,
    atmosphere: Atmosphere,
    /// Seconds left on each scheduled enemy replacement.
    pending_respawns: Vec<f32>,
    tick: u64,
    seed: u64,
    rng: fastrand::Rng,
    /// Append-only event log of all gameplay changes.
    event_log: Vec<GameEvent>,
}

impl Default for World {
    fn default() -> Self {
        Self::new(GameConfig::default(), 0)
    }
}

impl World {
    /// Set up a fresh round.
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let mut world = Self {
            scoreboard: Scoreboard::fresh(config.hippo.max_health),
            hippo: Hippo::default(),
            fruits: Vec::new(),
            enemies: Vec::new(),
            shots: Vec::new(),
            trees: Vec::new(),
            terrain: Terrain::new(&config.terrain),
            atmosphere: Atmosphere::default(),
            pending_respawns: Vec::new(),
            tick: 0,
            seed,
            rng: fastrand::Rng::with_seed(seed),
            event_log: Vec::new(),
            config,
        };
        world.populate();
        world
    }

    fn populate(&mut self) {
        self.trees = tree::scatter(&mut self.rng, &self.config.trees);
        for i in 0..self.trees.len() {
            let (id, position) = (self.trees[i].id, self.trees[i].position);
            self.event_log.push(GameEvent::Spawned {
                id,
                kind: EntityKind::Tree,
                position,
            });
        }
        for _ in 0..self.config.fruit.initial_count {
            self.spawn_fruit();
        }
        for _ in 0..self.config.enemy.initial_count {
            self.spawn_enemy();
        }
        tracing::debug!(
            trees = self.trees.len(),
            fruits = self.fruits.len(),
            enemies = self.enemies.len(),
            seed = self.seed,
            "round populated"
        );
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn scoreboard(&self) -> &Scoreboard {
        &self.scoreboard
    }

    pub fn is_game_over(&self) -> bool {
        self.scoreboard.game_over
    }

    pub fn hippo(&self) -> &Hippo {
        &self.hippo
    }

    pub fn fruits(&self) -> &[Fruit] {
        &self.fruits
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn shots(&self) -> &[WaterShot] {
        &self.shots
    }

    pub fn trees(&self) -> &[Tree] {
        &self.trees
    }

    pub fn terrain(&self) -> &Terrain {
        &self.terrain
    }

    pub fn atmosphere(&self) -> &Atmosphere {
        &self.atmosphere
    }

    /// Number of enemy replacements still waiting to arrive.
    pub fn pending_respawns(&self) -> usize {
        self.pending_respawns.len()
    }

    /// Current simulation tick.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Current RNG seed.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Number of live entities, scenery included.
    pub fn entity_count(&self) -> usize {
        self.fruits.len() + self.enemies.len() + self.shots.len() + self.trees.len()
    }

    /// Drain and return the event log.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.event_log)
    }

    /// Read-only access to the event log.
    pub fn events(&self) -> &[GameEvent] {
        &self.event_log
    }

    /// Feed one tick of player input: fire first, then step.
    pub fn apply(&mut self, input: &TickInput) {
        if input.fire {
            self.fire();
        }
        self.step(input.movement);
    }

    /// Spit a water shot from the hippo's mouth. Ignored once the round is
    /// over.
    pub fn fire(&mut self) -> Option<EntityId> {
        if self.scoreboard.game_over {
            return None;
        }
        let (start, dir) = self.hippo.muzzle(&self.config.water);
        let id = EntityId::from_rng(&mut self.rng);
        self.shots
            .push(WaterShot::launch(id, start, dir, &self.config.water));
        self.event_log.push(GameEvent::ShotFired { id });
        Some(id)
    }

    /// Advance the simulation by one fixed tick.
    pub fn step(&mut self, movement: Vec3) {
        let dt = self.config.tick_seconds();
        self.tick += 1;
        self.seed = splitmix64(self.seed);
        self.rng.seed(self.seed);
        self.event_log.push(GameEvent::Stepped {
            tick: self.tick,
            seed: self.seed,
        });

        self.scoreboard.time += dt;
        self.scoreboard.terrain_phase += self.config.terrain.phase_step;

        if !self.scoreboard.game_over {
            self.hippo
                .steer(movement, self.scoreboard.time, &self.config.hippo);
        }
        self.update_fruits();
        self.update_enemies(dt);
        self.update_shots();
        self.update_respawns(dt);
        self.terrain.morph(self.scoreboard.terrain_phase);
        self.atmosphere = Atmosphere::at(self.scoreboard.time);

        if self.rng.f32() < self.config.enemy.random_spawn_chance
            && self.enemies.len() < self.config.enemy.max_count
        {
            let id = self.spawn_enemy();
            tracing::debug!(enemy = %id.short(), "extra enemy wandered in");
        }
    }

    /// Throw away the current round and start a new one on the next seed.
    pub fn restart(&mut self) {
        let seed = splitmix64(self.seed);
        let config = self.config.clone();
        let mut log = std::mem::take(&mut self.event_log);
        *self = Self::new(config, seed);
        log.push(GameEvent::Restarted { seed });
        log.append(&mut self.event_log);
        self.event_log = log;
        tracing::info!(seed, "round restarted");
    }

    fn spawn_fruit(&mut self) -> EntityId {
        let fruit = Fruit::random(&mut self.rng, &self.config.fruit);
        let (id, position) = (fruit.id, fruit.position);
        self.fruits.push(fruit);
        self.event_log.push(GameEvent::Spawned {
            id,
            kind: EntityKind::Fruit,
            position,
        });
        id
    }

    fn spawn_enemy(&mut self) -> EntityId {
        let enemy = Enemy::on_ring(&mut self.rng, &self.config.enemy);
        let (id, position) = (enemy.id, enemy.position);
        self.enemies.push(enemy);
        self.event_log.push(GameEvent::Spawned {
            id,
            kind: EntityKind::Enemy,
            position,
        });
        id
    }

    fn update_fruits(&mut self) {
        let time = self.scoreboard.time;
        let cfg = &self.config.fruit;
        for fruit in &mut self.fruits {
            fruit.animate(time, cfg);
        }

        let hippo = self.hippo.position;
        let mut collected = Vec::new();
        self.fruits.retain(|fruit| {
            if fruit.touches(hippo, cfg) {
                collected.push((fruit.id, fruit.kind));
                false
            } else {
                true
            }
        });

        for (id, kind) in collected {
            self.scoreboard.score += self.config.fruit.score;
            self.scoreboard.fruits += 1;
            self.event_log.push(GameEvent::FruitCollected {
                id,
                kind,
                score: self.scoreboard.score,
            });
            tracing::debug!(fruit = kind.name(), score = self.scoreboard.score, "fruit collected");
            self.spawn_fruit();
        }
    }

    fn update_enemies(&mut self, dt: f32) {
        let target = self.hippo.position;
        let time = self.scoreboard.time;
        let cfg = &self.config.enemy;
        for (index, enemy) in self.enemies.iter_mut().enumerate() {
            if self.scoreboard.game_over {
                break;
            }
            enemy.chase(target, time, index, cfg);
            if !enemy.try_bite(target, dt, cfg) {
                continue;
            }

            self.scoreboard.health -= cfg.attack_damage;
            self.event_log.push(GameEvent::HippoDamaged {
                by: enemy.id,
                health: self.scoreboard.health,
            });
            if self.scoreboard.health <= 0 {
                self.scoreboard.game_over = true;
                self.event_log.push(GameEvent::GameOver {
                    score: self.scoreboard.score,
                });
                tracing::info!(score = self.scoreboard.score, "game over");
            }
        }
    }

    fn update_shots(&mut self) {
        let hit_radius = self.config.water.hit_radius;
        let enemy_cfg = &self.config.enemy;
        let mut i = 0;
        while i < self.shots.len() {
            if !self.shots[i].advance() {
                let shot = self.shots.remove(i);
                self.event_log.push(GameEvent::ShotExpired { id: shot.id });
                continue;
            }
            let position = self.shots[i].position;
            let Some(target) = self
                .enemies
                .iter()
                .position(|e| e.body_centre(enemy_cfg).distance(position) < hit_radius)
            else {
                i += 1;
                continue;
            };

            let shot = self.shots.remove(i);
            let down = self.enemies[target].soak();
            self.event_log.push(GameEvent::EnemyHit {
                id: self.enemies[target].id,
                shot: shot.id,
                health: self.enemies[target].health,
            });
            if down {
                let enemy = self.enemies.remove(target);
                self.scoreboard.score += self.config.enemy.score;
                self.scoreboard.enemies_defeated += 1;
                self.pending_respawns
                    .push(self.config.enemy.respawn_delay_secs);
                self.event_log.push(GameEvent::EnemyDefeated {
                    id: enemy.id,
                    score: self.scoreboard.score,
                });
                tracing::debug!(enemy = %enemy.id.short(), score = self.scoreboard.score, "enemy defeated");
            }
        }
    }

    fn update_respawns(&mut self, dt: f32) {
        if self.pending_respawns.is_empty() {
            return;
        }
        for remaining in &mut self.pending_respawns {
            *remaining -= dt;
        }
        let due = self.pending_respawns.iter().filter(|r| **r <= 0.0).count();
        self.pending_respawns.retain(|r| *r > 0.0);
        for _ in 0..due {
            self.spawn_enemy();
        }
    }

    /// Compute a deterministic hash of the world state for comparison.
    pub fn state_hash(&self) -> u64 {
        let mut h: u64 = 0xcbf2_9ce4_8422_2325; // FNV offset basis
        let mix = |h: &mut u64, bytes: &[u8]| {
            for &b in bytes {
                *h ^= b as u64;
                *h = h.wrapping_mul(0x0100_0000_01b3);
            }
        };
        let mix_vec = |h: &mut u64, v: Vec3| {
            mix(h, &v.x.to_le_bytes());
            mix(h, &v.y.to_le_bytes());
            mix(h, &v.z.to_le_bytes());
        };

        let sb = &self.scoreboard;
        mix(&mut h, &self.tick.to_le_bytes());
        mix(&mut h, &self.seed.to_le_bytes());
        mix(&mut h, &sb.score.to_le_bytes());
        mix(&mut h, &sb.fruits.to_le_bytes());
        mix(&mut h, &sb.enemies_defeated.to_le_bytes());
        mix(&mut h, &sb.health.to_le_bytes());
        mix(&mut h, &[sb.game_over as u8]);
        mix_vec(&mut h, self.hippo.position);
        mix(&mut h, &self.hippo.yaw.to_le_bytes());
        for f in &self.fruits {
            mix(&mut h, f.id.0.as_bytes());
            mix_vec(&mut h, f.position);
        }
        for e in &self.enemies {
            mix(&mut h, e.id.0.as_bytes());
            mix_vec(&mut h, e.position);
            mix(&mut h, &e.health.to_le_bytes());
        }
        for s in &self.shots {
            mix(&mut h, s.id.0.as_bytes());
            mix_vec(&mut h, s.position);
        }
        mix(&mut h, &self.terrain.phase().to_le_bytes());
        h
    }
}

/// Splitmix64 ... a fast, high-quality deterministic PRNG step function.
/// Used to advance the world seed each tick in a reproducible way.
fn splitmix64(mut state: u64) -> u64 {
    state = state.wrapping_add(0x9e37_79b9_7f4a_7c15);
    let mut z = state;
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiet_config() -> GameConfig {
        let mut cfg = GameConfig::default();
        cfg.enemy.random_spawn_chance = 0.0;
        cfg
    }

    /// A world with no fruit or enemies, for staging encounters by hand.
    fn empty_world() -> World {
        let mut cfg = quiet_config();
        cfg.fruit.initial_count = 0;
        cfg.enemy.initial_count = 0;
        World::new(cfg, 1)
    }

    fn enemy_at(world: &mut World, position: Vec3) -> EntityId {
        let id = EntityId::from_rng(&mut world.rng);
        world.enemies.push(Enemy {
            id,
            position,
            yaw: 0.0,
            health: world.config.enemy.health,
            speed: 0.0,
            attack_cooldown: 0.0,
        });
        id
    }

    #[test]
    fn new_world_is_populated() {
        let w = World::new(GameConfig::default(), 42);
        assert_eq!(w.tick(), 0);
        assert_eq!(w.fruits().len(), 20);
        assert_eq!(w.enemies().len(), 10);
        assert!(w.trees().len() <= 50);
        assert_eq!(w.scoreboard().health, 100);
        assert!(!w.is_game_over());
        let spawned = w
            .events()
            .iter()
            .filter(|e| matches!(e, GameEvent::Spawned { .. }))
            .count();
        assert_eq!(spawned, w.entity_count());
    }

    #[test]
    fn step_increments_tick_and_clock() {
        let mut w = World::new(quiet_config(), 3);
        w.step(Vec3::ZERO);
        w.step(Vec3::ZERO);
        w.step(Vec3::ZERO);
        assert_eq!(w.tick(), 3);
        assert!((w.scoreboard().time - 3.0 / 60.0).abs() < 1e-6);
        assert!((w.scoreboard().terrain_phase - 0.009).abs() < 1e-6);
        assert!((w.terrain().phase() - 0.009).abs() < 1e-6);
    }

    #[test]
    fn same_seed_same_inputs_same_state() {
        let mut w1 = World::new(GameConfig::default(), 42);
        let mut w2 = World::new(GameConfig::default(), 42);
        for i in 0..300 {
            let input = TickInput {
                movement: if i % 50 < 25 { Vec3::Z } else { Vec3::X },
                fire: i % 17 == 0,
            };
            w1.apply(&input);
            w2.apply(&input);
        }
        assert_eq!(w1.state_hash(), w2.state_hash());
        assert_eq!(w1.seed(), w2.seed());
    }

    #[test]
    fn different_seeds_diverge() {
        let w1 = World::new(GameConfig::default(), 1);
        let w2 = World::new(GameConfig::default(), 2);
        assert_ne!(w1.state_hash(), w2.state_hash());
    }

    #[test]
    fn hippo_walks_with_input() {
        let mut w = World::new(quiet_config(), 5);
        for _ in 0..10 {
            w.step(Vec3::Z);
        }
        assert!(w.hippo().position.z > 1.0);
    }

    #[test]
    fn touching_fruit_scores_and_replaces_it() {
        let mut w = World::new(quiet_config(), 9);
        let before = w.fruits().len();
        let id = w.fruits[0].id;
        for f in &mut w.fruits[1..] {
            f.position = Vec3::new(30.0, 1.0, 30.0);
        }
        w.fruits[0].position = Vec3::new(0.0, 1.0, 0.0);
        w.fruits[0].bob_offset = 0.0;
        w.step(Vec3::ZERO);

        assert_eq!(w.scoreboard().score, 10);
        assert_eq!(w.scoreboard().fruits, 1);
        assert_eq!(w.fruits().len(), before);
        assert!(w.fruits().iter().all(|f| f.id != id));
        assert!(w
            .events()
            .iter()
            .any(|e| matches!(e, GameEvent::FruitCollected { id: got, .. } if *got == id)));
    }

    #[test]
    fn enemy_bites_once_per_cooldown() {
        let mut w = empty_world();
        enemy_at(&mut w, Vec3::new(1.0, 0.0, 0.0));
        w.step(Vec3::ZERO);
        assert_eq!(w.scoreboard().health, 95);
        // Just under a second of ticks: no second bite yet.
        for _ in 0..59 {
            w.step(Vec3::ZERO);
        }
        assert_eq!(w.scoreboard().health, 95);
        w.step(Vec3::ZERO);
        w.step(Vec3::ZERO);
        assert_eq!(w.scoreboard().health, 90);
    }

    #[test]
    fn health_running_out_ends_the_round() {
        let mut w = empty_world();
        w.scoreboard.health = 5;
        enemy_at(&mut w, Vec3::new(1.0, 0.0, 0.0));
        w.step(Vec3::ZERO);
        assert!(w.is_game_over());
        assert!(w
            .events()
            .iter()
            .any(|e| matches!(e, GameEvent::GameOver { score: 0 })));

        // Frozen: no movement, no more shots.
        let hippo = w.hippo().position;
        w.step(Vec3::Z);
        assert_eq!(w.hippo().position, hippo);
        assert!(w.fire().is_none());
        assert_eq!(w.scoreboard().health, 0);
    }

    #[test]
    fn world_keeps_running_around_a_frozen_hippo() {
        let mut w = empty_world();
        let id = enemy_at(&mut w, Vec3::new(0.0, 0.0, 2.1));
        w.fire();
        w.scoreboard.game_over = true;

        // A shot already in flight still lands.
        w.step(Vec3::ZERO);
        let enemy = w.enemies().iter().find(|e| e.id == id).unwrap();
        assert_eq!(enemy.health, w.config().enemy.health - 1);

        // Fruit under the hippo is still picked up.
        let mut fruit = Fruit::random(&mut w.rng, &w.config.fruit);
        fruit.position = w.hippo().position;
        w.fruits.push(fruit);
        w.step(Vec3::ZERO);
        assert_eq!(w.scoreboard().fruits, 1);
        assert_eq!(w.scoreboard().score, w.config().fruit.score);
        assert_eq!(w.fruits().len(), 1);
    }

    #[test]
    fn defeats_after_game_over_still_respawn() {
        let mut w = empty_world();
        enemy_at(&mut w, Vec3::new(0.0, 0.0, 2.1));
        w.scoreboard.game_over = true;
        for _ in 0..3 {
            // Firing is refused now, so launch by hand.
            let (start, dir) = w.hippo.muzzle(&w.config.water);
            let id = EntityId::from_rng(&mut w.rng);
            let shot = WaterShot::launch(id, start, dir, &w.config.water);
            w.shots.push(shot);
            w.step(Vec3::ZERO);
        }
        assert!(w.enemies().is_empty());
        assert_eq!(w.scoreboard().enemies_defeated, 1);
        for _ in 0..125 {
            w.step(Vec3::ZERO);
        }
        assert_eq!(w.enemies().len(), 1);
    }

    #[test]
    fn three_hits_defeat_an_enemy_and_schedule_a_replacement() {
        let mut w = empty_world();
        // Straight ahead of the hippo, where the first tick of flight lands.
        let id = enemy_at(&mut w, Vec3::new(0.0, 0.0, 2.1));

        for hit in 1..=3 {
            assert!(w.fire().is_some());
            w.step(Vec3::ZERO);
            assert!(w.shots().is_empty(), "shot {hit} should have landed");
        }
        assert!(w.enemies().iter().all(|e| e.id != id));
        assert_eq!(w.scoreboard().score, 50);
        assert_eq!(w.scoreboard().enemies_defeated, 1);
        assert_eq!(w.pending_respawns(), 1);

        // Replacement arrives two seconds later.
        for _ in 0..110 {
            w.step(Vec3::ZERO);
        }
        assert!(w.enemies().is_empty());
        for _ in 0..12 {
            w.step(Vec3::ZERO);
        }
        assert_eq!(w.enemies().len(), 1);
        assert_eq!(w.pending_respawns(), 0);
    }

    #[test]
    fn one_shot_damages_one_enemy() {
        let mut w = empty_world();
        enemy_at(&mut w, Vec3::new(0.0, 0.0, 2.1));
        enemy_at(&mut w, Vec3::new(0.0, 0.0, 2.2));
        w.fire();
        w.step(Vec3::ZERO);
        let total: i32 = w.enemies().iter().map(|e| e.health).sum();
        assert_eq!(total, 5);
    }

    #[test]
    fn missed_shots_expire() {
        let mut w = empty_world();
        let id = w.fire().unwrap();
        for _ in 0..w.config().water.lifetime_ticks {
            w.step(Vec3::ZERO);
        }
        assert!(w.shots().is_empty());
        assert!(w
            .events()
            .iter()
            .any(|e| matches!(e, GameEvent::ShotExpired { id: got } if *got == id)));
    }

    #[test]
    fn random_spawns_respect_the_cap() {
        let mut cfg = GameConfig::default();
        cfg.enemy.random_spawn_chance = 1.0;
        cfg.enemy.max_count = 12;
        let mut w = World::new(cfg, 8);
        for _ in 0..10 {
            w.step(Vec3::ZERO);
        }
        assert_eq!(w.enemies().len(), 12);
    }

    #[test]
    fn restart_starts_a_clean_round() {
        let mut w = empty_world();
        w.scoreboard.health = 5;
        enemy_at(&mut w, Vec3::new(1.0, 0.0, 0.0));
        w.step(Vec3::ZERO);
        assert!(w.is_game_over());
        let old_seed = w.seed();

        w.restart();
        assert!(!w.is_game_over());
        assert_eq!(w.tick(), 0);
        assert_eq!(w.scoreboard().health, 100);
        assert_eq!(w.scoreboard().score, 0);
        assert_ne!(w.seed(), old_seed);
        assert!(w
            .events()
            .iter()
            .any(|e| matches!(e, GameEvent::Restarted { .. })));
    }

    #[test]
    fn drain_events_clears_log() {
        let mut w = World::new(quiet_config(), 0);
        w.step(Vec3::ZERO);
        let events = w.drain_events();
        assert!(!events.is_empty());
        assert!(w.events().is_empty());
    }

    #[test]
    fn atmosphere_tracks_time() {
        let mut w = World::new(quiet_config(), 0);
        for _ in 0..600 {
            w.step(Vec3::ZERO);
        }
        let expected = Atmosphere::at(w.scoreboard().time);
        assert_eq!(*w.atmosphere(), expected);
    }
}
