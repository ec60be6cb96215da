use glam::Vec3;
use grove_common::EntityId;
use grove_kernel::{EntityKind, GameEvent, World};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Read-only queries over a round for debug UI and the CLI.
pub struct GameInspector;

impl GameInspector {
    pub fn summary(world: &World) -> GameSummary {
        let board = world.scoreboard();
        let hippo = world.hippo();
        GameSummary {
            tick: world.tick(),
            seed: world.seed(),
            state_hash: world.state_hash(),
            time: board.time,
            score: board.score,
            fruits_collected: board.fruits,
            enemies_defeated: board.enemies_defeated,
            health: board.health,
            game_over: board.game_over,
            hippo_position: hippo.position.to_array(),
            hippo_yaw: hippo.yaw,
            fruits: world.fruits().len(),
            enemies: world.enemies().len(),
            shots: world.shots().len(),
            trees: world.trees().len(),
            pending_respawns: world.pending_respawns(),
            pending_events: world.events().len(),
        }
    }

    /// Every live entity with its kind.
    pub fn list_entities(world: &World) -> Vec<(EntityId, EntityKind)> {
        let fruits = world.fruits().iter().map(|f| (f.id, EntityKind::Fruit));
        let enemies = world.enemies().iter().map(|e| (e.id, EntityKind::Enemy));
        let shots = world.shots().iter().map(|s| (s.id, EntityKind::WaterShot));
        let trees = world.trees().iter().map(|t| (t.id, EntityKind::Tree));
        fruits.chain(enemies).chain(shots).chain(trees).collect()
    }

    pub fn inspect_entity(world: &World, id: EntityId) -> Option<EntityInfo> {
        if let Some(f) = world.fruits().iter().find(|f| f.id == id) {
            return Some(EntityInfo::new(
                id,
                EntityKind::Fruit,
                f.position,
                f.kind.name().to_string(),
            ));
        }
        if let Some(e) = world.enemies().iter().find(|e| e.id == id) {
            return Some(EntityInfo::new(
                id,
                EntityKind::Enemy,
                e.position,
                format!("health={} speed={:.3}", e.health, e.speed),
            ));
        }
        if let Some(s) = world.shots().iter().find(|s| s.id == id) {
            return Some(EntityInfo::new(
                id,
                EntityKind::WaterShot,
                s.position,
                format!("life={}", s.life),
            ));
        }
        world
            .trees()
            .iter()
            .find(|t| t.id == id)
            .map(|t| EntityInfo::new(id, EntityKind::Tree, t.position, String::new()))
    }

    /// The enemy closest to the hippo and its distance.
    pub fn nearest_enemy(world: &World) -> Option<(EntityId, f32)> {
        let hippo = world.hippo().position;
        world
            .enemies()
            .iter()
            .map(|e| (e.id, e.position.distance(hippo)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
    }
}

/// Snapshot of a round's state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameSummary {
    pub tick: u64,
    pub seed: u64,
    pub state_hash: u64,
    pub time: f32,
    pub score: u32,
    pub fruits_collected: u32,
    pub enemies_defeated: u32,
    pub health: i32,
    pub game_over: bool,
    pub hippo_position: [f32; 3],
    pub hippo_yaw: f32,
    pub fruits: usize,
    pub enemies: usize,
    pub shots: usize,
    pub trees: usize,
    pub pending_respawns: usize,
    pub pending_events: usize,
}

impl fmt::Display for GameSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Round: tick={} time={:.2}s seed={} hash={:016x}{}",
            self.tick,
            self.time,
            self.seed,
            self.state_hash,
            if self.game_over { " GAME OVER" } else { "" }
        )?;
        writeln!(
            f,
            "Score: {} (fruits {}, enemies {}) health={}",
            self.score, self.fruits_collected, self.enemies_defeated, self.health
        )?;
        writeln!(
            f,
            "Hippo: pos=({:.2}, {:.2}, {:.2}) yaw={:.2}",
            self.hippo_position[0], self.hippo_position[1], self.hippo_position[2], self.hippo_yaw
        )?;
        write!(
            f,
            "Entities: fruits={} enemies={} shots={} trees={} respawns_pending={} events={}",
            self.fruits, self.enemies, self.shots, self.trees, self.pending_respawns, self.pending_events
        )
    }
}

/// One entity, flattened for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityInfo {
    pub id: EntityId,
    pub kind: EntityKind,
    pub position: [f32; 3],
    pub detail: String,
}

impl EntityInfo {
    fn new(id: EntityId, kind: EntityKind, position: Vec3, detail: String) -> Self {
        Self {
            id,
            kind,
            position: position.to_array(),
            detail,
        }
    }
}

impl fmt::Display for EntityInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?} [{}] pos=({:.2}, {:.2}, {:.2}) {}",
            self.kind,
            self.id.short(),
            self.position[0],
            self.position[1],
            self.position[2],
            self.detail
        )
    }
}

/// Count of events by variant name.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EventTally(pub BTreeMap<&'static str, usize>);

impl EventTally {
    pub fn add(&mut self, event: &GameEvent) {
        let name = match event {
            GameEvent::Spawned { .. } => "spawned",
            GameEvent::ShotFired { .. } => "shot_fired",
            GameEvent::ShotExpired { .. } => "shot_expired",
            GameEvent::FruitCollected { .. } => "fruit_collected",
            GameEvent::EnemyHit { .. } => "enemy_hit",
            GameEvent::EnemyDefeated { .. } => "enemy_defeated",
            GameEvent::HippoDamaged { .. } => "hippo_damaged",
            GameEvent::GameOver { .. } => "game_over",
            GameEvent::Restarted { .. } => "restarted",
            GameEvent::Stepped { .. } => "stepped",
        };
        *self.0.entry(name).or_default() += 1;
    }

    pub fn extend<'a>(&mut self, events: impl IntoIterator<Item = &'a GameEvent>) {
        for e in events {
            self.add(e);
        }
    }

    pub fn get(&self, name: &str) -> usize {
        self.0.get(name).copied().unwrap_or(0)
    }
}

impl fmt::Display for EventTally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|(k, v)| format!("{k}={v}")).collect();
        write!(f, "{}", parts.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grove_kernel::GameConfig;

    fn world() -> World {
        World::new(GameConfig::default(), 11)
    }

    #[test]
    fn summary_of_fresh_round() {
        let w = world();
        let s = GameInspector::summary(&w);
        assert_eq!(s.tick, 0);
        assert_eq!(s.fruits, 20);
        assert_eq!(s.enemies, 10);
        assert_eq!(s.health, 100);
        assert!(!s.game_over);
        assert_eq!(s.state_hash, w.state_hash());
    }

    #[test]
    fn summary_display_mentions_score_and_entities() {
        let text = GameInspector::summary(&world()).to_string();
        assert!(text.contains("Score: 0"));
        assert!(text.contains("fruits=20"));
        assert!(!text.contains("GAME OVER"));
    }

    #[test]
    fn summary_serialises_to_json() {
        let json = serde_json::to_value(GameInspector::summary(&world())).unwrap();
        assert_eq!(json["enemies"], 10);
    }

    #[test]
    fn list_and_inspect_every_entity() {
        let w = world();
        let all = GameInspector::list_entities(&w);
        assert_eq!(all.len(), w.fruits().len() + w.enemies().len() + w.trees().len());
        for (id, kind) in all {
            let info = GameInspector::inspect_entity(&w, id).unwrap();
            assert_eq!(info.kind, kind);
        }
        assert!(GameInspector::inspect_entity(&w, EntityId::new()).is_none());
    }

    #[test]
    fn inspect_a_shot() {
        let mut w = world();
        let id = w.fire().unwrap();
        let info = GameInspector::inspect_entity(&w, id).unwrap();
        assert_eq!(info.kind, EntityKind::WaterShot);
        assert!(info.to_string().contains("life=100"));
    }

    #[test]
    fn nearest_enemy_is_on_the_ring() {
        let w = world();
        let (_, d) = GameInspector::nearest_enemy(&w).unwrap();
        let cfg = &w.config().enemy;
        assert!(d >= cfg.spawn_min_distance - 1.0);
    }

    #[test]
    fn tally_counts_by_variant() {
        let mut w = world();
        w.step(Vec3::ZERO);
        w.step(Vec3::ZERO);
        let mut tally = EventTally::default();
        tally.extend(w.events());
        assert_eq!(tally.get("stepped"), 2);
        assert!(tally.get("spawned") >= 30);
        assert_eq!(tally.get("game_over"), 0);
        assert!(tally.to_string().contains("stepped=2"));
    }
}
