//! Game Kernel: authoritative hippo-grove state and the per-tick update rules.
//!
//! # Invariants
//! - The simulation advances in fixed ticks; rendering never mutates it.
//! - Each entity lives in exactly one collection; despawning removes it
//!   from play and from tracking at once.
//! - Same seed and same inputs give the same round.
//! - Once the round is over the hippo, the enemies and firing stop; fruit,
//!   shots already in flight and respawns carry on.

pub mod atmosphere;
pub mod config;
pub mod enemy;
pub mod fruit;
pub mod hippo;
pub mod replay;
pub mod terrain;
pub mod tree;
pub mod water;
pub mod world;

pub use atmosphere::Atmosphere;
pub use config::{ConfigError, GameConfig};
pub use enemy::Enemy;
pub use fruit::{Fruit, FruitKind};
pub use hippo::Hippo;
pub use replay::Recording;
pub use terrain::Terrain;
pub use tree::Tree;
pub use water::WaterShot;
pub use world::{EntityKind, GameEvent, Scoreboard, TickInput, World};
