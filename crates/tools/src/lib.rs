//! Developer Tooling: read-only inspection of a running round.
//!
//! # Invariants
//! - Tools only read the world; nothing here can change a round.

mod inspector;

pub use inspector::{EntityInfo, EventTally, GameInspector, GameSummary};
