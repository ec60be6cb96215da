use crate::config::GameConfig;
use crate::world::{GameEvent, TickInput, World};
use serde::{Deserialize, Serialize};

/// A seed plus the per-tick inputs of one round. Playing it back into a
/// fresh world reproduces the round exactly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Recording {
    pub seed: u64,
    pub inputs: Vec<TickInput>,
}

impl Recording {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            inputs: Vec::new(),
        }
    }

    /// Record `input`, apply it to `world` and hand back the events the
    /// tick produced.
    pub fn record(&mut self, world: &mut World, input: TickInput) -> Vec<GameEvent> {
        world.apply(&input);
        self.inputs.push(input);
        world.drain_events()
    }

    /// Rebuild the recorded round from scratch. The event log is drained
    /// every tick, so the returned world starts with an empty one.
    pub fn play(&self, config: GameConfig) -> World {
        let mut world = World::new(config, self.seed);
        for input in &self.inputs {
            world.apply(input);
            world.drain_events();
        }
        world
    }

    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }
}
