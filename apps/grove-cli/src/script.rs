use clap::ValueEnum;
use glam::Vec3;
use grove_kernel::TickInput;

/// Radians the circling walk turns per tick.
const CIRCLE_TURN: f32 = 0.02;

/// How the scripted player moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Walk {
    Still,
    Forward,
    Circle,
}

/// Deterministic stand-in for a player at the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Script {
    pub walk: Walk,
    /// Fire on every n-th tick; 0 never fires.
    pub fire_every: u64,
}

impl Script {
    pub fn input(&self, tick: u64) -> TickInput {
        let movement = match self.walk {
            Walk::Still => Vec3::ZERO,
            Walk::Forward => Vec3::Z,
            Walk::Circle => {
                let angle = tick as f32 * CIRCLE_TURN;
                Vec3::new(angle.sin(), 0.0, angle.cos())
            }
        };
        TickInput {
            movement,
            fire: self.fire_every > 0 && (tick + 1) % self.fire_every == 0,
        }
    }
}
