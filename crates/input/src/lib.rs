//! Input: platform-neutral keys and pointer state mapped to game actions.
//!
//! # Invariants
//! - The game consumes [`Action`]s and a movement vector, never raw events.
//! - Movement is derived from held keys each tick, so key repeat does not
//!   change speed.

pub mod action;
pub mod bindings;
pub mod pointer;
pub mod state;

pub use action::Action;
pub use bindings::{Binding, Bindings, Control, Key};
pub use pointer::Pointer;
pub use state::InputState;
