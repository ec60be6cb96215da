//! Shared vocabulary for the hippo grove workspace: entity ids, transforms,
//! colours and the handful of math helpers every crate leans on.

pub mod color;
pub mod math;
pub mod types;

pub use color::Color;
pub use types::{EntityId, Transform};
