//! wgpu render backend for hippo grove.
//!
//! Draws a [`grove_render::SceneFrame`]: instanced primitives, the
//! flat-shaded terrain and any uploaded asset meshes, lit by ambient, sun
//! and point light with distance fog.
//!
//! # Invariants
//! - The renderer never sees or mutates world state, only frames.
//! - Camera motion is not part of the deterministic simulation.
//! - Simulation ticks are decoupled from the render frame rate.

mod camera;
mod gpu;
mod shaders;

pub use camera::{Camera, FOLLOW_LERP};
pub use gpu::{AssetDraw, FrameStats, WgpuRenderer};
