//! Rendering Adapter: backend-agnostic description of what to draw.
//!
//! # Invariants
//! - Renderers read a [`SceneFrame`] built from the world; they never
//!   mutate the world.
//! - A frame is a pure function of world state, so headless tools and
//!   the GPU backend see the same scene.

pub mod frame;
pub mod hud;
pub mod models;
mod renderer;
pub mod scene;

pub use frame::frame_from_world;
pub use hud::Hud;
pub use renderer::{DebugTextRenderer, FOLLOW_OFFSET, LOOK_HEIGHT, RenderView, Renderer};
pub use scene::{DrawItem, Lighting, SceneFrame, TerrainSurface};
