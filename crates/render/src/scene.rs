use glam::{Mat4, Vec3};
use grove_assets::Primitive;
use grove_common::Color;
use serde::Serialize;

/// One primitive instance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DrawItem {
    pub primitive: Primitive,
    pub model: Mat4,
    pub color: Color,
    /// Light the surface gives off regardless of scene lighting, already
    /// multiplied by its intensity.
    pub emissive: Color,
    /// Opacity in `[0, 1]`.
    pub alpha: f32,
}

impl DrawItem {
    pub fn solid(primitive: Primitive, model: Mat4, color: Color) -> Self {
        Self {
            primitive,
            model,
            color,
            emissive: Color::BLACK,
            alpha: 1.0,
        }
    }

    pub fn glowing(mut self, emissive: Color, intensity: f32) -> Self {
        self.emissive = emissive.scaled(intensity);
        self
    }

    pub fn translucent(mut self, alpha: f32) -> Self {
        self.alpha = alpha;
        self
    }

    /// World-space origin of the instance.
    pub fn origin(&self) -> Vec3 {
        self.model.w_axis.truncate()
    }
}

/// Scene lights and fog.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Lighting {
    pub ambient: f32,
    pub sun_color: Color,
    pub sun_intensity: f32,
    /// Directional light shines from here toward the origin.
    pub sun_position: Vec3,
    pub point_color: Color,
    pub point_intensity: f32,
    pub point_position: Vec3,
    /// Point light contribution falls to zero at this distance.
    pub point_range: f32,
    pub fog_color: Color,
    pub fog_near: f32,
    pub fog_far: f32,
}

impl Default for Lighting {
    fn default() -> Self {
        Self {
            ambient: 0.6,
            sun_color: Color::from_hex(0xffd700),
            sun_intensity: 1.0,
            sun_position: Vec3::new(50.0, 50.0, 50.0),
            point_color: Color::from_hex(0x00ff00),
            point_intensity: 0.5,
            point_position: Vec3::new(0.0, 10.0, 0.0),
            point_range: 30.0,
            fog_color: Color::from_hex(0x228b22),
            fog_near: 10.0,
            fog_far: 100.0,
        }
    }
}

/// Ground mesh for the current tick. Drawn flat shaded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TerrainSurface {
    pub positions: Vec<Vec3>,
    pub indices: Vec<u32>,
    pub color: Color,
}

impl TerrainSurface {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Everything a backend needs for one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneFrame {
    pub items: Vec<DrawItem>,
    pub terrain: Option<TerrainSurface>,
    pub lighting: Lighting,
}

impl SceneFrame {
    pub fn new(lighting: Lighting) -> Self {
        Self {
            items: Vec::new(),
            terrain: None,
            lighting,
        }
    }

    /// Clear colour; matches the fog so distant geometry fades into it.
    pub fn background(&self) -> Color {
        self.lighting.fog_color
    }

    pub fn extend(&mut self, items: impl IntoIterator<Item = DrawItem>) {
        self.items.extend(items);
    }

    pub fn count(&self, primitive: Primitive) -> usize {
        self.items.iter().filter(|i| i.primitive == primitive).count()
    }
}
