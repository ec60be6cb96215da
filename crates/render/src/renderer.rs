use crate::scene::SceneFrame;
use glam::Vec3;
use grove_assets::Primitive;
use std::collections::BTreeMap;
use std::fmt::Write;

/// Offset from the hippo to where the follow camera wants to be.
pub const FOLLOW_OFFSET: Vec3 = Vec3::new(0.0, 8.0, -12.0);
/// The follow camera aims this far above the hippo's feet.
pub const LOOK_HEIGHT: f32 = 1.0;

/// Camera parameters a renderer needs for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderView {
    pub eye: Vec3,
    pub target: Vec3,
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl RenderView {
    /// View from the settled follow camera behind `subject`.
    pub fn following(subject: Vec3) -> Self {
        Self {
            eye: subject + FOLLOW_OFFSET,
            target: subject + Vec3::Y * LOOK_HEIGHT,
            ..Self::default()
        }
    }
}

impl Default for RenderView {
    fn default() -> Self {
        Self {
            eye: FOLLOW_OFFSET,
            target: Vec3::Y * LOOK_HEIGHT,
            fov_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

/// Renderer-agnostic interface.
///
/// A renderer turns a [`SceneFrame`] into output. It only ever sees the
/// frame, never the world it was built from.
pub trait Renderer {
    type Output;

    fn render(&mut self, frame: &SceneFrame, view: &RenderView) -> Self::Output;
}

/// Human-readable dump of a frame, for the CLI, logs and tests.
#[derive(Debug, Default)]
pub struct DebugTextRenderer {
    frames: u64,
}

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&mut self, frame: &SceneFrame, view: &RenderView) -> String {
        self.frames += 1;
        let mut out = String::new();
        let _ = writeln!(out, "=== Frame {} ===", self.frames);
        let _ = writeln!(
            out,
            "Camera: eye=({:.1}, {:.1}, {:.1}) target=({:.1}, {:.1}, {:.1}) fov={:.0}",
            view.eye.x, view.eye.y, view.eye.z, view.target.x, view.target.y, view.target.z,
            view.fov_degrees
        );
        let l = &frame.lighting;
        let _ = writeln!(
            out,
            "Lighting: ambient={:.2} sun={:.2} point={:.2} fog=({:.2}, {:.2}, {:.2}) {:.0}..{:.0}",
            l.ambient,
            l.sun_intensity,
            l.point_intensity,
            l.fog_color.r,
            l.fog_color.g,
            l.fog_color.b,
            l.fog_near,
            l.fog_far
        );

        let mut per_primitive: BTreeMap<String, usize> = BTreeMap::new();
        for item in &frame.items {
            *per_primitive.entry(item.primitive.name()).or_default() += 1;
        }
        let _ = writeln!(out, "Items: {}", frame.items.len());
        for (name, count) in &per_primitive {
            let _ = writeln!(out, "  {name}: {count}");
        }
        match &frame.terrain {
            Some(t) => {
                let _ = writeln!(
                    out,
                    "Terrain: {} vertices, {} triangles",
                    t.positions.len(),
                    t.triangle_count()
                );
            }
            None => {
                let _ = writeln!(out, "Terrain: none");
            }
        }
        let emissive = frame
            .items
            .iter()
            .filter(|i| i.emissive.r + i.emissive.g + i.emissive.b > 0.0)
            .count();
        let _ = writeln!(out, "Glowing: {emissive}");
        let _ = writeln!(
            out,
            "Translucent: {}",
            frame.items.iter().filter(|i| i.alpha < 1.0).count()
        );
        let _ = writeln!(out, "Spheres: {}", frame.count(Primitive::Sphere));
        out
    }
}
