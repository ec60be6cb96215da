//! Morphing ground heightfield.
//!
//! The grid is laid out as a plane in its own (x, y) coordinates and stood
//! flat on the ground: plane x is world x, plane y is world −z, and the
//! height is world y. Rows run from plane y = +size/2 down to −size/2.

use crate::config::TerrainConfig;
use glam::Vec3;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Terrain {
    size: f32,
    segments: u32,
    phase: f32,
    heights: Vec<f32>,
    #[serde(skip)]
    normals: Vec<Vec3>,
}

/// Height profile the terrain starts with before it begins to morph.
fn rest_height(x: f32, y: f32) -> f32 {
    (x * 0.1).sin() * (y * 0.1).cos() * 2.0
}

/// Rolling height profile at `phase`.
fn morph_height(x: f32, y: f32, phase: f32) -> f32 {
    (x * 0.1 + phase).sin() * (y * 0.1 + phase).cos() * 2.0
        + (x * 0.05 + phase * 0.5).sin() * (y * 0.05).cos()
}

impl Terrain {
    pub fn new(cfg: &TerrainConfig) -> Self {
        let mut terrain = Self {
            size: cfg.size,
            segments: cfg.segments,
            phase: 0.0,
            heights: Vec::new(),
            normals: Vec::new(),
        };
        terrain.heights = terrain.plane_coords().map(|(x, y)| rest_height(x, y)).collect();
        terrain.recompute_normals();
        terrain
    }

    /// Vertices along one edge.
    pub fn side(&self) -> usize {
        self.segments as usize + 1
    }

    pub fn vertex_count(&self) -> usize {
        self.side() * self.side()
    }

    pub fn phase(&self) -> f32 {
        self.phase
    }

    pub fn heights(&self) -> &[f32] {
        &self.heights
    }

    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    /// Re-shape every vertex for `phase` and refresh the normals.
    pub fn morph(&mut self, phase: f32) {
        self.phase = phase;
        let heights: Vec<f32> = self
            .plane_coords()
            .map(|(x, y)| morph_height(x, y, phase))
            .collect();
        self.heights = heights;
        self.recompute_normals();
    }

    /// World-space vertex positions in grid order.
    pub fn positions(&self) -> Vec<Vec3> {
        self.plane_coords()
            .zip(&self.heights)
            .map(|((x, y), &h)| Vec3::new(x, h, -y))
            .collect()
    }

    /// Triangle list indices, two counter-clockwise triangles per cell
    /// when seen from above.
    pub fn indices(&self) -> Vec<u32> {
        let side = self.side();
        let segments = self.segments as usize;
        let mut out = Vec::with_capacity(segments * segments * 6);
        for iy in 0..segments {
            for ix in 0..segments {
                let a = (ix + side * iy) as u32;
                let b = (ix + side * (iy + 1)) as u32;
                let c = ((ix + 1) + side * (iy + 1)) as u32;
                let d = ((ix + 1) + side * iy) as u32;
                out.extend_from_slice(&[a, b, d, b, c, d]);
            }
        }
        out
    }

    fn plane_coords(&self) -> impl Iterator<Item = (f32, f32)> + use<> {
        let side = self.side();
        let step = self.size / self.segments as f32;
        let half = self.size / 2.0;
        (0..side).flat_map(move |iy| {
            (0..side).map(move |ix| (ix as f32 * step - half, half - iy as f32 * step))
        })
    }

    /// Area-weighted vertex normals from the surrounding faces.
    fn recompute_normals(&mut self) {
        let positions = self.positions();
        let mut normals = vec![Vec3::ZERO; positions.len()];
        for tri in self.indices().chunks_exact(3) {
            let (a, b, c) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
            let n = (positions[b] - positions[a]).cross(positions[c] - positions[a]);
            normals[a] += n;
            normals[b] += n;
            normals[c] += n;
        }
        for n in &mut normals {
            *n = n.normalize_or(Vec3::Y);
        }
        self.normals = normals;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn grid_dimensions() {
        let t = Terrain::new(&TerrainConfig::default());
        assert_eq!(t.side(), 51);
        assert_eq!(t.vertex_count(), 51 * 51);
        assert_eq!(t.heights().len(), t.vertex_count());
        assert_eq!(t.normals().len(), t.vertex_count());
        assert_eq!(t.indices().len(), 50 * 50 * 6);
    }

    #[test]
    fn corners_map_to_world() {
        let t = Terrain::new(&TerrainConfig::default());
        let p = t.positions();
        // First vertex is plane (-100, +100) -> world (-100, h, -100).
        assert_abs_diff_eq!(p[0].x, -100.0);
        assert_abs_diff_eq!(p[0].z, -100.0);
        let last = p[p.len() - 1];
        assert_abs_diff_eq!(last.x, 100.0, epsilon = 1e-4);
        assert_abs_diff_eq!(last.z, 100.0, epsilon = 1e-4);
    }

    #[test]
    fn morph_matches_formula() {
        let mut t = Terrain::new(&TerrainConfig::default());
        let phase = 0.75;
        t.morph(phase);
        let positions = t.positions();
        for (i, p) in positions.iter().enumerate().step_by(97) {
            let (x, y) = (p.x, -p.z);
            assert_abs_diff_eq!(t.heights()[i], morph_height(x, y, phase), epsilon = 1e-5);
        }
        assert_eq!(t.phase(), phase);
    }

    #[test]
    fn heights_stay_within_envelope() {
        let mut t = Terrain::new(&TerrainConfig::default());
        for step in 0..20 {
            t.morph(step as f32 * 0.3);
            assert!(t.heights().iter().all(|h| h.abs() <= 3.0 + 1e-4));
        }
    }

    #[test]
    fn normals_point_up_and_are_unit() {
        let mut t = Terrain::new(&TerrainConfig::default());
        t.morph(1.2);
        for n in t.normals() {
            assert!(n.y > 0.0);
            assert_abs_diff_eq!(n.length(), 1.0, epsilon = 1e-4);
        }
    }

    #[test]
    fn flat_profile_has_vertical_normals() {
        let cfg = TerrainConfig {
            size: 10.0,
            segments: 2,
            phase_step: 0.0,
        };
        let mut t = Terrain::new(&cfg);
        t.heights = vec![0.0; t.vertex_count()];
        t.recompute_normals();
        for n in t.normals() {
            assert_abs_diff_eq!(n.y, 1.0, epsilon = 1e-6);
        }
    }
}
