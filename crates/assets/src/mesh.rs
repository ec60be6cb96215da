use glam::{Mat3, Mat4, Vec3};
use serde::{Deserialize, Serialize};
use std::f32::consts::{PI, TAU};

const RADIAL_SEGMENTS: u32 = 16;
const SPHERE_RINGS: u32 = 12;

/// Unit-sized procedural shapes. Composite models scale and place these
/// with a model matrix.
///
/// Every primitive is centred on the origin and fits a 1x1x1 box, except
/// the sphere and cylinder which have radius 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Primitive {
    Cube,
    Sphere,
    /// Height 1, bottom radius 1, top radius `taper` percent of the bottom.
    Cylinder { taper: u16 },
    /// Height 1, base radius 1.
    Cone,
    /// XZ quad facing +Y.
    Plane,
}

impl Primitive {
    pub fn name(&self) -> String {
        match self {
            Primitive::Cube => "cube".into(),
            Primitive::Sphere => "sphere".into(),
            Primitive::Cylinder { taper } => format!("cylinder_{taper}"),
            Primitive::Cone => "cone".into(),
            Primitive::Plane => "plane".into(),
        }
    }

    /// Generate the triangle mesh.
    pub fn mesh(&self) -> MeshData {
        match self {
            Primitive::Cube => cube(),
            Primitive::Sphere => sphere(),
            Primitive::Cylinder { taper } => cylinder(*taper as f32 / 100.0),
            Primitive::Cone => cylinder(0.0),
            Primitive::Plane => plane(),
        }
    }
}

/// Indexed triangle list with per-vertex normals. Triangles wind
/// counter-clockwise seen from outside.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeshData {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Axis-aligned bounds, or `None` for an empty mesh.
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let mut iter = self.positions.iter().map(|p| Vec3::from_array(*p));
        let first = iter.next()?;
        Some(iter.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p))))
    }

    /// Apply `m` to positions and its normal matrix to normals.
    pub fn transform(&mut self, m: &Mat4) {
        let normal_matrix = Mat3::from_mat4(*m).inverse().transpose();
        for p in &mut self.positions {
            *p = m.transform_point3(Vec3::from_array(*p)).to_array();
        }
        for n in &mut self.normals {
            *n = (normal_matrix * Vec3::from_array(*n))
                .normalize_or_zero()
                .to_array();
        }
    }

    /// Append `other`, offsetting its indices.
    pub fn append(&mut self, other: &MeshData) {
        let base = self.positions.len() as u32;
        self.positions.extend_from_slice(&other.positions);
        self.normals.extend_from_slice(&other.normals);
        self.indices.extend(other.indices.iter().map(|i| i + base));
    }

    /// Recompute smooth normals by summing face normals at shared vertices.
    pub fn compute_normals(&mut self) {
        let mut acc = vec![Vec3::ZERO; self.positions.len()];
        for tri in self.indices.chunks_exact(3) {
            let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
            let (pa, pb, pc) = (
                Vec3::from_array(self.positions[a]),
                Vec3::from_array(self.positions[b]),
                Vec3::from_array(self.positions[c]),
            );
            let face = (pb - pa).cross(pc - pa);
            acc[a] += face;
            acc[b] += face;
            acc[c] += face;
        }
        self.normals = acc
            .into_iter()
            .map(|n| n.normalize_or(Vec3::Y).to_array())
            .collect();
    }

    fn push(&mut self, position: Vec3, normal: Vec3) -> u32 {
        self.positions.push(position.to_array());
        self.normals.push(normal.to_array());
        self.positions.len() as u32 - 1
    }
}

fn cube() -> MeshData {
    let mut mesh = MeshData::default();
    let faces = [
        (Vec3::X, Vec3::Y),
        (Vec3::NEG_X, Vec3::Y),
        (Vec3::Y, Vec3::Z),
        (Vec3::NEG_Y, Vec3::Z),
        (Vec3::Z, Vec3::Y),
        (Vec3::NEG_Z, Vec3::Y),
    ];
    for (n, v) in faces {
        let u = v.cross(n);
        let centre = n * 0.5;
        let base = mesh.push(centre - u * 0.5 - v * 0.5, n);
        mesh.push(centre + u * 0.5 - v * 0.5, n);
        mesh.push(centre + u * 0.5 + v * 0.5, n);
        mesh.push(centre - u * 0.5 + v * 0.5, n);
        mesh.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
    mesh
}

fn sphere() -> MeshData {
    let mut mesh = MeshData::default();
    let cols = RADIAL_SEGMENTS + 1;
    for ring in 0..=SPHERE_RINGS {
        let phi = ring as f32 / SPHERE_RINGS as f32 * PI;
        for seg in 0..=RADIAL_SEGMENTS {
            let theta = seg as f32 / RADIAL_SEGMENTS as f32 * TAU;
            let p = Vec3::new(phi.sin() * theta.cos(), phi.cos(), phi.sin() * theta.sin());
            mesh.push(p, p);
        }
    }
    for ring in 0..SPHERE_RINGS {
        for seg in 0..RADIAL_SEGMENTS {
            let a = ring * cols + seg;
            let b = a + cols;
            let c = b + 1;
            let d = a + 1;
            mesh.indices.extend_from_slice(&[a, d, b, b, d, c]);
        }
    }
    mesh
}

fn cylinder(top_ratio: f32) -> MeshData {
    let mut mesh = MeshData::default();
    let slope = 1.0 - top_ratio;
    let ring = |theta: f32| Vec3::new(theta.cos(), 0.0, theta.sin());

    let side_start = mesh.positions.len() as u32;
    for seg in 0..=RADIAL_SEGMENTS {
        let theta = seg as f32 / RADIAL_SEGMENTS as f32 * TAU;
        let dir = ring(theta);
        let normal = (dir + Vec3::Y * slope).normalize();
        mesh.push(dir - Vec3::Y * 0.5, normal);
        mesh.push(dir * top_ratio + Vec3::Y * 0.5, normal);
    }
    for seg in 0..RADIAL_SEGMENTS {
        let bottom = side_start + seg * 2;
        let top = bottom + 1;
        let next_bottom = bottom + 2;
        let next_top = bottom + 3;
        mesh.indices
            .extend_from_slice(&[bottom, top, next_bottom, top, next_top, next_bottom]);
    }

    cap(&mut mesh, -0.5, 1.0, Vec3::NEG_Y);
    if top_ratio > 0.0 {
        cap(&mut mesh, 0.5, top_ratio, Vec3::Y);
    }
    mesh
}

fn cap(mesh: &mut MeshData, y: f32, radius: f32, normal: Vec3) {
    let centre = mesh.push(Vec3::Y * y, normal);
    for seg in 0..=RADIAL_SEGMENTS {
        let theta = seg as f32 / RADIAL_SEGMENTS as f32 * TAU;
        mesh.push(Vec3::new(theta.cos() * radius, y, theta.sin() * radius), normal);
    }
    for seg in 0..RADIAL_SEGMENTS {
        let p = centre + 1 + seg;
        if normal.y > 0.0 {
            mesh.indices.extend_from_slice(&[centre, p + 1, p]);
        } else {
            mesh.indices.extend_from_slice(&[centre, p, p + 1]);
        }
    }
}

fn plane() -> MeshData {
    let mut mesh = MeshData::default();
    mesh.push(Vec3::new(-0.5, 0.0, 0.5), Vec3::Y);
    mesh.push(Vec3::new(0.5, 0.0, 0.5), Vec3::Y);
    mesh.push(Vec3::new(0.5, 0.0, -0.5), Vec3::Y);
    mesh.push(Vec3::new(-0.5, 0.0, -0.5), Vec3::Y);
    mesh.indices.extend_from_slice(&[0, 1, 2, 0, 2, 3]);
    mesh
}
