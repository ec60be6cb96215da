use crate::AssetError;
use crate::mesh::MeshData;
use crate::store::{AssetId, AssetStore, MeshAsset};
use glam::{Mat4, Vec3};
use std::path::Path;

const DEFAULT_BASE_COLOR: [f32; 4] = [0.7, 0.7, 0.7, 1.0];

/// One glTF primitive, baked into model space with its node transforms.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedMesh {
    pub name: String,
    pub mesh: MeshData,
    pub base_color: [f32; 4],
}

impl ImportedMesh {
    /// Register in `store` and return the content ID.
    pub fn register(self, store: &mut AssetStore) -> AssetId {
        store.register(MeshAsset {
            name: self.name,
            mesh: self.mesh,
            base_color: self.base_color,
        })
    }
}

/// Load a `.gltf` or `.glb` file and flatten every mesh primitive in its
/// scenes into model space.
///
/// Primitives without normals get smooth normals computed from their
/// triangles. Non-indexed primitives are treated as triangle lists.
/// Primitives drawn as points, lines, strips or fans are skipped.
pub fn import_gltf(path: impl AsRef<Path>) -> Result<Vec<ImportedMesh>, AssetError> {
    let path = path.as_ref();
    let (doc, buffers, _images) = gltf::import(path)?;
    tracing::info!(
        path = %path.display(),
        scenes = doc.scenes().count(),
        nodes = doc.nodes().count(),
        meshes = doc.meshes().count(),
        "glTF loaded"
    );

    let mut out = Vec::new();
    for scene in doc.scenes() {
        for node in scene.nodes() {
            visit_node(&node, &buffers, Mat4::IDENTITY, &mut out)?;
        }
    }
    tracing::info!(primitives = out.len(), "glTF flattened");
    Ok(out)
}

fn visit_node(
    node: &gltf::Node,
    buffers: &[gltf::buffer::Data],
    parent: Mat4,
    out: &mut Vec<ImportedMesh>,
) -> Result<(), AssetError> {
    let global = parent * Mat4::from_cols_array_2d(&node.transform().matrix());

    if let Some(mesh) = node.mesh() {
        let mesh_name = mesh
            .name()
            .map(str::to_owned)
            .unwrap_or_else(|| format!("mesh_{}", mesh.index()));
        for (i, primitive) in mesh.primitives().enumerate() {
            if primitive.mode() != gltf::mesh::Mode::Triangles {
                tracing::warn!(mesh = %mesh_name, mode = ?primitive.mode(), "skipping non-triangle primitive");
                continue;
            }
            out.push(read_primitive(&primitive, buffers, global, &mesh_name, i)?);
        }
    }

    for child in node.children() {
        visit_node(&child, buffers, global, out)?;
    }
    Ok(())
}

fn read_primitive(
    primitive: &gltf::Primitive,
    buffers: &[gltf::buffer::Data],
    transform: Mat4,
    mesh_name: &str,
    index: usize,
) -> Result<ImportedMesh, AssetError> {
    let reader = primitive.reader(|buffer| Some(&buffers[buffer.index()]));
    let positions: Vec<[f32; 3]> = reader
        .read_positions()
        .ok_or_else(|| AssetError::MissingPositions {
            mesh: mesh_name.to_owned(),
        })?
        .collect();
    let indices: Vec<u32> = match reader.read_indices() {
        Some(indices) => indices.into_u32().collect(),
        None => {
            let whole = positions.len() as u32 / 3 * 3;
            (0..whole).collect()
        }
    };
    if indices.iter().any(|&i| i as usize >= positions.len()) {
        return Err(AssetError::IndexOutOfRange {
            mesh: mesh_name.to_owned(),
            vertices: positions.len(),
        });
    }

    let mut mesh = MeshData {
        normals: reader
            .read_normals()
            .map(|n| n.collect())
            .unwrap_or_default(),
        positions,
        indices,
    };
    if mesh.normals.len() != mesh.positions.len() {
        mesh.compute_normals();
    }
    mesh.transform(&transform);

    let base_color = primitive.material().pbr_metallic_roughness().base_color_factor();
    Ok(ImportedMesh {
        name: format!("{mesh_name}_{index}"),
        mesh,
        base_color: if base_color == [1.0; 4] && primitive.material().index().is_none() {
            DEFAULT_BASE_COLOR
        } else {
            base_color
        },
    })
}

/// Uniform scale and offset that fit `meshes` into a cube of side `size`
/// resting on y = 0 and centred on the y axis.
pub fn fit_transform(meshes: &[ImportedMesh], size: f32) -> Mat4 {
    let bounds = meshes
        .iter()
        .filter_map(|m| m.mesh.bounds())
        .reduce(|(alo, ahi), (blo, bhi)| (alo.min(blo), ahi.max(bhi)));
    let Some((lo, hi)) = bounds else {
        return Mat4::IDENTITY;
    };
    let extent = (hi - lo).max_element();
    if extent <= f32::EPSILON {
        return Mat4::IDENTITY;
    }
    let scale = size / extent;
    let centre = Vec3::new((lo.x + hi.x) * 0.5, lo.y, (lo.z + hi.z) * 0.5);
    Mat4::from_scale(Vec3::splat(scale)) * Mat4::from_translation(-centre)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::io::Write;

    // One triangle (0,0,0) (1,0,0) (0,1,0), no indices, no normals.
    const TRIANGLE_GLTF: &str = r#"{
        "asset": { "version": "2.0" },
        "scene": 0,
        "scenes": [ { "nodes": [0] } ],
        "nodes": [ { "translation": [0.0, 0.0, 5.0], "children": [1] },
                   { "mesh": 0, "scale": [2.0, 2.0, 2.0] } ],
        "meshes": [ { "name": "tri", "primitives": [ { "attributes": { "POSITION": 0 }, "material": 0 } ] } ],
        "materials": [ { "pbrMetallicRoughness": { "baseColorFactor": [1.0, 0.5, 0.0, 1.0] } } ],
        "buffers": [ { "byteLength": 36, "uri": "data:application/octet-stream;base64,AAAAAAAAAAAAAAAAAACAPwAAAAAAAAAAAAAAAAAAgD8AAAAA" } ],
        "bufferViews": [ { "buffer": 0, "byteLength": 36 } ],
        "accessors": [ { "bufferView": 0, "componentType": 5126, "count": 3, "type": "VEC3",
                         "min": [0.0, 0.0, 0.0], "max": [1.0, 1.0, 0.0] } ]
    }"#;

    fn write_gltf(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".gltf").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn imports_triangle_with_node_transforms() {
        let file = write_gltf(TRIANGLE_GLTF);
        let meshes = import_gltf(file.path()).unwrap();
        assert_eq!(meshes.len(), 1);

        let m = &meshes[0];
        assert_eq!(m.name, "tri_0");
        assert_eq!(m.mesh.indices, vec![0, 1, 2]);
        assert_eq!(m.base_color, [1.0, 0.5, 0.0, 1.0]);
        assert_eq!(m.mesh.positions[1], [2.0, 0.0, 5.0]);
        assert_eq!(m.mesh.positions[2], [0.0, 2.0, 5.0]);
        let n = Vec3::from_array(m.mesh.normals[0]);
        assert_abs_diff_eq!(n.z, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn imported_mesh_registers_in_store() {
        let file = write_gltf(TRIANGLE_GLTF);
        let mut store = AssetStore::new();
        let ids: Vec<_> = import_gltf(file.path())
            .unwrap()
            .into_iter()
            .map(|m| m.register(&mut store))
            .collect();
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(ids[0]).unwrap().name, "tri_0");
    }

    #[test]
    fn index_past_the_last_vertex_is_an_error() {
        // Same triangle, indexed by u16 [0, 1, 5] (plus two bytes of padding).
        let gltf = TRIANGLE_GLTF
            .replace(
                r#""attributes": { "POSITION": 0 }, "material": 0"#,
                r#""attributes": { "POSITION": 0 }, "indices": 1, "material": 0"#,
            )
            .replace(
                r#""byteLength": 36, "uri": "data:application/octet-stream;base64,AAAAAAAAAAAAAAAAAACAPwAAAAAAAAAAAAAAAAAAgD8AAAAA""#,
                r#""byteLength": 44, "uri": "data:application/octet-stream;base64,AAAAAAAAAAAAAAAAAACAPwAAAAAAAAAAAAAAAAAAgD8AAAAAAAABAAUAAAA=""#,
            )
            .replace(
                r#""bufferViews": [ { "buffer": 0, "byteLength": 36 } ]"#,
                r#""bufferViews": [ { "buffer": 0, "byteLength": 36 }, { "buffer": 0, "byteOffset": 36, "byteLength": 6 } ]"#,
            )
            .replace(
                r#""max": [1.0, 1.0, 0.0] } ]"#,
                r#""max": [1.0, 1.0, 0.0] },
                         { "bufferView": 1, "componentType": 5123, "count": 3, "type": "SCALAR" } ]"#,
            );
        let file = write_gltf(&gltf);
        assert!(matches!(
            import_gltf(file.path()),
            Err(AssetError::IndexOutOfRange { vertices: 3, .. })
        ));
    }

    #[test]
    fn line_primitives_are_skipped() {
        let gltf = TRIANGLE_GLTF.replace(r#""material": 0 }"#, r#""material": 0, "mode": 1 }"#);
        let file = write_gltf(&gltf);
        assert!(import_gltf(file.path()).unwrap().is_empty());
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(import_gltf("/definitely/not/here.gltf").is_err());
    }

    #[test]
    fn fit_transform_normalises_size() {
        let file = write_gltf(TRIANGLE_GLTF);
        let meshes = import_gltf(file.path()).unwrap();
        let fit = fit_transform(&meshes, 1.0);
        let p = fit.transform_point3(Vec3::new(2.0, 2.0, 5.0));
        assert_abs_diff_eq!(p.y, 1.0, epsilon = 1e-5);
        assert_eq!(fit_transform(&[], 1.0), Mat4::IDENTITY);
    }
}
