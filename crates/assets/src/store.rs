use crate::AssetError;
use crate::mesh::{MeshData, Primitive};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::path::Path;

/// Content-addressed asset ID: the first eight bytes of the SHA-256 of the
/// mesh data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AssetId(pub u64);

/// A named mesh with a base colour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshAsset {
    pub name: String,
    pub mesh: MeshData,
    pub base_color: [f32; 4],
}

/// Mesh registry keyed by content hash. Registering identical geometry
/// twice yields one entry. Persisted as JSON for inspection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetStore {
    meshes: BTreeMap<AssetId, MeshAsset>,
}

impl AssetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a mesh and return its ID. The first registration of a
    /// given geometry keeps its name and colour.
    pub fn register(&mut self, asset: MeshAsset) -> AssetId {
        let id = content_hash(&asset.mesh);
        self.meshes.entry(id).or_insert_with(|| {
            tracing::debug!(name = %asset.name, ?id, vertices = asset.mesh.vertex_count(), "mesh registered");
            asset
        });
        id
    }

    /// Register the generated mesh for `primitive`.
    pub fn register_primitive(&mut self, primitive: Primitive) -> AssetId {
        self.register(MeshAsset {
            name: primitive.name(),
            mesh: primitive.mesh(),
            base_color: [0.8, 0.8, 0.8, 1.0],
        })
    }

    pub fn get(&self, id: AssetId) -> Option<&MeshAsset> {
        self.meshes.get(&id)
    }

    /// Like [`get`](Self::get) but an error when missing.
    pub fn require(&self, id: AssetId) -> Result<&MeshAsset, AssetError> {
        self.get(id).ok_or(AssetError::NotFound(id))
    }

    pub fn ids(&self) -> impl Iterator<Item = AssetId> + '_ {
        self.meshes.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }

    /// Total triangles across all meshes.
    pub fn triangle_count(&self) -> usize {
        self.meshes.values().map(|m| m.mesh.triangle_count()).sum()
    }

    /// Save the registry to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), AssetError> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Load a registry from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AssetError> {
        let file = std::fs::File::open(path)?;
        Ok(serde_json::from_reader(file)?)
    }
}

fn content_hash(mesh: &MeshData) -> AssetId {
    let mut hasher = Sha256::new();
    for p in mesh.positions.iter().chain(&mesh.normals) {
        for c in p {
            hasher.update(c.to_le_bytes());
        }
    }
    for i in &mesh.indices {
        hasher.update(i.to_le_bytes());
    }
    let result = hasher.finalize();
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&result[..8]);
    AssetId(u64::from_le_bytes(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_geometry_dedups() {
        let mut store = AssetStore::new();
        let a = store.register_primitive(Primitive::Cube);
        let b = store.register(MeshAsset {
            name: "another cube".into(),
            mesh: Primitive::Cube.mesh(),
            base_color: [1.0, 0.0, 0.0, 1.0],
        });
        assert_eq!(a, b);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(a).unwrap().name, "cube");
    }

    #[test]
    fn different_tapers_are_different_assets() {
        let mut store = AssetStore::new();
        let a = store.register_primitive(Primitive::Cylinder { taper: 100 });
        let b = store.register_primitive(Primitive::Cylinder { taper: 75 });
        assert_ne!(a, b);
        assert_eq!(store.ids().count(), 2);
    }

    #[test]
    fn missing_id_is_an_error() {
        let store = AssetStore::new();
        assert!(matches!(
            store.require(AssetId(42)),
            Err(AssetError::NotFound(AssetId(42)))
        ));
    }

    #[test]
    fn save_and_load() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        let mut store = AssetStore::new();
        let id = store.register_primitive(Primitive::Sphere);
        store.register_primitive(Primitive::Plane);
        store.save(tmp.path()).unwrap();

        let loaded = AssetStore::load(tmp.path()).unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded.get(id), store.get(id));
        assert_eq!(loaded.triangle_count(), store.triangle_count());
    }
}
