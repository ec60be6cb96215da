//! Assets: procedural primitives, a content-addressed mesh registry and glTF
//! import.
//!
//! Meshes are identified by a hash of their vertex data. The renderer asks
//! for geometry by [`Primitive`] or [`AssetId`], never by file path.

pub mod import;
pub mod mesh;
pub mod store;

pub use import::{ImportedMesh, fit_transform, import_gltf};
pub use mesh::{MeshData, Primitive};
pub use store::{AssetId, AssetStore, MeshAsset};

/// Errors from asset operations.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("asset not found: {0:?}")]
    NotFound(AssetId),
    #[error("glTF error: {0}")]
    Gltf(#[from] gltf::Error),
    #[error("glTF primitive in mesh {mesh:?} has no positions")]
    MissingPositions { mesh: String },
    #[error("glTF primitive in mesh {mesh:?} indexes past its {vertices} vertices")]
    IndexOutOfRange { mesh: String, vertices: usize },
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
