//! Rendering for the Vantage engine
//!
//! This crate owns everything GPU-facing:
//!
//! - [`context::RenderContext`] - wgpu device, queue, and surface management
//! - [`mesh`] - CPU mesh data and GPU vertex/index buffers
//! - [`primitives`] - procedural box and UV-sphere meshes
//! - [`texture`] - image decode and GPU texture upload
//! - [`renderer::SceneRenderer`] - resource registry plus the per-node
//!   submission loop (bind, upload mvp, draw - one call per node, in
//!   scene order)
//!
//! The core crate only ever sees the `MeshKey`/`TextureKey`/`ShaderKey`
//! handles returned by the renderer's `register_*` methods.

pub mod context;
pub mod mesh;
pub mod primitives;
pub mod renderer;
pub mod texture;

pub use context::RenderContext;
pub use mesh::{GpuMesh, MeshData, Vertex};
pub use renderer::SceneRenderer;
pub use texture::{GpuTexture, TextureData, TextureError};

// Re-export core types for convenience
pub use vantage_core::{Camera, MeshKey, Node, NodePose, Scene, ShaderKey, TextureKey};
