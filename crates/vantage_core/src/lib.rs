//! Core types for the Vantage engine
//!
//! This crate provides the reusable heart of the walkthrough demos:
//!
//! - [`Camera`] - first-person camera with acceleration/drag kinematics
//! - [`MoveKeys`] - movement input snapshot injected into the camera update
//! - [`CursorFilter`] - two-tap moving average over raw cursor samples
//! - [`Node`] / [`NodePose`] - a renderable with resource handles and a pose
//! - [`Scene`] - ordered node sequence, rendered in submission order
//!
//! Everything here is GPU-agnostic: meshes, textures, and shaders appear
//! only as opaque [`MeshKey`]/[`TextureKey`]/[`ShaderKey`] handles whose
//! resources are owned by the renderer.

mod camera;
mod cursor;
mod handle;
mod node;
mod scene;

pub use camera::{Camera, MoveKeys};
pub use cursor::CursorFilter;
pub use handle::{MeshKey, ShaderKey, TextureKey};
pub use node::{Node, NodePose};
pub use scene::Scene;

// Re-export commonly used math types for convenience
pub use vantage_math::{Mat4, Quat, Vec2, Vec3};
