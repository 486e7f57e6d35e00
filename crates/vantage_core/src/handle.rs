//! Opaque GPU resource handles
//!
//! Nodes refer to their mesh, texture, and shader through these keys. The
//! renderer owns the slotmaps the keys index into; the core never creates
//! or destroys the underlying resources.

use slotmap::new_key_type;

new_key_type! {
    /// Handle to a mesh owned by the renderer
    pub struct MeshKey;

    /// Handle to a texture owned by the renderer
    pub struct TextureKey;

    /// Handle to a shader pipeline owned by the renderer
    pub struct ShaderKey;
}
