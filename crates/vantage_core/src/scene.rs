//! Scene container
//!
//! An ordered, fixed-length sequence of nodes. Render order is sequence
//! order; there is no sorting or culling - depth testing sorts it out.

use crate::node::Node;

/// The flat scene: nodes drawn in the order they were added
///
/// Built once at startup; the node set never changes at runtime, only the
/// poses of animated nodes.
#[derive(Default)]
pub struct Scene {
    nodes: Vec<Node>,
}

impl Scene {
    /// Create an empty scene
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Create a scene with pre-allocated capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
        }
    }

    /// Append a node, returning its index in submission order
    pub fn add_node(&mut self, node: Node) -> usize {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    /// Get a node by index
    pub fn node(&self, index: usize) -> Option<&Node> {
        self.nodes.get(index)
    }

    /// Get a mutable node by index
    pub fn node_mut(&mut self, index: usize) -> Option<&mut Node> {
        self.nodes.get_mut(index)
    }

    /// All nodes in submission order
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Number of nodes
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the scene has no nodes
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate nodes in submission order
    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// Iterate nodes mutably
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Node> {
        self.nodes.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handle::{MeshKey, ShaderKey, TextureKey};
    use vantage_math::Vec3;

    fn test_node() -> Node {
        Node::new(MeshKey::default(), TextureKey::default(), ShaderKey::default())
    }

    #[test]
    fn test_scene_new() {
        let scene = Scene::new();
        assert!(scene.is_empty());
        assert_eq!(scene.len(), 0);
    }

    #[test]
    fn test_add_returns_submission_index() {
        let mut scene = Scene::new();
        assert_eq!(scene.add_node(test_node()), 0);
        assert_eq!(scene.add_node(test_node()), 1);
        assert_eq!(scene.add_node(test_node()), 2);
        assert_eq!(scene.len(), 3);
    }

    #[test]
    fn test_iteration_preserves_order() {
        let mut scene = Scene::new();
        for i in 0..4 {
            scene.add_node(test_node().with_position(Vec3::new(i as f32, 0.0, 0.0)));
        }

        for (i, node) in scene.iter().enumerate() {
            let x = node.world_matrix()[3][0];
            assert_eq!(x, i as f32);
        }
    }

    #[test]
    fn test_node_mut_updates_in_place() {
        let mut scene = Scene::new();
        let index = scene.add_node(test_node());

        scene
            .node_mut(index)
            .unwrap()
            .set_position(Vec3::new(0.0, 0.0, 9.0));
        assert_eq!(scene.node(index).unwrap().world_matrix()[3][2], 9.0);
    }
}
