//! Renderable nodes and transform composition
//!
//! A node pairs externally-owned resource handles with a pose. Two pose
//! representations exist in the wild - position + orientation, and a
//! precomputed world matrix - so both are supported behind [`NodePose`],
//! resolved to a world matrix at composition time.

use vantage_math::{mat4, Mat4, Quat, Vec3};

use crate::camera::Camera;
use crate::handle::{MeshKey, ShaderKey, TextureKey};

/// A node's pose: authored as position + orientation, or as a matrix
#[derive(Clone, Copy, Debug)]
pub enum NodePose {
    /// Pose-driven node; composed into a world matrix each frame
    Pose { position: Vec3, orientation: Quat },
    /// Transform-driven node with a precomputed world matrix (legacy form)
    Matrix(Mat4),
}

impl NodePose {
    /// Resolve to a world matrix
    pub fn world_matrix(&self) -> Mat4 {
        match self {
            NodePose::Pose { position, orientation } => {
                mat4::mul(mat4::translation(*position), orientation.to_mat4())
            }
            NodePose::Matrix(m) => *m,
        }
    }
}

/// One renderable in the scene
///
/// Resource handles are opaque; the renderer that registered the resources
/// resolves them at draw time. Nodes are created at scene-build time and
/// only their poses mutate afterwards.
#[derive(Clone, Copy, Debug)]
pub struct Node {
    pub mesh: MeshKey,
    pub texture: TextureKey,
    pub shader: ShaderKey,
    pub pose: NodePose,
}

impl Node {
    /// Create a pose-driven node at the origin
    pub fn new(mesh: MeshKey, texture: TextureKey, shader: ShaderKey) -> Self {
        Self {
            mesh,
            texture,
            shader,
            pose: NodePose::Pose {
                position: Vec3::ZERO,
                orientation: Quat::IDENTITY,
            },
        }
    }

    /// Builder: set the position (keeps the current orientation)
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.set_position(position);
        self
    }

    /// Builder: set the orientation, switching to the pose-driven form
    pub fn with_orientation(mut self, orientation: Quat) -> Self {
        let position = match self.pose {
            NodePose::Pose { position, .. } => position,
            NodePose::Matrix(m) => Vec3::new(m[3][0], m[3][1], m[3][2]),
        };
        self.pose = NodePose::Pose { position, orientation };
        self
    }

    /// Builder: use a precomputed world matrix
    pub fn with_matrix(mut self, matrix: Mat4) -> Self {
        self.pose = NodePose::Matrix(matrix);
        self
    }

    /// Move the node, whichever pose form it uses
    pub fn set_position(&mut self, new_position: Vec3) {
        match &mut self.pose {
            NodePose::Pose { position, .. } => *position = new_position,
            NodePose::Matrix(m) => {
                m[3][0] = new_position.x;
                m[3][1] = new_position.y;
                m[3][2] = new_position.z;
            }
        }
    }

    /// Replace the orientation of a pose-driven node
    ///
    /// Matrix-driven nodes keep their full transform; use
    /// [`Node::rotate`] to spin those.
    pub fn set_orientation(&mut self, new_orientation: Quat) {
        if let NodePose::Pose { orientation, .. } = &mut self.pose {
            *orientation = new_orientation;
        }
    }

    /// Compose an incremental rotation into the node's pose
    ///
    /// For pose-driven nodes this is `orientation * step`, renormalized so
    /// per-frame steps don't drift off unit length.
    pub fn rotate(&mut self, step: Quat) {
        match &mut self.pose {
            NodePose::Pose { orientation, .. } => {
                *orientation = (*orientation * step).normalized();
            }
            NodePose::Matrix(m) => {
                *m = mat4::mul(*m, step.to_mat4());
            }
        }
    }

    /// World matrix for this node
    pub fn world_matrix(&self) -> Mat4 {
        self.pose.world_matrix()
    }

    /// Combined projection * view * world matrix for this node
    pub fn mvp(&self, camera: &Camera) -> Mat4 {
        mat4::mul(mat4::mul(camera.projection, camera.view), self.world_matrix())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handle::{MeshKey, ShaderKey, TextureKey};
    use std::f32::consts::FRAC_PI_2;

    const EPSILON: f32 = 0.0001;

    fn mat_approx_eq(a: Mat4, b: Mat4) -> bool {
        for i in 0..4 {
            for j in 0..4 {
                if (a[i][j] - b[i][j]).abs() > EPSILON {
                    return false;
                }
            }
        }
        true
    }

    fn test_node() -> Node {
        Node::new(MeshKey::default(), TextureKey::default(), ShaderKey::default())
    }

    #[test]
    fn test_pose_and_matrix_forms_agree() {
        let position = Vec3::new(1.0, 2.0, 3.0);
        let orientation = Quat::from_axis_angle(Vec3::Z, FRAC_PI_2);

        let pose_node = test_node()
            .with_position(position)
            .with_orientation(orientation);
        let matrix_node = test_node().with_matrix(
            mat4::mul(mat4::translation(position), orientation.to_mat4()),
        );

        assert!(mat_approx_eq(
            pose_node.world_matrix(),
            matrix_node.world_matrix()
        ));
    }

    #[test]
    fn test_world_matrix_rotates_then_translates() {
        let node = test_node()
            .with_position(Vec3::new(10.0, 0.0, 0.0))
            .with_orientation(Quat::from_axis_angle(Vec3::Z, FRAC_PI_2));

        // Local +X rotates to +Y, then the node's position offsets it
        let p = mat4::transform_point(node.world_matrix(), Vec3::X);
        assert!((p.x - 10.0).abs() < EPSILON);
        assert!((p.y - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_set_position_on_both_forms() {
        let mut pose_node = test_node();
        let mut matrix_node = test_node().with_matrix(mat4::IDENTITY);

        pose_node.set_position(Vec3::new(5.0, 6.0, 7.0));
        matrix_node.set_position(Vec3::new(5.0, 6.0, 7.0));

        let origin = Vec3::ZERO;
        let a = mat4::transform_point(pose_node.world_matrix(), origin);
        let b = mat4::transform_point(matrix_node.world_matrix(), origin);
        assert_eq!(a, Vec3::new(5.0, 6.0, 7.0));
        assert_eq!(b, Vec3::new(5.0, 6.0, 7.0));
    }

    #[test]
    fn test_incremental_rotation_matches_single() {
        let axis = Vec3::new(0.0, 0.8, 1.0);
        let total = 1.2;
        let n = 60;

        let mut stepped = test_node();
        let step = Quat::from_axis_angle(axis, total / n as f32);
        for _ in 0..n {
            stepped.rotate(step);
        }

        let direct = test_node().with_orientation(Quat::from_axis_angle(axis, total));
        assert!(mat_approx_eq(stepped.world_matrix(), direct.world_matrix()));
    }

    #[test]
    fn test_mvp_composition_order() {
        use crate::camera::MoveKeys;
        use vantage_math::Vec2;

        let mut camera = Camera::new().with_position(Vec3::ZERO);
        camera.update(0.0, MoveKeys::empty(), Vec2::ZERO);
        camera.update_projection(640, 480);

        let node = test_node().with_position(Vec3::new(0.0, 5.0, 0.0));
        let expected = mat4::mul(
            mat4::mul(camera.projection, camera.view),
            node.world_matrix(),
        );
        assert!(mat_approx_eq(node.mvp(&camera), expected));
    }
}
