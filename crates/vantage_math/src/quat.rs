//! Unit quaternion rotation type

use serde::{Serialize, Deserialize};
use crate::{Mat4, Vec3};

/// A rotation as a unit quaternion
///
/// `x, y, z` are the vector part, `w` the scalar part. Composition follows
/// the Hamilton product: `a * b` applies `b` first, then `a`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Quat {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Default for Quat {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Quat {
    pub const IDENTITY: Self = Self { x: 0.0, y: 0.0, z: 0.0, w: 1.0 };

    /// Create a quaternion from raw components
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Rotation of `angle` radians about `axis`
    ///
    /// The axis does not need to be normalized.
    pub fn from_axis_angle(axis: Vec3, angle: f32) -> Self {
        let axis = axis.normalized();
        let half = angle * 0.5;
        let s = half.sin();
        Self {
            x: axis.x * s,
            y: axis.y * s,
            z: axis.z * s,
            w: half.cos(),
        }
    }

    /// Squared length of the quaternion
    #[inline]
    pub fn length_squared(self) -> f32 {
        self.x * self.x + self.y * self.y + self.z * self.z + self.w * self.w
    }

    /// Renormalize to unit length
    ///
    /// Repeated incremental composition drifts away from unit length;
    /// callers composing per-frame steps should renormalize.
    pub fn normalized(self) -> Self {
        let len = self.length_squared().sqrt();
        if len > 0.0 {
            let inv = 1.0 / len;
            Self::new(self.x * inv, self.y * inv, self.z * inv, self.w * inv)
        } else {
            Self::IDENTITY
        }
    }

    /// Rotate a vector by this quaternion
    pub fn rotate(self, v: Vec3) -> Vec3 {
        let u = Vec3::new(self.x, self.y, self.z);
        let t = u.cross(v) * 2.0;
        v + t * self.w + u.cross(t)
    }

    /// Convert to a column-major rotation matrix
    pub fn to_mat4(self) -> Mat4 {
        let (x, y, z, w) = (self.x, self.y, self.z, self.w);
        [
            [1.0 - 2.0 * (y * y + z * z), 2.0 * (x * y + z * w), 2.0 * (x * z - y * w), 0.0],
            [2.0 * (x * y - z * w), 1.0 - 2.0 * (x * x + z * z), 2.0 * (y * z + x * w), 0.0],
            [2.0 * (x * z + y * w), 2.0 * (y * z - x * w), 1.0 - 2.0 * (x * x + y * y), 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ]
    }
}

impl std::ops::Mul for Quat {
    type Output = Self;

    /// Hamilton product: `a * b` applies `b` first, then `a`
    fn mul(self, other: Self) -> Self {
        Self {
            x: self.w * other.x + self.x * other.w + self.y * other.z - self.z * other.y,
            y: self.w * other.y - self.x * other.z + self.y * other.w + self.z * other.x,
            z: self.w * other.z + self.x * other.y - self.y * other.x + self.z * other.w,
            w: self.w * other.w - self.x * other.x - self.y * other.y - self.z * other.z,
        }
    }
}

impl std::ops::MulAssign for Quat {
    fn mul_assign(&mut self, other: Self) {
        *self = *self * other;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    const EPSILON: f32 = 0.0001;

    fn vec_approx_eq(a: Vec3, b: Vec3) -> bool {
        (a.x - b.x).abs() < EPSILON && (a.y - b.y).abs() < EPSILON && (a.z - b.z).abs() < EPSILON
    }

    #[test]
    fn test_identity_rotation() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert!(vec_approx_eq(Quat::IDENTITY.rotate(v), v));
    }

    #[test]
    fn test_quarter_turn_about_z() {
        let q = Quat::from_axis_angle(Vec3::Z, FRAC_PI_2);
        let rotated = q.rotate(Vec3::X);
        assert!(vec_approx_eq(rotated, Vec3::Y), "expected Y, got {:?}", rotated);
    }

    #[test]
    fn test_axis_normalization() {
        // A non-unit axis must give the same rotation as the unit axis
        let a = Quat::from_axis_angle(Vec3::new(0.0, 0.0, 5.0), 1.0);
        let b = Quat::from_axis_angle(Vec3::Z, 1.0);
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert!(vec_approx_eq(a.rotate(v), b.rotate(v)));
    }

    #[test]
    fn test_composition_order() {
        // a * b applies b first: rotate X by 90 deg about Z (-> Y), then 90 deg
        // about X (-> Z)
        let about_z = Quat::from_axis_angle(Vec3::Z, FRAC_PI_2);
        let about_x = Quat::from_axis_angle(Vec3::X, FRAC_PI_2);
        let composed = about_x * about_z;
        let rotated = composed.rotate(Vec3::X);
        assert!(vec_approx_eq(rotated, Vec3::Z), "expected Z, got {:?}", rotated);
    }

    #[test]
    fn test_incremental_composition_matches_single_rotation() {
        // n small steps about one axis compose to one large rotation
        let axis = Vec3::new(0.2, 0.4, 0.7);
        let total = 2.5;
        let n = 100;

        let mut incremental = Quat::IDENTITY;
        let step = Quat::from_axis_angle(axis, total / n as f32);
        for _ in 0..n {
            incremental = (incremental * step).normalized();
        }
        let direct = Quat::from_axis_angle(axis, total);

        let v = Vec3::new(1.0, -2.0, 0.5);
        assert!(
            vec_approx_eq(incremental.rotate(v), direct.rotate(v)),
            "incremental {:?} vs direct {:?}",
            incremental.rotate(v),
            direct.rotate(v)
        );
    }

    #[test]
    fn test_to_mat4_matches_rotate() {
        let q = Quat::from_axis_angle(Vec3::new(1.0, 1.0, 0.0), PI / 3.0);
        let m = q.to_mat4();
        let v = Vec3::new(0.3, -1.2, 2.0);
        let by_quat = q.rotate(v);
        let by_mat = crate::mat4::transform_dir(m, v);
        assert!(vec_approx_eq(by_quat, by_mat), "{:?} vs {:?}", by_quat, by_mat);
    }

    #[test]
    fn test_normalized_restores_unit_length() {
        let drifted = Quat::new(0.1, 0.2, 0.3, 2.0);
        let n = drifted.normalized();
        assert!((n.length_squared() - 1.0).abs() < EPSILON);
    }
}
