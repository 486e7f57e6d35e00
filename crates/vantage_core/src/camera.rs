//! First-person camera kinematics
//!
//! The camera integrates an acceleration/drag-limited velocity and a
//! yaw/pitch orientation from an injected input snapshot. Angles are in
//! turns; the world is z-up with +y as the authoring forward direction.
//!
//! Two states: Locked (`can_move = false`) freezes orientation and position
//! but keeps recomputing the view from the last committed pose; Free runs
//! the full kinematic update.

use bitflags::bitflags;
use vantage_math::{mat4, turns, Mat4, Vec2, Vec3};

bitflags! {
    /// Movement input snapshot for one frame
    ///
    /// Six direction keys plus the slow (crouch) modifier, collected by the
    /// input layer and passed into [`Camera::update`].
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct MoveKeys: u8 {
        const FORWARD = 1 << 0;
        const BACK = 1 << 1;
        const LEFT = 1 << 2;
        const RIGHT = 1 << 3;
        const UP = 1 << 4;
        const DOWN = 1 << 5;
        /// Halves the speed cap while held
        const SLOW = 1 << 6;
    }
}

/// First-person camera with drag-limited kinematics
///
/// `view` and `projection` are derived state, rebuilt from the pose every
/// frame; everything else persists across frames.
#[derive(Clone, Copy, Debug)]
pub struct Camera {
    /// World-space eye position
    pub position: Vec3,
    /// World-space velocity, persists across frames
    pub velocity: Vec3,
    /// Vertical look angle in turns, clamped to [-MAX_PITCH, MAX_PITCH]
    pub pitch: f32,
    /// Horizontal look angle in turns, wrapped to [0, 1)
    pub yaw: f32,
    /// Speed cap in units per second
    pub max_speed: f32,
    /// Acceleration while a direction is held, units per second squared
    pub accel_rate: f32,
    /// Drag applied every frame, units per second squared
    pub decel_rate: f32,
    /// Scales raw cursor deltas before they reach yaw/pitch
    pub sensitivity: f32,
    /// Vertical field of view in degrees (projection halves it)
    pub fov: f32,
    /// Free when true, Locked when false
    pub can_move: bool,
    /// World-to-camera transform, recomputed every update
    pub view: Mat4,
    /// Perspective projection, rebuilt from the viewport every frame
    pub projection: Mat4,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

impl Camera {
    /// Pitch limit in turns, just short of a quarter turn to keep the view
    /// transform away from the gimbal poles
    pub const MAX_PITCH: f32 = 0.25 - 1.0 / 256.0;

    /// Near clip plane distance
    pub const NEAR: f32 = 0.1;
    /// Far clip plane distance
    pub const FAR: f32 = 100.0;

    /// Cursor pixels to turns
    const LOOK_SCALE: f32 = 0.0004;
    /// Vertical sensitivity ratio relative to horizontal
    const VERTICAL_FEEL: f32 = 0.86;
    /// Speed cap multiplier while SLOW is held
    const SLOW_MODIFIER: f32 = 0.5;

    /// Create a camera with the demo defaults, starting Locked
    pub fn new() -> Self {
        Self {
            position: Vec3::new(0.0, -3.0, 0.0),
            velocity: Vec3::ZERO,
            pitch: 0.0,
            yaw: 0.0,
            max_speed: 4.0,
            accel_rate: 100.0,
            decel_rate: 50.0,
            sensitivity: 1.0,
            fov: 90.0,
            can_move: false,
            view: mat4::IDENTITY,
            projection: mat4::IDENTITY,
        }
    }

    /// Builder: set the starting position
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Builder: set the kinematic limits
    pub fn with_kinematics(mut self, max_speed: f32, accel_rate: f32, decel_rate: f32) -> Self {
        self.max_speed = max_speed;
        self.accel_rate = accel_rate;
        self.decel_rate = decel_rate;
        self
    }

    /// Builder: set the look sensitivity
    pub fn with_sensitivity(mut self, sensitivity: f32) -> Self {
        self.sensitivity = sensitivity;
        self
    }

    /// Builder: set the field of view in degrees
    pub fn with_fov(mut self, fov: f32) -> Self {
        self.fov = fov;
        self
    }

    /// Advance the camera by one frame
    ///
    /// `look_delta` is the filtered cursor delta in pixels; `keys` is the
    /// movement snapshot. When Locked, the pose is frozen but the view is
    /// still recomputed from it.
    pub fn update(&mut self, dt: f32, keys: MoveKeys, look_delta: Vec2) {
        if self.can_move {
            self.integrate_look(look_delta);
            self.integrate_movement(dt, keys);
        }

        self.view = mat4::inverse_rigid(self.world_transform());
    }

    fn integrate_look(&mut self, look_delta: Vec2) {
        let dx = look_delta.x * Self::LOOK_SCALE * self.sensitivity;
        let dy = look_delta.y * Self::LOOK_SCALE * Self::VERTICAL_FEEL * self.sensitivity;

        self.yaw = turns::wrap(self.yaw - dx);
        self.pitch = (self.pitch - dy).clamp(-Self::MAX_PITCH, Self::MAX_PITCH);
    }

    fn integrate_movement(&mut self, dt: f32, keys: MoveKeys) {
        let rot = mat4::mul(mat4::rotation_z(self.yaw), mat4::rotation_x(self.pitch));
        let front = mat4::transform_dir(rot, Vec3::Y);
        let right = mat4::transform_dir(rot, Vec3::X);
        let up = Vec3::Z;

        let mut direction = Vec3::ZERO;
        if keys.contains(MoveKeys::FORWARD) {
            direction += front;
        }
        if keys.contains(MoveKeys::BACK) {
            direction -= front;
        }
        if keys.contains(MoveKeys::RIGHT) {
            direction += right;
        }
        if keys.contains(MoveKeys::LEFT) {
            direction -= right;
        }
        if keys.contains(MoveKeys::UP) {
            direction += up;
        }
        if keys.contains(MoveKeys::DOWN) {
            direction -= up;
        }

        if direction.length() > f32::EPSILON {
            self.velocity += direction.normalized() * self.accel_rate * dt;
        }

        // Drag runs every frame, even while accelerating; together with the
        // clamp it bounds speed at max_speed without an explicit cap branch.
        let speed = self.velocity.length();
        if speed > f32::EPSILON {
            let cap = self.max_speed
                * if keys.contains(MoveKeys::SLOW) {
                    Self::SLOW_MODIFIER
                } else {
                    1.0
                };
            self.velocity =
                self.velocity.normalized() * (speed - self.decel_rate * dt).clamp(0.0, cap);
        }

        self.position += self.velocity * dt;
    }

    /// Camera-to-world transform built from the committed pose
    ///
    /// Translation, then a quarter-turn about x to move from the +y-forward
    /// z-up authoring frame into the rendering frame, then yaw and pitch.
    /// The view matrix is the rigid inverse of this.
    pub fn world_transform(&self) -> Mat4 {
        let mut transform = mat4::translation(self.position);
        transform = mat4::mul(transform, mat4::rotation_x(0.25));
        transform = mat4::mul(transform, mat4::rotation_y(self.yaw));
        transform = mat4::mul(transform, mat4::rotation_x(self.pitch));
        transform
    }

    /// Rebuild the projection for the given viewport size
    ///
    /// Uses the half-fov convention: a `fov` of 90 degrees projects with a
    /// 45 degree vertical field of view.
    pub fn update_projection(&mut self, width: u32, height: u32) {
        let aspect = width.max(1) as f32 / height.max(1) as f32;
        self.projection = mat4::perspective(
            (self.fov / 2.0).to_radians(),
            aspect,
            Self::NEAR,
            Self::FAR,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    fn free_camera() -> Camera {
        let mut camera = Camera::new();
        camera.can_move = true;
        camera
    }

    fn mat_approx_identity(m: Mat4) -> bool {
        for i in 0..4 {
            for j in 0..4 {
                let expected = if i == j { 1.0 } else { 0.0 };
                if (m[i][j] - expected).abs() > EPSILON {
                    return false;
                }
            }
        }
        true
    }

    #[test]
    fn test_speed_never_exceeds_cap() {
        let mut camera = free_camera();
        let keys = MoveKeys::FORWARD | MoveKeys::RIGHT;

        for _ in 0..1000 {
            camera.update(0.016, keys, Vec2::ZERO);
            assert!(
                camera.velocity.length() <= camera.max_speed + EPSILON,
                "speed {} above cap",
                camera.velocity.length()
            );
        }
    }

    #[test]
    fn test_slow_modifier_halves_cap() {
        let mut camera = free_camera();
        let keys = MoveKeys::FORWARD | MoveKeys::SLOW;

        for _ in 0..1000 {
            camera.update(0.016, keys, Vec2::ZERO);
            assert!(camera.velocity.length() <= camera.max_speed * 0.5 + EPSILON);
        }
    }

    #[test]
    fn test_ramp_saturates_then_decays() {
        let mut camera = free_camera().with_kinematics(4.0, 100.0, 50.0);

        // Forward held: one 0.1s step already accelerates past the cap and
        // clamps to exactly max_speed.
        for _ in 0..10 {
            camera.update(0.1, MoveKeys::FORWARD, Vec2::ZERO);
            assert!((camera.velocity.length() - 4.0).abs() < 1e-4);
        }

        // Released: 4.0 / 50.0 = 0.08s of drag, gone within one step.
        camera.update(0.1, MoveKeys::empty(), Vec2::ZERO);
        assert_eq!(camera.velocity.length(), 0.0);
    }

    #[test]
    fn test_decay_is_monotonic_and_exact() {
        let mut camera = free_camera();
        camera.velocity = Vec3::new(3.0, 1.0, 0.0);

        let mut last = camera.velocity.length();
        for _ in 0..200 {
            camera.update(0.016, MoveKeys::empty(), Vec2::ZERO);
            let speed = camera.velocity.length();
            assert!(speed <= last + EPSILON, "speed increased while idle");
            last = speed;
        }
        assert_eq!(last, 0.0);

        // Stays exactly zero afterwards
        camera.update(0.016, MoveKeys::empty(), Vec2::ZERO);
        assert_eq!(camera.velocity, Vec3::ZERO);
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let mut camera = free_camera();
        camera.update(0.1, MoveKeys::FORWARD | MoveKeys::BACK, Vec2::ZERO);
        assert_eq!(camera.velocity, Vec3::ZERO);
        assert_eq!(camera.position, Camera::new().position);
    }

    #[test]
    fn test_forward_moves_along_authoring_front() {
        let mut camera = free_camera().with_position(Vec3::ZERO);
        camera.update(0.1, MoveKeys::FORWARD, Vec2::ZERO);
        // yaw = pitch = 0: forward is +y
        assert!(camera.position.y > 0.0);
        assert!(camera.position.x.abs() < EPSILON);
        assert!(camera.position.z.abs() < EPSILON);
    }

    #[test]
    fn test_yaw_stays_in_unit_interval() {
        let mut camera = free_camera();
        // Large alternating look input across many frames
        for i in 0..500 {
            let dx = if i % 3 == 0 { 4000.0 } else { -1500.0 };
            camera.update(0.016, MoveKeys::empty(), Vec2::new(dx, 0.0));
            assert!(
                (0.0..1.0).contains(&camera.yaw),
                "yaw {} out of range",
                camera.yaw
            );
        }
    }

    #[test]
    fn test_pitch_clamps_exactly() {
        let mut camera = free_camera();
        // One huge downward-look delta must clamp, not overshoot
        camera.update(0.016, MoveKeys::empty(), Vec2::new(0.0, 1e7));
        assert_eq!(camera.pitch, -Camera::MAX_PITCH);

        camera.update(0.016, MoveKeys::empty(), Vec2::new(0.0, -1e7));
        assert_eq!(camera.pitch, Camera::MAX_PITCH);
    }

    #[test]
    fn test_view_inverts_world_transform() {
        let mut camera = free_camera().with_position(Vec3::new(1.0, -2.0, 0.5));
        camera.update(
            0.016,
            MoveKeys::FORWARD,
            Vec2::new(35.0, -12.0),
        );

        let product = mat4::mul(camera.view, camera.world_transform());
        assert!(mat_approx_identity(product));
    }

    #[test]
    fn test_locked_freezes_pose_but_updates_view() {
        let mut camera = Camera::new();
        camera.view = [[0.0; 4]; 4];

        let before_position = camera.position;
        camera.update(0.1, MoveKeys::FORWARD, Vec2::new(100.0, 100.0));

        assert_eq!(camera.position, before_position);
        assert_eq!(camera.yaw, 0.0);
        assert_eq!(camera.pitch, 0.0);
        assert_eq!(camera.velocity, Vec3::ZERO);
        // View was still recomputed from the frozen pose
        let product = mat4::mul(camera.view, camera.world_transform());
        assert!(mat_approx_identity(product));
    }

    #[test]
    fn test_zero_dt_is_safe() {
        let mut camera = free_camera();
        camera.velocity = Vec3::new(1.0, 0.0, 0.0);
        camera.update(0.0, MoveKeys::FORWARD, Vec2::new(10.0, 10.0));
        assert!(camera.velocity.length().is_finite());
        assert!(camera.position.length().is_finite());
    }

    #[test]
    fn test_projection_uses_half_fov() {
        let mut camera = Camera::new().with_fov(90.0);
        camera.update_projection(800, 800);
        // 45 degree vertical fov: f = 1 / tan(22.5 deg)
        let f = 1.0 / (45.0f32.to_radians() / 2.0).tan();
        assert!((camera.projection[1][1] - f).abs() < 1e-4);
    }
}
