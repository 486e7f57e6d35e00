//! 3D Mathematics Library
//!
//! This crate provides the vector, rotation, and matrix types for the
//! Vantage engine.
//!
//! ## Core Types
//!
//! - [`Vec2`] - 2D vector (cursor positions and deltas)
//! - [`Vec3`] - 3D vector with x, y, z components
//! - [`Quat`] - unit quaternion rotation
//! - [`Mat4`] - 4x4 column-major matrix for transformations
//!
//! ## Angles
//!
//! Look angles are stored as fractions of a full turn (0..1) rather than
//! radians, which makes wraparound arithmetic exact. The [`turns`] module
//! holds the conversion helpers.

mod vec2;
mod vec3;
mod quat;
pub mod mat4;
pub mod turns;

pub use vec2::Vec2;
pub use vec3::Vec3;
pub use quat::Quat;
pub use mat4::Mat4;
