//! Input handling for the Vantage camera
//!
//! This crate translates raw winit events into the per-frame input
//! snapshot the camera consumes: movement key flags and an absolute
//! cursor position.

mod camera_controller;

pub use camera_controller::CameraController;
