//! Input handling module
//!
//! Maps special keys to semantic actions. Movement keys go directly to the
//! `CameraController` in `vantage_input`.

mod input_mapper;

pub use input_mapper::{InputAction, InputMapper};
