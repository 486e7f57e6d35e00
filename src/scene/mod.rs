//! Demo scene construction

mod scene_builder;

pub use scene_builder::{build_demo_scene, DemoScene, ORBIT_PHASE, ORBIT_RADIUS};
