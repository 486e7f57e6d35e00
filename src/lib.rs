//! Vantage - first-person scene walkthrough
//!
//! Library surface of the demo binary: configuration, input mapping, demo
//! scene construction, and the frame simulation system. The reusable
//! engine pieces live in the workspace crates (`vantage_core`,
//! `vantage_render`, `vantage_input`, `vantage_math`).

pub mod config;
pub mod input;
pub mod scene;
pub mod systems;
