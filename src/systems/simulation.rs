//! Frame simulation
//!
//! Tracks frame time and drives the demo scene animation: the three boxes
//! orbit with absolute per-frame poses, the globe spins by incremental
//! quaternion composition. Both animation styles feed the same transform
//! composition path.

use std::f32::consts::PI;
use std::f32::consts::TAU;
use std::time::Instant;

use vantage_core::{Quat, Vec3};

use crate::scene::{DemoScene, ORBIT_PHASE, ORBIT_RADIUS};

/// Tracks frame timing and animates the demo scene
pub struct SimulationSystem {
    last_frame: Instant,
    elapsed: f32,
}

impl Default for SimulationSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulationSystem {
    /// Create a simulation starting now
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            elapsed: 0.0,
        }
    }

    /// Start a frame, returning the capped delta time in seconds
    ///
    /// The cap keeps the first frame (and frames after a window-focus
    /// stall) from producing a huge integration step.
    pub fn begin_frame(&mut self) -> f32 {
        let now = Instant::now();
        let raw_dt = (now - self.last_frame).as_secs_f32();
        let dt = raw_dt.min(1.0 / 30.0);
        self.last_frame = now;
        self.elapsed += dt;
        dt
    }

    /// Seconds of animation time elapsed
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Advance the demo animation by one frame
    pub fn animate(&self, demo: &mut DemoScene, dt: f32) {
        let t = self.elapsed;

        for (i, &index) in demo.orbiters.iter().enumerate() {
            let theta = i as f32 * TAU / 3.0 + ORBIT_PHASE + 0.33 * t;
            // Box 0 bobs vertically on top of its orbit
            let z = if i == 0 { 0.5 * (0.5 * t).sin() } else { 0.0 };

            let node = demo
                .scene
                .node_mut(index)
                .expect("orbiter index out of range");
            node.set_position(Vec3::new(
                theta.cos() * ORBIT_RADIUS,
                theta.sin() * ORBIT_RADIUS,
                z,
            ));
        }

        // Box 0: tumble about a skewed axis
        demo.scene
            .node_mut(demo.orbiters[0])
            .expect("orbiter index out of range")
            .set_orientation(Quat::from_axis_angle(Vec3::new(0.2, 0.4, 0.7), 0.5 * t));

        // Box 1: slow counter-rotation
        demo.scene
            .node_mut(demo.orbiters[1])
            .expect("orbiter index out of range")
            .set_orientation(Quat::from_axis_angle(Vec3::new(0.0, 0.8, 1.0), -0.35 * t));

        // Box 2: swing about z while pitching about its rotated x axis
        let swing = Quat::from_axis_angle(Vec3::Z, PI * (0.5 * (0.7 * t).sin() + 0.5));
        demo.scene
            .node_mut(demo.orbiters[2])
            .expect("orbiter index out of range")
            .set_orientation(
                Quat::from_axis_angle(
                    swing.rotate(Vec3::X),
                    PI * (0.5 * (-0.7 * t).sin() + 0.5),
                ) * swing,
            );

        // Globe: steady incremental spin about the vertical axis
        demo.scene
            .node_mut(demo.globe)
            .expect("globe index out of range")
            .rotate(Quat::from_axis_angle(Vec3::Z, 0.33 * dt));
    }
}
