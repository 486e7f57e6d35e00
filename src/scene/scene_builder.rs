//! Demo scene construction
//!
//! Builds the walkthrough scene: three textured boxes orbiting a spinning
//! globe. Meshes, textures, and the shader are registered with the
//! renderer here; the scene only keeps their handles.

use std::f32::consts::TAU;
use std::path::Path;

use vantage_core::{Node, Quat, Scene, TextureKey, Vec3};
use vantage_render::{primitives, RenderContext, SceneRenderer, TextureData};

/// Orbit radius of the three boxes
pub const ORBIT_RADIUS: f32 = 2.3;
/// Phase offset so the first box starts at the top of its orbit
pub const ORBIT_PHASE: f32 = TAU / 4.0;

/// Texture files the demo looks for, one per box plus the globe
const TEXTURE_FILES: [&str; 4] = ["tile.png", "concrete.png", "paving.png", "earth.png"];

/// Per-slot checkerboard colors used when a texture file is missing
const FALLBACK_COLORS: [([u8; 4], [u8; 4]); 4] = [
    ([220, 210, 190, 255], [140, 130, 110, 255]),
    ([170, 170, 170, 255], [110, 110, 110, 255]),
    ([180, 150, 120, 255], [120, 95, 75, 255]),
    ([70, 110, 200, 255], [60, 160, 90, 255]),
];

/// The built scene plus the node indices the animation drives
pub struct DemoScene {
    pub scene: Scene,
    /// Indices of the three orbiting boxes, in orbit-phase order
    pub orbiters: [usize; 3],
    /// Index of the globe at the center
    pub globe: usize,
}

/// Register the demo resources and build the scene
pub fn build_demo_scene(
    ctx: &RenderContext,
    renderer: &mut SceneRenderer,
    texture_dir: &Path,
) -> DemoScene {
    let box_mesh = renderer.register_mesh(&ctx.device, &primitives::box_mesh());
    let sphere_mesh = renderer.register_mesh(&ctx.device, &primitives::sphere_mesh(16, 16));
    let shader = renderer.register_basic_shader(&ctx.device, ctx.config.format);

    let textures: Vec<TextureKey> = TEXTURE_FILES
        .iter()
        .zip(FALLBACK_COLORS)
        .map(|(name, (color_a, color_b))| {
            let path = texture_dir.join(name);
            let data = match TextureData::load(&path) {
                Ok(data) => data,
                Err(e) => {
                    log::warn!(
                        "Failed to load texture {}: {}. Using a generated checkerboard.",
                        path.display(),
                        e
                    );
                    TextureData::checkerboard(64, 8, color_a, color_b)
                }
            };
            renderer.register_texture(&ctx.device, &ctx.queue, &data)
        })
        .collect();

    let mut scene = Scene::with_capacity(4);

    let mut orbiters = [0usize; 3];
    for (i, slot) in orbiters.iter_mut().enumerate() {
        let theta = i as f32 * TAU / 3.0 + ORBIT_PHASE;
        *slot = scene.add_node(
            Node::new(box_mesh, textures[i], shader).with_position(Vec3::new(
                theta.cos() * ORBIT_RADIUS,
                theta.sin() * ORBIT_RADIUS,
                0.0,
            )),
        );
    }

    let globe = scene.add_node(
        Node::new(sphere_mesh, textures[3], shader)
            .with_orientation(Quat::from_axis_angle(Vec3::Y, 0.15)),
    );

    log::info!("Built demo scene with {} nodes", scene.len());

    DemoScene {
        scene,
        orbiters,
        globe,
    }
}
