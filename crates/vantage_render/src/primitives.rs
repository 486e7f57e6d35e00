//! Procedural demo meshes
//!
//! A unit box (non-indexed, 36 vertices) and a UV sphere (indexed). The
//! two exercise both draw paths of the renderer.

use crate::mesh::{MeshData, Vertex};

/// Unit cube centered at the origin, one UV quad per face
///
/// Non-indexed: 6 faces * 2 triangles * 3 vertices.
pub fn box_mesh() -> MeshData {
    let h = 0.5;

    // Each face: four corners counter-clockwise seen from outside, with
    // uvs covering the full texture.
    let faces: [[[f32; 3]; 4]; 6] = [
        [[-h, -h, h], [h, -h, h], [h, h, h], [-h, h, h]],     // +z
        [[h, -h, -h], [-h, -h, -h], [-h, h, -h], [h, h, -h]], // -z
        [[h, -h, h], [h, -h, -h], [h, h, -h], [h, h, h]],     // +x
        [[-h, -h, -h], [-h, -h, h], [-h, h, h], [-h, h, -h]], // -x
        [[-h, h, h], [h, h, h], [h, h, -h], [-h, h, -h]],     // +y
        [[-h, -h, -h], [h, -h, -h], [h, -h, h], [-h, -h, h]], // -y
    ];

    let corner_uvs = [[0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0]];

    let mut vertices = Vec::with_capacity(36);
    for corners in faces.iter() {
        for &i in &[0usize, 1, 2, 2, 3, 0] {
            vertices.push(Vertex::new(corners[i], corner_uvs[i]));
        }
    }

    MeshData {
        vertices,
        indices: None,
    }
}

/// UV sphere of radius 1 with poles on the z axis, indexed
///
/// `rings` latitude bands and `sectors` longitude segments; an extra
/// vertex column closes the UV seam.
pub fn sphere_mesh(rings: u32, sectors: u32) -> MeshData {
    let rings = rings.max(2);
    let sectors = sectors.max(3);

    let mut vertices = Vec::with_capacity(((rings + 1) * (sectors + 1)) as usize);

    for ring in 0..=rings {
        let v = ring as f32 / rings as f32;
        let phi = v * std::f32::consts::PI; // 0 at +z pole
        let (sin_phi, cos_phi) = phi.sin_cos();

        for sector in 0..=sectors {
            let u = sector as f32 / sectors as f32;
            let theta = u * std::f32::consts::TAU;
            let (sin_theta, cos_theta) = theta.sin_cos();

            vertices.push(Vertex::new(
                [sin_phi * cos_theta, sin_phi * sin_theta, cos_phi],
                [u, v],
            ));
        }
    }

    let mut indices = Vec::with_capacity((rings * sectors * 6) as usize);
    let stride = sectors + 1;
    for ring in 0..rings {
        for sector in 0..sectors {
            let a = ring * stride + sector;
            let b = a + stride;

            indices.extend_from_slice(&[a, b, a + 1, a + 1, b, b + 1]);
        }
    }

    MeshData {
        vertices,
        indices: Some(indices),
    }
}
