//! Static vertex data shared by the pipelines.
//!
//! Positions and UVs live in separate buffers: slot 0 carries positions
//! (3 x f32), slot 1 carries UVs (2 x f32).

use glam::Vec3;

/// Vertices in the particle cube.
pub const CUBE_VERTEX_COUNT: u32 = 36;
/// Vertices in the background quad.
pub const QUAD_VERTEX_COUNT: u32 = 6;
/// Half extent of the background quad.
pub const QUAD_HALF_EXTENT: f32 = 5.0;

/// UVs for the two triangles of one face: (a, b, c) and (a, c, d).
const FACE_UVS: [[f32; 2]; 6] = [
    [0.0, 0.0],
    [1.0, 0.0],
    [1.0, 1.0],
    [0.0, 0.0],
    [1.0, 1.0],
    [0.0, 1.0],
];

/// Vertex positions and UVs for one mesh.
#[derive(Debug, Clone)]
pub struct Mesh {
    pub positions: Vec<[f32; 3]>,
    pub uvs: Vec<[f32; 2]>,
}

impl Mesh {
    pub fn vertex_count(&self) -> u32 {
        self.positions.len() as u32
    }
}

/// Unit cube spanning -1..1 on every axis, triangles wound CCW from outside.
pub fn cube() -> Mesh {
    // (normal, u, v) with u x v == normal
    let faces = [
        (Vec3::X, Vec3::Y, Vec3::Z),
        (Vec3::NEG_X, Vec3::Z, Vec3::Y),
        (Vec3::Y, Vec3::Z, Vec3::X),
        (Vec3::NEG_Y, Vec3::X, Vec3::Z),
        (Vec3::Z, Vec3::X, Vec3::Y),
        (Vec3::NEG_Z, Vec3::Y, Vec3::X),
    ];

    let mut positions = Vec::with_capacity(CUBE_VERTEX_COUNT as usize);
    let mut uvs = Vec::with_capacity(CUBE_VERTEX_COUNT as usize);
    for (n, u, v) in faces {
        let a = n - u - v;
        let b = n + u - v;
        let c = n + u + v;
        let d = n - u + v;
        for corner in [a, b, c, a, c, d] {
            positions.push(corner.to_array());
        }
        uvs.extend_from_slice(&FACE_UVS);
    }

    Mesh { positions, uvs }
}

/// 10x10 quad in the xy plane, centered on the origin.
pub fn background_quad() -> Mesh {
    let e = QUAD_HALF_EXTENT;
    Mesh {
        positions: vec![
            [-e, -e, 0.0],
            [e, -e, 0.0],
            [e, e, 0.0],
            [-e, -e, 0.0],
            [e, e, 0.0],
            [-e, e, 0.0],
        ],
        uvs: FACE_UVS.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cube_counts() {
        let mesh = cube();
        assert_eq!(mesh.vertex_count(), CUBE_VERTEX_COUNT);
        assert_eq!(mesh.uvs.len(), mesh.positions.len());
        for p in &mesh.positions {
            for c in p {
                assert!(c.abs() == 1.0);
            }
        }
    }

    #[test]
    fn test_cube_winding_faces_outward() {
        let mesh = cube();
        for tri in mesh.positions.chunks(3) {
            let a = Vec3::from_array(tri[0]);
            let b = Vec3::from_array(tri[1]);
            let c = Vec3::from_array(tri[2]);
            let normal = (b - a).cross(c - a);
            let centroid = (a + b + c) / 3.0;
            assert!(normal.dot(centroid) > 0.0);
        }
    }

    #[test]
    fn test_background_quad() {
        let mesh = background_quad();
        assert_eq!(mesh.vertex_count(), QUAD_VERTEX_COUNT);
        let xs: Vec<f32> = mesh.positions.iter().map(|p| p[0]).collect();
        assert_eq!(xs.iter().cloned().fold(f32::MIN, f32::max), 5.0);
        assert_eq!(xs.iter().cloned().fold(f32::MAX, f32::min), -5.0);
        assert!(mesh.positions.iter().all(|p| p[2] == 0.0));
    }
}
