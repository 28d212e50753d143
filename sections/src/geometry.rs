//! Vertex data shared by the sections

/// Rectangle corners, 3 floats each, drawn with [`RECTANGLE_INDICES`]
#[rustfmt::skip]
pub const RECTANGLE: [f32; 12] = [
     0.5,  0.5, 0.0, // top right
     0.5, -0.5, 0.0, // bottom right
    -0.5, -0.5, 0.0, // bottom left
    -0.5,  0.5, 0.0, // top left
];

/// Two triangles over [`RECTANGLE`]
pub const RECTANGLE_INDICES: [u32; 6] = [0, 1, 3, 1, 2, 3];

/// Rectangle with position, color and texture coordinate, 8 floats each
#[rustfmt::skip]
pub const TEXTURED_RECTANGLE: [f32; 32] = [
    // positions       // colors        // texture coords
     0.5,  0.5, 0.0,   1.0, 0.0, 0.0,   1.0, 1.0,
     0.5, -0.5, 0.0,   0.0, 1.0, 0.0,   1.0, 0.0,
    -0.5, -0.5, 0.0,   0.0, 0.0, 1.0,   0.0, 0.0,
    -0.5,  0.5, 0.0,   1.0, 1.0, 0.0,   0.0, 1.0,
];

/// Triangle with position and color, 6 floats each
#[rustfmt::skip]
pub const COLORED_TRIANGLE: [f32; 18] = [
    // positions        // colors
     0.5, -0.5, 0.0,    1.0, 0.0, 0.0,
    -0.5, -0.5, 0.0,    0.0, 1.0, 0.0,
     0.0,  0.5, 0.0,    0.0, 0.0, 1.0,
];

/// Unit cube with position and texture coordinate, 5 floats each
///
/// Every face is wound counter-clockwise seen from outside, so it renders
/// correctly with back-face culling on.
#[rustfmt::skip]
pub const CUBE: [f32; 180] = [
    // back face
    -0.5, -0.5, -0.5,  0.0, 0.0,
     0.5,  0.5, -0.5,  1.0, 1.0,
     0.5, -0.5, -0.5,  1.0, 0.0,
     0.5,  0.5, -0.5,  1.0, 1.0,
    -0.5, -0.5, -0.5,  0.0, 0.0,
    -0.5,  0.5, -0.5,  0.0, 1.0,
    // front face
    -0.5, -0.5,  0.5,  0.0, 0.0,
     0.5, -0.5,  0.5,  1.0, 0.0,
     0.5,  0.5,  0.5,  1.0, 1.0,
     0.5,  0.5,  0.5,  1.0, 1.0,
    -0.5,  0.5,  0.5,  0.0, 1.0,
    -0.5, -0.5,  0.5,  0.0, 0.0,
    // left face
    -0.5,  0.5,  0.5,  1.0, 0.0,
    -0.5,  0.5, -0.5,  1.0, 1.0,
    -0.5, -0.5, -0.5,  0.0, 1.0,
    -0.5, -0.5, -0.5,  0.0, 1.0,
    -0.5, -0.5,  0.5,  0.0, 0.0,
    -0.5,  0.5,  0.5,  1.0, 0.0,
    // right face
     0.5,  0.5,  0.5,  1.0, 0.0,
     0.5, -0.5, -0.5,  0.0, 1.0,
     0.5,  0.5, -0.5,  1.0, 1.0,
     0.5, -0.5, -0.5,  0.0, 1.0,
     0.5,  0.5,  0.5,  1.0, 0.0,
     0.5, -0.5,  0.5,  0.0, 0.0,
    // bottom face
    -0.5, -0.5, -0.5,  0.0, 1.0,
     0.5, -0.5, -0.5,  1.0, 1.0,
     0.5, -0.5,  0.5,  1.0, 0.0,
     0.5, -0.5,  0.5,  1.0, 0.0,
    -0.5, -0.5,  0.5,  0.0, 0.0,
    -0.5, -0.5, -0.5,  0.0, 1.0,
    // top face
    -0.5,  0.5, -0.5,  0.0, 1.0,
     0.5,  0.5,  0.5,  1.0, 0.0,
     0.5,  0.5, -0.5,  1.0, 1.0,
     0.5,  0.5,  0.5,  1.0, 0.0,
    -0.5,  0.5, -0.5,  0.0, 1.0,
    -0.5,  0.5,  0.5,  0.0, 0.0,
];

/// Unit cube with position, normal and texture coordinate, 8 floats each
#[rustfmt::skip]
pub const LIT_CUBE: [f32; 288] = [
    // positions          // normals          // texture coords
    -0.5, -0.5, -0.5,   0.0,  0.0, -1.0,   0.0, 0.0,
     0.5, -0.5, -0.5,   0.0,  0.0, -1.0,   1.0, 0.0,
     0.5,  0.5, -0.5,   0.0,  0.0, -1.0,   1.0, 1.0,
     0.5,  0.5, -0.5,   0.0,  0.0, -1.0,   1.0, 1.0,
    -0.5,  0.5, -0.5,   0.0,  0.0, -1.0,   0.0, 1.0,
    -0.5, -0.5, -0.5,   0.0,  0.0, -1.0,   0.0, 0.0,

    -0.5, -0.5,  0.5,   0.0,  0.0,  1.0,   0.0, 0.0,
     0.5, -0.5,  0.5,   0.0,  0.0,  1.0,   1.0, 0.0,
     0.5,  0.5,  0.5,   0.0,  0.0,  1.0,   1.0, 1.0,
     0.5,  0.5,  0.5,   0.0,  0.0,  1.0,   1.0, 1.0,
    -0.5,  0.5,  0.5,   0.0,  0.0,  1.0,   0.0, 1.0,
    -0.5, -0.5,  0.5,   0.0,  0.0,  1.0,   0.0, 0.0,

    -0.5,  0.5,  0.5,  -1.0,  0.0,  0.0,   1.0, 0.0,
    -0.5,  0.5, -0.5,  -1.0,  0.0,  0.0,   1.0, 1.0,
    -0.5, -0.5, -0.5,  -1.0,  0.0,  0.0,   0.0, 1.0,
    -0.5, -0.5, -0.5,  -1.0,  0.0,  0.0,   0.0, 1.0,
    -0.5, -0.5,  0.5,  -1.0,  0.0,  0.0,   0.0, 0.0,
    -0.5,  0.5,  0.5,  -1.0,  0.0,  0.0,   1.0, 0.0,

     0.5,  0.5,  0.5,   1.0,  0.0,  0.0,   1.0, 0.0,
     0.5,  0.5, -0.5,   1.0,  0.0,  0.0,   1.0, 1.0,
     0.5, -0.5, -0.5,   1.0,  0.0,  0.0,   0.0, 1.0,
     0.5, -0.5, -0.5,   1.0,  0.0,  0.0,   0.0, 1.0,
     0.5, -0.5,  0.5,   1.0,  0.0,  0.0,   0.0, 0.0,
     0.5,  0.5,  0.5,   1.0,  0.0,  0.0,   1.0, 0.0,

    -0.5, -0.5, -0.5,   0.0, -1.0,  0.0,   0.0, 1.0,
     0.5, -0.5, -0.5,   0.0, -1.0,  0.0,   1.0, 1.0,
     0.5, -0.5,  0.5,   0.0, -1.0,  0.0,   1.0, 0.0,
     0.5, -0.5,  0.5,   0.0, -1.0,  0.0,   1.0, 0.0,
    -0.5, -0.5,  0.5,   0.0, -1.0,  0.0,   0.0, 0.0,
    -0.5, -0.5, -0.5,   0.0, -1.0,  0.0,   0.0, 1.0,

    -0.5,  0.5, -0.5,   0.0,  1.0,  0.0,   0.0, 1.0,
     0.5,  0.5, -0.5,   0.0,  1.0,  0.0,   1.0, 1.0,
     0.5,  0.5,  0.5,   0.0,  1.0,  0.0,   1.0, 0.0,
     0.5,  0.5,  0.5,   0.0,  1.0,  0.0,   1.0, 0.0,
    -0.5,  0.5,  0.5,   0.0,  1.0,  0.0,   0.0, 0.0,
    -0.5,  0.5, -0.5,   0.0,  1.0,  0.0,   0.0, 1.0,
];

/// Floor quad at y = -0.5, texture repeated twice, 5 floats each
#[rustfmt::skip]
pub const PLANE: [f32; 30] = [
     5.0, -0.5,  5.0,  2.0, 0.0,
    -5.0, -0.5,  5.0,  0.0, 0.0,
    -5.0, -0.5, -5.0,  0.0, 2.0,

     5.0, -0.5,  5.0,  2.0, 0.0,
    -5.0, -0.5, -5.0,  0.0, 2.0,
     5.0, -0.5, -5.0,  2.0, 2.0,
];

/// Upright unit quad for vegetation, 5 floats each
#[rustfmt::skip]
pub const BILLBOARD: [f32; 30] = [
    0.0,  0.5, 0.0,  0.0, 1.0,
    0.0, -0.5, 0.0,  0.0, 0.0,
    1.0, -0.5, 0.0,  1.0, 0.0,

    0.0,  0.5, 0.0,  0.0, 1.0,
    1.0, -0.5, 0.0,  1.0, 0.0,
    1.0,  0.5, 0.0,  1.0, 1.0,
];

/// Full-screen quad in normalized device coordinates, 4 floats each
#[rustfmt::skip]
pub const SCREEN_QUAD: [f32; 24] = [
    // positions  // texture coords
    -1.0,  1.0,   0.0, 1.0,
    -1.0, -1.0,   0.0, 0.0,
     1.0, -1.0,   1.0, 0.0,

    -1.0,  1.0,   0.0, 1.0,
     1.0, -1.0,   1.0, 0.0,
     1.0,  1.0,   1.0, 1.0,
];

/// World positions of the ten cubes in the coordinate and camera sections
pub const CUBE_POSITIONS: [[f32; 3]; 10] = [
    [0.0, 0.0, 0.0],
    [2.0, 5.0, -15.0],
    [-1.5, -2.2, -2.5],
    [-3.8, -2.0, -12.3],
    [2.4, -0.4, -3.5],
    [-1.7, 3.0, -7.5],
    [1.3, -2.0, -2.5],
    [1.5, 2.0, -2.5],
    [1.5, 0.2, -1.5],
    [-1.3, 1.0, -1.5],
];

/// The two cubes standing on [`PLANE`] in the advanced sections
pub const SCENE_CUBES: [[f32; 3]; 2] = [[-1.0, 0.0, -1.0], [2.0, 0.0, 0.0]];

/// Grass quad positions for the blending section
pub const VEGETATION: [[f32; 3]; 5] = [
    [-1.5, 0.0, -0.48],
    [1.5, 0.0, 0.51],
    [0.0, 0.0, 0.7],
    [-0.3, 0.0, -2.3],
    [0.5, 0.0, -0.6],
];

/// Number of vertices in a float slice with `stride` floats per vertex
pub const fn vertex_count(data: &[f32], stride: usize) -> i32 {
    (data.len() / stride) as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use learn_opengl::foundation::math::Vec3;

    fn position(data: &[f32], stride: usize, vertex: usize) -> Vec3 {
        let base = vertex * stride;
        Vec3::new(data[base], data[base + 1], data[base + 2])
    }

    #[test]
    fn test_cube_faces_wind_counter_clockwise_from_outside() {
        for triangle in 0..12 {
            let a = position(&CUBE, 5, triangle * 3);
            let b = position(&CUBE, 5, triangle * 3 + 1);
            let c = position(&CUBE, 5, triangle * 3 + 2);
            let normal = (b - a).cross(&(c - a));
            let centroid = (a + b + c) / 3.0;
            assert!(normal.dot(&centroid) > 0.0, "triangle {triangle} faces inwards");
        }
    }

    #[test]
    fn test_lit_cube_normals_point_outwards() {
        for vertex in 0..36 {
            let p = position(&LIT_CUBE, 8, vertex);
            let n = Vec3::new(LIT_CUBE[vertex * 8 + 3], LIT_CUBE[vertex * 8 + 4], LIT_CUBE[vertex * 8 + 5]);
            assert!((n.norm() - 1.0).abs() < 1e-6);
            assert!(n.dot(&p) > 0.0, "vertex {vertex} normal faces inwards");
        }
    }

    #[test]
    fn test_vertex_counts() {
        assert_eq!(vertex_count(&CUBE, 5), 36);
        assert_eq!(vertex_count(&LIT_CUBE, 8), 36);
        assert_eq!(vertex_count(&PLANE, 5), 6);
        assert_eq!(vertex_count(&SCREEN_QUAD, 4), 6);
        assert_eq!(vertex_count(&TEXTURED_RECTANGLE, 8), 4);
        assert!(RECTANGLE_INDICES.iter().all(|&i| (i as usize) < RECTANGLE.len() / 3));
    }
}
