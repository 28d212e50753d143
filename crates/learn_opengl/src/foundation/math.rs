//! Math utilities and types
//!
//! Vector and matrix aliases over nalgebra, plus the handful of glm-style
//! helpers the sections use. All matrices follow OpenGL conventions:
//! right-handed view space and clip-space depth in [-1, 1].

pub use nalgebra::{Matrix3, Matrix4, Point3 as NPoint3, Rotation3, Unit, Vector2, Vector3, Vector4};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 3x3 matrix type
pub type Mat3 = Matrix3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = NPoint3<f32>;

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;

}

/// Convert degrees to radians
pub fn deg_to_rad(degrees: f32) -> f32 {
    degrees * constants::DEG_TO_RAD
}

/// Perspective projection with a vertical field of view in radians
pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
    Mat4::new_perspective(aspect, fov_y, near, far)
}

/// Right-handed look-at view matrix
pub fn look_at(eye: &Vec3, target: &Vec3, up: &Vec3) -> Mat4 {
    Mat4::look_at_rh(&Point3::from(*eye), &Point3::from(*target), up)
}

/// Post-multiply `m` by a translation, like `glm::translate`
pub fn translate(m: &Mat4, offset: &Vec3) -> Mat4 {
    m * Mat4::new_translation(offset)
}

/// Post-multiply `m` by a rotation of `angle` radians around `axis`
pub fn rotate(m: &Mat4, angle: f32, axis: &Vec3) -> Mat4 {
    let rotation = Rotation3::from_axis_angle(&Unit::new_normalize(*axis), angle);
    m * rotation.to_homogeneous()
}

/// Post-multiply `m` by a non-uniform scale
pub fn scale(m: &Mat4, factors: &Vec3) -> Mat4 {
    m * Mat4::new_nonuniform_scaling(factors)
}

/// Inverse-transpose of the upper 3x3, for transforming normals
///
/// Falls back to the plain upper 3x3 when the model matrix is singular.
pub fn normal_matrix(model: &Mat4) -> Mat3 {
    let upper: Mat3 = model.fixed_view::<3, 3>(0, 0).into_owned();
    upper.try_inverse().map_or(upper, |inverse| inverse.transpose())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_degree_conversion() {
        assert_relative_eq!(deg_to_rad(180.0), constants::PI);
        assert_relative_eq!(deg_to_rad(90.0), constants::PI / 2.0);
    }

    #[test]
    fn test_translate_then_scale_order() {
        let m = scale(&translate(&Mat4::identity(), &Vec3::new(1.0, 0.0, 0.0)), &Vec3::new(2.0, 2.0, 2.0));
        let p = m.transform_point(&Point3::new(1.0, 1.0, 1.0));
        // Scale applies first, then the translation
        assert_relative_eq!(p, Point3::new(3.0, 2.0, 2.0));
    }

    #[test]
    fn test_rotate_quarter_turn_about_z() {
        let m = rotate(&Mat4::identity(), constants::PI / 2.0, &Vec3::new(0.0, 0.0, 1.0));
        let v = m.transform_vector(&Vec3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(v, Vec3::new(0.0, 1.0, 0.0), epsilon = 1e-6);
    }

    #[test]
    fn test_perspective_maps_near_plane_to_minus_one() {
        let projection = perspective(deg_to_rad(45.0), 800.0 / 600.0, 0.1, 100.0);
        let clip = projection * Vec4::new(0.0, 0.0, -0.1, 1.0);
        assert_relative_eq!(clip.z / clip.w, -1.0, epsilon = 1e-5);
        let clip = projection * Vec4::new(0.0, 0.0, -100.0, 1.0);
        assert_relative_eq!(clip.z / clip.w, 1.0, epsilon = 1e-4);
    }

    #[test]
    fn test_look_at_puts_target_on_negative_z() {
        let view = look_at(&Vec3::new(0.0, 0.0, 3.0), &Vec3::zeros(), &Vec3::y());
        let p = view.transform_point(&Point3::origin());
        assert_relative_eq!(p, Point3::new(0.0, 0.0, -3.0), epsilon = 1e-6);
    }

    #[test]
    fn test_normal_matrix_undoes_non_uniform_scale() {
        let model = scale(&Mat4::identity(), &Vec3::new(2.0, 1.0, 1.0));
        let normal = normal_matrix(&model);
        assert_relative_eq!(normal[(0, 0)], 0.5);
        assert_relative_eq!(normal[(1, 1)], 1.0);
    }
}
