//! Math utilities and types
//!
//! Provides the fundamental math types used by the camera, lighting and
//! scene graph. All matrices follow OpenGL conventions: right-handed view
//! space, clip-space depth in [-1, 1], column-major storage.

pub use nalgebra::{
    Vector2, Vector3, Vector4,
    Matrix3, Matrix4,
    Unit,
};

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
pub type Point3 = nalgebra::Point3<f32>;

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;

    /// Radians to degrees conversion factor
    pub const RAD_TO_DEG: f32 = 180.0 / PI;
}

/// Math utility functions
pub mod utils {
    use super::constants;

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// Convert radians to degrees
    pub fn rad_to_deg(radians: f32) -> f32 {
        radians * constants::RAD_TO_DEG
    }

    /// Clamp a value between min and max
    pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
        if value < min { min } else if value > max { max } else { value }
    }

    /// Hermite smoothstep between two edges, matching GLSL `smoothstep`
    ///
    /// Returns 0.0 at or below `edge0` and 1.0 at or above `edge1`.
    pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
        let t = clamp((x - edge0) / (edge1 - edge0), 0.0, 1.0);
        t * t * (3.0 - 2.0 * t)
    }
}

/// Extension trait for Mat4 with additional convenience methods
pub trait Mat4Ext {
    /// Create a rotation matrix of `degrees` around an arbitrary axis
    fn rotation_axis_degrees(axis: Vec3, degrees: f32) -> Mat4;

    /// Create an OpenGL perspective projection matrix (depth mapped to [-1, 1])
    fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4;

    /// Create a right-handed look-at view matrix
    fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4;

    /// Keep only the upper-left 3x3 block, dropping any translation
    ///
    /// Equivalent to `mat4(mat3(m))` in GLSL. Used for the skybox so it
    /// rotates with the camera but never translates.
    fn without_translation(&self) -> Mat4;
}

impl Mat4Ext for Mat4 {
    fn rotation_axis_degrees(axis: Vec3, degrees: f32) -> Mat4 {
        let axis = Unit::new_normalize(axis);
        Mat4::from_axis_angle(&axis, utils::deg_to_rad(degrees))
    }

    fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
        // P = [1/(a·tan(φ/2))  0             0              0          ]
        //     [0               1/tan(φ/2)    0              0          ]
        //     [0               0             -(f+n)/(f-n)   -2fn/(f-n) ]
        //     [0               0             -1             0          ]
        let tan_half_fovy = (fov_y * 0.5).tan();

        let mut result = Mat4::zeros();
        result[(0, 0)] = 1.0 / (aspect * tan_half_fovy);
        result[(1, 1)] = 1.0 / tan_half_fovy;
        result[(2, 2)] = -(far + near) / (far - near);
        result[(2, 3)] = -(2.0 * far * near) / (far - near);
        result[(3, 2)] = -1.0;

        result
    }

    fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
        let forward = (target - eye).normalize();
        let right = forward.cross(&up).normalize();
        let camera_up = right.cross(&forward);

        let translation = Mat4::new(
            1.0, 0.0, 0.0, -eye.x,
            0.0, 1.0, 0.0, -eye.y,
            0.0, 0.0, 1.0, -eye.z,
            0.0, 0.0, 0.0, 1.0,
        );

        let rotation = Mat4::new(
            right.x, right.y, right.z, 0.0,
            camera_up.x, camera_up.y, camera_up.z, 0.0,
            -forward.x, -forward.y, -forward.z, 0.0,  // Negative forward for right-handed
            0.0, 0.0, 0.0, 1.0,
        );

        rotation * translation
    }

    fn without_translation(&self) -> Mat4 {
        let upper: Mat3 = self.fixed_view::<3, 3>(0, 0).into_owned();
        upper.to_homogeneous()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_look_at_matches_nalgebra_rh() {
        let eye = Vec3::new(1.0, 2.0, 3.0);
        let target = Vec3::new(0.0, 0.0, -1.0);
        let up = Vec3::y();

        let ours = Mat4::look_at(eye, target, up);
        let reference = Mat4::look_at_rh(&Point3::from(eye), &Point3::from(target), &up);
        assert_relative_eq!(ours, reference, epsilon = EPSILON);
    }

    #[test]
    fn test_perspective_matches_nalgebra_gl() {
        let fov = utils::deg_to_rad(45.0);
        let ours = Mat4::perspective(fov, 800.0 / 600.0, 0.1, 100.0);
        let reference = Mat4::new_perspective(800.0 / 600.0, fov, 0.1, 100.0);
        assert_relative_eq!(ours, reference, epsilon = EPSILON);
    }

    #[test]
    fn test_without_translation_drops_last_column() {
        let view = Mat4::look_at(Vec3::new(5.0, -3.0, 9.0), Vec3::zeros(), Vec3::y());
        let stripped = view.without_translation();

        assert_relative_eq!(stripped[(0, 3)], 0.0);
        assert_relative_eq!(stripped[(1, 3)], 0.0);
        assert_relative_eq!(stripped[(2, 3)], 0.0);
        assert_relative_eq!(stripped[(3, 3)], 1.0);
        for row in 0..3 {
            for col in 0..3 {
                assert_relative_eq!(stripped[(row, col)], view[(row, col)]);
            }
        }
    }

    #[test]
    fn test_smoothstep_edges() {
        assert_relative_eq!(utils::smoothstep(0.0, 1.0, -0.5), 0.0);
        assert_relative_eq!(utils::smoothstep(0.0, 1.0, 0.5), 0.5);
        assert_relative_eq!(utils::smoothstep(0.0, 1.0, 2.0), 1.0);
    }

    #[test]
    fn test_rotation_axis_degrees_quarter_turn() {
        let rotation = Mat4::rotation_axis_degrees(Vec3::y(), 90.0);
        let rotated = rotation.transform_vector(&Vec3::x());
        assert_relative_eq!(rotated, Vec3::new(0.0, 0.0, -1.0), epsilon = EPSILON);
    }
}
