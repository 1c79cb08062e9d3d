//! Camera for 3D views

use crate::core::types::{Mat3, Mat4, Quat, Vec3};

/// Projection parameters
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Projection {
    Perspective {
        /// Vertical field of view in radians
        fov_y: f32,
        /// Aspect ratio (width / height)
        aspect: f32,
    },
    Orthographic {
        /// Half of the view volume width
        half_width: f32,
        /// Half of the view volume height
        half_height: f32,
    },
}

/// Camera with position, rotation, and projection parameters
#[derive(Clone, Debug)]
pub struct Camera {
    /// Position (world space, or local to the mount node for attached cameras)
    pub position: Vec3,
    /// Rotation as quaternion
    pub rotation: Quat,
    /// Projection parameters
    pub projection: Projection,
    /// Near clip plane
    pub near: f32,
    /// Far clip plane
    pub far: f32,
}

impl Camera {
    /// Create a perspective camera looking down -Z
    pub fn perspective(position: Vec3, fov_y_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
            projection: Projection::Perspective {
                fov_y: fov_y_degrees.to_radians(),
                aspect,
            },
            near,
            far,
        }
    }

    /// Create an orthographic camera looking down -Z
    pub fn orthographic(position: Vec3, half_width: f32, half_height: f32, near: f32, far: f32) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
            projection: Projection::Orthographic { half_width, half_height },
            near,
            far,
        }
    }

    /// Orient the camera toward a target.
    ///
    /// When the view direction is parallel to `up`, -Z is used as the up vector.
    pub fn look_at(&mut self, target: Vec3, up: Vec3) {
        let forward = (target - self.position).normalize();
        let mut right = forward.cross(up);
        if right.length_squared() < 1e-8 {
            right = forward.cross(Vec3::NEG_Z);
        }
        let right = right.normalize();
        let up = right.cross(forward);

        self.rotation = Quat::from_mat3(&Mat3::from_cols(right, up, -forward));
    }

    /// Builder form of [`Camera::look_at`] with +Y up
    pub fn looking_at(mut self, target: Vec3) -> Self {
        self.look_at(target, Vec3::Y);
        self
    }

    /// Camera-to-parent transform
    pub fn local_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation, self.position)
    }

    /// Get view matrix (world to camera space) for a free-standing camera
    pub fn view_matrix(&self) -> Mat4 {
        let rotation_matrix = Mat4::from_quat(self.rotation.conjugate());
        let translation_matrix = Mat4::from_translation(-self.position);
        rotation_matrix * translation_matrix
    }

    /// Get projection matrix (camera to clip space)
    pub fn projection_matrix(&self) -> Mat4 {
        match self.projection {
            Projection::Perspective { fov_y, aspect } => {
                Mat4::perspective_rh(fov_y, aspect, self.near, self.far)
            }
            Projection::Orthographic { half_width, half_height } => Mat4::orthographic_rh(
                -half_width,
                half_width,
                -half_height,
                half_height,
                self.near,
                self.far,
            ),
        }
    }

    /// Get combined view-projection matrix
    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Get forward direction (negative Z in camera space)
    pub fn forward(&self) -> Vec3 {
        self.rotation * -Vec3::Z
    }

    /// Get right direction (positive X in camera space)
    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    /// Get up direction (positive Y in camera space)
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    /// Update projection for a new viewport size.
    ///
    /// Perspective cameras take the new aspect ratio; orthographic cameras
    /// take half-extents of `size / ortho_ratio`.
    pub fn resize(&mut self, width: f32, height: f32, ortho_ratio: f32) {
        match &mut self.projection {
            Projection::Perspective { aspect, .. } => *aspect = width / height,
            Projection::Orthographic { half_width, half_height } => {
                *half_width = width / ortho_ratio;
                *half_height = height / ortho_ratio;
            }
        }
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::perspective(Vec3::new(0.0, 0.0, 5.0), 60.0, 16.0 / 9.0, 0.01, 1000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directions() {
        let camera = Camera::default();

        // Default camera looks down -Z
        let forward = camera.forward();
        assert!((forward.z - (-1.0)).abs() < 0.001);

        let right = camera.right();
        assert!((right.x - 1.0).abs() < 0.001);

        let up = camera.up();
        assert!((up.y - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_view_matrix_translation() {
        let mut camera = Camera::default();
        camera.position = Vec3::new(10.0, 0.0, 0.0);

        let view = camera.view_matrix();
        // View matrix should translate world origin to (-10, 0, 0) in camera space
        let origin_in_camera = view.transform_point3(Vec3::ZERO);
        assert!((origin_in_camera.x - (-10.0)).abs() < 0.001);
    }

    #[test]
    fn test_look_at_origin() {
        let camera = Camera::default().looking_at(Vec3::ZERO);
        assert!((camera.forward() - Vec3::NEG_Z).length() < 1e-5);

        let side = Camera::orthographic(Vec3::new(120.0, 0.0, 0.0), 10.0, 10.0, 1.0, 1000.0)
            .looking_at(Vec3::ZERO);
        assert!((side.forward() - Vec3::NEG_X).length() < 1e-5);
        let origin = side.view_matrix().transform_point3(Vec3::ZERO);
        assert!((origin.z + 120.0).abs() < 1e-3);
    }

    #[test]
    fn test_look_at_straight_down_uses_fallback_up() {
        let top = Camera::orthographic(Vec3::new(0.0, 200.0, 0.0), 10.0, 10.0, 1.0, 1000.0)
            .looking_at(Vec3::ZERO);
        assert!((top.forward() - Vec3::NEG_Y).length() < 1e-5);
        assert!(top.up().is_finite());
        assert!((top.up().length() - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_resize() {
        let mut persp = Camera::perspective(Vec3::ZERO, 70.0, 1.0, 1.0, 1000.0);
        persp.resize(1600.0, 900.0, 7.0);
        assert_eq!(persp.projection, Projection::Perspective { fov_y: 70f32.to_radians(), aspect: 1600.0 / 900.0 });

        let mut ortho = Camera::orthographic(Vec3::ZERO, 1.0, 1.0, 1.0, 1000.0);
        ortho.resize(700.0, 350.0, 7.0);
        assert_eq!(ortho.projection, Projection::Orthographic { half_width: 100.0, half_height: 50.0 });
    }

    #[test]
    fn test_orthographic_projection_maps_extents() {
        let camera = Camera::orthographic(Vec3::ZERO, 100.0, 50.0, 1.0, 1000.0);
        let clip = camera.view_projection().project_point3(Vec3::new(100.0, 50.0, -10.0));
        assert!((clip.x - 1.0).abs() < 1e-5);
        assert!((clip.y - 1.0).abs() < 1e-5);
    }
}
