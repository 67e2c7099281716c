//! View camera.
//!
//! The camera is built in one of two coordinate modes and keeps that mode for
//! its lifetime. Updates issued in the other mode leave the stored vectors
//! alone, still refresh the view matrix, and report the mismatch.

use glam::{Mat4, Vec3};

pub use crate::error::CameraError;

/// Vertical field of view used by [`projection`].
pub const FOV_Y_DEGREES: f32 = 45.0;
/// Near clip plane.
pub const Z_NEAR: f32 = 0.1;
/// Far clip plane.
pub const Z_FAR: f32 = 100.0;

/// How the camera position is specified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraMode {
    /// Position derived from radius and two angles around the target.
    Spherical,
    /// Position, target and up given directly.
    Cartesian,
}

/// Look-at camera.
#[derive(Debug, Clone)]
pub struct Camera {
    position: Vec3,
    target: Vec3,
    up: Vec3,
    view_matrix: Mat4,
    mode: CameraMode,
}

impl Camera {
    /// Spherical camera orbiting `target`.
    ///
    /// `theta` is measured from the +Y axis, `phi` around it from +X.
    pub fn spherical(radius: f32, theta: f32, phi: f32, target: Vec3, up: Vec3) -> Self {
        let mut camera = Self {
            position: Vec3::ZERO,
            target,
            up,
            view_matrix: Mat4::IDENTITY,
            mode: CameraMode::Spherical,
        };
        // Mode matches, cannot fail
        let _ = camera.update_spherical(radius, theta, phi);
        camera
    }

    /// Cartesian camera at `position` looking at `target`.
    pub fn cartesian(position: Vec3, target: Vec3, up: Vec3) -> Self {
        let mut camera = Self {
            position,
            target,
            up,
            view_matrix: Mat4::IDENTITY,
            mode: CameraMode::Cartesian,
        };
        camera.refresh_view();
        camera
    }

    /// Move a spherical camera.
    pub fn update_spherical(
        &mut self,
        radius: f32,
        theta: f32,
        phi: f32,
    ) -> Result<(), CameraError> {
        let result = self.check_mode(CameraMode::Spherical);
        if result.is_ok() {
            self.position = spherical_to_cartesian(radius, theta, phi);
        }
        self.refresh_view();
        result
    }

    /// Move a cartesian camera.
    pub fn update_cartesian(
        &mut self,
        position: Vec3,
        target: Vec3,
        up: Vec3,
    ) -> Result<(), CameraError> {
        let result = self.check_mode(CameraMode::Cartesian);
        if result.is_ok() {
            self.position = position;
            self.target = target;
            self.up = up;
        }
        self.refresh_view();
        result
    }

    fn check_mode(&self, expected: CameraMode) -> Result<(), CameraError> {
        if self.mode == expected {
            Ok(())
        } else {
            Err(CameraError::WrongMode {
                expected,
                actual: self.mode,
            })
        }
    }

    fn refresh_view(&mut self) {
        self.view_matrix = Mat4::look_at_rh(self.position, self.target, self.up);
    }

    /// Coordinate mode chosen at construction.
    pub fn mode(&self) -> CameraMode {
        self.mode
    }

    /// Eye position in world space.
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Point the camera looks at.
    pub fn target(&self) -> Vec3 {
        self.target
    }

    /// Up vector used for the look-at.
    pub fn up(&self) -> Vec3 {
        self.up
    }

    /// Current view matrix.
    pub fn view_matrix(&self) -> Mat4 {
        self.view_matrix
    }

    /// Combined projection × view for the given aspect ratio.
    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        projection(aspect) * self.view_matrix
    }
}

/// Perspective projection with the default field of view and clip planes.
pub fn projection(aspect: f32) -> Mat4 {
    Mat4::perspective_rh(FOV_Y_DEGREES.to_radians(), aspect, Z_NEAR, Z_FAR)
}

fn spherical_to_cartesian(radius: f32, theta: f32, phi: f32) -> Vec3 {
    Vec3::new(
        radius * theta.sin() * phi.cos(),
        radius * theta.cos(),
        radius * theta.sin() * phi.sin(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_spherical_position() {
        let camera = Camera::spherical(10.0, FRAC_PI_2, 0.0, Vec3::ZERO, Vec3::Y);
        let pos = camera.position();
        assert!((pos.x - 10.0).abs() < 1e-4);
        assert!(pos.y.abs() < 1e-4);
        assert!(pos.z.abs() < 1e-4);
        assert_eq!(camera.mode(), CameraMode::Spherical);
    }

    #[test]
    fn test_update_is_idempotent() {
        let mut camera = Camera::spherical(10.0, 1.0, 0.5, Vec3::ZERO, Vec3::Y);
        camera.update_spherical(8.0, 0.3, 1.2).unwrap();
        let first = camera.view_matrix();
        camera.update_spherical(8.0, 0.3, 1.2).unwrap();
        assert_eq!(first, camera.view_matrix());
    }

    #[test]
    fn test_cartesian_update_in_spherical_mode() {
        let mut camera = Camera::spherical(10.0, 1.0, 0.5, Vec3::ZERO, Vec3::Y);
        let (position, target, up) = (camera.position(), camera.target(), camera.up());
        let expected_view = Mat4::look_at_rh(position, target, up);

        let result = camera.update_cartesian(Vec3::new(1.0, 2.0, 3.0), Vec3::X, Vec3::Z);

        assert_eq!(
            result,
            Err(CameraError::WrongMode {
                expected: CameraMode::Cartesian,
                actual: CameraMode::Spherical,
            })
        );
        assert_eq!(camera.position(), position);
        assert_eq!(camera.target(), target);
        assert_eq!(camera.up(), up);
        assert_eq!(camera.view_matrix(), expected_view);
    }

    #[test]
    fn test_spherical_update_in_cartesian_mode() {
        let position = Vec3::new(5.0, 5.0, 10.0);
        let mut camera = Camera::cartesian(position, Vec3::ZERO, Vec3::Y);
        assert!(camera.update_spherical(3.0, 0.2, 0.2).is_err());
        assert_eq!(camera.position(), position);
    }

    #[test]
    fn test_cartesian_update() {
        let mut camera = Camera::cartesian(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y);
        camera
            .update_cartesian(Vec3::new(0.0, 3.0, 4.0), Vec3::ONE, Vec3::Y)
            .unwrap();
        assert_eq!(camera.position(), Vec3::new(0.0, 3.0, 4.0));
        assert_eq!(camera.target(), Vec3::ONE);

        // The target lands on the view axis
        let target_in_view = camera.view_matrix().transform_point3(Vec3::ONE);
        assert!(target_in_view.x.abs() < 1e-4);
        assert!(target_in_view.y.abs() < 1e-4);
        assert!(target_in_view.z < 0.0);
    }
}
