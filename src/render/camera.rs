//! Perspective orbit camera for the scene plot
//!
//! The plot world is Z-up (the cylinder axis and the floor grid live
//! in Z), so the camera orbits around the world Z axis: yaw spins the
//! eye around the vertical, pitch raises it towards the poles.

use std::f32::consts::PI;

use nalgebra::{Matrix4, Point3, Vector3};

/// Default eye distance, framing the [-5, 5] axis box
const DEFAULT_DISTANCE: f32 = 18.0;

/// Default view angles: slightly raised, looking in from the
/// front-right (the familiar default of 3D plot views)
const DEFAULT_YAW: f32 = -PI / 3.0;
const DEFAULT_PITCH: f32 = PI / 6.0;

/// Camera for 3D viewing
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    /// Camera position
    pub position: Point3<f32>,
    /// Point the camera is looking at
    pub target: Point3<f32>,
    /// Up vector
    pub up: Vector3<f32>,
    /// Field of view in radians
    pub fov: f32,
    /// Near clipping plane
    pub near: f32,
    /// Far clipping plane
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: orbit_position(Point3::origin(), DEFAULT_DISTANCE, DEFAULT_YAW, DEFAULT_PITCH),
            target: Point3::origin(),
            up: Vector3::z(),
            fov: PI / 4.0, // 45 degrees
            near: 0.1,
            far: 100.0,
        }
    }
}

impl Camera {
    /// Get the view matrix
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(&self.position, &self.target, &self.up)
    }

    /// Get the projection matrix (perspective)
    pub fn projection_matrix(&self, aspect: f32) -> Matrix4<f32> {
        Matrix4::new_perspective(aspect, self.fov, self.near, self.far)
    }

    /// Distance from the eye to the target
    pub fn distance(&self) -> f32 {
        (self.position - self.target).magnitude()
    }

    /// Move the eye to the given distance, keeping the direction
    pub fn set_distance(&mut self, distance: f32) {
        let distance = distance.clamp(0.5, 60.0);
        let offset = self.position - self.target;
        let dir = if offset.magnitude() > 1.0e-6 {
            offset.normalize()
        } else {
            Vector3::x()
        };
        self.position = self.target + dir * distance;
    }

    /// Orbit the camera around the target
    ///
    /// Pitch is clamped just short of the poles so the view never
    /// flips over.
    pub fn orbit(&mut self, yaw: f32, pitch: f32) {
        let offset = self.position - self.target;
        let distance = offset.magnitude();
        if distance <= 1.0e-6 {
            return;
        }

        // Spherical coordinates around world Z
        let current_yaw = offset.y.atan2(offset.x);
        let current_pitch = (offset.z / distance).asin();

        let new_yaw = current_yaw + yaw;
        let new_pitch = (current_pitch + pitch).clamp(-PI / 2.0 + 0.1, PI / 2.0 - 0.1);

        self.position = orbit_position(self.target, distance, new_yaw, new_pitch);
    }

    /// Zoom the camera (move closer/farther from target)
    pub fn zoom(&mut self, factor: f32) {
        self.set_distance(self.distance() * factor);
    }
}

/// Eye position at the given spherical coordinates around `target`
fn orbit_position(target: Point3<f32>, distance: f32, yaw: f32, pitch: f32) -> Point3<f32> {
    let cos_pitch = pitch.cos();
    target
        + Vector3::new(
            distance * cos_pitch * yaw.cos(),
            distance * cos_pitch * yaw.sin(),
            distance * pitch.sin(),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_looks_at_origin() {
        let cam = Camera::default();
        assert_eq!(cam.target, Point3::origin());
        assert!(cam.position.z > 0.0); // Raised above the floor
        assert!((cam.distance() - DEFAULT_DISTANCE).abs() < 1.0e-3);
    }

    #[test]
    fn test_target_is_in_front_of_camera() {
        let cam = Camera::default();
        let view = cam.view_matrix();
        let target_in_view = view.transform_point(&cam.target);
        // Right-handed view space looks down -Z.
        assert!(target_in_view.z < 0.0);
    }

    #[test]
    fn test_orbit_preserves_distance() {
        let mut cam = Camera::default();
        let before = cam.distance();
        cam.orbit(0.3, -0.2);
        assert!((cam.distance() - before).abs() < 1.0e-3);
    }

    #[test]
    fn test_orbit_clamps_pitch() {
        let mut cam = Camera::default();
        for _ in 0..100 {
            cam.orbit(0.0, 0.5);
        }
        // Still short of the pole: the horizontal offset never
        // collapses to zero.
        let offset = cam.position - cam.target;
        assert!(offset.x.abs() + offset.y.abs() > 1.0e-3);
    }

    #[test]
    fn test_zoom_respects_minimum_distance() {
        let mut cam = Camera::default();
        for _ in 0..50 {
            cam.zoom(0.5);
        }
        assert!(cam.distance() >= 0.5 - 1.0e-4);
    }

    #[test]
    fn test_zoom_out_is_capped() {
        let mut cam = Camera::default();
        for _ in 0..50 {
            cam.zoom(2.0);
        }
        assert!(cam.distance() <= 60.0 + 1.0e-3);
    }
}
