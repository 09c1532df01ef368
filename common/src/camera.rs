//! Perspective camera orbiting a target point

use glam::{Mat4, Vec3};

/// 3D perspective camera with orbital controls
///
/// The eye sits on a sphere of radius `distance` around `target`, placed by
/// `yaw` (around +Y) and `pitch` (above the XZ plane). With both at zero the
/// camera looks down -Z from `target + (0, 0, distance)`.
#[derive(Debug, Clone)]
pub struct Camera3D {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    /// Vertical field of view in radians
    pub fov: f32,
    pub aspect_ratio: f32,
    pub near: f32,
    pub far: f32,
    // Orbital parameters
    pub distance: f32,
    pub yaw: f32,
    pub pitch: f32,
}

impl Camera3D {
    pub fn new(aspect_ratio: f32) -> Self {
        let mut camera = Self {
            position: Vec3::ZERO,
            target: Vec3::ZERO,
            up: Vec3::Y,
            fov: 45.0f32.to_radians(),
            aspect_ratio,
            near: 0.1,
            far: 1000.0,
            distance: 10.0,
            yaw: 0.0,
            pitch: 0.0,
        };
        camera.update_orbital();
        camera
    }

    pub fn with_fov_degrees(mut self, degrees: f32) -> Self {
        self.fov = degrees.to_radians();
        self
    }

    pub fn with_clip_planes(mut self, near: f32, far: f32) -> Self {
        self.near = near;
        self.far = far;
        self
    }

    pub fn at_distance(mut self, distance: f32) -> Self {
        self.distance = distance;
        self.update_orbital();
        self
    }

    /// Update camera position based on orbital parameters
    pub fn update_orbital(&mut self) {
        self.position = self.target
            + Vec3::new(
                self.distance * self.pitch.cos() * self.yaw.sin(),
                self.distance * self.pitch.sin(),
                self.distance * self.pitch.cos() * self.yaw.cos(),
            );
    }

    /// Orbit the camera around the target
    pub fn orbit(&mut self, delta_yaw: f32, delta_pitch: f32) {
        self.yaw += delta_yaw;
        self.pitch = (self.pitch + delta_pitch).clamp(-1.5, 1.5);
        self.update_orbital();
    }

    /// Zoom in/out, never closer than one unit
    pub fn zoom(&mut self, delta: f32) {
        self.distance = (self.distance - delta).max(1.0);
        self.update_orbital();
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect_ratio, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn update_aspect_ratio(&mut self, aspect_ratio: f32) {
        self.aspect_ratio = aspect_ratio;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_pose_sits_on_positive_z() {
        let camera = Camera3D::new(1.0).at_distance(12.0);
        assert!((camera.position - Vec3::new(0.0, 0.0, 12.0)).length() < 1e-5);
    }

    #[test]
    fn orbit_keeps_distance_and_clamps_pitch() {
        let mut camera = Camera3D::new(1.0).at_distance(12.0);
        camera.orbit(0.7, 10.0);
        assert_eq!(camera.pitch, 1.5);
        assert!((camera.position.length() - 12.0).abs() < 1e-4);
    }

    #[test]
    fn zoom_stops_at_one_unit() {
        let mut camera = Camera3D::new(1.0).at_distance(3.0);
        camera.zoom(50.0);
        assert_eq!(camera.distance, 1.0);
    }

    #[test]
    fn builders_set_lens() {
        let camera = Camera3D::new(2.0)
            .with_fov_degrees(75.0)
            .with_clip_planes(0.1, 1000.0);
        assert!((camera.fov - 75.0f32.to_radians()).abs() < 1e-6);
        assert_eq!((camera.near, camera.far), (0.1, 1000.0));
        assert_eq!(camera.aspect_ratio, 2.0);
    }
}
