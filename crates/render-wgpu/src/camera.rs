use glam::{Mat4, Vec3};
use grove_render::{FOLLOW_OFFSET, LOOK_HEIGHT, RenderView};

/// Fraction of the remaining distance closed per update.
pub const FOLLOW_LERP: f32 = 0.1;

/// Perspective camera that trails a target from a fixed world-space offset.
///
/// Camera motion lives outside the simulation and never feeds back into it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub target: Vec3,
    pub fov_degrees: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: FOLLOW_OFFSET,
            target: Vec3::ZERO,
            fov_degrees: 75.0,
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl Camera {
    pub fn looking_at(position: Vec3, target: Vec3) -> Self {
        Self {
            position,
            target,
            ..Self::default()
        }
    }

    /// Ease toward the follow position for `subject` and aim just above it.
    pub fn follow(&mut self, subject: Vec3) {
        let desired = subject + FOLLOW_OFFSET;
        self.position = self.position.lerp(desired, FOLLOW_LERP);
        self.target = subject + Vec3::Y * LOOK_HEIGHT;
    }

    /// Jump straight to the follow position, e.g. after a restart.
    pub fn snap_to(&mut self, subject: Vec3) {
        self.position = subject + FOLLOW_OFFSET;
        self.target = subject + Vec3::Y * LOOK_HEIGHT;
    }

    /// Circle `target` at `radius`, `height` above it, at angle `angle`.
    pub fn orbit(&mut self, target: Vec3, radius: f32, height: f32, angle: f32) {
        self.target = target;
        self.position = target + Vec3::new(angle.sin() * radius, height, angle.cos() * radius);
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_degrees.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn render_view(&self) -> RenderView {
        RenderView {
            eye: self.position,
            target: self.target,
            fov_degrees: self.fov_degrees,
            near: self.near,
            far: self.far,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn default_matches_follow_start() {
        let cam = Camera::default();
        assert_eq!(cam.position, Vec3::new(0.0, 8.0, -12.0));
        assert_eq!(cam.fov_degrees, 75.0);
        assert!(!cam.view_projection().is_nan());
    }

    #[test]
    fn follow_closes_a_tenth_of_the_gap() {
        let mut cam = Camera::default();
        cam.follow(Vec3::new(10.0, 0.0, 0.0));
        assert_abs_diff_eq!(cam.position.x, 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(cam.position.y, 8.0, epsilon = 1e-6);
        assert_eq!(cam.target, Vec3::new(10.0, 1.0, 0.0));
    }

    #[test]
    fn follow_converges() {
        let mut cam = Camera::default();
        let hippo = Vec3::new(5.0, 0.0, 5.0);
        for _ in 0..200 {
            cam.follow(hippo);
        }
        assert!(cam.position.distance(hippo + FOLLOW_OFFSET) < 1e-3);
    }

    #[test]
    fn resize_updates_aspect_and_ignores_zero() {
        let mut cam = Camera::default();
        cam.resize(800, 400);
        assert_eq!(cam.aspect, 2.0);
        cam.resize(0, 400);
        assert_eq!(cam.aspect, 2.0);
    }

    #[test]
    fn target_projects_to_screen_centre() {
        let mut cam = Camera::default();
        cam.snap_to(Vec3::new(3.0, 0.0, -4.0));
        let clip = cam.view_projection() * cam.target.extend(1.0);
        assert_abs_diff_eq!(clip.x / clip.w, 0.0, epsilon = 1e-5);
        assert_abs_diff_eq!(clip.y / clip.w, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn orbit_keeps_radius() {
        let mut cam = Camera::default();
        cam.orbit(Vec3::ZERO, 4.0, 2.0, 1.3);
        let flat = Vec3::new(cam.position.x, 0.0, cam.position.z);
        assert_abs_diff_eq!(flat.length(), 4.0, epsilon = 1e-5);
        assert_eq!(cam.render_view().eye, cam.position);
    }
}
