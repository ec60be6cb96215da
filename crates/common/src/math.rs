use glam::Vec3;

pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Unit vector an object faces after turning `yaw` radians from +Z.
pub fn yaw_forward(yaw: f32) -> Vec3 {
    Vec3::new(yaw.sin(), 0.0, yaw.cos())
}

/// Heading (yaw) that faces along `dir` on the XZ plane.
pub fn heading(dir: Vec3) -> f32 {
    dir.x.atan2(dir.z)
}

/// Direction from `from` to `to` flattened onto the XZ plane, or zero when
/// the two points share a column.
pub fn planar_direction(from: Vec3, to: Vec3) -> Vec3 {
    let mut d = to - from;
    d.y = 0.0;
    d.normalize_or_zero()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn lerp_endpoints() {
        assert_eq!(lerp(2.0, 4.0, 0.0), 2.0);
        assert_eq!(lerp(2.0, 4.0, 1.0), 4.0);
        assert_eq!(lerp(2.0, 4.0, 0.5), 3.0);
    }

    #[test]
    fn heading_inverts_forward() {
        for yaw in [-2.0_f32, -0.5, 0.0, 1.0, 3.0] {
            assert_abs_diff_eq!(heading(yaw_forward(yaw)), yaw, epsilon = 1e-5);
        }
    }

    #[test]
    fn planar_direction_ignores_height() {
        let d = planar_direction(Vec3::new(0.0, 5.0, 0.0), Vec3::new(3.0, -2.0, 4.0));
        assert_eq!(d.y, 0.0);
        assert_abs_diff_eq!(d.length(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn planar_direction_degenerate_is_zero() {
        let d = planar_direction(Vec3::new(1.0, 0.0, 1.0), Vec3::new(1.0, 3.0, 1.0));
        assert_eq!(d, Vec3::ZERO);
    }
}
