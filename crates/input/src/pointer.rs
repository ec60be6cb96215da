use glam::Vec2;

/// Pointer position in normalised device coordinates: x and y in [-1, 1],
/// y pointing up.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Pointer {
    pub ndc: Vec2,
}

impl Pointer {
    /// Update from a pixel position inside a `width` x `height` surface.
    pub fn set_pixel(&mut self, x: f64, y: f64, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        let nx = (x / width as f64) * 2.0 - 1.0;
        let ny = -(y / height as f64) * 2.0 + 1.0;
        self.ndc = Vec2::new(nx as f32, ny as f32);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn corners_map_to_ndc() {
        let mut p = Pointer::default();
        p.set_pixel(0.0, 0.0, 800, 600);
        assert_eq!(p.ndc, Vec2::new(-1.0, 1.0));
        p.set_pixel(800.0, 600.0, 800, 600);
        assert_eq!(p.ndc, Vec2::new(1.0, -1.0));
        p.set_pixel(400.0, 300.0, 800, 600);
        assert_abs_diff_eq!(p.ndc.x, 0.0);
        assert_abs_diff_eq!(p.ndc.y, 0.0);
    }

    #[test]
    fn zero_sized_surface_is_ignored() {
        let mut p = Pointer::default();
        p.set_pixel(10.0, 10.0, 0, 600);
        assert_eq!(p.ndc, Vec2::ZERO);
    }
}
