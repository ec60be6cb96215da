use grove_common::Color;
use serde::{Deserialize, Serialize};

/// Base fog tint, forest green.
pub const FOG_BASE: u32 = 0x228b22;

/// Slowly drifting light and fog levels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Atmosphere {
    pub sun_intensity: f32,
    pub green_intensity: f32,
    pub fog_color: Color,
}

impl Default for Atmosphere {
    fn default() -> Self {
        Self {
            sun_intensity: 1.0,
            green_intensity: 0.5,
            fog_color: Color::from_hex(FOG_BASE),
        }
    }
}

impl Atmosphere {
    pub fn at(time: f32) -> Self {
        Self {
            sun_intensity: 0.8 + (time * 0.3).sin() * 0.2,
            green_intensity: 0.5 + (time * 0.5).sin() * 0.3,
            fog_color: Color::from_hex(FOG_BASE).offset_hsl((time * 0.2).sin() * 0.1, 0.0, 0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn intensities_oscillate_in_range() {
        for i in 0..1000 {
            let a = Atmosphere::at(i as f32 * 0.1);
            assert!((0.6 - 1e-6..=1.0 + 1e-6).contains(&a.sun_intensity));
            assert!((0.2 - 1e-6..=0.8 + 1e-6).contains(&a.green_intensity));
        }
    }

    #[test]
    fn fog_starts_at_base_colour() {
        let a = Atmosphere::at(0.0);
        let base = Color::from_hex(FOG_BASE);
        assert_abs_diff_eq!(a.fog_color.r, base.r, epsilon = 1e-5);
        assert_abs_diff_eq!(a.fog_color.g, base.g, epsilon = 1e-5);
        assert_abs_diff_eq!(a.fog_color.b, base.b, epsilon = 1e-5);
        assert_abs_diff_eq!(a.sun_intensity, 0.8);
    }

    #[test]
    fn fog_hue_drifts() {
        let a = Atmosphere::at(7.0);
        assert_ne!(a.fog_color, Color::from_hex(FOG_BASE));
    }
}
