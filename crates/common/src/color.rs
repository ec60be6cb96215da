use serde::{Deserialize, Serialize};

/// RGB colour with channels in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build from a packed `0xRRGGBB` value.
    pub fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as f32 / 255.0,
            g: ((hex >> 8) & 0xff) as f32 / 255.0,
            b: (hex & 0xff) as f32 / 255.0,
        }
    }

    pub fn to_rgba(self, alpha: f32) -> [f32; 4] {
        [self.r, self.g, self.b, alpha]
    }

    pub fn scaled(self, k: f32) -> Self {
        Self::rgb(self.r * k, self.g * k, self.b * k)
    }

    /// Hue, saturation and lightness, each in `[0, 1]`.
    pub fn to_hsl(self) -> (f32, f32, f32) {
        let max = self.r.max(self.g).max(self.b);
        let min = self.r.min(self.g).min(self.b);
        let lightness = (min + max) / 2.0;

        if max == min {
            return (0.0, 0.0, lightness);
        }

        let delta = max - min;
        let saturation = if lightness <= 0.5 {
            delta / (max + min)
        } else {
            delta / (2.0 - max - min)
        };
        let hue = if max == self.r {
            (self.g - self.b) / delta + if self.g < self.b { 6.0 } else { 0.0 }
        } else if max == self.g {
            (self.b - self.r) / delta + 2.0
        } else {
            (self.r - self.g) / delta + 4.0
        };
        (hue / 6.0, saturation, lightness)
    }

    /// Inverse of [`Color::to_hsl`]. Hue wraps, saturation and lightness clamp.
    pub fn from_hsl(h: f32, s: f32, l: f32) -> Self {
        let h = h.rem_euclid(1.0);
        let s = s.clamp(0.0, 1.0);
        let l = l.clamp(0.0, 1.0);

        if s == 0.0 {
            return Self::rgb(l, l, l);
        }

        let p = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let q = 2.0 * l - p;
        Self::rgb(
            hue_to_rgb(q, p, h + 1.0 / 3.0),
            hue_to_rgb(q, p, h),
            hue_to_rgb(q, p, h - 1.0 / 3.0),
        )
    }

    /// Shift hue, saturation and lightness by the given amounts.
    pub fn offset_hsl(self, dh: f32, ds: f32, dl: f32) -> Self {
        let (h, s, l) = self.to_hsl();
        Self::from_hsl(h + dh, s + ds, l + dl)
    }
}

fn hue_to_rgb(p: f32, q: f32, mut t: f32) -> f32 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * 6.0 * (2.0 / 3.0 - t)
    } else {
        p
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn hex_unpacks_channels() {
        let c = Color::from_hex(0xff8000);
        assert_eq!(c.r, 1.0);
        assert_abs_diff_eq!(c.g, 128.0 / 255.0);
        assert_eq!(c.b, 0.0);
    }

    #[test]
    fn hsl_round_trip_forest_green() {
        let c = Color::from_hex(0x228b22);
        let (h, s, l) = c.to_hsl();
        let back = Color::from_hsl(h, s, l);
        assert_abs_diff_eq!(back.r, c.r, epsilon = 1e-5);
        assert_abs_diff_eq!(back.g, c.g, epsilon = 1e-5);
        assert_abs_diff_eq!(back.b, c.b, epsilon = 1e-5);
    }

    #[test]
    fn grey_has_no_saturation() {
        let (_, s, l) = Color::rgb(0.4, 0.4, 0.4).to_hsl();
        assert_eq!(s, 0.0);
        assert_abs_diff_eq!(l, 0.4);
    }

    #[test]
    fn hue_offset_wraps_around() {
        let red = Color::from_hex(0xff0000);
        let shifted = red.offset_hsl(-1.0 / 3.0, 0.0, 0.0);
        // One third backwards from red lands on blue.
        assert_abs_diff_eq!(shifted.b, 1.0, epsilon = 1e-5);
        assert_abs_diff_eq!(shifted.r, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn zero_offset_is_identity() {
        let c = Color::from_hex(0x228b22);
        let same = c.offset_hsl(0.0, 0.0, 0.0);
        assert_abs_diff_eq!(same.g, c.g, epsilon = 1e-5);
    }
}
