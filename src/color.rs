/// Normalized linear RGB color.
///
/// Components are floats in [0, 1]; 0 is black, 1 is the channel maximum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearRgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl LinearRgb {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Normalize an integer RGB sample into [0, 1] per channel.
    pub fn from_rgb8(c: rgb::RGB<u8>) -> Self {
        Self {
            r: c.r as f32 / 255.0,
            g: c.g as f32 / 255.0,
            b: c.b as f32 / 255.0,
        }
    }

    /// Convert back to integer RGB, rounding and clamping to [0, 255].
    pub fn to_rgb8(self) -> rgb::RGB<u8> {
        let channel = |c: f32| (c * 255.0).round().clamp(0.0, 255.0) as u8;
        rgb::RGB {
            r: channel(self.r),
            g: channel(self.g),
            b: channel(self.b),
        }
    }

    /// Squared Euclidean distance (sum of squared per-channel differences).
    /// Monotonic with true distance, so nearest-neighbor scans skip the sqrt.
    pub fn distance_sq(self, other: Self) -> f32 {
        let dr = self.r - other.r;
        let dg = self.g - other.g;
        let db = self.b - other.b;
        dr * dr + dg * dg + db * db
    }

    /// Scale this color linearly toward black for one brightness step.
    ///
    /// `level` ranges over [1, levels]; `level == levels` is full brightness
    /// and the scaling is an exact no-op.
    pub fn level_variant(self, level: u32, levels: u32) -> Self {
        let k = level as f32 / levels as f32;
        Self {
            r: self.r * k,
            g: self.g * k,
            b: self.b * k,
        }
    }
}
