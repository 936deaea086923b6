/// Rec.709 luma weights for R, G and B.
pub const REC709_LUMA: [f32; 3] = [0.2126, 0.7152, 0.0722];

/// Luminance of an 8-bit RGB triple, normalized to `[0, 1]`.
#[inline(always)]
pub fn luminance(r: u8, g: u8, b: u8) -> f32 {
    (r as f32 * REC709_LUMA[0] + g as f32 * REC709_LUMA[1] + b as f32 * REC709_LUMA[2]) / 255.0
}

/// An opaque 8-bit sRGB color.
#[derive(PartialEq, Eq, Debug, Clone, Copy, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Rgb {
        Rgb { r, g, b }
    }

    pub fn luminance(&self) -> f32 {
        luminance(self.r, self.g, self.b)
    }

    /// Channel-wise linear blend towards `other`, `t` in `[0, 1]`.
    ///
    /// Rounds half away from zero, so the result never leaves the
    /// `[min, max]` box spanned by the two colors.
    #[inline(always)]
    pub fn lerp(&self, other: &Rgb, t: f32) -> [u8; 3] {
        [
            lerp_channel(self.r, other.r, t),
            lerp_channel(self.g, other.g, t),
            lerp_channel(self.b, other.b, t),
        ]
    }
}

#[inline(always)]
fn lerp_channel(from: u8, to: u8, t: f32) -> u8 {
    let from = from as f32;
    (from + t * (to as f32 - from)).round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_luma_weights_sum_to_one() {
        let sum: f32 = REC709_LUMA.iter().sum();
        assert!((sum - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_luminance_extremes() {
        assert_eq!(luminance(0, 0, 0), 0.0);
        assert!((luminance(255, 255, 255) - 1.0).abs() < 1e-5);
        assert!(luminance(0, 255, 0) > luminance(255, 0, 0));
        assert!(luminance(255, 0, 0) > luminance(0, 0, 255));
    }

    #[test]
    fn test_lerp_endpoints_and_midpoint() {
        let shadow = Rgb::new(22, 80, 39);
        let highlight = Rgb::new(249, 159, 210);
        assert_eq!(shadow.lerp(&highlight, 0.0), [22, 80, 39]);
        assert_eq!(shadow.lerp(&highlight, 1.0), [249, 159, 210]);
        assert_eq!(shadow.lerp(&highlight, 0.5), [136, 120, 125]);
    }
}
