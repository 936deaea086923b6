/// Exponent of the S-curve.
pub const CURVE_EXPONENT: f32 = 1.8;

/// Odd-symmetric contrast S-curve around `0.5`.
///
/// Compresses mid-tones and pushes values towards the extremes. Expects an
/// already auto-contrast normalized value in `[0, 1]`.
#[inline(always)]
pub fn enhance(value: f32) -> f32 {
    if value < 0.5 {
        (value * 2.0).powf(CURVE_EXPONENT) / 2.0
    } else {
        1.0 - ((1.0 - value) * 2.0).powf(CURVE_EXPONENT) / 2.0
    }
}
