/// Largest width or height the engine renders at.
pub const MAX_DIMENSION: u32 = 3000;

/// Fit `(width, height)` inside [MAX_DIMENSION] keeping the aspect ratio.
///
/// Dimensions already within bounds come back unchanged. Scaled values are
/// rounded to the nearest integer and never drop below one pixel.
pub fn normalize_dimensions(width: u32, height: u32) -> (u32, u32) {
    if width <= MAX_DIMENSION && height <= MAX_DIMENSION {
        return (width, height);
    }

    let bound = MAX_DIMENSION as f64;
    let scale = (bound / width as f64).min(bound / height as f64);
    let fit = |side: u32| ((side as f64 * scale).round() as u32).clamp(1, MAX_DIMENSION);

    (fit(width), fit(height))
}
