use duotoner_macros::simd_targets;

use crate::{
    halftone::params::{LevelParams, RasterParams},
    texture::{Shape, TextureMutSlice, TextureRef, TextureSlice},
    transform::{
        curve::enhance,
        luminance::{LuminanceRange, Normalizer},
        strategy::Strategy,
        traits::TextureTransform,
    },
};

/// Per-sample tone chain that turns luminance into dot coverage.
///
/// Order matters: stretch, brightness, S-curve, contrast power, level clip,
/// gamma, lift. The result is kept as `f32` in `[0, 255]`, it is never
/// quantized before the screen reads it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelAdjust {
    normalizer: Normalizer,
    brightness: f32,
    inv_contrast: f32,
    shadows: f32,
    clip_span: f32,
    inv_gamma: f32,
    lift_gain: f32,
    lift_offset: f32,
}

impl LevelAdjust {
    /// `params` must already be validated.
    pub fn new(range: LuminanceRange, params: &RasterParams) -> Self {
        let LevelParams {
            shadows,
            highlights,
            gamma,
            lift_gain,
            lift_offset,
        } = params.levels;

        Self {
            normalizer: range.normalizer(),
            brightness: params.brightness,
            inv_contrast: params.contrast.recip(),
            shadows,
            clip_span: highlights - shadows,
            inv_gamma: gamma.recip(),
            lift_gain,
            lift_offset,
        }
    }

    #[inline(always)]
    pub fn adjust(&self, luminance: f32) -> f32 {
        let v = self.normalizer.apply(luminance);
        let v = (v * self.brightness).clamp(0.0, 1.0);
        let v = enhance(v).powf(self.inv_contrast);
        let v = ((v - self.shadows) / self.clip_span).clamp(0.0, 1.0);
        let v = v.powf(self.inv_gamma);
        let v = (v * self.lift_gain + self.lift_offset).clamp(0.0, 1.0);
        v * 255.0
    }
}

/// Luminance field (1 plane) to adjusted grayscale (1 plane).
#[derive(Debug, Clone)]
pub struct LevelsTransform {
    adjust: LevelAdjust,
    strategy: Strategy,
}

impl LevelsTransform {
    pub fn new(adjust: LevelAdjust, strategy: Strategy) -> Self {
        Self { adjust, strategy }
    }
}

impl TextureTransform for LevelsTransform {
    type Input = f32;
    type Output = f32;

    fn apply<'i, 'o>(
        &mut self,
        input: TextureSlice<'i, Self::Input>,
        mut output: TextureMutSlice<'o, Self::Output>,
    ) -> (
        TextureSlice<'i, Self::Input>,
        TextureMutSlice<'o, Self::Output>,
    ) {
        debug_assert_eq!(input.shape(), output.shape());

        let row_len = input.row_len();
        let in_buf = input.as_ref();
        let adjust = &self.adjust;

        self.strategy
            .for_each_row(output.as_mut(), row_len, |y, out_row| {
                levels_row(&in_buf[y * row_len..(y + 1) * row_len], out_row, adjust);
            });

        (input, output)
    }

    fn prepare(&mut self, _: Shape, _: Shape) {}

    fn name(&self) -> &'static str {
        "levels"
    }
}

#[simd_targets]
fn levels_row(in_row: &[f32], out_row: &mut [f32], adjust: &LevelAdjust) {
    out_row
        .iter_mut()
        .zip(in_row)
        .for_each(|(out, luminance)| *out = adjust.adjust(*luminance));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{halftone::params::RasterStyle, texture::Texture};

    fn unit_adjust(params: &RasterParams) -> LevelAdjust {
        LevelAdjust::new(LuminanceRange::new(0.0, 1.0), params)
    }

    #[test]
    fn test_black_stays_in_shadow() {
        let adjust = unit_adjust(&RasterParams::default());
        // lift keeps a floor of 0.05 * 255
        assert!((adjust.adjust(0.0) - 0.05 * 255.0).abs() < 1e-3);
    }

    #[test]
    fn test_white_saturates() {
        let adjust = unit_adjust(&RasterParams::default());
        assert_eq!(adjust.adjust(1.0), 255.0);
    }

    #[test]
    fn test_output_is_monotonic_and_bounded() {
        for style in RasterStyle::ALL {
            let adjust = unit_adjust(&RasterParams::with_style(style));
            let samples: Vec<f32> = (0..=500).map(|i| adjust.adjust(i as f32 / 500.0)).collect();
            assert!(samples.iter().all(|v| (0.0..=255.0).contains(v)));
            for pair in samples.windows(2) {
                assert!(pair[1] >= pair[0], "{style}: {} then {}", pair[0], pair[1]);
            }
        }
    }

    #[test]
    fn test_brightness_lifts_midtones() {
        let dim = unit_adjust(&RasterParams {
            brightness: 1.0,
            ..Default::default()
        });
        let bright = unit_adjust(&RasterParams::default());
        assert!(bright.adjust(0.4) > dim.adjust(0.4));
    }

    #[test]
    fn test_screen_print_clips_harder() {
        let soft = unit_adjust(&RasterParams::with_style(RasterStyle::Dots));
        let hard = unit_adjust(&RasterParams::with_style(RasterStyle::Blocks));
        // darkest tones are crushed to the lift floor sooner
        assert!(hard.adjust(0.1) <= soft.adjust(0.1));
        assert!((hard.adjust(0.1) - 0.05 * 255.0).abs() < 1e-3);
    }

    #[test]
    fn test_transform_matches_scalar_adjust() {
        let samples: Vec<f32> = (0..12).map(|i| i as f32 / 11.0).collect();
        let input = Texture::from_slice(4, 3, 1, &samples);
        let mut output = Texture::<f32>::new(4, 3, 1);
        let adjust = unit_adjust(&RasterParams::default());

        LevelsTransform::new(adjust, Strategy::Seq)
            .once(input.as_texture_slice(), output.as_texture_mut_slice());

        for (out, luminance) in output.as_ref().iter().zip(&samples) {
            assert_eq!(*out, adjust.adjust(*luminance));
        }
    }
}
