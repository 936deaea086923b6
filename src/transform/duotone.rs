use duotoner_macros::simd_targets;

use crate::{
    color_palette::ColorPair,
    texture::{Shape, TextureMutSlice, TextureRef, TextureSlice},
    transform::{
        curve::enhance, luminance::LuminanceRange, luminance::Normalizer, strategy::Strategy,
        traits::TextureTransform,
    },
    utils::pixel::luminance,
};

/// Continuous-tone duotone: every pixel becomes a blend of shadow and
/// highlight weighted by its stretched, S-curved luminance.
///
/// Reads RGBA8, writes RGBA8 of the same shape. Alpha is copied untouched.
/// Luminance is recomputed from the source pixel, only the global range is
/// shared between pixels.
#[derive(Debug, Clone)]
pub struct DuotoneTransform {
    colors: ColorPair,
    normalizer: Normalizer,
    strategy: Strategy,
}

impl DuotoneTransform {
    pub fn new(colors: ColorPair, range: LuminanceRange, strategy: Strategy) -> Self {
        Self {
            colors,
            normalizer: range.normalizer(),
            strategy,
        }
    }

    /// Blend factor for one luminance sample.
    #[inline(always)]
    pub fn tone(&self, luminance: f32) -> f32 {
        enhance(self.normalizer.apply(luminance))
    }
}

impl TextureTransform for DuotoneTransform {
    type Input = u8;
    type Output = u8;

    fn apply<'i, 'o>(
        &mut self,
        input: TextureSlice<'i, Self::Input>,
        mut output: TextureMutSlice<'o, Self::Output>,
    ) -> (
        TextureSlice<'i, Self::Input>,
        TextureMutSlice<'o, Self::Output>,
    ) {
        debug_assert_eq!(input.shape(), output.shape());
        debug_assert_eq!(input.planes(), 4);

        let row_len = input.row_len();
        let in_buf = input.as_ref();
        let colors = &self.colors;
        let normalizer = self.normalizer;

        self.strategy
            .for_each_row(output.as_mut(), row_len, |y, out_row| {
                let in_row = &in_buf[y * row_len..(y + 1) * row_len];
                duotone_row(in_row, out_row, colors, normalizer);
            });

        (input, output)
    }

    fn prepare(&mut self, _: Shape, _: Shape) {}

    fn name(&self) -> &'static str {
        "duotone"
    }
}

#[simd_targets]
fn duotone_row(in_row: &[u8], out_row: &mut [u8], colors: &ColorPair, normalizer: Normalizer) {
    out_row
        .chunks_exact_mut(4)
        .zip(in_row.chunks_exact(4))
        .for_each(|(out_pixel, in_pixel)| {
            let t = enhance(normalizer.apply(luminance(in_pixel[0], in_pixel[1], in_pixel[2])));
            let [r, g, b] = colors.shadow.lerp(&colors.highlight, t);
            out_pixel[0] = r;
            out_pixel[1] = g;
            out_pixel[2] = b;
            out_pixel[3] = in_pixel[3];
        });
}
