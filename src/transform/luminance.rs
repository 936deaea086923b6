use duotoner_macros::simd_targets;
use itertools::{Itertools, MinMaxResult};
use rayon::prelude::*;

use crate::{
    texture::{Shape, Shape2D, Texture, TextureMutSlice, TextureRef, TextureSlice},
    transform::{strategy::Strategy, traits::TextureTransform},
    utils::pixel::luminance,
};

/// Observed `[min, max]` luminance of an image, both in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LuminanceRange {
    pub min: f32,
    pub max: f32,
}

impl LuminanceRange {
    /// Identity for [LuminanceRange::merge].
    const EMPTY: LuminanceRange = LuminanceRange {
        min: f32::INFINITY,
        max: f32::NEG_INFINITY,
    };

    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Flat image (or nothing observed): there is no spread to stretch.
    pub fn is_degenerate(&self) -> bool {
        self.max <= self.min
    }

    pub fn merge(self, other: LuminanceRange) -> LuminanceRange {
        LuminanceRange {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Auto-contrast stretch for this range.
    ///
    /// A degenerate range falls back to the unit range `[0, 1]`, which keeps
    /// a flat image at its absolute tone instead of dividing by zero.
    pub fn normalizer(&self) -> Normalizer {
        if self.is_degenerate() {
            Normalizer {
                offset: 0.0,
                span: 1.0,
            }
        } else {
            Normalizer {
                offset: self.min,
                span: self.max - self.min,
            }
        }
    }

    fn of_row(row: &[f32]) -> LuminanceRange {
        match row.iter().copied().minmax() {
            MinMaxResult::NoElements => LuminanceRange::EMPTY,
            MinMaxResult::OneElement(value) => LuminanceRange::new(value, value),
            MinMaxResult::MinMax(min, max) => LuminanceRange::new(min, max),
        }
    }
}

/// Maps a luminance sample into `[0, 1]` relative to an image's own range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalizer {
    offset: f32,
    span: f32,
}

impl Normalizer {
    #[inline(always)]
    pub fn apply(&self, luminance: f32) -> f32 {
        ((luminance - self.offset) / self.span).clamp(0.0, 1.0)
    }
}

/// Per-pixel luminance of an image plus its global range.
#[derive(Debug, Clone)]
pub struct LuminanceField {
    samples: Texture<f32>,
    range: LuminanceRange,
}

impl LuminanceField {
    pub fn samples(&self) -> &Texture<f32> {
        &self.samples
    }

    pub fn range(&self) -> LuminanceRange {
        self.range
    }

    pub fn shape_2d(&self) -> Shape2D {
        self.samples.shape_2d()
    }

    pub fn as_texture_slice(&self) -> TextureSlice<'_, f32> {
        self.samples.as_texture_slice()
    }
}

/// Rec.709 luminance extraction with a running min/max.
///
/// The range is collected per row while the row is still hot in cache and
/// folded across rows, so the image is read exactly once.
#[derive(Debug, Clone)]
pub struct LuminanceAnalyzer {
    strategy: Strategy,
    range: Option<LuminanceRange>,
}

impl LuminanceAnalyzer {
    pub fn new(strategy: Strategy) -> Self {
        Self {
            strategy,
            range: None,
        }
    }

    /// Range measured by the last [TextureTransform::apply].
    pub fn range(&self) -> Option<LuminanceRange> {
        self.range
    }

    /// Allocate a luminance field for `image` (RGB or RGBA) and fill it.
    pub fn analyze(mut self, image: TextureSlice<'_, u8>) -> LuminanceField {
        let mut samples = Texture::<f32>::new(image.width(), image.height(), 1);
        self.prepare(image.shape(), samples.shape());
        self.apply(image, samples.as_texture_mut_slice());

        let range = self.range.unwrap_or(LuminanceRange::EMPTY);
        log::debug!(
            "luminance {}x{} ({}): min {:.4} max {:.4}",
            image.width(),
            image.height(),
            self.strategy,
            range.min,
            range.max
        );
        LuminanceField { samples, range }
    }
}

impl TextureTransform for LuminanceAnalyzer {
    type Input = u8;
    type Output = f32;

    fn apply<'i, 'o>(
        &mut self,
        input: TextureSlice<'i, Self::Input>,
        mut output: TextureMutSlice<'o, Self::Output>,
    ) -> (
        TextureSlice<'i, Self::Input>,
        TextureMutSlice<'o, Self::Output>,
    ) {
        let (width, _, planes) = input.shape();
        debug_assert!(planes == 3 || planes == 4);

        let in_buf = input.as_ref();
        let out_buf = output.as_mut();
        let range = match self.strategy {
            Strategy::Seq => out_buf
                .chunks_exact_mut(width)
                .zip(in_buf.chunks_exact(width * planes))
                .map(|(out_row, in_row)| {
                    luma_row(in_row, out_row, planes);
                    LuminanceRange::of_row(out_row)
                })
                .fold(LuminanceRange::EMPTY, LuminanceRange::merge),
            Strategy::Par => out_buf
                .par_chunks_exact_mut(width)
                .zip(in_buf.par_chunks_exact(width * planes))
                .map(|(out_row, in_row)| {
                    luma_row(in_row, out_row, planes);
                    LuminanceRange::of_row(out_row)
                })
                .reduce(|| LuminanceRange::EMPTY, LuminanceRange::merge),
        };
        self.range = Some(range);

        (input, output)
    }

    fn prepare(&mut self, _: Shape, _: Shape) {
        self.range = None;
    }

    fn name(&self) -> &'static str {
        "luminance"
    }
}

#[simd_targets]
fn luma_row(in_row: &[u8], out_row: &mut [f32], planes: usize) {
    out_row
        .iter_mut()
        .zip(in_row.chunks_exact(planes))
        .for_each(|(out_pixel, in_pixel)| {
            *out_pixel = luminance(in_pixel[0], in_pixel[1], in_pixel[2]);
        });
}
