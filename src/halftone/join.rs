use crate::{
    halftone::params::JoinParams,
    texture::{Shape, TextureMutSlice, TextureRef, TextureSlice},
    transform::{strategy::Strategy, traits::TextureTransform},
};

/// Summed-area table over a binary mask.
///
/// `table[(y + 1) * (width + 1) + (x + 1)]` holds the number of set pixels in
/// the rectangle `[0, x] x [0, y]`, so any box count is four lookups.
#[derive(Debug, Clone)]
pub struct SummedArea {
    stride: usize,
    table: Vec<u32>,
}

impl SummedArea {
    pub fn new(mask: &[u8], width: usize, height: usize) -> Self {
        let stride = width + 1;
        let mut table = vec![0u32; stride * (height + 1)];

        for (y, row) in mask.chunks_exact(width).enumerate() {
            let mut row_sum = 0u32;
            for (x, value) in row.iter().enumerate() {
                row_sum += (*value != 0) as u32;
                table[(y + 1) * stride + x + 1] = table[y * stride + x + 1] + row_sum;
            }
        }

        Self { stride, table }
    }

    /// Set pixels in the inclusive box `[x0, x1] x [y0, y1]`.
    #[inline(always)]
    pub fn count(&self, x0: usize, y0: usize, x1: usize, y1: usize) -> u32 {
        let at = |x: usize, y: usize| self.table[y * self.stride + x];
        at(x1 + 1, y1 + 1) + at(x0, y0) - at(x0, y1 + 1) - at(x1 + 1, y0)
    }
}

/// Merges neighbouring dots into contiguous ink.
///
/// A pixel is set when strictly more than [JoinParams::fraction] of the
/// square window around it (clipped to the image) is set in the input mask.
/// The table is built once up front; rows are then filled independently.
#[derive(Debug, Clone)]
pub struct JoinTransform {
    params: JoinParams,
    strategy: Strategy,
}

impl JoinTransform {
    pub fn new(params: JoinParams, strategy: Strategy) -> Self {
        Self { params, strategy }
    }
}

impl TextureTransform for JoinTransform {
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
        debug_assert_eq!(input.planes(), 1);

        let (width, height) = input.shape_2d();
        let table = SummedArea::new(input.as_ref(), width, height);
        let JoinParams {
            half_width: k,
            fraction,
        } = self.params;

        self.strategy
            .for_each_row(output.as_mut(), width, |y, out_row| {
                let y0 = y.saturating_sub(k);
                let y1 = (y + k).min(height - 1);
                for (x, out) in out_row.iter_mut().enumerate() {
                    let x0 = x.saturating_sub(k);
                    let x1 = (x + k).min(width - 1);
                    let total = ((x1 - x0 + 1) * (y1 - y0 + 1)) as f32;
                    let on = table.count(x0, y0, x1, y1) as f32;
                    *out = (on / total > fraction) as u8;
                }
            });

        (input, output)
    }

    fn prepare(&mut self, _: Shape, _: Shape) {}

    fn name(&self) -> &'static str {
        "join"
    }
}

#[cfg(test)]
mod tests {
    use rand::Rng;

    use super::*;
    use crate::texture::Texture;

    fn join(mask: &Texture<u8>, half_width: usize, strategy: Strategy) -> Texture<u8> {
        let mut output = Texture::<u8>::new(mask.width(), mask.height(), 1);
        let params = JoinParams {
            half_width,
            fraction: JoinParams::FRACTION,
        };
        JoinTransform::new(params, strategy)
            .once(mask.as_texture_slice(), output.as_texture_mut_slice());
        output
    }

    /// Direct window scan, used as ground truth.
    fn join_naive(mask: &Texture<u8>, k: usize) -> Vec<u8> {
        let (width, height) = mask.shape_2d();
        let data = mask.as_ref();
        let mut out = vec![0u8; width * height];
        for y in 0..height {
            for x in 0..width {
                let (mut on, mut total) = (0usize, 0usize);
                for wy in y.saturating_sub(k)..=(y + k).min(height - 1) {
                    for wx in x.saturating_sub(k)..=(x + k).min(width - 1) {
                        on += (data[wy * width + wx] != 0) as usize;
                        total += 1;
                    }
                }
                out[y * width + x] = (on as f32 / total as f32 > JoinParams::FRACTION) as u8;
            }
        }
        out
    }

    #[test]
    fn test_summed_area_counts_boxes() {
        #[rustfmt::skip]
        let mask = [
            1, 0, 1,
            0, 1, 1,
        ];
        let table = SummedArea::new(&mask, 3, 2);
        assert_eq!(table.count(0, 0, 2, 1), 4);
        assert_eq!(table.count(1, 0, 2, 1), 3);
        assert_eq!(table.count(2, 1, 2, 1), 1);
        assert_eq!(table.count(0, 1, 0, 1), 0);
    }

    #[test]
    fn test_isolated_pixel_is_dropped() {
        let mut data = vec![0u8; 25];
        data[12] = 1;
        let mask = Texture::from_slice(5, 5, 1, &data);
        assert!(join(&mask, 1, Strategy::Seq).as_ref().iter().all(|v| *v == 0));
    }

    #[test]
    fn test_block_spreads_to_edge_neighbours() {
        // 3x3 block in the middle of a 5x5 mask
        #[rustfmt::skip]
        let data = [
            0, 0, 0, 0, 0,
            0, 1, 1, 1, 0,
            0, 1, 1, 1, 0,
            0, 1, 1, 1, 0,
            0, 0, 0, 0, 0,
        ];
        let mask = Texture::from_slice(5, 5, 1, &data);
        let output = join(&mask, 1, Strategy::Seq);

        // corner windows see 1 of 4, edge windows at least 2 of 6
        #[rustfmt::skip]
        let expected = [
            0, 1, 1, 1, 0,
            1, 1, 1, 1, 1,
            1, 1, 1, 1, 1,
            1, 1, 1, 1, 1,
            0, 1, 1, 1, 0,
        ];
        assert_eq!(output.as_ref(), &expected);
    }

    #[test]
    fn test_matches_direct_window_scan() {
        let mut rng = rand::rng();
        let (width, height) = (37, 23);
        let data: Vec<u8> = (0..width * height)
            .map(|_| rng.random_bool(0.35) as u8)
            .collect();
        let mask = Texture::from_slice(width as u32, height as u32, 1, &data);

        for k in [1, 2, 3] {
            let expected = join_naive(&mask, k);
            assert_eq!(join(&mask, k, Strategy::Seq).as_ref(), expected.as_slice());
            assert_eq!(join(&mask, k, Strategy::Par).as_ref(), expected.as_slice());
        }
    }

    #[test]
    fn test_window_larger_than_image() {
        let mask = Texture::from_slice(2, 1, 1, &[1, 0]);
        // both windows cover the whole image, 1 of 2 set
        assert_eq!(join(&mask, 4, Strategy::Seq).as_ref(), &[1, 1]);
    }
}
