use duotoner_macros::simd_targets;

use crate::{
    halftone::params::{DotShape, ScreenGeometry},
    texture::{Shape, TextureMutSlice, TextureRef, TextureSlice},
    transform::{strategy::Strategy, traits::TextureTransform},
};

/// A rotated grid of `cell_size` pitch, centred on the image.
///
/// Pixel coordinates are taken relative to the image centre and rotated by
/// the screen angle before being bucketed into cells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Screen {
    cell_size: f32,
    cos: f32,
    sin: f32,
    center: (f32, f32),
    dot: DotShape,
}

impl Screen {
    pub fn new(cell_size: u32, geometry: ScreenGeometry, width: usize, height: usize) -> Self {
        Self {
            cell_size: cell_size as f32,
            cos: geometry.angle.cos(),
            sin: geometry.angle.sin(),
            center: (width as f32 / 2.0, height as f32 / 2.0),
            dot: geometry.dot,
        }
    }

    /// Image space to screen space.
    #[inline(always)]
    fn rotate(&self, x: f32, y: f32) -> (f32, f32) {
        let dx = x - self.center.0;
        let dy = y - self.center.1;
        (dx * self.cos + dy * self.sin, dy * self.cos - dx * self.sin)
    }

    /// Screen space back to image space.
    #[inline(always)]
    fn unrotate(&self, rx: f32, ry: f32) -> (f32, f32) {
        (
            rx * self.cos - ry * self.sin + self.center.0,
            rx * self.sin + ry * self.cos + self.center.1,
        )
    }

    #[inline(always)]
    fn cell_center(&self, r: f32) -> f32 {
        ((r / self.cell_size).floor() + 0.5) * self.cell_size
    }

    /// Whether pixel `(x, y)` is inked.
    ///
    /// The dot radius is driven by the adjusted tone sampled at the centre of
    /// the pixel's cell; cells whose centre falls outside the image use the
    /// pixel's own tone instead.
    #[inline(always)]
    pub fn is_on(&self, tones: &[f32], width: usize, height: usize, x: usize, y: usize) -> bool {
        let (rx, ry) = self.rotate(x as f32, y as f32);
        let (cx, cy) = (self.cell_center(rx), self.cell_center(ry));

        let (sx, sy) = self.unrotate(cx, cy);
        let tone = if sx >= 0.0 && sy >= 0.0 && sx < width as f32 && sy < height as f32 {
            tones[sy as usize * width + sx as usize]
        } else {
            tones[y * width + x]
        };

        let radius = tone / 255.0 * self.cell_size / 2.0;
        self.dot.distance(rx - cx, ry - cy) <= radius
    }
}

/// Adjusted grayscale (1 plane, `f32`) to a binary dot mask (1 plane, `0|1`).
#[derive(Debug, Clone)]
pub struct ScreenTransform {
    cell_size: u32,
    geometry: ScreenGeometry,
    strategy: Strategy,
}

impl ScreenTransform {
    pub fn new(cell_size: u32, geometry: ScreenGeometry, strategy: Strategy) -> Self {
        Self {
            cell_size,
            geometry,
            strategy,
        }
    }
}

impl TextureTransform for ScreenTransform {
    type Input = f32;
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
        let screen = Screen::new(self.cell_size, self.geometry, width, height);
        let tones = input.as_ref();

        self.strategy
            .for_each_row(output.as_mut(), width, |y, out_row| {
                screen_row(&screen, tones, (width, height), y, out_row);
            });

        (input, output)
    }

    fn prepare(&mut self, _: Shape, _: Shape) {}

    fn name(&self) -> &'static str {
        "screen"
    }
}

#[simd_targets]
fn screen_row(
    screen: &Screen,
    tones: &[f32],
    shape: (usize, usize),
    y: usize,
    out_row: &mut [u8],
) {
    let (width, height) = shape;
    out_row
        .iter_mut()
        .enumerate()
        .for_each(|(x, out)| *out = screen.is_on(tones, width, height, x, y) as u8);
}
