use crate::{
    color_palette::ColorPair,
    texture::{Shape, TextureMutSlice, TextureRef, TextureSlice},
    transform::{strategy::Strategy, traits::TextureTransform},
};

/// Binary mask (1 plane) to opaque RGBA: set pixels take the highlight,
/// everything else the shadow.
#[derive(Debug, Clone)]
pub struct PaintTransform {
    colors: ColorPair,
    strategy: Strategy,
}

impl PaintTransform {
    pub fn new(colors: ColorPair, strategy: Strategy) -> Self {
        Self { colors, strategy }
    }
}

impl TextureTransform for PaintTransform {
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
        debug_assert_eq!(input.shape_2d(), output.shape_2d());
        debug_assert_eq!(output.planes(), 4);

        let width = input.width() as usize;
        let row_len = output.row_len();
        let mask = input.as_ref();
        let ink = self.colors.highlight;
        let paper = self.colors.shadow;
        let ink = [ink.r, ink.g, ink.b, u8::MAX];
        let paper = [paper.r, paper.g, paper.b, u8::MAX];

        self.strategy
            .for_each_row(output.as_mut(), row_len, |y, out_row| {
                out_row
                    .chunks_exact_mut(4)
                    .zip(&mask[y * width..(y + 1) * width])
                    .for_each(|(pixel, on)| {
                        pixel.copy_from_slice(if *on != 0 { &ink } else { &paper })
                    });
            });

        (input, output)
    }

    fn prepare(&mut self, _: Shape, _: Shape) {}

    fn name(&self) -> &'static str {
        "paint"
    }
}
