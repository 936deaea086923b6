//! Two-tone print screens: every output pixel is exactly the shadow or the
//! highlight color.
//!
//! ```text
//! luminance ─ levels ─ screen ─ [join] ─ paint ─ RGBA
//!    f32        f32      u8       u8      u8
//! ```

pub mod join;
pub mod levels;
pub mod paint;
pub mod params;
pub mod screen;

use crate::{
    color_palette::ColorPair,
    error::Result,
    texture::{Texture, TextureRef},
    transform::{
        luminance::LuminanceField,
        pipe::PipeableTransform,
        strategy::Strategy,
        traits::TextureTransform,
    },
};

use self::{
    join::JoinTransform,
    levels::{LevelAdjust, LevelsTransform},
    paint::PaintTransform,
    params::{JoinParams, RasterParams},
    screen::ScreenTransform,
};

/// Renders a [LuminanceField] as a halftone in a given [ColorPair].
#[derive(Debug, Clone)]
pub struct HalftoneRenderer {
    params: RasterParams,
    colors: ColorPair,
    strategy: Strategy,
}

impl HalftoneRenderer {
    /// Fails with [crate::DuotoneError::InvalidParameter] before any pixel is touched.
    pub fn new(params: RasterParams, colors: ColorPair, strategy: Strategy) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            params,
            colors,
            strategy,
        })
    }

    pub fn render(&self, field: &LuminanceField) -> Texture<u8> {
        let mask = self.mask(field);
        let mut output = Texture::<u8>::new(mask.width(), mask.height(), 4);
        PaintTransform::new(self.colors, self.strategy)
            .once(mask.as_texture_slice(), output.as_texture_mut_slice());
        output
    }

    /// The binary mask that [HalftoneRenderer::render] paints, before coloring.
    pub fn mask(&self, field: &LuminanceField) -> Texture<u8> {
        let (width, height) = field.shape_2d();
        let geometry = self.params.style.geometry();

        log::debug!(
            "halftone {}x{} style {} cell {} ({})",
            width,
            height,
            self.params.style,
            self.params.cell_size,
            self.strategy
        );

        let levels = LevelsTransform::new(
            LevelAdjust::new(field.range(), &self.params),
            self.strategy,
        );
        let screen = ScreenTransform::new(self.params.cell_size, geometry, self.strategy);

        let mut mask = Texture::<u8>::new(width as u32, height as u32, 1);
        if geometry.join {
            let join = JoinTransform::new(JoinParams::for_cell(self.params.cell_size), self.strategy);
            levels
                .pipe_with_shape(screen, mask.shape())
                .pipe_with_shape(join, mask.shape())
                .once(field.as_texture_slice(), mask.as_texture_mut_slice());
        } else {
            levels
                .pipe_with_shape(screen, mask.shape())
                .once(field.as_texture_slice(), mask.as_texture_mut_slice());
        }
        mask
    }
}

pub mod prelude {
    pub use super::HalftoneRenderer;
    pub use super::params::{DotShape, JoinParams, LevelParams, RasterParams, RasterStyle};
}
